use crate::core::acquire::{ArchiveSource, DatasetAcquirer, Outcome};
use crate::core::config::Config;
use crate::core::download::CurlFetcher;
use crate::core::extract::Extractor;
use crate::core::interface::{Interface, TerminalInterface};
use crate::error::Result;

pub fn fetch_dataset(config: &Config, source: Option<&str>, assume_yes: bool) -> Result<Outcome> {
    let ui = TerminalInterface::new(assume_yes);
    let fetcher = CurlFetcher::new(config.fetch_program.clone());
    let acquirer = DatasetAcquirer::new(config, fetcher, Extractor::new(), &ui);

    let outcome = acquirer.run(source)?;

    if let Outcome::Completed(report) = &outcome {
        let origin = match &report.source {
            ArchiveSource::Downloaded { url } => format!("downloaded from {url}"),
            ArchiveSource::Reused => "reused local archive".to_string(),
        };
        ui.success(&format!(
            "Dataset ready at {:?} ({} .{} file(s), {origin})",
            report.extract_dir,
            report.summary.total,
            config.extension()
        ));
    }

    Ok(outcome)
}
