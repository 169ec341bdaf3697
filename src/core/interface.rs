use crate::error::Result;
use std::io::{self, BufRead, IsTerminal, Write};

/// Operator-facing side of a run: yes/no questions and categorized messages.
pub trait Interface {
    fn confirm(&self, question: &str) -> Result<bool>;

    fn info(&self, msg: &str);

    fn success(&self, msg: &str);

    fn warning(&self, msg: &str);

    fn error(&self, msg: &str);
}

/// Interface bound to the process terminal.
#[derive(Debug, Default)]
pub struct TerminalInterface {
    assume_yes: bool,
}

impl TerminalInterface {
    pub fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }

    fn read_answer(&self, question: &str) -> Result<bool> {
        print!("{question} [y/N]: ");
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().lock().read_line(&mut input)?;
        Ok(parse_answer(&input))
    }
}

impl Interface for TerminalInterface {
    fn confirm(&self, question: &str) -> Result<bool> {
        if self.assume_yes {
            println!("{question} [y/N]: y (--yes)");
            return Ok(true);
        }

        if console::user_attended() && io::stdin().is_terminal() {
            let answer = dialoguer::Confirm::new()
                .with_prompt(question)
                .default(false)
                .show_default(true)
                .wait_for_newline(true)
                .interact()?;
            Ok(answer)
        } else {
            self.read_answer(question)
        }
    }

    fn info(&self, msg: &str) {
        println!("{}{msg}", console::style(console::Emoji("ℹ️  ", "[INFO] ")).cyan());
    }

    fn success(&self, msg: &str) {
        println!("{}{msg}", console::style(console::Emoji("✅ ", "[OK] ")).green());
    }

    fn warning(&self, msg: &str) {
        println!(
            "{}{}",
            console::style(console::Emoji("⚠️  ", "[WARN] ")).yellow(),
            console::style(msg).yellow()
        );
    }

    fn error(&self, msg: &str) {
        eprintln!(
            "{}{}",
            console::style(console::Emoji("❌ ", "[ERROR] ")).red(),
            console::style(msg).red().bold()
        );
    }
}

/// Only a single `y` or `Y` counts as yes; anything else, including an
/// empty line, is a no.
pub fn parse_answer(input: &str) -> bool {
    matches!(input.trim(), "y" | "Y")
}
