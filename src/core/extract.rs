use crate::error::{GrainError, Result};
use crate::utils::fs;
use flate2::read::GzDecoder;
use std::fs::File;
use std::path::Path;
use tar::Archive;
use zip::ZipArchive;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveFormat {
    Zip,
    TarGz,
    Tar,
}

impl ArchiveFormat {
    pub fn detect(path: &Path) -> Option<Self> {
        let file_name = path.file_name()?.to_str()?.to_lowercase();

        if file_name.ends_with(".tar.gz") || file_name.ends_with(".tgz") {
            Some(ArchiveFormat::TarGz)
        } else if file_name.ends_with(".tar") {
            Some(ArchiveFormat::Tar)
        } else if file_name.ends_with(".zip") {
            Some(ArchiveFormat::Zip)
        } else {
            None
        }
    }
}

/// Archive-decompression capability.
#[derive(Debug, Default)]
pub struct Extractor;

impl Extractor {
    pub fn new() -> Self {
        Self
    }

    /// Fails with `MissingCapability` when `archive_path` has no supported format.
    pub fn ensure_supported(&self, archive_path: &Path) -> Result<ArchiveFormat> {
        ArchiveFormat::detect(archive_path).ok_or_else(|| {
            GrainError::missing_capability(
                format!("decompressor for {archive_path:?}"),
                "Supported archive formats are .zip, .tar.gz, .tgz and .tar; \
                 set archive_name accordingly.",
            )
        })
    }

    /// Unpack `archive_path` into `destination` and return the number of
    /// files written. Whatever was written before a failure stays in place.
    pub fn extract(&self, archive_path: &Path, destination: &Path) -> Result<usize> {
        let format = self.ensure_supported(archive_path)?;
        fs::ensure_dir_exists(destination)
            .map_err(|e| GrainError::extraction_error(archive_path, e))?;

        match format {
            ArchiveFormat::Zip => self.extract_zip(archive_path, destination),
            ArchiveFormat::TarGz => {
                let file = File::open(archive_path)
                    .map_err(|e| GrainError::extraction_error(archive_path, e))?;
                self.extract_tar(Archive::new(GzDecoder::new(file)), archive_path, destination)
            }
            ArchiveFormat::Tar => {
                let file = File::open(archive_path)
                    .map_err(|e| GrainError::extraction_error(archive_path, e))?;
                self.extract_tar(Archive::new(file), archive_path, destination)
            }
        }
    }

    fn extract_tar<R: std::io::Read>(
        &self,
        mut archive: Archive<R>,
        archive_path: &Path,
        destination: &Path,
    ) -> Result<usize> {
        let fail = |e: std::io::Error| GrainError::extraction_error(archive_path, e);
        let mut written = 0;

        for entry in archive.entries().map_err(fail)? {
            let mut entry = entry.map_err(fail)?;
            let is_file = entry.header().entry_type().is_file();
            // unpack_in refuses entries that would land outside destination
            if entry.unpack_in(destination).map_err(fail)? && is_file {
                written += 1;
            }
        }
        Ok(written)
    }

    fn extract_zip(&self, archive_path: &Path, destination: &Path) -> Result<usize> {
        let file =
            File::open(archive_path).map_err(|e| GrainError::extraction_error(archive_path, e))?;
        let mut archive =
            ZipArchive::new(file).map_err(|e| GrainError::extraction_error(archive_path, e))?;
        let mut written = 0;

        for i in 0..archive.len() {
            let mut file = archive
                .by_index(i)
                .map_err(|e| GrainError::extraction_error(archive_path, e))?;
            let outpath = match file.enclosed_name() {
                Some(path) => destination.join(path),
                None => continue,
            };

            if file.is_dir() {
                fs::ensure_dir_exists(&outpath)
                    .map_err(|e| GrainError::extraction_error(archive_path, e))?;
            } else {
                if let Some(p) = outpath.parent() {
                    fs::ensure_dir_exists(p)
                        .map_err(|e| GrainError::extraction_error(archive_path, e))?;
                }
                let mut outfile = File::create(&outpath)
                    .map_err(|e| GrainError::extraction_error(archive_path, e))?;
                std::io::copy(&mut file, &mut outfile)
                    .map_err(|e| GrainError::extraction_error(archive_path, e))?;
                written += 1;
            }

            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                if let Some(mode) = file.unix_mode() {
                    std::fs::set_permissions(&outpath, std::fs::Permissions::from_mode(mode))
                        .map_err(|e| GrainError::extraction_error(archive_path, e))?;
                }
            }
        }
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;

    #[test]
    fn test_detect_format() {
        assert_eq!(
            ArchiveFormat::detect(Path::new("data/Grain-Data.zip")),
            Some(ArchiveFormat::Zip)
        );
        assert_eq!(
            ArchiveFormat::detect(Path::new("Grain.TAR.GZ")),
            Some(ArchiveFormat::TarGz)
        );
        assert_eq!(
            ArchiveFormat::detect(Path::new("grain.tgz")),
            Some(ArchiveFormat::TarGz)
        );
        assert_eq!(
            ArchiveFormat::detect(Path::new("grain.tar")),
            Some(ArchiveFormat::Tar)
        );
        assert_eq!(ArchiveFormat::detect(Path::new("grain.rar")), None);
    }

    #[test]
    fn test_unsupported_format_is_missing_capability() {
        let err = Extractor::new()
            .ensure_supported(Path::new("grain.7z"))
            .unwrap_err();
        assert!(matches!(err, GrainError::MissingCapability { .. }));
    }

    #[test]
    fn test_extract_zip_skips_escaping_entries() {
        let dir = tempfile::tempdir().unwrap();
        let archive_path = dir.path().join("grain.zip");
        {
            let mut writer = zip::ZipWriter::new(File::create(&archive_path).unwrap());
            let options = SimpleFileOptions::default();
            writer.add_directory("Grain-Data/", options).unwrap();
            writer.start_file("Grain-Data/a.npz", options).unwrap();
            writer.write_all(b"a").unwrap();
            writer.start_file("../escape.npz", options).unwrap();
            writer.write_all(b"b").unwrap();
            writer.finish().unwrap();
        }

        let out = dir.path().join("out");
        let written = Extractor::new().extract(&archive_path, &out).unwrap();
        assert_eq!(written, 1);
        assert!(out.join("Grain-Data/a.npz").is_file());
        assert!(!dir.path().join("escape.npz").exists());
    }

    #[test]
    fn test_extract_tar_gz() {
        let dir = tempfile::tempdir().unwrap();
        let archive_path = dir.path().join("grain.tar.gz");
        {
            let encoder = flate2::write::GzEncoder::new(
                File::create(&archive_path).unwrap(),
                flate2::Compression::default(),
            );
            let mut builder = tar::Builder::new(encoder);
            let data = b"sample";
            let mut header = tar::Header::new_gnu();
            header.set_size(data.len() as u64);
            header.set_mode(0o644);
            header.set_cksum();
            builder
                .append_data(&mut header, "nested/b.npz", &data[..])
                .unwrap();
            builder.into_inner().unwrap().finish().unwrap();
        }

        let out = dir.path().join("out");
        let written = Extractor::new().extract(&archive_path, &out).unwrap();
        assert_eq!(written, 1);
        assert_eq!(std::fs::read(out.join("nested/b.npz")).unwrap(), b"sample");
    }

    #[test]
    fn test_conflicting_zip_entries_are_extraction_error() {
        let dir = tempfile::tempdir().unwrap();
        let archive_path = dir.path().join("grain.zip");
        {
            let mut writer = zip::ZipWriter::new(File::create(&archive_path).unwrap());
            let options = SimpleFileOptions::default();
            writer.start_file("Grain-Data", options).unwrap();
            writer.write_all(b"plain file").unwrap();
            writer.start_file("Grain-Data/a.npz", options).unwrap();
            writer.write_all(b"a").unwrap();
            writer.finish().unwrap();
        }

        let err = Extractor::new()
            .extract(&archive_path, &dir.path().join("out"))
            .unwrap_err();
        assert!(matches!(err, GrainError::Extraction { .. }));
        assert_eq!(err.category(), "extraction error");
    }

    #[test]
    fn test_corrupt_archive_is_extraction_error() {
        let dir = tempfile::tempdir().unwrap();
        let archive_path = dir.path().join("grain.zip");
        std::fs::write(&archive_path, b"definitely not a zip").unwrap();

        let err = Extractor::new()
            .extract(&archive_path, &dir.path().join("out"))
            .unwrap_err();
        assert!(matches!(err, GrainError::Extraction { .. }));
    }
}
