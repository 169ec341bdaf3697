use crate::error::{GrainError, Result};
use std::path::Path;

fn map_io_error(path: &Path, e: std::io::Error) -> GrainError {
    match e.kind() {
        std::io::ErrorKind::PermissionDenied => GrainError::PermissionDenied {
            path: path.to_path_buf(),
        },
        _ => GrainError::from(e),
    }
}

pub fn ensure_dir_exists(path: &Path) -> Result<()> {
    if path.exists() && !path.is_dir() {
        return Err(GrainError::NotADirectory {
            path: path.to_path_buf(),
        });
    }
    if !path.exists() {
        std::fs::create_dir_all(path).map_err(|e| map_io_error(path, e))?;
    }
    Ok(())
}

pub fn remove_dir_recursive(path: &Path) -> Result<()> {
    if path.exists() {
        std::fs::remove_dir_all(path).map_err(|e| map_io_error(path, e))?;
    }
    Ok(())
}

pub fn remove_file(path: &Path) -> Result<()> {
    std::fs::remove_file(path).map_err(|e| map_io_error(path, e))
}

/// True when `path` is a directory holding at least one entry.
pub fn is_non_empty_dir(path: &Path) -> Result<bool> {
    if !path.is_dir() {
        return Ok(false);
    }
    let mut entries = std::fs::read_dir(path).map_err(|e| map_io_error(path, e))?;
    Ok(entries.next().is_some())
}

/// Rename, falling back to copy and delete when the rename crosses devices.
pub fn move_file(from: &Path, to: &Path) -> Result<()> {
    if std::fs::rename(from, to).is_ok() {
        return Ok(());
    }
    std::fs::copy(from, to).map_err(|e| map_io_error(to, e))?;
    remove_file(from)
}

pub fn symlink_file(target: &Path, link: &Path) -> Result<()> {
    #[cfg(unix)]
    {
        std::os::unix::fs::symlink(target, link).map_err(|e| map_io_error(link, e))?;
    }

    #[cfg(windows)]
    {
        std::os::windows::fs::symlink_file(target, link).map_err(|e| map_io_error(link, e))?;
    }

    Ok(())
}
