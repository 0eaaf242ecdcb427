// src/output/writer.rs
// =============================================================================
// Writes the downloaded template to disk.
//
// Behavior:
// - <directory>/<filename> is created, or truncated if it already exists
// - No backup, no atomic rename: the old file is simply overwritten
// - The absolute path is returned so main.rs can report it
// =============================================================================

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::AppError;

/// Writes `content` to `directory/filename` and returns the absolute path.
pub fn write_template(directory: &Path, filename: &str, content: &[u8]) -> Result<PathBuf, AppError> {
    let path = directory.join(filename);

    let io_err = |source| AppError::FileWrite {
        path: path.clone(),
        source,
    };

    let mut file = File::create(&path).map_err(io_err)?;
    file.write_all(content).map_err(io_err)?;
    // Surface delayed write errors here instead of losing them on drop
    file.sync_all().map_err(io_err)?;
    drop(file);

    debug!(path = %path.display(), bytes = content.len(), "wrote template");

    // Like the path itself, this does not follow symlinks
    Ok(std::path::absolute(&path).unwrap_or(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_writes_exact_bytes() {
        let dir = tempdir().unwrap();

        let written = write_template(dir.path(), ".gitignore", b"*.log\n").unwrap();

        assert_eq!(written, dir.path().join(".gitignore"));
        assert_eq!(fs::read(&written).unwrap(), b"*.log\n");
    }

    #[test]
    fn test_overwrites_existing_file() {
        let dir = tempdir().unwrap();
        let target = dir.path().join(".gitignore");
        fs::write(&target, "a much longer pre-existing file\nwith two lines\n").unwrap();

        write_template(dir.path(), ".gitignore", b"*.log\n").unwrap();

        assert_eq!(fs::read(&target).unwrap(), b"*.log\n");
    }

    #[test]
    fn test_custom_filename() {
        let dir = tempdir().unwrap();

        let written = write_template(dir.path(), "python.ignore", b"__pycache__/\n").unwrap();

        assert!(written.ends_with("python.ignore"));
        assert!(written.is_absolute());
    }

    #[test]
    fn test_missing_directory_is_a_write_error() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("does-not-exist");

        match write_template(&missing, ".gitignore", b"*.log\n") {
            Err(AppError::FileWrite { path, source }) => {
                assert_eq!(path, missing.join(".gitignore"));
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("expected FileWrite, got {:?}", other),
        }
    }
}
