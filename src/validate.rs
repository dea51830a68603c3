use miette::Diagnostic;
use std::{
    fs, io,
    path::{Path, PathBuf},
};
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum PathError {
    #[error("selected path does not exist: '{path}'")]
    #[diagnostic(
        code(paragen::validate::not_found),
        help("Create the base directory first, or point --base at an existing one")
    )]
    NotFound { path: PathBuf },

    #[error("unable to access path: '{path}'")]
    #[diagnostic(
        code(paragen::validate::access),
        help("Check the permissions on the path and its parents")
    )]
    AccessDenied {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("path is not a directory: '{path}'")]
    #[diagnostic(
        code(paragen::validate::not_a_directory),
        help("The base must be a directory, not a file")
    )]
    NotADirectory { path: PathBuf },
}

/// Checks that the base path exists, can be inspected and is a directory.
///
/// The check is advisory, not a lock: nothing prevents the path from
/// changing between validation and use.
///
/// # Errors
///
/// Returns a [`PathError`] naming the first failed check.
pub fn validate_base_dir(path: &Path) -> Result<(), PathError> {
    let metadata = match fs::metadata(path) {
        Ok(metadata) => metadata,
        Err(error) if error.kind() == io::ErrorKind::NotFound => {
            return Err(PathError::NotFound {
                path: path.to_path_buf(),
            });
        }
        Err(error) => {
            return Err(PathError::AccessDenied {
                path: path.to_path_buf(),
                source: error,
            });
        }
    };

    if !metadata.is_dir() {
        return Err(PathError::NotADirectory {
            path: path.to_path_buf(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn an_existing_directory_passes() {
        let dir = tempfile::tempdir().unwrap();

        assert!(validate_base_dir(dir.path()).is_ok());
    }

    #[test]
    fn a_missing_path_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("does-not-exist");

        let result = validate_base_dir(&missing);

        assert!(matches!(result, Err(PathError::NotFound { path }) if path == missing));
    }

    #[test]
    fn a_regular_file_is_not_a_directory() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("plain.txt");
        fs::write(&file, "content").unwrap();

        let result = validate_base_dir(&file);

        assert!(matches!(result, Err(PathError::NotADirectory { path }) if path == file));
    }

    #[test]
    fn validation_has_no_side_effects() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("does-not-exist");

        let _ = validate_base_dir(&missing);

        assert!(!missing.exists());
    }
}
