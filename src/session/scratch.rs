use std::io::{ErrorKind, Write};
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::{NavError, ScratchAction};

/// Temporary file holding an item's content while an external editor runs.
///
/// The file is removed when the guard is closed or dropped, so every exit
/// path out of an external edit cleans up.
#[derive(Debug)]
pub struct ScratchFile {
    file: NamedTempFile,
}

impl ScratchFile {
    /// Create a uniquely named `page-*.md` file and write `content` to it.
    ///
    /// Uses the system temp directory unless `dir` is given.
    ///
    /// # Errors
    ///
    /// Returns [`NavError::ScratchFile`] if the file cannot be created or
    /// written. Nothing is left on disk in that case.
    pub fn create(content: &str, dir: Option<&Path>) -> Result<Self, NavError> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("page-").suffix(".md");
        let mut file = match dir {
            Some(dir) => builder.tempfile_in(dir),
            None => builder.tempfile(),
        }
        .map_err(|e| NavError::scratch(ScratchAction::Create, e))?;

        file.write_all(content.as_bytes())
            .and_then(|()| file.flush())
            .map_err(|e| NavError::scratch(ScratchAction::Write, e))?;
        Ok(Self { file })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Read the file back by path, picking up editors that replace the
    /// file instead of writing in place.
    ///
    /// # Errors
    ///
    /// Returns [`NavError::ScratchFile`] if the file is gone or not UTF-8.
    pub fn read_back(&self) -> Result<String, NavError> {
        std::fs::read_to_string(self.path()).map_err(|e| NavError::scratch(ScratchAction::Read, e))
    }

    /// Delete the file now. A file the editor already removed is fine.
    pub fn remove(self) {
        let path = self.path().to_path_buf();
        match self.file.close() {
            Ok(()) => tracing::debug!(path = %path.display(), "removed scratch file"),
            Err(err) if err.kind() == ErrorKind::NotFound => {}
            Err(err) => {
                tracing::warn!(path = %path.display(), %err, "failed to remove scratch file");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_create_writes_content_with_page_name() {
        let dir = tempdir().unwrap();
        let scratch = ScratchFile::create("Welcome", Some(dir.path())).unwrap();
        let name = scratch.path().file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("page-"));
        assert!(name.ends_with(".md"));
        assert_eq!(scratch.read_back().unwrap(), "Welcome");
    }

    #[test]
    fn test_names_are_unique() {
        let dir = tempdir().unwrap();
        let a = ScratchFile::create("a", Some(dir.path())).unwrap();
        let b = ScratchFile::create("b", Some(dir.path())).unwrap();
        assert_ne!(a.path(), b.path());
    }

    #[test]
    fn test_remove_deletes_file() {
        let dir = tempdir().unwrap();
        let scratch = ScratchFile::create("x", Some(dir.path())).unwrap();
        let path = scratch.path().to_path_buf();
        scratch.remove();
        assert!(!path.exists());
    }

    #[test]
    fn test_remove_tolerates_missing_file() {
        let dir = tempdir().unwrap();
        let scratch = ScratchFile::create("x", Some(dir.path())).unwrap();
        std::fs::remove_file(scratch.path()).unwrap();
        scratch.remove();
    }

    #[test]
    fn test_drop_deletes_file() {
        let dir = tempdir().unwrap();
        let path = {
            let scratch = ScratchFile::create("x", Some(dir.path())).unwrap();
            scratch.path().to_path_buf()
        };
        assert!(!path.exists());
    }

    #[test]
    fn test_create_in_missing_directory_fails() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope");
        let err = ScratchFile::create("x", Some(&missing)).unwrap_err();
        assert!(matches!(
            err,
            NavError::ScratchFile {
                action: ScratchAction::Create,
                ..
            }
        ));
    }

    #[test]
    fn test_read_back_rejects_invalid_utf8() {
        let dir = tempdir().unwrap();
        let scratch = ScratchFile::create("x", Some(dir.path())).unwrap();
        std::fs::write(scratch.path(), [0xff, 0xfe, 0xfd]).unwrap();
        assert!(scratch.read_back().is_err());
    }
}
