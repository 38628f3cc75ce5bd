//! Byte sources for configuration documents.
//!
//! The loader never touches the file system directly. It asks a
//! [`DocumentSource`] for documents by name, which lets tests and embedders
//! serve documents from memory.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::ConfigError;

/// Provides raw document bytes by name.
pub trait DocumentSource {
    /// Read the named document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotFound`] when the document does not exist and
    /// [`ConfigError::ReadError`] when it exists but cannot be read.
    fn read(&self, name: &str) -> Result<Vec<u8>, ConfigError>;
}

impl<S: DocumentSource + ?Sized> DocumentSource for &S {
    fn read(&self, name: &str) -> Result<Vec<u8>, ConfigError> {
        (**self).read(name)
    }
}

impl<S: DocumentSource + ?Sized> DocumentSource for Box<S> {
    fn read(&self, name: &str) -> Result<Vec<u8>, ConfigError> {
        (**self).read(name)
    }
}

/// Reads documents from a directory on disk.
///
/// # Example
///
/// ```no_run
/// use switchboard_config::{DirectorySource, DocumentSource};
///
/// let source = DirectorySource::new("./config");
/// let bytes = source.read("main.yaml")?;
/// # Ok::<(), switchboard_config::ConfigError>(())
/// ```
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    /// Serve documents from `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory documents are read from.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl DocumentSource for DirectorySource {
    fn read(&self, name: &str) -> Result<Vec<u8>, ConfigError> {
        let path = self.root.join(name);
        fs::read(&path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => ConfigError::not_found(path.display().to_string()),
            _ => ConfigError::read_error(path.display().to_string(), e),
        })
    }
}

/// Serves documents from memory.
///
/// # Example
///
/// ```
/// use switchboard_config::{DocumentSource, MemorySource};
///
/// let source = MemorySource::new().with_document("main.yaml", "system:\n  name: demo\n");
/// assert!(source.read("main.yaml").is_ok());
/// assert!(source.read("providers.yaml").unwrap_err().is_not_found());
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    documents: HashMap<String, Vec<u8>>,
}

impl MemorySource {
    /// Create an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a document.
    pub fn with_document(mut self, name: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        self.insert(name, content);
        self
    }

    /// Add or replace a document in place.
    pub fn insert(&mut self, name: impl Into<String>, content: impl Into<Vec<u8>>) {
        self.documents.insert(name.into(), content.into());
    }
}

impl DocumentSource for MemorySource {
    fn read(&self, name: &str) -> Result<Vec<u8>, ConfigError> {
        self.documents
            .get(name)
            .cloned()
            .ok_or_else(|| ConfigError::not_found(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_source_read() {
        let source = MemorySource::new().with_document("ui.yaml", "ui: {}");
        assert_eq!(source.read("ui.yaml").unwrap(), b"ui: {}");
    }

    #[test]
    fn test_memory_source_missing() {
        let err = MemorySource::new().read("main.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::NotFound { ref document } if document == "main.yaml"));
    }

    #[test]
    fn test_directory_source_read_and_missing() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("main.yaml"), "system:\n  name: test\n").unwrap();

        let source = DirectorySource::new(dir.path());
        assert_eq!(source.root(), dir.path());
        assert!(source.read("main.yaml").is_ok());

        let err = source.read("security.yaml").unwrap_err();
        assert!(err.is_not_found());
        assert!(err.to_string().contains("security.yaml"));
    }

    #[test]
    fn test_source_by_reference() {
        let source = MemorySource::new().with_document("a.yaml", "x: 1");
        let by_ref: &dyn DocumentSource = &source;
        assert!(by_ref.read("a.yaml").is_ok());
        let boxed: Box<dyn DocumentSource> = Box::new(source);
        assert!(boxed.read("a.yaml").is_ok());
    }
}
