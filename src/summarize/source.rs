//! Access to the target repository's source text.

use std::collections::HashMap;
use std::path::PathBuf;

use crate::error::{AtlasError, AtlasResult};

/// Provides the lines of a source document by repository-relative path.
pub trait SourceProvider: Send + Sync {
    fn document_lines(&self, document: &str) -> AtlasResult<Vec<String>>;
}

/// Reads documents from the target repository on disk.
pub struct FsSourceProvider {
    repo_root: PathBuf,
}

impl FsSourceProvider {
    pub fn new(repo_root: impl Into<PathBuf>) -> Self {
        Self {
            repo_root: repo_root.into(),
        }
    }
}

impl SourceProvider for FsSourceProvider {
    fn document_lines(&self, document: &str) -> AtlasResult<Vec<String>> {
        let path = self.repo_root.join(document);
        let text = std::fs::read_to_string(&path).map_err(|e| AtlasError::SourceUnavailable {
            document: document.to_string(),
            reason: e.to_string(),
        })?;
        Ok(text.lines().map(str::to_string).collect())
    }
}

/// In-memory document store for tests.
#[derive(Default)]
pub struct InMemorySource {
    documents: HashMap<String, Vec<String>>,
}

impl InMemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(mut self, document: impl Into<String>, text: &str) -> Self {
        self.documents
            .insert(document.into(), text.lines().map(str::to_string).collect());
        self
    }
}

impl SourceProvider for InMemorySource {
    fn document_lines(&self, document: &str) -> AtlasResult<Vec<String>> {
        self.documents
            .get(document)
            .cloned()
            .ok_or_else(|| AtlasError::SourceUnavailable {
                document: document.to_string(),
                reason: "document not registered".to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_fs_provider_reads_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.py");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "def run():").unwrap();
        writeln!(file, "    pass").unwrap();

        let provider = FsSourceProvider::new(dir.path());
        let lines = provider.document_lines("app.py").unwrap();
        assert_eq!(lines, vec!["def run():", "    pass"]);
    }

    #[test]
    fn test_fs_provider_missing_document() {
        let dir = tempfile::tempdir().unwrap();
        let provider = FsSourceProvider::new(dir.path());

        match provider.document_lines("missing.py") {
            Err(AtlasError::SourceUnavailable { document, .. }) => {
                assert_eq!(document, "missing.py");
            }
            other => panic!("expected SourceUnavailable, got {other:?}"),
        }
    }

    #[test]
    fn test_in_memory_source() {
        let source = InMemorySource::new().with_document("app.py", "a\nb");
        assert_eq!(source.document_lines("app.py").unwrap(), vec!["a", "b"]);
        assert!(source.document_lines("other.py").is_err());
    }
}
