//! On-disk catalog format.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, instrument};

use shelfview_core::Result;
use shelfview_core::error::{Error, ProtocolError, TransportError};

/// A catalog file is either a search response or a bare list of documents.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CatalogFile {
    Response {
        docs: Vec<Value>,
    },
    Docs(Vec<Value>),
}

/// A JSON catalog stored on disk.
#[derive(Debug, Clone)]
pub struct Catalog {
    path: PathBuf,
}

impl Catalog {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every document in the catalog.
    ///
    /// The file is read on each call so edits on disk show up on the next search.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub async fn load(&self) -> Result<Vec<Value>> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|e| Error::Transport(TransportError::from(e)))?;

        let file: CatalogFile = serde_json::from_slice(&bytes).map_err(|e| {
            Error::Protocol(ProtocolError::malformed(format!(
                "{}: {}",
                self.path.display(),
                e
            )))
        })?;

        let docs = match file {
            CatalogFile::Response { docs } => docs,
            CatalogFile::Docs(docs) => docs,
        };
        debug!(docs = docs.len(), "loaded catalog");
        Ok(docs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn loads_both_layouts() {
        let dir = TempDir::new().unwrap();

        let response = dir.path().join("response.json");
        std::fs::write(&response, r#"{"numFound": 2, "docs": [{"title": "a"}, {"title": "b"}]}"#)
            .unwrap();
        assert_eq!(Catalog::new(&response).load().await.unwrap().len(), 2);

        let bare = dir.path().join("bare.json");
        std::fs::write(&bare, r#"[{"title": "a"}]"#).unwrap();
        assert_eq!(Catalog::new(&bare).load().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn missing_file_is_transport_error() {
        let dir = TempDir::new().unwrap();
        let err = Catalog::new(dir.path().join("nope.json"))
            .load()
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Transport(_)));
    }

    #[tokio::test]
    async fn malformed_file_is_protocol_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = Catalog::new(&path).load().await.unwrap_err();
        assert!(matches!(err, Error::Protocol(_)));
    }
}
