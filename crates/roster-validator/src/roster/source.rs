use std::future::Future;
use std::path::{Path, PathBuf};

/// Read-only supplier of the ordered roster of raw user names.
pub trait NameSource: Send + Sync {
    fn load(&self) -> impl Future<Output = Result<Vec<String>, NameSourceError>> + Send;
}

/// Failure to produce the roster. Surfaces to HTTP callers as a 500.
#[derive(Debug, thiserror::Error)]
pub enum NameSourceError {
    #[error("failed to read user list {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("user list {} is not a JSON array of strings: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Roster stored as a JSON array of strings on the local filesystem.
/// The file is re-read on every load.
#[derive(Debug, Clone)]
pub struct JsonFileNameSource {
    path: PathBuf,
}

impl JsonFileNameSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl NameSource for JsonFileNameSource {
    async fn load(&self) -> Result<Vec<String>, NameSourceError> {
        let raw = tokio::fs::read(&self.path)
            .await
            .map_err(|source| NameSourceError::Read {
                path: self.path.clone(),
                source,
            })?;

        serde_json::from_slice::<Vec<String>>(&raw).map_err(|source| NameSourceError::Parse {
            path: self.path.clone(),
            source,
        })
    }
}
