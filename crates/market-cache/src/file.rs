//! Directory-backed store, one file per key.

use std::fmt::Write as _;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use crate::kv::{CacheResult, KvStore};
use crate::CacheError;

/// Extension used for blob files.
const BLOB_EXTENSION: &str = "json";

/// Key-value store that keeps each key in its own file under a root directory.
///
/// Writes land in a sibling temp file first and are moved into place with a
/// rename, so readers see either the old blob or the new one.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Open a store rooted at `root`, creating the directory if needed.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, CacheError> {
        let root = root.into();
        std::fs::create_dir_all(&root)
            .map_err(|e| CacheError::OpenError(format!("{}: {}", root.display(), e)))?;
        Ok(Self { root })
    }

    /// Root directory of the store.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the file holding `key`.
    pub fn path_for(&self, key: &str) -> CacheResult<PathBuf> {
        if key.is_empty() {
            return Err(CacheError::InvalidKey("empty key".to_string()));
        }
        Ok(self
            .root
            .join(format!("{}.{}", encode_key(key), BLOB_EXTENSION)))
    }
}

/// Map a key onto a portable file name.
///
/// ASCII alphanumerics, `-`, `_` and `.` pass through; every other byte is
/// written as `%XX`, which keeps distinct keys on distinct files.
fn encode_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    for byte in key.bytes() {
        match byte {
            b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'-' | b'_' | b'.' => out.push(byte as char),
            _ => {
                let _ = write!(out, "%{:02X}", byte);
            }
        }
    }
    out
}

#[async_trait]
impl KvStore for FileStore {
    async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        let path = self.path_for(key)?;
        match tokio::fs::read_to_string(&path).await {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(CacheError::ReadError {
                key: key.to_string(),
                source,
            }),
        }
    }

    async fn set(&self, key: &str, blob: &str) -> CacheResult<()> {
        let path = self.path_for(key)?;
        let tmp = path.with_extension(format!("{}.tmp", BLOB_EXTENSION));

        let write_err = |source| CacheError::WriteError {
            key: key.to_string(),
            source,
        };

        tokio::fs::write(&tmp, blob).await.map_err(write_err)?;
        if let Err(source) = tokio::fs::rename(&tmp, &path).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(write_err(source));
        }

        debug!(key, path = %path.display(), bytes = blob.len(), "Blob written");
        Ok(())
    }
}
