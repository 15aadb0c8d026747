//! File-backed page store with an append-only TSV index.
//!
//! One file per cached page, named by the page's cache key, holding the raw
//! response bytes exactly as received. A shared `index.tsv` in the same
//! directory records `key<TAB>url` per write so keys can be mapped back to
//! their source URLs. The index is a journal, not a database: duplicates are
//! allowed, entries are never rewritten, and nothing guarantees an indexed
//! key still has a data file on disk.

use std::path::{Path, PathBuf};

use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::Error;

/// Name of the shared index file inside the cache directory.
pub const INDEX_FILE: &str = "index.tsv";

/// Disk-backed cache of fetched pages.
///
/// The root directory is injected explicitly so tests can point at isolated
/// temporary directories; nothing in here reads the environment.
#[derive(Debug, Clone)]
pub struct PageCache {
    dir: PathBuf,
}

impl PageCache {
    /// Create a handle rooted at `dir`. No filesystem access happens here;
    /// call [`ensure_ready`](Self::ensure_ready) before reading or writing.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The cache root directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// On-disk path for a cache key.
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }

    /// Create the cache directory tree if absent. Idempotent.
    pub async fn ensure_ready(&self) -> Result<(), Error> {
        fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| Error::Storage(format!("failed to create cache dir {}: {}", self.dir.display(), e)))
    }

    /// Whether a data file exists for `key`.
    pub async fn exists(&self, key: &str) -> bool {
        fs::try_exists(self.path_for(key)).await.unwrap_or(false)
    }

    /// Read the raw bytes cached under `key`.
    ///
    /// Returns `Ok(None)` when no entry exists; absence is not an error.
    pub async fn read(&self, key: &str) -> Result<Option<Vec<u8>>, Error> {
        match fs::read(self.path_for(key)).await {
            Ok(bytes) => {
                tracing::debug!(key, bytes = bytes.len(), "cache read");
                Ok(Some(bytes))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Error::Storage(format!("failed to read cache entry {}: {}", key, e))),
        }
    }

    /// Write `bytes` under `key`, then append one `key<TAB>url` record to the
    /// shared index.
    ///
    /// The data file is synced before the index append is attempted so a
    /// crash mid-write never leaves an index entry pointing at unwritten
    /// data. Best-effort only; this is an append-only journal with no
    /// transactional guarantee. Every call appends, so repeated writes of
    /// the same key produce duplicate index records. URLs are recorded
    /// unescaped, tabs and all (known format limitation, kept for
    /// compatibility with existing tooling).
    pub async fn write(&self, key: &str, url: &str, bytes: &[u8]) -> Result<(), Error> {
        let data_path = self.path_for(key);
        let mut data = fs::File::create(&data_path)
            .await
            .map_err(|e| Error::Storage(format!("failed to create {}: {}", data_path.display(), e)))?;
        data.write_all(bytes)
            .await
            .map_err(|e| Error::Storage(format!("failed to write {}: {}", data_path.display(), e)))?;
        data.sync_data()
            .await
            .map_err(|e| Error::Storage(format!("failed to sync {}: {}", data_path.display(), e)))?;

        let index_path = self.dir.join(INDEX_FILE);
        let mut index = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&index_path)
            .await
            .map_err(|e| Error::Storage(format!("failed to open {}: {}", index_path.display(), e)))?;
        index
            .write_all(format!("{key}\t{url}\n").as_bytes())
            .await
            .map_err(|e| Error::Storage(format!("failed to append to {}: {}", index_path.display(), e)))?;
        index
            .flush()
            .await
            .map_err(|e| Error::Storage(format!("failed to flush {}: {}", index_path.display(), e)))?;

        tracing::debug!(key, url, bytes = bytes.len(), "cache write");
        Ok(())
    }
}
