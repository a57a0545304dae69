//! Disk-backed chunk cache.
//!
//! Every successfully downloaded chunk is written to a cache directory so
//! later runs can skip the network entirely. Entries are keyed by grid
//! coordinate, one file per chunk named `{col}_{row}.png`, holding the raw
//! bytes exactly as received from the server. The cache never evicts or
//! expires entries; files persist until deleted externally.
//!
//! Single-process sequential access is assumed throughout - there is no
//! locking, and concurrent external writers are out of scope.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::coord::Chunk;

/// Errors that can occur during cache operations.
#[derive(Debug, Error)]
pub enum CacheError {
    /// I/O error while reading or writing a cache entry.
    #[error("cache I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Filesystem cache for raw chunk bytes.
///
/// The cache directory is created lazily on the first write, so
/// constructing a `DiskCache` never touches the filesystem.
///
/// # Example
///
/// ```no_run
/// # async fn example() -> Result<(), tilestitch::cache::CacheError> {
/// use tilestitch::cache::DiskCache;
/// use tilestitch::coord::Chunk;
///
/// let cache = DiskCache::new("./cache");
/// let chunk = Chunk::new(1126, 695);
/// if cache.contains(chunk).await {
///     let bytes = cache.read(chunk).await?;
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct DiskCache {
    root: PathBuf,
}

impl DiskCache {
    /// Creates a cache rooted at the given directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The cache root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the cache entry for a chunk.
    fn entry_path(&self, chunk: Chunk) -> PathBuf {
        self.root.join(format!("{}_{}.png", chunk.col, chunk.row))
    }

    /// Returns true if a cache entry exists for the chunk.
    ///
    /// A missing cache directory is treated as an empty cache, never an
    /// error.
    pub async fn contains(&self, chunk: Chunk) -> bool {
        tokio::fs::try_exists(self.entry_path(chunk))
            .await
            .unwrap_or(false)
    }

    /// Reads the cached bytes for a chunk.
    ///
    /// Callers are expected to check [`contains`](Self::contains) first; a
    /// missing entry surfaces as [`CacheError::Io`].
    pub async fn read(&self, chunk: Chunk) -> Result<Vec<u8>, CacheError> {
        Ok(tokio::fs::read(self.entry_path(chunk)).await?)
    }

    /// Persists the bytes for a chunk, creating the cache directory if it
    /// does not exist yet.
    pub async fn write(&self, chunk: Chunk, bytes: &[u8]) -> Result<(), CacheError> {
        tokio::fs::create_dir_all(&self.root).await?;
        tokio::fs::write(self.entry_path(chunk), bytes).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn cache_in(dir: &TempDir) -> DiskCache {
        DiskCache::new(dir.path().join("cache"))
    }

    #[tokio::test]
    async fn test_contains_false_when_directory_missing() {
        let dir = TempDir::new().unwrap();
        let cache = cache_in(&dir);

        assert!(!cache.contains(Chunk::new(1, 2)).await);
    }

    #[tokio::test]
    async fn test_write_creates_directory_lazily() {
        let dir = TempDir::new().unwrap();
        let cache = cache_in(&dir);
        assert!(!cache.root().exists());

        cache.write(Chunk::new(3, 4), b"tile bytes").await.unwrap();

        assert!(cache.root().exists());
        assert!(cache.contains(Chunk::new(3, 4)).await);
    }

    #[tokio::test]
    async fn test_read_returns_written_bytes() {
        let dir = TempDir::new().unwrap();
        let cache = cache_in(&dir);
        let bytes = vec![0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A];

        cache.write(Chunk::new(10, 20), &bytes).await.unwrap();
        let read = cache.read(Chunk::new(10, 20)).await.unwrap();

        assert_eq!(read, bytes);
    }

    #[tokio::test]
    async fn test_entry_file_naming() {
        let dir = TempDir::new().unwrap();
        let cache = cache_in(&dir);

        cache.write(Chunk::new(1126, 695), b"x").await.unwrap();

        assert!(cache.root().join("1126_695.png").exists());
    }

    #[tokio::test]
    async fn test_write_replaces_existing_entry() {
        let dir = TempDir::new().unwrap();
        let cache = cache_in(&dir);
        let chunk = Chunk::new(7, 7);

        cache.write(chunk, b"old").await.unwrap();
        cache.write(chunk, b"new").await.unwrap();

        assert_eq!(cache.read(chunk).await.unwrap(), b"new");
    }

    #[tokio::test]
    async fn test_read_missing_entry_is_error() {
        let dir = TempDir::new().unwrap();
        let cache = cache_in(&dir);

        let result = cache.read(Chunk::new(0, 0)).await;
        assert!(matches!(result, Err(CacheError::Io(_))));
    }

    #[tokio::test]
    async fn test_distinct_chunks_do_not_collide() {
        let dir = TempDir::new().unwrap();
        let cache = cache_in(&dir);

        cache.write(Chunk::new(1, 12), b"a").await.unwrap();
        cache.write(Chunk::new(11, 2), b"b").await.unwrap();

        assert_eq!(cache.read(Chunk::new(1, 12)).await.unwrap(), b"a");
        assert_eq!(cache.read(Chunk::new(11, 2)).await.unwrap(), b"b");
    }
}
