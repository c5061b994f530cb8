//! Where the persisted state blob lives.
//!
//! The store only ever reads or overwrites the whole document, so a backend
//! is a single get/put slot keyed by [`STORAGE_KEY`].

use crate::error::{BoardError, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::fs;
use tokio::sync::Mutex;

/// The one well-known key the state document is stored under
pub const STORAGE_KEY: &str = "monoboard-data";

/// Storage for the serialized [`AppState`](crate::types::AppState) document
#[async_trait]
pub trait StateBackend: Send + Sync {
    /// Read the stored document; `None` when nothing was ever saved
    async fn read_blob(&self) -> Result<Option<String>>;

    /// Replace the stored document
    async fn write_blob(&self, blob: &str) -> Result<()>;
}

/// Stores the document as `<dir>/monoboard-data.json`
#[derive(Debug, Clone)]
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    /// Create a backend storing its file in `dir`
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(format!("{STORAGE_KEY}.json")),
        }
    }

    /// Path of the state file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl StateBackend for FileBackend {
    async fn read_blob(&self) -> Result<Option<String>> {
        match fs::read_to_string(&self.path).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn write_blob(&self, blob: &str) -> Result<()> {
        atomic_write(&self.path, blob.as_bytes())
            .await
            .map_err(|e| BoardError::storage(format!("{}: {e}", self.path.display())))
    }
}

/// In-process backend. Clones share the same slot.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    blob: Arc<Mutex<Option<String>>>,
    writes: Arc<AtomicUsize>,
    failing: Arc<AtomicBool>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with an already stored document
    pub fn with_blob(blob: impl Into<String>) -> Self {
        Self {
            blob: Arc::new(Mutex::new(Some(blob.into()))),
            ..Self::default()
        }
    }

    /// Make subsequent writes fail, like a full disk or exceeded quota
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Number of successful writes so far
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Current stored document
    pub async fn blob(&self) -> Option<String> {
        self.blob.lock().await.clone()
    }
}

#[async_trait]
impl StateBackend for MemoryBackend {
    async fn read_blob(&self) -> Result<Option<String>> {
        Ok(self.blob.lock().await.clone())
    }

    async fn write_blob(&self, blob: &str) -> Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(BoardError::storage("memory backend is read-only"));
        }
        *self.blob.lock().await = Some(blob.to_string());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Write via a temp file in the same directory, then rename over the target
pub(crate) async fn atomic_write(path: &Path, content: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await?;
    }

    let temp_path = path.with_extension("tmp");
    fs::write(&temp_path, content).await?;

    // Atomic on the same filesystem
    fs::rename(&temp_path, path).await
}
