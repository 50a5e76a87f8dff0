#![cfg(feature = "std")]

//! Where save records live.

use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::anyhow;

/// Storage for a single save record. Writes replace the previous record
/// as a whole; a reader never observes a partially written one.
#[async_trait::async_trait]
pub trait SaveStore: Send + Sync {
    async fn save(&mut self, bytes: &[u8]) -> anyhow::Result<()>;
    /// `Ok(None)` when nothing has been saved yet.
    async fn load(&mut self) -> anyhow::Result<Option<Vec<u8>>>;
    async fn clear(&mut self) -> anyhow::Result<()>;
}

/// Save file on disk.
///
/// Records are written to a sibling `.tmp` file first and then renamed
/// over the target, so the target always holds a complete record.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = OsString::from(self.path.as_os_str());
        name.push(".tmp");
        PathBuf::from(name)
    }
}

#[async_trait::async_trait]
impl SaveStore for FileStore {
    async fn save(&mut self, bytes: &[u8]) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let tmp = self.temp_path();
        tokio::fs::write(&tmp, bytes).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        log::debug!("saved game to {}", self.path.display());
        Ok(())
    }

    async fn load(&mut self) -> anyhow::Result<Option<Vec<u8>>> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn clear(&mut self) -> anyhow::Result<()> {
        match tokio::fs::remove_file(&self.path).await {
            Err(e) if e.kind() != ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }
}

/// In-memory store. Clones share the same slot, so a test can keep a handle
/// to inspect what a session saved.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slot: Arc<Mutex<Option<Vec<u8>>>>,
    fail_saves: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with `bytes`.
    pub fn with_contents(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Some(bytes.into()))),
            fail_saves: false,
        }
    }

    /// Store whose saves always fail.
    pub fn failing() -> Self {
        Self {
            fail_saves: true,
            ..Self::default()
        }
    }

    /// Current contents of the slot.
    pub fn contents(&self) -> Option<Vec<u8>> {
        self.slot.lock().ok().and_then(|slot| slot.clone())
    }
}

#[async_trait::async_trait]
impl SaveStore for MemoryStore {
    async fn save(&mut self, bytes: &[u8]) -> anyhow::Result<()> {
        if self.fail_saves {
            return Err(anyhow!("memory store rejects writes"));
        }
        let mut slot = self.slot.lock().map_err(|_| anyhow!("memory store poisoned"))?;
        *slot = Some(bytes.to_vec());
        Ok(())
    }

    async fn load(&mut self) -> anyhow::Result<Option<Vec<u8>>> {
        let slot = self.slot.lock().map_err(|_| anyhow!("memory store poisoned"))?;
        Ok(slot.clone())
    }

    async fn clear(&mut self) -> anyhow::Result<()> {
        let mut slot = self.slot.lock().map_err(|_| anyhow!("memory store poisoned"))?;
        *slot = None;
        Ok(())
    }
}
