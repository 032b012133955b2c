// ABOUTME: Durable session storage for the in-progress quote
// One JSON document holding QuoteState verbatim; read at start, rewritten after every change

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::models::QuoteState;

/// Where the quote snapshot lives between runs
pub trait SessionStorage: Send {
    /// Read the saved snapshot, if any
    fn load(&self) -> Result<Option<QuoteState>>;

    /// Replace the saved snapshot
    fn save(&mut self, state: &QuoteState) -> Result<()>;

    /// Forget the saved snapshot
    fn clear(&mut self) -> Result<()>;
}

/// JSON file on disk, by default `~/.shieldquote/session.json`
#[derive(Debug, Clone)]
pub struct FileSessionStorage {
    path: PathBuf,
}

impl FileSessionStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Get the default session file path
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().context("Could not determine home directory")?;
        Ok(home.join(".shieldquote").join("session.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStorage for FileSessionStorage {
    fn load(&self) -> Result<Option<QuoteState>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read session from {}", self.path.display()))?;

        let state = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse session from {}", self.path.display()))?;

        Ok(Some(state))
    }

    fn save(&mut self, state: &QuoteState) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create session directory: {}", parent.display())
            })?;
        }

        let content =
            serde_json::to_string_pretty(state).context("Failed to serialize quote session")?;

        fs::write(&self.path, content)
            .with_context(|| format!("Failed to write session to {}", self.path.display()))?;

        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)
                .with_context(|| format!("Failed to remove {}", self.path.display()))?;
        }
        Ok(())
    }
}

/// In-process storage. Clones share the same slot, so a test can keep a
/// handle and inspect what the store wrote.
#[derive(Debug, Clone, Default)]
pub struct MemorySessionStorage {
    slot: Arc<Mutex<Option<String>>>,
}

impl MemorySessionStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-seeded with a snapshot
    pub fn with_snapshot(state: &QuoteState) -> Result<Self> {
        let mut storage = Self::new();
        storage.save(state)?;
        Ok(storage)
    }

    /// Raw serialized snapshot, if one is saved
    pub fn raw(&self) -> Option<String> {
        self.slot.lock().ok().and_then(|slot| slot.clone())
    }
}

impl SessionStorage for MemorySessionStorage {
    fn load(&self) -> Result<Option<QuoteState>> {
        let slot = self
            .slot
            .lock()
            .map_err(|_| anyhow::anyhow!("session storage lock poisoned"))?;
        slot.as_deref()
            .map(|raw| serde_json::from_str(raw).context("Failed to parse stored session"))
            .transpose()
    }

    fn save(&mut self, state: &QuoteState) -> Result<()> {
        let raw = serde_json::to_string(state).context("Failed to serialize quote session")?;
        let mut slot = self
            .slot
            .lock()
            .map_err(|_| anyhow::anyhow!("session storage lock poisoned"))?;
        *slot = Some(raw);
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        let mut slot = self
            .slot
            .lock()
            .map_err(|_| anyhow::anyhow!("session storage lock poisoned"))?;
        *slot = None;
        Ok(())
    }
}
