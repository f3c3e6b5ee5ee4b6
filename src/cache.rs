//! Keyed byte cache for entity state that outlives a process.
//!
//! Entities are stored as [`EntitySnapshot`]s, a hierarchy keyed on an
//! integer `kind` so the stored form does not depend on wire tag spelling.

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::debug;

use crate::codec;
use crate::types::{Chat, Message, User};

hierarchy! {
    /// A cached entity, tagged by integer kind.
    pub enum EntitySnapshot("entity snapshot", tag = "kind") {
        User(User) = 1,
        Chat(Chat) = 2,
        Message(Message) = 3,
    }
}

/// Keyed byte storage.
pub trait Cache: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;
    fn put(&self, key: &str, bytes: &[u8]) -> Result<()>;
    /// Remove every entry.
    fn clear(&self) -> Result<()>;
}

/// Encode `snapshot` and store it under `key`.
pub fn store_snapshot(cache: &dyn Cache, key: &str, snapshot: &EntitySnapshot) -> Result<()> {
    let bytes = codec::to_vec(snapshot)?;
    cache.put(key, &bytes)
}

/// Load and decode the snapshot under `key`, if any.
pub fn load_snapshot(cache: &dyn Cache, key: &str) -> Result<Option<EntitySnapshot>> {
    match cache.get(key)? {
        Some(bytes) => {
            let snapshot = codec::decode_slice(&bytes)
                .with_context(|| format!("Corrupt cache entry {key:?}"))?;
            Ok(Some(snapshot))
        }
        None => Ok(None),
    }
}

const ENTRY_EXTENSION: &str = "json";

/// One file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FileCache {
    dir: PathBuf,
}

impl FileCache {
    /// The directory is created on first `put`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.dir
            .join(format!("{}.{}", entry_file_stem(key), ENTRY_EXTENSION))
    }
}

/// Reversible file stem: ASCII alphanumerics and `-` are kept, every other
/// byte becomes `_xx` (lowercase hex).
fn entry_file_stem(key: &str) -> String {
    let mut stem = String::with_capacity(key.len());
    for byte in key.bytes() {
        if byte.is_ascii_alphanumeric() || byte == b'-' {
            stem.push(char::from(byte));
        } else {
            stem.push_str(&format!("_{byte:02x}"));
        }
    }
    stem
}

impl Cache for FileCache {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let path = self.entry_path(key);
        match fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("Failed to read {}", path.display())),
        }
    }

    fn put(&self, key: &str, bytes: &[u8]) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create {}", self.dir.display()))?;
        let path = self.entry_path(key);
        fs::write(&path, bytes).with_context(|| format!("Failed to write {}", path.display()))
    }

    fn clear(&self) -> Result<()> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(()),
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to read {}", self.dir.display()));
            }
        };

        let mut removed = 0usize;
        for entry in entries {
            let path = entry?.path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == ENTRY_EXTENSION) {
                fs::remove_file(&path)
                    .with_context(|| format!("Failed to remove {}", path.display()))?;
                removed += 1;
            }
        }
        debug!(dir = %self.dir.display(), removed, "Cleared file cache");
        Ok(())
    }
}

/// In-process cache.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, Vec<u8>>>> {
        self.entries
            .lock()
            .map_err(|_| anyhow::anyhow!("memory cache lock poisoned"))
    }
}

impl Cache for MemoryCache {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn put(&self, key: &str, bytes: &[u8]) -> Result<()> {
        self.lock()?.insert(key.to_string(), bytes.to_vec());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        self.lock()?.clear();
        Ok(())
    }
}
