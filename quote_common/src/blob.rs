//! Persistent key/value blob storage.
//!
//! The quote store only needs plain string get/set on a handful of keys, so the
//! storage seam is the small `BlobStore` trait. Two implementations live here:
//!
//! - `MemoryBlobStore` — a map held in memory, handy for tests and dry runs.
//! - `FileBlobStore` — a JSON object file on disk, rewritten wholesale on every `set`.
//!
//! A missing key is never an error: `get` returns `Ok(None)`.
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::debug;

use crate::result::Result;

/// String key/value storage with get/set semantics.
pub trait BlobStore {
    /// Returns the value stored under `key`, or `None` if the key was never set.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Overwrites the value stored under `key`.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// In-memory blob store.
#[derive(Debug, Default, Clone)]
pub struct MemoryBlobStore {
    entries: BTreeMap<String, String>,
}

impl MemoryBlobStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl BlobStore for MemoryBlobStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Blob store backed by a single JSON object file.
///
/// The file maps keys to string values, e.g. `{"quotes": "[...]", "lastFilter": "all"}`.
/// Entries are cached in memory; every `set` writes the full map to a temporary
/// sibling file and renames it over the original.
#[derive(Debug)]
pub struct FileBlobStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileBlobStore {
    /// Opens the store at `path`. A missing file is treated as an empty store.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let entries = match fs::read(&path) {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => BTreeMap::new(),
            Ok(bytes) => serde_json::from_slice(&bytes)?,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("Blob store {} does not exist yet", path.display());
                BTreeMap::new()
            }
            Err(e) => return Err(e.into()),
        };
        Ok(Self { path, entries })
    }

    /// An empty store at `path` that ignores whatever the file currently holds.
    ///
    /// The file is overwritten on the first `set`.
    pub fn fresh(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            entries: BTreeMap::new(),
        }
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<()> {
        let data = serde_json::to_vec_pretty(&self.entries)?;
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);
        fs::write(&tmp, data)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl BlobStore for FileBlobStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        self.flush()
    }
}
