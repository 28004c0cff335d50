//! Byte sources for load strategies.

use std::path::{Path, PathBuf};

use tessera_core::alloc::HashMap;

use crate::error::{AssetError, AssetResult};

/// Reads files relative to a base directory.
#[derive(Debug, Clone)]
pub struct FileReader {
    base_path: PathBuf,
}

impl Default for FileReader {
    fn default() -> Self {
        Self::new(".")
    }
}

impl FileReader {
    pub fn new(base_path: impl AsRef<Path>) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Resolve a path relative to the base path. Absolute paths are kept.
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_path.join(path)
        }
    }

    pub fn read_bytes(&self, path: &Path) -> AssetResult<Vec<u8>> {
        let full_path = self.resolve_path(path);
        std::fs::read(&full_path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                AssetError::NotFound {
                    path: full_path.display().to_string(),
                }
            } else {
                AssetError::IoError {
                    path: full_path.clone(),
                    source: e,
                }
            }
        })
    }

    pub fn exists(&self, path: &Path) -> bool {
        self.resolve_path(path).exists()
    }
}

/// Byte blocks staged in memory, keyed by asset id.
#[derive(Debug, Default)]
pub struct MemoryReader {
    blocks: HashMap<String, Vec<u8>>,
}

impl MemoryReader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage `bytes` under `key`, replacing any previous block.
    pub fn insert(&mut self, key: impl Into<String>, bytes: Vec<u8>) {
        self.blocks.insert(key.into(), bytes);
    }

    pub fn insert_static(&mut self, key: impl Into<String>, bytes: &'static [u8]) {
        self.blocks.insert(key.into(), bytes.to_vec());
    }

    pub fn remove(&mut self, key: &str) -> Option<Vec<u8>> {
        self.blocks.remove(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.blocks.contains_key(key)
    }

    pub fn read_bytes(&self, key: &str) -> AssetResult<&[u8]> {
        self.blocks
            .get(key)
            .map(Vec::as_slice)
            .ok_or_else(|| AssetError::NotFound {
                path: key.to_string(),
            })
    }
}
