//! Durable storage for the card layout
//!
//! A tiny key-value store: each key is one JSON file in the data directory.

use super::LayoutError;
use crate::consts::dashboard_consts::storage::LAYOUT_STORAGE_KEY;
use crate::market::CoinRecord;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub trait LayoutStorage: Send + std::fmt::Debug {
    /// Returns the persisted cards, or `None` when nothing has been saved yet.
    fn load_cards(&self) -> Result<Option<Vec<CoinRecord>>, LayoutError>;

    /// Replaces the persisted cards. Must be durable when it returns `Ok`.
    fn save_cards(&mut self, cards: &[CoinRecord]) -> Result<(), LayoutError>;

    /// Forgets the persisted cards.
    fn clear(&mut self) -> Result<(), LayoutError>;
}

#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl LayoutStorage for FileStorage {
    fn load_cards(&self) -> Result<Option<Vec<CoinRecord>>, LayoutError> {
        let buf = match fs::read(self.key_path(LAYOUT_STORAGE_KEY)) {
            Ok(buf) => buf,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(LayoutError::Io(e)),
        };
        let cards = serde_json::from_slice(&buf).map_err(LayoutError::InvalidJson)?;
        Ok(Some(cards))
    }

    fn save_cards(&mut self, cards: &[CoinRecord]) -> Result<(), LayoutError> {
        let path = self.key_path(LAYOUT_STORAGE_KEY);
        let json = serde_json::to_string(cards)
            .map_err(|e| LayoutError::Storage(format!("Serialization failed: {}", e)))?;

        // Write-then-rename; readers never see a partial file.
        let tmp = path.with_extension("json.tmp");
        fs::create_dir_all(&self.dir)
            .and_then(|_| fs::write(&tmp, json))
            .and_then(|_| fs::rename(&tmp, &path))
            .map_err(|e| LayoutError::Storage(format!("{}: {}", path.display(), e)))
    }

    fn clear(&mut self) -> Result<(), LayoutError> {
        match fs::remove_file(self.key_path(LAYOUT_STORAGE_KEY)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(LayoutError::Storage(e.to_string())),
        }
    }
}

#[cfg(test)]
pub(crate) mod memory {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// In-memory storage whose contents outlive the store, to simulate reloads.
    #[derive(Debug, Clone, Default)]
    pub struct MemoryStorage {
        pub cards: Arc<Mutex<Option<Vec<CoinRecord>>>>,
        pub writes: Arc<Mutex<usize>>,
        pub fail_writes: bool,
    }

    impl LayoutStorage for MemoryStorage {
        fn load_cards(&self) -> Result<Option<Vec<CoinRecord>>, LayoutError> {
            Ok(self.cards.lock().unwrap().clone())
        }

        fn save_cards(&mut self, cards: &[CoinRecord]) -> Result<(), LayoutError> {
            if self.fail_writes {
                return Err(LayoutError::Storage("disk full".to_string()));
            }
            *self.cards.lock().unwrap() = Some(cards.to_vec());
            *self.writes.lock().unwrap() += 1;
            Ok(())
        }

        fn clear(&mut self) -> Result<(), LayoutError> {
            *self.cards.lock().unwrap() = None;
            Ok(())
        }
    }
}
