//! Profile persistence
//!
//! Features:
//! - One trait for every backend, synchronous and whole-record
//! - JSON files with atomic replace and backup rotation (native)
//! - LocalStorage (wasm32)
//! - In-memory store for tests and headless hosts

mod file;
#[cfg(target_arch = "wasm32")]
mod local_storage;

pub use file::JsonFileStore;
#[cfg(target_arch = "wasm32")]
pub use local_storage::LocalStorageStore;

use crate::error::{Error, Result};
use crate::leaderboard::LeaderboardEntry;
use crate::progression::SessionRecord;
use crate::settings::Settings;

/// Durable storage for one profile
///
/// Every save replaces the whole stored value; a failed save must leave the
/// previously stored value intact.
pub trait ProfileStore {
    fn load(&self) -> Result<Option<SessionRecord>>;
    fn save(&mut self, record: &SessionRecord) -> Result<()>;
    fn load_leaderboard(&self) -> Result<Vec<LeaderboardEntry>>;
    fn save_leaderboard(&mut self, entries: &[LeaderboardEntry]) -> Result<()>;
    fn load_settings(&self) -> Result<Option<Settings>>;
    fn save_settings(&mut self, settings: &Settings) -> Result<()>;
}

/// Store keeping serialized JSON in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    record: Option<String>,
    leaderboard: Option<String>,
    settings: Option<String>,
    unavailable: bool,
    saves: u32,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate a broken backend: every read and write fails
    pub fn set_unavailable(&mut self, unavailable: bool) {
        self.unavailable = unavailable;
    }

    /// Successful writes so far
    pub fn save_count(&self) -> u32 {
        self.saves
    }

    fn check(&self) -> Result<()> {
        if self.unavailable {
            return Err(Error::PersistenceUnavailable(
                "memory store marked unavailable".to_string(),
            ));
        }
        Ok(())
    }

    fn read<T: serde::de::DeserializeOwned>(&self, slot: &Option<String>) -> Result<Option<T>> {
        self.check()?;
        slot.as_deref()
            .map(serde_json::from_str)
            .transpose()
            .map_err(Error::from)
    }

    fn write<T: serde::Serialize + ?Sized>(
        unavailable: bool,
        slot: &mut Option<String>,
        value: &T,
    ) -> Result<()> {
        if unavailable {
            return Err(Error::PersistenceUnavailable(
                "memory store marked unavailable".to_string(),
            ));
        }
        *slot = Some(serde_json::to_string(value)?);
        Ok(())
    }
}

impl ProfileStore for MemoryStore {
    fn load(&self) -> Result<Option<SessionRecord>> {
        self.read(&self.record)
    }

    fn save(&mut self, record: &SessionRecord) -> Result<()> {
        Self::write(self.unavailable, &mut self.record, record)?;
        self.saves += 1;
        Ok(())
    }

    fn load_leaderboard(&self) -> Result<Vec<LeaderboardEntry>> {
        Ok(self.read(&self.leaderboard)?.unwrap_or_default())
    }

    fn save_leaderboard(&mut self, entries: &[LeaderboardEntry]) -> Result<()> {
        Self::write(self.unavailable, &mut self.leaderboard, entries)?;
        self.saves += 1;
        Ok(())
    }

    fn load_settings(&self) -> Result<Option<Settings>> {
        self.read(&self.settings)
    }

    fn save_settings(&mut self, settings: &Settings) -> Result<()> {
        Self::write(self.unavailable, &mut self.settings, settings)?;
        self.saves += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_round_trip() {
        let mut store = MemoryStore::new();
        assert!(store.load().unwrap().is_none());
        assert!(store.load_leaderboard().unwrap().is_empty());

        let record = SessionRecord {
            best_score: 420,
            ..Default::default()
        };
        store.save(&record).unwrap();
        assert_eq!(store.load().unwrap(), Some(record));
        assert_eq!(store.save_count(), 1);
    }

    #[test]
    fn test_unavailable_store_keeps_previous_value() {
        let mut store = MemoryStore::new();
        let first = SessionRecord {
            currency: 10,
            ..Default::default()
        };
        store.save(&first).unwrap();

        store.set_unavailable(true);
        let second = SessionRecord {
            currency: 99,
            ..Default::default()
        };
        assert!(matches!(
            store.save(&second),
            Err(Error::PersistenceUnavailable(_))
        ));
        assert!(store.load().is_err());

        store.set_unavailable(false);
        assert_eq!(store.load().unwrap(), Some(first));
    }
}
