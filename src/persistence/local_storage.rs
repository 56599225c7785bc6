//! Browser LocalStorage backend (wasm32 only)

use serde::Serialize;
use serde::de::DeserializeOwned;
use web_sys::Storage;

use super::ProfileStore;
use crate::error::{Error, Result};
use crate::leaderboard::LeaderboardEntry;
use crate::progression::SessionRecord;
use crate::settings::Settings;

const PROFILE_KEY: &str = "nebula_sprint_profile";
const LEADERBOARD_KEY: &str = "nebula_sprint_leaderboard";
const SETTINGS_KEY: &str = "nebula_sprint_settings";

#[derive(Debug, Clone, Default)]
pub struct LocalStorageStore;

impl LocalStorageStore {
    pub fn new() -> Self {
        Self
    }

    fn storage() -> Result<Storage> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or_else(|| Error::PersistenceUnavailable("LocalStorage not available".to_string()))
    }

    fn read<T: DeserializeOwned>(key: &str) -> Result<Option<T>> {
        let storage = Self::storage()?;
        let json = storage
            .get_item(key)
            .map_err(|e| Error::PersistenceUnavailable(format!("{e:?}")))?;
        match json {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    fn write<T: Serialize + ?Sized>(key: &str, value: &T) -> Result<()> {
        let storage = Self::storage()?;
        let json = serde_json::to_string(value)?;
        storage
            .set_item(key, &json)
            .map_err(|e| Error::PersistenceUnavailable(format!("{e:?}")))?;
        log::info!("Saved {} ({} bytes)", key, json.len());
        Ok(())
    }
}

impl ProfileStore for LocalStorageStore {
    fn load(&self) -> Result<Option<SessionRecord>> {
        Self::read(PROFILE_KEY)
    }

    fn save(&mut self, record: &SessionRecord) -> Result<()> {
        Self::write(PROFILE_KEY, record)
    }

    fn load_leaderboard(&self) -> Result<Vec<LeaderboardEntry>> {
        Ok(Self::read(LEADERBOARD_KEY)?.unwrap_or_default())
    }

    fn save_leaderboard(&mut self, entries: &[LeaderboardEntry]) -> Result<()> {
        Self::write(LEADERBOARD_KEY, entries)
    }

    fn load_settings(&self) -> Result<Option<Settings>> {
        Self::read(SETTINGS_KEY)
    }

    fn save_settings(&mut self, settings: &Settings) -> Result<()> {
        Self::write(SETTINGS_KEY, settings)
    }
}
