//! JSON file backend
//!
//! Writes go to `<name>.json.tmp` first, the current file is rotated to
//! `<name>.json.bak`, then the temp file is renamed into place. Loads fall
//! back to the backup when the main file is unreadable.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::ProfileStore;
use crate::error::Result;
use crate::leaderboard::LeaderboardEntry;
use crate::progression::SessionRecord;
use crate::settings::Settings;

const PROFILE_FILE: &str = "profile.json";
const LEADERBOARD_FILE: &str = "leaderboard.json";
const SETTINGS_FILE: &str = "settings.json";

#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Resolve the data directory
    ///
    /// `NEBULA_SPRINT_DATA_DIR` wins, then the platform data directory
    /// (`~/.local/share/nebula-sprint`, `~/Library/Application Support/...`,
    /// `%APPDATA%\...`), then the working directory.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_env() -> Self {
        if let Some(explicit) = std::env::var_os("NEBULA_SPRINT_DATA_DIR") {
            return Self::new(PathBuf::from(explicit));
        }
        Self::new(data_dir().unwrap_or_else(|| {
            log::warn!("No platform data directory, saving to the working directory");
            PathBuf::from(".")
        }))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }

    fn read_json<T: DeserializeOwned>(&self, name: &str) -> Result<Option<T>> {
        let path = self.path(name);
        match read_file(&path) {
            Ok(value) => Ok(value),
            Err(err) => {
                let backup = path.with_extension("json.bak");
                log::warn!("{} unreadable ({}), trying backup", path.display(), err);
                match read_file(&backup)? {
                    Some(value) => Ok(Some(value)),
                    None => Err(err),
                }
            }
        }
    }

    fn write_json<T: Serialize + ?Sized>(&self, name: &str, value: &T) -> Result<()> {
        fs::create_dir_all(&self.dir)?;

        let path = self.path(name);
        let tmp = path.with_extension("json.tmp");
        let text = serde_json::to_string_pretty(value)?;
        fs::write(&tmp, text)?;

        if path.exists() {
            fs::copy(&path, path.with_extension("json.bak"))?;
        }
        fs::rename(&tmp, &path)?;
        log::debug!("Saved {}", path.display());
        Ok(())
    }
}

/// Platform data directory for the game
#[cfg(not(target_arch = "wasm32"))]
pub fn data_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("io", "nebula-sprint", "nebula-sprint")
        .map(|dirs| dirs.data_dir().to_path_buf())
}

fn read_file<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    if !path.exists() {
        return Ok(None);
    }
    let bytes = fs::read(path)?;
    Ok(Some(serde_json::from_slice(&bytes)?))
}

impl ProfileStore for JsonFileStore {
    fn load(&self) -> Result<Option<SessionRecord>> {
        self.read_json(PROFILE_FILE)
    }

    fn save(&mut self, record: &SessionRecord) -> Result<()> {
        self.write_json(PROFILE_FILE, record)
    }

    fn load_leaderboard(&self) -> Result<Vec<LeaderboardEntry>> {
        Ok(self.read_json(LEADERBOARD_FILE)?.unwrap_or_default())
    }

    fn save_leaderboard(&mut self, entries: &[LeaderboardEntry]) -> Result<()> {
        self.write_json(LEADERBOARD_FILE, entries)
    }

    fn load_settings(&self) -> Result<Option<Settings>> {
        self.read_json(SETTINGS_FILE)
    }

    fn save_settings(&mut self, settings: &Settings) -> Result<()> {
        self.write_json(SETTINGS_FILE, settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_missing_files_load_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());
        assert!(store.load().unwrap().is_none());
        assert!(store.load_leaderboard().unwrap().is_empty());
        assert!(store.load_settings().unwrap().is_none());
    }

    #[test]
    fn test_save_creates_directory_and_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::new(dir.path().join("nested").join("profile"));
        let record = SessionRecord {
            best_score: 1234,
            currency: 55,
            ..Default::default()
        };
        store.save(&record).unwrap();
        assert_eq!(store.load().unwrap(), Some(record));
        assert!(!store.dir().join("profile.json.tmp").exists());
    }

    #[test]
    fn test_corrupt_file_falls_back_to_backup() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::new(dir.path());
        let first = SessionRecord {
            best_score: 1,
            ..Default::default()
        };
        let second = SessionRecord {
            best_score: 2,
            ..Default::default()
        };
        store.save(&first).unwrap();
        store.save(&second).unwrap();

        fs::write(dir.path().join(PROFILE_FILE), b"{ not json").unwrap();
        assert_eq!(store.load().unwrap(), Some(first));
    }

    #[test]
    fn test_from_env_prefers_explicit_dir() {
        let dir = tempfile::tempdir().unwrap();
        // SAFETY: no other test reads or writes this variable
        unsafe { std::env::set_var("NEBULA_SPRINT_DATA_DIR", dir.path()) };
        let store = JsonFileStore::from_env();
        unsafe { std::env::remove_var("NEBULA_SPRINT_DATA_DIR") };
        assert_eq!(store.dir(), dir.path());
    }

    #[test]
    fn test_platform_data_dir_is_per_game() {
        if let Some(dir) = data_dir() {
            assert!(dir.to_string_lossy().contains("nebula-sprint"));
        }
    }

    #[test]
    fn test_corrupt_file_without_backup_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());
        fs::write(dir.path().join(SETTINGS_FILE), b"garbage").unwrap();
        assert!(matches!(
            store.load_settings(),
            Err(Error::PersistenceUnavailable(_))
        ));
    }
}
