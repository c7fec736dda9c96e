use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, info};

use crate::config::paths::get_store_path;
use crate::error::AppError;

use super::KeyValueStore;

type Sets = BTreeMap<String, BTreeSet<String>>;

/// TOML-file-backed store: one array of strings per key.
///
/// The whole file is rewritten on every `put_set`.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    sets: Mutex<Sets>,
}

impl FileStore {
    /// Opens the store at `path`; a missing file starts empty.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let path = path.as_ref().to_path_buf();
        let sets = if path.exists() {
            let content = fs::read_to_string(&path)?;
            let sets: Sets = toml::from_str(&content)?;
            debug!("Loaded {} keys from {}", sets.len(), path.display());
            sets
        } else {
            Sets::new()
        };
        Ok(Self {
            path,
            sets: Mutex::new(sets),
        })
    }

    /// Opens the store at its platform default location.
    pub fn open_default() -> Result<Self, AppError> {
        Self::open(get_store_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, sets: &Sets) -> Result<(), AppError> {
        if let Some(dir) = self.path.parent()
            && !dir.as_os_str().is_empty()
            && !dir.exists()
        {
            fs::create_dir_all(dir)?;
        }
        fs::write(&self.path, toml::to_string_pretty(sets)?)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get_set(&self, key: &str) -> Result<BTreeSet<String>, AppError> {
        let sets = self.sets.lock().unwrap_or_else(|e| e.into_inner());
        Ok(sets.get(key).cloned().unwrap_or_default())
    }

    fn put_set(&self, key: &str, values: &BTreeSet<String>) -> Result<(), AppError> {
        let mut sets = self.sets.lock().unwrap_or_else(|e| e.into_inner());
        // Memory only changes once the file has been written.
        let mut next = sets.clone();
        next.insert(key.to_string(), values.clone());
        self.persist(&next)?;
        *sets = next;
        info!("Stored {} values under {key}", values.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_round_trip_through_disk() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("store.toml");

        let store = FileStore::open(&path).unwrap();
        assert!(store.get_set("favorite_teams").unwrap().is_empty());
        store
            .put_set(
                "favorite_teams",
                &BTreeSet::from(["42".to_string(), "541".to_string()]),
            )
            .unwrap();

        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(
            reopened.get_set("favorite_teams").unwrap(),
            BTreeSet::from(["42".to_string(), "541".to_string()])
        );
        assert_eq!(reopened.path(), path.as_path());
    }

    #[test]
    fn test_failed_write_keeps_previous_value() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "not a directory").unwrap();

        let store = FileStore::open(blocker.join("store.toml")).unwrap();
        let result = store.put_set("favorite_teams", &BTreeSet::from(["42".to_string()]));

        assert!(result.is_err());
        assert!(store.get_set("favorite_teams").unwrap().is_empty());
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("store.toml");
        fs::write(&path, "favorite_teams = 12 = 3").unwrap();
        assert!(matches!(
            FileStore::open(&path),
            Err(AppError::TomlDeserialize(_))
        ));
    }

    #[test]
    fn test_hand_written_file_is_readable() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("store.toml");
        fs::write(&path, "favorite_competitions = [\"2\", \"39\"]\n").unwrap();
        let store = FileStore::open(&path).unwrap();
        assert_eq!(store.get_set("favorite_competitions").unwrap().len(), 2);
    }
}
