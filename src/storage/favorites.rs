use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::warn;

use crate::constants::store_keys::{FAVORITE_COMPETITIONS, FAVORITE_TEAMS};
use crate::error::AppError;

use super::KeyValueStore;

/// Favorite teams and competitions, stored as id strings.
#[derive(Clone)]
pub struct FavoritesStore {
    store: Arc<dyn KeyValueStore>,
}

fn parse_ids(key: &str, raw: BTreeSet<String>) -> BTreeSet<i64> {
    raw.into_iter()
        .filter_map(|value| match value.trim().parse::<i64>() {
            Ok(id) => Some(id),
            Err(_) => {
                warn!("Ignoring non-numeric id {value:?} under {key}");
                None
            }
        })
        .collect()
}

impl FavoritesStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Stored favorite team ids; entries that are not integers are skipped.
    pub fn team_ids(&self) -> Result<BTreeSet<i64>, AppError> {
        Ok(parse_ids(FAVORITE_TEAMS, self.store.get_set(FAVORITE_TEAMS)?))
    }

    pub fn contains(&self, team_id: i64) -> Result<bool, AppError> {
        Ok(self.team_ids()?.contains(&team_id))
    }

    /// Returns `true` if the team was not a favorite before.
    pub fn add(&self, team_id: i64) -> Result<bool, AppError> {
        let mut raw = self.store.get_set(FAVORITE_TEAMS)?;
        let added = raw.insert(team_id.to_string());
        if added {
            self.store.put_set(FAVORITE_TEAMS, &raw)?;
        }
        Ok(added)
    }

    /// Returns `true` if the team was a favorite before.
    pub fn remove(&self, team_id: i64) -> Result<bool, AppError> {
        let mut raw = self.store.get_set(FAVORITE_TEAMS)?;
        let removed = raw.remove(&team_id.to_string());
        if removed {
            self.store.put_set(FAVORITE_TEAMS, &raw)?;
        }
        Ok(removed)
    }

    /// Flips the favorite state and returns the new one.
    pub fn toggle(&self, team_id: i64) -> Result<bool, AppError> {
        if self.remove(team_id)? {
            Ok(false)
        } else {
            self.add(team_id)?;
            Ok(true)
        }
    }

    pub fn competition_ids(&self) -> Result<BTreeSet<i64>, AppError> {
        Ok(parse_ids(
            FAVORITE_COMPETITIONS,
            self.store.get_set(FAVORITE_COMPETITIONS)?,
        ))
    }

    pub fn set_competition_ids(&self, ids: &BTreeSet<i64>) -> Result<(), AppError> {
        let raw: BTreeSet<String> = ids.iter().map(i64::to_string).collect();
        self.store.put_set(FAVORITE_COMPETITIONS, &raw)
    }
}
