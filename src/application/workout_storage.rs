// Persistence adapter - Serializes the workout list under a single key
use crate::application::key_value_store::{KeyValueStore, StorageError};
use crate::domain::workout::{CompactRecord, Workout};
use std::sync::Arc;

#[derive(Clone)]
pub struct WorkoutStorage {
    store: Arc<dyn KeyValueStore>,
    key: String,
}

impl WorkoutStorage {
    pub fn new(store: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// Overwrite the stored list with the compact form of every workout
    pub fn save(&self, workouts: &[Workout]) -> Result<(), StorageError> {
        let records: Vec<CompactRecord> = workouts.iter().map(Workout::to_compact).collect();
        let json = serde_json::to_string(&records).map_err(StorageError::Encode)?;
        self.store.set(&self.key, &json)?;

        tracing::debug!("Saved {} workouts under '{}'", records.len(), self.key);
        Ok(())
    }

    /// Stored records in insertion order; empty when nothing was saved yet
    pub fn load(&self) -> Result<Vec<CompactRecord>, StorageError> {
        let Some(raw) = self.store.get(&self.key)? else {
            return Ok(Vec::new());
        };

        // A stored literal `null` counts as absent
        let records: Option<Vec<CompactRecord>> =
            serde_json::from_str(&raw).map_err(StorageError::Corrupt)?;
        Ok(records.unwrap_or_default())
    }

    pub fn clear(&self) -> Result<(), StorageError> {
        self.store.remove(&self.key)
    }

    /// Copy the current raw value aside so a later save cannot overwrite it.
    ///
    /// Backups go to `<key>.corrupt`, then `<key>.corrupt.1`, `<key>.corrupt.2`
    /// and so on; earlier backups are never replaced.
    pub fn quarantine(&self) -> Result<(), StorageError> {
        let Some(raw) = self.store.get(&self.key)? else {
            return Ok(());
        };

        for slot in 0.. {
            let backup_key = self.backup_key(slot);
            match self.store.get(&backup_key)? {
                Some(existing) if existing == raw => {
                    tracing::debug!("Unreadable workouts already kept in '{}'", backup_key);
                    return Ok(());
                }
                Some(_) => continue,
                None => {
                    self.store.set(&backup_key, &raw)?;
                    tracing::warn!(
                        "Copied unreadable workouts from '{}' to '{}'",
                        self.key,
                        backup_key
                    );
                    return Ok(());
                }
            }
        }
        Ok(())
    }

    fn backup_key(&self, slot: u32) -> String {
        match slot {
            0 => format!("{}.corrupt", self.key),
            n => format!("{}.corrupt.{}", self.key, n),
        }
    }
}
