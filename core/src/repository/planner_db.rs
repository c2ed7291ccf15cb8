use tracing::{info, warn};

use crate::config::{current_storage_key, storage_key_for, PlannerConfig};
use crate::error::StorageError;
use crate::model::database::{PlannerDatabase, CURRENT_VERSION};
use crate::repository::traits::KeyValueStore;

/// Where the database handed out by [`PlannerRepository::load`] came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadSource {
    Current,
    Migrated { from_key: String, from_version: u32 },
    Empty,
}

/// Loads and saves the whole planner database as one JSON blob.
pub struct PlannerRepository<S: KeyValueStore> {
    store: S,
    key: String,
    legacy_keys: Vec<(u32, String)>,
}

impl<S: KeyValueStore> PlannerRepository<S> {
    /// Uses the current versioned key and migrates from older ones.
    pub fn new(store: S) -> Self {
        let legacy_keys = (1..CURRENT_VERSION)
            .rev()
            .map(|v| (v, storage_key_for(v)))
            .collect();
        Self {
            store,
            key: current_storage_key(),
            legacy_keys,
        }
    }

    /// Uses the configured key. Legacy keys are only probed for the default one.
    pub fn from_config(store: S, config: &PlannerConfig) -> Self {
        if config.storage_key == current_storage_key() {
            Self::new(store)
        } else {
            Self::with_key(store, config.storage_key.clone())
        }
    }

    /// Uses `key` as is, with no legacy probing.
    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
            legacy_keys: Vec::new(),
        }
    }

    pub fn storage_key(&self) -> &str {
        &self.key
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Never fails: missing, unreadable or malformed data gives an empty database.
    pub fn load(&self) -> PlannerDatabase {
        self.load_with_source().0
    }

    pub fn load_with_source(&self) -> (PlannerDatabase, LoadSource) {
        match self.read(&self.key) {
            Ok(Some(raw)) => {
                return match PlannerDatabase::decode(&raw) {
                    Some(mut db) => {
                        db.version = CURRENT_VERSION;
                        info!(key = %self.key, days = db.days.len(), "loaded planner database");
                        (db, LoadSource::Current)
                    }
                    None => {
                        warn!(
                            key = %self.key,
                            "stored planner database is corrupt, starting empty"
                        );
                        (PlannerDatabase::empty(), LoadSource::Empty)
                    }
                };
            }
            Ok(None) => {}
            Err(err) => {
                // The current blob exists but can't be read: never cover it with legacy data.
                warn!(
                    key = %self.key,
                    error = %err,
                    "could not read planner storage, starting empty"
                );
                return (PlannerDatabase::empty(), LoadSource::Empty);
            }
        }

        for (version, legacy_key) in &self.legacy_keys {
            let raw = match self.read(legacy_key) {
                Ok(Some(raw)) => raw,
                Ok(None) => continue,
                Err(err) => {
                    warn!(
                        key = %legacy_key,
                        error = %err,
                        "skipping unreadable legacy planner database"
                    );
                    continue;
                }
            };
            let Some(mut db) = PlannerDatabase::decode(&raw) else {
                warn!(key = %legacy_key, "skipping undecodable legacy planner database");
                continue;
            };
            db.version = CURRENT_VERSION;
            info!(
                from = %legacy_key,
                to = %self.key,
                days = db.days.len(),
                "migrated planner database"
            );
            if let Err(err) = self.save(&db) {
                warn!(error = %err, "could not write migrated planner database");
            }
            let source = LoadSource::Migrated {
                from_key: legacy_key.clone(),
                from_version: *version,
            };
            return (db, source);
        }

        info!(key = %self.key, "no stored planner database, starting empty");
        (PlannerDatabase::empty(), LoadSource::Empty)
    }

    /// Overwrites the stored blob with a full snapshot.
    pub fn save(&self, db: &PlannerDatabase) -> Result<(), StorageError> {
        let raw = serde_json::to_string(db)?;
        self.store.set(&self.key, &raw)
    }

    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.store.get(key)
    }
}
