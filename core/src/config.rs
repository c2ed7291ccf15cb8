use std::fs;
use std::path::PathBuf;

use anyhow::{anyhow, Result};

use crate::model::database::CURRENT_VERSION;

const DEFAULT_DIR_NAME: &str = ".planner";

/// Storage key for a given schema version, e.g. `planner_db_v7`.
pub fn storage_key_for(version: u32) -> String {
    format!("planner_db_v{}", version)
}

/// Key the current schema is stored under.
pub fn current_storage_key() -> String {
    storage_key_for(CURRENT_VERSION)
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlannerConfig {
    pub data_dir: PathBuf,
    pub storage_key: String,
}

impl PlannerConfig {
    pub fn new(base_dir: Option<PathBuf>) -> Result<Self> {
        let data_dir = match base_dir {
            Some(dir) => dir,
            None => {
                let home_dir = dirs::home_dir()
                    .ok_or_else(|| anyhow!("Could not determine home directory"))?;
                home_dir.join(DEFAULT_DIR_NAME)
            }
        };
        fs::create_dir_all(&data_dir)?;

        Ok(Self {
            data_dir,
            storage_key: current_storage_key(),
        })
    }

    pub fn blob_path(&self) -> PathBuf {
        self.data_dir.join(format!("{}.json", self.storage_key))
    }
}
