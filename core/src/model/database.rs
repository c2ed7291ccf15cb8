use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use super::record::DailyRecord;

pub const CURRENT_VERSION: u32 = 7;

/// Every stored day, keyed by `YYYY-MM-DD`.
///
/// Records sit behind `Arc` so a new database can share every untouched day
/// with the one it was derived from.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PlannerDatabase {
    pub version: u32,
    pub days: BTreeMap<String, Arc<DailyRecord>>,
}

impl Default for PlannerDatabase {
    fn default() -> Self {
        Self::empty()
    }
}

impl PlannerDatabase {
    pub fn empty() -> Self {
        Self {
            version: CURRENT_VERSION,
            days: BTreeMap::new(),
        }
    }

    pub fn get(&self, date_key: &str) -> Option<&Arc<DailyRecord>> {
        self.days.get(date_key)
    }

    /// The stored record, or a fresh empty one that is not inserted.
    pub fn day(&self, date_key: &str) -> Arc<DailyRecord> {
        self.days
            .get(date_key)
            .cloned()
            .unwrap_or_else(|| Arc::new(DailyRecord::empty(date_key)))
    }

    /// A new database with `record` stored under `date_key`.
    pub fn with_day(&self, date_key: &str, record: DailyRecord) -> Self {
        let mut days = self.days.clone();
        days.insert(date_key.to_string(), Arc::new(record));
        Self {
            version: self.version,
            days,
        }
    }

    /// Decodes a stored blob.
    ///
    /// Returns `None` when the blob is not JSON or has no `days` object. Days
    /// that fail to decode are dropped; the rest are kept.
    pub fn decode(raw: &str) -> Option<Self> {
        let value: Value = serde_json::from_str(raw).ok()?;
        let root = value.as_object()?;
        let days = root.get("days")?.as_object()?;
        let version = root
            .get("version")
            .and_then(Value::as_u64)
            .map(|v| v as u32)
            .unwrap_or(0);

        let mut decoded = BTreeMap::new();
        for (key, day) in days {
            match serde_json::from_value::<DailyRecord>(day.clone()) {
                Ok(mut record) => {
                    record.date_key = key.clone();
                    decoded.insert(key.clone(), Arc::new(record));
                }
                Err(err) => {
                    warn!(date_key = %key, error = %err, "dropping malformed day record");
                }
            }
        }

        Some(Self {
            version,
            days: decoded,
        })
    }
}
