use chrono::{DateTime, Utc};
use r7_domain::{
    self as domain, DayKey, HistoryKey, ImportError, ReadError, SetEntry, WriteError,
};
use serde::{Serialize, de::DeserializeOwned};

use crate::{KeyValueStore, schema};

pub const KEY_TRACKER: &str = "r7_tracker_v4";
pub const KEY_PROGRAM_STATE: &str = "r7_programs_v2";

fn history_key(key: &HistoryKey) -> String {
    format!("r7:last:{key}")
}

fn video_key(key: &HistoryKey) -> String {
    format!("r7:video:{key}")
}

/// Repositories on top of a key-value store, using the JSON layout of [`schema`].
pub struct Persistence<S> {
    store: S,
}

impl<S: KeyValueStore> Persistence<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn read_raw(&self, key: &str) -> Result<String, ReadError> {
        self.store.get(key)?.ok_or(ReadError::NotFound)
    }

    fn read_json<T: DeserializeOwned>(&self, key: &str) -> Result<T, ReadError> {
        serde_json::from_str(&self.read_raw(key)?).map_err(|err| ReadError::Other(Box::new(err)))
    }

    fn write_json<T: Serialize>(&self, key: &str, value: &T) -> Result<(), WriteError> {
        let json = serde_json::to_string(value).map_err(|err| WriteError::Other(Box::new(err)))?;
        Ok(self.store.set(key, &json)?)
    }
}

impl<S: KeyValueStore> domain::TrackerRepository for Persistence<S> {
    fn read_tracker(&self) -> Result<domain::Tracker, ReadError> {
        Ok(self.read_json::<schema::Tracker>(KEY_TRACKER)?.into())
    }

    fn write_tracker(&self, tracker: &domain::Tracker) -> Result<(), WriteError> {
        self.write_json(KEY_TRACKER, &schema::Tracker::from(tracker))
    }

    fn export_tracker(&self, tracker: &domain::Tracker) -> Result<String, WriteError> {
        serde_json::to_string_pretty(&schema::Tracker::from(tracker))
            .map_err(|err| WriteError::Other(Box::new(err)))
    }

    fn import_tracker(&self, content: &str) -> Result<domain::Tracker, ImportError> {
        let value = serde_json::from_str::<serde_json::Value>(content)
            .map_err(|err| ImportError::InvalidJson(err.to_string()))?;
        if !value.is_object() {
            return Err(ImportError::NotAnObject);
        }
        serde_json::from_value::<schema::Tracker>(value)
            .map(domain::Tracker::from)
            .map_err(|err| ImportError::InvalidJson(err.to_string()))
    }
}

impl<S: KeyValueStore> domain::ProgramStateRepository for Persistence<S> {
    fn read_program_state(&self) -> Result<domain::ProgramState, ReadError> {
        Ok(self
            .read_json::<schema::ProgramState>(KEY_PROGRAM_STATE)?
            .into())
    }

    fn write_program_state(&self, state: &domain::ProgramState) -> Result<(), WriteError> {
        self.write_json(KEY_PROGRAM_STATE, &schema::ProgramState::from(state))
    }
}

impl<S: KeyValueStore> domain::HistoryRepository for Persistence<S> {
    fn read_history(&self, key: &HistoryKey) -> Result<Vec<SetEntry>, ReadError> {
        let sets = self.read_json::<Vec<schema::Set>>(&history_key(key))?;
        Ok(sets
            .into_iter()
            .map(|set| SetEntry {
                done: false,
                ..SetEntry::from(set)
            })
            .collect())
    }

    fn write_history(&self, key: &HistoryKey, sets: &[SetEntry]) -> Result<(), WriteError> {
        let sets = sets
            .iter()
            .map(|set| schema::Set {
                done: false,
                ..schema::Set::from(set)
            })
            .collect::<Vec<_>>();
        self.write_json(&history_key(key), &sets)
    }

    fn read_video(&self, key: &HistoryKey) -> Result<String, ReadError> {
        self.read_raw(&video_key(key))
    }

    fn write_video(&self, key: &HistoryKey, href: &str) -> Result<(), WriteError> {
        Ok(self.store.set(&video_key(key), href)?)
    }
}

impl<S: KeyValueStore> domain::RestTimerRepository for Persistence<S> {
    /// The end of a running countdown, stored as milliseconds since the epoch.
    fn read_rest_timer(&self, day: DayKey) -> Result<Option<DateTime<Utc>>, ReadError> {
        let raw = self.read_raw(&day.rest_timer_key())?;
        let millis = raw
            .trim()
            .parse::<f64>()
            .map_err(|err| ReadError::Other(Box::new(err)))?;
        #[allow(clippy::cast_possible_truncation)]
        let millis = millis as i64;
        if millis <= 0 {
            return Ok(None);
        }
        Ok(DateTime::from_timestamp_millis(millis))
    }

    fn write_rest_timer(&self, day: DayKey, end: Option<DateTime<Utc>>) -> Result<(), WriteError> {
        let millis = end.map_or(0, |end| end.timestamp_millis());
        Ok(self.store.set(&day.rest_timer_key(), &millis.to_string())?)
    }
}
