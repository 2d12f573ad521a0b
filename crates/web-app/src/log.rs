use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};

use chrono::Local;
use log::{Level, LevelFilter, Metadata, Record, SetLoggerError};
use serde::{Deserialize, Serialize};

/// Number of entries kept in the persistent log.
pub const CAPACITY: usize = 100;

/// Least severe level written to the persistent log. Console output includes debug messages.
const PERSISTED_LEVEL: Level = Level::Info;

pub static LOG: Mutex<Option<Arc<Mutex<dyn Repository>>>> = Mutex::new(None);

/// Persistent log, newest entry first.
#[allow(clippy::missing_errors_doc)]
pub trait Repository: Send + Sync + 'static {
    fn read_entries(&self) -> Result<VecDeque<Entry>, Error>;
    fn write_entry(&self, entry: Entry) -> Result<(), Error>;
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("{0}")]
    Unknown(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub time: String,
    #[serde(with = "LevelDef")]
    pub level: Level,
    pub message: String,
}

#[derive(Serialize, Deserialize)]
#[serde(remote = "Level")]
pub enum LevelDef {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

static LOGGER: Logger = Logger;

/// # Errors
///
/// Returns an error if the logger has already been initialized.
pub fn init(storage: Arc<Mutex<dyn Repository>>) -> Result<(), SetLoggerError> {
    if let Ok(mut log) = LOG.lock() {
        *log = Some(storage);
    }
    log::set_logger(&LOGGER).map(|()| log::set_max_level(LevelFilter::Debug))
}

struct Logger;

impl log::Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= Level::Debug
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let message = record.args().to_string();
        match record.level() {
            Level::Error => gloo_console::error!(message.clone()),
            Level::Warn => gloo_console::warn!(message.clone()),
            Level::Info => gloo_console::info!(message.clone()),
            Level::Debug | Level::Trace => gloo_console::debug!(message.clone()),
        }

        if record.level() > PERSISTED_LEVEL {
            return;
        }
        let Ok(log) = LOG.lock() else {
            return;
        };
        if let Some(repository) = log.as_ref() {
            if let Ok(repository) = repository.lock() {
                let _ = repository.write_entry(Entry {
                    time: Local::now().format("%b %d %H:%M:%S").to_string(),
                    level: record.level(),
                    message,
                });
            }
        }
    }

    fn flush(&self) {}
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_entry_serialization() {
        let entry = Entry {
            time: String::from("Sep 01 18:30:00"),
            level: Level::Warn,
            message: String::from("failed to import tracker: file is not valid JSON"),
        };
        let json = serde_json::to_string(&entry).unwrap();
        assert_eq!(
            json,
            r#"{"time":"Sep 01 18:30:00","level":"Warn","message":"failed to import tracker: file is not valid JSON"}"#
        );
        assert_eq!(serde_json::from_str::<Entry>(&json).unwrap(), entry);
    }

    #[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
    mod wasm {
        use std::collections::VecDeque;

        use wasm_bindgen_test::wasm_bindgen_test;

        use pretty_assertions::assert_eq;

        use super::*;

        struct Shared(Arc<Mutex<VecDeque<Entry>>>);

        impl Repository for Shared {
            fn read_entries(&self) -> Result<VecDeque<Entry>, Error> {
                self.0
                    .lock()
                    .map(|entries| entries.clone())
                    .map_err(|err| Error::Unknown(err.to_string()))
            }

            fn write_entry(&self, entry: Entry) -> Result<(), Error> {
                let mut entries = self
                    .0
                    .lock()
                    .map_err(|err| Error::Unknown(err.to_string()))?;
                entries.push_front(entry);
                entries.truncate(CAPACITY);
                Ok(())
            }
        }

        #[wasm_bindgen_test]
        fn test_logger_persists_info_and_above() {
            let entries = Arc::new(Mutex::new(VecDeque::new()));
            init(Arc::new(Mutex::new(Shared(entries.clone())))).unwrap();

            ::log::debug!("no stored video link");
            ::log::info!("imported tracker");
            ::log::error!("failed to write tracker: quota exceeded");

            let messages = entries
                .lock()
                .unwrap()
                .iter()
                .map(|e| (e.level, e.message.clone()))
                .collect::<Vec<_>>();
            assert_eq!(
                messages,
                vec![
                    (
                        Level::Error,
                        String::from("failed to write tracker: quota exceeded")
                    ),
                    (Level::Info, String::from("imported tracker")),
                ]
            );
        }
    }
}
