#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

use std::{
    cell::RefCell,
    rc::Rc,
    sync::{Arc, Mutex},
};

use r7_domain::StorageError;
use r7_web_app::{App, Browser, browser};

#[allow(clippy::module_name_repetitions)]
pub mod local_storage;
pub mod memory;
pub mod persistence;
pub mod schema;

pub use local_storage::LocalStorage;
pub use memory::MemoryStorage;
pub use persistence::Persistence;

/// String-keyed store of raw string values.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }
}

pub type Page = Rc<RefCell<App<Persistence<LocalStorage>, Browser>>>;

/// Installs the persistent logger, loads the tracker page state from local storage and
/// writes it back whenever the page is hidden.
#[must_use]
pub fn open() -> Page {
    let _ = r7_web_app::log::init(Arc::new(Mutex::new(local_storage::Log)));
    let app = Rc::new(RefCell::new(App::new(
        Persistence::new(LocalStorage),
        Browser,
        &browser::query_seed(),
    )));
    if let Err(err) = browser::flush_on_hide(&app) {
        log::warn!("{err}");
    }
    app
}
