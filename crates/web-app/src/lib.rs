#![warn(clippy::pedantic)]
#![allow(clippy::too_many_lines)]

pub mod app;
pub mod browser;
pub mod format;
pub mod log;
pub mod timer;

pub use app::{App, Platform, Repository};
pub use browser::Browser;
