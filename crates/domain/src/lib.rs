#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

pub mod catalog;
pub mod error;
pub mod measurement;
pub mod plan;
pub mod profile;
pub mod progress;
pub mod service;
pub mod statistics;
pub mod tracker;

pub use catalog::{Day, Exercise, Level, Program, Video, Week};
pub use error::{ImportError, ReadError, StorageError, WriteError};
pub use measurement::{Delta, MeasurementField, MeasurementRecord};
pub use plan::PlanDay;
pub use profile::{Mode, Profile, QuerySeed};
pub use progress::{
    DayKey, Goal, HistoryKey, KeyError, ProgramState, ProgressEntry, ProgressKey, RIR, RIRError,
    SetEntry, SetField, WeekKey, WorkoutSession, default_goals,
};
pub use service::{
    HistoryRepository, ProgramStateRepository, RestTimerRepository, Service,
    TrackerRepository,
};
pub use statistics::{DayProgress, DayStats};
pub use tracker::Tracker;

pub const DEFAULT_DAYS: u32 = 30;
pub const MAX_DAYS: u32 = 60;

/// Parses user-entered decimal text, accepting a decimal comma.
#[must_use]
pub fn decimal(value: &str) -> Option<f32> {
    value
        .trim()
        .replace(',', ".")
        .parse::<f32>()
        .ok()
        .filter(|v| v.is_finite())
}
