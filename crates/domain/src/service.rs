use chrono::{DateTime, NaiveDate, Utc};
use log::{debug, error, trace, warn};

use crate::{
    DayKey, HistoryKey, ImportError, ProgramState, ReadError, SetEntry, Tracker, WriteError,
};

pub trait TrackerRepository {
    fn read_tracker(&self) -> Result<Tracker, ReadError>;
    fn write_tracker(&self, tracker: &Tracker) -> Result<(), WriteError>;
    fn export_tracker(&self, tracker: &Tracker) -> Result<String, WriteError>;
    fn import_tracker(&self, content: &str) -> Result<Tracker, ImportError>;
}

pub trait ProgramStateRepository {
    fn read_program_state(&self) -> Result<ProgramState, ReadError>;
    fn write_program_state(&self, state: &ProgramState) -> Result<(), WriteError>;
}

/// Sets and video links remembered per exercise name.
pub trait HistoryRepository {
    fn read_history(&self, key: &HistoryKey) -> Result<Vec<SetEntry>, ReadError>;
    fn write_history(&self, key: &HistoryKey, sets: &[SetEntry]) -> Result<(), WriteError>;
    fn read_video(&self, key: &HistoryKey) -> Result<String, ReadError>;
    fn write_video(&self, key: &HistoryKey, href: &str) -> Result<(), WriteError>;
}

pub trait RestTimerRepository {
    fn read_rest_timer(&self, day: DayKey) -> Result<Option<DateTime<Utc>>, ReadError>;
    fn write_rest_timer(&self, day: DayKey, end: Option<DateTime<Utc>>) -> Result<(), WriteError>;
}

pub struct Service<R> {
    repository: R,
}

impl<R> Service<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

macro_rules! log_on_error {
    ($func: expr, $error: ident, $action: literal, $entity: expr) => {{
        let result = $func;
        match result {
            Ok(_) => {}
            Err(ref err) => match err {
                $error::Storage(crate::StorageError::Unavailable) => {
                    debug!("failed to {} {}: {err}", $action, $entity);
                }
                _ => {
                    error!("failed to {} {}: {err}", $action, $entity);
                }
            },
        }
        result
    }};
}

/// Value of a read, or `None` if nothing is stored or the stored value is unusable.
fn found<T>(result: Result<T, ReadError>, entity: &str) -> Option<T> {
    match result {
        Err(ReadError::NotFound) => {
            trace!("no stored {entity}");
            None
        }
        result => log_on_error!(result, ReadError, "read", entity).ok(),
    }
}

impl<R: TrackerRepository> Service<R> {
    pub fn get_tracker(&self, today: NaiveDate) -> Tracker {
        match found(self.repository.read_tracker(), "tracker") {
            Some(mut tracker) => {
                tracker.repair(today);
                tracker
            }
            None => Tracker::new(today),
        }
    }

    pub fn store_tracker(&self, tracker: &Tracker) {
        let _ = log_on_error!(
            self.repository.write_tracker(tracker),
            WriteError,
            "write",
            "tracker"
        );
    }

    pub fn export_tracker(&self, tracker: &Tracker) -> Result<String, WriteError> {
        log_on_error!(
            self.repository.export_tracker(tracker),
            WriteError,
            "export",
            "tracker"
        )
    }

    /// Decodes an exported tracker and persists it. Nothing is stored on failure.
    pub fn import_tracker(&self, content: &str, today: NaiveDate) -> Result<Tracker, ImportError> {
        let mut tracker = self.repository.import_tracker(content).inspect_err(|err| {
            warn!("failed to import tracker: {err}");
        })?;
        tracker.repair(today);
        self.store_tracker(&tracker);
        Ok(tracker)
    }

    pub fn reset_tracker(&self, today: NaiveDate) -> Tracker {
        let tracker = Tracker::new(today);
        self.store_tracker(&tracker);
        tracker
    }
}

impl<R: ProgramStateRepository> Service<R> {
    pub fn get_program_state(&self) -> ProgramState {
        found(self.repository.read_program_state(), "program state").unwrap_or_default()
    }

    pub fn store_program_state(&self, state: &ProgramState) {
        let _ = log_on_error!(
            self.repository.write_program_state(state),
            WriteError,
            "write",
            "program state"
        );
    }
}

impl<R: HistoryRepository> Service<R> {
    /// Fills an exercise of the current day with the sets saved last time.
    ///
    /// Returns false if no history is stored for the exercise.
    pub fn copy_last(&self, state: &mut ProgramState, exercise: usize) -> bool {
        let Some(ex) = state
            .current_day()
            .and_then(|day| day.exercises.get(exercise))
        else {
            return false;
        };
        let key = state.day_key().history(ex.name);
        match found(self.repository.read_history(&key), "history") {
            Some(history) => {
                state.apply_history(exercise, &history);
                true
            }
            None => false,
        }
    }

    /// Remembers the sets and video links of every exercise in the current day.
    pub fn save_day_history(&self, state: &ProgramState) {
        for (key, sets, video) in state.day_history() {
            let _ = log_on_error!(
                self.repository.write_history(&key, &sets),
                WriteError,
                "write",
                format!("history {key}")
            );
            if let Some(href) = video {
                let _ = log_on_error!(
                    self.repository.write_video(&key, href),
                    WriteError,
                    "write",
                    format!("video link {key}")
                );
            }
        }
    }

    /// Video link of an exercise from the catalog, or else from the cache.
    pub fn video_href(&self, state: &ProgramState, exercise: usize) -> Option<String> {
        let ex = state.current_day()?.exercises.get(exercise)?;
        if let Some(href) = ex.video_href() {
            return Some(href.to_string());
        }
        found(
            self.repository.read_video(&state.day_key().history(ex.name)),
            "video link",
        )
        .filter(|href| !href.is_empty())
    }
}

impl<R: RestTimerRepository> Service<R> {
    pub fn get_rest_end(&self, day: DayKey) -> Option<DateTime<Utc>> {
        found(self.repository.read_rest_timer(day), "rest timer").flatten()
    }

    pub fn store_rest_end(&self, day: DayKey, end: Option<DateTime<Utc>>) {
        let _ = log_on_error!(
            self.repository.write_rest_timer(day, end),
            WriteError,
            "write",
            "rest timer"
        );
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, collections::BTreeMap};

    use pretty_assertions::assert_eq;

    use crate::{MeasurementRecord, Profile, RIR, SetField, StorageError, plan};

    use super::*;

    #[derive(Default)]
    struct FakeRepository {
        tracker: RefCell<Option<Tracker>>,
        history: RefCell<BTreeMap<String, Vec<SetEntry>>>,
        videos: RefCell<BTreeMap<String, String>>,
        broken: bool,
    }

    impl TrackerRepository for FakeRepository {
        fn read_tracker(&self) -> Result<Tracker, ReadError> {
            if self.broken {
                return Err(StorageError::Unavailable.into());
            }
            self.tracker.borrow().clone().ok_or(ReadError::NotFound)
        }

        fn write_tracker(&self, tracker: &Tracker) -> Result<(), WriteError> {
            if self.broken {
                return Err(StorageError::QuotaExceeded.into());
            }
            *self.tracker.borrow_mut() = Some(tracker.clone());
            Ok(())
        }

        fn export_tracker(&self, tracker: &Tracker) -> Result<String, WriteError> {
            Ok(tracker.profile.name.clone())
        }

        fn import_tracker(&self, content: &str) -> Result<Tracker, ImportError> {
            if content.is_empty() {
                return Err(ImportError::NotAnObject);
            }
            let mut tracker = Tracker::new(today());
            tracker.profile.name = content.to_string();
            Ok(tracker)
        }
    }

    impl HistoryRepository for FakeRepository {
        fn read_history(&self, key: &HistoryKey) -> Result<Vec<SetEntry>, ReadError> {
            self.history
                .borrow()
                .get(&key.to_string())
                .cloned()
                .ok_or(ReadError::NotFound)
        }

        fn write_history(&self, key: &HistoryKey, sets: &[SetEntry]) -> Result<(), WriteError> {
            self.history
                .borrow_mut()
                .insert(key.to_string(), sets.to_vec());
            Ok(())
        }

        fn read_video(&self, key: &HistoryKey) -> Result<String, ReadError> {
            self.videos
                .borrow()
                .get(&key.to_string())
                .cloned()
                .ok_or(ReadError::NotFound)
        }

        fn write_video(&self, key: &HistoryKey, href: &str) -> Result<(), WriteError> {
            self.videos
                .borrow_mut()
                .insert(key.to_string(), href.to_string());
            Ok(())
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 9, 1).unwrap()
    }

    #[test]
    fn test_get_tracker_falls_back_to_default() {
        let service = Service::new(FakeRepository::default());
        assert_eq!(service.get_tracker(today()), Tracker::new(today()));

        let service = Service::new(FakeRepository {
            broken: true,
            ..FakeRepository::default()
        });
        assert_eq!(service.get_tracker(today()), Tracker::new(today()));
        service.store_tracker(&Tracker::new(today()));
    }

    #[test]
    fn test_store_and_get_tracker() {
        let service = Service::new(FakeRepository::default());
        let mut tracker = Tracker::new(today());
        tracker.toggle_plan_day(0);
        service.store_tracker(&tracker);
        assert_eq!(service.get_tracker(today()), tracker);
    }

    #[test]
    fn test_import_tracker() {
        let service = Service::new(FakeRepository::default());
        assert!(matches!(
            service.import_tracker("", today()),
            Err(ImportError::NotAnObject)
        ));
        assert_eq!(*service.repository.tracker.borrow(), None);

        let tracker = service.import_tracker("Mary", today()).unwrap();
        assert_eq!(tracker.profile.name, "Mary");
        assert_eq!(*service.repository.tracker.borrow(), Some(tracker));
    }

    #[test]
    fn test_get_tracker_repairs_incomplete_tracker() {
        let service = Service::new(FakeRepository::default());
        *service.repository.tracker.borrow_mut() = Some(Tracker {
            plan: vec![],
            measures: vec![],
            profile: Profile {
                days: 14,
                ..Profile::new(today())
            },
            applied_from_query: true,
        });
        let tracker = service.get_tracker(today());
        assert_eq!(tracker.plan, plan::make_plan(14));
        assert_eq!(tracker.measures, vec![MeasurementRecord::blank(today())]);
    }

    #[test]
    fn test_reset_tracker() {
        let service = Service::new(FakeRepository::default());
        let mut tracker = Tracker::new(today());
        tracker.toggle_plan_day(0);
        service.store_tracker(&tracker);
        assert_eq!(service.reset_tracker(today()), Tracker::new(today()));
        assert_eq!(service.get_tracker(today()), Tracker::new(today()));
    }

    #[test]
    fn test_copy_last_without_history() {
        let service = Service::new(FakeRepository::default());
        let mut state = ProgramState::default();
        state.toggle_set(0, 0);
        let before = state.clone();
        assert!(!service.copy_last(&mut state, 0));
        assert_eq!(state, before);
    }

    #[test]
    fn test_save_day_history_and_copy_last() {
        let service = Service::new(FakeRepository::default());
        let mut state = ProgramState::default();
        state.set_field(4, 0, SetField::Reps("25".into()));
        state.set_field(4, 0, SetField::RIR(Some(RIR::ONE)));
        state.toggle_set(4, 0);
        state.toggle_set(4, 1);
        service.save_day_history(&state);

        assert_eq!(service.repository.history.borrow().len(), 5);
        assert_eq!(
            service.repository.videos.borrow().get("S.0.0.crunches"),
            Some(&String::from("https://vkvideo.ru/video-226154718_456239154"))
        );

        let mut next = ProgramState::default();
        assert!(service.copy_last(&mut next, 4));
        assert_eq!(
            next.entry(4).unwrap().sets,
            vec![
                SetEntry {
                    reps: "25".into(),
                    rir: Some(RIR::ONE),
                    ..SetEntry::default()
                },
                SetEntry {
                    rir: Some(RIR::ONE),
                    ..SetEntry::default()
                },
            ]
        );
        assert!(!next.is_exercise_done(4));
    }

    #[test]
    fn test_video_href() {
        let service = Service::new(FakeRepository::default());
        let state = ProgramState::default();
        assert_eq!(
            service.video_href(&state, 4),
            Some(String::from("https://vkvideo.ru/video-226154718_456239154"))
        );
        assert_eq!(service.video_href(&state, 0), None);

        service
            .repository
            .write_video(&state.day_key().history("Plie squat"), "https://example.org/v")
            .unwrap();
        assert_eq!(
            service.video_href(&state, 0),
            Some(String::from("https://example.org/v"))
        );
        assert_eq!(service.video_href(&state, 9), None);
    }
}
