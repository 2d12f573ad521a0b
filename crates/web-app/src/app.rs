use chrono::{DateTime, NaiveDate, Utc};
use r7_domain::{
    Day, DayStats, Goal, HistoryRepository, Level, MeasurementRecord, ProgramState,
    ProgramStateRepository, Profile, QuerySeed, RIR, RestTimerRepository, Service, SetField,
    Tracker, TrackerRepository, WriteError, statistics,
};

use crate::{
    format,
    timer::{self, RestTimer},
};

const VIBRATION_SET_MS: u32 = 12;
const VIBRATION_REST_MS: u32 = 35;

pub const IMPORT_FAILED: &str = "Failed to import JSON";
pub const RESET_QUESTION: &str = "Reset the tracker?";

pub trait Repository:
    TrackerRepository + ProgramStateRepository + HistoryRepository + RestTimerRepository
{
}

impl<R> Repository for R where
    R: TrackerRepository + ProgramStateRepository + HistoryRepository + RestTimerRepository
{
}

/// Clock, device feedback and dialogs.
pub trait Platform {
    fn now(&self) -> DateTime<Utc>;
    fn today(&self) -> NaiveDate;
    fn vibrate(&self, millis: u32);
    fn alert(&self, message: &str);
    fn confirm(&self, message: &str) -> bool;
}

/// State of the tracker page. Every change is persisted immediately.
pub struct App<R, P> {
    service: Service<R>,
    platform: P,
    tracker: Tracker,
    programs: ProgramState,
    rest: RestTimer,
    settings_open: bool,
}

impl<R: Repository, P: Platform> App<R, P> {
    /// Loads the stored state and applies the profile values of a personal link.
    pub fn new(repository: R, platform: P, query: &QuerySeed) -> Self {
        let service = Service::new(repository);
        let mut tracker = service.get_tracker(platform.today());
        if tracker.apply_query(query) {
            service.store_tracker(&tracker);
        }
        let programs = service.get_program_state();
        let rest = RestTimer::new(service.get_rest_end(programs.day_key()));
        let settings_open = tracker.profile.is_incomplete();
        Self {
            service,
            platform,
            tracker,
            programs,
            rest,
            settings_open,
        }
    }

    #[must_use]
    pub fn tracker(&self) -> &Tracker {
        &self.tracker
    }

    #[must_use]
    pub fn program_state(&self) -> &ProgramState {
        &self.programs
    }

    #[must_use]
    pub fn current_day(&self) -> Option<&'static Day> {
        self.programs.current_day()
    }

    #[must_use]
    pub fn day_stats(&self) -> DayStats {
        statistics::day_stats(&self.programs)
    }

    #[must_use]
    pub fn day_summary(&self) -> String {
        format::day_summary(&self.day_stats())
    }

    /// Whether the settings modal is shown. It opens by itself while the profile is incomplete.
    #[must_use]
    pub fn settings_open(&self) -> bool {
        self.settings_open
    }

    pub fn open_settings(&mut self) {
        self.settings_open = true;
    }

    /// Writes the complete state, e.g. before the page is hidden.
    pub fn flush(&self) {
        self.service.store_tracker(&self.tracker);
        self.service.store_program_state(&self.programs);
    }

    fn update_tracker(&mut self, f: impl FnOnce(&mut Tracker)) {
        f(&mut self.tracker);
        self.service.store_tracker(&self.tracker);
    }

    fn update_programs(&mut self, f: impl FnOnce(&mut ProgramState)) {
        f(&mut self.programs);
        self.service.store_program_state(&self.programs);
    }

    // Plan, measurements and profile

    pub fn toggle_plan_day(&mut self, idx: usize) {
        self.update_tracker(|t| t.toggle_plan_day(idx));
    }

    pub fn set_plan_date(&mut self, idx: usize, date: Option<NaiveDate>) {
        self.update_tracker(|t| t.set_plan_date(idx, date));
    }

    pub fn set_plan_note(&mut self, idx: usize, note: String) {
        self.update_tracker(|t| t.set_plan_note(idx, note));
    }

    pub fn add_measurement(&mut self) {
        let today = self.platform.today();
        self.update_tracker(|t| t.add_measurement(today));
    }

    pub fn update_measurement(&mut self, idx: usize, record: MeasurementRecord) {
        self.update_tracker(|t| t.update_measurement(idx, record));
    }

    pub fn delete_measurement(&mut self, idx: usize) {
        let today = self.platform.today();
        self.update_tracker(|t| t.delete_measurement(idx, today));
    }

    /// Saves the settings modal and closes it.
    pub fn update_profile(&mut self, profile: Profile) {
        self.update_tracker(|t| t.update_profile(profile));
        self.settings_open = false;
    }

    #[must_use]
    pub fn share_params(&self) -> Vec<(&'static str, String)> {
        self.tracker.profile.share_params()
    }

    /// Replaces the tracker with the default after the user confirmed it.
    pub fn reset(&mut self) -> bool {
        if !self.platform.confirm(RESET_QUESTION) {
            return false;
        }
        self.tracker = self.service.reset_tracker(self.platform.today());
        true
    }

    pub fn export(&self) -> Result<String, WriteError> {
        self.service.export_tracker(&self.tracker)
    }

    /// Replaces the tracker with an exported one.
    ///
    /// On failure the user is alerted and the current state is kept.
    pub fn import(&mut self, content: &str) -> bool {
        match self
            .service
            .import_tracker(content, self.platform.today())
        {
            Ok(tracker) => {
                self.tracker = tracker;
                true
            }
            Err(_) => {
                self.platform.alert(IMPORT_FAILED);
                false
            }
        }
    }

    pub fn import_failed(&self) {
        self.platform.alert(IMPORT_FAILED);
    }

    // Program viewer

    /// Selects a level. Levels without weeks cannot be selected.
    pub fn set_level(&mut self, level: Level) {
        if !level.is_available() {
            return;
        }
        self.update_programs(|p| p.set_level(level));
        self.load_rest_timer();
    }

    pub fn set_week(&mut self, week: usize) {
        self.update_programs(|p| p.set_week(week));
        self.load_rest_timer();
    }

    pub fn set_day(&mut self, day: usize) {
        self.update_programs(|p| p.set_day(day));
        self.load_rest_timer();
    }

    pub fn toggle_set(&mut self, exercise: usize, set: usize) {
        self.update_programs(|p| p.toggle_set(exercise, set));
        self.platform.vibrate(VIBRATION_SET_MS);
    }

    pub fn set_reps(&mut self, exercise: usize, set: usize, reps: String) {
        self.update_programs(|p| p.set_field(exercise, set, SetField::Reps(reps)));
    }

    pub fn set_weight(&mut self, exercise: usize, set: usize, weight: String) {
        self.update_programs(|p| p.set_field(exercise, set, SetField::Weight(weight)));
    }

    pub fn set_rir(&mut self, exercise: usize, set: usize, rir: Option<RIR>) {
        self.update_programs(|p| p.set_field(exercise, set, SetField::RIR(rir)));
    }

    pub fn add_set(&mut self, exercise: usize) {
        self.update_programs(|p| p.add_set(exercise));
    }

    pub fn remove_set(&mut self, exercise: usize) {
        if self.programs.remove_set(exercise) {
            self.service.store_program_state(&self.programs);
        }
    }

    /// Returns false if nothing was saved for the exercise.
    pub fn copy_last(&mut self, exercise: usize) -> bool {
        let copied = self.service.copy_last(&mut self.programs, exercise);
        if copied {
            self.service.store_program_state(&self.programs);
        }
        copied
    }

    pub fn save_day_history(&self) {
        self.service.save_day_history(&self.programs);
    }

    #[must_use]
    pub fn video_href(&self, exercise: usize) -> Option<String> {
        self.service.video_href(&self.programs, exercise)
    }

    #[must_use]
    pub fn goals(&self) -> Vec<Goal> {
        self.programs.goals()
    }

    pub fn set_goal(&mut self, idx: usize, goal: Goal) {
        self.update_programs(|p| p.set_goal(idx, goal));
    }

    pub fn start_workout(&mut self) {
        let now = self.platform.now();
        self.update_programs(|p| p.start_workout(now));
    }

    pub fn finish_workout(&mut self) {
        let now = self.platform.now();
        self.update_programs(|p| p.finish_workout(now));
    }

    #[must_use]
    pub fn workout_clock(&self) -> String {
        timer::format_elapsed(
            self.programs
                .workout_session()
                .map(|s| s.elapsed(self.platform.now())),
        )
    }

    // Rest timer

    fn load_rest_timer(&mut self) {
        self.rest = RestTimer::new(self.service.get_rest_end(self.programs.day_key()));
    }

    fn store_rest_timer(&self) {
        self.service
            .store_rest_end(self.programs.day_key(), self.rest.end());
    }

    pub fn start_rest(&mut self, seconds: i64) {
        self.rest.start(self.platform.now(), seconds);
        self.store_rest_timer();
    }

    pub fn stop_rest(&mut self) {
        self.rest.stop();
        self.store_rest_timer();
    }

    /// Advances the rest countdown. Returns true while a timer needs to be displayed.
    pub fn tick(&mut self) -> bool {
        if self.rest.tick(self.platform.now()) {
            self.store_rest_timer();
            self.platform.vibrate(VIBRATION_REST_MS);
        }
        self.is_ticking()
    }

    #[must_use]
    pub fn is_ticking(&self) -> bool {
        self.rest.is_running()
            || self
                .programs
                .workout_session()
                .is_some_and(r7_domain::WorkoutSession::is_running)
    }

    #[must_use]
    pub fn rest_clock(&self) -> String {
        timer::format_countdown(self.rest.remaining(self.platform.now()))
    }
}
