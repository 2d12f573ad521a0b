use std::{collections::BTreeMap, fmt, str::FromStr};

use chrono::{DateTime, Duration, Utc};
use derive_more::{Display, Into};
use thiserror::Error;

use crate::{Day, Level, decimal};

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[display("{level}.{week}")]
pub struct WeekKey {
    pub level: Level,
    pub week: usize,
}

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[display("{level}.{week}.{day}")]
pub struct DayKey {
    pub level: Level,
    pub week: usize,
    pub day: usize,
}

impl DayKey {
    #[must_use]
    pub fn exercise(self, exercise: usize) -> ProgressKey {
        ProgressKey {
            level: self.level,
            week: self.week,
            day: self.day,
            exercise,
        }
    }

    #[must_use]
    pub fn history(self, exercise_name: &str) -> HistoryKey {
        HistoryKey::new(self, exercise_name)
    }

    #[must_use]
    pub fn week_key(self) -> WeekKey {
        WeekKey {
            level: self.level,
            week: self.week,
        }
    }

    #[must_use]
    pub fn rest_timer_key(self) -> String {
        format!("{self}.rest")
    }
}

/// Identifies the set log of one exercise slot within a day.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[display("{level}.{week}.{day}.{exercise}")]
pub struct ProgressKey {
    pub level: Level,
    pub week: usize,
    pub day: usize,
    pub exercise: usize,
}

impl ProgressKey {
    #[must_use]
    pub fn day_key(self) -> DayKey {
        DayKey {
            level: self.level,
            week: self.week,
            day: self.day,
        }
    }
}

impl FromStr for ProgressKey {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || KeyError::Invalid(s.to_string());
        let parts = s.split('.').collect::<Vec<_>>();
        let [level, week, day, exercise] = parts[..] else {
            return Err(invalid());
        };
        Ok(Self {
            level: Level::from_str(level).map_err(|_| invalid())?,
            week: week.parse().map_err(|_| invalid())?,
            day: day.parse().map_err(|_| invalid())?,
            exercise: exercise.parse().map_err(|_| invalid())?,
        })
    }
}

impl FromStr for WeekKey {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || KeyError::Invalid(s.to_string());
        let (level, week) = s.split_once('.').ok_or_else(invalid)?;
        Ok(Self {
            level: Level::from_str(level).map_err(|_| invalid())?,
            week: week.parse().map_err(|_| invalid())?,
        })
    }
}

impl FromStr for DayKey {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || KeyError::Invalid(s.to_string());
        let (week_key, day) = s.rsplit_once('.').ok_or_else(invalid)?;
        let week_key = WeekKey::from_str(week_key).map_err(|_| invalid())?;
        Ok(Self {
            level: week_key.level,
            week: week_key.week,
            day: day.parse().map_err(|_| invalid())?,
        })
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum KeyError {
    #[error("invalid key: {0}")]
    Invalid(String),
}

/// Name-based key used for "last time" history and cached video links.
///
/// Exercises with the same normalized name in one day share a key.
#[derive(Debug, Display, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[display("{day}.{name}")]
pub struct HistoryKey {
    day: DayKey,
    name: String,
}

impl HistoryKey {
    #[must_use]
    pub fn new(day: DayKey, exercise_name: &str) -> Self {
        if exercise_name.is_empty() {
            return Self {
                day,
                name: String::from("ex"),
            };
        }
        let mut name = String::with_capacity(exercise_name.len());
        let mut in_whitespace = false;
        for c in exercise_name.to_lowercase().chars() {
            if c.is_whitespace() {
                if !in_whitespace {
                    name.push('_');
                }
                in_whitespace = true;
            } else {
                name.push(c);
                in_whitespace = false;
            }
        }
        Self { day, name }
    }
}

/// Reps in reserve. Zero means the set was taken to failure.
#[derive(Debug, Clone, Copy, Into, PartialEq, Eq, PartialOrd, Ord)]
pub struct RIR(u8);

impl RIR {
    pub const FAILURE: RIR = RIR(0);
    pub const ONE: RIR = RIR(1);
    pub const TWO: RIR = RIR(2);
    pub const THREE: RIR = RIR(3);
    pub const FOUR: RIR = RIR(4);

    pub fn new(value: u8) -> Result<Self, RIRError> {
        if value > 4 {
            return Err(RIRError::OutOfRange);
        }
        Ok(Self(value))
    }

    #[must_use]
    pub fn avg(values: &[RIR]) -> Option<f32> {
        if values.is_empty() {
            None
        } else {
            #[allow(clippy::cast_precision_loss)]
            Some(
                values.iter().map(|rir| u32::from(rir.0)).sum::<u32>() as f32
                    / values.len() as f32,
            )
        }
    }
}

impl TryFrom<&str> for RIR {
    type Error = RIRError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let value = value.trim();
        if value.eq_ignore_ascii_case("failure") {
            return Ok(RIR::FAILURE);
        }
        match value.parse::<u8>() {
            Ok(parsed_value) => RIR::new(parsed_value),
            Err(_) => Err(RIRError::ParseError),
        }
    }
}

impl fmt::Display for RIR {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == RIR::FAILURE {
            write!(f, "failure")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum RIRError {
    #[error("RIR must be in the range 0 to 4")]
    OutOfRange,
    #[error("RIR must be an integer or \"failure\"")]
    ParseError,
}

/// One logged set. Reps and weight keep the text as entered.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct SetEntry {
    pub reps: String,
    pub weight: String,
    pub rir: Option<RIR>,
    pub done: bool,
}

impl SetEntry {
    /// Weight × reps, with missing or non-numeric values counting as zero.
    #[must_use]
    pub fn volume(&self) -> f32 {
        decimal(&self.weight).unwrap_or(0.) * decimal(&self.reps).unwrap_or(0.)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SetField {
    Reps(String),
    Weight(String),
    RIR(Option<RIR>),
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct ProgressEntry {
    pub sets: Vec<SetEntry>,
}

impl ProgressEntry {
    #[must_use]
    pub fn done_sets(&self) -> u32 {
        #[allow(clippy::cast_possible_truncation)]
        let done = self.sets.iter().filter(|s| s.done).count() as u32;
        done
    }

    #[must_use]
    pub fn is_done(&self, work_sets: u32) -> bool {
        self.done_sets() >= work_sets
    }

    fn set_mut(&mut self, set: usize) -> &mut SetEntry {
        if self.sets.len() <= set {
            self.sets.resize_with(set + 1, SetEntry::default);
        }
        &mut self.sets[set]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Goal {
    pub text: String,
    pub done: bool,
}

impl Goal {
    fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            done: false,
        }
    }
}

#[must_use]
pub fn default_goals() -> Vec<Goal> {
    vec![
        Goal::new("3 workouts this week"),
        Goal::new("Sleep 7+ h on 4 days"),
        Goal::new("6–8k steps on 4 days"),
    ]
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorkoutSession {
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl WorkoutSession {
    #[must_use]
    pub fn elapsed(&self, now: DateTime<Utc>) -> Duration {
        (self.finished_at.unwrap_or(now) - self.started_at).max(Duration::zero())
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.finished_at.is_none()
    }
}

/// Navigation and set logs of the program viewer.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ProgramState {
    pub level: Level,
    pub week: usize,
    pub day: usize,
    pub progress: BTreeMap<ProgressKey, ProgressEntry>,
    pub goals: BTreeMap<WeekKey, Vec<Goal>>,
    pub work_sets: BTreeMap<ProgressKey, u32>,
    pub sessions: BTreeMap<DayKey, WorkoutSession>,
}

impl ProgramState {
    #[must_use]
    pub fn day_key(&self) -> DayKey {
        DayKey {
            level: self.level,
            week: self.week,
            day: self.day,
        }
    }

    #[must_use]
    pub fn current_day(&self) -> Option<&'static Day> {
        self.level.program().day(self.week, self.day)
    }

    pub fn set_level(&mut self, level: Level) {
        self.level = level;
        self.week = 0;
        self.day = 0;
    }

    pub fn set_week(&mut self, week: usize) {
        self.week = week;
        self.day = 0;
    }

    pub fn set_day(&mut self, day: usize) {
        self.day = day;
    }

    #[must_use]
    pub fn entry(&self, exercise: usize) -> Option<&ProgressEntry> {
        self.progress.get(&self.day_key().exercise(exercise))
    }

    /// Target number of working sets, including user adjustments.
    #[must_use]
    pub fn work_sets(&self, exercise: usize) -> u32 {
        let key = self.day_key().exercise(exercise);
        self.work_sets.get(&key).copied().unwrap_or_else(|| {
            self.current_day()
                .and_then(|day| day.exercises.get(exercise))
                .map_or(0, |e| e.work_sets)
        })
    }

    pub fn add_set(&mut self, exercise: usize) {
        let work_sets = self.work_sets(exercise);
        self.work_sets
            .insert(self.day_key().exercise(exercise), work_sets + 1);
    }

    /// Returns false if the exercise is already at a single set.
    pub fn remove_set(&mut self, exercise: usize) -> bool {
        let work_sets = self.work_sets(exercise);
        if work_sets <= 1 {
            return false;
        }
        self.work_sets
            .insert(self.day_key().exercise(exercise), work_sets - 1);
        true
    }

    #[must_use]
    pub fn is_exercise_done(&self, exercise: usize) -> bool {
        let work_sets = self.work_sets(exercise);
        self.entry(exercise)
            .map_or(work_sets == 0, |e| e.is_done(work_sets))
    }

    pub fn toggle_set(&mut self, exercise: usize, set: usize) {
        let entry = self.entry_mut(exercise);
        let s = entry.set_mut(set);
        s.done = !s.done;
    }

    pub fn set_field(&mut self, exercise: usize, set: usize, field: SetField) {
        let work_sets = self.work_sets(exercise) as usize;
        let entry = self.entry_mut(exercise);
        match field {
            SetField::Reps(reps) => entry.set_mut(set).reps = reps,
            SetField::Weight(weight) => entry.set_mut(set).weight = weight,
            SetField::RIR(rir) => {
                entry.set_mut(set).rir = rir;
                if set == 0 && rir.is_some() {
                    for j in 1..work_sets {
                        let s = entry.set_mut(j);
                        if s.rir.is_none() {
                            s.rir = rir;
                        }
                    }
                }
            }
        }
    }

    /// Replaces the log of an exercise with the sets from its history.
    pub fn apply_history(&mut self, exercise: usize, history: &[SetEntry]) {
        let need = (self.work_sets(exercise) as usize).max(history.len());
        let sets = (0..need)
            .map(|i| {
                history.get(i).map_or_else(SetEntry::default, |h| SetEntry {
                    reps: h.reps.clone(),
                    weight: h.weight.clone(),
                    rir: h.rir,
                    done: false,
                })
            })
            .collect();
        self.progress
            .insert(self.day_key().exercise(exercise), ProgressEntry { sets });
    }

    /// Sets of every exercise in the current day, keyed for "last time" history.
    #[must_use]
    pub fn day_history(&self) -> Vec<(HistoryKey, Vec<SetEntry>, Option<&'static str>)> {
        let Some(day) = self.current_day() else {
            return vec![];
        };
        let day_key = self.day_key();
        day.exercises
            .iter()
            .enumerate()
            .map(|(idx, exercise)| {
                let sets = self
                    .entry(idx)
                    .map(|e| {
                        e.sets
                            .iter()
                            .map(|s| SetEntry {
                                done: false,
                                ..s.clone()
                            })
                            .collect()
                    })
                    .unwrap_or_default();
                (day_key.history(exercise.name), sets, exercise.video_href())
            })
            .collect()
    }

    #[must_use]
    pub fn goals(&self) -> Vec<Goal> {
        self.goals
            .get(&self.day_key().week_key())
            .cloned()
            .unwrap_or_else(default_goals)
    }

    pub fn set_goal(&mut self, idx: usize, goal: Goal) {
        let mut goals = self.goals();
        if let Some(g) = goals.get_mut(idx) {
            *g = goal;
            self.goals.insert(self.day_key().week_key(), goals);
        }
    }

    #[must_use]
    pub fn workout_session(&self) -> Option<&WorkoutSession> {
        self.sessions.get(&self.day_key())
    }

    pub fn start_workout(&mut self, now: DateTime<Utc>) {
        self.sessions.insert(
            self.day_key(),
            WorkoutSession {
                started_at: now,
                finished_at: None,
            },
        );
    }

    pub fn finish_workout(&mut self, now: DateTime<Utc>) {
        if let Some(session) = self.sessions.get_mut(&self.day_key()) {
            if session.finished_at.is_none() {
                session.finished_at = Some(now);
            }
        }
    }

    fn entry_mut(&mut self, exercise: usize) -> &mut ProgressEntry {
        self.progress
            .entry(self.day_key().exercise(exercise))
            .or_default()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn set(reps: &str, weight: &str, rir: Option<RIR>, done: bool) -> SetEntry {
        SetEntry {
            reps: reps.to_string(),
            weight: weight.to_string(),
            rir,
            done,
        }
    }

    #[test]
    fn test_keys() {
        let day = DayKey {
            level: Level::Start,
            week: 1,
            day: 2,
        };
        assert_eq!(day.to_string(), "S.1.2");
        assert_eq!(day.exercise(3).to_string(), "S.1.2.3");
        assert_eq!(day.week_key().to_string(), "S.1");
        assert_eq!(day.rest_timer_key(), "S.1.2.rest");
        assert_eq!(day.exercise(3).day_key(), day);
    }

    #[rstest]
    #[case("S.0.0.1", Ok(ProgressKey { level: Level::Start, week: 0, day: 0, exercise: 1 }))]
    #[case("P.12.3.4", Ok(ProgressKey { level: Level::Pro, week: 12, day: 3, exercise: 4 }))]
    #[case("S.0.0", Err(KeyError::Invalid("S.0.0".into())))]
    #[case("S.0.0.1.2", Err(KeyError::Invalid("S.0.0.1.2".into())))]
    #[case("X.0.0.1", Err(KeyError::Invalid("X.0.0.1".into())))]
    #[case("S.a.0.1", Err(KeyError::Invalid("S.a.0.1".into())))]
    fn test_progress_key_from_str(
        #[case] value: &str,
        #[case] expected: Result<ProgressKey, KeyError>,
    ) {
        assert_eq!(ProgressKey::from_str(value), expected);
    }

    #[test]
    fn test_day_and_week_key_from_str() {
        assert_eq!(
            DayKey::from_str("M.2.1"),
            Ok(DayKey {
                level: Level::Medium,
                week: 2,
                day: 1
            })
        );
        assert_eq!(
            WeekKey::from_str("S.3"),
            Ok(WeekKey {
                level: Level::Start,
                week: 3
            })
        );
        assert!(DayKey::from_str("S.1").is_err());
        assert!(WeekKey::from_str("S").is_err());
    }

    #[rstest]
    #[case("Glute bridge", "S.0.2.glute_bridge")]
    #[case("Lying   Leg\tCurl", "S.0.2.lying_leg_curl")]
    #[case(" Lying Leg Curl  ", "S.0.2._lying_leg_curl_")]
    #[case("", "S.0.2.ex")]
    #[case(" ", "S.0.2._")]
    #[case("Плие", "S.0.2.плие")]
    fn test_history_key(#[case] name: &str, #[case] expected: &str) {
        let day = DayKey {
            level: Level::Start,
            week: 0,
            day: 2,
        };
        assert_eq!(day.history(name).to_string(), expected);
    }

    #[test]
    fn test_history_key_collision() {
        let day = ProgramState::default().day_key();
        assert_eq!(day.history("Crunches"), day.history("crunches"));
    }

    #[rstest]
    #[case("0", Ok(RIR::FAILURE))]
    #[case("failure", Ok(RIR::FAILURE))]
    #[case(" 2 ", Ok(RIR::TWO))]
    #[case("4", Ok(RIR::FOUR))]
    #[case("5", Err(RIRError::OutOfRange))]
    #[case("", Err(RIRError::ParseError))]
    #[case("1.5", Err(RIRError::ParseError))]
    fn test_rir_try_from(#[case] value: &str, #[case] expected: Result<RIR, RIRError>) {
        assert_eq!(RIR::try_from(value), expected);
    }

    #[test]
    fn test_rir_display() {
        assert_eq!(RIR::FAILURE.to_string(), "failure");
        assert_eq!(RIR::THREE.to_string(), "3");
        assert_eq!(u8::from(RIR::THREE), 3);
    }

    #[rstest]
    #[case(&[], None)]
    #[case(&[RIR::FAILURE], Some(0.0))]
    #[case(&[RIR::FAILURE, RIR::TWO, RIR::FOUR], Some(2.0))]
    #[case(&[RIR::ONE, RIR::TWO], Some(1.5))]
    fn test_rir_avg(#[case] values: &[RIR], #[case] expected: Option<f32>) {
        assert_eq!(RIR::avg(values), expected);
    }

    #[rstest]
    #[case(set("10", "40", None, false), 400.0)]
    #[case(set("12", "12,5", None, false), 150.0)]
    #[case(set("", "40", None, false), 0.0)]
    #[case(set("10", "heavy", None, false), 0.0)]
    fn test_set_entry_volume(#[case] entry: SetEntry, #[case] expected: f32) {
        assert_eq!(entry.volume(), expected);
    }

    #[test]
    fn test_set_field_patches_single_field() {
        let mut state = ProgramState::default();
        state.set_field(1, 1, SetField::Reps("10".into()));
        state.set_field(1, 1, SetField::Weight("40".into()));
        state.toggle_set(1, 1);
        state.set_field(1, 2, SetField::Reps("8".into()));

        let before = state.clone();
        state.set_field(1, 1, SetField::Weight("42,5".into()));

        let entry = state.entry(1).unwrap();
        assert_eq!(entry.sets[1], set("10", "42,5", None, true));
        assert_eq!(entry.sets[0], before.entry(1).unwrap().sets[0]);
        assert_eq!(entry.sets[2], before.entry(1).unwrap().sets[2]);
        assert_eq!(state.entry(0), None);
    }

    #[test]
    fn test_set_field_pads_sparse_sets() {
        let mut state = ProgramState::default();
        state.set_field(0, 2, SetField::Reps("12".into()));
        assert_eq!(
            state.entry(0).unwrap().sets,
            vec![
                SetEntry::default(),
                SetEntry::default(),
                set("12", "", None, false)
            ]
        );
    }

    #[test]
    fn test_toggle_set() {
        let mut state = ProgramState::default();
        state.toggle_set(0, 0);
        assert!(state.entry(0).unwrap().sets[0].done);
        state.toggle_set(0, 0);
        assert!(!state.entry(0).unwrap().sets[0].done);
    }

    #[test]
    fn test_rir_on_first_set_fills_unset_sets() {
        let mut state = ProgramState::default();
        state.set_field(0, 2, SetField::RIR(Some(RIR::FOUR)));
        state.set_field(0, 0, SetField::RIR(Some(RIR::TWO)));
        assert_eq!(
            state
                .entry(0)
                .unwrap()
                .sets
                .iter()
                .map(|s| s.rir)
                .collect::<Vec<_>>(),
            vec![Some(RIR::TWO), Some(RIR::TWO), Some(RIR::FOUR)]
        );
    }

    #[test]
    fn test_rir_on_other_set_does_not_propagate() {
        let mut state = ProgramState::default();
        state.set_field(0, 1, SetField::RIR(Some(RIR::ONE)));
        assert_eq!(
            state
                .entry(0)
                .unwrap()
                .sets
                .iter()
                .map(|s| s.rir)
                .collect::<Vec<_>>(),
            vec![None, Some(RIR::ONE)]
        );
    }

    #[test]
    fn test_clearing_rir_on_first_set_does_not_propagate() {
        let mut state = ProgramState::default();
        state.set_field(0, 0, SetField::RIR(None));
        assert_eq!(state.entry(0).unwrap().sets, vec![SetEntry::default()]);
    }

    #[rstest]
    #[case(0, 0, true)]
    #[case(0, 1, false)]
    #[case(2, 3, false)]
    #[case(3, 3, true)]
    #[case(4, 3, true)]
    fn test_progress_entry_is_done(#[case] done: usize, #[case] work_sets: u32, #[case] expected: bool) {
        let entry = ProgressEntry {
            sets: (0..5).map(|i| set("", "", None, i < done)).collect(),
        };
        assert_eq!(entry.is_done(work_sets), expected);
    }

    #[test]
    fn test_is_exercise_done() {
        let mut state = ProgramState::default();
        assert_eq!(state.work_sets(0), 3);
        assert!(!state.is_exercise_done(0));
        state.toggle_set(0, 0);
        state.toggle_set(0, 1);
        assert!(!state.is_exercise_done(0));
        state.toggle_set(0, 2);
        assert!(state.is_exercise_done(0));
        state.add_set(0);
        assert!(!state.is_exercise_done(0));
    }

    #[test]
    fn test_add_and_remove_set() {
        let mut state = ProgramState::default();
        assert_eq!(state.work_sets(4), 2);
        state.add_set(4);
        assert_eq!(state.work_sets(4), 3);
        assert!(state.remove_set(4));
        assert!(state.remove_set(4));
        assert_eq!(state.work_sets(4), 1);
        assert!(!state.remove_set(4));
        assert_eq!(state.work_sets(4), 1);
    }

    #[test]
    fn test_work_sets_are_per_day() {
        let mut state = ProgramState::default();
        state.add_set(0);
        state.set_week(1);
        assert_eq!(state.work_sets(0), 3);
        state.set_week(0);
        assert_eq!(state.work_sets(0), 4);
    }

    #[test]
    fn test_navigation_resets() {
        let mut state = ProgramState::default();
        state.set_week(2);
        state.set_day(1);
        assert_eq!((state.week, state.day), (2, 1));
        state.set_week(3);
        assert_eq!((state.week, state.day), (3, 0));
        state.set_day(2);
        state.set_level(Level::Medium);
        assert_eq!((state.level, state.week, state.day), (Level::Medium, 0, 0));
        assert_eq!(state.current_day(), None);
        assert_eq!(state.work_sets(0), 0);
    }

    #[test]
    fn test_apply_history() {
        let mut state = ProgramState::default();
        state.toggle_set(0, 0);
        state.apply_history(
            0,
            &[
                set("12", "10", Some(RIR::TWO), true),
                set("10", "10", None, false),
            ],
        );
        assert_eq!(
            state.entry(0).unwrap().sets,
            vec![
                set("12", "10", Some(RIR::TWO), false),
                set("10", "10", None, false),
                SetEntry::default(),
            ]
        );
    }

    #[test]
    fn test_apply_longer_history() {
        let mut state = ProgramState::default();
        state.apply_history(4, &vec![set("20", "", None, false); 4]);
        assert_eq!(state.entry(4).unwrap().sets.len(), 4);
    }

    #[test]
    fn test_day_history() {
        let mut state = ProgramState::default();
        state.set_field(4, 0, SetField::Reps("25".into()));
        state.toggle_set(4, 0);

        let history = state.day_history();
        assert_eq!(history.len(), 5);
        assert_eq!(history[0].0.to_string(), "S.0.0.plie_squat");
        assert_eq!(history[0].1, vec![]);
        assert_eq!(history[0].2, None);
        assert_eq!(history[4].0.to_string(), "S.0.0.crunches");
        assert_eq!(history[4].1, vec![set("25", "", None, false)]);
        assert_eq!(
            history[4].2,
            Some("https://vkvideo.ru/video-226154718_456239154")
        );

        state.set_level(Level::Pro);
        assert_eq!(state.day_history(), vec![]);
    }

    #[test]
    fn test_goals() {
        let mut state = ProgramState::default();
        assert_eq!(state.goals(), default_goals());
        state.set_goal(
            1,
            Goal {
                text: "Sleep 8 h".into(),
                done: true,
            },
        );
        assert_eq!(state.goals()[1].text, "Sleep 8 h");
        assert!(state.goals()[1].done);
        assert_eq!(state.goals()[0], default_goals()[0]);

        state.set_week(1);
        assert_eq!(state.goals(), default_goals());

        state.set_goal(7, Goal::new("ignored"));
        assert!(!state.goals.contains_key(&state.day_key().week_key()));
    }

    #[test]
    fn test_workout_session() {
        let start = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let mut state = ProgramState::default();
        assert_eq!(state.workout_session(), None);

        state.start_workout(start);
        let session = *state.workout_session().unwrap();
        assert!(session.is_running());
        assert_eq!(
            session.elapsed(start + Duration::seconds(95)),
            Duration::seconds(95)
        );

        state.finish_workout(start + Duration::seconds(600));
        state.finish_workout(start + Duration::seconds(900));
        let session = *state.workout_session().unwrap();
        assert!(!session.is_running());
        assert_eq!(
            session.elapsed(start + Duration::seconds(3600)),
            Duration::seconds(600)
        );
        assert_eq!(session.elapsed(start - Duration::seconds(1)), Duration::seconds(600));
    }
}
