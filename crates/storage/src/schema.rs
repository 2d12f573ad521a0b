//! JSON layout of the persisted values.
//!
//! Decoding never fails on unexpected shapes: numbers stored as text, text stored as numbers,
//! missing fields and wrongly typed collections fall back to the field default.

use std::{collections::BTreeMap, str::FromStr};

use chrono::{DateTime, NaiveDate, Utc};
use log::debug;
use r7_domain as domain;
use serde::{Deserialize, Serialize};

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Tracker {
    #[serde(deserialize_with = "lenient::list")]
    pub plan: Vec<PlanDay>,
    #[serde(deserialize_with = "lenient::list")]
    pub measures: Vec<Measure>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub profile: Profile,
    #[serde(rename = "_appliedFromQuery", deserialize_with = "lenient::flag")]
    pub applied_from_query: bool,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanDay {
    #[serde(deserialize_with = "lenient::number")]
    pub day: u32,
    #[serde(deserialize_with = "lenient::text")]
    pub date: String,
    #[serde(deserialize_with = "lenient::text")]
    pub title: String,
    #[serde(deserialize_with = "lenient::text")]
    pub focus: String,
    #[serde(deserialize_with = "lenient::text")]
    pub duration: String,
    #[serde(deserialize_with = "lenient::text")]
    pub prep: String,
    #[serde(deserialize_with = "lenient::flag")]
    pub status: bool,
    #[serde(deserialize_with = "lenient::text")]
    pub note: String,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Measure {
    #[serde(deserialize_with = "lenient::text")]
    pub date: String,
    #[serde(deserialize_with = "lenient::text")]
    pub weight: String,
    #[serde(deserialize_with = "lenient::text")]
    pub waist: String,
    #[serde(deserialize_with = "lenient::text")]
    pub hips: String,
    #[serde(deserialize_with = "lenient::text")]
    pub notes: String,
    #[serde(deserialize_with = "lenient::text")]
    pub photo: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    #[serde(deserialize_with = "lenient::text")]
    pub name: String,
    #[serde(deserialize_with = "lenient::text")]
    pub mode: String,
    #[serde(deserialize_with = "lenient::text")]
    pub level: String,
    #[serde(deserialize_with = "lenient::text")]
    pub start: String,
    #[serde(deserialize_with = "lenient::number")]
    pub days: u32,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            name: String::new(),
            mode: String::new(),
            level: domain::Level::Start.to_string(),
            start: String::new(),
            days: domain::DEFAULT_DAYS,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProgramState {
    #[serde(deserialize_with = "lenient::text")]
    pub level: String,
    #[serde(deserialize_with = "lenient::number")]
    pub week: usize,
    #[serde(deserialize_with = "lenient::number")]
    pub day: usize,
    #[serde(deserialize_with = "lenient::map")]
    pub progress: BTreeMap<String, ProgressEntry>,
    #[serde(deserialize_with = "lenient::map")]
    pub goals: BTreeMap<String, Vec<Goal>>,
    #[serde(deserialize_with = "lenient::map")]
    pub work_sets: BTreeMap<String, u32>,
    #[serde(rename = "session", deserialize_with = "lenient::map")]
    pub sessions: BTreeMap<String, Session>,
}

impl Default for ProgramState {
    fn default() -> Self {
        Self {
            level: domain::Level::Start.to_string(),
            week: 0,
            day: 0,
            progress: BTreeMap::new(),
            goals: BTreeMap::new(),
            work_sets: BTreeMap::new(),
            sessions: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressEntry {
    #[serde(deserialize_with = "lenient::positional")]
    pub sets: Vec<Set>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Set {
    #[serde(deserialize_with = "lenient::text")]
    pub reps: String,
    #[serde(deserialize_with = "lenient::text")]
    pub weight: String,
    #[serde(deserialize_with = "lenient::text")]
    pub rir: String,
    #[serde(deserialize_with = "lenient::flag", skip_serializing_if = "is_false")]
    pub done: bool,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Goal {
    #[serde(deserialize_with = "lenient::text")]
    pub text: String,
    #[serde(deserialize_with = "lenient::flag")]
    pub done: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Session {
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub start: DateTime<Utc>,
    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    pub end: Option<DateTime<Utc>>,
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn is_false(value: &bool) -> bool {
    !value
}

fn date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).ok()
}

fn date_text(value: Option<NaiveDate>) -> String {
    value.map_or_else(String::new, |d| d.format(DATE_FORMAT).to_string())
}

fn rir(value: &str) -> Option<domain::RIR> {
    if value.trim().is_empty() {
        return None;
    }
    domain::RIR::try_from(value)
        .inspect_err(|err| debug!("ignoring stored RIR {value:?}: {err}"))
        .ok()
}

fn rir_text(value: Option<domain::RIR>) -> String {
    value.map_or_else(String::new, |r| u8::from(r).to_string())
}

/// Parses the keys of a stored map, dropping entries with invalid keys.
fn keyed<K: FromStr + Ord, V, W>(
    map: BTreeMap<String, V>,
    convert: impl Fn(V) -> W,
) -> BTreeMap<K, W> {
    map.into_iter()
        .filter_map(|(key, value)| match K::from_str(&key) {
            Ok(key) => Some((key, convert(value))),
            Err(_) => {
                debug!("ignoring stored entry with invalid key {key:?}");
                None
            }
        })
        .collect()
}

impl From<Tracker> for domain::Tracker {
    fn from(value: Tracker) -> Self {
        Self {
            plan: value.plan.into_iter().map(domain::PlanDay::from).collect(),
            measures: value
                .measures
                .into_iter()
                .map(domain::MeasurementRecord::from)
                .collect(),
            profile: value.profile.into(),
            applied_from_query: value.applied_from_query,
        }
    }
}

impl From<&domain::Tracker> for Tracker {
    fn from(value: &domain::Tracker) -> Self {
        Self {
            plan: value.plan.iter().map(PlanDay::from).collect(),
            measures: value.measures.iter().map(Measure::from).collect(),
            profile: (&value.profile).into(),
            applied_from_query: value.applied_from_query,
        }
    }
}

impl From<PlanDay> for domain::PlanDay {
    fn from(value: PlanDay) -> Self {
        Self {
            day: value.day,
            date: date(&value.date),
            title: value.title,
            focus: value.focus,
            duration: value.duration,
            prep: value.prep,
            done: value.status,
            note: value.note,
        }
    }
}

impl From<&domain::PlanDay> for PlanDay {
    fn from(value: &domain::PlanDay) -> Self {
        Self {
            day: value.day,
            date: date_text(value.date),
            title: value.title.clone(),
            focus: value.focus.clone(),
            duration: value.duration.clone(),
            prep: value.prep.clone(),
            status: value.done,
            note: value.note.clone(),
        }
    }
}

impl From<Measure> for domain::MeasurementRecord {
    fn from(value: Measure) -> Self {
        Self {
            date: date(&value.date),
            weight: value.weight,
            waist: value.waist,
            hips: value.hips,
            notes: value.notes,
            photo: value.photo,
        }
    }
}

impl From<&domain::MeasurementRecord> for Measure {
    fn from(value: &domain::MeasurementRecord) -> Self {
        Self {
            date: date_text(value.date),
            weight: value.weight.clone(),
            waist: value.waist.clone(),
            hips: value.hips.clone(),
            notes: value.notes.clone(),
            photo: value.photo.clone(),
        }
    }
}

impl From<Profile> for domain::Profile {
    fn from(value: Profile) -> Self {
        Self {
            name: value.name,
            mode: domain::Mode::from_str(&value.mode).ok(),
            level: domain::Level::from_str(&value.level).unwrap_or_default(),
            start: date(&value.start),
            days: value.days,
        }
    }
}

impl From<&domain::Profile> for Profile {
    fn from(value: &domain::Profile) -> Self {
        Self {
            name: value.name.clone(),
            mode: value
                .mode
                .map_or_else(String::new, |m| m.as_ref().to_string()),
            level: value.level.to_string(),
            start: date_text(value.start),
            days: value.days,
        }
    }
}

impl From<ProgramState> for domain::ProgramState {
    fn from(value: ProgramState) -> Self {
        Self {
            level: domain::Level::from_str(&value.level).unwrap_or_default(),
            week: value.week,
            day: value.day,
            progress: keyed(value.progress, domain::ProgressEntry::from),
            goals: keyed(value.goals, |goals| {
                goals
                    .into_iter()
                    .map(domain::Goal::from)
                    .collect::<Vec<_>>()
            }),
            work_sets: keyed(value.work_sets, |n| n),
            sessions: keyed(value.sessions, domain::WorkoutSession::from),
        }
    }
}

impl From<&domain::ProgramState> for ProgramState {
    fn from(value: &domain::ProgramState) -> Self {
        Self {
            level: value.level.to_string(),
            week: value.week,
            day: value.day,
            progress: value
                .progress
                .iter()
                .map(|(k, v)| (k.to_string(), v.into()))
                .collect(),
            goals: value
                .goals
                .iter()
                .map(|(k, v)| (k.to_string(), v.iter().map(Goal::from).collect()))
                .collect(),
            work_sets: value
                .work_sets
                .iter()
                .map(|(k, v)| (k.to_string(), *v))
                .collect(),
            sessions: value
                .sessions
                .iter()
                .map(|(k, v)| (k.to_string(), v.into()))
                .collect(),
        }
    }
}

impl From<ProgressEntry> for domain::ProgressEntry {
    fn from(value: ProgressEntry) -> Self {
        Self {
            sets: value.sets.into_iter().map(domain::SetEntry::from).collect(),
        }
    }
}

impl From<&domain::ProgressEntry> for ProgressEntry {
    fn from(value: &domain::ProgressEntry) -> Self {
        Self {
            sets: value.sets.iter().map(Set::from).collect(),
        }
    }
}

impl From<Set> for domain::SetEntry {
    fn from(value: Set) -> Self {
        Self {
            rir: rir(&value.rir),
            reps: value.reps,
            weight: value.weight,
            done: value.done,
        }
    }
}

impl From<&domain::SetEntry> for Set {
    fn from(value: &domain::SetEntry) -> Self {
        Self {
            reps: value.reps.clone(),
            weight: value.weight.clone(),
            rir: rir_text(value.rir),
            done: value.done,
        }
    }
}

impl From<Goal> for domain::Goal {
    fn from(value: Goal) -> Self {
        Self {
            text: value.text,
            done: value.done,
        }
    }
}

impl From<&domain::Goal> for Goal {
    fn from(value: &domain::Goal) -> Self {
        Self {
            text: value.text.clone(),
            done: value.done,
        }
    }
}

impl From<Session> for domain::WorkoutSession {
    fn from(value: Session) -> Self {
        Self {
            started_at: value.start,
            finished_at: value.end,
        }
    }
}

impl From<&domain::WorkoutSession> for Session {
    fn from(value: &domain::WorkoutSession) -> Self {
        Self {
            start: value.started_at,
            end: value.finished_at,
        }
    }
}

mod lenient {
    use std::collections::BTreeMap;

    use serde::{Deserialize, Deserializer, de::DeserializeOwned};
    use serde_json::Value;

    pub fn text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::String(s) => s,
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Null | Value::Array(_) | Value::Object(_) => String::new(),
        })
    }

    pub fn flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::Bool(b) => b,
            Value::String(s) => s == "true",
            Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.),
            Value::Null | Value::Array(_) | Value::Object(_) => false,
        })
    }

    pub fn number<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: TryFrom<u64> + Default,
    {
        let value = match Value::deserialize(deserializer)? {
            Value::Number(n) => n.as_u64(),
            Value::String(s) => s.trim().parse::<u64>().ok(),
            _ => None,
        };
        Ok(value
            .and_then(|v| T::try_from(v).ok())
            .unwrap_or_default())
    }

    pub fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned + Default,
    {
        Ok(serde_json::from_value(Value::deserialize(deserializer)?).unwrap_or_default())
    }

    /// Elements that cannot be decoded are skipped.
    pub fn list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::Array(values) => values
                .into_iter()
                .filter_map(|v| serde_json::from_value(v).ok())
                .collect(),
            _ => vec![],
        })
    }

    /// Elements that cannot be decoded, such as the `null` holes of a sparse array, become
    /// the default value so that the remaining elements keep their index.
    pub fn positional<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned + Default,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::Array(values) => values
                .into_iter()
                .map(|v| serde_json::from_value(v).unwrap_or_default())
                .collect(),
            _ => vec![],
        })
    }

    /// Entries that cannot be decoded are skipped.
    pub fn map<'de, D, T>(deserializer: D) -> Result<BTreeMap<String, T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::Object(values) => values
                .into_iter()
                .filter_map(|(k, v)| serde_json::from_value(v).ok().map(|v| (k, v)))
                .collect(),
            _ => BTreeMap::new(),
        })
    }
}
