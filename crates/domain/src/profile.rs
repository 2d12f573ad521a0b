use std::str::FromStr;

use chrono::NaiveDate;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};
use strum::{AsRefStr, EnumString};

use crate::{DEFAULT_DAYS, Level, MAX_DAYS};

/// Characters kept unescaped by `encodeURIComponent`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum Mode {
    Home,
    Gym,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    pub name: String,
    pub mode: Option<Mode>,
    pub level: Level,
    pub start: Option<NaiveDate>,
    pub days: u32,
}

impl Profile {
    #[must_use]
    pub fn new(today: NaiveDate) -> Self {
        Self {
            name: String::new(),
            mode: None,
            level: Level::Start,
            start: Some(today),
            days: DEFAULT_DAYS,
        }
    }

    /// Whether the settings modal still needs to be filled in.
    #[must_use]
    pub fn is_incomplete(&self) -> bool {
        self.mode.is_none() || self.start.is_none()
    }

    /// Query parameters of a personal link, omitting empty fields.
    ///
    /// The name is percent-encoded in addition to the encoding of the query string.
    #[must_use]
    pub fn share_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![];
        if let Some(mode) = self.mode {
            params.push(("mode", mode.as_ref().to_string()));
        }
        params.push(("level", self.level.to_string()));
        if let Some(start) = self.start {
            params.push(("start", start.format("%Y-%m-%d").to_string()));
        }
        if !self.name.is_empty() {
            params.push((
                "name",
                utf8_percent_encode(&self.name, URI_COMPONENT).to_string(),
            ));
        }
        if self.days > 0 {
            params.push(("days", self.days.to_string()));
        }
        params
    }
}

/// Profile values passed in the URL of a personal link.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct QuerySeed {
    pub name: Option<String>,
    pub mode: Option<Mode>,
    pub level: Option<Level>,
    pub start: Option<NaiveDate>,
    pub days: u32,
}

impl QuerySeed {
    /// Interprets query parameters. Unknown keys and invalid values are ignored.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut seed = Self {
            days: DEFAULT_DAYS,
            ..Self::default()
        };
        for (key, value) in pairs {
            let value = value.as_ref();
            match key.as_ref() {
                "name" if !value.is_empty() => seed.name = Some(decode_name(value)),
                "mode" => seed.mode = Mode::from_str(value).ok(),
                "level" => seed.level = Level::from_str(value).ok(),
                "start" => seed.start = NaiveDate::parse_from_str(value, "%Y-%m-%d").ok(),
                "days" => seed.days = parse_days(value),
                _ => {}
            }
        }
        seed
    }
}

/// Percent-decoded name, or the raw value if it is not valid percent-encoded UTF-8.
fn decode_name(value: &str) -> String {
    percent_decode_str(value)
        .decode_utf8()
        .map_or_else(|_| value.to_string(), |name| name.into_owned())
}

/// Leading integer of `value` clamped to the supported duration, or the default.
fn parse_days(value: &str) -> u32 {
    let value = value.trim();
    let (negative, unsigned) = match value.as_bytes().first() {
        Some(b'-') => (true, &value[1..]),
        Some(b'+') => (false, &value[1..]),
        _ => (false, value),
    };
    let digits = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .map_or(unsigned, |end| &unsigned[..end]);
    if digits.is_empty() {
        return DEFAULT_DAYS;
    }
    if negative {
        return 1;
    }
    digits
        .parse::<u32>()
        .map_or(MAX_DAYS, |days| days.clamp(1, MAX_DAYS))
}
