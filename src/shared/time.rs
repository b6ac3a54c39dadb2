use std::{
    fmt::Display,
    ops::{Add, AddAssign, Sub},
};

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

use crate::Error;

pub const MINUTES_PER_HOUR: u32 = 60;
pub const MINUTES_PER_DAY: u32 = 24 * MINUTES_PER_HOUR;

/// Minutes since midnight of the service day.
///
/// Values past [`MINUTES_PER_DAY`] are allowed and print as `24:05` and up, the way GTFS
/// writes trips that run past midnight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Time(u32);

impl From<u32> for Time {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl Sub<Time> for Time {
    type Output = Duration;

    fn sub(self, rhs: Self) -> Self::Output {
        Duration(self.0 - rhs.0)
    }
}

impl Add<Duration> for Time {
    type Output = Self;

    fn add(self, rhs: Duration) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign<Duration> for Time {
    fn add_assign(&mut self, rhs: Duration) {
        self.0 += rhs.0
    }
}

impl Display for Time {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:02}:{:02}",
            self.0 / MINUTES_PER_HOUR,
            self.0 % MINUTES_PER_HOUR
        )
    }
}

impl Serialize for Time {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Time {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Time::from_hm(&value).map_err(de::Error::custom)
    }
}

impl Time {
    pub const fn from_minutes(minutes: u32) -> Self {
        Self(minutes)
    }

    pub const fn as_minutes(&self) -> u32 {
        self.0
    }

    /// True while the time still falls inside the service day it started in.
    pub const fn is_within_day(&self) -> bool {
        self.0 < MINUTES_PER_DAY
    }

    pub fn to_hm_string(&self) -> String {
        self.to_string()
    }

    /// Parses a strict 24-hour `HH:MM` clock time.
    pub fn from_hm(time: &str) -> Result<Self, Error> {
        let malformed = || Error::MalformedTime(time.to_string());
        let (hours, minutes) = time.trim().split_once(':').ok_or_else(malformed)?;
        let hours = parse_component(hours, 24).ok_or_else(malformed)?;
        let minutes = parse_component(minutes, MINUTES_PER_HOUR).ok_or_else(malformed)?;
        Ok(Self(hours * MINUTES_PER_HOUR + minutes))
    }

    /// Parses a GTFS `HH:MM:SS` (or `HH:MM`) time, dropping seconds.
    ///
    /// Only times inside the first service day are accepted.
    pub fn from_gtfs(time: &str) -> Result<Self, Error> {
        let trimmed = time.trim().trim_matches('"');
        let mut split = trimmed.splitn(3, ':');
        let hm = match (split.next(), split.next(), split.next()) {
            (Some(hours), Some(minutes), Some(seconds)) => {
                parse_component(seconds, 60).ok_or(Error::MalformedTime(time.to_string()))?;
                format!("{hours}:{minutes}")
            }
            (Some(hours), Some(minutes), None) => format!("{hours}:{minutes}"),
            _ => return Err(Error::MalformedTime(time.to_string())),
        };
        Self::from_hm(&hm).map_err(|_| Error::MalformedTime(time.to_string()))
    }
}

fn parse_component(value: &str, limit: u32) -> Option<u32> {
    if value.is_empty() || value.len() > 2 || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let value: u32 = value.parse().ok()?;
    (value < limit).then_some(value)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Duration(u32);

impl From<u32> for Duration {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl Duration {
    pub const fn from_minutes(minutes: u32) -> Self {
        Self(minutes)
    }

    pub const fn from_hours(hours: u32) -> Self {
        Self(hours * MINUTES_PER_HOUR)
    }

    pub const fn as_minutes(&self) -> u32 {
        self.0
    }
}

impl Add for Duration {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

#[test]
fn parse_unparse_1() {
    let time = "00:00";
    let stime = Time::from_hm(time).unwrap();
    assert_eq!(time, stime.to_hm_string())
}

#[test]
fn parse_unparse_2() {
    let time = "08:05";
    let stime = Time::from_hm(time).unwrap();
    assert_eq!(time, stime.to_hm_string())
}

#[test]
fn parse_unparse_3() {
    let time = "23:59";
    let stime = Time::from_hm(time).unwrap();
    assert_eq!(time, stime.to_hm_string())
}

#[test]
fn format_past_midnight() {
    assert_eq!(Time::from_minutes(1441).to_hm_string(), "24:01")
}

#[test]
fn gtfs_time_drops_seconds() {
    assert_eq!(Time::from_gtfs("08:02:45").unwrap().as_minutes(), 482);
    assert_eq!(Time::from_gtfs("\"08:02:00\"").unwrap().as_minutes(), 482);
    assert!(Time::from_gtfs("25:00:00").is_err());
}
