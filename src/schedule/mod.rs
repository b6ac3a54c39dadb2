use std::{sync::Arc, time::Instant};

use chrono::Weekday;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    Error,
    shared::time::{Duration, MINUTES_PER_DAY, Time},
};

/// Canonical service week order used for output grouping.
pub const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

pub const fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "monday",
        Weekday::Tue => "tuesday",
        Weekday::Wed => "wednesday",
        Weekday::Thu => "thursday",
        Weekday::Fri => "friday",
        Weekday::Sat => "saturday",
        Weekday::Sun => "sunday",
    }
}

/// The one representative arrival/departure pair of a stop on a trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StopTimeBaseline {
    pub stop_id: Arc<str>,
    pub stop_name: Arc<str>,
    pub arrival: Time,
    pub departure: Time,
}

impl StopTimeBaseline {
    pub fn new(
        stop_id: impl Into<Arc<str>>,
        stop_name: impl Into<Arc<str>>,
        arrival: Time,
        departure: Time,
    ) -> Result<Self, Error> {
        let baseline = Self {
            stop_id: stop_id.into(),
            stop_name: stop_name.into(),
            arrival,
            departure,
        };
        baseline.validate()?;
        Ok(baseline)
    }

    /// Convenience constructor taking `HH:MM` strings.
    pub fn from_hm(
        stop_id: impl Into<Arc<str>>,
        stop_name: impl Into<Arc<str>>,
        arrival: &str,
        departure: &str,
    ) -> Result<Self, Error> {
        Self::new(
            stop_id,
            stop_name,
            Time::from_hm(arrival)?,
            Time::from_hm(departure)?,
        )
    }

    pub fn dwell(&self) -> Duration {
        self.departure - self.arrival
    }

    pub fn validate(&self) -> Result<(), Error> {
        let invalid = |reason: String| Error::InvalidStopTime {
            stop_id: self.stop_id.to_string(),
            reason,
        };
        if !self.arrival.is_within_day() {
            return Err(invalid(format!("arrival {} is past the service day", self.arrival)));
        }
        if !self.departure.is_within_day() {
            return Err(invalid(format!(
                "departure {} is past the service day",
                self.departure
            )));
        }
        if self.departure < self.arrival {
            return Err(invalid(format!(
                "departure {} is before arrival {}",
                self.departure, self.arrival
            )));
        }
        Ok(())
    }
}

/// Headway in minutes for each day of the week.
///
/// Signed so that zero or negative input from a form can be reported instead of
/// silently clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrequencySpec {
    pub monday: i64,
    pub tuesday: i64,
    pub wednesday: i64,
    pub thursday: i64,
    pub friday: i64,
    pub saturday: i64,
    pub sunday: i64,
}

impl FrequencySpec {
    pub const fn uniform(minutes: i64) -> Self {
        Self {
            monday: minutes,
            tuesday: minutes,
            wednesday: minutes,
            thursday: minutes,
            friday: minutes,
            saturday: minutes,
            sunday: minutes,
        }
    }

    pub fn with(mut self, weekday: Weekday, minutes: i64) -> Self {
        *self.get_mut(weekday) = minutes;
        self
    }

    pub const fn get(&self, weekday: Weekday) -> i64 {
        match weekday {
            Weekday::Mon => self.monday,
            Weekday::Tue => self.tuesday,
            Weekday::Wed => self.wednesday,
            Weekday::Thu => self.thursday,
            Weekday::Fri => self.friday,
            Weekday::Sat => self.saturday,
            Weekday::Sun => self.sunday,
        }
    }

    fn get_mut(&mut self, weekday: Weekday) -> &mut i64 {
        match weekday {
            Weekday::Mon => &mut self.monday,
            Weekday::Tue => &mut self.tuesday,
            Weekday::Wed => &mut self.wednesday,
            Weekday::Thu => &mut self.thursday,
            Weekday::Fri => &mut self.friday,
            Weekday::Sat => &mut self.saturday,
            Weekday::Sun => &mut self.sunday,
        }
    }

    /// Intervals in canonical week order, rejecting the first one that is not positive.
    pub fn intervals(&self) -> Result<[(Weekday, Duration); 7], Error> {
        let mut intervals = [(Weekday::Mon, Duration::default()); 7];
        for (slot, weekday) in intervals.iter_mut().zip(WEEKDAYS) {
            let minutes = self.get(weekday);
            if minutes <= 0 {
                return Err(Error::NonPositiveFrequency { weekday, minutes });
            }
            // Anything longer than a day runs once, same as a full day.
            let interval =
                u32::try_from(minutes).map_or(MINUTES_PER_DAY, |m| m.min(MINUTES_PER_DAY));
            *slot = (weekday, Duration::from_minutes(interval));
        }
        Ok(intervals)
    }
}

/// One generated service instance of a stop.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpandedStopTime {
    pub stop_id: Arc<str>,
    pub stop_name: Arc<str>,
    pub weekday: Weekday,
    pub arrival_time: Time,
    pub departure_time: Time,
}

/// How many instances a day gets for a stop first served at `arrival`.
pub fn repetitions(arrival: Time, interval: Duration) -> u32 {
    if interval.as_minutes() == 0 || !arrival.is_within_day() {
        return 0;
    }
    (MINUTES_PER_DAY - arrival.as_minutes()).div_ceil(interval.as_minutes())
}

/// Repeats every baseline stop-time at each weekday's interval until the day ends.
///
/// Output is grouped by stop in input order, then by weekday Monday first, then by time.
/// Each day restarts from the baseline arrival rather than carrying on from the day
/// before.
pub fn expand(
    baseline: &[StopTimeBaseline],
    frequency: &FrequencySpec,
) -> Result<Vec<ExpandedStopTime>, Error> {
    let intervals = frequency.intervals()?;
    baseline.iter().try_for_each(StopTimeBaseline::validate)?;

    let now = Instant::now();
    let per_stop: Vec<Vec<ExpandedStopTime>> = baseline
        .par_iter()
        .map(|stop_time| expand_stop(stop_time, &intervals))
        .collect();
    let expanded: Vec<ExpandedStopTime> = per_stop.into_iter().flatten().collect();
    debug!(
        "Expanding {} stop times into {} took {:?}",
        baseline.len(),
        expanded.len(),
        now.elapsed()
    );
    Ok(expanded)
}

fn expand_stop(
    stop_time: &StopTimeBaseline,
    intervals: &[(Weekday, Duration); 7],
) -> Vec<ExpandedStopTime> {
    let dwell = stop_time.dwell();
    let capacity = intervals
        .iter()
        .map(|(_, interval)| repetitions(stop_time.arrival, *interval) as usize)
        .sum();
    let mut expanded = Vec::with_capacity(capacity);
    for (weekday, interval) in intervals.iter().copied() {
        let mut time = stop_time.arrival;
        while time.is_within_day() {
            expanded.push(ExpandedStopTime {
                stop_id: stop_time.stop_id.clone(),
                stop_name: stop_time.stop_name.clone(),
                weekday,
                arrival_time: time,
                departure_time: time + dwell,
            });
            time += interval;
        }
    }
    expanded
}

#[test]
fn rejects_zero_frequency() {
    let frequency = FrequencySpec::uniform(10).with(Weekday::Wed, 0);
    assert_eq!(
        expand(&[], &frequency),
        Err(Error::NonPositiveFrequency {
            weekday: Weekday::Wed,
            minutes: 0
        })
    );
}

#[test]
fn rejects_negative_dwell() {
    let result = StopTimeBaseline::from_hm("s1", "Stop", "08:05", "08:00");
    assert!(matches!(result, Err(Error::InvalidStopTime { .. })));
}

#[test]
fn repetitions_match_ceiling() {
    assert_eq!(repetitions(Time::from_minutes(480), Duration::from_minutes(30)), 32);
    assert_eq!(repetitions(Time::from_minutes(1439), Duration::from_minutes(60)), 1);
    assert_eq!(repetitions(Time::from_minutes(0), Duration::from_minutes(7)), 206);
}
