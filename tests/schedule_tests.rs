use chrono::Weekday;
use routesmith::{
    Error,
    schedule::{
        ExpandedStopTime, FrequencySpec, StopTimeBaseline, WEEKDAYS, expand, repetitions,
    },
    shared::{Duration, Time},
};

fn baseline() -> Vec<StopTimeBaseline> {
    vec![
        StopTimeBaseline::from_hm("S1", "Central Station", "08:00", "08:02").unwrap(),
        StopTimeBaseline::from_hm("S2", "Lambton Quay", "08:10", "08:10").unwrap(),
    ]
}

fn monday(expanded: &[ExpandedStopTime], stop_id: &str) -> Vec<(String, String)> {
    expanded
        .iter()
        .filter(|stop_time| stop_time.weekday == Weekday::Mon && &*stop_time.stop_id == stop_id)
        .map(|stop_time| {
            (
                stop_time.arrival_time.to_string(),
                stop_time.departure_time.to_string(),
            )
        })
        .collect()
}

#[test]
fn half_hourly_monday() {
    let baseline = vec![StopTimeBaseline::from_hm("S1", "Central", "08:00", "08:02").unwrap()];
    let frequency = FrequencySpec::uniform(60).with(Weekday::Mon, 30);
    let expanded = expand(&baseline, &frequency).unwrap();

    let instances = monday(&expanded, "S1");
    assert_eq!(instances.len(), 32);
    assert_eq!(instances[0], ("08:00".to_string(), "08:02".to_string()));
    assert_eq!(instances[1], ("08:30".to_string(), "08:32".to_string()));
    assert_eq!(
        instances.last().unwrap(),
        &("23:30".to_string(), "23:32".to_string())
    );
}

#[test]
fn counts_follow_ceiling_formula() {
    let frequency = FrequencySpec {
        monday: 30,
        tuesday: 45,
        wednesday: 7,
        thursday: 60,
        friday: 1,
        saturday: 120,
        sunday: 1439,
    };
    let baseline = baseline();
    let expanded = expand(&baseline, &frequency).unwrap();
    for stop in &baseline {
        for weekday in WEEKDAYS {
            let interval = frequency.get(weekday);
            let count = expanded
                .iter()
                .filter(|stop_time| {
                    stop_time.stop_id == stop.stop_id && stop_time.weekday == weekday
                })
                .count() as i64;
            let expected = (1440 - stop.arrival.as_minutes() as i64 + interval - 1) / interval;
            assert_eq!(count, expected, "{} on {weekday}", stop.stop_id);
            assert_eq!(
                count as u32,
                repetitions(stop.arrival, Duration::from_minutes(interval as u32))
            );
        }
    }
}

#[test]
fn dwell_is_preserved() {
    let baseline = vec![
        StopTimeBaseline::from_hm("S1", "A", "08:00", "08:02").unwrap(),
        StopTimeBaseline::from_hm("S2", "B", "23:50", "23:59").unwrap(),
    ];
    let expanded = expand(&baseline, &FrequencySpec::uniform(13)).unwrap();
    for stop_time in &expanded {
        let dwell = stop_time.departure_time - stop_time.arrival_time;
        let expected = if &*stop_time.stop_id == "S1" { 2 } else { 9 };
        assert_eq!(dwell.as_minutes(), expected);
        assert!(stop_time.arrival_time.is_within_day());
    }
}

#[test]
fn departure_may_run_past_midnight() {
    let baseline = vec![StopTimeBaseline::from_hm("S1", "A", "23:55", "23:58").unwrap()];
    let expanded = expand(&baseline, &FrequencySpec::uniform(2)).unwrap();
    let monday = monday(&expanded, "S1");
    assert_eq!(
        monday,
        vec![
            ("23:55".to_string(), "23:58".to_string()),
            ("23:57".to_string(), "24:00".to_string()),
            ("23:59".to_string(), "24:02".to_string()),
        ]
    );
}

#[test]
fn output_is_grouped_by_stop_then_weekday_then_time() {
    let baseline = baseline();
    let expanded = expand(&baseline, &FrequencySpec::uniform(240)).unwrap();

    let stop_order: Vec<&str> = expanded
        .iter()
        .map(|stop_time| &*stop_time.stop_id)
        .collect::<Vec<_>>()
        .chunk_by(|a, b| a == b)
        .map(|chunk| chunk[0])
        .collect();
    assert_eq!(stop_order, vec!["S1", "S2"]);

    for window in expanded.windows(2) {
        let (a, b) = (&window[0], &window[1]);
        if a.stop_id != b.stop_id {
            continue;
        }
        let day_a = a.weekday.num_days_from_monday();
        let day_b = b.weekday.num_days_from_monday();
        assert!(day_a <= day_b);
        if day_a == day_b {
            assert!(a.arrival_time < b.arrival_time);
        }
    }
}

#[test]
fn each_day_restarts_from_baseline() {
    let baseline = vec![StopTimeBaseline::from_hm("S1", "A", "05:00", "05:00").unwrap()];
    let expanded = expand(&baseline, &FrequencySpec::uniform(37)).unwrap();
    for weekday in WEEKDAYS {
        let first = expanded
            .iter()
            .find(|stop_time| stop_time.weekday == weekday)
            .unwrap();
        assert_eq!(first.arrival_time, Time::from_minutes(300));
    }
}

#[test]
fn expansion_is_deterministic() {
    let baseline = baseline();
    let frequency = FrequencySpec::uniform(17).with(Weekday::Sun, 90);
    assert_eq!(
        expand(&baseline, &frequency).unwrap(),
        expand(&baseline, &frequency).unwrap()
    );
}

#[test]
fn negative_frequency_is_rejected() {
    let frequency = FrequencySpec::uniform(15).with(Weekday::Sat, -5);
    assert_eq!(
        expand(&baseline(), &frequency),
        Err(Error::NonPositiveFrequency {
            weekday: Weekday::Sat,
            minutes: -5
        })
    );
}

#[test]
fn baseline_outside_day_is_rejected() {
    let result = StopTimeBaseline::new(
        "S1",
        "A",
        Time::from_minutes(1440),
        Time::from_minutes(1441),
    );
    assert!(matches!(result, Err(Error::InvalidStopTime { .. })));
    assert_eq!(
        StopTimeBaseline::from_hm("S1", "A", "8:xx", "09:00"),
        Err(Error::MalformedTime("8:xx".to_string()))
    );
}

#[test]
fn empty_baseline_expands_to_nothing() {
    assert!(expand(&[], &FrequencySpec::uniform(5)).unwrap().is_empty());
}
