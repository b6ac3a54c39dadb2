use routesmith::{Error, shared::Time};

#[test]
fn valid_time_test_1() {
    assert_eq!(Time::from_hm("00:00").unwrap().as_minutes(), 0);
}

#[test]
fn valid_time_test_2() {
    assert_eq!(Time::from_hm("08:02").unwrap().as_minutes(), 482);
}

#[test]
fn valid_time_test_3() {
    assert_eq!(Time::from_hm("23:59").unwrap().as_minutes(), 1439);
}

#[test]
fn valid_time_test_4() {
    assert_eq!(Time::from_hm("7:05").unwrap().as_minutes(), 425);
}

#[test]
fn format_pads_components() {
    assert_eq!(Time::from_minutes(65).to_string(), "01:05");
    assert_eq!(Time::from_minutes(0).to_hm_string(), "00:00");
}

#[test]
fn format_then_parse() {
    for minutes in (0..1440).step_by(7) {
        let time = Time::from_minutes(minutes);
        assert_eq!(Time::from_hm(&time.to_string()).unwrap(), time);
    }
}

#[test]
fn invalid_time_test_1() {
    assert_eq!(
        Time::from_hm("08:0a"),
        Err(Error::MalformedTime("08:0a".to_string()))
    );
}

#[test]
fn invalid_time_test_2() {
    assert!(Time::from_hm("0800").is_err());
}

#[test]
fn invalid_time_test_3() {
    assert!(Time::from_hm("24:00").is_err());
    assert!(Time::from_hm("12:60").is_err());
}

#[test]
fn invalid_time_test_4() {
    assert!(Time::from_hm("").is_err());
    assert!(Time::from_hm("-1:30").is_err());
    assert!(Time::from_hm("08:00:00").is_err());
}
