use chrono::{TimeZone, Utc};
use chrono_tz::Tz;
use datetime_attr_core::{
    submit_event_form, DateTimeError, Event, EventError, ValidationFailure,
};

#[test]
fn form_fields_schedule_an_event_in_its_zone() {
    let mut event = Event::new("release review");
    event.time_zone = Some("Europe/Berlin".to_string());

    let submission = submit_event_form(
        &mut event,
        [
            ("title", Some("ignored by the binder")),
            ("starts_at_date_value", Some("2024-03-10")),
            ("starts_at_time_value", Some("14:30")),
            ("ends_at_date_value", Some("2024-03-10")),
            ("ends_at_time_value", Some("16:00")),
        ],
    )
    .expect("submission should succeed");

    assert!(submission.is_valid());
    assert_eq!(submission.ignored_fields, vec!["title".to_string()]);
    assert_eq!(
        event.starts_at,
        Some(Tz::Europe__Berlin.with_ymd_and_hms(2024, 3, 10, 14, 30, 0).unwrap())
    );
    assert_eq!(
        event.ends_at.expect("ends_at set"),
        Utc.with_ymd_and_hms(2024, 3, 10, 15, 0, 0).unwrap()
    );
    assert_eq!(
        event.read("ends_at_time").expect("time text"),
        Some("16:00".to_string())
    );
}

#[test]
fn reversed_window_is_rejected_after_field_checks() {
    let mut event = Event::new("backwards");
    let err = submit_event_form(
        &mut event,
        [
            ("starts_at_date_value", Some("2024-03-10")),
            ("starts_at_time_value", Some("18:00")),
            ("ends_at_date_value", Some("2024-03-10")),
            ("ends_at_time_value", Some("09:00")),
        ],
    )
    .expect_err("window check should fail");

    assert!(matches!(err, EventError::InvalidEventWindow { .. }));
}

#[test]
fn invalid_raw_fields_come_back_as_validation_errors() {
    let mut event = Event::new("typos");
    let submission = submit_event_form(
        &mut event,
        [
            ("starts_at_date_value", Some("2024-02-30")),
            ("starts_at_time_value", Some("10:00")),
            ("ends_at_date_value", Some("2024-03-01")),
            ("ends_at_time_value", Some("half past")),
        ],
    )
    .expect("raw fields never abort");

    assert!(!submission.is_valid());
    assert_eq!(
        submission.errors.get("starts_at"),
        &[ValidationFailure::InvalidDate]
    );
    assert_eq!(
        submission.errors.get("ends_at"),
        &[ValidationFailure::InvalidTime]
    );
    assert_eq!(
        submission.errors.full_messages(),
        vec!["ends_at is not a valid time", "starts_at is not a valid date"]
    );
    assert_eq!(
        event.read("starts_at_date_value").expect("raw date"),
        Some("2024-02-30".to_string())
    );
}

#[test]
fn blank_sub_fields_clear_a_scheduled_event() {
    let mut event = Event::new("cancelled");
    event.starts_at = Some(Tz::UTC.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap());

    let submission = submit_event_form(
        &mut event,
        [
            ("starts_at_date_value", Some("")),
            ("starts_at_time_value", Some("")),
        ],
    )
    .expect("submission should succeed");

    assert!(submission.is_valid());
    assert_eq!(event.starts_at, None);
}

#[test]
fn strict_fields_propagate_errors() {
    let mut event = Event::new("strict");

    let err = submit_event_form(&mut event, [("starts_at_date", Some("garbage"))])
        .expect_err("strict date setter fails");
    assert_eq!(
        err,
        EventError::DateTime(DateTimeError::DateParse {
            input: "garbage".to_string()
        })
    );

    let err = submit_event_form(&mut event, [("starts_at_time_zone", Some("Nowhere/City"))])
        .expect_err("unknown zone fails");
    assert_eq!(
        err,
        EventError::DateTime(DateTimeError::InvalidSpecification(
            "Nowhere/City".to_string()
        ))
    );
}
