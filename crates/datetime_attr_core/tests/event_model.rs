use chrono::TimeZone;
use chrono_tz::Tz;
use datetime_attr_core::{Event, EventError, ValidationFailure};
use uuid::Uuid;

#[test]
fn event_serialization_uses_zone_annotated_timestamps() {
    let event_id = Uuid::parse_str("11111111-2222-4333-8444-555555555555").unwrap();
    let mut event = Event::with_id(event_id, "launch").unwrap();
    event.time_zone = Some("Europe/Berlin".to_string());
    event.starts_at = Some(
        Tz::Europe__Berlin
            .with_ymd_and_hms(2024, 3, 10, 15, 30, 0)
            .unwrap(),
    );

    event.read("starts_at_time").expect("time text");
    assert!(!event.binder_state().is_empty());

    let json = serde_json::to_value(&event).unwrap();
    assert_eq!(json["uuid"], event_id.to_string());
    assert_eq!(json["title"], "launch");
    assert_eq!(json["starts_at"], "2024-03-10T15:30:00+01:00[Europe/Berlin]");
    assert!(json["ends_at"].is_null());
    assert_eq!(json["time_zone"], "Europe/Berlin");
    assert!(json.get("date_time_state").is_none());

    let decoded: Event = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, event);
    assert!(decoded.binder_state().is_empty());
    assert_eq!(
        decoded.starts_at.map(|value| value.timezone()),
        Some(Tz::Europe__Berlin)
    );
}

#[test]
fn missing_timestamps_decode_as_absent() {
    let json = serde_json::json!({
        "uuid": "11111111-2222-4333-8444-555555555555",
        "title": "draft",
        "time_zone": null
    });

    let decoded: Event = serde_json::from_value(json).unwrap();
    assert_eq!(decoded.starts_at, None);
    assert_eq!(decoded.ends_at, None);
}

#[test]
fn bare_rfc3339_decodes_in_utc() {
    let json = serde_json::json!({
        "uuid": "11111111-2222-4333-8444-555555555555",
        "title": "import",
        "starts_at": "2024-03-10T14:30:00Z",
        "time_zone": null
    });

    let decoded: Event = serde_json::from_value(json).unwrap();
    assert_eq!(
        decoded.starts_at,
        Some(Tz::UTC.with_ymd_and_hms(2024, 3, 10, 14, 30, 0).unwrap())
    );
}

#[test]
fn malformed_timestamp_fails_to_decode() {
    let json = serde_json::json!({
        "uuid": "11111111-2222-4333-8444-555555555555",
        "title": "broken",
        "starts_at": "yesterday",
        "time_zone": null
    });

    assert!(serde_json::from_value::<Event>(json).is_err());
}

#[test]
fn attribute_table_is_shared_across_events() {
    let first = Event::attributes().expect("declaration");
    let second = Event::attributes().expect("declaration");

    assert!(std::ptr::eq(first, second));
    assert_eq!(first.len(), 2);
    assert!(first.binder("starts_at").is_some());
    assert!(first.binder("ends_at").is_some());
}

#[test]
fn validate_reports_field_failures() {
    let mut event = Event::new("standup");
    event
        .assign("starts_at_time_value", Some("25:99"))
        .expect("raw setter never fails");

    match event.validate().expect_err("invalid time") {
        EventError::Fields(errors) => {
            assert_eq!(errors.get("starts_at"), &[ValidationFailure::InvalidTime]);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn zone_change_on_event_changes_local_view() {
    let mut event = Event::new("call");
    event.starts_at = Some(Tz::UTC.with_ymd_and_hms(2024, 8, 1, 12, 0, 0).unwrap());

    assert_eq!(
        event.read("starts_at_time").expect("utc view"),
        Some("12:00".to_string())
    );

    event.time_zone = Some("America/Los_Angeles".to_string());
    assert_eq!(
        event.read("starts_at_time").expect("pacific view"),
        Some("05:00".to_string())
    );
    assert_eq!(
        event.read("starts_at_time_zone").expect("zone"),
        Some("America/Los_Angeles".to_string())
    );
}

#[test]
fn direct_writes_to_the_record_are_picked_up() {
    let mut event = Event::new("moved");
    event.time_zone = Some("UTC".to_string());
    event.starts_at = Some(Tz::UTC.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap());
    assert_eq!(
        event.read("starts_at_date").expect("date"),
        Some("2024-01-01".to_string())
    );

    event.starts_at = Some(Tz::UTC.with_ymd_and_hms(2025, 6, 15, 18, 0, 0).unwrap());
    assert_eq!(
        event.read("starts_at_date").expect("date"),
        Some("2025-06-15".to_string())
    );
    assert_eq!(
        event.read("starts_at_time").expect("time"),
        Some("18:00".to_string())
    );

    event
        .assign("starts_at_time", Some("10:00"))
        .expect("time setter");
    assert_eq!(
        event.starts_at,
        Some(Tz::UTC.with_ymd_and_hms(2025, 6, 15, 10, 0, 0).unwrap())
    );
}

#[test]
fn direct_clear_drops_the_cached_value() {
    let mut event = Event::new("dropped");
    event.starts_at = Some(Tz::UTC.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap());
    event.read("starts_at_time").expect("time");

    event.starts_at = None;
    assert_eq!(event.read("starts_at_date").expect("date"), None);
    assert_eq!(event.read("starts_at_time").expect("time"), None);

    event
        .assign("starts_at_time", Some("10:00"))
        .expect("time setter");
    assert_eq!(event.starts_at, None);
}
