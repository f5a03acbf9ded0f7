//! Tests for the date window and page filter

use super::*;
use chrono::TimeZone;
use pretty_assertions::assert_eq;

fn utc(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
}

#[test]
fn test_parse_plain_date() {
    let window = DateWindow::parse("2025-12-13").unwrap();
    assert_eq!(window.start, utc("2025-12-13T00:00:00Z"));
    assert_eq!(
        window.end,
        Utc.with_ymd_and_hms(2025, 12, 13, 23, 59, 59).unwrap()
            + chrono::Duration::nanoseconds(999_999_999)
    );
}

#[test]
fn test_parse_rfc3339() {
    // Time-of-day and offset collapse to the same UTC calendar day.
    let window = DateWindow::parse("2025-12-13T10:30:00Z").unwrap();
    assert_eq!(window.start, utc("2025-12-13T00:00:00Z"));

    let offset = DateWindow::parse("2025-12-13T01:00:00+00:00").unwrap();
    assert_eq!(offset, window);
}

#[test]
fn test_parse_invalid_date() {
    let err = DateWindow::parse("13/12/2025").unwrap_err();
    assert!(matches!(err, Error::InvalidDateFormat { .. }));
    assert!(DateWindow::parse("").is_err());
    assert!(DateWindow::parse("2025-13-40").is_err());
}

#[test]
fn test_contains_is_strict() {
    let window = DateWindow::parse("2025-12-13").unwrap();
    assert!(!window.contains(window.start));
    assert!(!window.contains(window.end));
    assert!(window.contains(utc("2025-12-13T00:00:01Z")));
    assert!(window.contains(utc("2025-12-13T23:59:59Z")));
    assert!(!window.contains(utc("2025-12-12T23:59:59Z")));
    assert!(!window.contains(utc("2025-12-14T00:00:00Z")));
}

#[test]
fn test_filter_page_keeps_in_window_events() {
    let window = DateWindow::parse("2025-12-13").unwrap();
    let events = vec![
        utc("2025-12-13T18:00:00Z"),
        utc("2025-12-13T09:00:00Z"),
        utc("2025-12-13T01:00:00Z"),
    ];

    let (kept, stop) = filter_page(events.clone(), &window, |t| Some(*t));
    assert_eq!(kept, events);
    assert!(!stop);
}

#[test]
fn test_filter_page_stops_at_older_event() {
    let window = DateWindow::parse("2025-12-13").unwrap();
    let events = vec![
        utc("2025-12-13T12:00:00Z"),
        utc("2025-12-12T23:00:00Z"), // older than the window — scan ends here
        utc("2025-12-13T11:00:00Z"), // never reached
    ];

    let (kept, stop) = filter_page(events, &window, |t| Some(*t));
    assert_eq!(kept, vec![utc("2025-12-13T12:00:00Z")]);
    assert!(stop);
}

#[test]
fn test_filter_page_excludes_exact_boundary() {
    let window = DateWindow::parse("2025-12-13").unwrap();
    let events = vec![utc("2025-12-13T00:00:00Z")];

    let (kept, stop) = filter_page(events, &window, |t| Some(*t));
    assert!(kept.is_empty());
    // Start-of-day is not older than the start, so no stop either.
    assert!(!stop);
}

#[test]
fn test_filter_page_skips_unparseable_timestamps() {
    let window = DateWindow::parse("2025-12-13").unwrap();
    let events = vec![
        Some(utc("2025-12-13T12:00:00Z")),
        None,
        Some(utc("2025-12-13T11:00:00Z")),
    ];

    let (kept, stop) = filter_page(events, &window, |t| *t);
    assert_eq!(kept.len(), 2);
    assert!(!stop);
}

#[test]
fn test_filter_page_is_idempotent() {
    let window = DateWindow::parse("2025-12-13").unwrap();
    let events = vec![
        utc("2025-12-13T18:00:00Z"),
        utc("2025-12-13T00:00:00Z"),
        utc("2025-12-13T09:00:00Z"),
    ];

    let (once, _) = filter_page(events, &window, |t| Some(*t));
    let (twice, stop) = filter_page(once.clone(), &window, |t| Some(*t));
    assert_eq!(once, twice);
    assert!(!stop);
}

#[test]
fn test_future_events_do_not_stop_pagination() {
    // Newer-than-window events (page ordering puts them first) are
    // dropped without ending the scan.
    let window = DateWindow::parse("2025-12-13").unwrap();
    let events = vec![
        utc("2025-12-14T01:00:00Z"),
        utc("2025-12-13T22:00:00Z"),
    ];

    let (kept, stop) = filter_page(events, &window, |t| Some(*t));
    assert_eq!(kept, vec![utc("2025-12-13T22:00:00Z")]);
    assert!(!stop);
}
