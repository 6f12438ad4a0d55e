//! Unit tests for the calendar packer.

use chrono::{Datelike, NaiveDate, Weekday};
use geo_agent::config::ScheduleConfig;
use geo_agent::error::PlanError;
use geo_agent::schedule;
use geo_agent::segment::{Segment, Vertex};
use std::collections::BTreeMap;

fn named_segments(names: &[&str]) -> Vec<Segment> {
    names
        .iter()
        .enumerate()
        .map(|(i, name)| Segment::new(*name, vec![Vertex::new(18.48 + i as f64 * 0.01, -69.91)]))
        .collect()
}

fn monday() -> NaiveDate {
    // 2026-01-05 is a Monday
    let date = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
    assert_eq!(date.weekday(), Weekday::Mon);
    date
}

#[test]
fn test_seven_segments_three_per_day_mon_wed_fri() {
    let names = ["S1", "S2", "S3", "S4", "S5", "S6", "S7"];
    let mut routes = BTreeMap::new();
    routes.insert(0usize, named_segments(&names));

    let config = ScheduleConfig::new([Weekday::Mon, Weekday::Wed, Weekday::Fri], monday(), 3);
    let schedule = schedule::pack(&routes, &config).unwrap();

    let entries = &schedule[&0];

    // ceil(7/3) = 3 working days: the Monday, the following Wednesday and Friday
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0].date, NaiveDate::from_ymd_opt(2026, 1, 5).unwrap());
    assert_eq!(entries[1].date, NaiveDate::from_ymd_opt(2026, 1, 7).unwrap());
    assert_eq!(entries[2].date, NaiveDate::from_ymd_opt(2026, 1, 9).unwrap());

    // Chunk sizes [3, 3, 1]
    assert_eq!(entries[0].streets, vec!["S1", "S2", "S3"]);
    assert_eq!(entries[1].streets, vec!["S4", "S5", "S6"]);
    assert_eq!(entries[2].streets, vec!["S7"]);
}

#[test]
fn test_schedule_reconstructs_route_order() {
    let names = ["A", "B", "C", "D", "E", "F", "G", "H"];
    let mut routes = BTreeMap::new();
    routes.insert(0usize, named_segments(&names));

    let config = ScheduleConfig::new([Weekday::Tue, Weekday::Thu], monday(), 3);
    let schedule = schedule::pack(&routes, &config).unwrap();

    let reconstructed: Vec<String> = schedule[&0]
        .iter()
        .flat_map(|entry| entry.streets.clone())
        .collect();
    assert_eq!(reconstructed, names);

    // Entries come out in date order
    let entries = &schedule[&0];
    for pair in entries.windows(2) {
        assert!(pair[0].date < pair[1].date);
    }
}

#[test]
fn test_start_on_non_working_day_skips_forward() {
    // 2026-01-03 is a Saturday; the first Monday after it is 2026-01-05
    let saturday = NaiveDate::from_ymd_opt(2026, 1, 3).unwrap();
    assert_eq!(saturday.weekday(), Weekday::Sat);

    let mut routes = BTreeMap::new();
    routes.insert(0usize, named_segments(&["A", "B"]));

    let config = ScheduleConfig::new([Weekday::Mon], saturday, 2);
    let schedule = schedule::pack(&routes, &config).unwrap();

    assert_eq!(schedule[&0].len(), 1);
    assert_eq!(schedule[&0][0].date, NaiveDate::from_ymd_opt(2026, 1, 5).unwrap());
}

#[test]
fn test_start_date_itself_counts_when_working() {
    let mut routes = BTreeMap::new();
    routes.insert(0usize, named_segments(&["A"]));

    let config = ScheduleConfig::new([Weekday::Mon], monday(), 1);
    let schedule = schedule::pack(&routes, &config).unwrap();

    assert_eq!(schedule[&0][0].date, monday());
}

#[test]
fn test_empty_routes_map_yields_empty_schedule() {
    let routes: BTreeMap<usize, Vec<Segment>> = BTreeMap::new();
    let config = ScheduleConfig::new(
        [Weekday::Mon, Weekday::Tue, Weekday::Wed, Weekday::Thu, Weekday::Fri],
        monday(),
        3,
    );

    let schedule = schedule::pack(&routes, &config).unwrap();
    assert!(schedule.is_empty());
}

#[test]
fn test_agent_with_empty_route_gets_no_entries() {
    let mut routes = BTreeMap::new();
    routes.insert(0usize, named_segments(&["A"]));
    routes.insert(1usize, Vec::new());

    let config = ScheduleConfig::new([Weekday::Mon], monday(), 3);
    let schedule = schedule::pack(&routes, &config).unwrap();

    assert_eq!(schedule[&0].len(), 1);
    assert!(schedule[&1].is_empty());
}

#[test]
fn test_route_exceeding_calendar_horizon_is_rejected() {
    // A valid configuration can still exhaust the bounded walk: one working
    // weekday per week holds at most ~521 visits within the horizon, so a
    // 600-day route at one segment per Monday cannot be packed.
    let names: Vec<String> = (0..600).map(|i| format!("S{}", i)).collect();
    let name_refs: Vec<&str> = names.iter().map(String::as_str).collect();
    let mut routes = BTreeMap::new();
    routes.insert(0usize, named_segments(&name_refs));

    let config = ScheduleConfig::new([Weekday::Mon], monday(), 1);
    let result = schedule::pack(&routes, &config);

    assert!(matches!(result, Err(PlanError::HorizonExceeded { days: 3650 })));
}

#[test]
fn test_no_working_days_is_rejected() {
    let mut routes = BTreeMap::new();
    routes.insert(0usize, named_segments(&["A"]));

    let config = ScheduleConfig::new([], monday(), 3);
    let result = schedule::pack(&routes, &config);

    assert!(matches!(result, Err(PlanError::InvalidSchedule(_))));
}

#[test]
fn test_zero_segments_per_day_is_rejected() {
    let mut routes = BTreeMap::new();
    routes.insert(0usize, named_segments(&["A"]));

    let config = ScheduleConfig::new([Weekday::Mon], monday(), 0);
    let result = schedule::pack(&routes, &config);

    assert!(matches!(result, Err(PlanError::InvalidSchedule(_))));
}

#[test]
fn test_validate_accepts_sane_config() {
    let config = ScheduleConfig::new([Weekday::Mon], monday(), 1);
    assert!(config.validate().is_ok());
}
