//! Packing ordered routes into a visit calendar.

use chrono::{Datelike, Duration, NaiveDate};
use itertools::Itertools;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::config::ScheduleConfig;
use crate::error::PlanError;
use crate::segment::Segment;

/// Upper bound on the forward calendar walk. Generous enough for any real
/// schedule; it exists so a violated precondition cannot loop forever.
const MAX_HORIZON_DAYS: u32 = 3650;

/// One working day's batch of visits for an agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub date: NaiveDate,
    /// Street names in visit order for this day
    pub streets: Vec<String>,
}

/// Per-agent visit calendar, keyed by 0-based agent index.
pub type Schedule = BTreeMap<usize, Vec<ScheduleEntry>>;

/// Split each agent's ordered route into daily batches mapped onto working
/// calendar dates.
///
/// Per agent the route is chunked into consecutive runs of
/// `segments_per_day` (the last chunk may be shorter) and chunk *i* lands on
/// the *i*-th date at or after `start_date` whose weekday is a working day.
/// Concatenating the batches in date order reproduces the route's name
/// sequence exactly.
///
/// The configuration must pass [`ScheduleConfig::validate`]; it is checked
/// here as well so the packer can never enter an unbounded walk.
pub fn pack(
    routes: &BTreeMap<usize, Vec<Segment>>,
    config: &ScheduleConfig,
) -> Result<Schedule, PlanError> {
    config.validate()?;

    let mut schedule = Schedule::new();

    for (&agent, route) in routes {
        let required_days = route.len().div_ceil(config.segments_per_day);
        let dates = collect_working_dates(config, required_days)?;

        let chunks = route.iter().chunks(config.segments_per_day);
        let entries = dates
            .into_iter()
            .zip(&chunks)
            .map(|(date, chunk)| ScheduleEntry {
                date,
                streets: chunk.map(|s| s.name.clone()).collect(),
            })
            .collect::<Vec<_>>();

        debug!(
            "agent {}: {} segments packed into {} working days",
            agent,
            route.len(),
            entries.len()
        );
        schedule.insert(agent, entries);
    }

    Ok(schedule)
}

/// Walk forward one calendar day at a time from the start date, collecting
/// dates whose weekday is a working day, until `count` dates are found.
fn collect_working_dates(
    config: &ScheduleConfig,
    count: usize,
) -> Result<Vec<NaiveDate>, PlanError> {
    let mut dates = Vec::with_capacity(count);
    let mut current = config.start_date;
    let mut walked = 0u32;

    while dates.len() < count {
        if walked > MAX_HORIZON_DAYS {
            return Err(PlanError::HorizonExceeded {
                days: MAX_HORIZON_DAYS,
            });
        }
        if config.working_days.contains(&current.weekday()) {
            dates.push(current);
        }
        current += Duration::days(1);
        walked += 1;
    }

    Ok(dates)
}
