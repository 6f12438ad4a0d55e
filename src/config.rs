//! Configuration parameters for the planning pipeline.

use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::PlanError;

/// Configuration for one planning run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Number of field agents to partition the segments across
    pub num_agents: usize,
    /// Fixed seed for the clustering RNG; identical inputs and seed yield
    /// identical partitions
    pub seed: u64,
    /// Number of independent k-means restarts; the labeling with the lowest
    /// inertia wins
    pub restarts: usize,
    /// Iteration cap for each k-means run
    pub max_iterations: usize,
    /// Calendar packing parameters
    pub schedule: ScheduleConfig,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            num_agents: 3,
            seed: 42,
            restarts: 10,
            max_iterations: 300,
            schedule: ScheduleConfig::default(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Config::default()
    }

    /// Set the number of agents.
    pub fn with_num_agents(mut self, n: usize) -> Self {
        self.num_agents = n;
        self
    }

    /// Set the clustering RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the number of k-means restarts.
    pub fn with_restarts(mut self, restarts: usize) -> Self {
        self.restarts = restarts;
        self
    }

    /// Set the k-means iteration cap.
    pub fn with_max_iterations(mut self, iterations: usize) -> Self {
        self.max_iterations = iterations;
        self
    }

    /// Set the calendar packing parameters.
    pub fn with_schedule(mut self, schedule: ScheduleConfig) -> Self {
        self.schedule = schedule;
        self
    }
}

/// Parameters for packing an ordered route into a visit calendar.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleConfig {
    /// Weekdays on which visits take place
    pub working_days: HashSet<Weekday>,
    /// First calendar day considered for the schedule
    pub start_date: NaiveDate,
    /// How many segments an agent visits per working day
    pub segments_per_day: usize,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        ScheduleConfig {
            working_days: [
                Weekday::Mon,
                Weekday::Tue,
                Weekday::Wed,
                Weekday::Thu,
                Weekday::Fri,
            ]
            .into_iter()
            .collect(),
            start_date: chrono::Local::now().date_naive(),
            segments_per_day: 3,
        }
    }
}

impl ScheduleConfig {
    /// Create a schedule configuration with the given parameters.
    pub fn new(
        working_days: impl IntoIterator<Item = Weekday>,
        start_date: NaiveDate,
        segments_per_day: usize,
    ) -> Self {
        ScheduleConfig {
            working_days: working_days.into_iter().collect(),
            start_date,
            segments_per_day,
        }
    }

    /// Reject configurations under which the calendar walk could never
    /// collect a working date or never drain a route.
    pub fn validate(&self) -> Result<(), PlanError> {
        if self.working_days.is_empty() {
            return Err(PlanError::InvalidSchedule(
                "at least one working weekday is required".to_string(),
            ));
        }
        if self.segments_per_day == 0 {
            return Err(PlanError::InvalidSchedule(
                "segments per day must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
