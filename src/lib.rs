//! # geo_agent
//!
//! Assigns street segments within an administrative area to a fixed number
//! of field agents, sequences each agent's segments into a visitable route,
//! and packs the routes into a visit calendar.
//!
//! The pipeline is three independently testable stages composed in order:
//! spatial clustering of segment centroids into per-agent groups, greedy
//! nearest-neighbor sequencing within each group, and calendar packing of
//! the ordered routes onto working dates. Clustering is seeded and
//! deterministic; sequencing is a locally greedy heuristic rather than an
//! optimal tour.

pub mod cluster;
pub mod color;
pub mod config;
pub mod error;
pub mod export;
pub mod geo;
pub mod route;
pub mod schedule;
pub mod segment;

use log::info;
use std::collections::BTreeMap;

use crate::cluster::Assignments;
use crate::config::Config;
use crate::error::PlanError;
use crate::export::AssignmentRow;
use crate::schedule::Schedule;
use crate::segment::Segment;

/// Orchestrates one planning run over a fixed set of street segments.
///
/// Each run owns its data exclusively and rebuilds everything from scratch;
/// no state survives between runs. The resulting [`Plan`] is an immutable
/// snapshot for the display and export layers.
pub struct Planner {
    pub segments: Vec<Segment>,
    pub config: Config,
}

impl Planner {
    /// Create a planner for the given segments and configuration.
    pub fn new(segments: Vec<Segment>, config: Config) -> Self {
        Planner { segments, config }
    }

    /// Run the full pipeline: cluster, sequence, color, flatten, pack.
    ///
    /// An input with no usable geometry yields a `Plan` with empty maps
    /// (the "nothing to show" signal) rather than an error; only an invalid
    /// schedule configuration fails the run.
    pub fn plan(&self) -> Result<Plan, PlanError> {
        self.config.schedule.validate()?;

        let assignments = cluster::assign(
            &self.segments,
            self.config.num_agents,
            self.config.seed,
            self.config.restarts,
            self.config.max_iterations,
        );

        if assignments.is_empty() {
            info!("no segments with usable geometry; returning empty plan");
            return Ok(Plan::empty());
        }

        let routes: BTreeMap<usize, Vec<Segment>> = assignments
            .iter()
            .map(|(&agent, group)| (agent, route::sequence(group.clone())))
            .collect();

        let colors = color::assign(self.config.num_agents);
        let rows = export::rows(&routes);
        let schedule = schedule::pack(&routes, &self.config.schedule)?;

        info!(
            "planned {} segments across {} agents",
            rows.len(),
            self.config.num_agents
        );

        Ok(Plan {
            assignments,
            routes,
            colors,
            rows,
            schedule,
        })
    }
}

/// Immutable result of one planning run.
#[derive(Debug, Clone)]
pub struct Plan {
    /// Per-agent segment groups as produced by clustering (order irrelevant)
    pub assignments: Assignments,
    /// Per-agent visit-order routes, each a permutation of its group
    pub routes: BTreeMap<usize, Vec<Segment>>,
    /// Per-agent display colors
    pub colors: BTreeMap<usize, String>,
    /// Flattened projection for spreadsheet export
    pub rows: Vec<AssignmentRow>,
    /// Per-agent visit calendar
    pub schedule: Schedule,
}

impl Plan {
    fn empty() -> Self {
        Plan {
            assignments: Assignments::new(),
            routes: BTreeMap::new(),
            colors: BTreeMap::new(),
            rows: Vec::new(),
            schedule: Schedule::new(),
        }
    }

    /// Whether the run produced anything to show.
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }
}
