//! Flattened tabular projection of a plan for spreadsheet export.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::Write;

use crate::error::PlanError;
use crate::segment::Segment;

/// One spreadsheet row: a segment with its assignment and visit order.
///
/// Agent and order are 1-based here, the user-facing convention; everything
/// upstream of the export boundary is 0-based.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignmentRow {
    pub street: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub agent: usize,
    pub order: usize,
}

/// Flatten per-agent ordered routes into export rows.
///
/// Rows appear grouped by agent in agent order, each group in visit order.
pub fn rows(routes: &BTreeMap<usize, Vec<Segment>>) -> Vec<AssignmentRow> {
    let mut result = Vec::new();

    for (&agent, route) in routes {
        for (i, segment) in route.iter().enumerate() {
            let centroid = segment.centroid();
            result.push(AssignmentRow {
                street: segment.name.clone(),
                latitude: centroid.map(|c| c.0),
                longitude: centroid.map(|c| c.1),
                agent: agent + 1,
                order: i + 1,
            });
        }
    }

    result
}

/// Write export rows as CSV with a header record.
pub fn write_csv<W: Write>(rows: &[AssignmentRow], writer: W) -> Result<(), PlanError> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;

    Ok(())
}
