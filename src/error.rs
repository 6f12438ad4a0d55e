//! Error taxonomy for the planning pipeline.
//!
//! Everything here is recoverable and reportable: an empty or partial plan
//! is the worst acceptable outcome. Empty input and degenerate clustering
//! are deliberately *not* errors; they surface as empty maps instead.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlanError {
    /// Schedule configuration that would make the calendar walk unsatisfiable.
    #[error("invalid schedule configuration: {0}")]
    InvalidSchedule(String),

    /// The bounded calendar walk ran out of days before collecting enough
    /// working dates. Only reachable when the schedule precondition was
    /// violated upstream.
    #[error("calendar walk exceeded the {days}-day horizon")]
    HorizonExceeded { days: u32 },

    /// Upstream segment records could not be parsed.
    #[error("failed to parse segment records: {0}")]
    Parse(#[from] serde_json::Error),

    /// The CSV export sink rejected a record.
    #[error("failed to write export rows: {0}")]
    Csv(#[from] csv::Error),

    /// The export sink failed at the I/O level.
    #[error("export I/O error: {0}")]
    Io(#[from] std::io::Error),
}
