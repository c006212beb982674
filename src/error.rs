//! Crate error type.

use thiserror::Error;

use crate::validation::ValidationError;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, ScheduleError>;

/// Errors raised by the simulator.
///
/// Configuration and input errors are detected before a run starts.
/// `InvariantViolation` indicates a scheduler bug and is never corrected.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScheduleError {
    /// A configuration value is out of range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The unit pool is empty.
    #[error("No execution units available")]
    NoExecutionUnits,

    /// The workload is empty.
    #[error("No jobs to schedule")]
    EmptyWorkload,

    /// Structural problems in the jobs or units.
    #[error("Invalid input: {} problem(s), first: {}", .0.len(), first_message(.0))]
    InvalidInput(Vec<ValidationError>),

    /// Time or work bookkeeping went inconsistent.
    #[error("Invariant violated for job {job_id}: {detail}")]
    InvariantViolation {
        /// Offending job.
        job_id: u64,
        /// What went wrong.
        detail: String,
    },

    /// Export of results failed.
    #[error("Report error: {0}")]
    Report(String),
}

fn first_message(errors: &[ValidationError]) -> &str {
    errors.first().map(|e| e.message.as_str()).unwrap_or("none")
}

impl ScheduleError {
    /// Creates an invariant violation.
    pub fn invariant(job_id: u64, detail: impl Into<String>) -> Self {
        Self::InvariantViolation {
            job_id,
            detail: detail.into(),
        }
    }

    /// Whether this error is a rejected configuration or input.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::InvalidConfig(_)
                | Self::NoExecutionUnits
                | Self::EmptyWorkload
                | Self::InvalidInput(_)
        )
    }
}

impl From<csv::Error> for ScheduleError {
    fn from(err: csv::Error) -> Self {
        Self::Report(err.to_string())
    }
}

impl From<serde_json::Error> for ScheduleError {
    fn from(err: serde_json::Error) -> Self {
        Self::Report(err.to_string())
    }
}

impl From<std::io::Error> for ScheduleError {
    fn from(err: std::io::Error) -> Self {
        Self::Report(err.to_string())
    }
}
