//! Input validation for simulation runs.
//!
//! Checks structural integrity of jobs, units and configuration before
//! scheduling. Detects:
//! - Duplicate IDs
//! - Non-positive or non-finite unit capacities
//! - Negative or non-finite arrival times
//! - Jobs resubmitted after a previous run
//! - Non-positive quantum and makespan floor

use crate::error::{Result, ScheduleError};
use crate::models::{ExecutionUnit, Job};
use crate::scheduler::SimulationConfig;
use std::collections::HashSet;

/// Validation result.
pub type ValidationResult = std::result::Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two entities share the same ID.
    DuplicateId,
    /// A unit cannot make progress.
    InvalidCapacity,
    /// A job arrives before t=0 or at a non-finite time.
    InvalidArrivalTime,
    /// A job already carries runtime state from an earlier run.
    AlreadyScheduled,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates jobs and units.
///
/// Checks:
/// 1. No duplicate job IDs
/// 2. No duplicate unit IDs
/// 3. Every unit has a finite, positive capacity
/// 4. Every job has a finite, non-negative arrival time
/// 5. No job has been dispatched before
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(jobs: &[Job], units: &[ExecutionUnit]) -> ValidationResult {
    let mut errors = Vec::new();

    let mut unit_ids = HashSet::new();
    for u in units {
        if !unit_ids.insert(u.id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate unit ID: {}", u.id),
            ));
        }
        if !u.capacity.is_finite() || u.capacity <= 0.0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidCapacity,
                format!("Unit {} has invalid capacity {}", u.id, u.capacity),
            ));
        }
    }

    let mut job_ids = HashSet::new();
    for job in jobs {
        if !job_ids.insert(job.id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate job ID: {}", job.id),
            ));
        }
        if !job.arrival_time.is_finite() || job.arrival_time < 0.0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidArrivalTime,
                format!(
                    "Job {} has invalid arrival time {}",
                    job.id, job.arrival_time
                ),
            ));
        }
        if job.start_time.is_some()
            || job.finish_time.is_some()
            || job.remaining_length != job.length as f64
        {
            errors.push(ValidationError::new(
                ValidationErrorKind::AlreadyScheduled,
                format!("Job {} was already scheduled", job.id),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates the configuration values.
pub fn validate_config(config: &SimulationConfig) -> Result<()> {
    if config.policy.is_preemptive() && !(config.quantum.is_finite() && config.quantum > 0.0) {
        return Err(ScheduleError::InvalidConfig(format!(
            "quantum must be positive, got {}",
            config.quantum
        )));
    }
    if !(config.makespan_floor.is_finite() && config.makespan_floor > 0.0) {
        return Err(ScheduleError::InvalidConfig(format!(
            "makespan floor must be positive, got {}",
            config.makespan_floor
        )));
    }
    Ok(())
}

/// Runs every pre-simulation check, in the order a caller would hit them.
pub fn check_run(config: &SimulationConfig, jobs: &[Job], units: &[ExecutionUnit]) -> Result<()> {
    validate_config(config)?;
    if units.is_empty() {
        return Err(ScheduleError::NoExecutionUnits);
    }
    if jobs.is_empty() {
        return Err(ScheduleError::EmptyWorkload);
    }
    validate_input(jobs, units).map_err(ScheduleError::InvalidInput)
}
