//! Job (cloudlet) model.
//!
//! A job is a single unit of CPU work submitted to the simulator. Its
//! identity, length, arrival time and priority are fixed when it is created;
//! the runtime fields (remaining work, assigned unit, start and finish times)
//! are owned by the scheduler while the simulation runs.
//!
//! # Time Representation
//! All times are simulated time units relative to t=0. Lengths are work
//! units; a unit with capacity `c` consumes `c` work units per time unit.

use serde::{Deserialize, Serialize};

/// A job to be scheduled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    /// Unique job identifier.
    pub id: u64,
    /// Total work (work units).
    pub length: u64,
    /// Time at which the job becomes eligible for dispatch.
    pub arrival_time: f64,
    /// Scheduling priority (lower value = more important). `None` = unprioritised.
    pub priority: Option<i32>,
    /// Work still to be executed.
    pub remaining_length: f64,
    /// Unit that (last) ran the job.
    pub assigned_unit: Option<u64>,
    /// Time of first dispatch. Set once.
    pub start_time: Option<f64>,
    /// Completion time. Set once.
    pub finish_time: Option<f64>,
}

impl Job {
    /// Creates a new job arriving at t=0.
    pub fn new(id: u64, length: u64) -> Self {
        Self {
            id,
            length,
            arrival_time: 0.0,
            priority: None,
            remaining_length: length as f64,
            assigned_unit: None,
            start_time: None,
            finish_time: None,
        }
    }

    /// Sets the arrival time.
    pub fn with_arrival_time(mut self, arrival_time: f64) -> Self {
        self.arrival_time = arrival_time;
        self
    }

    /// Sets the priority.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Whether the job has run to completion.
    pub fn is_finished(&self) -> bool {
        self.finish_time.is_some()
    }

    /// Service time on a unit of the given capacity.
    #[inline]
    pub fn service_time(&self, capacity: f64) -> f64 {
        self.length as f64 / capacity
    }

    /// Records a dispatch onto `unit_id` at `time`.
    ///
    /// Only the first dispatch sets `start_time`.
    pub(crate) fn mark_dispatched(&mut self, unit_id: u64, time: f64) {
        self.assigned_unit = Some(unit_id);
        if self.start_time.is_none() {
            self.start_time = Some(time);
        }
    }

    /// Records completion at `time` and drains remaining work.
    pub(crate) fn mark_finished(&mut self, time: f64) {
        self.remaining_length = 0.0;
        self.finish_time = Some(time);
    }

    /// Restores the runtime fields to their pre-simulation state.
    pub fn reset(&mut self) {
        self.remaining_length = self.length as f64;
        self.assigned_unit = None;
        self.start_time = None;
        self.finish_time = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_builder() {
        let job = Job::new(7, 400).with_arrival_time(3.0).with_priority(2);

        assert_eq!(job.id, 7);
        assert_eq!(job.length, 400);
        assert_eq!(job.arrival_time, 3.0);
        assert_eq!(job.priority, Some(2));
        assert_eq!(job.remaining_length, 400.0);
        assert!(!job.is_finished());
    }

    #[test]
    fn test_first_dispatch_sets_start_once() {
        let mut job = Job::new(1, 10);
        job.mark_dispatched(0, 2.0);
        job.mark_dispatched(1, 6.0);

        assert_eq!(job.start_time, Some(2.0));
        assert_eq!(job.assigned_unit, Some(1));
    }

    #[test]
    fn test_finish_and_reset() {
        let mut job = Job::new(1, 10);
        job.mark_dispatched(0, 0.0);
        job.mark_finished(10.0);
        assert!(job.is_finished());
        assert_eq!(job.remaining_length, 0.0);

        job.reset();
        assert!(!job.is_finished());
        assert_eq!(job.start_time, None);
        assert_eq!(job.remaining_length, 10.0);
    }

    #[test]
    fn test_service_time() {
        let job = Job::new(1, 3000);
        assert!((job.service_time(1000.0) - 3.0).abs() < 1e-10);
        assert!((job.service_time(1.0) - 3000.0).abs() < 1e-10);
    }
}
