//! Timeline (simulation output) model.
//!
//! A timeline records, per completed job, the unit it ran on and its
//! observable execution bounds: first start and final finish. Round-Robin
//! runs can additionally keep the full slice trace.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::Job;

/// The completed execution timeline of one simulation run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Timeline {
    /// One entry per completed job.
    pub entries: Vec<TimelineEntry>,
    /// Partial executions, in execution order. Empty unless the Round-Robin
    /// slice trace was requested.
    pub slices: Vec<Slice>,
}

/// Observable execution record for one job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEntry {
    /// Job ID.
    pub job_id: u64,
    /// Unit the job (last) ran on.
    pub unit_id: u64,
    /// Arrival time.
    pub arrival_time: f64,
    /// Job priority, if any.
    pub priority: Option<i32>,
    /// Job length (work units).
    pub length: u64,
    /// Time of first dispatch.
    pub start_time: f64,
    /// Completion time.
    pub finish_time: f64,
    /// Time actually spent executing (`length / capacity`).
    pub service_time: f64,
}

/// A single partial execution under a preemptive policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slice {
    /// Job ID.
    pub job_id: u64,
    /// Unit that ran the slice.
    pub unit_id: u64,
    /// Slice start time.
    pub start: f64,
    /// Slice end time.
    pub end: f64,
    /// Work left on the job after this slice.
    pub remaining_after: f64,
}

impl TimelineEntry {
    /// Builds an entry from a finished job.
    ///
    /// Returns `None` if the job was never dispatched or never finished.
    pub fn from_job(job: &Job, capacity: f64) -> Option<Self> {
        Some(Self {
            job_id: job.id,
            unit_id: job.assigned_unit?,
            arrival_time: job.arrival_time,
            priority: job.priority,
            length: job.length,
            start_time: job.start_time?,
            finish_time: job.finish_time?,
            service_time: job.service_time(capacity),
        })
    }

    /// Observable span (finish - start).
    #[inline]
    pub fn span(&self) -> f64 {
        self.finish_time - self.start_time
    }
}

impl Slice {
    /// Slice duration.
    #[inline]
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

impl Timeline {
    /// Creates an empty timeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a job entry.
    pub fn add_entry(&mut self, entry: TimelineEntry) {
        self.entries.push(entry);
    }

    /// Adds a slice record.
    pub fn add_slice(&mut self, slice: Slice) {
        self.slices.push(slice);
    }

    /// Earliest start across all entries.
    pub fn earliest_start(&self) -> Option<f64> {
        self.entries.iter().map(|e| e.start_time).reduce(f64::min)
    }

    /// Latest finish across all entries.
    pub fn latest_finish(&self) -> Option<f64> {
        self.entries.iter().map(|e| e.finish_time).reduce(f64::max)
    }

    /// Raw span from earliest start to latest finish (0 when empty).
    pub fn span(&self) -> f64 {
        match (self.earliest_start(), self.latest_finish()) {
            (Some(start), Some(finish)) => finish - start,
            _ => 0.0,
        }
    }

    /// Finds the entry for a given job.
    pub fn entry_for_job(&self, job_id: u64) -> Option<&TimelineEntry> {
        self.entries.iter().find(|e| e.job_id == job_id)
    }

    /// Returns all entries that ran on a given unit.
    pub fn entries_for_unit(&self, unit_id: u64) -> Vec<&TimelineEntry> {
        self.entries.iter().filter(|e| e.unit_id == unit_id).collect()
    }

    /// Returns the slices of a given job, in execution order.
    pub fn slices_for_job(&self, job_id: u64) -> Vec<&Slice> {
        self.slices.iter().filter(|s| s.job_id == job_id).collect()
    }

    /// Job IDs in entry order.
    pub fn job_order(&self) -> Vec<u64> {
        self.entries.iter().map(|e| e.job_id).collect()
    }

    /// Busy time per unit (sum of service time of the jobs it ran).
    pub fn busy_time_by_unit(&self) -> HashMap<u64, f64> {
        let mut busy: HashMap<u64, f64> = HashMap::new();
        for e in &self.entries {
            *busy.entry(e.unit_id).or_insert(0.0) += e.service_time;
        }
        busy
    }

    /// Utilization per unit: busy time / horizon.
    ///
    /// Returns an empty map if `horizon` is not positive.
    pub fn utilization_by_unit(&self, horizon: f64) -> HashMap<u64, f64> {
        if horizon <= 0.0 {
            return HashMap::new();
        }
        self.busy_time_by_unit()
            .into_iter()
            .map(|(id, busy)| (id, busy / horizon))
            .collect()
    }

    /// Number of entries.
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Whether the timeline has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
