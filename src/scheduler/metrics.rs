//! Performance metrics derived from a completed timeline.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Wait | max(start - arrival, 0) |
//! | Response | max(finish - arrival, 0) |
//! | Turnaround | max(finish - arrival, 0) |
//! | Makespan | max(latest finish - earliest start, floor) |
//! | Throughput | job count / makespan |
//! | Utilization | unit busy time / makespan |
//!
//! Response and turnaround coincide: the model has no first-response event
//! separate from completion.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::dispatching::Policy;
use crate::models::{Timeline, TimelineEntry};

/// Default lower bound on makespan.
pub const DEFAULT_MAKESPAN_FLOOR: f64 = 1.0;

/// Per-job timing metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobMetrics {
    /// Job ID.
    pub job_id: u64,
    /// Delay between arrival and first dispatch.
    pub wait_time: f64,
    /// Arrival to completion.
    pub response_time: f64,
    /// Arrival to completion.
    pub turnaround_time: f64,
}

/// Aggregate metrics for one simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    /// Policy that produced the timeline.
    pub policy: Policy,
    /// Number of completed jobs.
    pub job_count: usize,
    /// Span from earliest start to latest finish, floored.
    pub makespan: f64,
    /// Jobs completed per unit of makespan.
    pub throughput: f64,
    /// Mean wait time.
    pub avg_wait_time: f64,
    /// Mean response time.
    pub avg_response_time: f64,
    /// Mean turnaround time.
    pub avg_turnaround_time: f64,
    /// Sum of job lengths (work units), saturating at `u64::MAX`.
    pub total_length: u64,
    /// Busy fraction of makespan per unit that ran at least one job.
    pub utilization_by_unit: BTreeMap<u64, f64>,
    /// Mean of `utilization_by_unit`.
    pub avg_utilization: f64,
    /// Per-job metrics, in timeline order.
    pub jobs: Vec<JobMetrics>,
}

impl JobMetrics {
    /// Derives metrics for a single timeline entry.
    pub fn from_entry(entry: &TimelineEntry) -> Self {
        let turnaround = (entry.finish_time - entry.arrival_time).max(0.0);
        Self {
            job_id: entry.job_id,
            wait_time: (entry.start_time - entry.arrival_time).max(0.0),
            response_time: turnaround,
            turnaround_time: turnaround,
        }
    }
}

impl PerformanceMetrics {
    /// All-zero record for a run with no completed jobs.
    pub fn empty(policy: Policy) -> Self {
        Self {
            policy,
            job_count: 0,
            makespan: 0.0,
            throughput: 0.0,
            avg_wait_time: 0.0,
            avg_response_time: 0.0,
            avg_turnaround_time: 0.0,
            total_length: 0,
            utilization_by_unit: BTreeMap::new(),
            avg_utilization: 0.0,
            jobs: Vec::new(),
        }
    }

    /// Report name of the policy.
    pub fn policy_name(&self) -> &'static str {
        self.policy.display_name()
    }

    /// Looks up the metrics of a single job.
    pub fn job(&self, job_id: u64) -> Option<&JobMetrics> {
        self.jobs.iter().find(|j| j.job_id == job_id)
    }
}

/// Computes [`PerformanceMetrics`] from a completed timeline.
///
/// Pure: never mutates its input and keeps no state between calls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricsEngine {
    makespan_floor: f64,
}

impl MetricsEngine {
    /// Creates an engine with the given makespan floor.
    pub fn new(makespan_floor: f64) -> Self {
        Self { makespan_floor }
    }

    /// The makespan floor in use.
    pub fn makespan_floor(&self) -> f64 {
        self.makespan_floor
    }

    /// Computes metrics for `timeline`, produced under `policy`.
    pub fn evaluate(&self, policy: Policy, timeline: &Timeline) -> PerformanceMetrics {
        if timeline.is_empty() {
            return PerformanceMetrics::empty(policy);
        }

        let jobs: Vec<JobMetrics> = timeline.entries.iter().map(JobMetrics::from_entry).collect();
        let count = jobs.len() as f64;

        let total_wait: f64 = jobs.iter().map(|j| j.wait_time).sum();
        let total_response: f64 = jobs.iter().map(|j| j.response_time).sum();
        let total_turnaround: f64 = jobs.iter().map(|j| j.turnaround_time).sum();
        let total_length = timeline
            .entries
            .iter()
            .fold(0u64, |acc, e| acc.saturating_add(e.length));

        let makespan = timeline.span().max(self.makespan_floor);

        let utilization_by_unit: BTreeMap<u64, f64> =
            timeline.utilization_by_unit(makespan).into_iter().collect();
        let avg_utilization = if utilization_by_unit.is_empty() {
            0.0
        } else {
            utilization_by_unit.values().sum::<f64>() / utilization_by_unit.len() as f64
        };

        PerformanceMetrics {
            policy,
            job_count: jobs.len(),
            makespan,
            throughput: count / makespan,
            avg_wait_time: total_wait / count,
            avg_response_time: total_response / count,
            avg_turnaround_time: total_turnaround / count,
            total_length,
            utilization_by_unit,
            avg_utilization,
            jobs,
        }
    }
}

impl Default for MetricsEngine {
    fn default() -> Self {
        Self::new(DEFAULT_MAKESPAN_FLOOR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(job_id: u64, arrival: f64, start: f64, finish: f64) -> TimelineEntry {
        TimelineEntry {
            job_id,
            unit_id: 0,
            arrival_time: arrival,
            priority: None,
            length: (finish - start) as u64,
            start_time: start,
            finish_time: finish,
            service_time: finish - start,
        }
    }

    fn timeline(entries: Vec<TimelineEntry>) -> Timeline {
        Timeline {
            entries,
            slices: Vec::new(),
        }
    }

    #[test]
    fn test_basic_metrics() {
        let t = timeline(vec![entry(1, 0.0, 0.0, 4.0), entry(2, 1.0, 4.0, 7.0)]);
        let m = MetricsEngine::default().evaluate(Policy::Fcfs, &t);

        assert_eq!(m.job_count, 2);
        assert!((m.makespan - 7.0).abs() < 1e-10);
        assert!((m.throughput - 2.0 / 7.0).abs() < 1e-10);
        // Waits 0 and 3
        assert!((m.avg_wait_time - 1.5).abs() < 1e-10);
        // Turnarounds 4 and 6
        assert!((m.avg_turnaround_time - 5.0).abs() < 1e-10);
        assert_eq!(m.avg_response_time, m.avg_turnaround_time);
        assert_eq!(m.total_length, 7);
        assert_eq!(m.policy_name(), "FCFS");
    }

    #[test]
    fn test_negative_wait_clamped() {
        // Started before arrival (static SJF)
        let t = timeline(vec![entry(1, 5.0, 0.0, 3.0)]);
        let m = MetricsEngine::default().evaluate(Policy::Sjf, &t);
        let j = m.job(1).unwrap();
        assert_eq!(j.wait_time, 0.0);
        assert_eq!(j.turnaround_time, 0.0);
    }

    #[test]
    fn test_makespan_floor() {
        let t = timeline(vec![entry(1, 0.0, 2.0, 2.0), entry(2, 0.0, 2.0, 2.0)]);
        let m = MetricsEngine::default().evaluate(Policy::RoundRobin, &t);
        assert_eq!(m.makespan, 1.0);
        assert!((m.throughput - 2.0).abs() < 1e-10);

        let m = MetricsEngine::new(0.5).evaluate(Policy::RoundRobin, &t);
        assert_eq!(m.makespan, 0.5);
        assert!(m.throughput.is_finite());
    }

    #[test]
    fn test_makespan_from_earliest_start() {
        let t = timeline(vec![entry(1, 0.0, 10.0, 14.0), entry(2, 0.0, 12.0, 20.0)]);
        let m = MetricsEngine::default().evaluate(Policy::Fcfs, &t);
        assert!((m.makespan - 10.0).abs() < 1e-10);
    }

    #[test]
    fn test_utilization() {
        let mut second = entry(2, 0.0, 0.0, 2.0);
        second.unit_id = 1;
        let t = timeline(vec![entry(1, 0.0, 0.0, 4.0), second]);
        let m = MetricsEngine::default().evaluate(Policy::Fcfs, &t);
        assert!((m.utilization_by_unit[&0] - 1.0).abs() < 1e-10);
        assert!((m.utilization_by_unit[&1] - 0.5).abs() < 1e-10);
        assert!((m.avg_utilization - 0.75).abs() < 1e-10);
    }

    #[test]
    fn test_empty_timeline() {
        let m = MetricsEngine::default().evaluate(Policy::Priority, &Timeline::new());
        assert_eq!(m, PerformanceMetrics::empty(Policy::Priority));
        assert_eq!(m.throughput, 0.0);
        assert!(!m.avg_wait_time.is_nan());
    }

    #[test]
    fn test_idempotent() {
        let t = timeline(vec![entry(1, 0.0, 0.0, 4.0), entry(2, 2.0, 4.0, 9.0)]);
        let engine = MetricsEngine::default();
        let before = t.clone();
        let first = engine.evaluate(Policy::Fcfs, &t);
        let second = engine.evaluate(Policy::Fcfs, &t);
        assert_eq!(first, second);
        assert_eq!(t, before);
    }

    #[test]
    fn test_total_length_saturates() {
        let mut big = entry(1, 0.0, 0.0, 4.0);
        big.length = u64::MAX;
        let mut other = entry(2, 0.0, 4.0, 7.0);
        other.length = 10;
        let m = MetricsEngine::default().evaluate(Policy::Fcfs, &timeline(vec![big, other]));
        assert_eq!(m.total_length, u64::MAX);
        assert_eq!(m.job_count, 2);
    }
}
