//! Built-in ordering rules.
//!
//! # Score Convention
//! All rules return lower scores for jobs that should be dispatched first.

use super::{DispatchingRule, RuleScore};
use crate::models::Job;

/// Earliest arrival first.
///
/// The FCFS ordering key.
#[derive(Debug, Clone, Copy)]
pub struct ArrivalTime;

impl DispatchingRule for ArrivalTime {
    fn name(&self) -> &'static str {
        "ARRIVAL"
    }

    fn evaluate(&self, job: &Job) -> RuleScore {
        job.arrival_time
    }
}

/// Shortest job first.
///
/// Orders by total length, not remaining work: the static SJF variant sorts
/// once before anything has run.
#[derive(Debug, Clone, Copy)]
pub struct Length;

impl DispatchingRule for Length {
    fn name(&self) -> &'static str {
        "LENGTH"
    }

    fn evaluate(&self, job: &Job) -> RuleScore {
        job.length as f64
    }
}

/// Lowest priority value first.
///
/// Jobs without a priority score `f64::MAX` and go last.
#[derive(Debug, Clone, Copy)]
pub struct PriorityValue;

impl DispatchingRule for PriorityValue {
    fn name(&self) -> &'static str {
        "PRIORITY"
    }

    fn evaluate(&self, job: &Job) -> RuleScore {
        job.priority.map(f64::from).unwrap_or(f64::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrival() {
        let early = Job::new(1, 10).with_arrival_time(1.0);
        let late = Job::new(2, 10).with_arrival_time(4.0);
        assert!(ArrivalTime.evaluate(&early) < ArrivalTime.evaluate(&late));
    }

    #[test]
    fn test_length() {
        let short = Job::new(1, 3);
        let long = Job::new(2, 10);
        assert!(Length.evaluate(&short) < Length.evaluate(&long));
    }

    #[test]
    fn test_priority() {
        let urgent = Job::new(1, 10).with_priority(1);
        let relaxed = Job::new(2, 10).with_priority(5);
        let none = Job::new(3, 10);
        assert!(PriorityValue.evaluate(&urgent) < PriorityValue.evaluate(&relaxed));
        assert!(PriorityValue.evaluate(&relaxed) < PriorityValue.evaluate(&none));
    }

    #[test]
    fn test_negative_priority_wins() {
        let neg = Job::new(1, 10).with_priority(-3);
        let zero = Job::new(2, 10).with_priority(0);
        assert!(PriorityValue.evaluate(&neg) < PriorityValue.evaluate(&zero));
    }
}
