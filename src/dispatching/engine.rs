//! Rule engine for multi-key dispatch ordering.
//!
//! Evaluates rules sequentially: a later rule is consulted only when every
//! earlier rule ties exactly. Job ID breaks the final tie, so the ordering is
//! total and independent of input order.

use std::cmp::Ordering;
use std::sync::Arc;

use super::DispatchingRule;
use crate::models::Job;

/// A composable rule engine for job ordering.
///
/// # Example
/// ```
/// use cloudlet_sched::dispatching::RuleEngine;
/// use cloudlet_sched::dispatching::rules;
///
/// let engine = RuleEngine::new()
///     .with_rule(rules::ArrivalTime)
///     .with_rule(rules::PriorityValue);
/// assert_eq!(engine.rule_names(), vec!["ARRIVAL", "PRIORITY"]);
/// ```
#[derive(Clone, Default)]
pub struct RuleEngine {
    rules: Vec<Arc<dyn DispatchingRule>>,
}

impl RuleEngine {
    /// Creates an empty rule engine.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a rule. Rules are applied in insertion order.
    pub fn with_rule<R: DispatchingRule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Arc::new(rule));
        self
    }

    /// Returns indices into `jobs`, in dispatch order.
    pub fn sort_indices(&self, jobs: &[Job]) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..jobs.len()).collect();
        indices.sort_by(|&a, &b| self.compare(&jobs[a], &jobs[b]));
        indices
    }

    /// Sorts jobs in place into dispatch order.
    pub fn sort(&self, jobs: &mut [Job]) {
        jobs.sort_by(|a, b| self.compare(a, b));
    }

    /// Names of the rules in evaluation order.
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Compares two jobs under the rule chain, then by ID.
    ///
    /// Scores compare exactly with [`f64::total_cmp`]; any tolerance here
    /// would break transitivity.
    pub fn compare(&self, a: &Job, b: &Job) -> Ordering {
        self.rules
            .iter()
            .map(|rule| rule.evaluate(a).total_cmp(&rule.evaluate(b)))
            .find(|ord| ord.is_ne())
            .unwrap_or_else(|| a.id.cmp(&b.id))
    }
}

impl std::fmt::Debug for RuleEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleEngine")
            .field("rules", &self.rule_names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatching::rules;

    #[test]
    fn test_length_ordering() {
        let jobs = vec![Job::new(1, 10), Job::new(2, 3), Job::new(3, 7)];
        let engine = RuleEngine::new().with_rule(rules::Length);

        let indices = engine.sort_indices(&jobs);
        assert_eq!(indices, vec![1, 2, 0]);
    }

    #[test]
    fn test_sequential_tie_breaking() {
        let jobs = vec![
            Job::new(1, 5).with_arrival_time(2.0),
            Job::new(2, 5).with_arrival_time(0.0), // Same length as 1, earlier
        ];
        let engine = RuleEngine::new()
            .with_rule(rules::Length)
            .with_rule(rules::ArrivalTime);

        assert_eq!(engine.sort_indices(&jobs), vec![1, 0]);
    }

    #[test]
    fn test_id_breaks_final_tie() {
        let jobs = vec![Job::new(9, 4), Job::new(3, 4)];
        let engine = RuleEngine::new().with_rule(rules::Length);
        assert_eq!(engine.sort_indices(&jobs), vec![1, 0]);
    }

    #[test]
    fn test_sort_in_place() {
        let mut jobs = vec![
            Job::new(1, 1).with_arrival_time(3.0),
            Job::new(2, 1).with_arrival_time(1.0),
        ];
        RuleEngine::new()
            .with_rule(rules::ArrivalTime)
            .sort(&mut jobs);
        assert_eq!(jobs[0].id, 2);
    }

    #[test]
    fn test_empty_jobs() {
        let engine = RuleEngine::new().with_rule(rules::Length);
        assert!(engine.sort_indices(&[]).is_empty());
    }

    #[test]
    fn test_sub_nanosecond_arrivals_are_distinct() {
        // Later arrival with the lower ID must still go second
        let jobs = vec![
            Job::new(0, 1).with_arrival_time(5e-10),
            Job::new(1, 1).with_arrival_time(0.0),
        ];
        let engine = RuleEngine::new().with_rule(rules::ArrivalTime);
        assert_eq!(engine.sort_indices(&jobs), vec![1, 0]);
    }

    #[test]
    fn test_dense_arrival_chain_sorts() {
        // Neighbours 0.6e-9 apart: any tolerance-based comparator would chain
        // ties across the whole range.
        let n = 200u64;
        let mut jobs: Vec<Job> = (0..n)
            .map(|k| Job::new((k * 37) % n, 1).with_arrival_time(k as f64 * 0.6e-9))
            .collect();
        jobs.reverse();

        RuleEngine::new()
            .with_rule(rules::ArrivalTime)
            .sort(&mut jobs);

        assert!(jobs
            .windows(2)
            .all(|w| w[0].arrival_time < w[1].arrival_time));
    }
}
