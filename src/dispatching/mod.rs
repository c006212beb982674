//! Dispatch ordering: rules, rule engine and policies.
//!
//! Each non-preemptive policy is a chain of ordering rules evaluated by a
//! [`RuleEngine`]; the next rule is consulted only on ties, and job ID is the
//! final tie-breaker so every ordering is total and deterministic.
//!
//! # Usage
//!
//! ```
//! use cloudlet_sched::dispatching::{Policy, RuleEngine};
//! use cloudlet_sched::dispatching::rules;
//! use cloudlet_sched::models::Job;
//!
//! let engine = RuleEngine::new()
//!     .with_rule(rules::Length)
//!     .with_rule(rules::ArrivalTime);
//!
//! let jobs = vec![Job::new(1, 10), Job::new(2, 3), Job::new(3, 7)];
//! let order: Vec<u64> = engine.sort_indices(&jobs).iter().map(|&i| jobs[i].id).collect();
//! assert_eq!(order, vec![2, 3, 1]);
//! assert_eq!(Policy::Sjf.rule_engine().sort_indices(&jobs), vec![1, 2, 0]);
//! ```

mod engine;
mod policy;
pub mod rules;

pub use engine::RuleEngine;
pub use policy::{ParsePolicyError, Policy};

use crate::models::Job;
use std::fmt::Debug;

/// Score returned by a dispatching rule.
///
/// Lower scores = dispatched first.
pub type RuleScore = f64;

/// An ordering rule over jobs.
///
/// # Score Convention
/// **Lower score = earlier dispatch.**
pub trait DispatchingRule: Send + Sync + Debug {
    /// Rule name (e.g., "ARRIVAL", "LENGTH").
    fn name(&self) -> &'static str;

    /// Scores a job. Lower = earlier.
    fn evaluate(&self, job: &Job) -> RuleScore;
}
