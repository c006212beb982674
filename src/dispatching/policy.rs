//! Dispatch policies.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::{rules, RuleEngine};

/// The closed set of dispatch policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Policy {
    /// First-Come-First-Served: arrival ascending, non-preemptive.
    Fcfs,
    /// Shortest-Job-First, static batch variant: length ascending, non-preemptive.
    Sjf,
    /// Arrival ascending, then priority value ascending, non-preemptive.
    Priority,
    /// Preemptive FIFO with a fixed time quantum.
    #[serde(alias = "rr")]
    RoundRobin,
}

/// Unrecognised policy name.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid policy '{0}'. Valid: fcfs, sjf, priority, round_robin")]
pub struct ParsePolicyError(pub String);

impl Policy {
    /// All policies, in canonical order.
    pub const ALL: [Policy; 4] = [
        Policy::Fcfs,
        Policy::Sjf,
        Policy::Priority,
        Policy::RoundRobin,
    ];

    /// Machine name.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Fcfs => "fcfs",
            Self::Sjf => "sjf",
            Self::Priority => "priority",
            Self::RoundRobin => "round_robin",
        }
    }

    /// Name used in reports.
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Fcfs => "FCFS",
            Self::Sjf => "SJF",
            Self::Priority => "Priority",
            Self::RoundRobin => "Round Robin",
        }
    }

    /// Whether jobs can be interrupted and resumed.
    pub const fn is_preemptive(&self) -> bool {
        matches!(self, Self::RoundRobin)
    }

    /// Whether a job may not start before its arrival time.
    ///
    /// Static SJF treats every job as available at t=0.
    pub const fn gates_on_arrival(&self) -> bool {
        !matches!(self, Self::Sjf)
    }

    /// The ordering applied before dispatch.
    ///
    /// For Round-Robin this is the initial ready-queue order.
    pub fn rule_engine(&self) -> RuleEngine {
        match self {
            Self::Fcfs | Self::RoundRobin => RuleEngine::new().with_rule(rules::ArrivalTime),
            Self::Sjf => RuleEngine::new()
                .with_rule(rules::Length)
                .with_rule(rules::ArrivalTime),
            Self::Priority => RuleEngine::new()
                .with_rule(rules::ArrivalTime)
                .with_rule(rules::PriorityValue),
        }
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Policy {
    type Err = ParsePolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fcfs" | "fifo" => Ok(Self::Fcfs),
            "sjf" | "spt" => Ok(Self::Sjf),
            "priority" | "prio" => Ok(Self::Priority),
            "round_robin" | "roundrobin" | "round robin" | "rr" => Ok(Self::RoundRobin),
            _ => Err(ParsePolicyError(s.to_string())),
        }
    }
}
