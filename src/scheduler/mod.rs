//! Simulation orchestration and metrics.
//!
//! [`Scheduler`] validates a run, orders the jobs with the configured
//! [`Policy`], drives either the non-preemptive list dispatcher or the
//! Round-Robin quantum loop, checks the bookkeeping invariants, and hands
//! the completed jobs back together with the [`Timeline`].
//! [`MetricsEngine`] turns a timeline into [`PerformanceMetrics`].
//!
//! # Example
//!
//! ```
//! use cloudlet_sched::dispatching::Policy;
//! use cloudlet_sched::models::{ExecutionUnit, Job};
//! use cloudlet_sched::scheduler::{Scheduler, SimulationConfig};
//!
//! let jobs = vec![Job::new(0, 5), Job::new(1, 3)];
//! let units = ExecutionUnit::pool(1);
//! let config = SimulationConfig::new(Policy::RoundRobin).with_quantum(2.0);
//!
//! let report = Scheduler::new(config).simulate(jobs, &units).unwrap();
//! assert_eq!(report.timeline.entry_for_job(1).unwrap().finish_time, 7.0);
//! assert_eq!(report.metrics.makespan, 8.0);
//! ```

mod dispatch;
mod metrics;
mod round_robin;

pub use metrics::{JobMetrics, MetricsEngine, PerformanceMetrics, DEFAULT_MAKESPAN_FLOOR};

use log::info;
use serde::{Deserialize, Serialize};

use crate::dispatching::Policy;
use crate::error::{Result, ScheduleError};
use crate::models::{ExecutionUnit, Job, Timeline};
use crate::validation;

/// Default Round-Robin time quantum.
pub const DEFAULT_QUANTUM: f64 = 2.0;

/// Run configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Dispatch policy.
    pub policy: Policy,
    /// Round-Robin time quantum. Ignored by other policies.
    pub quantum: f64,
    /// Lower bound applied to makespan before computing throughput.
    pub makespan_floor: f64,
    /// Keep every Round-Robin slice in [`Timeline::slices`]. Off by default;
    /// the trace grows with `total work / (quantum * capacity)`.
    pub record_slices: bool,
}

impl SimulationConfig {
    /// Creates a configuration for `policy` with default quantum and floor.
    pub fn new(policy: Policy) -> Self {
        Self {
            policy,
            quantum: DEFAULT_QUANTUM,
            makespan_floor: DEFAULT_MAKESPAN_FLOOR,
            record_slices: false,
        }
    }

    /// Sets the Round-Robin quantum.
    pub fn with_quantum(mut self, quantum: f64) -> Self {
        self.quantum = quantum;
        self
    }

    /// Sets the makespan floor.
    pub fn with_makespan_floor(mut self, floor: f64) -> Self {
        self.makespan_floor = floor;
        self
    }

    /// Enables or disables the Round-Robin slice trace.
    pub fn with_slice_trace(mut self, enabled: bool) -> Self {
        self.record_slices = enabled;
        self
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self::new(Policy::Fcfs)
    }
}

/// Completed jobs and their timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleOutcome {
    /// Policy used.
    pub policy: Policy,
    /// Completed jobs, in the order the policy took them up.
    pub jobs: Vec<Job>,
    /// Observable execution timeline.
    pub timeline: Timeline,
}

/// Outcome plus derived metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationReport {
    /// Completed jobs.
    pub jobs: Vec<Job>,
    /// Observable execution timeline.
    pub timeline: Timeline,
    /// Aggregate and per-job metrics.
    pub metrics: PerformanceMetrics,
}

/// Drives one simulation run under a fixed configuration.
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    config: SimulationConfig,
}

impl Scheduler {
    /// Creates a scheduler.
    pub fn new(config: SimulationConfig) -> Self {
        Self { config }
    }

    /// The configuration in use.
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Schedules `jobs` on `units`.
    ///
    /// Takes ownership of the jobs for the duration of the run and returns
    /// them completed.
    ///
    /// # Errors
    /// Configuration and input errors before the run;
    /// [`ScheduleError::InvariantViolation`] if bookkeeping goes wrong.
    pub fn schedule(&self, mut jobs: Vec<Job>, units: &[ExecutionUnit]) -> Result<ScheduleOutcome> {
        validation::check_run(&self.config, &jobs, units)?;

        let policy = self.config.policy;
        policy.rule_engine().sort(&mut jobs);

        let timeline = if policy.is_preemptive() {
            round_robin::run_round_robin(
                &mut jobs,
                units,
                self.config.quantum,
                self.config.record_slices,
            )?
        } else {
            dispatch::dispatch_in_order(&mut jobs, units, policy.gates_on_arrival())?
        };

        verify_completed(policy, &jobs, &timeline)?;

        Ok(ScheduleOutcome {
            policy,
            jobs,
            timeline,
        })
    }

    /// Schedules and evaluates metrics in one step.
    pub fn simulate(&self, jobs: Vec<Job>, units: &[ExecutionUnit]) -> Result<SimulationReport> {
        let outcome = self.schedule(jobs, units)?;
        let metrics = self.metrics_engine().evaluate(outcome.policy, &outcome.timeline);

        info!(
            "{}: {} jobs on {} units, makespan {:.2}, throughput {:.4}",
            outcome.policy,
            metrics.job_count,
            units.len(),
            metrics.makespan,
            metrics.throughput
        );

        Ok(SimulationReport {
            jobs: outcome.jobs,
            timeline: outcome.timeline,
            metrics,
        })
    }

    /// Runs every policy on fresh copies of the same workload.
    ///
    /// Reports come back in [`Policy::ALL`] order.
    pub fn compare(
        jobs: &[Job],
        units: &[ExecutionUnit],
        quantum: f64,
    ) -> Result<Vec<SimulationReport>> {
        Policy::ALL
            .iter()
            .map(|&policy| {
                let workload: Vec<Job> = jobs
                    .iter()
                    .cloned()
                    .map(|mut job| {
                        job.reset();
                        job
                    })
                    .collect();
                Scheduler::new(SimulationConfig::new(policy).with_quantum(quantum))
                    .simulate(workload, units)
            })
            .collect()
    }

    fn metrics_engine(&self) -> MetricsEngine {
        MetricsEngine::new(self.config.makespan_floor)
    }
}

/// Checks the post-run bookkeeping invariants.
fn verify_completed(policy: Policy, jobs: &[Job], timeline: &Timeline) -> Result<()> {
    for job in jobs {
        let (start, finish) = match (job.start_time, job.finish_time) {
            (Some(start), Some(finish)) => (start, finish),
            _ => return Err(ScheduleError::invariant(job.id, "job did not complete")),
        };
        if finish < start {
            return Err(ScheduleError::invariant(
                job.id,
                format!("finish {finish} precedes start {start}"),
            ));
        }
        if policy.gates_on_arrival() && start < job.arrival_time {
            return Err(ScheduleError::invariant(
                job.id,
                format!("start {start} precedes arrival {}", job.arrival_time),
            ));
        }
        if job.remaining_length != 0.0 {
            return Err(ScheduleError::invariant(
                job.id,
                format!("{} work units left after completion", job.remaining_length),
            ));
        }
    }
    if timeline.entry_count() != jobs.len() {
        return Err(ScheduleError::InvariantViolation {
            job_id: jobs.first().map(|j| j.id).unwrap_or_default(),
            detail: format!(
                "timeline has {} entries for {} jobs",
                timeline.entry_count(),
                jobs.len()
            ),
        });
    }
    Ok(())
}
