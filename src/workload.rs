//! Seeded random workload generation.
//!
//! Produces reproducible job and unit lists for fixtures, benchmarks and
//! policy comparisons. Identical options and seed give identical output.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::error::{Result, ScheduleError};
use crate::models::{ExecutionUnit, Job};

/// Generator parameters. Ranges are inclusive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkloadOptions {
    /// Number of jobs to generate.
    pub job_count: usize,
    /// Shortest job length (work units).
    pub length_min: u64,
    /// Longest job length (work units).
    pub length_max: u64,
    /// Smallest gap between consecutive arrivals.
    pub arrival_gap_min: f64,
    /// Largest gap between consecutive arrivals.
    pub arrival_gap_max: f64,
    /// Priority range; `None` leaves jobs unprioritised.
    pub priority_range: Option<(i32, i32)>,
    /// Number of execution units.
    pub unit_count: usize,
    /// Capacity given to every unit.
    pub unit_capacity: f64,
}

impl Default for WorkloadOptions {
    fn default() -> Self {
        Self {
            job_count: 10,
            length_min: 1,
            length_max: 20,
            arrival_gap_min: 0.0,
            arrival_gap_max: 3.0,
            priority_range: Some((1, 5)),
            unit_count: 2,
            unit_capacity: 1.0,
        }
    }
}

/// Random workload generator.
#[derive(Debug, Clone)]
pub struct WorkloadGenerator {
    options: WorkloadOptions,
    rng: StdRng,
}

impl WorkloadGenerator {
    /// Creates a generator, rejecting empty or inverted ranges.
    pub fn new(options: WorkloadOptions, seed: u64) -> Result<Self> {
        if options.length_min > options.length_max {
            return Err(ScheduleError::InvalidConfig(format!(
                "length range {}..={} is empty",
                options.length_min, options.length_max
            )));
        }
        if !(options.arrival_gap_min >= 0.0 && options.arrival_gap_min <= options.arrival_gap_max)
            || !options.arrival_gap_max.is_finite()
        {
            return Err(ScheduleError::InvalidConfig(format!(
                "arrival gap range {}..={} is invalid",
                options.arrival_gap_min, options.arrival_gap_max
            )));
        }
        if let Some((lo, hi)) = options.priority_range {
            if lo > hi {
                return Err(ScheduleError::InvalidConfig(format!(
                    "priority range {lo}..={hi} is empty"
                )));
            }
        }
        Ok(Self {
            options,
            rng: StdRng::seed_from_u64(seed),
        })
    }

    /// Generates `job_count` jobs with ids `0..job_count`.
    ///
    /// Arrival times are non-decreasing, starting at 0.
    pub fn jobs(&mut self) -> Vec<Job> {
        let opts = &self.options;
        let mut arrival = 0.0;
        let mut jobs = Vec::with_capacity(opts.job_count);

        for id in 0..opts.job_count as u64 {
            if id > 0 {
                arrival += self
                    .rng
                    .random_range(opts.arrival_gap_min..=opts.arrival_gap_max);
            }
            let length = self.rng.random_range(opts.length_min..=opts.length_max);
            let mut job = Job::new(id, length).with_arrival_time(arrival);
            if let Some((lo, hi)) = opts.priority_range {
                job = job.with_priority(self.rng.random_range(lo..=hi));
            }
            jobs.push(job);
        }
        jobs
    }

    /// Generates `unit_count` units of the configured capacity.
    pub fn units(&self) -> Vec<ExecutionUnit> {
        (0..self.options.unit_count as u64)
            .map(|id| ExecutionUnit::new(id).with_capacity(self.options.unit_capacity))
            .collect()
    }
}
