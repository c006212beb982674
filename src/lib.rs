//! Job-scheduling simulator with performance-metrics derivation.
//!
//! Given jobs (length, arrival time, optional priority) and a pool of
//! execution units with fixed processing capacity, computes the execution
//! timeline under one of four dispatch policies and derives wait, response,
//! turnaround, makespan and throughput metrics.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Job`, `ExecutionUnit`, `Timeline`
//! - **`dispatching`**: Ordering rules, rule engine and the `Policy` enum
//!   (FCFS, SJF, Priority, Round-Robin)
//! - **`scheduler`**: `Scheduler` orchestration, non-preemptive dispatch,
//!   the Round-Robin quantum loop and `MetricsEngine`
//! - **`validation`**: Pre-run input and configuration checks
//! - **`report`**: CSV and JSON export of results
//! - **`workload`**: Seeded random workload generation
//!
//! # Simplifications
//!
//! - Round-Robin uses one global clock shared by every unit.
//! - Response time equals turnaround time.
//! - SJF sorts once, treating every job as available at t=0.
//!
//! # References
//!
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 5
//! - Calheiros et al. (2011), "CloudSim: a toolkit for modeling and
//!   simulation of cloud computing environments"

pub mod dispatching;
pub mod error;
pub mod models;
pub mod report;
pub mod scheduler;
pub mod validation;
pub mod workload;

pub use dispatching::Policy;
pub use error::{Result, ScheduleError};
pub use models::{ExecutionUnit, Job, Timeline, TimelineEntry};
pub use scheduler::{MetricsEngine, PerformanceMetrics, Scheduler, SimulationConfig};
