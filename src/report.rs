//! Export of simulation results.
//!
//! Two CSV layouts:
//! - **Job records**: one row per completed job with its timing metrics.
//! - **Policy summaries**: one row per run, for side-by-side comparison
//!   of policies on the same workload.
//!
//! Writers accept any [`std::io::Write`]; the caller decides where rows go.

use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::error::Result;
use crate::scheduler::{PerformanceMetrics, SimulationReport};

/// One CSV row per completed job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobRecord {
    #[serde(rename = "Job ID")]
    pub job_id: u64,
    #[serde(rename = "Unit ID")]
    pub unit_id: u64,
    #[serde(rename = "Arrival Time")]
    pub arrival_time: f64,
    #[serde(rename = "Priority")]
    pub priority: Option<i32>,
    #[serde(rename = "Start Time")]
    pub start_time: f64,
    #[serde(rename = "Finish Time")]
    pub finish_time: f64,
    #[serde(rename = "Length")]
    pub length: u64,
    #[serde(rename = "Wait Time")]
    pub wait_time: f64,
    #[serde(rename = "Response Time")]
    pub response_time: f64,
    #[serde(rename = "Turnaround Time")]
    pub turnaround_time: f64,
}

/// One CSV row per simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicySummary {
    #[serde(rename = "Algorithm Name")]
    pub algorithm: String,
    #[serde(rename = "Makespan")]
    pub makespan: f64,
    #[serde(rename = "Throughput")]
    pub throughput: f64,
    #[serde(rename = "Avg Wait Time")]
    pub avg_wait_time: f64,
    #[serde(rename = "Avg Response Time")]
    pub avg_response_time: f64,
    #[serde(rename = "Avg Turnaround Time")]
    pub avg_turnaround_time: f64,
    #[serde(rename = "Number of Jobs")]
    pub job_count: usize,
}

impl From<&PerformanceMetrics> for PolicySummary {
    fn from(m: &PerformanceMetrics) -> Self {
        Self {
            algorithm: m.policy_name().to_string(),
            makespan: m.makespan,
            throughput: m.throughput,
            avg_wait_time: m.avg_wait_time,
            avg_response_time: m.avg_response_time,
            avg_turnaround_time: m.avg_turnaround_time,
            job_count: m.job_count,
        }
    }
}

/// Builds the per-job rows of a report, in timeline order.
pub fn job_records(report: &SimulationReport) -> Vec<JobRecord> {
    report
        .timeline
        .entries
        .iter()
        .zip(&report.metrics.jobs)
        .map(|(entry, m)| JobRecord {
            job_id: entry.job_id,
            unit_id: entry.unit_id,
            arrival_time: entry.arrival_time,
            priority: entry.priority,
            start_time: entry.start_time,
            finish_time: entry.finish_time,
            length: entry.length,
            wait_time: m.wait_time,
            response_time: m.response_time,
            turnaround_time: m.turnaround_time,
        })
        .collect()
}

/// Writes per-job rows (with header) as CSV.
pub fn write_job_records<W: Write>(writer: W, report: &SimulationReport) -> Result<()> {
    let mut out = csv::Writer::from_writer(writer);
    for record in job_records(report) {
        out.serialize(record)?;
    }
    out.flush()?;
    Ok(())
}

/// Writes one summary row per report (with header) as CSV.
pub fn write_policy_summaries<W: Write>(writer: W, reports: &[SimulationReport]) -> Result<()> {
    let mut out = csv::Writer::from_writer(writer);
    for report in reports {
        out.serialize(PolicySummary::from(&report.metrics))?;
    }
    out.flush()?;
    Ok(())
}

/// Serialises a full report (jobs, timeline, metrics) as pretty JSON.
pub fn to_json(report: &SimulationReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}
