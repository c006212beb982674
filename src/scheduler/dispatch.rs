//! Non-preemptive list dispatch.
//!
//! # Algorithm
//!
//! 1. Jobs arrive already sorted by the policy's rule chain.
//! 2. The k-th job in that order goes to unit `k mod unit_count`.
//! 3. `start = max(arrival, unit_free)` (or `unit_free` when the policy does
//!    not gate on arrival), `finish = start + length / capacity`.
//! 4. The unit is busy until `finish`; the job runs to completion.
//!
//! # Complexity
//! O(n) after the O(n log n) sort.

use log::{debug, warn};

use crate::error::{Result, ScheduleError};
use crate::models::{ExecutionUnit, Job, Timeline, TimelineEntry};

/// Dispatches `jobs` (in order) onto `units` and records the timeline.
///
/// `units` must be non-empty.
pub(crate) fn dispatch_in_order(
    jobs: &mut [Job],
    units: &[ExecutionUnit],
    gate_on_arrival: bool,
) -> Result<Timeline> {
    if units.is_empty() {
        return Err(ScheduleError::NoExecutionUnits);
    }

    let mut timeline = Timeline::new();
    let mut unit_free = vec![0.0_f64; units.len()];

    for (index, job) in jobs.iter_mut().enumerate() {
        let slot = index % units.len();
        let unit = &units[slot];

        let start = if gate_on_arrival {
            job.arrival_time.max(unit_free[slot])
        } else {
            unit_free[slot]
        };
        let finish = start + job.service_time(unit.capacity);

        if start < job.arrival_time {
            warn!(
                "job {} dispatched at {:.2} before its arrival at {:.2}",
                job.id, start, job.arrival_time
            );
        }
        debug!(
            "job {} -> unit {}: start {:.2}, finish {:.2}",
            job.id, unit.id, start, finish
        );

        job.mark_dispatched(unit.id, start);
        job.mark_finished(finish);
        unit_free[slot] = finish;

        let entry = TimelineEntry::from_job(job, unit.capacity)
            .ok_or_else(|| ScheduleError::invariant(job.id, "job not completed after dispatch"))?;
        timeline.add_entry(entry);
    }

    Ok(timeline)
}
