//! Preemptive Round-Robin with a fixed time quantum.
//!
//! # Algorithm
//!
//! 1. The ready queue starts in arrival order; the clock starts at 0.
//! 2. Dequeue the head job and assign it to unit `job.id mod unit_count`.
//! 3. If the job has not arrived yet, advance the clock to its arrival.
//! 4. Run it for `min(quantum, remaining / capacity)`.
//! 5. If work remains, requeue at the tail; otherwise record the finish.
//!
//! A single global clock is shared by all units, so slices on different
//! units never overlap in time. Start time is the first slice's start.
//!
//! Completion is decided in work units (`remaining <= quantum * capacity`),
//! never on the time ratio, so the last slice always drains to exactly 0.
//!
//! # Complexity
//! O(total slices), where each non-final slice consumes a full quantum.

use std::collections::VecDeque;

use log::{debug, trace};

use crate::error::{Result, ScheduleError};
use crate::models::{ExecutionUnit, Job, Slice, Timeline, TimelineEntry};

/// Runs the quantum loop over `jobs` (already in initial queue order).
///
/// Timeline entries are recorded in completion order. Slices are kept only
/// when `record_slices` is set.
pub(crate) fn run_round_robin(
    jobs: &mut [Job],
    units: &[ExecutionUnit],
    quantum: f64,
    record_slices: bool,
) -> Result<Timeline> {
    if units.is_empty() {
        return Err(ScheduleError::NoExecutionUnits);
    }
    if !(quantum.is_finite() && quantum > 0.0) {
        return Err(ScheduleError::InvalidConfig(format!(
            "quantum must be positive, got {quantum}"
        )));
    }

    let unit_count = units.len() as u64;
    let mut timeline = Timeline::new();
    let mut ready: VecDeque<usize> = (0..jobs.len()).collect();
    let mut current_time = 0.0_f64;

    while let Some(idx) = ready.pop_front() {
        let job = &mut jobs[idx];
        let unit = &units[(job.id % unit_count) as usize];

        if current_time < job.arrival_time {
            current_time = job.arrival_time;
        }

        let quantum_work = quantum * unit.capacity;
        let completes = job.remaining_length <= quantum_work;
        let exec = if completes {
            (job.remaining_length / unit.capacity).min(quantum)
        } else {
            quantum
        };

        let slice_start = current_time;
        current_time += exec;
        job.mark_dispatched(unit.id, slice_start);

        if completes {
            job.mark_finished(current_time);
        } else {
            // remaining > quantum_work, so the difference is strictly positive
            job.remaining_length -= quantum_work;
            if job.remaining_length > job.length as f64 {
                return Err(ScheduleError::invariant(
                    job.id,
                    format!(
                        "remaining work {} exceeds length {} after a partial slice",
                        job.remaining_length, job.length
                    ),
                ));
            }
            ready.push_back(idx);
        }

        trace!(
            "job {} on unit {}: {:.2} -> {:.2}, remaining {:.2}",
            job.id,
            unit.id,
            slice_start,
            current_time,
            job.remaining_length
        );
        if record_slices {
            timeline.add_slice(Slice {
                job_id: job.id,
                unit_id: unit.id,
                start: slice_start,
                end: current_time,
                remaining_after: job.remaining_length,
            });
        }

        if completes {
            debug!("job {} finished at {:.2}", job.id, current_time);
            let entry = TimelineEntry::from_job(job, unit.capacity)
                .ok_or_else(|| ScheduleError::invariant(job.id, "finished job has no bounds"))?;
            timeline.add_entry(entry);
        }
    }

    Ok(timeline)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_job_slice_trace() {
        // A = id 0 (len 5), B = id 1 (len 3), quantum 2, one unit
        let mut jobs = vec![Job::new(0, 5), Job::new(1, 3)];
        let timeline = run_round_robin(&mut jobs, &ExecutionUnit::pool(1), 2.0, true).unwrap();

        let trace: Vec<(u64, f64, f64, f64)> = timeline
            .slices
            .iter()
            .map(|s| (s.job_id, s.start, s.end, s.remaining_after))
            .collect();
        assert_eq!(
            trace,
            vec![
                (0, 0.0, 2.0, 3.0),
                (1, 2.0, 4.0, 1.0),
                (0, 4.0, 6.0, 1.0),
                (1, 6.0, 7.0, 0.0),
                (0, 7.0, 8.0, 0.0),
            ]
        );

        let a = timeline.entry_for_job(0).unwrap();
        let b = timeline.entry_for_job(1).unwrap();
        assert_eq!((b.start_time, b.finish_time), (2.0, 7.0));
        assert_eq!((a.start_time, a.finish_time), (0.0, 8.0));
        // Completion order
        assert_eq!(timeline.job_order(), vec![1, 0]);
    }

    #[test]
    fn test_idle_until_arrival() {
        let mut jobs = vec![Job::new(0, 1), Job::new(1, 2).with_arrival_time(10.0)];
        let timeline = run_round_robin(&mut jobs, &ExecutionUnit::pool(1), 4.0, false).unwrap();
        let late = timeline.entry_for_job(1).unwrap();
        assert_eq!(late.start_time, 10.0);
        assert_eq!(late.finish_time, 12.0);
    }

    #[test]
    fn test_zero_length_completes_immediately() {
        let mut jobs = vec![Job::new(0, 3), Job::new(1, 0)];
        let timeline = run_round_robin(&mut jobs, &ExecutionUnit::pool(1), 5.0, false).unwrap();
        let empty = timeline.entry_for_job(1).unwrap();
        assert_eq!(empty.start_time, 3.0);
        assert_eq!(empty.finish_time, 3.0);
    }

    #[test]
    fn test_large_quantum_is_single_pass() {
        let mut jobs = vec![Job::new(0, 3), Job::new(1, 4), Job::new(2, 1)];
        let timeline = run_round_robin(&mut jobs, &ExecutionUnit::pool(1), 100.0, true).unwrap();
        assert_eq!(timeline.slices.len(), 3);
        assert_eq!(timeline.job_order(), vec![0, 1, 2]);
        assert_eq!(timeline.latest_finish(), Some(8.0));
    }

    #[test]
    fn test_unit_by_job_id() {
        let mut jobs = vec![Job::new(4, 1), Job::new(7, 1)];
        let timeline = run_round_robin(&mut jobs, &ExecutionUnit::pool(3), 1.0, false).unwrap();
        assert_eq!(timeline.entry_for_job(4).unwrap().unit_id, 1);
        assert_eq!(timeline.entry_for_job(7).unwrap().unit_id, 1);
    }

    #[test]
    fn test_capacity_consumes_work_per_time() {
        // 10 work units at capacity 2 need 5 time units: slices 2, 2, 1
        let mut jobs = vec![Job::new(0, 10)];
        let units = vec![ExecutionUnit::new(0).with_capacity(2.0)];
        let timeline = run_round_robin(&mut jobs, &units, 2.0, true).unwrap();
        assert_eq!(timeline.slices.len(), 3);
        assert_eq!(timeline.slices[0].remaining_after, 6.0);
        assert_eq!(timeline.entries[0].finish_time, 5.0);
    }

    #[test]
    fn test_rejects_bad_quantum() {
        let mut jobs = vec![Job::new(0, 1)];
        assert!(run_round_robin(&mut jobs, &ExecutionUnit::pool(1), 0.0, false).is_err());
        assert!(run_round_robin(&mut jobs, &ExecutionUnit::pool(1), f64::NAN, false).is_err());
        assert_eq!(
            run_round_robin(&mut jobs, &[], 1.0, false),
            Err(ScheduleError::NoExecutionUnits)
        );
    }

    #[test]
    fn test_fractional_capacity_drains_to_zero() {
        // 81 work units at 5.4 per time unit with quantum 1.5: ten full
        // quanta in exact arithmetic, rounding noise in floating point.
        let mut jobs = vec![Job::new(0, 81)];
        let units = vec![ExecutionUnit::new(0).with_capacity(0.1 * 54.0)];
        let timeline = run_round_robin(&mut jobs, &units, 0.1 * 15.0, true).unwrap();

        assert_eq!(jobs[0].remaining_length, 0.0);
        assert!(jobs[0].finish_time.is_some());
        assert_eq!(timeline.entry_count(), 1);
        assert_eq!(timeline.slices.last().unwrap().remaining_after, 0.0);
        assert!((timeline.entries[0].finish_time - 15.0).abs() < 1e-9);
    }

    #[test]
    fn test_fractional_capacity_sweep() {
        for len in 1..200u64 {
            for cap in 5..60 {
                for q in 5..20 {
                    let capacity = 0.1 * cap as f64;
                    let quantum = 0.1 * q as f64;
                    let mut jobs = vec![Job::new(0, len)];
                    let units = vec![ExecutionUnit::new(0).with_capacity(capacity)];
                    let timeline = run_round_robin(&mut jobs, &units, quantum, false)
                        .unwrap_or_else(|e| panic!("len={len} cap={capacity} q={quantum}: {e}"));
                    assert_eq!(timeline.entry_count(), 1);
                    assert_eq!(jobs[0].remaining_length, 0.0);
                }
            }
        }
    }

    #[test]
    fn test_slices_not_recorded_when_disabled() {
        let mut jobs = vec![Job::new(0, 5), Job::new(1, 3)];
        let timeline = run_round_robin(&mut jobs, &ExecutionUnit::pool(1), 2.0, false).unwrap();
        assert!(timeline.slices.is_empty());
        assert_eq!(timeline.job_order(), vec![1, 0]);
        assert_eq!(timeline.latest_finish(), Some(8.0));
    }
}
