//! Round Robin (preemptive, fixed quantum).
//!
//! # Algorithm
//!
//! The queue is seeded with every process in arrival order. Each step pops
//! the head, jumps the clock to its arrival if it has not arrived yet, runs
//! it for `min(quantum, remaining)` ticks, and either requeues it at the
//! tail or finalizes it.
//!
//! The remaining burst is tracked beside the process. Waiting time is
//! always computed from the original burst, never from the decremented
//! counter.

use std::collections::VecDeque;
use std::fmt;

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::models::{sort_by_arrival, Completion, DispatchEvent, IdleSpan, Process, Slice};
use crate::validation::{validate_quantum, ValidationError};

/// A positive Round Robin time slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Quantum(i64);

impl Quantum {
    /// Creates a quantum, rejecting values `<= 0`.
    pub fn new(ticks: i64) -> Result<Self, ValidationError> {
        validate_quantum(ticks)?;
        Ok(Self(ticks))
    }

    /// Slice length in ticks.
    #[inline]
    pub fn get(self) -> i64 {
        self.0
    }
}

impl TryFrom<i64> for Quantum {
    type Error = ValidationError;

    fn try_from(ticks: i64) -> Result<Self, Self::Error> {
        Self::new(ticks)
    }
}

impl From<Quantum> for i64 {
    fn from(quantum: Quantum) -> Self {
        quantum.0
    }
}

impl fmt::Display for Quantum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy)]
struct Runnable {
    process: Process,
    remaining: i64,
}

/// A lazy, single-use stream of dispatch events for a Round Robin run.
///
/// # Example
///
/// ```
/// use cpu_schedule::models::{Process, Schedule};
/// use cpu_schedule::scheduler::{Quantum, RoundRobinRun};
///
/// let quantum = Quantum::new(2).unwrap();
/// let run = RoundRobinRun::new(vec![Process::new(1, 0, 5), Process::new(2, 0, 3)], quantum);
/// let schedule = Schedule::from_events(run);
/// assert_eq!(schedule.completion_order(), vec![2, 1]);
/// assert_eq!(schedule.makespan(), 8);
/// ```
#[derive(Debug)]
pub struct RoundRobinRun {
    quantum: Quantum,
    queue: VecDeque<Runnable>,
    current_time: i64,
    outbox: VecDeque<DispatchEvent>,
}

impl RoundRobinRun {
    /// Creates a run over `processes`, stable-sorted by arrival.
    pub fn new(mut processes: Vec<Process>, quantum: Quantum) -> Self {
        sort_by_arrival(&mut processes);
        let queue = processes
            .into_iter()
            .map(|process| Runnable {
                process,
                remaining: process.burst_time,
            })
            .collect();
        Self {
            quantum,
            queue,
            current_time: 0,
            outbox: VecDeque::new(),
        }
    }

    /// Current simulation clock.
    pub fn current_time(&self) -> i64 {
        self.current_time
    }

    /// Runs the queue head for one slice and returns the new clock.
    ///
    /// Returns `None` once the queue is empty.
    fn dispatch_next(&mut self, now: i64) -> Option<i64> {
        let mut entry = self.queue.pop_front()?;
        let mut now = now;

        if now < entry.process.arrival_time {
            debug!(
                "t={now}: head not arrived, clock jumps to t={}",
                entry.process.arrival_time
            );
            self.outbox.push_back(DispatchEvent::Idle(IdleSpan {
                from: now,
                until: entry.process.arrival_time,
            }));
            now = entry.process.arrival_time;
        }

        let time_used = self.quantum.get().min(entry.remaining);
        entry.remaining -= time_used;
        let end = now + time_used;
        debug!(
            "t={now}: process {} runs {time_used} tick(s), {} left",
            entry.process.id, entry.remaining
        );
        self.outbox.push_back(DispatchEvent::Ran(Slice {
            process_id: entry.process.id,
            start: now,
            end,
            remaining: entry.remaining,
        }));

        if entry.remaining > 0 {
            trace!("t={end}: process {} requeued", entry.process.id);
            self.queue.push_back(entry);
        } else {
            self.outbox
                .push_back(DispatchEvent::Completed(Completion::new(&entry.process, end)));
        }
        Some(end)
    }
}

impl Iterator for RoundRobinRun {
    type Item = DispatchEvent;

    fn next(&mut self) -> Option<DispatchEvent> {
        if self.outbox.is_empty() {
            self.current_time = self.dispatch_next(self.current_time)?;
        }
        self.outbox.pop_front()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Schedule;
    use crate::validation::ValidationErrorKind;
    use crate::workload::WorkloadGenerator;

    fn run_rr(processes: Vec<Process>, quantum: i64) -> Schedule {
        Schedule::from_events(RoundRobinRun::new(processes, Quantum::new(quantum).unwrap()))
    }

    #[test]
    fn test_quantum_rejects_non_positive() {
        assert_eq!(Quantum::new(3).unwrap().get(), 3);
        assert_eq!(
            Quantum::new(0).unwrap_err().kind,
            ValidationErrorKind::NonPositiveQuantum
        );
        assert!(Quantum::try_from(-2).is_err());
    }

    #[test]
    fn test_quantum_serde() {
        let q: Quantum = serde_json::from_str("4").unwrap();
        assert_eq!(q.get(), 4);
        assert_eq!(serde_json::to_string(&q).unwrap(), "4");
        assert!(serde_json::from_str::<Quantum>("0").is_err());
    }

    #[test]
    fn test_rr_example_sequence() {
        let s = run_rr(vec![Process::new(1, 0, 5), Process::new(2, 0, 3)], 2);
        let sequence: Vec<(u32, i64, i64, i64)> = s
            .slices
            .iter()
            .map(|sl| (sl.process_id, sl.start, sl.end, sl.remaining))
            .collect();
        assert_eq!(
            sequence,
            vec![
                (1, 0, 2, 3),
                (2, 2, 4, 1),
                (1, 4, 6, 1),
                (2, 6, 7, 0),
                (1, 7, 8, 0),
            ]
        );

        let p1 = s.completion_for(1).unwrap();
        let p2 = s.completion_for(2).unwrap();
        assert_eq!(p1.completion_time, 8);
        assert_eq!(p2.completion_time, 7);
    }

    #[test]
    fn test_rr_waiting_uses_original_burst() {
        let s = run_rr(vec![Process::new(1, 0, 5), Process::new(2, 0, 3)], 2);
        let p1 = s.completion_for(1).unwrap();
        let p2 = s.completion_for(2).unwrap();
        assert_eq!((p1.waiting_time, p1.turnaround_time), (3, 8));
        assert_eq!((p2.waiting_time, p2.turnaround_time), (4, 7));
        assert_eq!(p1.burst_time, 5);
    }

    #[test]
    fn test_rr_large_quantum_matches_fcfs() {
        let s = run_rr(vec![Process::new(1, 0, 5), Process::new(2, 1, 3)], 100);
        let p2 = s.completion_for(2).unwrap();
        assert_eq!((p2.waiting_time, p2.turnaround_time), (4, 7));
        assert_eq!(s.slice_count(), 2);
    }

    #[test]
    fn test_rr_jumps_to_late_head() {
        // P2 reaches the head before it has arrived; the clock jumps even
        // though P1 is still queued behind it.
        let s = run_rr(vec![Process::new(1, 0, 5), Process::new(2, 10, 1)], 2);
        assert_eq!(s.idle, vec![IdleSpan { from: 2, until: 10 }]);
        assert_eq!(s.idle_time(), 8);
        assert_eq!(s.makespan() - s.idle_time(), s.busy_time());
        assert_eq!(s.completion_order(), vec![2, 1]);
        let p1 = s.completion_for(1).unwrap();
        assert_eq!(p1.completion_time, 14);
        assert_eq!(p1.waiting_time, 9);
    }

    #[test]
    fn test_rr_empty() {
        let mut run = RoundRobinRun::new(Vec::new(), Quantum::new(1).unwrap());
        assert!(run.next().is_none());
        assert_eq!(run.current_time(), 0);
    }

    #[test]
    fn test_rr_slices_bounded_and_decreasing() {
        for seed in 0..20 {
            let processes = WorkloadGenerator::new(seed).generate(12);
            let quantum = (seed as i64 % 4) + 1;
            let s = run_rr(processes.clone(), quantum);

            for slice in &s.slices {
                assert!(slice.duration() > 0);
                assert!(slice.duration() <= quantum);
            }
            for p in &processes {
                let slices = s.slices_for(p.id);
                let mut previous = p.burst_time;
                for slice in slices {
                    assert!(slice.remaining < previous);
                    assert_eq!(slice.remaining, previous - slice.duration());
                    previous = slice.remaining;
                }
                assert_eq!(previous, 0);

                let c = s.completion_for(p.id).unwrap();
                assert_eq!(c.arrival_time, p.arrival_time);
                assert_eq!(c.burst_time, p.burst_time);
                assert_eq!(c.turnaround_time, c.completion_time - c.arrival_time);
                assert_eq!(c.waiting_time, c.turnaround_time - p.burst_time);
            }
        }
    }
}
