//! Non-preemptive rule-driven dispatcher (FCFS, SJF).
//!
//! # Algorithm
//!
//! 1. Move every pending process with `arrival_time <= now` into the
//!    ready set, keeping arrival order.
//! 2. If the ready set is non-empty, pick one with the rule engine, run it
//!    to completion, and advance the clock by its burst.
//! 3. Otherwise jump the clock to the next pending arrival.
//! 4. Stop when both sets are empty.
//!
//! With the FIFO rule the ready set always yields the next process in
//! arrival order, which is First-Come-First-Serve. With SPT it is
//! Shortest Job First; equal bursts go to the earliest-admitted process.
//!
//! # Complexity
//! O(n²) rule evaluations for n processes.

use std::collections::VecDeque;

use log::{debug, trace};

use crate::dispatching::{rules, DispatchContext, RuleEngine};
use crate::models::{sort_by_arrival, Completion, DispatchEvent, IdleSpan, Process, Slice};

/// A lazy, single-use stream of dispatch events for a non-preemptive run.
///
/// # Example
///
/// ```
/// use cpu_schedule::models::{Process, Schedule};
/// use cpu_schedule::scheduler::NonPreemptiveRun;
///
/// let run = NonPreemptiveRun::sjf(vec![
///     Process::new(1, 0, 8),
///     Process::new(2, 1, 4),
///     Process::new(3, 2, 2),
/// ]);
/// let schedule = Schedule::from_events(run);
/// assert_eq!(schedule.dispatch_order(), vec![1, 3, 2]);
/// ```
#[derive(Debug)]
pub struct NonPreemptiveRun {
    engine: RuleEngine,
    pending: VecDeque<Process>,
    ready: Vec<Process>,
    current_time: i64,
    outbox: VecDeque<DispatchEvent>,
}

impl NonPreemptiveRun {
    /// Creates a run that selects from the ready set with `engine`.
    ///
    /// Processes are stable-sorted by arrival before the run starts.
    pub fn new(mut processes: Vec<Process>, engine: RuleEngine) -> Self {
        sort_by_arrival(&mut processes);
        Self {
            engine,
            pending: processes.into(),
            ready: Vec::new(),
            current_time: 0,
            outbox: VecDeque::new(),
        }
    }

    /// First-Come-First-Serve.
    pub fn fcfs(processes: Vec<Process>) -> Self {
        Self::new(processes, RuleEngine::new().with_rule(rules::Fifo))
    }

    /// Shortest Job First (non-preemptive).
    pub fn sjf(processes: Vec<Process>) -> Self {
        Self::new(processes, RuleEngine::new().with_rule(rules::Spt))
    }

    /// Current simulation clock.
    pub fn current_time(&self) -> i64 {
        self.current_time
    }

    fn admit_arrivals(&mut self, now: i64) {
        while let Some(process) = self.pending.front().copied() {
            if !process.has_arrived(now) {
                break;
            }
            trace!("t={now}: process {} ready", process.id);
            self.pending.pop_front();
            self.ready.push(process);
        }
    }

    /// Makes one dispatch decision at `now` and returns the new clock.
    ///
    /// Returns `None` once every process has completed.
    fn dispatch_next(&mut self, now: i64) -> Option<i64> {
        self.admit_arrivals(now);

        let context = DispatchContext::at_time(now);
        match self.engine.select_best(&self.ready, &context) {
            Some(idx) => {
                let process = self.ready.remove(idx);
                let end = now + process.burst_time;
                debug!(
                    "t={now}: dispatching process {} (burst {}) until t={end}",
                    process.id, process.burst_time
                );
                self.outbox.push_back(DispatchEvent::Ran(Slice {
                    process_id: process.id,
                    start: now,
                    end,
                    remaining: 0,
                }));
                self.outbox
                    .push_back(DispatchEvent::Completed(Completion::new(&process, end)));
                Some(end)
            }
            None => {
                let next_arrival = self.pending.front()?.arrival_time;
                debug!("t={now}: nothing ready, clock jumps to t={next_arrival}");
                self.outbox.push_back(DispatchEvent::Idle(IdleSpan {
                    from: now,
                    until: next_arrival,
                }));
                Some(next_arrival)
            }
        }
    }
}

impl Iterator for NonPreemptiveRun {
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
    use crate::workload::WorkloadGenerator;

    fn run_fcfs(processes: Vec<Process>) -> Schedule {
        Schedule::from_events(NonPreemptiveRun::fcfs(processes))
    }

    fn run_sjf(processes: Vec<Process>) -> Schedule {
        Schedule::from_events(NonPreemptiveRun::sjf(processes))
    }

    #[test]
    fn test_fcfs_two_processes() {
        let s = run_fcfs(vec![Process::new(1, 0, 5), Process::new(2, 1, 3)]);
        let p1 = s.completion_for(1).unwrap();
        let p2 = s.completion_for(2).unwrap();
        assert_eq!((p1.waiting_time, p1.turnaround_time), (0, 5));
        assert_eq!((p2.waiting_time, p2.turnaround_time), (4, 7));
        assert_eq!(p2.completion_time, 8);
    }

    #[test]
    fn test_fcfs_idles_until_arrival() {
        let s = run_fcfs(vec![Process::new(1, 2, 3), Process::new(2, 10, 1)]);
        assert_eq!(s.idle, vec![IdleSpan { from: 0, until: 2 }, IdleSpan { from: 5, until: 10 }]);
        let p2 = s.completion_for(2).unwrap();
        assert_eq!(p2.waiting_time, 0);
        assert_eq!(p2.completion_time, 11);
        assert_eq!(s.idle_time(), 7);
    }

    #[test]
    fn test_fcfs_keeps_input_order_on_equal_arrival() {
        let s = run_fcfs(vec![
            Process::new(1, 0, 9),
            Process::new(2, 0, 1),
            Process::new(3, 0, 4),
        ]);
        assert_eq!(s.dispatch_order(), vec![1, 2, 3]);
    }

    #[test]
    fn test_fcfs_ignores_burst_length() {
        // P2 arrives later but is shorter; FCFS still runs P1 first
        let s = run_fcfs(vec![Process::new(2, 1, 1), Process::new(1, 0, 10)]);
        assert_eq!(s.dispatch_order(), vec![1, 2]);
    }

    #[test]
    fn test_sjf_example_order() {
        let s = run_sjf(vec![
            Process::new(1, 0, 8),
            Process::new(2, 1, 4),
            Process::new(3, 2, 2),
        ]);
        assert_eq!(s.dispatch_order(), vec![1, 3, 2]);

        let p1 = s.completion_for(1).unwrap();
        let p2 = s.completion_for(2).unwrap();
        let p3 = s.completion_for(3).unwrap();
        assert_eq!((p1.waiting_time, p1.turnaround_time), (0, 8));
        assert_eq!((p3.waiting_time, p3.turnaround_time), (6, 8));
        assert_eq!((p2.waiting_time, p2.turnaround_time), (9, 13));
    }

    #[test]
    fn test_sjf_equal_bursts_use_arrival_order() {
        let s = run_sjf(vec![
            Process::new(1, 0, 5),
            Process::new(2, 1, 3),
            Process::new(3, 2, 3),
        ]);
        assert_eq!(s.dispatch_order(), vec![1, 2, 3]);
    }

    #[test]
    fn test_sjf_idle_gap() {
        let s = run_sjf(vec![Process::new(1, 4, 2), Process::new(2, 4, 1)]);
        assert_eq!(s.idle, vec![IdleSpan { from: 0, until: 4 }]);
        assert_eq!(s.dispatch_order(), vec![2, 1]);
        assert_eq!(s.completion_for(1).unwrap().completion_time, 7);
    }

    #[test]
    fn test_empty_run() {
        let mut run = NonPreemptiveRun::sjf(Vec::new());
        assert!(run.next().is_none());
        assert!(run.next().is_none());
        assert_eq!(run.current_time(), 0);
    }

    #[test]
    fn test_event_sequence() {
        let events: Vec<DispatchEvent> =
            NonPreemptiveRun::fcfs(vec![Process::new(1, 1, 2)]).collect();
        assert_eq!(events.len(), 3);
        assert!(matches!(events[0], DispatchEvent::Idle(_)));
        assert!(matches!(events[1], DispatchEvent::Ran(s) if s.start == 1 && s.end == 3));
        assert!(matches!(events[2], DispatchEvent::Completed(c) if c.completion_time == 3));
    }

    #[test]
    fn test_fcfs_busy_plus_idle_is_makespan() {
        let processes = WorkloadGenerator::new(11).generate(30);
        let s = run_fcfs(processes.clone());
        let total_burst: i64 = processes.iter().map(|p| p.burst_time).sum();
        assert_eq!(s.busy_time(), total_burst);
        assert_eq!(s.makespan() - s.idle_time(), total_burst);
    }

    #[test]
    fn test_sjf_always_picks_shortest_arrived() {
        for seed in 0..20 {
            let processes = WorkloadGenerator::new(seed).generate(15);
            let s = run_sjf(processes.clone());
            let mut done: Vec<u32> = Vec::new();
            for slice in &s.slices {
                let chosen = processes.iter().find(|p| p.id == slice.process_id).unwrap();
                let shortest = processes
                    .iter()
                    .filter(|p| !done.contains(&p.id) && p.has_arrived(slice.start))
                    .map(|p| p.burst_time)
                    .min()
                    .unwrap();
                assert_eq!(chosen.burst_time, shortest, "seed {seed}");
                done.push(chosen.id);
            }
        }
    }

    #[test]
    fn test_timing_invariants_hold() {
        let processes = WorkloadGenerator::new(3).generate(25);
        for s in [run_fcfs(processes.clone()), run_sjf(processes.clone())] {
            assert_eq!(s.completions.len(), processes.len());
            for c in &s.completions {
                assert_eq!(c.turnaround_time, c.completion_time - c.arrival_time);
                assert_eq!(c.waiting_time, c.turnaround_time - c.burst_time);
                assert!(c.waiting_time >= 0);
            }
        }
    }
}
