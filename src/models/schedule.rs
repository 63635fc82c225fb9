//! Schedule (simulation result) model.
//!
//! A schedule is what one policy run produced: the CPU slices in the order
//! they ran, idle gaps, and one completion record per finished process.
//! It is built from the policy's [`DispatchEvent`] stream.

use serde::{Deserialize, Serialize};

use super::Process;

/// Final timing record for one process.
///
/// Invariants (enforced by [`Completion::new`]):
/// - `turnaround_time == completion_time - arrival_time`
/// - `waiting_time == turnaround_time - burst_time`, where `burst_time`
///   is the original CPU requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Completion {
    /// Completed process ID.
    pub process_id: u32,
    /// Arrival time (copied from the process).
    pub arrival_time: i64,
    /// Original burst time (copied from the process).
    pub burst_time: i64,
    /// Time the last slice ended.
    pub completion_time: i64,
    /// Time spent ready but not running.
    pub waiting_time: i64,
    /// Time from arrival to completion.
    pub turnaround_time: i64,
}

impl Completion {
    /// Finalizes `process` at `completion_time`.
    pub fn new(process: &Process, completion_time: i64) -> Self {
        let turnaround_time = completion_time - process.arrival_time;
        Self {
            process_id: process.id,
            arrival_time: process.arrival_time,
            burst_time: process.burst_time,
            completion_time,
            waiting_time: turnaround_time - process.burst_time,
            turnaround_time,
        }
    }
}

/// One contiguous stretch of CPU time given to a process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slice {
    /// Running process ID.
    pub process_id: u32,
    /// Start time.
    pub start: i64,
    /// End time (exclusive).
    pub end: i64,
    /// Burst left after this slice.
    pub remaining: i64,
}

impl Slice {
    /// Slice length.
    #[inline]
    pub fn duration(&self) -> i64 {
        self.end - self.start
    }
}

/// An interval the clock jumped over to reach a pending arrival.
///
/// Under Round Robin the jump happens whenever the queue head has not
/// arrived, even if requeued processes are waiting behind it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdleSpan {
    /// Clock value before the jump.
    pub from: i64,
    /// Arrival time the clock jumped to.
    pub until: i64,
}

impl IdleSpan {
    /// Ticks skipped.
    #[inline]
    pub fn duration(&self) -> i64 {
        self.until - self.from
    }
}

/// A single step of a policy run.
///
/// Policies yield these lazily; each stream is finite and consumed once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DispatchEvent {
    /// The clock jumped forward to the arrival of the process to run next.
    Idle(IdleSpan),
    /// A process ran for one slice.
    Ran(Slice),
    /// A process finished; its timings are final.
    Completed(Completion),
}

/// Result of one policy run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    /// CPU slices in execution order.
    pub slices: Vec<Slice>,
    /// Clock jumps in time order.
    pub idle: Vec<IdleSpan>,
    /// Completions in the order processes finished.
    pub completions: Vec<Completion>,
}

impl Schedule {
    /// Creates an empty schedule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Collects a whole event stream.
    pub fn from_events<I>(events: I) -> Self
    where
        I: IntoIterator<Item = DispatchEvent>,
    {
        let mut schedule = Self::new();
        for event in events {
            schedule.record(event);
        }
        schedule
    }

    /// Appends one event.
    pub fn record(&mut self, event: DispatchEvent) {
        match event {
            DispatchEvent::Idle(span) => self.idle.push(span),
            DispatchEvent::Ran(slice) => self.slices.push(slice),
            DispatchEvent::Completed(completion) => self.completions.push(completion),
        }
    }

    /// Completion record for a process.
    pub fn completion_for(&self, process_id: u32) -> Option<&Completion> {
        self.completions.iter().find(|c| c.process_id == process_id)
    }

    /// All slices a process received, in order.
    pub fn slices_for(&self, process_id: u32) -> Vec<&Slice> {
        self.slices
            .iter()
            .filter(|s| s.process_id == process_id)
            .collect()
    }

    /// Process IDs in order of first dispatch.
    pub fn dispatch_order(&self) -> Vec<u32> {
        let mut order: Vec<u32> = Vec::new();
        for slice in &self.slices {
            if !order.contains(&slice.process_id) {
                order.push(slice.process_id);
            }
        }
        order
    }

    /// Process IDs in order of completion.
    pub fn completion_order(&self) -> Vec<u32> {
        self.completions.iter().map(|c| c.process_id).collect()
    }

    /// Makespan: latest completion time.
    pub fn makespan(&self) -> i64 {
        self.completions
            .iter()
            .map(|c| c.completion_time)
            .max()
            .unwrap_or(0)
    }

    /// Total time the CPU was running something.
    pub fn busy_time(&self) -> i64 {
        self.slices.iter().map(Slice::duration).sum()
    }

    /// Total ticks the clock jumped over.
    pub fn idle_time(&self) -> i64 {
        self.idle.iter().map(IdleSpan::duration).sum()
    }

    /// Number of CPU slices.
    pub fn slice_count(&self) -> usize {
        self.slices.len()
    }

    /// Whether nothing was scheduled.
    pub fn is_empty(&self) -> bool {
        self.slices.is_empty() && self.completions.is_empty()
    }
}
