//! Process model.
//!
//! A process is the only schedulable unit: an identity, the time it
//! becomes ready, and the total CPU time it needs. Timing results live
//! in [`Completion`](super::Completion), never on the process itself.

use serde::{Deserialize, Serialize};

/// A process to be scheduled.
///
/// Immutable once created. Policies that track remaining work (Round Robin)
/// keep that counter beside the process, so `burst_time` always holds the
/// original requirement.
///
/// # Time Representation
/// All times are integer ticks relative to the simulation epoch (t=0).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Process {
    /// Unique process identifier (1-based, by input order).
    pub id: u32,
    /// Time at which the process becomes ready.
    pub arrival_time: i64,
    /// Total CPU time required.
    pub burst_time: i64,
}

impl Process {
    /// Creates a new process.
    pub fn new(id: u32, arrival_time: i64, burst_time: i64) -> Self {
        Self {
            id,
            arrival_time,
            burst_time,
        }
    }

    /// Whether the process has arrived by `time`.
    #[inline]
    pub fn has_arrived(&self, time: i64) -> bool {
        self.arrival_time <= time
    }
}

/// Stable sort by arrival time. Equal arrivals keep their input order.
pub fn sort_by_arrival(processes: &mut [Process]) {
    processes.sort_by_key(|p| p.arrival_time);
}
