//! Scheduling domain models.
//!
//! Provides the input record (`Process`) and the result types a policy run
//! produces. Results are separate values: nothing mutates a `Process`.
//!
//! # Glossary
//!
//! | Term | Meaning |
//! |------|---------|
//! | Burst time | Total CPU time a process requires |
//! | Arrival time | When a process becomes eligible to run |
//! | Waiting time | Time spent ready but not running |
//! | Turnaround time | Time from arrival to completion |

mod process;
mod schedule;

pub use process::{sort_by_arrival, Process};
pub use schedule::{Completion, DispatchEvent, IdleSpan, Schedule, Slice};
