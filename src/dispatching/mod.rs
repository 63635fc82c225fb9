//! Dispatching rules and rule engine.
//!
//! A non-preemptive policy is a rule applied to the ready set: FCFS picks
//! by arrival (FIFO), SJF by burst length (SPT).
//!
//! # Usage
//!
//! ```
//! use cpu_schedule::dispatching::{rules, DispatchContext, RuleEngine};
//! use cpu_schedule::models::Process;
//!
//! let engine = RuleEngine::new()
//!     .with_rule(rules::Spt)
//!     .with_tie_breaker(rules::Fifo);
//!
//! let ready = vec![Process::new(1, 0, 8), Process::new(2, 1, 4)];
//! assert_eq!(engine.select_best(&ready, &DispatchContext::at_time(8)), Some(1));
//! ```
//!
//! # References
//!
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 5.3

mod context;
mod engine;
pub mod rules;

pub use context::DispatchContext;
pub use engine::RuleEngine;

use crate::models::Process;
use std::fmt::Debug;

/// Score returned by a dispatching rule.
///
/// Lower scores = higher priority (dispatched first).
pub type RuleScore = i64;

/// A dispatching rule that ranks ready processes.
///
/// # Score Convention
/// **Lower score = dispatched first.**
pub trait DispatchingRule: Send + Sync + Debug {
    /// Rule name (e.g., "SPT", "FIFO").
    fn name(&self) -> &'static str;

    /// Scores a process given the current dispatch context.
    fn evaluate(&self, process: &Process, context: &DispatchContext) -> RuleScore;

    /// Rule description.
    fn description(&self) -> &'static str {
        self.name()
    }
}
