//! Scheduling policies, simulation driver and KPI evaluation.
//!
//! # Policies
//!
//! | Policy | Preemptive | Selection |
//! |--------|-----------|-----------|
//! | FCFS | No | Earliest arrival |
//! | SJF | No | Shortest burst among arrived |
//! | Round Robin | Yes (quantum) | FIFO queue, requeue on expiry |
//!
//! Each policy is a lazy [`Iterator`] of [`DispatchEvent`]s. A run is
//! finite and consumed once; collect it with
//! [`Schedule::from_events`](crate::models::Schedule::from_events) or
//! observe it through [`Simulation::run_with`].
//!
//! # References
//!
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 5.3
//! - Tanenbaum & Bos (2014), "Modern Operating Systems", Ch. 2.4.2

mod kpi;
mod non_preemptive;
mod round_robin;
mod simulation;

pub use kpi::ScheduleKpi;
pub use non_preemptive::NonPreemptiveRun;
pub use round_robin::{Quantum, RoundRobinRun};
pub use simulation::Simulation;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::models::{DispatchEvent, Process};

/// One of the supported scheduling policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Policy {
    /// First-Come-First-Serve.
    Fcfs,
    /// Shortest Job First, non-preemptive.
    Sjf,
    /// Round Robin with a fixed time quantum.
    RoundRobin {
        /// Time slice per dispatch.
        quantum: Quantum,
    },
}

impl Policy {
    /// Full display name.
    pub fn name(&self) -> &'static str {
        match self {
            Policy::Fcfs => "First-Come-First-Serve (FCFS)",
            Policy::Sjf => "Shortest Job First (SJF)",
            Policy::RoundRobin { .. } => "Round Robin (RR)",
        }
    }

    /// Short name (e.g., "SJF").
    pub fn short_name(&self) -> &'static str {
        match self {
            Policy::Fcfs => "FCFS",
            Policy::Sjf => "SJF",
            Policy::RoundRobin { .. } => "RR",
        }
    }

    /// Whether the driver prints a line as each process completes.
    ///
    /// FCFS only prints the final results.
    pub fn reports_progress(&self) -> bool {
        !matches!(self, Policy::Fcfs)
    }

    /// Starts a run of this policy over `processes`.
    pub fn events(&self, processes: Vec<Process>) -> Box<dyn Iterator<Item = DispatchEvent>> {
        match *self {
            Policy::Fcfs => Box::new(NonPreemptiveRun::fcfs(processes)),
            Policy::Sjf => Box::new(NonPreemptiveRun::sjf(processes)),
            Policy::RoundRobin { quantum } => Box::new(RoundRobinRun::new(processes, quantum)),
        }
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Policy::RoundRobin { quantum } => write!(f, "{} q={quantum}", self.short_name()),
            _ => f.write_str(self.short_name()),
        }
    }
}

/// A policy named without its parameters.
///
/// This is what the menu and the `--policy` flag select; Round Robin still
/// needs a quantum before it becomes a [`Policy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyKind {
    /// First-Come-First-Serve.
    Fcfs,
    /// Shortest Job First.
    Sjf,
    /// Round Robin.
    RoundRobin,
}

impl PolicyKind {
    /// Maps a menu choice (1, 2, 3) to a policy kind.
    pub fn from_menu(choice: i64) -> Option<Self> {
        match choice {
            1 => Some(PolicyKind::Fcfs),
            2 => Some(PolicyKind::Sjf),
            3 => Some(PolicyKind::RoundRobin),
            _ => None,
        }
    }

    /// Whether this kind needs a time quantum.
    pub fn needs_quantum(&self) -> bool {
        matches!(self, PolicyKind::RoundRobin)
    }

    /// Completes the policy. `quantum` is ignored unless Round Robin.
    ///
    /// Returns `None` for Round Robin without a quantum.
    pub fn with_quantum(self, quantum: Option<Quantum>) -> Option<Policy> {
        match self {
            PolicyKind::Fcfs => Some(Policy::Fcfs),
            PolicyKind::Sjf => Some(Policy::Sjf),
            PolicyKind::RoundRobin => quantum.map(|quantum| Policy::RoundRobin { quantum }),
        }
    }
}

impl FromStr for PolicyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "fcfs" | "fifo" => Ok(PolicyKind::Fcfs),
            "sjf" => Ok(PolicyKind::Sjf),
            "rr" | "round-robin" => Ok(PolicyKind::RoundRobin),
            other => Err(format!("Unknown policy: {other}. Must be one of fcfs, sjf, rr")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Schedule;

    #[test]
    fn test_policy_names() {
        let rr = Policy::RoundRobin {
            quantum: Quantum::new(4).unwrap(),
        };
        assert_eq!(Policy::Fcfs.short_name(), "FCFS");
        assert_eq!(Policy::Sjf.name(), "Shortest Job First (SJF)");
        assert_eq!(rr.to_string(), "RR q=4");
    }

    #[test]
    fn test_reports_progress() {
        assert!(!Policy::Fcfs.reports_progress());
        assert!(Policy::Sjf.reports_progress());
        assert!(Policy::RoundRobin {
            quantum: Quantum::new(1).unwrap()
        }
        .reports_progress());
    }

    #[test]
    fn test_policy_events() {
        let processes = vec![
            Process::new(1, 0, 8),
            Process::new(2, 1, 4),
            Process::new(3, 2, 2),
        ];
        let fcfs = Schedule::from_events(Policy::Fcfs.events(processes.clone()));
        let sjf = Schedule::from_events(Policy::Sjf.events(processes));
        assert_eq!(fcfs.dispatch_order(), vec![1, 2, 3]);
        assert_eq!(sjf.dispatch_order(), vec![1, 3, 2]);
    }

    #[test]
    fn test_menu_choice() {
        assert_eq!(PolicyKind::from_menu(1), Some(PolicyKind::Fcfs));
        assert_eq!(PolicyKind::from_menu(3), Some(PolicyKind::RoundRobin));
        assert_eq!(PolicyKind::from_menu(0), None);
        assert_eq!(PolicyKind::from_menu(4), None);
    }

    #[test]
    fn test_with_quantum() {
        let q = Quantum::new(2).unwrap();
        assert_eq!(PolicyKind::Sjf.with_quantum(None), Some(Policy::Sjf));
        assert_eq!(PolicyKind::Fcfs.with_quantum(Some(q)), Some(Policy::Fcfs));
        assert_eq!(PolicyKind::RoundRobin.with_quantum(None), None);
        assert_eq!(
            PolicyKind::RoundRobin.with_quantum(Some(q)),
            Some(Policy::RoundRobin { quantum: q })
        );
        assert!(PolicyKind::RoundRobin.needs_quantum());
        assert!(!PolicyKind::Sjf.needs_quantum());
    }

    #[test]
    fn test_policy_kind_from_str() {
        assert_eq!("SJF".parse::<PolicyKind>(), Ok(PolicyKind::Sjf));
        assert_eq!("rr".parse::<PolicyKind>(), Ok(PolicyKind::RoundRobin));
        assert!("priority".parse::<PolicyKind>().is_err());
    }

    #[test]
    fn test_policy_serde() {
        let rr = Policy::RoundRobin {
            quantum: Quantum::new(3).unwrap(),
        };
        let json = serde_json::to_string(&rr).unwrap();
        assert_eq!(json, r#"{"kind":"round_robin","quantum":3}"#);
        let back: Policy = serde_json::from_str(&json).unwrap();
        assert_eq!(back, rr);
        assert_eq!(serde_json::to_string(&Policy::Fcfs).unwrap(), r#"{"kind":"fcfs"}"#);
    }
}
