//! CPU scheduling simulator.
//!
//! Simulates classical uniprocessor scheduling policies over a fixed,
//! fully-known set of processes and computes per-process waiting and
//! turnaround times. The clock is logical: nothing actually runs.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Process`, `Completion`, `Slice`,
//!   `DispatchEvent`, `Schedule`
//! - **`dispatching`**: Selection rules (FIFO, SPT) and the rule engine
//! - **`scheduler`**: FCFS, SJF and Round Robin event streams, `Simulation`,
//!   `ScheduleKpi`
//! - **`validation`**: Input integrity checks (duplicate IDs, bad times)
//! - **`input`**: Token reader and interactive prompts
//! - **`workload`**: Seeded random process sets
//! - **`report`**: Result rows, text rendering, JSON report
//!
//! # Example
//!
//! ```
//! use cpu_schedule::models::Process;
//! use cpu_schedule::scheduler::{Policy, Simulation};
//!
//! let sim = Simulation::new(vec![Process::new(1, 0, 5), Process::new(2, 1, 3)]).unwrap();
//! let schedule = sim.run(&Policy::Fcfs);
//!
//! let p2 = schedule.completion_for(2).unwrap();
//! assert_eq!(p2.waiting_time, 4);
//! assert_eq!(p2.turnaround_time, 7);
//! ```
//!
//! # References
//!
//! - Silberschatz, Galvin & Gagne (2018), "Operating System Concepts", Ch. 5
//! - Tanenbaum & Bos (2014), "Modern Operating Systems", Ch. 2.4

pub mod dispatching;
pub mod input;
pub mod models;
pub mod report;
pub mod scheduler;
pub mod validation;
pub mod workload;
