//! Validated, arrival-sorted process set ready to run under any policy.

use log::info;

use super::Policy;
use crate::models::{sort_by_arrival, DispatchEvent, Process, Schedule};
use crate::validation::{validate_processes, ValidationError};

/// A process set that passed validation, stable-sorted by arrival time.
///
/// Every run works on its own copy, so running the same policy twice gives
/// identical schedules.
///
/// # Example
///
/// ```
/// use cpu_schedule::models::Process;
/// use cpu_schedule::scheduler::{Policy, Quantum, Simulation};
///
/// let sim = Simulation::new(vec![Process::new(1, 0, 5), Process::new(2, 0, 3)]).unwrap();
/// let rr = Policy::RoundRobin { quantum: Quantum::new(2).unwrap() };
///
/// let mut finished = Vec::new();
/// let schedule = sim.run_with(&rr, |event| {
///     if let cpu_schedule::models::DispatchEvent::Completed(c) = event {
///         finished.push(c.process_id);
///     }
/// });
/// assert_eq!(finished, vec![2, 1]);
/// assert_eq!(schedule.completion_for(1).unwrap().completion_time, 8);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Simulation {
    processes: Vec<Process>,
}

impl Simulation {
    /// Validates and sorts `processes`.
    pub fn new(mut processes: Vec<Process>) -> Result<Self, Vec<ValidationError>> {
        validate_processes(&processes)?;
        sort_by_arrival(&mut processes);
        Ok(Self { processes })
    }

    /// Processes in arrival order (ties keep input order).
    pub fn processes(&self) -> &[Process] {
        &self.processes
    }

    /// Number of processes.
    pub fn len(&self) -> usize {
        self.processes.len()
    }

    /// Whether there is nothing to schedule.
    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }

    /// Starts a lazy run of `policy`.
    pub fn events(&self, policy: &Policy) -> Box<dyn Iterator<Item = DispatchEvent>> {
        info!(
            "simulating {} process(es) with {}",
            self.processes.len(),
            policy
        );
        policy.events(self.processes.clone())
    }

    /// Runs `policy` to completion.
    pub fn run(&self, policy: &Policy) -> Schedule {
        Schedule::from_events(self.events(policy))
    }

    /// Runs `policy` to completion, handing every event to `observer` as
    /// it is produced.
    pub fn run_with<F>(&self, policy: &Policy, observer: F) -> Schedule
    where
        F: FnMut(&DispatchEvent),
    {
        Schedule::from_events(self.events(policy).inspect(observer))
    }
}
