//! Result presentation.
//!
//! Turns a [`Schedule`] into the lines the driver prints: one result row
//! per process, an optional text timeline, and a JSON report.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::models::{Completion, Process, Schedule};
use crate::scheduler::{Policy, ScheduleKpi};

/// Waiting and turnaround time for one process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRow {
    /// Process ID.
    pub process_id: u32,
    /// Waiting time (0 if never scheduled).
    pub waiting_time: i64,
    /// Turnaround time (0 if never scheduled).
    pub turnaround_time: i64,
}

impl ResultRow {
    /// Row for a completed process.
    pub fn from_completion(completion: &Completion) -> Self {
        Self {
            process_id: completion.process_id,
            waiting_time: completion.waiting_time,
            turnaround_time: completion.turnaround_time,
        }
    }

    /// `Process <id>: Waiting Time = <w>, Turnaround Time = <t>`
    pub fn to_line(&self) -> String {
        format!(
            "Process {}: Waiting Time = {}, Turnaround Time = {}",
            self.process_id, self.waiting_time, self.turnaround_time
        )
    }
}

/// One row per process, in the order of `processes`.
///
/// Processes missing from `schedule` (nothing ran) get zeroes.
pub fn final_results(processes: &[Process], schedule: &Schedule) -> Vec<ResultRow> {
    processes
        .iter()
        .map(|p| match schedule.completion_for(p.id) {
            Some(c) => ResultRow::from_completion(c),
            None => ResultRow {
                process_id: p.id,
                waiting_time: 0,
                turnaround_time: 0,
            },
        })
        .collect()
}

/// Renders the run as a one-line timeline.
///
/// ```text
/// | P1 0-2 | P2 2-4 | idle 4-6 | P1 6-7 |
/// ```
pub fn render_timeline(schedule: &Schedule) -> String {
    let mut segments: Vec<(i64, String)> = schedule
        .slices
        .iter()
        .map(|s| (s.start, format!("P{} {}-{}", s.process_id, s.start, s.end)))
        .collect();
    segments.extend(
        schedule
            .idle
            .iter()
            .filter(|span| span.duration() > 0)
            .map(|span| (span.from, format!("idle {}-{}", span.from, span.until))),
    );
    segments.sort_by_key(|(start, _)| *start);

    let mut line = String::from("|");
    for (_, label) in segments {
        let _ = write!(line, " {label} |");
    }
    line
}

/// Everything a run produced, for machine consumption.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationReport {
    /// Policy that ran.
    pub policy: Policy,
    /// Input processes in arrival order.
    pub processes: Vec<Process>,
    /// Final result rows in arrival order.
    pub results: Vec<ResultRow>,
    /// Aggregate metrics.
    pub kpi: ScheduleKpi,
    /// Full event record.
    pub schedule: Schedule,
}

impl SimulationReport {
    /// Builds a report for `schedule`.
    pub fn new(policy: Policy, processes: &[Process], schedule: Schedule) -> Self {
        Self {
            policy,
            processes: processes.to_vec(),
            results: final_results(processes, &schedule),
            kpi: ScheduleKpi::calculate(&schedule),
            schedule,
        }
    }

    /// Pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
