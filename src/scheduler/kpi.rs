//! Schedule quality metrics (KPIs).
//!
//! Computes standard CPU scheduling indicators from a completed schedule.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Avg Waiting | Mean time spent ready but not running |
//! | Avg Turnaround | Mean time from arrival to completion |
//! | Makespan | Latest completion time |
//! | CPU Utilization | Busy time / makespan |
//! | Throughput | Completions per tick of makespan |
//! | Context Switches | Consecutive slices belonging to different processes |
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 5.2: Scheduling Criteria

use serde::{Deserialize, Serialize};

use crate::models::Schedule;

/// Schedule performance indicators.
///
/// All time values are in simulation ticks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleKpi {
    /// Number of completed processes.
    pub process_count: usize,
    /// Mean waiting time.
    pub avg_waiting_time: f64,
    /// Largest waiting time of any process.
    pub max_waiting_time: i64,
    /// Mean turnaround time.
    pub avg_turnaround_time: f64,
    /// Latest completion time.
    pub makespan: i64,
    /// Total time the CPU was running a process.
    pub busy_time: i64,
    /// Total time the clock jumped ahead to a pending arrival.
    pub idle_time: i64,
    /// Busy fraction of the makespan (0.0..1.0). Under Round Robin a jump
    /// to a late queue head counts as idle even if requeued work waits.
    pub cpu_utilization: f64,
    /// Completed processes per tick.
    pub throughput: f64,
    /// Switches between different processes.
    pub context_switches: usize,
}

impl ScheduleKpi {
    /// Computes KPIs from a schedule.
    pub fn calculate(schedule: &Schedule) -> Self {
        let count = schedule.completions.len();
        // Summed as f64: each value fits the clock, their total may not.
        let total_waiting: f64 = schedule
            .completions
            .iter()
            .map(|c| c.waiting_time as f64)
            .sum();
        let total_turnaround: f64 = schedule
            .completions
            .iter()
            .map(|c| c.turnaround_time as f64)
            .sum();
        let max_waiting_time = schedule
            .completions
            .iter()
            .map(|c| c.waiting_time)
            .max()
            .unwrap_or(0);

        let makespan = schedule.makespan();
        let busy_time = schedule.busy_time();

        let (avg_waiting_time, avg_turnaround_time) = if count == 0 {
            (0.0, 0.0)
        } else {
            (
                total_waiting / count as f64,
                total_turnaround / count as f64,
            )
        };

        let (cpu_utilization, throughput) = if makespan <= 0 {
            (0.0, 0.0)
        } else {
            (
                busy_time as f64 / makespan as f64,
                count as f64 / makespan as f64,
            )
        };

        let context_switches = schedule
            .slices
            .windows(2)
            .filter(|pair| pair[0].process_id != pair[1].process_id)
            .count();

        Self {
            process_count: count,
            avg_waiting_time,
            max_waiting_time,
            avg_turnaround_time,
            makespan,
            busy_time,
            idle_time: schedule.idle_time(),
            cpu_utilization,
            throughput,
            context_switches,
        }
    }
}
