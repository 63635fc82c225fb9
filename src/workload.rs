//! Seeded random workloads.
//!
//! Generates process sets with uniformly distributed arrival and burst
//! times. The same seed always produces the same set.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::models::Process;

/// Random process set generator.
///
/// # Example
/// ```
/// use cpu_schedule::workload::WorkloadGenerator;
///
/// let a = WorkloadGenerator::new(9).with_burst_range(1, 4).generate(5);
/// let b = WorkloadGenerator::new(9).with_burst_range(1, 4).generate(5);
/// assert_eq!(a, b);
/// assert!(a.iter().all(|p| (1..=4).contains(&p.burst_time)));
/// ```
#[derive(Debug, Clone)]
pub struct WorkloadGenerator {
    rng: StdRng,
    arrival_min: i64,
    arrival_max: i64,
    burst_min: i64,
    burst_max: i64,
}

impl WorkloadGenerator {
    /// Creates a generator with arrivals in `0..=20` and bursts in `1..=10`.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            arrival_min: 0,
            arrival_max: 20,
            burst_min: 1,
            burst_max: 10,
        }
    }

    /// Sets the inclusive arrival range. Negative bounds are clamped to 0.
    pub fn with_arrival_range(mut self, min: i64, max: i64) -> Self {
        self.arrival_min = min.max(0);
        self.arrival_max = max.max(self.arrival_min);
        self
    }

    /// Sets the inclusive burst range. Bounds below 1 are clamped to 1.
    pub fn with_burst_range(mut self, min: i64, max: i64) -> Self {
        self.burst_min = min.max(1);
        self.burst_max = max.max(self.burst_min);
        self
    }

    /// Generates `count` processes with IDs `1..=count`, in ID order.
    pub fn generate(&mut self, count: u32) -> Vec<Process> {
        (1..=count)
            .map(|id| {
                let arrival = self.rng.random_range(self.arrival_min..=self.arrival_max);
                let burst = self.rng.random_range(self.burst_min..=self.burst_max);
                Process::new(id, arrival, burst)
            })
            .collect()
    }
}
