//! Input validation for simulation runs.
//!
//! Checks a process set before any policy runs. Detects:
//! - Duplicate process IDs
//! - Negative arrival times
//! - Non-positive burst times
//! - Non-positive Round Robin quanta
//! - Negative process counts
//! - Process sets whose timeline would overflow the clock

use crate::models::Process;
use std::collections::HashSet;
use std::fmt;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two processes share the same ID.
    DuplicateId,
    /// A process arrives before t=0.
    NegativeArrival,
    /// A process needs zero or negative CPU time.
    NonPositiveBurst,
    /// Round Robin time slice is zero or negative.
    NonPositiveQuantum,
    /// The requested number of processes is negative.
    NegativeCount,
    /// Latest arrival plus total burst does not fit the clock.
    TimeOverflow,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Validates a process set.
///
/// Checks:
/// 1. No duplicate process IDs
/// 2. Every arrival time is `>= 0`
/// 3. Every burst time is `> 0`
/// 4. `max(arrival) + sum(burst)` fits in an `i64`, which bounds every
///    clock value any policy can reach
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_processes(processes: &[Process]) -> ValidationResult {
    let mut errors = Vec::new();
    let mut ids = HashSet::new();

    for p in processes {
        if !ids.insert(p.id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate process ID: {}", p.id),
            ));
        }

        if p.arrival_time < 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NegativeArrival,
                format!(
                    "Process {} has negative arrival time {}",
                    p.id, p.arrival_time
                ),
            ));
        }

        if p.burst_time <= 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonPositiveBurst,
                format!(
                    "Process {} has non-positive burst time {}",
                    p.id, p.burst_time
                ),
            ));
        }
    }

    if let Some(err) = check_horizon(processes) {
        errors.push(err);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_horizon(processes: &[Process]) -> Option<ValidationError> {
    let latest_arrival = processes.iter().map(|p| p.arrival_time).max().unwrap_or(0);
    let horizon = processes
        .iter()
        .try_fold(latest_arrival, |acc, p| acc.checked_add(p.burst_time));
    match horizon {
        Some(_) => None,
        None => Some(ValidationError::new(
            ValidationErrorKind::TimeOverflow,
            "Latest arrival plus total burst time exceeds the clock range",
        )),
    }
}

/// Validates a Round Robin time quantum (`> 0`).
pub fn validate_quantum(quantum: i64) -> Result<(), ValidationError> {
    if quantum > 0 {
        Ok(())
    } else {
        Err(ValidationError::new(
            ValidationErrorKind::NonPositiveQuantum,
            format!("Time quantum must be positive, got {quantum}"),
        ))
    }
}

/// Validates a process count (`>= 0`).
pub fn validate_count(count: i64) -> Result<usize, ValidationError> {
    usize::try_from(count).map_err(|_| {
        ValidationError::new(
            ValidationErrorKind::NegativeCount,
            format!("Number of processes must be non-negative, got {count}"),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_input() {
        let processes = vec![Process::new(1, 0, 5), Process::new(2, 3, 1)];
        assert!(validate_processes(&processes).is_ok());
    }

    #[test]
    fn test_empty_input_is_valid() {
        assert!(validate_processes(&[]).is_ok());
    }

    #[test]
    fn test_duplicate_id() {
        let processes = vec![Process::new(1, 0, 5), Process::new(1, 2, 1)];
        let errors = validate_processes(&processes).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateId));
    }

    #[test]
    fn test_negative_arrival() {
        let errors = validate_processes(&[Process::new(1, -1, 5)]).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::NegativeArrival);
    }

    #[test]
    fn test_zero_burst() {
        let errors = validate_processes(&[Process::new(1, 0, 0)]).unwrap_err();
        assert_eq!(errors[0].kind, ValidationErrorKind::NonPositiveBurst);
        assert!(errors[0].message.contains("Process 1"));
    }

    #[test]
    fn test_multiple_errors() {
        let processes = vec![Process::new(1, -2, 0), Process::new(1, 0, 1)];
        let errors = validate_processes(&processes).unwrap_err();
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn test_time_overflow_rejected() {
        let late = validate_processes(&[Process::new(1, i64::MAX, 1)]).unwrap_err();
        assert_eq!(late[0].kind, ValidationErrorKind::TimeOverflow);

        let long = vec![Process::new(1, 0, i64::MAX), Process::new(2, 0, 1)];
        let errors = validate_processes(&long).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::TimeOverflow);
    }

    #[test]
    fn test_horizon_at_limit_is_valid() {
        let processes = vec![Process::new(1, i64::MAX - 3, 1), Process::new(2, 0, 2)];
        assert!(validate_processes(&processes).is_ok());
    }

    #[test]
    fn test_quantum() {
        assert!(validate_quantum(1).is_ok());
        assert_eq!(
            validate_quantum(0).unwrap_err().kind,
            ValidationErrorKind::NonPositiveQuantum
        );
        assert!(validate_quantum(-4).is_err());
    }

    #[test]
    fn test_count() {
        assert_eq!(validate_count(0), Ok(0));
        assert_eq!(validate_count(12), Ok(12));
        assert_eq!(
            validate_count(-1).unwrap_err().kind,
            ValidationErrorKind::NegativeCount
        );
    }
}
