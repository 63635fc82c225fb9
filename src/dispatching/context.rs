//! Dispatch context for rule evaluation.

/// Runtime state passed to dispatching rules.
///
/// Carries the simulation clock at the moment a dispatch decision is made.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchContext {
    /// Current simulation time.
    pub current_time: i64,
}

impl DispatchContext {
    /// Creates a context at the given time.
    pub fn at_time(current_time: i64) -> Self {
        Self { current_time }
    }
}
