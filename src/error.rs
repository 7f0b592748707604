use thiserror::Error;

/// Fatal engine errors. Anything that is not fatal (unknown course
/// references, a solver falling back to the heuristic, an empty fallback
/// schedule) is represented on `ScheduleResult` instead of here.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("input invariant violation: {0}")]
    InputInvariantViolation(String),

    #[error("ILP solver unavailable: {0}")]
    SolverUnavailable(String),

    #[error("internal consistency check failed: {0}")]
    InternalConsistency(String),
}
