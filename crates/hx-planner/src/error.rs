use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlannerError {
    #[error("speed for {unit} must be at least 1")]
    ZeroSpeed { unit: &'static str },

    #[error("planner config: {field} must be at least 1")]
    ZeroBound { field: &'static str },
}

pub type PlannerResult<T> = Result<T, PlannerError>;
