//! Input-validation error type.
//!
//! Every variant names the offending field so a caller can tell which part
//! of a world snapshot or assignment list was rejected.  Sub-crates wrap
//! `CoreError` as one variant of their own error enums.

use thiserror::Error;

/// Errors produced while converting caller input into core types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("{field}: coordinate ({q}, {r}) is outside ±{limit}")]
    CoordinateOutOfRange {
        field: &'static str,
        q:     i64,
        r:     i64,
        limit: i64,
    },

    #[error("{field}: unknown unit type code {code}")]
    UnknownUnitType { field: &'static str, code: i64 },

    #[error("{field}: unknown terrain code {code}")]
    UnknownTerrain { field: &'static str, code: i64 },

    #[error("{field}: agent id is empty")]
    EmptyAgentId { field: &'static str },
}

/// Shorthand result type for `hx-core` conversions.
pub type CoreResult<T> = Result<T, CoreError>;
