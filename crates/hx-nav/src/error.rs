use thiserror::Error;

use hx_core::{AgentId, CoreError};
use hx_map::MapError;
use hx_planner::PlannerError;

#[derive(Debug, Error)]
pub enum NavError {
    #[error("invalid input: {0}")]
    Input(#[from] CoreError),

    #[error("{field}: unknown agent {id}")]
    UnknownAgent { field: &'static str, id: AgentId },

    #[error("{field}: agent {id} appears more than once")]
    DuplicateAgent { field: &'static str, id: AgentId },

    #[error("at least one home cell is required")]
    NoHomes,

    #[error("navigator configuration error: {0}")]
    Config(#[from] PlannerError),

    #[error("config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("snapshot parse error: {0}")]
    Snapshot(#[from] serde_json::Error),

    #[error("map error: {0}")]
    Map(#[from] MapError),
}

pub type NavResult<T> = Result<T, NavError>;
