//! Agent identifier.
//!
//! The game server names ants with opaque strings, so unlike the packed
//! `HexKey` this is a thin owned-string wrapper.  It is `Ord + Hash` so it
//! can key maps and sort deterministically.

use std::fmt;

use crate::{CoreError, CoreResult};

/// Identifier of a friendly unit, as issued by the game server.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct AgentId(pub String);

impl AgentId {
    pub fn new(id: impl Into<String>) -> Self {
        AgentId(id.into())
    }

    /// Validate a wire identifier.  Empty ids are rejected.
    pub fn from_wire(field: &'static str, id: &str) -> CoreResult<Self> {
        if id.is_empty() {
            return Err(CoreError::EmptyAgentId { field });
        }
        Ok(AgentId(id.to_owned()))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AgentId {
    fn from(s: &str) -> Self {
        AgentId(s.to_owned())
    }
}

impl From<String> for AgentId {
    fn from(s: String) -> Self {
        AgentId(s)
    }
}
