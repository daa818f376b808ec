//! Unit types and the per-turn agent views supplied by the caller.

use crate::{AgentId, CoreError, CoreResult, HexPoint};

/// The kind of a unit.  Discriminants match the server's wire codes.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum UnitType {
    Worker  = 0,
    Warrior = 1,
    Scout   = 2,
}

impl UnitType {
    pub const ALL: [UnitType; 3] = [UnitType::Worker, UnitType::Warrior, UnitType::Scout];

    /// Decode a wire code, naming `field` on failure.
    pub fn from_code(field: &'static str, code: i64) -> CoreResult<Self> {
        match code {
            0 => Ok(UnitType::Worker),
            1 => Ok(UnitType::Warrior),
            2 => Ok(UnitType::Scout),
            _ => Err(CoreError::UnknownUnitType { field, code }),
        }
    }

    #[inline]
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Planning priority: Workers first, then ascending type code.
    ///
    /// Smaller keys plan earlier.
    #[inline]
    pub fn priority_key(self) -> (u8, u8) {
        match self {
            UnitType::Worker => (0, 0),
            other            => (1, other.code()),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            UnitType::Worker  => "worker",
            UnitType::Warrior => "warrior",
            UnitType::Scout   => "scout",
        }
    }
}

/// Read-only view of one friendly unit for the current turn.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Agent {
    pub id:        AgentId,
    pub position:  HexPoint,
    pub unit_type: UnitType,
    pub health:    u32,
    /// `true` while the unit carries cargo (food).
    pub carrying:  bool,
}

impl Agent {
    pub fn new(id: impl Into<AgentId>, position: HexPoint, unit_type: UnitType, health: u32) -> Self {
        Self { id: id.into(), position, unit_type, health, carrying: false }
    }
}

/// A hostile unit seen this turn.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HostileUnit {
    pub position:  HexPoint,
    pub unit_type: UnitType,
    pub health:    u32,
}
