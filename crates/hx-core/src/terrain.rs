//! Terrain kinds as reported by the game server.
//!
//! All variants carry their wire code as the discriminant.  Movement cost is
//! *not* derived from the kind: the server states it per tile.

use crate::{CoreError, CoreResult};

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum TerrainKind {
    /// A base hex (ours or an enemy's).
    Anthill = 1,
    #[default]
    Plain   = 2,
    /// Passable, slow nuisance terrain.
    Mud     = 3,
    /// Passable, damages units that enter.
    Acid    = 4,
    /// Never passable.
    Rock    = 5,
}

impl TerrainKind {
    /// Decode a wire code, naming `field` on failure.
    pub fn from_code(field: &'static str, code: i64) -> CoreResult<Self> {
        match code {
            1 => Ok(TerrainKind::Anthill),
            2 => Ok(TerrainKind::Plain),
            3 => Ok(TerrainKind::Mud),
            4 => Ok(TerrainKind::Acid),
            5 => Ok(TerrainKind::Rock),
            _ => Err(CoreError::UnknownTerrain { field, code }),
        }
    }

    #[inline]
    pub fn code(self) -> u8 {
        self as u8
    }

    #[inline]
    pub fn is_passable(self) -> bool {
        !matches!(self, TerrainKind::Rock)
    }

    #[inline]
    pub fn is_hazardous(self) -> bool {
        matches!(self, TerrainKind::Acid)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TerrainKind::Anthill => "anthill",
            TerrainKind::Plain   => "plain",
            TerrainKind::Mud     => "mud",
            TerrainKind::Acid    => "acid",
            TerrainKind::Rock    => "rock",
        }
    }
}
