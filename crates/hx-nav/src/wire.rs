//! Wire DTOs in the game server's JSON shape (camelCase, integer codes).
//!
//! Everything here is untrusted: coordinates arrive as `i64`, terrain and
//! unit types as raw codes.  The `to_*` conversions validate into core types
//! and name the offending field on failure.

use serde::{Deserialize, Serialize};

use hx_core::{Agent, AgentId, CoreResult, HexPoint, HostileUnit, TerrainKind, UnitType};
use hx_map::Tile;
use hx_planner::MoveCommand;

use crate::NavResult;

// ── Primitives ────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HexDto {
    pub q: i64,
    pub r: i64,
}

impl HexDto {
    pub fn to_point(self, field: &'static str) -> CoreResult<HexPoint> {
        HexPoint::from_wire(field, self.q, self.r)
    }
}

impl From<HexPoint> for HexDto {
    fn from(p: HexPoint) -> Self {
        Self { q: i64::from(p.q), r: i64::from(p.r) }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileDto {
    pub q:       i64,
    pub r:       i64,
    pub cost:    u32,
    #[serde(rename = "type")]
    pub terrain: i64,
}

impl TileDto {
    pub fn to_tile(self) -> CoreResult<Tile> {
        Ok(Tile {
            point:   HexPoint::from_wire("map", self.q, self.r)?,
            cost:    self.cost,
            terrain: TerrainKind::from_code("map.type", self.terrain)?,
        })
    }
}

impl From<Tile> for TileDto {
    fn from(t: Tile) -> Self {
        Self {
            q:       i64::from(t.point.q),
            r:       i64::from(t.point.r),
            cost:    t.cost,
            terrain: i64::from(t.terrain.code()),
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoodDto {
    pub amount: u32,
    #[serde(rename = "type")]
    pub kind:   i64,
}

// ── Units ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AntDto {
    pub id:        String,
    pub q:         i64,
    pub r:         i64,
    #[serde(rename = "type")]
    pub unit_type: i64,
    pub health:    u32,
    #[serde(default)]
    pub food:      FoodDto,
}

impl AntDto {
    pub fn to_agent(&self) -> CoreResult<Agent> {
        Ok(Agent {
            id:        AgentId::from_wire("ants.id", &self.id)?,
            position:  HexPoint::from_wire("ants", self.q, self.r)?,
            unit_type: UnitType::from_code("ants.type", self.unit_type)?,
            health:    self.health,
            carrying:  self.food.amount > 0,
        })
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnemyDto {
    pub q:         i64,
    pub r:         i64,
    #[serde(rename = "type")]
    pub unit_type: i64,
    pub health:    u32,
}

impl EnemyDto {
    pub fn to_hostile(self) -> CoreResult<HostileUnit> {
        Ok(HostileUnit {
            position:  HexPoint::from_wire("enemies", self.q, self.r)?,
            unit_type: UnitType::from_code("enemies.type", self.unit_type)?,
            health:    self.health,
        })
    }
}

// ── Snapshot ──────────────────────────────────────────────────────────────────

/// One turn's view of the world as sent by the server.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WorldSnapshot {
    pub turn_no:      u64,
    /// Seconds until the server closes the turn.
    pub next_turn_in: f64,
    pub home:         Vec<HexDto>,
    /// Central hex of the home; informational only.
    pub spot:         Option<HexDto>,
    pub map:          Vec<TileDto>,
    pub ants:         Vec<AntDto>,
    pub enemies:      Vec<EnemyDto>,
}

impl WorldSnapshot {
    pub fn from_json(s: &str) -> NavResult<Self> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn homes(&self) -> CoreResult<Vec<HexPoint>> {
        self.home.iter().map(|h| h.to_point("home")).collect()
    }

    pub fn tiles(&self) -> CoreResult<Vec<Tile>> {
        self.map.iter().map(|t| t.to_tile()).collect()
    }

    pub fn agents(&self) -> CoreResult<Vec<Agent>> {
        self.ants.iter().map(AntDto::to_agent).collect()
    }

    pub fn hostiles(&self) -> CoreResult<Vec<HostileUnit>> {
        self.enemies.iter().map(|e| e.to_hostile()).collect()
    }
}

// ── Assignments and commands ──────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentDto {
    pub ant:    String,
    pub target: HexDto,
}

impl AssignmentDto {
    pub fn new(ant: impl Into<String>, target: HexPoint) -> Self {
        Self { ant: ant.into(), target: target.into() }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveCommandDto {
    pub ant:  String,
    pub path: Vec<HexDto>,
}

impl From<&MoveCommand> for MoveCommandDto {
    fn from(cmd: &MoveCommand) -> Self {
        Self {
            ant:  cmd.agent.as_str().to_owned(),
            path: cmd.path.iter().map(|&p| p.into()).collect(),
        }
    }
}

/// Request body for the server's move endpoint.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovesDto {
    pub moves: Vec<MoveCommandDto>,
}
