//! Planner tuning.  Every heuristic constant is configuration, not contract.

use hx_core::UnitType;

use crate::{PlannerError, PlannerResult};

// ── UnitSpeeds ────────────────────────────────────────────────────────────────

/// Action points each unit type may spend per turn.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct UnitSpeeds {
    pub worker:  u32,
    pub warrior: u32,
    pub scout:   u32,
}

impl Default for UnitSpeeds {
    fn default() -> Self {
        Self { worker: 5, warrior: 4, scout: 7 }
    }
}

impl UnitSpeeds {
    #[inline]
    pub fn for_type(&self, unit_type: UnitType) -> u32 {
        match unit_type {
            UnitType::Worker  => self.worker,
            UnitType::Warrior => self.warrior,
            UnitType::Scout   => self.scout,
        }
    }
}

// ── PlannerConfig ─────────────────────────────────────────────────────────────

/// Step-scoring weights and safety bounds.
///
/// A candidate cell `n` for an agent heading to `target` scores
///
/// ```text
/// distance_weight * hex_distance(n, target)
///   + cost_weight * cost(n)
///   + penalties(n) - bonus(n)
/// ```
///
/// and the lowest score wins.
///
/// | Field             | Default | Applies to                                 |
/// |-------------------|---------|--------------------------------------------|
/// | `distance_weight` | 10      | every candidate                            |
/// | `cost_weight`     | 1       | every candidate                            |
/// | `mud_penalty`     | 10      | mud cells                                  |
/// | `acid_penalty`    | 20      | acid cells                                 |
/// | `stay_penalty`    | 5       | the agent's current cell                   |
/// | `raid_bonus`      | 50      | enemy-base cells, Warriors only            |
/// | `max_steps`       | 32      | cells per path                             |
/// | `wander_attempts` | 12      | random draws per wander step               |
///
/// The lethal-hazard penalty comes from the map's `MapConfig` so the
/// distance field and the planner agree on it.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PlannerConfig {
    pub speeds:          UnitSpeeds,
    pub distance_weight: i64,
    pub cost_weight:     i64,
    pub mud_penalty:     i64,
    pub acid_penalty:    i64,
    pub stay_penalty:    i64,
    pub raid_bonus:      i64,
    pub max_steps:       usize,
    pub wander_attempts: u32,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            speeds:          UnitSpeeds::default(),
            distance_weight: 10,
            cost_weight:     1,
            mud_penalty:     10,
            acid_penalty:    20,
            stay_penalty:    5,
            raid_bonus:      50,
            max_steps:       32,
            wander_attempts: 12,
        }
    }
}

impl PlannerConfig {
    /// Reject configurations under which no unit could ever move.
    pub fn validate(&self) -> PlannerResult<()> {
        for unit in UnitType::ALL {
            if self.speeds.for_type(unit) == 0 {
                return Err(PlannerError::ZeroSpeed { unit: unit.as_str() });
            }
        }
        if self.max_steps == 0 {
            return Err(PlannerError::ZeroBound { field: "max_steps" });
        }
        if self.wander_attempts == 0 {
            return Err(PlannerError::ZeroBound { field: "wander_attempts" });
        }
        Ok(())
    }
}
