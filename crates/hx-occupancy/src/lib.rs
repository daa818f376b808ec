//! `hx-occupancy`: which cells hold a unit at the start of the turn.
//!
//! The tracker is rebuilt from scratch every turn from the full list of
//! friendly and hostile units.  It is a *static* snapshot: moves planned
//! during the turn never update it (same-turn claims live in the planner's
//! reservation table instead).
//!
//! # Stacking
//!
//! Different unit types, and hostile units, may share a hex.  Each cell keeps
//! one bit per unit type for each side, so no occupant is ever hidden by
//! another one on the same cell.

use rustc_hash::FxHashMap;

use hx_core::{Agent, HexKey, HexPoint, HostileUnit, UnitType};

#[cfg(test)]
mod tests;

/// Everything standing on one cell at the start of the turn, as one bit per
/// unit type for each side.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OccupancyEntry {
    friendly: u8,
    hostile:  u8,
}

impl OccupancyEntry {
    #[inline]
    fn bit(unit_type: UnitType) -> u8 {
        1 << unit_type.code()
    }

    #[inline]
    pub fn has_friendly(self, unit_type: UnitType) -> bool {
        self.friendly & Self::bit(unit_type) != 0
    }

    #[inline]
    pub fn has_hostile(self, unit_type: UnitType) -> bool {
        self.hostile & Self::bit(unit_type) != 0
    }

    #[inline]
    pub fn any_hostile(self) -> bool {
        self.hostile != 0
    }
}

/// Static per-turn occupancy snapshot keyed by `HexKey`.
#[derive(Default, Debug)]
pub struct OccupancyTracker {
    cells: FxHashMap<HexKey, OccupancyEntry>,
}

impl OccupancyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the snapshot with the given friendly and hostile units.
    ///
    /// Time complexity: O(friendly + hostile).
    pub fn update(&mut self, friendly: &[Agent], hostile: &[HostileUnit]) {
        self.cells.clear();
        self.cells.reserve(friendly.len() + hostile.len());

        for agent in friendly {
            let entry = self.cells.entry(agent.position.key()).or_default();
            entry.friendly |= OccupancyEntry::bit(agent.unit_type);
        }
        for unit in hostile {
            let entry = self.cells.entry(unit.position.key()).or_default();
            entry.hostile |= OccupancyEntry::bit(unit.unit_type);
        }
    }

    /// The occupants of `point`, or `None` if the cell was empty at turn start.
    #[inline]
    pub fn occupant_at(&self, point: HexPoint) -> Option<OccupancyEntry> {
        self.cells.get(&point.key()).copied()
    }

    /// `true` if a unit of `unit_type` may not enter `point` this turn:
    /// the cell holds any hostile unit, or a friendly unit of the same type.
    #[inline]
    pub fn blocks(&self, point: HexPoint, unit_type: UnitType) -> bool {
        self.occupant_at(point)
            .is_some_and(|e| e.any_hostile() || e.has_friendly(unit_type))
    }

    /// `true` if a unit of `unit_type` from either side stands on `point`.
    #[inline]
    pub fn holds_type(&self, point: HexPoint, unit_type: UnitType) -> bool {
        self.occupant_at(point)
            .is_some_and(|e| e.has_friendly(unit_type) || e.has_hostile(unit_type))
    }

    /// Number of occupied cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
