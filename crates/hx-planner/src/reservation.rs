//! Same-turn destination claims.
//!
//! A reservation is keyed by cell *and* unit type: two units of different
//! types may pass through the same hex in one turn, two of the same type may
//! not.  The table lives for one planning call and is then dropped.

use rustc_hash::FxHashSet;

use hx_core::{HexKey, HexPoint, UnitType};

#[derive(Default, Debug)]
pub struct ReservationTable {
    claims: FxHashSet<(HexKey, UnitType)>,
}

impl ReservationTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim `point` for `unit_type`.  Returns `false` if already claimed.
    #[inline]
    pub fn reserve(&mut self, point: HexPoint, unit_type: UnitType) -> bool {
        self.claims.insert((point.key(), unit_type))
    }

    #[inline]
    pub fn is_reserved(&self, point: HexPoint, unit_type: UnitType) -> bool {
        self.claims.contains(&(point.key(), unit_type))
    }

    /// `true` if any cell of `path` is already claimed for `unit_type`.
    pub fn any_reserved(&self, path: &[HexPoint], unit_type: UnitType) -> bool {
        path.iter().any(|&p| self.is_reserved(p, unit_type))
    }

    pub fn reserve_path(&mut self, path: &[HexPoint], unit_type: UnitType) {
        for &p in path {
            self.reserve(p, unit_type);
        }
    }

    pub fn len(&self) -> usize {
        self.claims.len()
    }

    pub fn is_empty(&self) -> bool {
        self.claims.is_empty()
    }
}
