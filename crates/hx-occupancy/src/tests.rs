//! Unit tests for hx-occupancy.

use hx_core::{Agent, HexPoint, HostileUnit, UnitType};

use crate::OccupancyTracker;

// ── Helpers ───────────────────────────────────────────────────────────────────

fn friend(id: &str, q: i32, r: i32, unit_type: UnitType) -> Agent {
    Agent::new(id, HexPoint::new(q, r), unit_type, 100)
}

fn foe(q: i32, r: i32, unit_type: UnitType) -> HostileUnit {
    HostileUnit { position: HexPoint::new(q, r), unit_type, health: 100 }
}

// ── Snapshot contents ─────────────────────────────────────────────────────────

#[cfg(test)]
mod snapshot {
    use super::*;

    #[test]
    fn empty_by_default() {
        let t = OccupancyTracker::new();
        assert!(t.is_empty());
        assert_eq!(t.occupant_at(HexPoint::new(0, 0)), None);
    }

    #[test]
    fn records_friendly_and_hostile() {
        let mut t = OccupancyTracker::new();
        t.update(&[friend("a", 1, 1, UnitType::Worker)], &[foe(2, 1, UnitType::Warrior)]);

        let f = t.occupant_at(HexPoint::new(1, 1)).unwrap();
        assert!(f.has_friendly(UnitType::Worker));
        assert!(!f.any_hostile());

        let h = t.occupant_at(HexPoint::new(2, 1)).unwrap();
        assert!(h.has_hostile(UnitType::Warrior));
        assert!(!h.has_friendly(UnitType::Warrior));
        assert_eq!(t.len(), 2);
    }

    #[test]
    fn update_replaces_previous_turn() {
        let mut t = OccupancyTracker::new();
        t.update(&[friend("a", 1, 1, UnitType::Worker)], &[]);
        t.update(&[friend("a", 2, 2, UnitType::Worker)], &[]);
        assert_eq!(t.occupant_at(HexPoint::new(1, 1)), None);
        assert!(t.occupant_at(HexPoint::new(2, 2)).is_some());
        assert_eq!(t.len(), 1);
    }

    #[test]
    fn hostile_and_friendly_share_cell() {
        let mut t = OccupancyTracker::new();
        t.update(&[friend("a", 0, 0, UnitType::Scout)], &[foe(0, 0, UnitType::Worker)]);
        let e = t.occupant_at(HexPoint::new(0, 0)).unwrap();
        assert!(e.has_friendly(UnitType::Scout));
        assert!(e.has_hostile(UnitType::Worker));
        assert_eq!(t.len(), 1);
    }

    #[test]
    fn every_stacked_friendly_is_kept() {
        let mut t = OccupancyTracker::new();
        t.update(
            &[friend("a", 0, 0, UnitType::Warrior), friend("b", 0, 0, UnitType::Worker)],
            &[],
        );
        let e = t.occupant_at(HexPoint::new(0, 0)).unwrap();
        assert!(e.has_friendly(UnitType::Warrior));
        assert!(e.has_friendly(UnitType::Worker));
        assert!(!e.has_friendly(UnitType::Scout));
    }
}

// ── Blocking rules ────────────────────────────────────────────────────────────

#[cfg(test)]
mod blocking {
    use super::*;

    #[test]
    fn same_type_friendly_blocks() {
        let mut t = OccupancyTracker::new();
        t.update(&[friend("a", 1, 0, UnitType::Worker)], &[]);
        assert!(t.blocks(HexPoint::new(1, 0), UnitType::Worker));
        assert!(t.holds_type(HexPoint::new(1, 0), UnitType::Worker));
    }

    #[test]
    fn other_type_friendly_does_not_block() {
        let mut t = OccupancyTracker::new();
        t.update(&[friend("a", 1, 0, UnitType::Worker)], &[]);
        assert!(!t.blocks(HexPoint::new(1, 0), UnitType::Scout));
        assert!(!t.holds_type(HexPoint::new(1, 0), UnitType::Scout));
    }

    #[test]
    fn hostile_blocks_every_type() {
        let mut t = OccupancyTracker::new();
        t.update(&[], &[foe(1, 0, UnitType::Scout)]);
        for ty in UnitType::ALL {
            assert!(t.blocks(HexPoint::new(1, 0), ty));
            assert_eq!(t.holds_type(HexPoint::new(1, 0), ty), ty == UnitType::Scout);
        }
    }

    #[test]
    fn empty_cell_never_blocks() {
        let t = OccupancyTracker::new();
        assert!(!t.blocks(HexPoint::new(4, 4), UnitType::Warrior));
    }

    #[test]
    fn stacked_same_type_friendly_blocks() {
        let mut t = OccupancyTracker::new();
        t.update(
            &[friend("a", 1, 0, UnitType::Warrior), friend("b", 1, 0, UnitType::Worker)],
            &[],
        );
        assert!(t.blocks(HexPoint::new(1, 0), UnitType::Worker));
        assert!(t.blocks(HexPoint::new(1, 0), UnitType::Warrior));
        assert!(!t.blocks(HexPoint::new(1, 0), UnitType::Scout));
    }

    #[test]
    fn friendly_under_hostile_still_counts_for_its_type() {
        let mut t = OccupancyTracker::new();
        t.update(&[friend("a", 1, 0, UnitType::Worker)], &[foe(1, 0, UnitType::Warrior)]);
        assert!(t.holds_type(HexPoint::new(1, 0), UnitType::Worker));
        assert!(t.holds_type(HexPoint::new(1, 0), UnitType::Warrior));
        assert!(!t.holds_type(HexPoint::new(1, 0), UnitType::Scout));
    }
}
