//! Home distance field: multi-source Dijkstra over the knowledge map.
//!
//! # Cost model
//!
//! Sources are the home cells at distance 0.  Moving outward, the
//! tentative distance of a neighbour is `settled + neighbour.cost`, i.e. the
//! sum of the entry costs of every cell between the home and the neighbour
//! (the home itself excluded).  Unknown and impassable cells are never
//! enqueued and never relaxed into.
//!
//! # Recompute policy
//!
//! Recomputation is always full: every non-home `distance`/`predecessor` is
//! cleared and the relaxation reruns from the homes.  `known`, `passable`,
//! and `cost` are never touched.  The field remembers the map revision it
//! was built from so callers can ask whether it is stale.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use hx_core::{HexDirection, HexKey, HexPoint, UnitType};
use hx_occupancy::OccupancyTracker;

use crate::KnowledgeMap;

// ── RelaxStats ────────────────────────────────────────────────────────────────

/// Counters from one recompute pass.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct RelaxStats {
    /// Cells popped with a current (non-stale) cost.
    pub settled:     usize,
    /// Frontier pushes, homes included.
    pub pushes:      usize,
    /// Known passable cells left without a distance.
    pub unreachable: usize,
}

// ── DistanceField ─────────────────────────────────────────────────────────────

/// Shortest accumulated entry cost from every known passable cell to the
/// nearest home, stored on the map's cells.
///
/// The struct itself only keeps the reusable frontier and bookkeeping; the
/// distances live in [`KnowledgeMap`] cells so queries never need both.
#[derive(Default)]
pub struct DistanceField {
    /// Min-heap: (cost, key).  `Reverse` turns `BinaryHeap` (max) into a
    /// min-heap; the `HexKey` secondary key makes tie-breaking deterministic.
    frontier:          BinaryHeap<Reverse<(u32, HexKey)>>,
    computed_revision: Option<u64>,
    last_stats:        RelaxStats,
}

impl DistanceField {
    pub fn new() -> Self {
        Self::default()
    }

    /// `true` before the first recompute and whenever the map changed since.
    pub fn is_stale(&self, map: &KnowledgeMap) -> bool {
        self.computed_revision != Some(map.revision())
    }

    pub fn last_stats(&self) -> RelaxStats {
        self.last_stats
    }

    // ── Recompute ─────────────────────────────────────────────────────────

    /// Clear all non-home distances and rerun the relaxation from the homes.
    ///
    /// Time complexity: O(E log V) over the known cells.
    pub fn recompute(&mut self, map: &mut KnowledgeMap) -> RelaxStats {
        let homes: Vec<HexKey> = map.homes().iter().map(|h| h.key()).collect();
        let revision = map.revision();
        let cells = map.cells_mut();

        for cell in cells.values_mut() {
            cell.distance = None;
            cell.predecessor = None;
        }
        for key in &homes {
            if let Some(cell) = cells.get_mut(key) {
                cell.distance = Some(0);
            }
        }

        let mut stats = RelaxStats::default();
        self.frontier.clear();
        for key in homes {
            self.frontier.push(Reverse((0, key)));
            stats.pushes += 1;
        }

        while let Some(Reverse((cost, key))) = self.frontier.pop() {
            // Skip stale heap entries.
            match cells.get(&key).and_then(|c| c.distance) {
                Some(d) if cost > d => continue,
                None                => continue,
                _                   => {}
            }
            stats.settled += 1;

            let point = key.point();
            for (_, neighbor) in point.neighbors() {
                let nkey = neighbor.key();
                let Some(cell) = cells.get_mut(&nkey) else {
                    continue;
                };
                if !cell.known || !cell.passable {
                    continue;
                }

                let tentative = cost.saturating_add(cell.cost);
                if cell.distance.is_none_or(|d| tentative < d) {
                    cell.distance = Some(tentative);
                    cell.predecessor = Some(key);
                    self.frontier.push(Reverse((tentative, nkey)));
                    stats.pushes += 1;
                }
            }
        }

        stats.unreachable = cells
            .values()
            .filter(|c| c.known && c.passable && c.distance.is_none())
            .count();

        tracing::debug!(
            settled = stats.settled,
            pushes = stats.pushes,
            unreachable = stats.unreachable,
            "distance field recomputed"
        );

        self.computed_revision = Some(revision);
        self.last_stats = stats;
        stats
    }

    // ── Queries ───────────────────────────────────────────────────────────

    /// Accumulated cost from `point` to the nearest home, or `None` if the
    /// cell is unknown, impassable, or not (yet) connected to a home.
    #[inline]
    pub fn distance_to(&self, map: &KnowledgeMap, point: HexPoint) -> Option<u32> {
        map.cell(point).and_then(|c| c.distance)
    }

    /// Cells from `point` to the home it resolves to, following predecessors.
    ///
    /// An unreachable `point` yields `[point]`.  The walk is bounded by the
    /// number of known cells so a stale field can never loop.
    pub fn path_to_home(&self, map: &KnowledgeMap, point: HexPoint) -> Vec<HexPoint> {
        if self.distance_to(map, point).is_none() {
            return vec![point];
        }

        let mut path = Vec::new();
        let mut current = Some(point.key());
        let limit = map.len() + 1;
        while let Some(key) = current {
            if path.len() >= limit {
                break;
            }
            let p = key.point();
            path.push(p);
            current = map.cell(p).and_then(|c| c.predecessor);
        }
        path
    }

    /// The neighbour of `from` with the lowest distance score.
    ///
    /// Neighbours that are unknown, impassable, unreachable, or held by a
    /// unit of the same type (either side) are excluded.  Neighbours
    /// whose hazard damage is at least `health` get the map's
    /// `lethal_penalty` added, so they are taken only when nothing else is
    /// left.  Returns `None` when `from` is already at distance 0 or every
    /// neighbour is excluded.
    pub fn best_direction(
        &self,
        map:       &KnowledgeMap,
        occupancy: &OccupancyTracker,
        from:      HexPoint,
        health:    u32,
        unit_type: UnitType,
    ) -> Option<HexDirection> {
        if self.distance_to(map, from) == Some(0) {
            return None;
        }
        let lethal = u64::from(map.config().lethal_penalty);

        let mut best: Option<(u64, HexDirection)> = None;
        for (dir, neighbor) in from.neighbors() {
            if occupancy.holds_type(neighbor, unit_type) {
                continue;
            }
            let Some(cell) = map.cell(neighbor) else {
                continue;
            };
            if !cell.known || !cell.passable {
                continue;
            }
            let Some(distance) = cell.distance else {
                continue;
            };

            let mut score = u64::from(distance);
            if cell.hazard_damage.is_some_and(|dmg| dmg >= health) {
                score += lethal;
            }
            if best.is_none_or(|(s, _)| score < s) {
                best = Some((score, dir));
            }
        }
        best.map(|(_, dir)| dir)
    }
}
