//! The knowledge map: every cell we have ever observed.
//!
//! # Growth model
//!
//! The map only grows.  `update` upserts observed tiles and never turns a
//! known cell back into an unknown one.  Home cells are inserted at
//! construction (known, passable, `distance = 0`) so the distance field has
//! its sources even before the first observation covers them.
//!
//! # Resettable fields
//!
//! `distance` and `predecessor` belong to the [`DistanceField`] pass.  Any
//! observation that changes a cell (or adds one) clears both on that cell and
//! bumps the map revision, which marks the field stale until the next
//! recompute.  Re-observing a cell with identical terrain and cost is a no-op.
//!
//! [`DistanceField`]: crate::DistanceField

use rustc_hash::{FxHashMap, FxHashSet};

use hx_core::{HexKey, HexPoint, TerrainKind};

// ── Config ────────────────────────────────────────────────────────────────────

/// Terrain and hazard constants.
///
/// | Field           | Default | Meaning                                      |
/// |-----------------|---------|----------------------------------------------|
/// | `acid_damage`   | 20      | Damage dealt on entering an acid cell        |
/// | `lethal_penalty`| 1000    | Score addend for cells whose damage ≥ health |
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MapConfig {
    pub acid_damage:    u32,
    pub lethal_penalty: u32,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self { acid_damage: 20, lethal_penalty: 1_000 }
    }
}

// ── Tile ──────────────────────────────────────────────────────────────────────

/// One observed tile, already validated.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tile {
    pub point:   HexPoint,
    /// Action points needed to enter the tile.
    pub cost:    u32,
    pub terrain: TerrainKind,
}

impl Tile {
    pub fn new(q: i32, r: i32, cost: u32, terrain: TerrainKind) -> Self {
        Self { point: HexPoint::new(q, r), cost, terrain }
    }
}

// ── Cell ──────────────────────────────────────────────────────────────────────

/// Knowledge record for a single hex.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub known:         bool,
    pub passable:      bool,
    pub cost:          u32,
    pub terrain:       TerrainKind,
    pub hazard_damage: Option<u32>,
    /// Accumulated cost to the nearest home; `None` = not (yet) reachable.
    pub distance:      Option<u32>,
    /// Home-ward neighbour on the shortest path.
    pub predecessor:   Option<HexKey>,
}

impl Cell {
    fn home() -> Self {
        Self {
            known:         true,
            passable:      true,
            cost:          0,
            terrain:       TerrainKind::Anthill,
            hazard_damage: None,
            distance:      Some(0),
            predecessor:   None,
        }
    }

    /// `true` if the observable fields (not the distance data) match.
    fn same_observation(&self, other: &Cell) -> bool {
        self.known == other.known
            && self.passable == other.passable
            && self.cost == other.cost
            && self.terrain == other.terrain
            && self.hazard_damage == other.hazard_damage
    }
}

// ── MapDelta ──────────────────────────────────────────────────────────────────

/// What an `update` call changed.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct MapDelta {
    /// Cells observed for the first time.
    pub added:   usize,
    /// Previously known cells whose terrain, cost, or passability changed.
    pub changed: usize,
}

impl MapDelta {
    /// `true` if the distance field must be recomputed.
    #[inline]
    pub fn needs_recompute(&self) -> bool {
        self.added > 0 || self.changed > 0
    }
}

// ── KnowledgeMap ──────────────────────────────────────────────────────────────

/// Mutable record of everything known about the grid, keyed by `HexKey`.
pub struct KnowledgeMap {
    config:      MapConfig,
    cells:       FxHashMap<HexKey, Cell>,
    homes:       Vec<HexPoint>,
    home_keys:   FxHashSet<HexKey>,
    enemy_bases: FxHashSet<HexKey>,
    enemy_core:  Option<HexKey>,
    /// Bumped on every change that can affect distances.
    revision:    u64,
}

impl KnowledgeMap {
    /// Create a map whose only known cells are `homes`.
    pub fn new(homes: &[HexPoint], config: MapConfig) -> Self {
        let mut cells = FxHashMap::default();
        let mut home_keys = FxHashSet::default();
        let mut unique_homes = Vec::with_capacity(homes.len());
        for &h in homes {
            if home_keys.insert(h.key()) {
                cells.insert(h.key(), Cell::home());
                unique_homes.push(h);
            }
        }
        Self {
            config,
            cells,
            homes: unique_homes,
            home_keys,
            enemy_bases: FxHashSet::default(),
            enemy_core: None,
            revision: 0,
        }
    }

    // ── Mutation ──────────────────────────────────────────────────────────

    /// Upsert every observed tile.
    ///
    /// Returns how many cells were added or changed.  Callers must recompute
    /// the distance field when [`MapDelta::needs_recompute`] is `true`.
    pub fn update(&mut self, tiles: &[Tile]) -> MapDelta {
        let mut delta = MapDelta::default();
        self.cells.reserve(tiles.len());

        for tile in tiles {
            let key = tile.point.key();
            let is_home = self.home_keys.contains(&key);
            let observed = Cell {
                known:         true,
                passable:      tile.terrain.is_passable() && Some(key) != self.enemy_core,
                cost:          tile.cost,
                terrain:       tile.terrain,
                hazard_damage: tile.terrain.is_hazardous().then_some(self.config.acid_damage),
                distance:      is_home.then_some(0),
                predecessor:   None,
            };

            match self.cells.get_mut(&key) {
                Some(existing) if existing.same_observation(&observed) => {}
                Some(existing) => {
                    *existing = observed;
                    delta.changed += 1;
                }
                None => {
                    self.cells.insert(key, observed);
                    delta.added += 1;
                }
            }
        }

        if delta.needs_recompute() {
            self.revision += 1;
        }
        delta
    }

    /// Record enemy base hexes and the enemy core hex.
    ///
    /// The core hex is impassable from now on; a previously recorded core
    /// hex regains the passability of its terrain.  Returns `true` if any
    /// known cell's passability changed.
    pub fn set_enemy_bases(&mut self, bases: &[HexPoint], core: Option<HexPoint>) -> bool {
        self.enemy_bases = bases.iter().map(|p| p.key()).collect();

        let core = core.map(HexPoint::key);
        if core == self.enemy_core {
            return false;
        }

        let mut changed = false;
        if let Some(old) = self.enemy_core.take() {
            if let Some(cell) = self.cells.get_mut(&old) {
                if cell.known && cell.terrain.is_passable() && !cell.passable {
                    cell.passable = true;
                    changed = true;
                }
            }
        }
        if let Some(new) = core {
            if let Some(cell) = self.cells.get_mut(&new) {
                if cell.passable {
                    cell.passable = false;
                    cell.distance = None;
                    cell.predecessor = None;
                    changed = true;
                }
            }
        }
        self.enemy_core = core;

        if changed {
            self.revision += 1;
        }
        changed
    }

    // ── Point queries ─────────────────────────────────────────────────────

    #[inline]
    pub fn cell(&self, point: HexPoint) -> Option<&Cell> {
        self.cells.get(&point.key())
    }

    #[inline]
    pub fn is_known(&self, point: HexPoint) -> bool {
        self.cell(point).is_some_and(|c| c.known)
    }

    /// `false` for unknown cells.
    #[inline]
    pub fn is_passable(&self, point: HexPoint) -> bool {
        self.cell(point).is_some_and(|c| c.known && c.passable)
    }

    /// Entry cost, or `None` for unknown cells.
    #[inline]
    pub fn cost_of(&self, point: HexPoint) -> Option<u32> {
        self.cell(point).filter(|c| c.known).map(|c| c.cost)
    }

    #[inline]
    pub fn hazard_of(&self, point: HexPoint) -> Option<u32> {
        self.cell(point).and_then(|c| c.hazard_damage)
    }

    #[inline]
    pub fn terrain_of(&self, point: HexPoint) -> Option<TerrainKind> {
        self.cell(point).filter(|c| c.known).map(|c| c.terrain)
    }

    #[inline]
    pub fn is_home(&self, point: HexPoint) -> bool {
        self.home_keys.contains(&point.key())
    }

    #[inline]
    pub fn is_enemy_base(&self, point: HexPoint) -> bool {
        self.enemy_bases.contains(&point.key())
    }

    pub fn enemy_core(&self) -> Option<HexPoint> {
        self.enemy_core.map(HexKey::point)
    }

    // ── Whole-map access ──────────────────────────────────────────────────

    pub fn homes(&self) -> &[HexPoint] {
        &self.homes
    }

    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Number of known cells (homes included).
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (HexPoint, &Cell)> + '_ {
        self.cells.iter().map(|(k, c)| (k.point(), c))
    }

    // ── Crate-private access for the distance field ───────────────────────

    pub(crate) fn cells_mut(&mut self) -> &mut FxHashMap<HexKey, Cell> {
        &mut self.cells
    }
}
