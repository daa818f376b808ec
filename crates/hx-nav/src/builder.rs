//! Fluent builder for constructing a [`Navigator`].

use hx_core::{HexPoint, Turn};
use hx_map::{DistanceField, KnowledgeMap, Tile};
use hx_occupancy::OccupancyTracker;
use hx_planner::MovementPlanner;

use crate::{NavConfig, NavError, NavResult, Navigator, WorldSnapshot};

/// Fluent builder for [`Navigator`].
///
/// # Required inputs
///
/// - home cells (at least one)
///
/// # Optional inputs (have defaults)
///
/// | Method                   | Default                  |
/// |--------------------------|--------------------------|
/// | `.config(c)`             | `NavConfig::default()`   |
/// | `.tiles(v)`              | no observed tiles        |
/// | `.enemy_bases(v, core)`  | no enemy bases, no core  |
///
/// # Example
///
/// ```rust,ignore
/// let mut nav = NavigatorBuilder::from_snapshot(&first_snapshot)?
///     .config(NavConfig::from_toml_str(&text)?)
///     .build()?;
/// ```
pub struct NavigatorBuilder {
    homes:       Vec<HexPoint>,
    config:      Option<NavConfig>,
    tiles:       Vec<Tile>,
    enemy_bases: Vec<HexPoint>,
    enemy_core:  Option<HexPoint>,
}

impl NavigatorBuilder {
    pub fn new(homes: Vec<HexPoint>) -> Self {
        Self {
            homes,
            config:      None,
            tiles:       Vec::new(),
            enemy_bases: Vec::new(),
            enemy_core:  None,
        }
    }

    /// Seed homes and tiles from the first snapshot of a game.
    pub fn from_snapshot(snapshot: &WorldSnapshot) -> NavResult<Self> {
        Ok(Self::new(snapshot.homes()?).tiles(snapshot.tiles()?))
    }

    pub fn config(mut self, config: NavConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn tiles(mut self, tiles: Vec<Tile>) -> Self {
        self.tiles = tiles;
        self
    }

    pub fn enemy_bases(mut self, bases: Vec<HexPoint>, core: Option<HexPoint>) -> Self {
        self.enemy_bases = bases;
        self.enemy_core = core;
        self
    }

    /// Validate inputs, absorb the initial tiles and compute the first
    /// distance field.
    pub fn build(self) -> NavResult<Navigator> {
        if self.homes.is_empty() {
            return Err(NavError::NoHomes);
        }
        let config = self.config.unwrap_or_default();
        config.validate()?;

        let mut map = KnowledgeMap::new(&self.homes, config.map.clone());
        map.update(&self.tiles);
        map.set_enemy_bases(&self.enemy_bases, self.enemy_core);

        let mut field = DistanceField::new();
        field.recompute(&mut map);

        Ok(Navigator {
            planner:   MovementPlanner::new(config.planner.clone()),
            config,
            map,
            field,
            occupancy: OccupancyTracker::new(),
            agents:    Default::default(),
            turn:      Turn::ZERO,
        })
    }
}
