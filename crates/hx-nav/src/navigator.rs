//! The `Navigator` struct and its per-turn pipeline.

use std::collections::BTreeMap;
use std::time::Instant;

use hx_core::{Agent, AgentId, HexDirection, HexPoint, HostileUnit, Turn, UnitType};
use hx_map::{DistanceField, KnowledgeMap, MapDelta, RelaxStats, Tile};
use hx_occupancy::OccupancyTracker;
use hx_planner::{truncate_to_budget, Assignment, MoveCommand, MovementPlanner, ReservationTable};

use crate::{AssignmentDto, MoveCommandDto, NavConfig, NavError, NavResult, TurnObserver, WorldSnapshot};

// ── Navigator ─────────────────────────────────────────────────────────────────

/// Long-lived planning state for one game, owned by the turn loop.
///
/// Persistent state (map, occupancy, current agents) is mutated only through
/// `&mut self` between turns; every query and planning call takes `&self`.
///
/// # Per-turn phases
///
/// 1. **Observe**: absorb tiles into the knowledge map, replace the
///    occupancy snapshot and the agent roster.
/// 2. **Distances**: rebuild the distance field if the map changed.
/// 3. **Assign**: targets come from the caller.
/// 4. **Plan**: the planner reads everything and returns commands.
///
/// Create via [`NavigatorBuilder`][crate::NavigatorBuilder].
pub struct Navigator {
    pub(crate) config:    NavConfig,
    pub(crate) map:       KnowledgeMap,
    pub(crate) field:     DistanceField,
    pub(crate) occupancy: OccupancyTracker,
    pub(crate) planner:   MovementPlanner,
    /// Friendly units of the current turn, keyed by id.
    pub(crate) agents:    BTreeMap<AgentId, Agent>,
    pub(crate) turn:      Turn,
}

impl Navigator {
    // ── Phase 1: observation ──────────────────────────────────────────────

    /// Absorb observed tiles.  The distance field is not rebuilt here.
    pub fn update_map(&mut self, tiles: &[Tile]) -> MapDelta {
        let delta = self.map.update(tiles);
        if delta.needs_recompute() {
            tracing::debug!(added = delta.added, changed = delta.changed, "map updated");
        }
        delta
    }

    /// Replace the friendly roster and the occupancy snapshot.
    ///
    /// Fails without touching any state if two agents share an id.
    pub fn update_units(&mut self, friendly: Vec<Agent>, hostile: &[HostileUnit]) -> NavResult<()> {
        let roster = roster(friendly)?;
        self.install_roster(roster, hostile);
        Ok(())
    }

    /// Record enemy base hexes and the impassable enemy core.
    pub fn set_enemy_bases(&mut self, bases: &[HexPoint], core: Option<HexPoint>) -> bool {
        self.map.set_enemy_bases(bases, core)
    }

    // ── Phase 2: distances ────────────────────────────────────────────────

    pub fn recompute_distances(&mut self) -> RelaxStats {
        self.field.recompute(&mut self.map)
    }

    /// Recompute only if the map changed since the last pass.
    pub fn refresh_distances(&mut self) -> Option<RelaxStats> {
        self.field.is_stale(&self.map).then(|| self.recompute_distances())
    }

    // ── Queries ───────────────────────────────────────────────────────────

    pub fn distance_to(&self, point: HexPoint) -> Option<u32> {
        self.field.distance_to(&self.map, point)
    }

    pub fn path_to_home(&self, point: HexPoint) -> Vec<HexPoint> {
        self.field.path_to_home(&self.map, point)
    }

    pub fn best_direction(&self, point: HexPoint, health: u32, unit_type: UnitType) -> Option<HexDirection> {
        self.field.best_direction(&self.map, &self.occupancy, point, health, unit_type)
    }

    /// This turn's leg of the agent's shortest path home.
    pub fn home_route(&self, id: &AgentId) -> NavResult<MoveCommand> {
        let agent = self.agent_or_err("agent", id)?;
        let path = self.path_to_home(agent.position);
        let budget = self.planner.budget(agent.unit_type);
        let steps = truncate_to_budget(path.get(1..).unwrap_or_default(), budget, &self.map);
        let cost = steps.iter().filter_map(|&p| self.map.cost_of(p)).sum();
        Ok(MoveCommand { agent: id.clone(), path: steps, cost })
    }

    pub fn agent(&self, id: &AgentId) -> Option<&Agent> {
        self.agents.get(id)
    }

    pub fn agents(&self) -> impl Iterator<Item = &Agent> {
        self.agents.values()
    }

    pub fn map(&self) -> &KnowledgeMap {
        &self.map
    }

    pub fn field(&self) -> &DistanceField {
        &self.field
    }

    pub fn occupancy(&self) -> &OccupancyTracker {
        &self.occupancy
    }

    pub fn config(&self) -> &NavConfig {
        &self.config
    }

    pub fn turn(&self) -> Turn {
        self.turn
    }

    // ── Phase 4: planning ─────────────────────────────────────────────────

    /// Plan moves for wire assignments against the current roster.
    pub fn plan_moves(&self, assignments: &[AssignmentDto]) -> NavResult<Vec<MoveCommand>> {
        let resolved = resolve(&self.agents, assignments)?;
        Ok(self.planner.plan_moves(&self.map, &self.occupancy, &resolved))
    }

    /// Random walks for the given agents, seeded by `seed` and each id.
    pub fn wander(&self, ids: &[AgentId], seed: u64) -> NavResult<Vec<MoveCommand>> {
        let agents = ids
            .iter()
            .map(|id| self.agent_or_err("wander", id).cloned())
            .collect::<NavResult<Vec<Agent>>>()?;
        let mut reservations = ReservationTable::new();
        Ok(self.planner.wander_all(&self.map, &self.occupancy, &agents, seed, &mut reservations))
    }

    // ── Full turn ─────────────────────────────────────────────────────────

    /// Run every phase for one server snapshot.
    ///
    /// The snapshot and the assignments are validated before any state is
    /// mutated.  Commands come back in planning order; with
    /// `config.wander_idle`, unassigned agents follow with random walks.
    pub fn process_turn<O: TurnObserver>(
        &mut self,
        snapshot:    &WorldSnapshot,
        assignments: &[AssignmentDto],
        observer:    &mut O,
    ) -> NavResult<Vec<MoveCommandDto>> {
        let started = Instant::now();
        let turn = Turn(snapshot.turn_no);
        observer.on_turn_start(turn);

        // ── Validate everything up front ──────────────────────────────────
        let tiles = snapshot.tiles()?;
        let hostile = snapshot.hostiles()?;
        let roster = roster(snapshot.agents()?)?;
        let resolved = resolve(&roster, assignments)?;

        if self.turn != Turn::ZERO && turn.since(self.turn) > 1 {
            tracing::warn!(previous = %self.turn, current = %turn, "turns skipped");
        }
        self.turn = turn;

        // ── Phase 1: observe ──────────────────────────────────────────────
        let delta = self.update_map(&tiles);
        observer.on_map_updated(turn, delta);
        self.install_roster(roster, &hostile);

        // ── Phase 2: distances ────────────────────────────────────────────
        if let Some(stats) = self.refresh_distances() {
            observer.on_distances_recomputed(turn, stats);
        }

        // ── Phase 4: plan ─────────────────────────────────────────────────
        let mut reservations = ReservationTable::new();
        let mut commands =
            self.planner.plan_moves_with(&self.map, &self.occupancy, &resolved, &mut reservations);

        if self.config.wander_idle {
            let idle: Vec<Agent> = self
                .agents
                .values()
                .filter(|a| !resolved.iter().any(|r| r.agent.id == a.id))
                .cloned()
                .collect();
            commands.extend(self.planner.wander_all(
                &self.map,
                &self.occupancy,
                &idle,
                self.config.wander_seed ^ snapshot.turn_no,
                &mut reservations,
            ));
        }

        let elapsed = started.elapsed();
        tracing::info!(
            turn = %turn,
            agents = self.agents.len(),
            commands = commands.len(),
            known_cells = self.map.len(),
            elapsed_us = elapsed.as_micros() as u64,
            "turn planned"
        );
        observer.on_turn_end(turn, &commands, elapsed);

        Ok(commands.iter().map(MoveCommandDto::from).collect())
    }

    // ── Helpers ───────────────────────────────────────────────────────────

    fn install_roster(&mut self, roster: BTreeMap<AgentId, Agent>, hostile: &[HostileUnit]) {
        let agents: Vec<Agent> = roster.values().cloned().collect();
        self.occupancy.update(&agents, hostile);
        self.agents = roster;
    }

    fn agent_or_err(&self, field: &'static str, id: &AgentId) -> NavResult<&Agent> {
        self.agents
            .get(id)
            .ok_or_else(|| NavError::UnknownAgent { field, id: id.clone() })
    }
}

/// Key agents by id, rejecting duplicates.
fn roster(friendly: Vec<Agent>) -> NavResult<BTreeMap<AgentId, Agent>> {
    let mut out = BTreeMap::new();
    for agent in friendly {
        if out.contains_key(&agent.id) {
            return Err(NavError::DuplicateAgent { field: "ants.id", id: agent.id });
        }
        out.insert(agent.id.clone(), agent);
    }
    Ok(out)
}

/// Turn wire assignments into planner input, in the order given.
fn resolve(
    roster:      &BTreeMap<AgentId, Agent>,
    assignments: &[AssignmentDto],
) -> NavResult<Vec<Assignment>> {
    let mut seen = std::collections::BTreeSet::new();
    assignments
        .iter()
        .map(|dto| {
            let id = AgentId::from_wire("assignments.ant", &dto.ant)?;
            let agent = roster
                .get(&id)
                .ok_or_else(|| NavError::UnknownAgent { field: "assignments.ant", id: id.clone() })?;
            if !seen.insert(id.clone()) {
                return Err(NavError::DuplicateAgent { field: "assignments.ant", id });
            }
            let target = dto.target.to_point("assignments.target")?;
            Ok(Assignment::new(agent.clone(), target))
        })
        .collect()
}
