//! Priority-greedy multi-agent movement planning.
//!
//! # Algorithm
//!
//! Agents are planned one at a time in priority order (Workers first, then
//! ascending unit-type code, input order among equals).  Each agent walks
//! greedily from its position: at every step the current cell ("stay") and
//! its six neighbours are scored, the lowest score wins, and the walk stops
//! as soon as staying wins, the target is reached, the action-point budget
//! leaves no affordable neighbour, or `max_steps` cells have been taken.
//!
//! Every cell a finished path enters is reserved under the agent's unit
//! type, so later agents of the same type route around it.
//!
//! # Parallel speculation
//!
//! With the `parallel` feature, all walks are first computed on Rayon's pool
//! without reservations.  They are then committed in priority order; a walk
//! that touches a cell already reserved for its type is recomputed against
//! the table.  Reservations only ever remove losing candidates, so a
//! speculative walk that never touches a reserved cell is exactly what the
//! sequential planner would have produced.

use rustc_hash::FxHashSet;

use hx_core::{Agent, AgentId, HexKey, HexPoint, TerrainKind, UnitType};
use hx_map::KnowledgeMap;
use hx_occupancy::OccupancyTracker;

use crate::{PlannerConfig, ReservationTable};

// ── Inputs and outputs ────────────────────────────────────────────────────────

/// One agent and the cell it should head for this turn.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Assignment {
    pub agent:  Agent,
    pub target: HexPoint,
}

impl Assignment {
    pub fn new(agent: Agent, target: HexPoint) -> Self {
        Self { agent, target }
    }
}

/// The planned path for one agent.  An empty `path` means "stay".
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveCommand {
    pub agent: AgentId,
    /// Cells to enter in order; the starting cell is not included.
    pub path:  Vec<HexPoint>,
    /// Action points spent entering `path`.
    pub cost:  u32,
}

impl MoveCommand {
    pub fn stay(agent: AgentId) -> Self {
        Self { agent, path: Vec::new(), cost: 0 }
    }

    #[inline]
    pub fn is_stay(&self) -> bool {
        self.path.is_empty()
    }

    /// Final cell of the path, or `None` when staying.
    pub fn destination(&self) -> Option<HexPoint> {
        self.path.last().copied()
    }
}

// ── MovementPlanner ───────────────────────────────────────────────────────────

/// Stateless between turns; owns only its configuration.
#[derive(Clone, Debug, Default)]
pub struct MovementPlanner {
    config: PlannerConfig,
}

impl MovementPlanner {
    pub fn new(config: PlannerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Per-turn action points for `unit_type`.
    #[inline]
    pub fn budget(&self, unit_type: UnitType) -> u32 {
        self.config.speeds.for_type(unit_type)
    }

    /// Plan one command per assignment with a fresh reservation table.
    ///
    /// Commands are returned in planning (priority) order.
    pub fn plan_moves(
        &self,
        map:         &KnowledgeMap,
        occupancy:   &OccupancyTracker,
        assignments: &[Assignment],
    ) -> Vec<MoveCommand> {
        let mut reservations = ReservationTable::new();
        self.plan_moves_with(map, occupancy, assignments, &mut reservations)
    }

    /// Like [`plan_moves`](Self::plan_moves) but claims cells in a
    /// caller-owned table, so wander moves planned afterwards in the same
    /// turn see these claims.
    pub fn plan_moves_with(
        &self,
        map:          &KnowledgeMap,
        occupancy:    &OccupancyTracker,
        assignments:  &[Assignment],
        reservations: &mut ReservationTable,
    ) -> Vec<MoveCommand> {
        for a in assignments {
            if !map.is_known(a.target) {
                tracing::warn!(agent = %a.agent.id, target = %a.target, "target cell is unknown");
            }
        }

        let order = priority_order(assignments.iter().map(|a| a.agent.unit_type));
        let commands = self.commit(map, occupancy, assignments, &order, reservations);

        tracing::debug!(
            agents = commands.len(),
            moving = commands.iter().filter(|c| !c.is_stay()).count(),
            reserved = reservations.len(),
            "moves planned"
        );
        commands
    }

    #[cfg(not(feature = "parallel"))]
    fn commit(
        &self,
        map:          &KnowledgeMap,
        occupancy:    &OccupancyTracker,
        assignments:  &[Assignment],
        order:        &[usize],
        reservations: &mut ReservationTable,
    ) -> Vec<MoveCommand> {
        order
            .iter()
            .map(|&i| {
                let a = &assignments[i];
                let cmd = self.walk(map, occupancy, &a.agent, a.target, Some(&*reservations));
                reservations.reserve_path(&cmd.path, a.agent.unit_type);
                cmd
            })
            .collect()
    }

    #[cfg(feature = "parallel")]
    fn commit(
        &self,
        map:          &KnowledgeMap,
        occupancy:    &OccupancyTracker,
        assignments:  &[Assignment],
        order:        &[usize],
        reservations: &mut ReservationTable,
    ) -> Vec<MoveCommand> {
        use rayon::prelude::*;

        let speculative: Vec<MoveCommand> = order
            .par_iter()
            .map(|&i| {
                let a = &assignments[i];
                self.walk(map, occupancy, &a.agent, a.target, None)
            })
            .collect();

        order
            .iter()
            .zip(speculative)
            .map(|(&i, spec)| {
                let a = &assignments[i];
                let cmd = if reservations.any_reserved(&spec.path, a.agent.unit_type) {
                    self.walk(map, occupancy, &a.agent, a.target, Some(&*reservations))
                } else {
                    spec
                };
                reservations.reserve_path(&cmd.path, a.agent.unit_type);
                cmd
            })
            .collect()
    }

    // ── Greedy walk ───────────────────────────────────────────────────────

    fn walk(
        &self,
        map:          &KnowledgeMap,
        occupancy:    &OccupancyTracker,
        agent:        &Agent,
        target:       HexPoint,
        reservations: Option<&ReservationTable>,
    ) -> MoveCommand {
        let budget = self.budget(agent.unit_type);
        let mut remaining = budget;
        let mut current = agent.position;
        let mut path = Vec::new();
        let mut visited = FxHashSet::default();
        visited.insert(current.key());

        while current != target && path.len() < self.config.max_steps {
            // Stay is evaluated first so it wins ties.
            let mut best_score = self.score(map, agent, current, target) + self.config.stay_penalty;
            let mut best: Option<(HexPoint, u32)> = None;

            for (_, neighbor) in current.neighbors() {
                let Some(cost) =
                    self.admissible(map, occupancy, agent, neighbor, remaining, &visited, reservations)
                else {
                    continue;
                };
                let score = self.score(map, agent, neighbor, target);
                if score < best_score {
                    best_score = score;
                    best = Some((neighbor, cost));
                }
            }

            let Some((next, cost)) = best else { break };
            remaining -= cost;
            visited.insert(next.key());
            path.push(next);
            current = next;
        }

        if path.is_empty() && agent.position != target {
            tracing::debug!(agent = %agent.id, at = %agent.position, "no better move; staying");
        }
        MoveCommand { agent: agent.id.clone(), path, cost: budget - remaining }
    }

    /// Entry cost of `point` if `agent` may step onto it, else `None`.
    ///
    /// Rejects unknown and impassable cells, cells costing more than
    /// `remaining`, hostile or same-type friendly occupants, same-type
    /// reservations, and cells already entered this turn.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn admissible(
        &self,
        map:          &KnowledgeMap,
        occupancy:    &OccupancyTracker,
        agent:        &Agent,
        point:        HexPoint,
        remaining:    u32,
        visited:      &FxHashSet<HexKey>,
        reservations: Option<&ReservationTable>,
    ) -> Option<u32> {
        let cell = map.cell(point)?;
        if !cell.known || !cell.passable || cell.cost > remaining {
            return None;
        }
        if occupancy.blocks(point, agent.unit_type) {
            return None;
        }
        if reservations.is_some_and(|r| r.is_reserved(point, agent.unit_type)) {
            return None;
        }
        if visited.contains(&point.key()) {
            return None;
        }
        Some(cell.cost)
    }

    /// Score of `agent` standing on `point` while heading to `target`.
    ///
    /// Lower is better.  The stay penalty is not included.
    pub fn score(&self, map: &KnowledgeMap, agent: &Agent, point: HexPoint, target: HexPoint) -> i64 {
        let cfg = &self.config;
        let mut score = cfg.distance_weight * i64::from(point.distance(target));

        if let Some(cell) = map.cell(point).filter(|c| c.known) {
            score += cfg.cost_weight * i64::from(cell.cost);
            if cell.hazard_damage.is_some_and(|dmg| dmg >= agent.health) {
                score += i64::from(map.config().lethal_penalty);
            }
            match cell.terrain {
                TerrainKind::Mud  => score += cfg.mud_penalty,
                TerrainKind::Acid => score += cfg.acid_penalty,
                _ => {}
            }
        }
        if agent.unit_type == UnitType::Warrior && map.is_enemy_base(point) {
            score -= cfg.raid_bonus;
        }
        score
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Indices into the input in planning order (stable).
pub(crate) fn priority_order(types: impl Iterator<Item = UnitType>) -> Vec<usize> {
    let keys: Vec<(u8, u8)> = types.map(UnitType::priority_key).collect();
    let mut order: Vec<usize> = (0..keys.len()).collect();
    order.sort_by_key(|&i| keys[i]);
    order
}

/// Leading cells of `steps` whose cumulative entry cost fits `budget`.
///
/// `steps` excludes the starting cell.  The walk also stops at the first
/// unknown or impassable cell.
pub fn truncate_to_budget(steps: &[HexPoint], budget: u32, map: &KnowledgeMap) -> Vec<HexPoint> {
    let mut spent: u32 = 0;
    let mut out = Vec::new();
    for &p in steps {
        if !map.is_passable(p) {
            break;
        }
        let Some(cost) = map.cost_of(p) else { break };
        match spent.checked_add(cost) {
            Some(total) if total <= budget => {
                spent = total;
                out.push(p);
            }
            _ => break,
        }
    }
    out
}
