//! Bounded random walk for units with no assignment.
//!
//! Each step draws up to `wander_attempts` random directions and takes the
//! first one that passes the same admissibility checks as a planned step.
//! The walk ends when the budget is spent, `max_steps` is reached, or a
//! step exhausts its draws.  It is a plain loop with a fixed upper bound.

use rustc_hash::FxHashSet;

use hx_core::{Agent, HexDirection, WanderRng};
use hx_map::KnowledgeMap;
use hx_occupancy::OccupancyTracker;

use crate::planner::priority_order;
use crate::{MoveCommand, MovementPlanner, ReservationTable};

impl MovementPlanner {
    /// Random walk for one agent; claims its cells in `reservations`.
    pub fn wander(
        &self,
        map:          &KnowledgeMap,
        occupancy:    &OccupancyTracker,
        agent:        &Agent,
        rng:          &mut WanderRng,
        reservations: &mut ReservationTable,
    ) -> MoveCommand {
        let budget = self.budget(agent.unit_type);
        let mut remaining = budget;
        let mut current = agent.position;
        let mut path = Vec::new();
        let mut visited = FxHashSet::default();
        visited.insert(current.key());

        'steps: while remaining > 0 && path.len() < self.config().max_steps {
            for _ in 0..self.config().wander_attempts {
                let Some(&dir) = rng.choose(&HexDirection::ALL) else {
                    break 'steps;
                };
                let next = current.neighbor(dir);
                if let Some(cost) = self.admissible(
                    map, occupancy, agent, next, remaining, &visited, Some(&*reservations),
                ) {
                    remaining -= cost;
                    visited.insert(next.key());
                    path.push(next);
                    current = next;
                    continue 'steps;
                }
            }
            break;
        }

        reservations.reserve_path(&path, agent.unit_type);
        MoveCommand { agent: agent.id.clone(), path, cost: budget - remaining }
    }

    /// Wander every agent in priority order, seeding each walk from
    /// `turn_seed` and the agent id.
    pub fn wander_all(
        &self,
        map:          &KnowledgeMap,
        occupancy:    &OccupancyTracker,
        agents:       &[Agent],
        turn_seed:    u64,
        reservations: &mut ReservationTable,
    ) -> Vec<MoveCommand> {
        priority_order(agents.iter().map(|a| a.unit_type))
            .into_iter()
            .map(|i| {
                let agent = &agents[i];
                let mut rng = WanderRng::new(turn_seed, &agent.id);
                self.wander(map, occupancy, agent, &mut rng, reservations)
            })
            .collect()
    }
}
