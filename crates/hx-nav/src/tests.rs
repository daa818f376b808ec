//! Unit tests for hx-nav.

use std::time::Duration;

use hx_core::{Agent, AgentId, CoreError, HexDirection, HexPoint, TerrainKind, Turn, UnitType};
use hx_map::{MapDelta, RelaxStats, Tile};
use hx_planner::{MoveCommand, PlannerError};

use crate::{
    AssignmentDto, HexDto, MoveCommandDto, NavConfig, NavError, Navigator, NavigatorBuilder,
    NoopObserver, TileDto, TurnObserver, WorldSnapshot,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

const HOME: HexPoint = HexPoint::new(0, 0);

fn p(q: i32, r: i32) -> HexPoint {
    HexPoint::new(q, r)
}

fn plain(q: i32, r: i32) -> Tile {
    Tile::new(q, r, 1, TerrainKind::Plain)
}

fn nav_with(tiles: Vec<Tile>) -> Navigator {
    NavigatorBuilder::new(vec![HOME]).tiles(tiles).build().unwrap()
}

fn line_nav(len: i32) -> Navigator {
    nav_with((1..=len).map(|q| plain(q, 0)).collect())
}

fn worker(id: &str, at: HexPoint) -> Agent {
    Agent::new(id, at, UnitType::Worker, 100)
}

const SNAPSHOT_JSON: &str = r#"{
    "turnNo": 3,
    "nextTurnIn": 1.5,
    "score": 12,
    "home": [{"q": 0, "r": 0}],
    "spot": {"q": 0, "r": 0},
    "map": [
        {"q": 1, "r": 0, "cost": 1, "type": 2},
        {"q": 2, "r": 0, "cost": 1, "type": 2},
        {"q": 3, "r": 0, "cost": 1, "type": 2}
    ],
    "ants": [
        {"id": "w1", "q": 3, "r": 0, "type": 0, "health": 100,
         "food": {"amount": 0, "type": 0}},
        {"id": "s1", "q": 1, "r": 0, "type": 2, "health": 80,
         "food": {"amount": 4, "type": 1}}
    ],
    "enemies": [{"q": 5, "r": 5, "type": 1, "health": 130}]
}"#;

fn snapshot() -> WorldSnapshot {
    WorldSnapshot::from_json(SNAPSHOT_JSON).unwrap()
}

#[derive(Default)]
struct Recorder {
    started:    Vec<Turn>,
    deltas:     Vec<MapDelta>,
    recomputes: Vec<RelaxStats>,
    ended:      Vec<(Turn, usize)>,
}

impl TurnObserver for Recorder {
    fn on_turn_start(&mut self, turn: Turn) {
        self.started.push(turn);
    }

    fn on_map_updated(&mut self, _turn: Turn, delta: MapDelta) {
        self.deltas.push(delta);
    }

    fn on_distances_recomputed(&mut self, _turn: Turn, stats: RelaxStats) {
        self.recomputes.push(stats);
    }

    fn on_turn_end(&mut self, turn: Turn, commands: &[MoveCommand], _elapsed: Duration) {
        self.ended.push((turn, commands.len()));
    }
}

// ── Builder ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod builder {
    use super::*;

    #[test]
    fn homes_required() {
        assert!(matches!(NavigatorBuilder::new(vec![]).build(), Err(NavError::NoHomes)));
    }

    #[test]
    fn invalid_config_rejected() {
        let mut config = NavConfig::default();
        config.planner.speeds.warrior = 0;
        let result = NavigatorBuilder::new(vec![HOME]).config(config).build();
        assert!(matches!(
            result,
            Err(NavError::Config(PlannerError::ZeroSpeed { unit: "warrior" }))
        ));
    }

    #[test]
    fn from_snapshot_seeds_map_and_distances() {
        let nav = NavigatorBuilder::from_snapshot(&snapshot()).unwrap().build().unwrap();
        assert_eq!(nav.map().len(), 4);
        assert_eq!(nav.distance_to(p(3, 0)), Some(3));
        assert!(!nav.field().is_stale(nav.map()));
    }

    #[test]
    fn enemy_core_applied_at_build() {
        let nav = NavigatorBuilder::new(vec![HOME])
            .tiles(vec![plain(1, 0), plain(2, 0)])
            .enemy_bases(vec![p(2, 0)], Some(p(2, 0)))
            .build()
            .unwrap();
        assert!(nav.map().is_enemy_base(p(2, 0)));
        assert_eq!(nav.distance_to(p(2, 0)), None);
    }
}

// ── Config ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod config {
    use super::*;

    #[test]
    fn empty_document_is_default() {
        assert_eq!(NavConfig::from_toml_str("").unwrap(), NavConfig::default());
    }

    #[test]
    fn partial_tables_keep_other_defaults() {
        let text = "wander_idle = true\n\
                    [map]\nacid_damage = 30\n\
                    [planner]\nstay_penalty = 7\n\
                    [planner.speeds]\nscout = 9\n";
        let config = NavConfig::from_toml_str(text).unwrap();
        assert!(config.wander_idle);
        assert_eq!(config.map.acid_damage, 30);
        assert_eq!(config.map.lethal_penalty, 1_000);
        assert_eq!(config.planner.stay_penalty, 7);
        assert_eq!(config.planner.speeds.scout, 9);
        assert_eq!(config.planner.speeds.worker, 5);
        assert_eq!(config.planner.distance_weight, 10);
    }

    #[test]
    fn zero_speed_fails_validation() {
        let err = NavConfig::from_toml_str("[planner.speeds]\nworker = 0\n").unwrap_err();
        assert!(matches!(err, NavError::Config(PlannerError::ZeroSpeed { unit: "worker" })));
    }

    #[test]
    fn malformed_toml_is_parse_error() {
        let err = NavConfig::from_toml_str("[planner\nstay_penalty = ").unwrap_err();
        assert!(matches!(err, NavError::ConfigParse(_)));
    }
}

// ── Wire ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod wire {
    use super::*;

    #[test]
    fn snapshot_parses_and_converts() {
        let snap = snapshot();
        assert_eq!(snap.turn_no, 3);
        assert_eq!(snap.homes().unwrap(), vec![HOME]);
        assert_eq!(snap.spot, Some(HexDto { q: 0, r: 0 }));
        assert_eq!(snap.tiles().unwrap()[2], plain(3, 0));

        let agents = snap.agents().unwrap();
        assert_eq!(agents[0].id, AgentId::from("w1"));
        assert!(!agents[0].carrying);
        assert_eq!(agents[1].unit_type, UnitType::Scout);
        assert!(agents[1].carrying);

        let hostiles = snap.hostiles().unwrap();
        assert_eq!(hostiles[0].unit_type, UnitType::Warrior);
        assert_eq!(hostiles[0].position, p(5, 5));
    }

    #[test]
    fn out_of_range_coordinate_names_field() {
        let mut snap = snapshot();
        snap.map[0].q = 1 << 40;
        match snap.tiles() {
            Err(CoreError::CoordinateOutOfRange { field: "map", .. }) => {}
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn unknown_codes_name_field() {
        let mut snap = snapshot();
        snap.map[1].terrain = 9;
        assert_eq!(
            snap.tiles().unwrap_err(),
            CoreError::UnknownTerrain { field: "map.type", code: 9 }
        );

        let mut snap = snapshot();
        snap.ants[0].unit_type = 7;
        assert_eq!(
            snap.agents().unwrap_err(),
            CoreError::UnknownUnitType { field: "ants.type", code: 7 }
        );
    }

    #[test]
    fn empty_ant_id_rejected() {
        let mut snap = snapshot();
        snap.ants[0].id.clear();
        assert_eq!(snap.agents().unwrap_err(), CoreError::EmptyAgentId { field: "ants.id" });
    }

    #[test]
    fn malformed_json_is_snapshot_error() {
        assert!(matches!(WorldSnapshot::from_json("{\"turnNo\": \"x\"}"), Err(NavError::Snapshot(_))));
    }

    #[test]
    fn commands_serialise_in_server_shape() {
        let cmd = MoveCommand { agent: AgentId::from("w1"), path: vec![p(2, 0), p(1, 0)], cost: 2 };
        let json = serde_json::to_string(&MoveCommandDto::from(&cmd)).unwrap();
        assert_eq!(json, r#"{"ant":"w1","path":[{"q":2,"r":0},{"q":1,"r":0}]}"#);
    }

    #[test]
    fn tile_dto_uses_server_codes() {
        let dto = TileDto::from(Tile::new(-2, 4, 3, TerrainKind::Mud));
        assert_eq!(dto, TileDto { q: -2, r: 4, cost: 3, terrain: 3 });
        assert_eq!(dto.to_tile().unwrap(), Tile::new(-2, 4, 3, TerrainKind::Mud));
    }
}

// ── Navigator ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod navigator {
    use super::*;

    #[test]
    fn straight_line_to_home() {
        let mut nav = line_nav(3);
        nav.update_units(vec![worker("w", p(3, 0))], &[]).unwrap();
        assert_eq!(nav.distance_to(p(3, 0)), Some(3));
        assert_eq!(nav.best_direction(p(3, 0), 100, UnitType::Worker), Some(HexDirection::West));
    }

    #[test]
    fn detour_around_rock() {
        let nav = nav_with(vec![
            Tile::new(1, 0, 1, TerrainKind::Rock),
            plain(2, 0),
            plain(2, -1),
            plain(1, -1),
        ]);
        assert_eq!(nav.distance_to(p(2, 0)), Some(3));
        assert_eq!(nav.path_to_home(p(2, 0)).len(), 4);
    }

    #[test]
    fn contested_cell_goes_to_first_worker() {
        let mut nav = nav_with(vec![plain(1, 0), plain(2, 0), plain(2, -1)]);
        nav.update_units(vec![worker("a", p(2, 0)), worker("b", p(2, -1))], &[]).unwrap();
        let cmds = nav
            .plan_moves(&[AssignmentDto::new("a", p(1, 0)), AssignmentDto::new("b", p(1, 0))])
            .unwrap();
        assert_eq!(cmds[0].agent.as_str(), "a");
        assert_eq!(cmds[0].destination(), Some(p(1, 0)));
        assert_ne!(cmds[1].destination(), Some(p(1, 0)));
    }

    #[test]
    fn agent_on_home_targeting_home_stays() {
        let mut nav = line_nav(2);
        nav.update_units(vec![worker("w", HOME)], &[]).unwrap();
        let cmds = nav.plan_moves(&[AssignmentDto::new("w", HOME)]).unwrap();
        assert!(cmds[0].is_stay());
        assert_eq!(nav.distance_to(HOME), Some(0));
    }

    #[test]
    fn unknown_agent_rejected() {
        let nav = line_nav(2);
        let err = nav.plan_moves(&[AssignmentDto::new("ghost", HOME)]).unwrap_err();
        assert!(matches!(err, NavError::UnknownAgent { field: "assignments.ant", .. }));
    }

    #[test]
    fn duplicate_assignment_rejected() {
        let mut nav = line_nav(2);
        nav.update_units(vec![worker("w", p(2, 0))], &[]).unwrap();
        let err = nav
            .plan_moves(&[AssignmentDto::new("w", HOME), AssignmentDto::new("w", p(1, 0))])
            .unwrap_err();
        assert!(matches!(err, NavError::DuplicateAgent { field: "assignments.ant", .. }));
    }

    #[test]
    fn out_of_range_target_rejected() {
        let mut nav = line_nav(2);
        nav.update_units(vec![worker("w", p(2, 0))], &[]).unwrap();
        let mut dto = AssignmentDto::new("w", HOME);
        dto.target.r = -(1 << 30);
        let err = nav.plan_moves(&[dto]).unwrap_err();
        assert!(matches!(
            err,
            NavError::Input(CoreError::CoordinateOutOfRange { field: "assignments.target", .. })
        ));
    }

    #[test]
    fn duplicate_ant_ids_leave_roster_untouched() {
        let mut nav = line_nav(2);
        nav.update_units(vec![worker("w", p(2, 0))], &[]).unwrap();
        let err = nav
            .update_units(vec![worker("x", p(1, 0)), worker("x", HOME)], &[])
            .unwrap_err();
        assert!(matches!(err, NavError::DuplicateAgent { field: "ants.id", .. }));
        assert!(nav.agent(&AgentId::from("w")).is_some());
        assert_eq!(nav.agents().count(), 1);
    }

    #[test]
    fn queries_before_recompute_see_new_cells_unreachable() {
        let mut nav = line_nav(1);
        let delta = nav.update_map(&[plain(2, 0)]);
        assert!(delta.needs_recompute());
        assert_eq!(nav.distance_to(p(2, 0)), None);
        assert_eq!(nav.distance_to(HOME), Some(0));

        assert!(nav.refresh_distances().is_some());
        assert_eq!(nav.distance_to(p(2, 0)), Some(2));
        assert!(nav.refresh_distances().is_none());
    }

    #[test]
    fn home_route_is_truncated_to_budget() {
        let mut nav = line_nav(8);
        nav.update_units(vec![worker("w", p(8, 0))], &[]).unwrap();
        let cmd = nav.home_route(&AgentId::from("w")).unwrap();
        assert_eq!(cmd.path, vec![p(7, 0), p(6, 0), p(5, 0), p(4, 0), p(3, 0)]);
        assert_eq!(cmd.cost, 5);
    }

    #[test]
    fn home_route_from_home_is_empty() {
        let mut nav = line_nav(2);
        nav.update_units(vec![worker("w", HOME)], &[]).unwrap();
        assert!(nav.home_route(&AgentId::from("w")).unwrap().is_stay());
    }

    #[test]
    fn wander_requires_known_agents() {
        let mut nav = line_nav(3);
        nav.update_units(vec![worker("w", p(1, 0))], &[]).unwrap();
        assert_eq!(nav.wander(&[AgentId::from("w")], 5).unwrap().len(), 1);
        assert!(matches!(
            nav.wander(&[AgentId::from("nobody")], 5),
            Err(NavError::UnknownAgent { field: "wander", .. })
        ));
    }
}

// ── process_turn ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod turn {
    use super::*;

    #[test]
    fn runs_all_phases_and_reports() {
        let mut nav = NavigatorBuilder::new(vec![HOME]).build().unwrap();
        let mut rec = Recorder::default();
        let moves = nav
            .process_turn(&snapshot(), &[AssignmentDto::new("w1", HOME)], &mut rec)
            .unwrap();

        assert_eq!(rec.started, vec![Turn(3)]);
        assert_eq!(rec.deltas, vec![MapDelta { added: 3, changed: 0 }]);
        assert_eq!(rec.recomputes.len(), 1);
        assert_eq!(rec.ended, vec![(Turn(3), 1)]);
        assert_eq!(nav.turn(), Turn(3));

        // The scout at (1,0) is a different type, so the worker passes it.
        assert_eq!(moves.len(), 1);
        assert_eq!(moves[0].ant, "w1");
        let path: Vec<(i64, i64)> = moves[0].path.iter().map(|h| (h.q, h.r)).collect();
        assert_eq!(path, vec![(2, 0), (1, 0), (0, 0)]);
    }

    #[test]
    fn unchanged_map_skips_recompute() {
        let snap = snapshot();
        let mut nav = NavigatorBuilder::from_snapshot(&snap).unwrap().build().unwrap();
        let mut rec = Recorder::default();
        nav.process_turn(&snap, &[], &mut rec).unwrap();
        assert!(rec.recomputes.is_empty());

        let mut next = snap.clone();
        next.turn_no = 4;
        next.map.push(TileDto { q: 4, r: 0, cost: 1, terrain: 2 });
        nav.process_turn(&next, &[], &mut rec).unwrap();
        assert_eq!(rec.recomputes.len(), 1);
        assert_eq!(nav.distance_to(p(4, 0)), Some(4));
    }

    #[test]
    fn invalid_assignment_mutates_nothing() {
        let mut nav = NavigatorBuilder::new(vec![HOME]).build().unwrap();
        let err = nav
            .process_turn(&snapshot(), &[AssignmentDto::new("ghost", HOME)], &mut NoopObserver)
            .unwrap_err();
        assert!(matches!(err, NavError::UnknownAgent { .. }));
        assert_eq!(nav.map().len(), 1);
        assert_eq!(nav.turn(), Turn::ZERO);
        assert!(nav.occupancy().is_empty());
    }

    #[test]
    fn idle_agents_wander_when_enabled() {
        let config = NavConfig { wander_idle: true, ..NavConfig::default() };
        let mut nav = NavigatorBuilder::new(vec![HOME]).config(config).build().unwrap();
        let moves = nav
            .process_turn(&snapshot(), &[AssignmentDto::new("w1", HOME)], &mut NoopObserver)
            .unwrap();
        assert_eq!(moves.len(), 2);
        assert_eq!(moves[0].ant, "w1");
        assert_eq!(moves[1].ant, "s1");
    }

    #[test]
    fn idle_agents_get_no_command_by_default() {
        let mut nav = NavigatorBuilder::new(vec![HOME]).build().unwrap();
        let moves = nav.process_turn(&snapshot(), &[], &mut NoopObserver).unwrap();
        assert!(moves.is_empty());
    }
}
