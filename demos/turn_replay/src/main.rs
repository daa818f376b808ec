//! turn_replay: feed recorded server snapshots through a `Navigator`.
//!
//! Each snapshot is processed as one turn and the resulting move request is
//! printed to stdout as JSON, one line per turn.  Logs go to stderr; set
//! `RUST_LOG=hx_nav=debug,hx_map=debug` for per-phase detail.
//!
//! ```text
//! cargo run -p turn_replay -- \
//!     --snapshot demos/turn_replay/data/turn_001.json \
//!     --snapshot demos/turn_replay/data/turn_002.json \
//!     --tiles    demos/turn_replay/data/tiles.csv \
//!     --config   demos/turn_replay/data/nav.toml
//! ```
//!
//! Assignment policy (deliberately simple):
//! - workers carrying food head for the home their shortest path ends at;
//! - warriors head for the closest visible enemy;
//! - everyone else is left idle (and wanders if `wander_idle` is set).

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use hx_core::{Turn, UnitType};
use hx_map::{load_tiles_csv, MapDelta, RelaxStats};
use hx_nav::{
    AssignmentDto, MoveCommand, MovesDto, NavConfig, Navigator, NavigatorBuilder, TurnObserver,
    WorldSnapshot,
};

// ── CLI ───────────────────────────────────────────────────────────────────────

/// Replay server snapshots through the hexnav planner.
#[derive(Parser, Debug)]
#[command(name = "turn_replay")]
struct Args {
    /// Snapshot JSON file; repeat to replay several turns in order
    #[arg(long, required = true)]
    snapshot: Vec<PathBuf>,

    /// Tiles (q,r,cost,terrain CSV) known before the first turn
    #[arg(long)]
    tiles: Option<PathBuf>,

    /// Navigator config (TOML); defaults apply when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for wander walks (overrides the config file)
    #[arg(long)]
    seed: Option<u64>,
}

// ── Observer ──────────────────────────────────────────────────────────────────

/// Logs phase results and tracks the slowest turn.
#[derive(Default)]
struct ReplayObserver {
    turns:   usize,
    slowest: Duration,
}

impl TurnObserver for ReplayObserver {
    fn on_map_updated(&mut self, turn: Turn, delta: MapDelta) {
        tracing::info!(%turn, added = delta.added, changed = delta.changed, "map");
    }

    fn on_distances_recomputed(&mut self, turn: Turn, stats: RelaxStats) {
        tracing::info!(%turn, settled = stats.settled, unreachable = stats.unreachable, "distances");
    }

    fn on_turn_end(&mut self, _turn: Turn, _commands: &[MoveCommand], elapsed: Duration) {
        self.turns += 1;
        self.slowest = self.slowest.max(elapsed);
    }
}

// ── Assignment policy ─────────────────────────────────────────────────────────

/// Targets are chosen from the previous turn's distance field; the
/// navigator absorbs this snapshot's tiles only inside `process_turn`.
fn assign(nav: &Navigator, snapshot: &WorldSnapshot) -> Result<Vec<AssignmentDto>> {
    let enemies = snapshot.hostiles()?;
    let mut out = Vec::new();

    for agent in snapshot.agents()? {
        let target = match agent.unit_type {
            UnitType::Worker if agent.carrying => {
                let path = nav.path_to_home(agent.position);
                match path.last() {
                    Some(&end) if nav.map().is_home(end) => Some(end),
                    _ => nav.map().homes().iter().copied().min_by_key(|h| h.distance(agent.position)),
                }
            }
            UnitType::Warrior => enemies
                .iter()
                .map(|e| e.position)
                .min_by_key(|p| p.distance(agent.position)),
            _ => None,
        };
        if let Some(target) = target {
            out.push(AssignmentDto::new(agent.id.as_str(), target));
        }
    }
    Ok(out)
}

// ── main ──────────────────────────────────────────────────────────────────────

fn load_config(path: Option<&Path>) -> Result<NavConfig> {
    let Some(path) = path else {
        return Ok(NavConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    NavConfig::from_toml_str(&text).with_context(|| format!("parsing config {}", path.display()))
}

fn load_snapshot(path: &Path) -> Result<WorldSnapshot> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading snapshot {}", path.display()))?;
    WorldSnapshot::from_json(&text).with_context(|| format!("parsing snapshot {}", path.display()))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut config = load_config(args.config.as_deref())?;
    if let Some(seed) = args.seed {
        config.wander_seed = seed;
    }

    let tiles = match &args.tiles {
        Some(path) => load_tiles_csv(path).with_context(|| format!("loading tiles {}", path.display()))?,
        None => Vec::new(),
    };

    let first = load_snapshot(&args.snapshot[0])?;
    let mut nav = NavigatorBuilder::new(first.homes()?)
        .config(config)
        .tiles(tiles)
        .build()?;
    tracing::info!(known_cells = nav.map().len(), homes = nav.map().homes().len(), "navigator ready");

    let mut observer = ReplayObserver::default();
    for path in &args.snapshot {
        let snapshot = load_snapshot(path)?;
        let assignments = assign(&nav, &snapshot)?;
        let moves = nav.process_turn(&snapshot, &assignments, &mut observer)?;
        println!("{}", serde_json::to_string(&MovesDto { moves })?);
    }

    tracing::info!(
        turns = observer.turns,
        slowest_us = observer.slowest.as_micros() as u64,
        "replay finished"
    );
    Ok(())
}
