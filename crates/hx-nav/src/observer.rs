//! Turn observer trait for progress reporting and timing.

use std::time::Duration;

use hx_core::Turn;
use hx_map::{MapDelta, RelaxStats};
use hx_planner::MoveCommand;

/// Callbacks invoked by [`Navigator::process_turn`][crate::Navigator::process_turn]
/// at each phase boundary.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: deadline watcher
///
/// ```rust,ignore
/// struct DeadlineWatch { budget: Duration }
///
/// impl TurnObserver for DeadlineWatch {
///     fn on_turn_end(&mut self, turn: Turn, _: &[MoveCommand], elapsed: Duration) {
///         if elapsed > self.budget {
///             eprintln!("{turn}: planning took {elapsed:?}");
///         }
///     }
/// }
/// ```
pub trait TurnObserver {
    /// Called before any state is touched.
    fn on_turn_start(&mut self, _turn: Turn) {}

    /// Called after the knowledge map absorbed the snapshot's tiles.
    fn on_map_updated(&mut self, _turn: Turn, _delta: MapDelta) {}

    /// Called only on turns where the distance field was rebuilt.
    fn on_distances_recomputed(&mut self, _turn: Turn, _stats: RelaxStats) {}

    /// Called once the commands are final.  `elapsed` covers the whole turn.
    fn on_turn_end(&mut self, _turn: Turn, _commands: &[MoveCommand], _elapsed: Duration) {}
}

/// A [`TurnObserver`] that does nothing.
pub struct NoopObserver;

impl TurnObserver for NoopObserver {}
