//! `hx-planner`: turn-level movement planning for many agents at once.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                   |
//! |-----------------|------------------------------------------------------------|
//! | [`planner`]     | `MovementPlanner`, `Assignment`, `MoveCommand`, truncation |
//! | [`explore`]     | `MovementPlanner::wander` (bounded random walk)            |
//! | [`reservation`] | `ReservationTable`: same-turn `(cell, unit type)` claims   |
//! | [`config`]      | `PlannerConfig`, `UnitSpeeds`                              |
//! | [`error`]       | `PlannerError`, `PlannerResult<T>`                         |
//!
//! # Phase contract
//!
//! The planner reads the knowledge map, the occupancy snapshot and the
//! assignments, and writes only its reservation table and the returned
//! commands.  Map and occupancy updates, and distance recomputation, must
//! happen before planning starts.
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                   |
//! |------------|----------------------------------------------------------|
//! | `parallel` | Speculative per-agent walks on Rayon's thread pool.      |
//! | `serde`    | Derives on config, assignments and commands.             |

pub mod config;
pub mod error;
pub mod explore;
pub mod planner;
pub mod reservation;


pub use config::{PlannerConfig, UnitSpeeds};
pub use error::{PlannerError, PlannerResult};
pub use planner::{truncate_to_budget, Assignment, MoveCommand, MovementPlanner};
pub use reservation::ReservationTable;
