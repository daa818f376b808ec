//! `hx-nav`: the turn-orchestration layer of the hexnav planner.
//!
//! A [`Navigator`] is created once per game and owned by the caller's turn
//! loop; there is no process-wide instance.  Each turn the caller hands it
//! the server snapshot and its target assignments and gets move commands
//! back in the server's wire shape.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`navigator`] | `Navigator`: owns map, field, occupancy, planner          |
//! | [`builder`]   | `NavigatorBuilder`                                        |
//! | [`observer`]  | `TurnObserver`, `NoopObserver`                            |
//! | [`wire`]      | camelCase JSON DTOs and their validating conversions      |
//! | [`config`]    | `NavConfig` (TOML)                                        |
//! | [`error`]     | `NavError`, `NavResult<T>`                                |
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Forwards to `hx-planner/parallel`.                     |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use hx_nav::{NavigatorBuilder, NoopObserver, WorldSnapshot};
//!
//! let first = WorldSnapshot::from_json(&body)?;
//! let mut nav = NavigatorBuilder::from_snapshot(&first)?.build()?;
//! loop {
//!     let snapshot = fetch()?;
//!     let moves = nav.process_turn(&snapshot, &assign(&nav, &snapshot), &mut NoopObserver)?;
//!     send(moves)?;
//! }
//! ```

pub mod builder;
pub mod config;
pub mod error;
pub mod navigator;
pub mod observer;
pub mod wire;

#[cfg(test)]
mod tests;

pub use builder::NavigatorBuilder;
pub use config::NavConfig;
pub use error::{NavError, NavResult};
pub use navigator::Navigator;
pub use observer::{NoopObserver, TurnObserver};
pub use hx_planner::MoveCommand;
pub use wire::{
    AntDto, AssignmentDto, EnemyDto, FoodDto, HexDto, MoveCommandDto, MovesDto, TileDto,
    WorldSnapshot,
};
