//! `hx-core`: foundational types for the `hexnav` turn planner.
//!
//! This crate is a dependency of every other `hx-*` crate.  It has no `hx-*`
//! dependencies and minimal external ones (only `rand` and `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`hex`]         | `HexPoint`, `HexKey`, `HexDirection`, hex distance    |
//! | [`ids`]         | `AgentId`                                             |
//! | [`unit`]        | `UnitType`, `Agent`, `HostileUnit`                    |
//! | [`terrain`]     | `TerrainKind` (server terrain codes)                  |
//! | [`turn`]        | `Turn` counter                                        |
//! | [`rng`]         | `WanderRng` (per-agent, deterministic)                |
//! | [`error`]       | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod hex;
pub mod ids;
pub mod rng;
pub mod terrain;
pub mod turn;
pub mod unit;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use hex::{HexDirection, HexKey, HexPoint, COORD_LIMIT};
pub use ids::AgentId;
pub use rng::WanderRng;
pub use terrain::TerrainKind;
pub use turn::Turn;
pub use unit::{Agent, HostileUnit, UnitType};
