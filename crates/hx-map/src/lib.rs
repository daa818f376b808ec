//! `hx-map`: what we know about the grid, and how far every cell is from home.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                   |
//! |---------------|------------------------------------------------------------|
//! | [`knowledge`] | `KnowledgeMap`, `Cell`, `Tile`, `MapDelta`, `MapConfig`    |
//! | [`field`]     | `DistanceField` (multi-source Dijkstra), `RelaxStats`      |
//! | [`loader`]    | `load_tiles_csv`, `load_tiles_reader`                      |
//! | [`error`]     | `MapError`, `MapResult<T>`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on `MapConfig` and cells.  |

pub mod error;
pub mod field;
pub mod knowledge;
pub mod loader;


pub use error::{MapError, MapResult};
pub use field::{DistanceField, RelaxStats};
pub use knowledge::{Cell, KnowledgeMap, MapConfig, MapDelta, Tile};
pub use loader::{load_tiles_csv, load_tiles_reader};
