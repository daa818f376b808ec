//! Top-level configuration, loadable from TOML.
//!
//! ```toml
//! wander_idle = true
//! wander_seed = 42
//!
//! [map]
//! acid_damage    = 20
//! lethal_penalty = 1000
//!
//! [planner]
//! distance_weight = 10
//! stay_penalty    = 5
//!
//! [planner.speeds]
//! worker  = 5
//! warrior = 4
//! scout   = 7
//! ```
//!
//! Every table and field is optional; missing values take their defaults.

use serde::{Deserialize, Serialize};

use hx_map::MapConfig;
use hx_planner::PlannerConfig;

use crate::NavResult;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavConfig {
    pub map:         MapConfig,
    pub planner:     PlannerConfig,
    /// Give agents without an assignment a bounded random walk each turn.
    pub wander_idle: bool,
    /// Mixed with the turn number to seed wander walks.
    pub wander_seed: u64,
}

impl NavConfig {
    pub fn validate(&self) -> NavResult<()> {
        self.planner.validate()?;
        Ok(())
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(s: &str) -> NavResult<Self> {
        let config: NavConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }
}
