//! Turn counter.
//!
//! The server numbers turns from zero and the planner is recomputed once per
//! turn, so an integer counter is the only notion of time the core needs.
//! Wall-clock deadlines are enforced by the caller.

use std::fmt;

/// An absolute turn number.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Turn(pub u64);

impl Turn {
    pub const ZERO: Turn = Turn(0);

    /// Turns elapsed from `earlier` to `self`, saturating at zero.
    #[inline]
    pub fn since(self, earlier: Turn) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

impl fmt::Display for Turn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}
