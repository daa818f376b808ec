//! Deterministic per-agent RNG for wander moves.
//!
//! # Determinism strategy
//!
//! Each wandering agent gets its own `SmallRng` seeded by:
//!
//!   seed = turn_seed XOR (fold(agent_id) * MIXING_CONSTANT)
//!
//! `fold` is FNV-1a over the id bytes, so the seed depends only on the id
//! text and never on map iteration order or process-local hash keys.  The
//! mixing constant is the 64-bit fractional part of the golden ratio.  The
//! same seed, turn and id always produce the same walk.

use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::AgentId;

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME:  u64 = 0x0000_0100_0000_01b3;

fn fold_id(id: &AgentId) -> u64 {
    id.as_str()
        .bytes()
        .fold(FNV_OFFSET, |h, b| (h ^ u64::from(b)).wrapping_mul(FNV_PRIME))
}

/// Per-agent deterministic RNG.
pub struct WanderRng(SmallRng);

impl WanderRng {
    /// Seed deterministically from a turn seed and an agent id.
    pub fn new(turn_seed: u64, agent: &AgentId) -> Self {
        let seed = turn_seed ^ fold_id(agent).wrapping_mul(MIXING_CONSTANT);
        WanderRng(SmallRng::seed_from_u64(seed))
    }

    /// Choose a random element from a slice.
    /// Returns `None` if the slice is empty.
    #[inline]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.0)
    }
}
