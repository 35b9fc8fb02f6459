//! Seeded random streams for policies and the rollout driver.
//!
//! Every stream in a batch hangs off one root seed:
//!
//! ```text
//! rollout i          mix_seed(root, i)
//!   agent a          mix_seed(rollout, a)
//!   fault injection  mix_seed(rollout, 1 << 32)
//! ```
//!
//! No stream is shared, so the order in which rollouts run (or the thread
//! they run on) never changes an outcome.

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::AgentId;

/// Golden-ratio multiplier; spreads consecutive indices across the seed space.
const SEED_SPREAD: u64 = 0x9e37_79b9_7f4a_7c15;

/// Derive the seed of sub-stream `index` from `seed`.
#[inline]
pub fn mix_seed(seed: u64, index: u64) -> u64 {
    seed ^ index.wrapping_mul(SEED_SPREAD)
}

// ── AgentRng ──────────────────────────────────────────────────────────────────

/// The random stream a policy draws from when deciding for one agent.
pub struct AgentRng(SmallRng);

impl AgentRng {
    pub fn new(rollout_seed: u64, agent: AgentId) -> Self {
        AgentRng(SmallRng::seed_from_u64(mix_seed(rollout_seed, agent.0 as u64)))
    }

    /// `true` with probability `p`, clamped to `[0, 1]`.
    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }

    /// A uniformly chosen element of `options`.
    #[inline]
    pub fn choose<'a, T>(&mut self, options: &'a [T]) -> Option<&'a T> {
        options.choose(&mut self.0)
    }
}

// ── SimRng ────────────────────────────────────────────────────────────────────

/// The driver's stream: whether a fault fires this tick, and which agent it hits.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }

    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }
}
