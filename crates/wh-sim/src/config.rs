//! Rollout and batch configuration.

use crate::{SimError, SimResult};

/// Settings for one rollout.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RolloutConfig {
    /// Step budget.  A rollout still unfinished after this many ticks is
    /// force-finished and counted as a failure.  Default: 1000.
    pub max_steps: u64,

    /// Seed for every random stream of the rollout (policy and faults).
    pub seed: u64,

    /// Probability, per tick, that one live agent breaks.  Default: 0.
    pub fault_rate: f64,

    /// Upper bound on faults injected per rollout.  Default: 0.
    pub max_faults: usize,

    /// End the rollout as a failure on the first tick with a collision
    /// or swap.  Default: false.
    pub stop_on_collision: bool,
}

impl Default for RolloutConfig {
    fn default() -> Self {
        Self {
            max_steps:         1_000,
            seed:              42,
            fault_rate:        0.0,
            max_faults:        0,
            stop_on_collision: false,
        }
    }
}

impl RolloutConfig {
    pub fn validate(&self) -> SimResult<()> {
        if self.max_steps == 0 {
            return Err(SimError::Config("max_steps must be at least 1".into()));
        }
        if !(0.0..=1.0).contains(&self.fault_rate) {
            return Err(SimError::Config(format!(
                "fault_rate must lie in [0, 1], got {}",
                self.fault_rate
            )));
        }
        Ok(())
    }
}

/// Settings for a batch of independent rollouts.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BatchConfig {
    /// Number of rollouts.  Rollout `i` is seeded with
    /// `mix_seed(rollout.seed, i)`.
    pub rollouts: usize,

    /// Worker thread count passed to Rayon.  `None` uses all logical cores.
    /// Ignored without the `parallel` feature.
    pub num_threads: Option<usize>,

    /// Template for every rollout; only the seed varies.
    pub rollout: RolloutConfig,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            rollouts:    100,
            num_threads: None,
            rollout:     RolloutConfig::default(),
        }
    }
}
