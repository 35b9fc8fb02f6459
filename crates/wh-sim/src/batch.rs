//! Batches of independent rollouts.

use tracing::info;

use wh_core::CostModel;
use wh_core::rng::mix_seed;
use wh_env::Environment;
use wh_grid::ArenaSpec;
use wh_policy::Policy;

use crate::{BatchConfig, NoopObserver, RolloutBuilder, RolloutOutcome, SimResult};

/// Outcomes of a batch, in rollout-index order.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BatchSummary {
    pub outcomes: Vec<RolloutOutcome>,
}

impl BatchSummary {
    #[inline]
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Rollouts that picked up every box within budget.
    pub fn successes(&self) -> usize {
        self.outcomes.iter().filter(|o| o.success).count()
    }

    pub fn success_rate(&self) -> f64 {
        if self.outcomes.is_empty() {
            return 0.0;
        }
        self.successes() as f64 / self.outcomes.len() as f64
    }

    /// Mean step count over successful rollouts, `None` if there were none.
    pub fn mean_steps_to_success(&self) -> Option<f64> {
        let steps: Vec<u64> = self.outcomes.iter().filter(|o| o.success).map(|o| o.steps).collect();
        if steps.is_empty() {
            return None;
        }
        Some(steps.iter().sum::<u64>() as f64 / steps.len() as f64)
    }

    pub fn total_collisions(&self) -> usize {
        self.outcomes.iter().map(|o| o.collisions).sum()
    }

    pub fn total_faults(&self) -> usize {
        self.outcomes.iter().map(|o| o.faults).sum()
    }
}

/// Run `config.rollouts` independent rollouts of `policy` on fresh copies of
/// the arena described by `spec`.
///
/// Rollout `i` uses seed `mix_seed(config.rollout.seed, i)`, so results do
/// not depend on scheduling.  With the `parallel` feature the rollouts run
/// on Rayon's thread pool (sized by `config.num_threads`).
pub fn run_batch<P: Policy>(
    spec:   &ArenaSpec,
    costs:  &CostModel,
    policy: &P,
    config: &BatchConfig,
) -> SimResult<BatchSummary> {
    config.rollout.validate()?;
    let template = Environment::with_costs(spec, costs.clone())?;
    info!(
        policy = policy.name(),
        rollouts = config.rollouts,
        agents = template.agent_count(),
        boxes = template.boxes_left(),
        "batch start"
    );

    let run_one = |index: usize| -> SimResult<RolloutOutcome> {
        let mut rollout_config = config.rollout.clone();
        rollout_config.seed = mix_seed(config.rollout.seed, index as u64);
        RolloutBuilder::new(template.clone(), policy, rollout_config)
            .build()?
            .run(&mut NoopObserver)
    };

    #[cfg(not(feature = "parallel"))]
    let outcomes = (0..config.rollouts).map(run_one).collect::<SimResult<Vec<_>>>()?;

    #[cfg(feature = "parallel")]
    let outcomes = {
        use rayon::prelude::*;

        let run_all = || {
            (0..config.rollouts)
                .into_par_iter()
                .map(run_one)
                .collect::<SimResult<Vec<_>>>()
        };
        match config.num_threads {
            Some(threads) => rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()
                .map_err(|e| crate::SimError::Config(e.to_string()))?
                .install(run_all)?,
            None => run_all()?,
        }
    };

    let summary = BatchSummary { outcomes };
    info!(
        successes = summary.successes(),
        rollouts = summary.len(),
        "batch end"
    );
    Ok(summary)
}
