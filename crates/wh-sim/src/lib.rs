//! `wh-sim` — rollout driver for the warehouse grid simulator.
//!
//! # One rollout
//!
//! ```text
//! until env.is_done():
//!   budget    — at max_steps: force_finish, report failure
//!   ① decide  — Policy::decide for each live agent, ascending AgentId;
//!               targets updated and boxes claimed between agents
//!   ② step    — Environment::step_report(actions, targets)
//!   ③ faults  — with probability fault_rate break one random live agent
//!               (at most max_faults per rollout)
//!   ④ check   — stop early on a conflict if stop_on_collision is set
//! ```
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | `run_batch` runs rollouts on Rayon's thread pool.      |
//! | `serde`    | Adds `Serialize`/`Deserialize` to configs and outcomes.|
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use wh_grid::ArenaSpec;
//! use wh_core::CostModel;
//! use wh_policy::Greedy;
//! use wh_sim::{BatchConfig, run_batch};
//!
//! let summary = run_batch(&ArenaSpec::default(), &CostModel::default(), &Greedy::new(), &BatchConfig::default())?;
//! println!("{}/{} rollouts succeeded", summary.successes(), summary.len());
//! ```

pub mod batch;
pub mod config;
pub mod error;
pub mod observer;
pub mod rollout;

#[cfg(test)]
mod tests;

pub use batch::{BatchSummary, run_batch};
pub use config::{BatchConfig, RolloutConfig};
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, RolloutObserver, TickReport};
pub use rollout::{Rollout, RolloutBuilder, RolloutOutcome};
