//! Rollout observer trait for progress reporting and data collection.

use wh_core::{AgentId, Tick};
use wh_env::{Environment, StepReport};

use crate::RolloutOutcome;

/// Summary of one driver tick, handed to [`RolloutObserver::on_tick_end`].
#[derive(Clone, Debug, PartialEq)]
pub struct TickReport {
    /// The tick that was just processed.
    pub tick:        Tick,
    pub step:        StepReport,
    pub boxes_left:  usize,
    pub live_agents: usize,
}

/// Callbacks invoked by [`Rollout::run`][crate::Rollout::run].
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example: frame printer
///
/// ```rust,ignore
/// struct Frames { drop_offs: Vec<Cell> }
///
/// impl RolloutObserver for Frames {
///     fn on_tick_end(&mut self, _tick: Tick, _report: &TickReport, env: &Environment) {
///         env.print(&self.drop_offs, true);
///     }
/// }
/// ```
pub trait RolloutObserver {
    /// Called once before the first tick.
    fn on_rollout_start(&mut self, _env: &Environment) {}

    /// Called at the start of each tick, before any policy decision.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called at the end of each tick with the tick's report and the
    /// post-step environment.
    fn on_tick_end(&mut self, _tick: Tick, _report: &TickReport, _env: &Environment) {}

    /// Called when the driver breaks `agent` during `tick`.
    fn on_fault(&mut self, _tick: Tick, _agent: AgentId) {}

    /// Called once after the rollout ends, successfully or not.
    fn on_rollout_end(&mut self, _outcome: &RolloutOutcome) {}
}

/// A [`RolloutObserver`] that does nothing.
pub struct NoopObserver;

impl RolloutObserver for NoopObserver {}
