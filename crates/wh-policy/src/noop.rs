//! A policy that never moves anyone.

use wh_core::{AgentId, AgentRng};

use crate::{Decision, Policy, PolicyContext};

/// Every agent stands still with no target.
///
/// Costs nothing per tick, so it is handy as a baseline and for tests that
/// only care about fault injection or the step budget.
pub struct StandStill;

impl Policy for StandStill {
    fn decide(
        &self,
        _agent: AgentId,
        _ctx:   &PolicyContext<'_>,
        _rng:   &mut AgentRng,
    ) -> Decision {
        Decision::stand()
    }

    fn name(&self) -> &'static str {
        "stand-still"
    }
}
