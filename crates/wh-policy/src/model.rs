//! The `Policy` trait — the extension point for decision-making code.

use wh_core::{AgentId, AgentRng};

use crate::{Decision, PolicyContext};

/// Pluggable per-agent decision logic.
///
/// The driver calls [`decide`][Self::decide] once per live agent per tick.
/// Broken agents are never asked.  All reads go through the read-only
/// [`PolicyContext`]; randomness comes from the agent's own [`AgentRng`],
/// so decisions are reproducible from the rollout seed.
///
/// # Thread safety
///
/// A batch may run many rollouts in parallel against one policy value, so
/// implementations must be `Send + Sync` and keep per-agent state out of
/// `self`.
///
/// # Example
///
/// ```rust,ignore
/// struct AlwaysRight;
///
/// impl Policy for AlwaysRight {
///     fn decide(&self, _agent: AgentId, _ctx: &PolicyContext, _rng: &mut AgentRng) -> Decision {
///         Decision::go(Action::Right)
///     }
/// }
/// ```
pub trait Policy: Send + Sync + 'static {
    /// Choose `agent`'s action and target for the current tick.
    fn decide(
        &self,
        agent: AgentId,
        ctx:   &PolicyContext<'_>,
        rng:   &mut AgentRng,
    ) -> Decision;

    /// Short name used in log lines.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}
