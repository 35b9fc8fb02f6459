//! Replay fixed decision lists.

use wh_core::{Action, AgentId, AgentRng};

use crate::{Decision, Policy, PolicyContext, PolicyError, PolicyResult};

/// Replays `scripts[agent][tick]`.  Once an agent's script runs out it
/// stands still with no target.
#[derive(Clone, Debug, Default)]
pub struct Scripted {
    scripts: Vec<Vec<Decision>>,
}

impl Scripted {
    pub fn new(scripts: Vec<Vec<Decision>>) -> Self {
        Self { scripts }
    }

    /// Scripts of bare actions with no targets.
    pub fn from_actions(actions: Vec<Vec<Action>>) -> Self {
        Self::new(
            actions
                .into_iter()
                .map(|row| row.into_iter().map(Decision::go).collect())
                .collect(),
        )
    }

    /// Number of agents with a script.
    pub fn agent_count(&self) -> usize {
        self.scripts.len()
    }

    /// Longest script length.
    pub fn len(&self) -> usize {
        self.scripts.iter().map(Vec::len).max().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Fail unless there is exactly one script per agent.
    pub fn check_agents(&self, agent_count: usize) -> PolicyResult<()> {
        if self.scripts.len() != agent_count {
            return Err(PolicyError::ScriptCountMismatch {
                expected: agent_count,
                got:      self.scripts.len(),
            });
        }
        Ok(())
    }
}

impl Policy for Scripted {
    fn decide(
        &self,
        agent: AgentId,
        ctx:   &PolicyContext<'_>,
        _rng:  &mut AgentRng,
    ) -> Decision {
        self.scripts
            .get(agent.index())
            .and_then(|script| script.get(ctx.tick.0 as usize))
            .copied()
            .unwrap_or_default()
    }

    fn name(&self) -> &'static str {
        "scripted"
    }
}
