//! Read-only state passed to every policy decision.

use wh_core::{AgentId, Cell, Tick};
use wh_env::Environment;

/// A read-only snapshot handed to [`Policy::decide`][crate::Policy::decide].
///
/// The driver rebuilds it for each agent of a tick; building one is just
/// copying four references.
///
/// # Lifetimes
///
/// All borrows live for one decision.  The driver never mutates the
/// environment while a context is alive.
pub struct PolicyContext<'a> {
    /// Current simulation tick.
    pub tick: Tick,

    /// The environment as of the start of this tick, plus any box claims
    /// made for lower-id agents earlier in the same tick.
    pub env: &'a Environment,

    /// Every agent's current target, indexed by `AgentId`.
    pub targets: &'a [Option<Cell>],

    /// Drop-off point per agent, indexed by `AgentId` (wrapping if shorter
    /// than the agent count).  Empty if the rollout has none.
    pub drop_offs: &'a [Cell],

    /// Cells lower-id agents decided to move into this tick.
    pub reserved: &'a [Cell],
}

impl<'a> PolicyContext<'a> {
    #[inline]
    pub fn new(
        tick:      Tick,
        env:       &'a Environment,
        targets:   &'a [Option<Cell>],
        drop_offs: &'a [Cell],
        reserved:  &'a [Cell],
    ) -> Self {
        Self { tick, env, targets, drop_offs, reserved }
    }

    /// `agent`'s current target.
    #[inline]
    pub fn target(&self, agent: AgentId) -> Option<Cell> {
        self.targets.get(agent.index()).copied().flatten()
    }

    /// `agent`'s drop-off point.
    pub fn drop_off(&self, agent: AgentId) -> Option<Cell> {
        if self.drop_offs.is_empty() {
            return None;
        }
        self.drop_offs.get(agent.index() % self.drop_offs.len()).copied()
    }

    #[inline]
    pub fn is_reserved(&self, cell: Cell) -> bool {
        self.reserved.contains(&cell)
    }
}
