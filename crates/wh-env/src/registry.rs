//! The `AgentRegistry` — agent positions indexed by `AgentId`.

use rustc_hash::FxHashSet;

use wh_core::{AgentId, Cell};

/// Ordered agent positions plus the set of broken agents.
///
/// `positions` has exactly one entry per agent for the lifetime of the
/// environment; the `AgentId` value is the index.  Broken agents keep their
/// entry (and their last cell) forever.
#[derive(Clone, Debug, Default)]
pub struct AgentRegistry {
    positions: Vec<Cell>,
    broken:    FxHashSet<AgentId>,
}

impl AgentRegistry {
    pub fn new(positions: Vec<Cell>) -> Self {
        Self {
            positions,
            broken: FxHashSet::default(),
        }
    }

    /// Number of agents, broken included.
    #[inline]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// `true` if `agent` indexes a registered agent.
    #[inline]
    pub fn contains(&self, agent: AgentId) -> bool {
        agent.index() < self.positions.len()
    }

    /// Every agent's position, indexed by `AgentId`.
    #[inline]
    pub fn positions(&self) -> &[Cell] {
        &self.positions
    }

    #[inline]
    pub fn position(&self, agent: AgentId) -> Option<Cell> {
        self.positions.get(agent.index()).copied()
    }

    /// Replace every position at once (end of a tick).
    pub(crate) fn commit(&mut self, positions: Vec<Cell>) {
        debug_assert_eq!(positions.len(), self.positions.len());
        self.positions = positions;
    }

    /// Iterator over all `AgentId`s in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = AgentId> + '_ {
        (0..self.positions.len() as u32).map(AgentId)
    }

    /// Iterator over non-broken `AgentId`s in ascending order.
    pub fn live_ids(&self) -> impl Iterator<Item = AgentId> + '_ {
        self.ids().filter(|id| !self.broken.contains(id))
    }

    #[inline]
    pub fn is_broken(&self, agent: AgentId) -> bool {
        self.broken.contains(&agent)
    }

    /// Mark `agent` broken.  Returns `false` if it already was.
    pub(crate) fn mark_broken(&mut self, agent: AgentId) -> bool {
        self.broken.insert(agent)
    }

    pub fn live_count(&self) -> usize {
        self.positions.len() - self.broken.len()
    }

    /// Broken agents in ascending id order.
    pub fn broken_ids(&self) -> Vec<AgentId> {
        let mut ids: Vec<AgentId> = self.broken.iter().copied().collect();
        ids.sort_unstable();
        ids
    }
}
