//! Agent identifier.  Ids are dense, starting at 0 in placement order, so
//! every per-agent table is a plain `Vec` indexed by [`AgentId::index`].

use std::fmt;

/// Index of an agent in the registry.  Stable for the agent's lifetime,
/// including after it breaks.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentId(pub u32);

impl AgentId {
    #[inline(always)]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AgentId({})", self.0)
    }
}
