//! One agent's choice for one tick.

use wh_core::{Action, Cell};

/// The action an agent takes this tick and the cell it is working towards.
///
/// `target` is a box cell to pick up, a drop-off cell to deliver to, or
/// `None`.  The driver copies it into the target vector passed to
/// `Environment::step`; reaching the target on the same tick is what
/// triggers a pickup or drop-off.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Decision {
    pub action: Action,
    pub target: Option<Cell>,
}

impl Decision {
    #[inline]
    pub const fn new(action: Action, target: Option<Cell>) -> Self {
        Self { action, target }
    }

    /// Stand still with no target.
    #[inline]
    pub const fn stand() -> Self {
        Self { action: Action::Stand, target: None }
    }

    /// Move without a target.
    #[inline]
    pub const fn go(action: Action) -> Self {
        Self { action, target: None }
    }
}

impl Default for Decision {
    fn default() -> Self {
        Self::stand()
    }
}
