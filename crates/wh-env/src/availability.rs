//! The `BoxLedger` — which box cells are still up for grabs.
//!
//! Two related but distinct quantities:
//!
//! - **available**: box cells no policy has claimed and no agent has picked
//!   up.  Policy layers claim a cell when they assign it as a target so two
//!   agents are not sent to the same quadrant.
//! - **remaining**: box cells not yet picked up.  Drives termination: the
//!   rollout is done when it reaches zero.  Only a pickup (or
//!   `force_finish`) lowers it; nothing raises it.

use rustc_hash::FxHashSet;

use wh_core::Cell;

#[derive(Clone, Debug, Default)]
pub struct BoxLedger {
    available: FxHashSet<Cell>,
    remaining: usize,
    delivered: usize,
    forced:    bool,
}

impl BoxLedger {
    /// A ledger where every cell in `boxes` is available and remaining.
    pub fn new(boxes: impl IntoIterator<Item = Cell>) -> Self {
        let available: FxHashSet<Cell> = boxes.into_iter().collect();
        let remaining = available.len();
        Self {
            available,
            remaining,
            delivered: 0,
            forced: false,
        }
    }

    #[inline]
    pub fn remaining(&self) -> usize {
        self.remaining
    }

    #[inline]
    pub fn delivered(&self) -> usize {
        self.delivered
    }

    /// `true` once `force_finish` has zeroed the counter.
    #[inline]
    pub fn is_forced(&self) -> bool {
        self.forced
    }

    #[inline]
    pub fn is_available(&self, cell: Cell) -> bool {
        self.available.contains(&cell)
    }

    /// Available cells sorted row-major, for deterministic iteration.
    pub fn available(&self) -> Vec<Cell> {
        let mut cells: Vec<Cell> = self.available.iter().copied().collect();
        cells.sort_unstable();
        cells
    }

    pub fn available_count(&self) -> usize {
        self.available.len()
    }

    /// Remove `cell` from the available set.  Returns `false` if it was not
    /// available.
    pub(crate) fn claim(&mut self, cell: Cell) -> bool {
        self.available.remove(&cell)
    }

    /// Return `cell` to the available set.
    pub(crate) fn release(&mut self, cell: Cell) -> bool {
        self.available.insert(cell)
    }

    /// Record a pickup at `cell`.  Returns `false` if the counter was
    /// already zero, which means the caller's bookkeeping is broken.
    pub(crate) fn pick_up(&mut self, cell: Cell) -> bool {
        self.available.remove(&cell);
        if self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;
        true
    }

    pub(crate) fn drop_off(&mut self) {
        self.delivered += 1;
    }

    /// Zero the remaining counter without touching the grid.  Idempotent.
    pub(crate) fn force_finish(&mut self) {
        self.remaining = 0;
        self.forced = true;
    }
}
