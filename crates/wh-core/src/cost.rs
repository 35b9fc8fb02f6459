//! Per-tick cost constants.
//!
//! # Sign convention
//!
//! Costs are minimised.  Positive values are penalties, negative values are
//! rewards:
//!
//! | Field       | Default   | Meaning                                      |
//! |-------------|-----------|----------------------------------------------|
//! | `step`      | `1.0`     | Any non-stand action, successful or not      |
//! | `pickup`    | `-100.0`  | Reward for picking up the targeted box       |
//! | `drop_off`  | `-1000.0` | Reward for delivering a carried box          |
//! | `collision` | `1e10`    | Same-cell conflict or swap, scaled by discount |
//! | `discount`  | `0.99`    | Per-tick factor applied to collision cost    |
//!
//! `collision` is a panic value, not a tunable weight: any rollout that
//! contains a collision must dominate the total cost of every rollout that
//! does not.  Only the collision term is discounted.

use crate::{Tick, WhError, WhResult};

/// Cost constants for one rollout.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CostModel {
    pub step:      f64,
    pub pickup:    f64,
    pub drop_off:  f64,
    pub collision: f64,
    pub discount:  f64,
}

impl Default for CostModel {
    fn default() -> Self {
        Self {
            step:      1.0,
            pickup:    -100.0,
            drop_off:  -1000.0,
            collision: 1e10,
            discount:  0.99,
        }
    }
}

impl CostModel {
    /// `discount^tick` in closed form, so rollout length has no ceiling.
    #[inline]
    pub fn discount_at(&self, tick: Tick) -> f64 {
        self.discount.powf(tick.0 as f64)
    }

    /// Collision penalty for a conflict occurring at `tick`.
    #[inline]
    pub fn collision_at(&self, tick: Tick) -> f64 {
        self.collision * self.discount_at(tick)
    }

    /// Reject sign conventions the engine does not support.
    pub fn validate(&self) -> WhResult<()> {
        if self.pickup > 0.0 {
            return Err(WhError::Config(format!(
                "pickup cost must be <= 0 (a reward), got {}",
                self.pickup
            )));
        }
        if self.drop_off > 0.0 {
            return Err(WhError::Config(format!(
                "drop-off cost must be <= 0 (a reward), got {}",
                self.drop_off
            )));
        }
        if !(self.discount > 0.0 && self.discount <= 1.0) {
            return Err(WhError::Config(format!(
                "discount must be in (0, 1], got {}",
                self.discount
            )));
        }
        Ok(())
    }
}
