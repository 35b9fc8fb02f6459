//! `wh-core` — foundational types for the warehouse grid simulator.
//!
//! This crate is a dependency of every other `wh-*` crate.  It intentionally
//! has no `wh-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `AgentId`                                             |
//! | [`cell`]        | `Cell` (row, col), `Action` (stand / four moves)      |
//! | [`time`]        | `Tick`                                                |
//! | [`cost`]        | `CostModel` — step / pickup / drop-off / collision    |
//! | [`rng`]         | `AgentRng` (per-agent), `SimRng` (per-rollout)        |
//! | [`error`]       | `WhError`, `WhResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod cell;
pub mod cost;
pub mod error;
pub mod ids;
pub mod rng;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use cell::{Action, Cell};
pub use cost::CostModel;
pub use error::{WhError, WhResult};
pub use ids::AgentId;
pub use rng::{AgentRng, SimRng};
pub use time::Tick;
