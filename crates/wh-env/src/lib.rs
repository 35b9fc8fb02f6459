//! `wh-env` — the environment state machine.
//!
//! # Crate layout
//!
//! | Module           | Contents                                                   |
//! |------------------|------------------------------------------------------------|
//! | [`registry`]     | `AgentRegistry` — positions by `AgentId` + broken set      |
//! | [`availability`] | `BoxLedger` — available box cells, remaining count         |
//! | [`env`]          | `Environment` — construction, queries, faults, termination |
//! | [`step`]         | The transition engine (`Environment::step`)                |
//! | [`error`]        | `EnvError`, `EnvResult<T>`                                 |
//!
//! # One tick
//!
//! ```text
//! step(actions, targets):
//!   validate    — lengths, target bounds              (nothing mutated yet)
//!   ① propose   — candidate cell per live agent; walls, foreign boxes,
//!                 and broken agents reject the move
//!   ② collide   — second claimant of a cell pays collision·discount^tick
//!   ③ swap      — pairs exchanging cells pay once per pair
//!   resolve     — stayers keep their cell, else lowest id; swappers revert
//!   ④ vacate    — lift every live agent's tile off the grid
//!   ⑤ step cost — every non-stand action
//!   ⑥ commit    — write tiles at new cells; pickup / drop-off on target
//!   ⑦ advance   — registry ← new positions, tick += 1
//! ```
//!
//! # Indexing
//!
//! Action and target slices always have one entry per agent, broken agents
//! included, so indices never shift.  Entries for broken agents are ignored.

pub mod availability;
pub mod env;
pub mod error;
pub mod registry;
pub mod step;


pub use availability::BoxLedger;
pub use env::Environment;
pub use error::{EnvError, EnvResult};
pub use registry::AgentRegistry;
pub use step::StepReport;
