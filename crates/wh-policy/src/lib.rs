//! `wh-policy` — the policy-layer contract and reference policies.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                      |
//! |----------------|---------------------------------------------------------------|
//! | [`decision`]   | `Decision` — one agent's action and target for one tick       |
//! | [`context`]    | `PolicyContext<'a>` — read-only view handed to every decision |
//! | [`model`]      | `Policy` trait                                                |
//! | [`noop`]       | `StandStill` — every agent stays put                          |
//! | [`scripted`]   | `Scripted` — replays fixed per-agent decision lists           |
//! | [`greedy`]     | `Greedy` — nearest box, then home, one step at a time         |
//! | [`error`]      | `PolicyError`, `PolicyResult<T>`                              |
//!
//! # Design notes
//!
//! The driver asks the policy for one [`Decision`] per live agent, in
//! ascending id order, before calling `Environment::step`.  Between two
//! agents it updates the shared target vector and the box ledger, and it
//! records the cell each earlier agent is heading for in
//! [`PolicyContext::reserved`].  A policy therefore sees the claims made
//! by lower ids in the same tick and can steer around them.
//!
//! Policies take `&self` and draw randomness only from the per-agent
//! [`AgentRng`](wh_core::AgentRng), so a policy value is `Send + Sync` and
//! can be shared by every rollout of a parallel batch.

pub mod context;
pub mod decision;
pub mod error;
pub mod greedy;
pub mod model;
pub mod noop;
pub mod scripted;


pub use context::PolicyContext;
pub use decision::Decision;
pub use error::{PolicyError, PolicyResult};
pub use greedy::Greedy;
pub use model::Policy;
pub use noop::StandStill;
pub use scripted::Scripted;
