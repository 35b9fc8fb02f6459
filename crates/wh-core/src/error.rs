//! Framework error type.
//!
//! Sub-crates define their own error enums (`GridError`, `EnvError`,
//! `SimError`) and wrap lower layers with `#[from]`.  `WhError` covers the
//! few failures that can happen inside `wh-core` itself.

use thiserror::Error;

/// The error type for `wh-core` conversions and configuration checks.
#[derive(Debug, Error)]
pub enum WhError {
    #[error("invalid action code {0} (expected 0..=4)")]
    InvalidAction(u8),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `wh-core`.
pub type WhResult<T> = Result<T, WhError>;
