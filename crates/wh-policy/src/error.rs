use thiserror::Error;

#[derive(Debug, Error)]
pub enum PolicyError {
    #[error("policy configuration error: {0}")]
    Config(String),

    #[error("scripted policy has {got} agent scripts, environment has {expected} agents")]
    ScriptCountMismatch { expected: usize, got: usize },
}

pub type PolicyResult<T> = Result<T, PolicyError>;
