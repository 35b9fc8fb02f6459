use thiserror::Error;
use wh_env::EnvError;
use wh_policy::PolicyError;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("rollout configuration error: {0}")]
    Config(String),

    #[error("{what} length {got} does not match agent count {expected}")]
    AgentCountMismatch {
        expected: usize,
        got:      usize,
        what:     &'static str,
    },

    #[error(transparent)]
    Env(#[from] EnvError),

    #[error(transparent)]
    Policy(#[from] PolicyError),
}

pub type SimResult<T> = Result<T, SimError>;
