use thiserror::Error;

use crate::core::GameState;
use crate::drops::DropId;

/// Every error is recoverable: callers log it and carry on, the session is left untouched
/// (or, for an unknown difficulty, switched to the baseline profile).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("Unknown difficulty '{0}'")]
    InvalidDifficulty(String),

    #[error("Cannot {action} while the session is {state:?}")]
    InvalidTransition {
        action: &'static str,
        state: GameState,
    },

    #[error("Drop {0} is no longer falling")]
    StaleDrop(DropId),
}
