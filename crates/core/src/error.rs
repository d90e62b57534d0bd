//! Error types for pollvote-core.

use thiserror::Error;

use crate::{Identity, PollId};

/// Ledger errors. Every failed operation leaves the ledger untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// No poll exists, or the current poll has been ended.
    #[error("voting not active")]
    InactivePoll,

    /// Option index outside the current poll's options.
    #[error("invalid option {index}: poll has {option_count} options")]
    InvalidOption { index: usize, option_count: usize },

    /// Identity already voted in the current poll.
    #[error("{identity} already voted in poll {poll_id}")]
    AlreadyVoted { identity: Identity, poll_id: PollId },

    /// Caller lacks administrator rights.
    #[error("unauthorized: {identity} is not the administrator")]
    Unauthorized { identity: Identity },

    /// Rejected poll definition.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl LedgerError {
    pub(crate) fn invalid_input<S: Into<String>>(message: S) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Stable category name, used as a structured logging field.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InactivePoll => "inactive_poll",
            Self::InvalidOption { .. } => "invalid_option",
            Self::AlreadyVoted { .. } => "already_voted",
            Self::Unauthorized { .. } => "unauthorized",
            Self::InvalidInput(_) => "invalid_input",
        }
    }
}

/// Result type alias for ledger operations.
pub type Result<T> = std::result::Result<T, LedgerError>;
