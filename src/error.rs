use std::fmt;

use thiserror::Error;

use crate::common::MessageId;

/// Failure reported by a [`crate::storage::MessageStore`].
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{0} not found")]
    NotFound(String),
    #[error("store rejected request: {0}")]
    Rejected(String),
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
    #[error("database lock poisoned")]
    Poisoned,
    #[error("storage task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// The user-facing action a failure is reported against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Load,
    Send,
    Edit,
    Delete,
    React,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Action::Load => "load chat",
            Action::Send => "send message",
            Action::Edit => "edit message",
            Action::Delete => "delete message",
            Action::React => "react to message",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("chat {0} not found")]
    ChatNotFound(String),
    #[error("message {0} not found")]
    MessageNotFound(String),
    #[error("could not {action}: {source}")]
    OperationFailed {
        action: Action,
        #[source]
        source: StoreError,
    },
    #[error("draft is empty")]
    EmptyDraft,
    #[error("user {user_id} may not modify message {message_id}")]
    NotAuthorized {
        user_id: String,
        message_id: MessageId,
    },
    #[error("unsupported reaction {0}")]
    UnsupportedReaction(String),
    #[error("no chat is open")]
    NoOpenChat,
}

impl ChatError {
    pub fn failed(action: Action, source: StoreError) -> Self {
        ChatError::OperationFailed { action, source }
    }
}
