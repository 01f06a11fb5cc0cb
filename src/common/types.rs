use serde::{Deserialize, Serialize};

pub type UserId = String;
pub type ChatId = String;
pub type MessageId = String;

/// Participant of a chat. Immutable for the lifetime of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub avatar_ref: Option<String>,
}

/// A single chat message.
///
/// `reaction` holds at most one emoji; it is a shared field, not a per-user
/// aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub chat_id: ChatId,
    pub sender_id: UserId,
    pub text: String,
    /// Milliseconds since the Unix epoch (UTC).
    pub timestamp: i64,
    pub reaction: Option<String>,
}

/// A chat and its messages, ordered by timestamp ascending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chat {
    pub id: ChatId,
    pub participant_ids: Vec<UserId>,
    pub messages: Vec<Message>,
}

impl Chat {
    pub fn message(&self, message_id: &str) -> Option<&Message> {
        self.messages.iter().find(|message| message.id == message_id)
    }

    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn has_participant(&self, user_id: &str) -> bool {
        self.participant_ids.iter().any(|id| id == user_id)
    }
}

/// Partial update applied by the store.
///
/// For `reaction`, `None` leaves the field untouched and `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessagePatch {
    pub text: Option<String>,
    pub reaction: Option<Option<String>>,
}

impl MessagePatch {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            reaction: None,
        }
    }

    pub fn reaction(reaction: Option<String>) -> Self {
        Self {
            text: None,
            reaction: Some(reaction),
        }
    }
}
