use super::chat_session::ChatSession;
use crate::common::{Message, MessagePatch};
use crate::error::{Action, ChatError};
use crate::storage::MessageStore;

/// Emoji offered by the reaction picker.
pub const SUPPORTED_REACTIONS: [&str; 5] = ["😂", "❤️", "👍", "🔥", "😮"];

pub fn is_supported(emoji: &str) -> bool {
    SUPPORTED_REACTIONS.contains(&emoji)
}

/// Picking the current reaction clears it; anything else overwrites it.
pub fn next_reaction(current: Option<&str>, emoji: &str) -> Option<String> {
    if current == Some(emoji) {
        None
    } else {
        Some(emoji.to_string())
    }
}

/// Toggles the single shared reaction on a message. Concurrent reactors race
/// and the last write wins.
pub struct ReactionEngine<'a, S: ?Sized> {
    store: &'a S,
}

impl<'a, S> ReactionEngine<'a, S>
where
    S: MessageStore + ?Sized,
{
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    pub async fn toggle(
        &self,
        session: &mut ChatSession,
        message_id: &str,
        emoji: &str,
        viewer_id: &str,
    ) -> Result<Message, ChatError> {
        if !is_supported(emoji) {
            return Err(ChatError::UnsupportedReaction(emoji.to_string()));
        }

        let chat = session.chat().ok_or(ChatError::NoOpenChat)?;
        if !chat.has_participant(viewer_id) {
            return Err(ChatError::NotAuthorized {
                user_id: viewer_id.to_string(),
                message_id: message_id.to_string(),
            });
        }
        let message = chat
            .message(message_id)
            .ok_or_else(|| ChatError::MessageNotFound(message_id.to_string()))?;

        let reaction = next_reaction(message.reaction.as_deref(), emoji);
        let chat_id = chat.id.clone();
        log::debug!("Setting reaction on {message_id} to {reaction:?}");

        self.store
            .update_message(&chat_id, message_id, MessagePatch::reaction(reaction))
            .await
            .map_err(|err| ChatError::failed(Action::React, err))?;

        let refreshed = session.refresh(self.store).await?;
        refreshed
            .message(message_id)
            .cloned()
            .ok_or_else(|| ChatError::MessageNotFound(message_id.to_string()))
    }
}
