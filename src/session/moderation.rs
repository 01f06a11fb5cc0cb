use super::chat_session::ChatSession;
use crate::common::{Message, MessagePatch};
use crate::error::{Action, ChatError};
use crate::storage::MessageStore;

/// Edit and delete for a sender's own messages.
///
/// Nothing is removed or rewritten locally before the store confirms; on
/// failure the session view is left exactly as it was.
pub struct EditDeleteController<'a, S: ?Sized> {
    store: &'a S,
}

impl<'a, S> EditDeleteController<'a, S>
where
    S: MessageStore + ?Sized,
{
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Write the new text. Unlike [`Self::delete`] this does not refresh:
    /// the caller leaves edit mode first, then reloads.
    pub async fn commit_edit(
        &self,
        session: &ChatSession,
        message_id: &str,
        actor_id: &str,
        text: &str,
    ) -> Result<(), ChatError> {
        let chat_id = authorize(session, message_id, actor_id)?.chat_id.clone();

        self.store
            .update_message(&chat_id, message_id, MessagePatch::text(text))
            .await
            .map_err(|err| ChatError::failed(Action::Edit, err))?;
        log::info!("Edited message {message_id}");
        Ok(())
    }

    pub async fn delete(
        &self,
        session: &mut ChatSession,
        message_id: &str,
        actor_id: &str,
    ) -> Result<(), ChatError> {
        let chat_id = authorize(session, message_id, actor_id)?.chat_id.clone();

        self.store
            .delete_message(&chat_id, message_id)
            .await
            .map_err(|err| ChatError::failed(Action::Delete, err))?;
        log::info!("Deleted message {message_id}");

        session.refresh(self.store).await?;
        Ok(())
    }
}

/// Only the sender may edit or delete a message.
pub fn authorize<'s>(
    session: &'s ChatSession,
    message_id: &str,
    actor_id: &str,
) -> Result<&'s Message, ChatError> {
    let message = session
        .chat()
        .ok_or(ChatError::NoOpenChat)?
        .message(message_id)
        .ok_or_else(|| ChatError::MessageNotFound(message_id.to_string()))?;

    if message.sender_id != actor_id {
        log::warn!("User {actor_id} tried to modify message {message_id} they did not send");
        return Err(ChatError::NotAuthorized {
            user_id: actor_id.to_string(),
            message_id: message_id.to_string(),
        });
    }
    Ok(message)
}
