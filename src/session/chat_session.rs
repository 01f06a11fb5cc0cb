use chrono::{Local, TimeZone};

use crate::common::{Chat, ChatId, MessageId, User};
use crate::error::{Action, ChatError};
use crate::storage::MessageStore;

/// Read-through copy of one chat.
///
/// The view is only ever replaced wholesale by [`ChatSession::refresh`];
/// nothing patches it in place.
#[derive(Debug, Default)]
pub struct ChatSession {
    chat_id: Option<ChatId>,
    view: Option<Chat>,
    scroll_to: Option<MessageId>,
}

impl ChatSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn chat_id(&self) -> Option<&str> {
        self.chat_id.as_deref()
    }

    pub fn chat(&self) -> Option<&Chat> {
        self.view.as_ref()
    }

    /// Point the session at `chat_id` and load it.
    pub async fn open<S>(&mut self, store: &S, chat_id: &str) -> Result<&Chat, ChatError>
    where
        S: MessageStore + ?Sized,
    {
        if self.chat_id.as_deref() != Some(chat_id) {
            self.chat_id = Some(chat_id.to_string());
            self.view = None;
            self.scroll_to = None;
        }
        self.refresh(store).await
    }

    /// Re-fetch the open chat and replace the local view.
    pub async fn refresh<S>(&mut self, store: &S) -> Result<&Chat, ChatError>
    where
        S: MessageStore + ?Sized,
    {
        let chat_id = self.chat_id.clone().ok_or(ChatError::NoOpenChat)?;
        let loaded = store
            .load_chat(&chat_id)
            .await
            .map_err(|err| ChatError::failed(Action::Load, err))?;

        match loaded {
            Some(chat) => {
                log::debug!("Refreshed chat {chat_id}: {} messages", chat.messages.len());
                Ok(self.replace(chat))
            }
            None => {
                log::info!("Chat {chat_id} not found");
                self.view = None;
                Err(ChatError::ChatNotFound(chat_id))
            }
        }
    }

    fn replace(&mut self, chat: Chat) -> &Chat {
        let previous = self.view.as_ref().map_or(0, |view| view.messages.len());
        if chat.messages.len() > previous {
            self.scroll_to = chat.last_message().map(|message| message.id.clone());
        }
        self.view.insert(chat)
    }

    /// Newest message to scroll to, set whenever the message count grew.
    pub fn take_scroll_target(&mut self) -> Option<MessageId> {
        self.scroll_to.take()
    }
}

/// Header label: the other participants, e.g. `Bob` or `Bob & 2 others`.
pub fn chat_title(chat: &Chat, users: &[User], current_user: &str) -> String {
    let others: Vec<&str> = chat
        .participant_ids
        .iter()
        .filter(|id| id.as_str() != current_user)
        .map(String::as_str)
        .collect();

    let name_of = |id: &str| {
        users
            .iter()
            .find(|user| user.id == id)
            .map(|user| user.name.clone())
    };

    match others.as_slice() {
        [] => "Unknown".to_string(),
        [only] => name_of(*only).unwrap_or_else(|| "Unknown".to_string()),
        [first, rest @ ..] => {
            let first = name_of(*first).unwrap_or_else(|| "Unknown".to_string());
            let plural = if rest.len() == 1 { "" } else { "s" };
            format!("{first} & {} other{plural}", rest.len())
        }
    }
}

/// Local wall-clock time of a message, `HH:MM`.
pub fn format_time(timestamp_millis: i64) -> String {
    match Local.timestamp_millis_opt(timestamp_millis).single() {
        Some(time) => time.format("%H:%M").to_string(),
        None => "--:--".to_string(),
    }
}
