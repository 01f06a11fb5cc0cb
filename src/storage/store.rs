use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use super::chat_db::ChatDatabase;
use crate::common::{Chat, Message, MessagePatch, User};
use crate::error::{StoreError, StoreResult};

/// Persistence collaborator the room talks to.
///
/// Every call may suspend. The store alone decides durability and ordering;
/// callers re-fetch with [`MessageStore::load_chat`] after each write.
#[async_trait]
pub trait MessageStore: Send + Sync {
    async fn load_users(&self) -> StoreResult<Vec<User>>;

    async fn load_chats(&self) -> StoreResult<Vec<Chat>>;

    /// `Ok(None)` when the chat does not exist.
    async fn load_chat(&self, chat_id: &str) -> StoreResult<Option<Chat>>;

    async fn create_chat(&self, participant_ids: &[String]) -> StoreResult<Chat>;

    async fn send_message(&self, chat_id: &str, text: &str, sender_id: &str)
    -> StoreResult<Message>;

    async fn update_message(
        &self,
        chat_id: &str,
        message_id: &str,
        patch: MessagePatch,
    ) -> StoreResult<()>;

    async fn delete_message(&self, chat_id: &str, message_id: &str) -> StoreResult<()>;
}

type Clock = Arc<dyn Fn() -> i64 + Send + Sync>;

/// [`MessageStore`] backed by a SQLite file. Queries run on tokio's blocking pool.
#[derive(Clone)]
pub struct SqliteStore {
    db: Arc<Mutex<ChatDatabase>>,
    clock: Clock,
}

impl SqliteStore {
    pub fn open<P: AsRef<Path>>(path: P) -> StoreResult<Self> {
        Ok(Self::from_database(ChatDatabase::with_path(path)?))
    }

    pub fn in_memory() -> StoreResult<Self> {
        Ok(Self::from_database(ChatDatabase::in_memory()?))
    }

    pub fn from_database(db: ChatDatabase) -> Self {
        Self {
            db: Arc::new(Mutex::new(db)),
            clock: Arc::new(|| Utc::now().timestamp_millis()),
        }
    }

    /// Replace the timestamp source (milliseconds since the epoch).
    pub fn with_clock<F>(mut self, clock: F) -> Self
    where
        F: Fn() -> i64 + Send + Sync + 'static,
    {
        self.clock = Arc::new(clock);
        self
    }

    pub async fn upsert_user(&self, user: User) -> StoreResult<()> {
        self.run(move |db| Ok(db.upsert_user(&user)?)).await
    }

    /// Insert a fully-formed message, keeping its id and timestamp.
    pub async fn import_message(&self, message: Message) -> StoreResult<()> {
        self.run(move |db| {
            if !db.chat_exists(&message.chat_id)? {
                return Err(StoreError::NotFound(format!("chat {}", message.chat_id)));
            }
            Ok(db.insert_message(&message)?)
        })
        .await
    }

    async fn run<T, F>(&self, op: F) -> StoreResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut ChatDatabase) -> StoreResult<T> + Send + 'static,
    {
        let db = Arc::clone(&self.db);
        tokio::task::spawn_blocking(move || {
            let mut guard = db.lock().map_err(|_| StoreError::Poisoned)?;
            op(&mut guard)
        })
        .await?
    }
}

#[async_trait]
impl MessageStore for SqliteStore {
    async fn load_users(&self) -> StoreResult<Vec<User>> {
        self.run(|db| Ok(db.get_users()?)).await
    }

    async fn load_chats(&self) -> StoreResult<Vec<Chat>> {
        self.run(|db| Ok(db.get_chats()?)).await
    }

    async fn load_chat(&self, chat_id: &str) -> StoreResult<Option<Chat>> {
        let chat_id = chat_id.to_string();
        self.run(move |db| Ok(db.get_chat(&chat_id)?)).await
    }

    async fn create_chat(&self, participant_ids: &[String]) -> StoreResult<Chat> {
        if participant_ids.is_empty() {
            return Err(StoreError::Rejected(
                "a chat needs at least one participant".to_string(),
            ));
        }

        let chat_id = Uuid::new_v4().to_string();
        let participants = participant_ids.to_vec();
        let created_at = (self.clock)();
        log::debug!("Creating chat {chat_id} with {} participants", participants.len());

        self.run(move |db| {
            db.insert_chat(&chat_id, &participants, created_at)?;
            db.get_chat(&chat_id)?
                .ok_or_else(|| StoreError::NotFound(format!("chat {chat_id}")))
        })
        .await
    }

    async fn send_message(
        &self,
        chat_id: &str,
        text: &str,
        sender_id: &str,
    ) -> StoreResult<Message> {
        let text = text.trim();
        if text.is_empty() {
            return Err(StoreError::Rejected("message text is empty".to_string()));
        }

        let message = Message {
            id: Uuid::new_v4().to_string(),
            chat_id: chat_id.to_string(),
            sender_id: sender_id.to_string(),
            text: text.to_string(),
            timestamp: (self.clock)(),
            reaction: None,
        };

        self.run(move |db| {
            if !db.chat_exists(&message.chat_id)? {
                return Err(StoreError::NotFound(format!("chat {}", message.chat_id)));
            }
            let participants = db.get_participants(&message.chat_id)?;
            if !participants.contains(&message.sender_id) {
                return Err(StoreError::Rejected(format!(
                    "{} is not a participant of chat {}",
                    message.sender_id, message.chat_id
                )));
            }
            db.insert_message(&message)?;
            Ok(message)
        })
        .await
    }

    async fn update_message(
        &self,
        chat_id: &str,
        message_id: &str,
        patch: MessagePatch,
    ) -> StoreResult<()> {
        if patch.text.as_deref().is_some_and(|text| text.trim().is_empty()) {
            return Err(StoreError::Rejected("message text is empty".to_string()));
        }

        let chat_id = chat_id.to_string();
        let message_id = message_id.to_string();
        self.run(move |db| {
            if db.update_message(&chat_id, &message_id, &patch)? {
                Ok(())
            } else {
                Err(StoreError::NotFound(format!("message {message_id}")))
            }
        })
        .await
    }

    async fn delete_message(&self, chat_id: &str, message_id: &str) -> StoreResult<()> {
        let chat_id = chat_id.to_string();
        let message_id = message_id.to_string();
        self.run(move |db| {
            if db.delete_message(&chat_id, &message_id)? {
                Ok(())
            } else {
                Err(StoreError::NotFound(format!("message {message_id}")))
            }
        })
        .await
    }
}
