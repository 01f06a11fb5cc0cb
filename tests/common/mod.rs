#![allow(dead_code)]

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use chat_room::StoreError;
use chat_room::common::{Chat, Message, MessagePatch, User};
use chat_room::error::StoreResult;
use chat_room::storage::{MessageStore, SqliteStore};

pub const ME: &str = "alice";
pub const OTHER: &str = "bob";

/// In-memory store that records writes and can be told to reject them.
pub struct RecordingStore {
    pub inner: SqliteStore,
    pub reject_send: AtomicBool,
    pub reject_update: AtomicBool,
    pub reject_delete: AtomicBool,
    /// Fail every `load_chat` with a store error.
    pub fail_loads: AtomicBool,
    /// Turn on `fail_loads` once an update has been stored.
    pub fail_loads_after_update: AtomicBool,
    /// Report the chat as gone from `load_chat`.
    pub hide_chat: AtomicBool,
    pub sends: AtomicUsize,
    pub patches: Mutex<Vec<(String, MessagePatch)>>,
    pub deletes: AtomicUsize,
}

impl RecordingStore {
    pub fn new(inner: SqliteStore) -> Self {
        Self {
            inner,
            reject_send: AtomicBool::new(false),
            reject_update: AtomicBool::new(false),
            reject_delete: AtomicBool::new(false),
            fail_loads: AtomicBool::new(false),
            fail_loads_after_update: AtomicBool::new(false),
            hide_chat: AtomicBool::new(false),
            sends: AtomicUsize::new(0),
            patches: Mutex::new(Vec::new()),
            deletes: AtomicUsize::new(0),
        }
    }

    pub fn recorded_patches(&self) -> Vec<(String, MessagePatch)> {
        self.patches.lock().unwrap().clone()
    }

    pub fn write_count(&self) -> usize {
        self.sends.load(Ordering::SeqCst)
            + self.patches.lock().unwrap().len()
            + self.deletes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MessageStore for RecordingStore {
    async fn load_users(&self) -> StoreResult<Vec<User>> {
        self.inner.load_users().await
    }

    async fn load_chats(&self) -> StoreResult<Vec<Chat>> {
        self.inner.load_chats().await
    }

    async fn load_chat(&self, chat_id: &str) -> StoreResult<Option<Chat>> {
        if self.fail_loads.load(Ordering::SeqCst) {
            return Err(StoreError::Rejected("timeout".into()));
        }
        if self.hide_chat.load(Ordering::SeqCst) {
            return Ok(None);
        }
        self.inner.load_chat(chat_id).await
    }

    async fn create_chat(&self, participant_ids: &[String]) -> StoreResult<Chat> {
        self.inner.create_chat(participant_ids).await
    }

    async fn send_message(
        &self,
        chat_id: &str,
        text: &str,
        sender_id: &str,
    ) -> StoreResult<Message> {
        self.sends.fetch_add(1, Ordering::SeqCst);
        if self.reject_send.load(Ordering::SeqCst) {
            return Err(StoreError::Rejected("send disabled".into()));
        }
        self.inner.send_message(chat_id, text, sender_id).await
    }

    async fn update_message(
        &self,
        chat_id: &str,
        message_id: &str,
        patch: MessagePatch,
    ) -> StoreResult<()> {
        self.patches
            .lock()
            .unwrap()
            .push((message_id.to_string(), patch.clone()));
        if self.reject_update.load(Ordering::SeqCst) {
            return Err(StoreError::Rejected("update disabled".into()));
        }
        self.inner.update_message(chat_id, message_id, patch).await?;
        if self.fail_loads_after_update.load(Ordering::SeqCst) {
            self.fail_loads.store(true, Ordering::SeqCst);
        }
        Ok(())
    }

    async fn delete_message(&self, chat_id: &str, message_id: &str) -> StoreResult<()> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        if self.reject_delete.load(Ordering::SeqCst) {
            return Err(StoreError::Rejected("delete disabled".into()));
        }
        self.inner.delete_message(chat_id, message_id).await
    }
}

pub fn message(id: &str, chat_id: &str, sender: &str, text: &str, timestamp: i64) -> Message {
    Message {
        id: id.to_string(),
        chat_id: chat_id.to_string(),
        sender_id: sender.to_string(),
        text: text.to_string(),
        timestamp,
        reaction: None,
    }
}

/// Alice and Bob in one chat holding `[{1, "hi", 100}]` from Alice, plus
/// `{2, "yo", 150}` from Bob when `with_reply` is set. New writes are
/// stamped 200.
pub async fn seeded(with_reply: bool) -> (RecordingStore, String) {
    let inner = SqliteStore::in_memory().unwrap().with_clock(|| 200);
    for (id, name) in [(ME, "Alice"), (OTHER, "Bob")] {
        inner
            .upsert_user(User {
                id: id.to_string(),
                name: name.to_string(),
                avatar_ref: None,
            })
            .await
            .unwrap();
    }

    let chat = inner
        .create_chat(&[ME.to_string(), OTHER.to_string()])
        .await
        .unwrap();
    inner
        .import_message(message("1", &chat.id, ME, "hi", 100))
        .await
        .unwrap();
    if with_reply {
        inner
            .import_message(message("2", &chat.id, OTHER, "yo", 150))
            .await
            .unwrap();
    }

    (RecordingStore::new(inner), chat.id)
}
