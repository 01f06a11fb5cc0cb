use rusqlite::{OptionalExtension, Result as SqlResult, Row, params};
use std::path::Path;

use super::database::Database;
use crate::common::{Chat, Message, MessagePatch, User};

pub const DEFAULT_DB_PATH: &str = "data/chat.db";

/// SQLite tables backing users, chats and their messages.
pub struct ChatDatabase {
    db: Database,
}

impl ChatDatabase {
    /// Initialize chat database at custom path
    pub fn with_path<P: AsRef<Path>>(path: P) -> SqlResult<Self> {
        Self::from_database(Database::new(path)?)
    }

    pub fn in_memory() -> SqlResult<Self> {
        Self::from_database(Database::in_memory()?)
    }

    fn from_database(db: Database) -> SqlResult<Self> {
        let chat_db = Self { db };
        chat_db.init_schema()?;
        Ok(chat_db)
    }

    fn init_schema(&self) -> SqlResult<()> {
        let conn = self.db.connection();

        conn.execute(
            "CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                avatar_ref TEXT
            )",
            [],
        )?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS chats (
                id TEXT PRIMARY KEY,
                created_at INTEGER NOT NULL
            )",
            [],
        )?;

        // Participants keep their insertion position so titles stay stable
        conn.execute(
            "CREATE TABLE IF NOT EXISTS chat_participants (
                chat_id TEXT NOT NULL REFERENCES chats(id) ON DELETE CASCADE,
                user_id TEXT NOT NULL,
                position INTEGER NOT NULL,
                PRIMARY KEY (chat_id, user_id)
            )",
            [],
        )?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS messages (
                id TEXT PRIMARY KEY,
                chat_id TEXT NOT NULL REFERENCES chats(id) ON DELETE CASCADE,
                sender_id TEXT NOT NULL,
                text TEXT NOT NULL,
                timestamp INTEGER NOT NULL,
                reaction TEXT
            )",
            [],
        )?;

        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_messages_chat_timestamp ON messages(chat_id, timestamp)",
            [],
        )?;

        Ok(())
    }

    // ========== Users ==========

    pub fn upsert_user(&self, user: &User) -> SqlResult<()> {
        let conn = self.db.connection();
        conn.execute(
            "INSERT OR REPLACE INTO users (id, name, avatar_ref) VALUES (?1, ?2, ?3)",
            params![user.id, user.name, user.avatar_ref],
        )?;
        Ok(())
    }

    pub fn get_users(&self) -> SqlResult<Vec<User>> {
        let conn = self.db.connection();
        let mut stmt = conn.prepare("SELECT id, name, avatar_ref FROM users ORDER BY name ASC")?;

        let users = stmt
            .query_map([], |row| {
                Ok(User {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    avatar_ref: row.get(2)?,
                })
            })?
            .collect::<SqlResult<Vec<_>>>()?;

        Ok(users)
    }

    // ========== Chats ==========

    /// Insert a chat with its participants in one transaction.
    /// Duplicate participant ids collapse to their first position.
    pub fn insert_chat(
        &mut self,
        chat_id: &str,
        participant_ids: &[String],
        created_at: i64,
    ) -> SqlResult<()> {
        let tx = self.db.connection_mut().transaction()?;
        tx.execute(
            "INSERT INTO chats (id, created_at) VALUES (?1, ?2)",
            params![chat_id, created_at],
        )?;
        for (position, user_id) in participant_ids.iter().enumerate() {
            tx.execute(
                "INSERT OR IGNORE INTO chat_participants (chat_id, user_id, position)
                 VALUES (?1, ?2, ?3)",
                params![chat_id, user_id, position as i64],
            )?;
        }
        tx.commit()
    }

    pub fn chat_exists(&self, chat_id: &str) -> SqlResult<bool> {
        let conn = self.db.connection();
        conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM chats WHERE id = ?1)",
            params![chat_id],
            |row| row.get(0),
        )
    }

    /// Load one chat with participants and ordered messages.
    pub fn get_chat(&self, chat_id: &str) -> SqlResult<Option<Chat>> {
        let conn = self.db.connection();
        let found: Option<String> = conn
            .query_row(
                "SELECT id FROM chats WHERE id = ?1",
                params![chat_id],
                |row| row.get(0),
            )
            .optional()?;

        let Some(id) = found else {
            return Ok(None);
        };

        Ok(Some(Chat {
            participant_ids: self.get_participants(&id)?,
            messages: self.get_messages(&id)?,
            id,
        }))
    }

    /// All chats, oldest first.
    pub fn get_chats(&self) -> SqlResult<Vec<Chat>> {
        let conn = self.db.connection();
        let mut stmt = conn.prepare("SELECT id FROM chats ORDER BY created_at ASC, rowid ASC")?;
        let ids = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<SqlResult<Vec<_>>>()?;

        let mut chats = Vec::with_capacity(ids.len());
        for id in ids {
            if let Some(chat) = self.get_chat(&id)? {
                chats.push(chat);
            }
        }
        Ok(chats)
    }

    pub fn get_participants(&self, chat_id: &str) -> SqlResult<Vec<String>> {
        let conn = self.db.connection();
        let mut stmt = conn.prepare(
            "SELECT user_id FROM chat_participants WHERE chat_id = ?1 ORDER BY position ASC",
        )?;

        let participants = stmt
            .query_map(params![chat_id], |row| row.get(0))?
            .collect::<SqlResult<Vec<_>>>()?;

        Ok(participants)
    }

    // ========== Messages ==========

    pub fn insert_message(&self, message: &Message) -> SqlResult<()> {
        let conn = self.db.connection();
        conn.execute(
            "INSERT INTO messages (id, chat_id, sender_id, text, timestamp, reaction)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                message.id,
                message.chat_id,
                message.sender_id,
                message.text,
                message.timestamp,
                message.reaction
            ],
        )?;
        Ok(())
    }

    /// Messages of a chat, timestamp ascending; equal timestamps keep insertion order.
    pub fn get_messages(&self, chat_id: &str) -> SqlResult<Vec<Message>> {
        let conn = self.db.connection();
        let mut stmt = conn.prepare(
            "SELECT id, chat_id, sender_id, text, timestamp, reaction
             FROM messages
             WHERE chat_id = ?1
             ORDER BY timestamp ASC, rowid ASC",
        )?;

        let messages = stmt
            .query_map(params![chat_id], message_from_row)?
            .collect::<SqlResult<Vec<_>>>()?;

        Ok(messages)
    }

    /// Apply a patch. Returns `false` when the message does not exist in that chat.
    pub fn update_message(
        &mut self,
        chat_id: &str,
        message_id: &str,
        patch: &MessagePatch,
    ) -> SqlResult<bool> {
        let tx = self.db.connection_mut().transaction()?;
        let exists: bool = tx.query_row(
            "SELECT EXISTS(SELECT 1 FROM messages WHERE chat_id = ?1 AND id = ?2)",
            params![chat_id, message_id],
            |row| row.get(0),
        )?;
        if !exists {
            return Ok(false);
        }

        if let Some(text) = &patch.text {
            tx.execute(
                "UPDATE messages SET text = ?1 WHERE chat_id = ?2 AND id = ?3",
                params![text, chat_id, message_id],
            )?;
        }
        if let Some(reaction) = &patch.reaction {
            tx.execute(
                "UPDATE messages SET reaction = ?1 WHERE chat_id = ?2 AND id = ?3",
                params![reaction, chat_id, message_id],
            )?;
        }
        tx.commit()?;
        Ok(true)
    }

    /// Remove a message. Returns `false` when nothing was deleted.
    pub fn delete_message(&self, chat_id: &str, message_id: &str) -> SqlResult<bool> {
        let conn = self.db.connection();
        let removed = conn.execute(
            "DELETE FROM messages WHERE chat_id = ?1 AND id = ?2",
            params![chat_id, message_id],
        )?;
        Ok(removed > 0)
    }
}

fn message_from_row(row: &Row<'_>) -> SqlResult<Message> {
    Ok(Message {
        id: row.get(0)?,
        chat_id: row.get(1)?,
        sender_id: row.get(2)?,
        text: row.get(3)?,
        timestamp: row.get(4)?,
        reaction: row.get(5)?,
    })
}
