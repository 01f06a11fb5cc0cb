//! A single chat room: ordered messages, a composer that sends or edits, one
//! shared emoji reaction per message, and sender-only edit/delete, on top of
//! a pluggable [`storage::MessageStore`].

pub mod common;
pub mod config;
pub mod error;
pub mod session;
pub mod storage;
pub mod ui;

pub use error::{Action, ChatError, StoreError};
