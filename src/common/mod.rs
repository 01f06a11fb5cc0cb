pub mod commands;
pub mod events;
pub mod types;

pub use commands::RoomCommand;
pub use events::{RoomEvent, RoomSnapshot};
pub use types::{Chat, ChatId, Message, MessageId, MessagePatch, User, UserId};
