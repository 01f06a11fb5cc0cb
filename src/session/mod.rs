pub mod chat_session;
pub mod composer;
pub mod controller;
pub mod focus;
pub mod moderation;
pub mod reactions;
pub mod worker;

pub use chat_session::{ChatSession, chat_title, format_time};
pub use composer::{Composer, ComposerMode, Intent};
pub use controller::{Notice, RoomController};
pub use focus::Focus;
pub use moderation::EditDeleteController;
pub use reactions::{ReactionEngine, SUPPORTED_REACTIONS};
pub use worker::RoomWorker;
