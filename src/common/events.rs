use super::types::{Chat, MessageId, UserId};
use crate::session::{Focus, Notice};

/// Events the room worker publishes to the front end.
#[derive(Debug, Clone)]
pub enum RoomEvent {
    Snapshot(RoomSnapshot),
}

/// Complete render state of a room after one command.
#[derive(Debug, Clone, PartialEq)]
pub struct RoomSnapshot {
    pub current_user: UserId,
    pub title: String,
    pub chat: Option<Chat>,
    /// The open chat could not be found; render the fallback view.
    pub not_found: bool,
    pub focus: Focus,
    pub draft: String,
    /// Bumped whenever the room rewrites the draft, e.g. when an edit starts.
    pub draft_revision: u64,
    /// Scroll to this message; set only when the message count grew.
    pub scroll_to: Option<MessageId>,
    pub notice: Option<Notice>,
    /// Ticket of the submit this snapshot answers, if any.
    pub submitted: Option<u64>,
}
