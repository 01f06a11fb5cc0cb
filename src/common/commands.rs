use super::types::{ChatId, MessageId};

/// Commands the front end sends down to the room worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoomCommand {
    Open(ChatId),
    Refresh,
    /// Send a new message, or commit the active edit, using this draft text.
    /// The ticket comes back on the snapshot that answers it.
    Submit { text: String, ticket: u64 },
    BeginEdit(MessageId),
    CancelEdit,
    Delete(MessageId),
    ToggleReaction {
        message_id: MessageId,
        emoji: String,
    },
    OpenPicker(MessageId),
    /// A tap outside the picker.
    ClosePicker,
    DismissNotice,
}
