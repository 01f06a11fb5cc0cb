use crate::common::MessageId;

/// The one message the room is currently focused on, if any.
///
/// Editing and the reaction picker share this pointer, so at most one of
/// them is active and only for a single message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Focus {
    #[default]
    Idle,
    Editing(MessageId),
    PickerOpen(MessageId),
}

impl Focus {
    pub fn editing(&self) -> Option<&str> {
        match self {
            Focus::Editing(id) => Some(id),
            _ => None,
        }
    }

    pub fn picker(&self) -> Option<&str> {
        match self {
            Focus::PickerOpen(id) => Some(id),
            _ => None,
        }
    }

    pub fn is_picker_open_for(&self, message_id: &str) -> bool {
        self.picker() == Some(message_id)
    }

    pub fn target(&self) -> Option<&str> {
        match self {
            Focus::Idle => None,
            Focus::Editing(id) | Focus::PickerOpen(id) => Some(id),
        }
    }

    /// Open the picker for `message_id`, closing any other picker.
    /// Refused while an edit is in progress so the draft is never lost.
    pub fn open_picker(&mut self, message_id: &str) -> bool {
        if matches!(self, Focus::Editing(_)) {
            return false;
        }
        *self = Focus::PickerOpen(message_id.to_string());
        true
    }

    /// Returns whether a picker was open.
    pub fn close_picker(&mut self) -> bool {
        if matches!(self, Focus::PickerOpen(_)) {
            *self = Focus::Idle;
            return true;
        }
        false
    }

    pub fn begin_edit(&mut self, message_id: &str) {
        *self = Focus::Editing(message_id.to_string());
    }

    /// Leave edit mode, returning the message that was being edited.
    pub fn end_edit(&mut self) -> Option<MessageId> {
        match std::mem::take(self) {
            Focus::Editing(id) => Some(id),
            other => {
                *self = other;
                None
            }
        }
    }
}
