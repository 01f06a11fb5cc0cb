use super::focus::Focus;
use crate::common::MessageId;
use crate::error::ChatError;

/// What a submit from the composer asks the store to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Send(String),
    CommitEdit { message_id: MessageId, text: String },
}

/// Composer mode as seen by the front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComposerMode<'a> {
    Composing,
    Editing(&'a str),
}

impl<'a> ComposerMode<'a> {
    pub fn from_focus(focus: &'a Focus) -> Self {
        match focus.editing() {
            Some(id) => ComposerMode::Editing(id),
            None => ComposerMode::Composing,
        }
    }
}

/// Draft buffer.
///
/// `revision` changes only when the room itself rewrites the draft (edit
/// seeding, clearing after a commit), so a front end knows when to replace
/// its own text field.
#[derive(Debug, Default)]
pub struct Composer {
    draft: String,
    revision: u64,
}

impl Composer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Typed text from the user.
    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    pub fn seed(&mut self, text: impl Into<String>) {
        self.draft = text.into();
        self.revision += 1;
    }

    pub fn clear(&mut self) {
        self.draft.clear();
        self.revision += 1;
    }

    pub fn can_submit(&self) -> bool {
        !self.draft.trim().is_empty()
    }

    /// Turn the draft into an intent for the current mode. Blank drafts never
    /// reach the store.
    pub fn intent(&self, focus: &Focus) -> Result<Intent, ChatError> {
        let text = self.draft.trim();
        if text.is_empty() {
            return Err(ChatError::EmptyDraft);
        }

        Ok(match ComposerMode::from_focus(focus) {
            ComposerMode::Editing(message_id) => Intent::CommitEdit {
                message_id: message_id.to_string(),
                text: text.to_string(),
            },
            ComposerMode::Composing => Intent::Send(text.to_string()),
        })
    }
}
