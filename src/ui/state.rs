use crate::common::{MessageId, RoomSnapshot};

/// Local state of the room window.
#[derive(Default)]
pub struct AppState {
    /// Last snapshot published by the room worker.
    pub snapshot: Option<RoomSnapshot>,
    pub input_text: String,
    /// Draft revision already copied into `input_text`.
    pub draft_revision: u64,
    /// Message to bring into view on the next frame.
    pub pending_scroll: Option<MessageId>,
    /// Ticket of the submit still in flight; blocks double submits.
    pub pending_submit: Option<u64>,
    last_ticket: u64,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply_snapshot(&mut self, snapshot: RoomSnapshot) {
        // The worker only rewrites the draft on edit start, cancel or a
        // successful submit; otherwise keep what the user is typing.
        if snapshot.draft_revision != self.draft_revision {
            self.input_text = snapshot.draft.clone();
            self.draft_revision = snapshot.draft_revision;
        }
        if let Some(message_id) = &snapshot.scroll_to {
            self.pending_scroll = Some(message_id.clone());
        }
        // Snapshots for commands queued before the submit do not count
        if snapshot.submitted.is_some() && snapshot.submitted == self.pending_submit {
            self.pending_submit = None;
        }
        self.snapshot = Some(snapshot);
    }

    /// Mark a submit as in flight and hand out its ticket.
    pub fn begin_submit(&mut self) -> u64 {
        self.last_ticket += 1;
        self.pending_submit = Some(self.last_ticket);
        self.last_ticket
    }

    pub fn can_submit(&self) -> bool {
        self.pending_submit.is_none() && !self.input_text.trim().is_empty()
    }

    pub fn is_editing(&self) -> bool {
        self.snapshot
            .as_ref()
            .is_some_and(|snapshot| snapshot.focus.editing().is_some())
    }
}
