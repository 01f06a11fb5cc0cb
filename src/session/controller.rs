use std::fmt;
use std::sync::Arc;

use super::chat_session::{ChatSession, chat_title};
use super::composer::{Composer, Intent};
use super::focus::Focus;
use super::moderation::{EditDeleteController, authorize};
use super::reactions::ReactionEngine;
use crate::common::{Chat, Message, RoomSnapshot, User, UserId};
use crate::error::{Action, ChatError};
use crate::storage::MessageStore;

/// Blocking, user-visible failure report. Stays up until dismissed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub action: Action,
    pub detail: String,
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "could not {}", self.action)
    }
}

/// Everything one open chat room needs: the session view, the composer and
/// the shared focus pointer, on top of a [`MessageStore`].
///
/// Every write is followed by a full refresh of the view.
pub struct RoomController<S: ?Sized> {
    store: Arc<S>,
    current_user: UserId,
    users: Vec<User>,
    session: ChatSession,
    composer: Composer,
    focus: Focus,
    notice: Option<Notice>,
    not_found: bool,
}

impl<S> RoomController<S>
where
    S: MessageStore + ?Sized,
{
    pub fn new(store: Arc<S>, current_user: impl Into<UserId>) -> Self {
        Self {
            store,
            current_user: current_user.into(),
            users: Vec::new(),
            session: ChatSession::new(),
            composer: Composer::new(),
            focus: Focus::Idle,
            notice: None,
            not_found: false,
        }
    }

    pub fn current_user(&self) -> &str {
        &self.current_user
    }

    pub fn chat(&self) -> Option<&Chat> {
        self.session.chat()
    }

    pub fn focus(&self) -> &Focus {
        &self.focus
    }

    pub fn draft(&self) -> &str {
        self.composer.draft()
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn is_not_found(&self) -> bool {
        self.not_found
    }

    pub fn title(&self) -> String {
        match self.session.chat() {
            Some(chat) => chat_title(chat, &self.users, &self.current_user),
            None => "Chat not found".to_string(),
        }
    }

    pub async fn open(&mut self, chat_id: &str) -> Result<(), ChatError> {
        match self.store.load_users().await {
            Ok(users) => self.users = users,
            Err(err) => log::warn!("Failed to load users: {err}"),
        }

        self.focus = Focus::Idle;
        self.composer.clear();
        let result = self.session.open(&*self.store, chat_id).await.map(|_| ());
        self.settle(result)
    }

    pub async fn refresh(&mut self) -> Result<(), ChatError> {
        let result = self.session.refresh(&*self.store).await.map(|_| ());
        self.settle(result)
    }

    /// Typed text from the front end; does not bump the draft revision.
    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.composer.set_draft(text);
    }

    pub fn can_submit(&self) -> bool {
        self.composer.can_submit()
    }

    /// Send the draft, or commit it as the active edit.
    pub async fn submit(&mut self) -> Result<(), ChatError> {
        let intent = self.composer.intent(&self.focus)?;
        self.focus.close_picker();

        let result = match intent {
            Intent::Send(text) => self.send(&text).await,
            Intent::CommitEdit { message_id, text } => {
                let edited = EditDeleteController::new(&*self.store)
                    .commit_edit(&self.session, &message_id, &self.current_user, &text)
                    .await;
                match edited {
                    // The store has the new text; a failed reload must not
                    // leave the composer in edit mode.
                    Ok(()) => {
                        self.focus.end_edit();
                        self.composer.clear();
                        self.session.refresh(&*self.store).await.map(|_| ())
                    }
                    Err(err) => Err(err),
                }
            }
        };
        self.settle(result)
    }

    async fn send(&mut self, text: &str) -> Result<(), ChatError> {
        let chat_id = self
            .session
            .chat_id()
            .ok_or(ChatError::NoOpenChat)?
            .to_string();

        let message = self
            .store
            .send_message(&chat_id, text, &self.current_user)
            .await
            .map_err(|err| ChatError::failed(Action::Send, err))?;
        log::info!("Sent message {} to chat {chat_id}", message.id);

        self.composer.clear();
        self.session.refresh(&*self.store).await?;
        Ok(())
    }

    /// Enter edit mode for one of the current user's own messages.
    pub fn begin_edit(&mut self, message_id: &str) -> Result<(), ChatError> {
        let text = authorize(&self.session, message_id, &self.current_user)?
            .text
            .clone();
        self.focus.begin_edit(message_id);
        self.composer.seed(text);
        log::debug!("Editing message {message_id}");
        Ok(())
    }

    pub fn cancel_edit(&mut self) {
        if self.focus.end_edit().is_some() {
            self.composer.clear();
        }
    }

    pub async fn delete(&mut self, message_id: &str) -> Result<(), ChatError> {
        self.focus.close_picker();
        let result = EditDeleteController::new(&*self.store)
            .delete(&mut self.session, message_id, &self.current_user)
            .await;
        self.settle(result)
    }

    pub async fn toggle_reaction(
        &mut self,
        message_id: &str,
        emoji: &str,
    ) -> Result<Message, ChatError> {
        let result = ReactionEngine::new(&*self.store)
            .toggle(&mut self.session, message_id, emoji, &self.current_user)
            .await;
        self.focus.close_picker();
        self.settle(result)
    }

    pub fn open_picker(&mut self, message_id: &str) -> bool {
        self.focus.open_picker(message_id)
    }

    pub fn close_picker(&mut self) -> bool {
        self.focus.close_picker()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    /// Drain pending one-shot signals into a snapshot for the front end.
    pub fn snapshot(&mut self) -> RoomSnapshot {
        RoomSnapshot {
            current_user: self.current_user.clone(),
            title: self.title(),
            chat: self.session.chat().cloned(),
            not_found: self.not_found,
            focus: self.focus.clone(),
            draft: self.composer.draft().to_string(),
            draft_revision: self.composer.revision(),
            scroll_to: self.session.take_scroll_target(),
            notice: self.notice.clone(),
            submitted: None,
        }
    }

    /// Reconcile room state with the outcome of an operation. Store failures
    /// become a notice; a vanished chat switches to the not-found view.
    fn settle<T>(&mut self, result: Result<T, ChatError>) -> Result<T, ChatError> {
        match &result {
            Ok(_) => self.not_found = false,
            Err(ChatError::ChatNotFound(_)) => {
                self.not_found = true;
                if self.focus.end_edit().is_some() {
                    self.composer.clear();
                }
                self.focus = Focus::Idle;
            }
            Err(ChatError::OperationFailed { action, source }) => {
                log::error!("Could not {action}: {source}");
                self.notice = Some(Notice {
                    action: *action,
                    detail: source.to_string(),
                });
            }
            Err(err) => log::warn!("Room operation refused: {err}"),
        }

        // Focus must never point at a message that is gone
        let stale = self
            .focus
            .target()
            .is_some_and(|id| self.session.chat().is_none_or(|chat| chat.message(id).is_none()));
        if stale {
            if self.focus.end_edit().is_some() {
                self.composer.clear();
            }
            self.focus = Focus::Idle;
        }
        result
    }
}
