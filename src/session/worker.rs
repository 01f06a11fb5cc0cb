use tokio::sync::mpsc;

use super::controller::RoomController;
use crate::common::{RoomCommand, RoomEvent};
use crate::storage::MessageStore;

/// Drives a [`RoomController`] from a command channel, one command at a time,
/// and publishes a snapshot after each.
///
/// Commands are processed strictly in order, which is what serializes the
/// edit/commit path. There is no cancellation: when the front end drops its
/// sender the loop ends, and snapshots nobody receives are dropped.
pub struct RoomWorker<S: ?Sized> {
    controller: RoomController<S>,
    command_receiver: mpsc::Receiver<RoomCommand>,
    event_sender: mpsc::Sender<RoomEvent>,
}

impl<S> RoomWorker<S>
where
    S: MessageStore + ?Sized,
{
    pub fn new(
        controller: RoomController<S>,
        command_receiver: mpsc::Receiver<RoomCommand>,
        event_sender: mpsc::Sender<RoomEvent>,
    ) -> Self {
        Self {
            controller,
            command_receiver,
            event_sender,
        }
    }

    pub async fn run(mut self) {
        log::info!(
            "Room worker started for user {}",
            self.controller.current_user()
        );

        while let Some(command) = self.command_receiver.recv().await {
            let submitted = match &command {
                RoomCommand::Submit { ticket, .. } => Some(*ticket),
                _ => None,
            };
            self.handle_command(command).await;

            let mut snapshot = self.controller.snapshot();
            snapshot.submitted = submitted;
            if let Err(err) = self.event_sender.send(RoomEvent::Snapshot(snapshot)).await {
                log::debug!("Front end went away, dropping snapshot: {err}");
            }
        }

        log::info!("Room worker stopped");
    }

    async fn handle_command(&mut self, command: RoomCommand) {
        log::debug!("Handling {command:?}");
        // Failures are already recorded on the controller as notices or
        // view state; the worker only keeps going.
        let outcome = match command {
            RoomCommand::Open(chat_id) => self.controller.open(&chat_id).await,
            RoomCommand::Refresh => self.controller.refresh().await,
            RoomCommand::Submit { text, .. } => {
                self.controller.set_draft(text);
                self.controller.submit().await
            }
            RoomCommand::BeginEdit(message_id) => self.controller.begin_edit(&message_id),
            RoomCommand::CancelEdit => {
                self.controller.cancel_edit();
                Ok(())
            }
            RoomCommand::Delete(message_id) => self.controller.delete(&message_id).await,
            RoomCommand::ToggleReaction { message_id, emoji } => self
                .controller
                .toggle_reaction(&message_id, &emoji)
                .await
                .map(|_| ()),
            RoomCommand::OpenPicker(message_id) => {
                if !self.controller.open_picker(&message_id) {
                    log::debug!("Picker not opened for {message_id}: an edit is in progress");
                }
                Ok(())
            }
            RoomCommand::ClosePicker => {
                self.controller.close_picker();
                Ok(())
            }
            RoomCommand::DismissNotice => {
                self.controller.dismiss_notice();
                Ok(())
            }
        };

        if let Err(err) = outcome {
            log::debug!("Command finished with {err}");
        }
    }
}
