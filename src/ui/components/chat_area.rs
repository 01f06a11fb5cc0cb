use eframe::egui;

use crate::common::RoomCommand;
use crate::ui::state::AppState;

/// Message list. Returns the commands triggered this frame.
pub fn render(ui: &mut egui::Ui, state: &mut AppState) -> Vec<RoomCommand> {
    let mut commands = Vec::new();
    let Some(snapshot) = state.snapshot.as_ref() else {
        ui.centered_and_justified(|ui| ui.spinner());
        return commands;
    };

    let Some(chat) = snapshot.chat.as_ref().filter(|_| !snapshot.not_found) else {
        ui.centered_and_justified(|ui| ui.label("Chat not found"));
        return commands;
    };

    // Registered first so every bubble sits on top of it; a click that lands
    // here is a tap outside the picker.
    let background = ui.interact(
        ui.max_rect(),
        ui.id().with("chat_background"),
        egui::Sense::click(),
    );

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            if chat.messages.is_empty() {
                ui.centered_and_justified(|ui| ui.label("No messages yet. Say hello!"));
                return;
            }

            for message in &chat.messages {
                let is_own = message.sender_id == snapshot.current_user;
                let picker_open = snapshot.focus.is_picker_open_for(&message.id);
                let (response, command) =
                    super::message_bubble::render(ui, message, is_own, picker_open);

                if state.pending_scroll.as_deref() == Some(message.id.as_str()) {
                    response.scroll_to_me(Some(egui::Align::BOTTOM));
                    state.pending_scroll = None;
                }
                commands.extend(command);
                ui.add_space(4.0);
            }
        });

    if background.clicked() && snapshot.focus.picker().is_some() {
        commands.push(RoomCommand::ClosePicker);
    }

    commands
}
