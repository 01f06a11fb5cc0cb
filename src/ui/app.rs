use eframe::egui;
use tokio::sync::mpsc;

use crate::common::{RoomCommand, RoomEvent};

use super::components::{
    chat_area, header,
    input_bar::{self, InputAction},
    notice,
};
use super::state::AppState;

pub struct ChatApp {
    state: AppState,
    command_sender: mpsc::Sender<RoomCommand>,
    event_receiver: mpsc::Receiver<RoomEvent>,
}

impl ChatApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        command_sender: mpsc::Sender<RoomCommand>,
        event_receiver: mpsc::Receiver<RoomEvent>,
    ) -> Self {
        Self {
            state: AppState::new(),
            command_sender,
            event_receiver,
        }
    }

    fn handle_room_events(&mut self) {
        while let Ok(event) = self.event_receiver.try_recv() {
            match event {
                RoomEvent::Snapshot(snapshot) => self.state.apply_snapshot(snapshot),
            }
        }
    }

    fn send_command(&mut self, command: RoomCommand) {
        let submit = matches!(command, RoomCommand::Submit { .. });
        if let Err(err) = self.command_sender.try_send(command) {
            log::warn!("Failed to send command to room worker: {err}");
            if submit {
                self.state.pending_submit = None;
            }
        }
    }
}

impl eframe::App for ChatApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_room_events();
        let mut commands = Vec::new();

        egui::TopBottomPanel::top("room_header").show(ctx, |ui| {
            header::render(ui, self.state.snapshot.as_ref());
        });

        egui::TopBottomPanel::bottom("composer").show(ctx, |ui| {
            let editing = self.state.is_editing();
            let can_submit = self.state.can_submit();
            match input_bar::render(ui, &mut self.state.input_text, editing, can_submit) {
                Some(InputAction::Submit(text)) => {
                    let ticket = self.state.begin_submit();
                    commands.push(RoomCommand::Submit { text, ticket });
                }
                Some(InputAction::CancelEdit) => commands.push(RoomCommand::CancelEdit),
                None => {}
            }
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            commands.extend(chat_area::render(ui, &mut self.state));
        });

        if let Some(current) = self.state.snapshot.as_ref().and_then(|s| s.notice.as_ref()) {
            if notice::render(ctx, current) {
                commands.push(RoomCommand::DismissNotice);
            }
        }

        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            if self.state.is_editing() {
                commands.push(RoomCommand::CancelEdit);
            } else {
                commands.push(RoomCommand::ClosePicker);
            }
        }

        for command in commands {
            self.send_command(command);
        }

        ctx.request_repaint();
    }
}
