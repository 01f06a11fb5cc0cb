use eframe::egui;

use crate::common::RoomSnapshot;

pub fn render(ui: &mut egui::Ui, snapshot: Option<&RoomSnapshot>) {
    let title = snapshot.map_or("Loading...", |snapshot| snapshot.title.as_str());
    ui.horizontal(|ui| {
        ui.heading(title);
        if let Some(chat) = snapshot.and_then(|snapshot| snapshot.chat.as_ref()) {
            ui.label(
                egui::RichText::new(format!("{} participants", chat.participant_ids.len())).weak(),
            );
        }
    });
}
