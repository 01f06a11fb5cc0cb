use eframe::egui;

use crate::session::Notice;

/// Modal failure report. Returns `true` once the user acknowledges it.
pub fn render(ctx: &egui::Context, notice: &Notice) -> bool {
    let mut dismissed = false;
    egui::Window::new("Something went wrong")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.label(notice.to_string());
            ui.label(egui::RichText::new(&notice.detail).small().weak());
            if ui.button("OK").clicked() {
                dismissed = true;
            }
        });
    dismissed
}
