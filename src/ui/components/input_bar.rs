use eframe::egui;

pub enum InputAction {
    Submit(String),
    CancelEdit,
}

pub fn render(
    ui: &mut egui::Ui,
    input_text: &mut String,
    editing: bool,
    can_submit: bool,
) -> Option<InputAction> {
    let mut action = None;

    if editing {
        ui.horizontal(|ui| {
            ui.label(egui::RichText::new("Editing message").weak());
            if ui.small_button("Cancel").clicked() {
                action = Some(InputAction::CancelEdit);
            }
        });
    }

    ui.horizontal(|ui| {
        let editor = egui::TextEdit::multiline(input_text)
            .hint_text("Type a message...")
            .desired_rows(1)
            .desired_width(ui.available_width() - 64.0);
        let response = ui.add(editor);

        let label = if editing { "Save" } else { "Send" };
        let clicked = ui.add_enabled(can_submit, egui::Button::new(label)).clicked();
        let shortcut = response.has_focus()
            && ui.input(|i| i.modifiers.command && i.key_pressed(egui::Key::Enter));

        if can_submit && (clicked || shortcut) {
            action = Some(InputAction::Submit(input_text.trim().to_string()));
        }
    });

    action
}
