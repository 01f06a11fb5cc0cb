use eframe::egui;

use crate::common::{Message, RoomCommand};
use crate::session::{SUPPORTED_REACTIONS, format_time};

const OWN_FILL: egui::Color32 = egui::Color32::from_rgb(0xDC, 0xF8, 0xC6);
const OWN_FILL_DARK: egui::Color32 = egui::Color32::from_rgb(0x23, 0x5A, 0x4A);

/// Draw one message. Edit and Delete are only offered on the viewer's own
/// messages.
pub fn render(
    ui: &mut egui::Ui,
    message: &Message,
    is_own: bool,
    picker_open: bool,
) -> (egui::Response, Option<RoomCommand>) {
    let mut command = None;
    let align = if is_own {
        egui::Align::Max
    } else {
        egui::Align::Min
    };

    let response = ui
        .with_layout(egui::Layout::top_down(align), |ui| {
            let mut frame = egui::Frame::group(ui.style());
            if is_own {
                let fill = if ui.visuals().dark_mode {
                    OWN_FILL_DARK
                } else {
                    OWN_FILL
                };
                frame = frame.fill(fill);
            }

            let bubble = frame.show(ui, |ui| {
                ui.label(&message.text);
                ui.horizontal(|ui| {
                    ui.label(egui::RichText::new(format_time(message.timestamp)).small().weak());
                    let reaction = message.reaction.as_deref().unwrap_or(" + ");
                    if ui.small_button(reaction).clicked() {
                        command = Some(RoomCommand::OpenPicker(message.id.clone()));
                    }
                });
            });

            if picker_open {
                ui.horizontal(|ui| {
                    for emoji in SUPPORTED_REACTIONS {
                        if ui.button(emoji).clicked() {
                            command = Some(RoomCommand::ToggleReaction {
                                message_id: message.id.clone(),
                                emoji: emoji.to_string(),
                            });
                        }
                    }

                    if is_own {
                        ui.separator();
                        if ui.button("Edit").clicked() {
                            command = Some(RoomCommand::BeginEdit(message.id.clone()));
                        }
                        if ui.button("Delete").clicked() {
                            command = Some(RoomCommand::Delete(message.id.clone()));
                        }
                    }
                });
            }

            bubble.response
        })
        .inner;

    (response, command)
}
