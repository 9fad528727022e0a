//! Reusable UI components
//!
//! Message bubbles, typing indicator and the send button.

use crate::chat::MessageRole;
use eframe::egui;

/// Fraction of the available width a bubble may take
const BUBBLE_MAX_WIDTH_RATIO: f32 = 0.75;

/// Text of the typing indicator for the given assistant name
pub fn typing_text(assistant_name: &str) -> String {
    format!("{} is typing...", assistant_name)
}

/// Background colour of a bubble
/// User bubbles use the selection colour, bot bubbles a neutral widget fill
pub fn bubble_fill(visuals: &egui::Visuals, role: MessageRole) -> egui::Color32 {
    match role {
        MessageRole::User => visuals.selection.bg_fill,
        MessageRole::Bot => visuals.widgets.inactive.bg_fill,
    }
}

/// Render one message bubble, right-aligned for the user and left for the bot
pub fn message_bubble(ui: &mut egui::Ui, role: MessageRole, text: &str) {
    let align = match role {
        MessageRole::User => egui::Layout::right_to_left(egui::Align::TOP),
        MessageRole::Bot => egui::Layout::left_to_right(egui::Align::TOP),
    };
    let max_width = ui.available_width() * BUBBLE_MAX_WIDTH_RATIO;
    let fill = bubble_fill(ui.visuals(), role);

    ui.with_layout(align, |ui| {
        egui::Frame::none()
            .fill(fill)
            .rounding(egui::Rounding::same(8.0))
            .inner_margin(egui::Margin::symmetric(10.0, 6.0))
            .show(ui, |ui| {
                ui.set_max_width(max_width);
                ui.add(egui::Label::new(text).wrap(true));
            });
    });
}

/// Render the synthetic typing row as a weak bot bubble
pub fn typing_bubble(ui: &mut egui::Ui, assistant_name: &str) {
    let fill = bubble_fill(ui.visuals(), MessageRole::Bot);
    ui.with_layout(egui::Layout::left_to_right(egui::Align::TOP), |ui| {
        egui::Frame::none()
            .fill(fill)
            .rounding(egui::Rounding::same(8.0))
            .inner_margin(egui::Margin::symmetric(10.0, 6.0))
            .show(ui, |ui| {
                ui.label(egui::RichText::new(typing_text(assistant_name)).italics().weak());
            });
    });
}

/// Render the send button
pub fn send_button(ui: &mut egui::Ui) -> egui::Response {
    ui.button(egui::RichText::new("Send").strong())
}
