//! Main chat layout
//!
//! Menu bar, header, scrolling history and input line.

use crate::chat::{ChatController, ChatState, DisplayItem};
use crate::config::UiConfig;
use crate::ui::components::*;
use eframe::egui;

/// Hint shown in the empty input line
pub const INPUT_HINT: &str = "Ask something...";

/// Per-window view state that is not part of the chat domain
#[derive(Debug, Default)]
pub struct ViewState {
    /// Message count and pending flag seen at the previous frame
    last_seen: (usize, bool),
}

impl ViewState {
    /// Record what the history shows now; true if it changed since last frame
    ///
    /// Keyed on the message count and the pending flag, not the row count:
    /// a reply replacing the typing row keeps the row count unchanged.
    pub fn history_changed(&mut self, state: &ChatState) -> bool {
        let seen = (state.conversation().len(), state.is_pending());
        let changed = seen != self.last_seen;
        self.last_seen = seen;
        changed
    }
}

/// Render the whole chat window
pub fn render_chat_layout(
    ctx: &egui::Context,
    controller: &mut ChatController,
    config: &UiConfig,
    view: &mut ViewState,
) {
    render_menu_bar(ctx);

    egui::TopBottomPanel::top("chat_header").show(ctx, |ui| {
        ui.add_space(8.0);
        ui.vertical_centered(|ui| {
            ui.heading(egui::RichText::new(&config.title).size(22.0));
        });
        ui.add_space(8.0);
    });

    // Bottom panel goes before the central panel so it keeps its height
    egui::TopBottomPanel::bottom("chat_input").show(ctx, |ui| {
        ui.add_space(8.0);
        render_input_section(ui, controller);
        ui.add_space(8.0);
    });

    egui::CentralPanel::default().show(ctx, |ui| {
        render_history(ui, controller, config, view);
    });
}

/// Render the top menu bar
fn render_menu_bar(ctx: &egui::Context) {
    egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
        egui::menu::bar(ui, |ui| {
            ui.menu_button("File", |ui| {
                if ui.button("Quit").clicked() {
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            });

            ui.menu_button("View", |ui| {
                let mut dark_mode = ctx.style().visuals.dark_mode;
                if ui.checkbox(&mut dark_mode, "Dark Mode").changed() {
                    let visuals = if dark_mode {
                        egui::Visuals::dark()
                    } else {
                        egui::Visuals::light()
                    };
                    ctx.set_visuals(visuals);
                    ui.close_menu();
                }
            });
        });
    });
}

/// Render the conversation, then the typing row while a request is pending
fn render_history(
    ui: &mut egui::Ui,
    controller: &ChatController,
    config: &UiConfig,
    view: &mut ViewState,
) {
    let scroll_to_bottom = view.history_changed(controller.state());
    let items = controller.display_items();

    egui::ScrollArea::vertical()
        .id_source("chat_history_scroll")
        .auto_shrink([false; 2])
        .show(ui, |ui| {
            ui.add_space(8.0);
            for item in &items {
                match item {
                    DisplayItem::Message(message) => {
                        message_bubble(ui, message.role(), message.content());
                    }
                    DisplayItem::Typing => typing_bubble(ui, &config.assistant_name),
                }
                ui.add_space(6.0);
            }

            if scroll_to_bottom {
                ui.scroll_to_cursor(Some(egui::Align::BOTTOM));
            }
        });
}

/// Render the text input and send button; Enter or the button submits
fn render_input_section(ui: &mut egui::Ui, controller: &mut ChatController) {
    ui.horizontal(|ui| {
        ui.spacing_mut().button_padding = egui::vec2(12.0, 6.0);
        let button_width = 72.0;
        let input_width = (ui.available_width() - button_width).max(80.0);

        let response = ui.add(
            egui::TextEdit::singleline(controller.draft_mut())
                .hint_text(INPUT_HINT)
                .desired_width(input_width),
        );
        let enter_pressed =
            response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

        let clicked = send_button(ui).clicked();

        if enter_pressed || clicked {
            controller.submit();
            response.request_focus();
        }
    });
}
