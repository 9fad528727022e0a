//! Application shell
//!
//! Resolves the session identity, builds the chat controller and hosts it in
//! an eframe window.

use crate::chat::{ChatBackend, ChatController, HttpChatClient};
use crate::config::{Config, UiConfig};
use crate::session::{FileStore, SessionIdentityProvider};
use crate::ui::{render_chat_layout, ViewState};
use eframe::egui;
use std::sync::Arc;
use tokio::runtime::Handle;
use tracing::info;

/// Main application struct
/// Owns the chat controller and the view state of the window
pub struct ChatApp {
    controller: ChatController,
    ui_config: UiConfig,
    view: ViewState,
}

impl ChatApp {
    /// App around an existing controller
    pub fn new(controller: ChatController, ui_config: UiConfig) -> Self {
        Self {
            controller,
            ui_config,
            view: ViewState::default(),
        }
    }

    /// Build the app from configuration: resolve the session id from local
    /// storage and point the HTTP client at the configured base URL
    pub fn from_config(config: &Config, runtime: Handle) -> anyhow::Result<Self> {
        let store = Arc::new(FileStore::in_dir(&config.storage.data_dir));
        let provider = SessionIdentityProvider::new(store);
        let session_id = provider.get_or_create_session_id()?;
        info!(session_id = %session_id, "Session ready");

        let backend: Arc<dyn ChatBackend> = Arc::new(HttpChatClient::new(&config.api.base_url));
        let controller = ChatController::new(session_id, backend, runtime);
        Ok(Self::new(controller, config.ui.clone()))
    }

    /// Wake `ctx` whenever a request settles
    pub fn attach_repaint(mut self, ctx: &egui::Context) -> Self {
        let ctx = ctx.clone();
        self.controller = self
            .controller
            .with_notifier(Arc::new(move || ctx.request_repaint()));
        self
    }

    /// The hosted controller
    pub fn controller(&self) -> &ChatController {
        &self.controller
    }
}

impl eframe::App for ChatApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.controller.poll();
        render_chat_layout(ctx, &mut self.controller, &self.ui_config, &mut self.view);
    }
}
