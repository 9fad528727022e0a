//! Application configuration
//!
//! Read once at start-up from environment variables, with defaults that
//! match a locally running chat backend.

use std::env;
use std::path::PathBuf;

/// Default base URL of the chat backend
pub const DEFAULT_API_URL: &str = "http://localhost:8000";
/// Default window and header title
pub const DEFAULT_TITLE: &str = "Mexican revolution chat";
/// Default assistant name shown in the typing indicator
pub const DEFAULT_ASSISTANT_NAME: &str = "AV";

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Chat endpoint configuration
    pub api: ApiConfig,
    /// Local storage configuration
    pub storage: StorageConfig,
    /// Presentation settings
    pub ui: UiConfig,
}

/// Chat endpoint configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL; requests go to `<base_url>/chat`
    pub base_url: String,
}

/// Local storage configuration
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Directory holding the local key-value file
    pub data_dir: PathBuf,
}

/// Presentation settings
#[derive(Debug, Clone)]
pub struct UiConfig {
    /// Window and header title
    pub title: String,
    /// Name used in the "is typing..." indicator
    pub assistant_name: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            assistant_name: DEFAULT_ASSISTANT_NAME.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables with defaults
    pub fn from_env() -> Self {
        Self {
            api: ApiConfig {
                base_url: env::var("CHAT_API_URL")
                    .ok()
                    .filter(|url| !url.trim().is_empty())
                    .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            },
            storage: StorageConfig {
                data_dir: env::var_os("DATA_DIR")
                    .map(PathBuf::from)
                    .unwrap_or_else(default_data_dir),
            },
            ui: UiConfig {
                title: env::var("CHAT_TITLE").unwrap_or_else(|_| DEFAULT_TITLE.to_string()),
                assistant_name: env::var("ASSISTANT_NAME")
                    .unwrap_or_else(|_| DEFAULT_ASSISTANT_NAME.to_string()),
            },
        }
    }

    /// Endpoint the chat client posts to
    pub fn chat_url(&self) -> String {
        format!("{}/chat", self.api.base_url.trim_end_matches('/'))
    }
}

/// `~/.revolution-chat`, or a relative directory when `HOME` is unset
fn default_data_dir() -> PathBuf {
    if let Some(home) = env::var_os("HOME") {
        let mut path = PathBuf::from(home);
        path.push(".revolution-chat");
        path
    } else {
        PathBuf::from(".revolution-chat")
    }
}
