//! Chat endpoint client
//!
//! One call: `POST <base>/chat` with `{question, user_id}`, expecting
//! `{answer}` back. The `ChatBackend` trait is the seam the controller
//! depends on, so tests can script replies without a server.

use crate::error::ChatError;
use crate::session::SessionId;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Request body sent to the chat endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    /// The user's message, exactly as typed
    pub question: String,
    /// Session identifier of this profile
    pub user_id: String,
}

/// Success body returned by the chat endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    /// Reply text to display
    pub answer: String,
}

/// Something that can answer a question for a session
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Send one question and return the answer text
    async fn ask(&self, question: &str, user_id: &SessionId) -> Result<String, ChatError>;
}

/// HTTP client for the chat endpoint
#[derive(Debug, Clone)]
pub struct HttpChatClient {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpChatClient {
    /// Client for the endpoint under `base_url`
    pub fn new(base_url: &str) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Client reusing an existing `reqwest::Client` (connection pooling)
    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            endpoint: format!("{}/chat", base_url.trim_end_matches('/')),
        }
    }

    /// Full URL requests are posted to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ChatBackend for HttpChatClient {
    async fn ask(&self, question: &str, user_id: &SessionId) -> Result<String, ChatError> {
        let body = ChatRequest {
            question: question.to_string(),
            user_id: user_id.to_string(),
        };

        tracing::debug!(
            url = %self.endpoint,
            user_id = %user_id,
            question_len = question.len(),
            "Sending chat request"
        );

        // `.json()` also sets `Content-Type: application/json`
        let response = self.client.post(&self.endpoint).json(&body).send().await?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error body".to_string());
            return Err(ChatError::Status {
                status: status.as_u16(),
                body: error_body,
            });
        }

        let response_body = response.text().await?;
        let parsed: ChatResponse = serde_json::from_str(&response_body).map_err(|e| {
            ChatError::Decode(format!("{} - Response body: {}", e, response_body))
        })?;

        tracing::debug!(
            answer_len = parsed.answer.len(),
            "Received chat response"
        );

        Ok(parsed.answer)
    }
}
