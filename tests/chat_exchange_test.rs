//! Integration tests for the chat exchange flow
//!
//! These tests drive `ChatController` headlessly:
//! 1. Against a mocked HTTP endpoint (success, failure statuses, bad bodies)
//! 2. Against an unreachable endpoint
//! 3. Against a scripted backend to control completion order

use async_trait::async_trait;
use mockito::{Matcher, Server};
use revolution_chat::chat::{
    ChatBackend, ChatController, DisplayItem, HttpChatClient, MessageRole, FETCH_ERROR_MESSAGE,
};
use revolution_chat::error::ChatError;
use revolution_chat::session::SessionId;
use serde_json::json;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::runtime::Handle;
use tokio::sync::oneshot;

fn http_controller(base_url: &str) -> ChatController {
    ChatController::new(
        SessionId::new("abc-123"),
        Arc::new(HttpChatClient::new(base_url)),
        Handle::current(),
    )
}

fn contents(controller: &ChatController) -> Vec<(MessageRole, String)> {
    controller
        .conversation()
        .messages()
        .iter()
        .map(|m| (m.role(), m.content().to_string()))
        .collect()
}

/// Scenario C: successful answer is appended after the user message
#[tokio::test]
async fn test_successful_exchange() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/chat")
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(json!({
            "question": "Who was Zapata?",
            "user_id": "abc-123"
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"answer": "A leader of the southern peasant movement."}"#)
        .create_async()
        .await;

    let mut controller = http_controller(&server.url());
    controller.set_draft("Who was Zapata?");
    assert!(controller.submit());
    assert!(controller.is_pending());

    assert!(controller.settle_next().await);
    mock.assert_async().await;

    assert!(!controller.is_pending());
    assert_eq!(
        contents(&controller),
        vec![
            (MessageRole::User, "Who was Zapata?".to_string()),
            (
                MessageRole::Bot,
                "A leader of the southern peasant movement.".to_string()
            ),
        ]
    );
}

/// Scenario D: connection refused yields the fixed error reply
#[tokio::test]
async fn test_unreachable_endpoint_yields_error_reply() {
    // Nothing listens on port 1
    let mut controller = http_controller("http://127.0.0.1:1");
    controller.set_draft("hello");
    assert!(controller.submit());

    assert!(controller.settle_next().await);

    assert!(!controller.is_pending());
    assert_eq!(
        contents(&controller),
        vec![
            (MessageRole::User, "hello".to_string()),
            (MessageRole::Bot, FETCH_ERROR_MESSAGE.to_string()),
        ]
    );
    assert_eq!(
        controller.conversation().last().unwrap().content(),
        "Error: could not fetch response."
    );
}

#[tokio::test]
async fn test_error_status_and_bad_bodies_yield_one_error_reply_each() {
    let mut server = Server::new_async().await;
    let _server_error = server
        .mock("POST", "/chat")
        .match_body(Matcher::PartialJson(json!({"question": "status"})))
        .with_status(503)
        .with_body("unavailable")
        .create_async()
        .await;
    let _not_json = server
        .mock("POST", "/chat")
        .match_body(Matcher::PartialJson(json!({"question": "garbage"})))
        .with_status(200)
        .with_body("<html>oops</html>")
        .create_async()
        .await;
    let _wrong_shape = server
        .mock("POST", "/chat")
        .match_body(Matcher::PartialJson(json!({"question": "shape"})))
        .with_status(200)
        .with_body(r#"{"text": "no answer field"}"#)
        .create_async()
        .await;

    let mut controller = http_controller(&server.url());
    for question in ["status", "garbage", "shape"] {
        controller.set_draft(question);
        assert!(controller.submit());
        assert!(controller.settle_next().await);
        assert!(!controller.is_pending());
        assert_eq!(
            controller.conversation().last().unwrap().content(),
            FETCH_ERROR_MESSAGE
        );
    }

    let conversation = controller.conversation();
    assert_eq!(conversation.len(), 6);
    assert_eq!(conversation.by_role(MessageRole::User).count(), 3);
    assert_eq!(conversation.by_role(MessageRole::Bot).count(), 3);
}

#[tokio::test]
async fn test_blank_submission_sends_nothing() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/chat")
        .expect(0)
        .create_async()
        .await;

    let mut controller = http_controller(&server.url());
    controller.set_draft("   ");
    assert!(!controller.submit());

    assert!(controller.conversation().is_empty());
    assert!(!controller.is_pending());
    assert!(!controller.settle_next().await);
    mock.assert_async().await;
}

/// Backend whose replies are released by the test, one question at a time
#[derive(Default)]
struct GatedBackend {
    gates: Mutex<HashMap<String, oneshot::Receiver<String>>>,
}

impl GatedBackend {
    fn gate(&self, question: &str) -> oneshot::Sender<String> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().unwrap().insert(question.to_string(), rx);
        tx
    }
}

#[async_trait]
impl ChatBackend for GatedBackend {
    async fn ask(&self, question: &str, _user_id: &SessionId) -> Result<String, ChatError> {
        let gate = self.gates.lock().unwrap().remove(question);
        match gate {
            Some(rx) => rx
                .await
                .map_err(|e| ChatError::Aborted(e.to_string())),
            None => Err(ChatError::Aborted(format!("no gate for {}", question))),
        }
    }
}

/// Scenario E: replies are appended in completion order
#[tokio::test]
async fn test_overlapping_submissions_settle_in_completion_order() {
    let backend = Arc::new(GatedBackend::default());
    let release_first = backend.gate("primera");
    let release_second = backend.gate("segunda");

    let mut controller =
        ChatController::new(SessionId::new("abc-123"), backend.clone(), Handle::current());

    controller.set_draft("primera");
    assert!(controller.submit());
    controller.set_draft("segunda");
    assert!(controller.submit());

    assert_eq!(controller.in_flight(), 2);
    assert!(controller.is_pending());
    assert_eq!(controller.display_items().last(), Some(&DisplayItem::Typing));

    release_second.send("respuesta dos".to_string()).unwrap();
    assert!(controller.settle_next().await);

    // One settlement clears the flag even though another is still in flight
    assert!(!controller.is_pending());
    assert_eq!(controller.in_flight(), 1);
    assert!(!controller.display_items().contains(&DisplayItem::Typing));

    release_first.send("respuesta uno".to_string()).unwrap();
    assert!(controller.settle_next().await);
    assert_eq!(controller.in_flight(), 0);

    assert_eq!(
        contents(&controller),
        vec![
            (MessageRole::User, "primera".to_string()),
            (MessageRole::User, "segunda".to_string()),
            (MessageRole::Bot, "respuesta dos".to_string()),
            (MessageRole::Bot, "respuesta uno".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_failed_and_successful_overlap_each_get_one_reply() {
    let backend = Arc::new(GatedBackend::default());
    let release_ok = backend.gate("ok");
    let release_dropped = backend.gate("dropped");

    let mut controller =
        ChatController::new(SessionId::new("abc-123"), backend.clone(), Handle::current());

    controller.set_draft("dropped");
    controller.submit();
    controller.set_draft("ok");
    controller.submit();

    // Dropping the sender makes that request fail
    drop(release_dropped);
    release_ok.send("bien".to_string()).unwrap();
    controller.settle_all().await;

    let bots: Vec<_> = controller
        .conversation()
        .by_role(MessageRole::Bot)
        .map(|m| m.content().to_string())
        .collect();
    assert_eq!(bots.len(), 2);
    assert!(bots.contains(&"bien".to_string()));
    assert!(bots.contains(&FETCH_ERROR_MESSAGE.to_string()));
    assert!(!controller.is_pending());
}
