//! Chat exchange controller
//!
//! Owns the draft, the conversation and the pending flag. `submit()` echoes
//! the draft as a user message and dispatches one request on the tokio
//! runtime. Each request reports back over a channel; the owner applies the
//! results with `poll()` (every frame) or `settle_next()` (async callers), so
//! conversation state is only ever mutated by the controller's owner.
//!
//! Overlapping submissions are allowed and are not serialized: bot replies
//! land in completion order, not submission order.

use super::client::ChatBackend;
use super::models::{Conversation, Message};
use super::state::{ChatState, DisplayItem};
use crate::error::ChatError;
use crate::session::SessionId;
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::mpsc;

/// Bot reply appended when a request fails for any reason
pub const FETCH_ERROR_MESSAGE: &str = "Error: could not fetch response.";

/// Callback fired after a request settles, used to wake the renderer
pub type SettleNotifier = Arc<dyn Fn() + Send + Sync>;

/// Outcome of one dispatched request, waiting to be applied
#[derive(Debug)]
struct Settlement {
    exchange: u64,
    outcome: Result<String, ChatError>,
}

/// Drives message exchanges for one session
pub struct ChatController {
    state: ChatState,
    draft: String,
    session_id: SessionId,
    backend: Arc<dyn ChatBackend>,
    runtime: Handle,
    settled_tx: mpsc::UnboundedSender<Settlement>,
    settled_rx: mpsc::UnboundedReceiver<Settlement>,
    notifier: Option<SettleNotifier>,
    next_exchange: u64,
    in_flight: usize,
}

impl ChatController {
    /// Controller sending as `session_id` through `backend`, spawning
    /// requests on `runtime`
    pub fn new(session_id: SessionId, backend: Arc<dyn ChatBackend>, runtime: Handle) -> Self {
        let (settled_tx, settled_rx) = mpsc::unbounded_channel();
        Self {
            state: ChatState::new(),
            draft: String::new(),
            session_id,
            backend,
            runtime,
            settled_tx,
            settled_rx,
            notifier: None,
            next_exchange: 0,
            in_flight: 0,
        }
    }

    /// Call `notifier` from the request task after every settlement
    pub fn with_notifier(mut self, notifier: SettleNotifier) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Current unsent input
    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// Mutable access for text-edit widgets
    pub fn draft_mut(&mut self) -> &mut String {
        &mut self.draft
    }

    /// Replace the unsent input
    pub fn set_draft(&mut self, draft: impl Into<String>) {
        self.draft = draft.into();
    }

    /// Session identifier sent with every request
    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    /// Domain state (conversation and pending flag)
    pub fn state(&self) -> &ChatState {
        &self.state
    }

    /// The conversation so far
    pub fn conversation(&self) -> &Conversation {
        self.state.conversation()
    }

    /// Whether the typing indicator should show
    pub fn is_pending(&self) -> bool {
        self.state.is_pending()
    }

    /// Requests dispatched but not yet applied
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Rows to render
    pub fn display_items(&self) -> Vec<DisplayItem<'_>> {
        self.state.display_items()
    }

    /// Send the draft
    ///
    /// Returns `false` without touching any state when the draft is empty
    /// after trimming. Otherwise appends the user message, clears the
    /// draft, sets pending and dispatches the request.
    pub fn submit(&mut self) -> bool {
        if self.draft.trim().is_empty() {
            return false;
        }

        let question = std::mem::take(&mut self.draft);
        self.state.append(Message::user(question.clone()));
        self.state.set_pending(true);

        let exchange = self.next_exchange;
        self.next_exchange += 1;
        self.in_flight += 1;

        tracing::debug!(
            exchange = exchange,
            in_flight = self.in_flight,
            "Dispatching chat request"
        );

        let backend = Arc::clone(&self.backend);
        let session_id = self.session_id.clone();
        let settled_tx = self.settled_tx.clone();
        let notifier = self.notifier.clone();

        self.runtime.spawn(async move {
            // Run the request in its own task so a panic still settles.
            let request =
                tokio::spawn(async move { backend.ask(&question, &session_id).await });
            let outcome = match request.await {
                Ok(result) => result,
                Err(join_error) => Err(ChatError::Aborted(join_error.to_string())),
            };

            // Receiver only goes away with the controller; nothing to report to then.
            if settled_tx.send(Settlement { exchange, outcome }).is_ok() {
                if let Some(notify) = notifier {
                    notify();
                }
            }
        });

        true
    }

    /// Apply every settlement that has already arrived, without blocking
    ///
    /// Returns the number of settlements applied.
    pub fn poll(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(settlement) = self.settled_rx.try_recv() {
            self.apply(settlement);
            applied += 1;
        }
        applied
    }

    /// Wait for the next request to settle and apply it
    ///
    /// Returns `false` immediately when nothing is in flight.
    pub async fn settle_next(&mut self) -> bool {
        if self.in_flight == 0 {
            return false;
        }
        match self.settled_rx.recv().await {
            Some(settlement) => {
                self.apply(settlement);
                true
            }
            None => false,
        }
    }

    /// Wait until every dispatched request has been applied
    pub async fn settle_all(&mut self) {
        while self.settle_next().await {}
    }

    fn apply(&mut self, settlement: Settlement) {
        let reply = match settlement.outcome {
            Ok(answer) => {
                tracing::debug!(exchange = settlement.exchange, "Chat request settled");
                Message::bot(answer)
            }
            Err(e) => {
                tracing::error!(
                    exchange = settlement.exchange,
                    error = %e,
                    "Chat request failed"
                );
                Message::bot(FETCH_ERROR_MESSAGE)
            }
        };

        tracing::debug!(
            exchange = settlement.exchange,
            role = reply.role().as_str(),
            reply_len = reply.content().len(),
            "Appending reply"
        );
        self.state.append(reply);
        // Any settlement clears the flag, even with other requests in flight.
        self.state.set_pending(false);
        self.in_flight = self.in_flight.saturating_sub(1);
    }
}
