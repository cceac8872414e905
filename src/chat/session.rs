//! Core chat session management.
//!
//! This module provides the `ChatSession` struct which owns the conversation state,
//! performs the backend calls the reducer asks for, and keeps the aggregate stats.

use std::sync::Arc;
use std::time::Instant;

use tokio::sync::watch;

use crate::chat::state::{Action, ConversationState, Phase};
use crate::client::ChatBackend;
use crate::client_logger::ClientLogger;
use crate::observability::{
    CHAT_CHARTS, CHAT_DURATION, CHAT_FAILURES, CHAT_REQUESTS, CHAT_SKIPPED, STATS_DURATION,
    STATS_FAILURES, STATS_REQUESTS,
};
use crate::types::{AgentType, ChatRequest, Collection, Message, Stats};

/// What a call to [`ChatSession::send_message`] did.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    /// Input was blank or a request was already in flight; nothing was appended.
    Skipped,
    /// The backend replied; a user message and a bot message were appended.
    Replied,
    /// The request failed; a user message and the fallback error message were appended.
    Failed,
}

/// A chat session against one backend.
///
/// The session id is generated once when the session is created and sent with every
/// request so the backend can correlate them.
pub struct ChatSession<B: ChatBackend> {
    backend: B,
    state: ConversationState,
    stats: Stats,
    phase_tx: watch::Sender<Phase>,
    logger: Option<Arc<dyn ClientLogger>>,
}

impl<B: ChatBackend> ChatSession<B> {
    /// Creates a session with a fresh random session id.
    pub fn new(backend: B) -> Self {
        Self::with_session_id(backend, generate_session_id())
    }

    /// Creates a session with a caller-chosen session id.
    pub fn with_session_id(backend: B, session_id: impl Into<String>) -> Self {
        let (phase_tx, _) = watch::channel(Phase::Idle);
        Self {
            backend,
            state: ConversationState::new(session_id),
            stats: Stats::default(),
            phase_tx,
            logger: None,
        }
    }

    /// Routes backend events to `logger`.
    pub fn with_logger(mut self, logger: Arc<dyn ClientLogger>) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Replaces the pending input.  Ignored while a request is in flight.
    pub fn set_input(&mut self, text: impl Into<String>) {
        self.dispatch(Action::EditInput(text.into()));
    }

    /// Changes the agent new messages are routed to.
    pub fn select_agent(&mut self, agent: AgentType) {
        self.dispatch(Action::SelectAgent(agent));
    }

    /// Sends the pending input.
    ///
    /// Appends the user message immediately, performs exactly one backend call, and
    /// appends exactly one reply: the backend's answer, or the fixed error message if the
    /// call failed in any way.  Failures are never returned to the caller.
    pub async fn send_message(&mut self) -> SendOutcome {
        let Some(request) = self.dispatch(Action::Submit) else {
            CHAT_SKIPPED.click();
            return SendOutcome::Skipped;
        };
        CHAT_REQUESTS.click();
        if let Some(logger) = &self.logger {
            logger.log_chat_request(&request);
        }

        let start = Instant::now();
        let result = self.backend.chat(&request).await;
        CHAT_DURATION.add(start.elapsed().as_secs_f64());

        match result {
            Ok(response) => {
                if let Some(logger) = &self.logger {
                    logger.log_chat_response(&response);
                }
                if let Some(charts) = &response.charts {
                    CHAT_CHARTS.count(charts.len() as u64);
                }
                self.dispatch(Action::ResponseReceived(response));
                SendOutcome::Replied
            }
            Err(err) => {
                CHAT_FAILURES.click();
                if let Some(logger) = &self.logger {
                    logger.log_chat_failure(&request, &err);
                }
                self.dispatch(Action::ResponseFailed);
                SendOutcome::Failed
            }
        }
    }

    /// Selects `agent`, fills the input with `query`, and sends it on the next scheduler
    /// turn.
    pub async fn quick_action(&mut self, query: &str, agent: AgentType) -> SendOutcome {
        self.select_agent(agent);
        self.set_input(query);
        tokio::task::yield_now().await;
        self.send_message().await
    }

    /// Fetches the four collections concurrently and replaces the stats in one update.
    ///
    /// A collection whose request fails counts as empty; the others are unaffected.
    pub async fn refresh_stats(&mut self) -> Stats {
        let start = Instant::now();
        let (salespersons, dealers, meetings, leads) = futures::join!(
            self.count(Collection::Salespersons),
            self.count(Collection::Dealers),
            self.count(Collection::Meetings),
            self.count(Collection::Leads),
        );
        STATS_DURATION.add(start.elapsed().as_secs_f64());
        self.stats = Stats {
            salespersons,
            dealers,
            meetings,
            leads,
        };
        self.stats
    }

    async fn count(&self, collection: Collection) -> usize {
        STATS_REQUESTS.click();
        match self.backend.collection(collection).await {
            Ok(items) => items.len(),
            Err(err) => {
                STATS_FAILURES.click();
                if let Some(logger) = &self.logger {
                    logger.log_stats_failure(collection, &err);
                }
                0
            }
        }
    }

    fn dispatch(&mut self, action: Action) -> Option<ChatRequest> {
        let request = self.state.apply(action);
        self.phase_tx.send_replace(self.state.phase());
        request
    }

    /// Watches the busy phase.  The receiver sees `AwaitingResponse` exactly while a
    /// request is outstanding.
    pub fn subscribe_phase(&self) -> watch::Receiver<Phase> {
        self.phase_tx.subscribe()
    }

    /// True while a request is outstanding.
    pub fn is_busy(&self) -> bool {
        self.state.is_busy()
    }

    /// The conversation log, oldest first.
    pub fn messages(&self) -> &[Message] {
        self.state.messages()
    }

    /// Returns the number of messages in the conversation.
    pub fn message_count(&self) -> usize {
        self.state.messages().len()
    }

    /// The pending input.
    pub fn input(&self) -> &str {
        self.state.input()
    }

    /// The currently selected agent.
    pub fn selected_agent(&self) -> AgentType {
        self.state.selected_agent()
    }

    /// The session id sent with every request.
    pub fn session_id(&self) -> &str {
        self.state.session_id()
    }

    /// The stats from the most recent refresh.
    pub fn stats(&self) -> Stats {
        self.stats
    }

    /// The backend this session talks to.
    pub fn backend(&self) -> &B {
        &self.backend
    }
}

fn generate_session_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}
