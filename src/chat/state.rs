//! The conversation as a reducer over one state struct.
//!
//! Every change to the conversation goes through [`ConversationState::apply`].  The
//! reducer never performs I/O; a successful submit returns the [`ChatRequest`] the caller
//! must send, and the caller reports the outcome back as another action.

use crate::types::{AgentType, ChatRequest, ChatResponse, Message};

/// Whether a chat request is outstanding.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum Phase {
    /// No request in flight; input accepted.
    #[default]
    Idle,
    /// One request in flight; input and submit are disabled.
    AwaitingResponse,
}

/// Inputs to the reducer.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Replace the input text.
    EditInput(String),
    /// Change the selected agent.
    SelectAgent(AgentType),
    /// Send the current input.
    Submit,
    /// The outstanding request completed.
    ResponseReceived(ChatResponse),
    /// The outstanding request failed.
    ResponseFailed,
}

/// State owned by the conversation view.
#[derive(Debug, Clone)]
pub struct ConversationState {
    session_id: String,
    messages: Vec<Message>,
    input: String,
    selected_agent: AgentType,
    phase: Phase,
}

impl ConversationState {
    /// Creates an empty conversation for `session_id` with the manager agent selected.
    pub fn new(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            messages: Vec::new(),
            input: String::new(),
            selected_agent: AgentType::default(),
            phase: Phase::Idle,
        }
    }

    /// Applies one action.
    ///
    /// Returns the request to send when the action is an accepted [`Action::Submit`].
    pub fn apply(&mut self, action: Action) -> Option<ChatRequest> {
        match action {
            Action::EditInput(text) => {
                if !self.is_busy() {
                    self.input = text;
                }
                None
            }
            Action::SelectAgent(agent) => {
                self.selected_agent = agent;
                None
            }
            Action::Submit => self.submit(),
            Action::ResponseReceived(response) => {
                if self.is_busy() {
                    let charts = response.keyed_charts();
                    self.messages.push(Message::bot(
                        response.response,
                        response.agent_type,
                        charts,
                    ));
                    self.input.clear();
                    self.phase = Phase::Idle;
                }
                None
            }
            Action::ResponseFailed => {
                if self.is_busy() {
                    self.messages.push(Message::error_reply());
                    self.phase = Phase::Idle;
                }
                None
            }
        }
    }

    fn submit(&mut self) -> Option<ChatRequest> {
        if !self.can_submit() {
            return None;
        }
        self.messages
            .push(Message::user(self.input.clone(), self.selected_agent));
        self.phase = Phase::AwaitingResponse;
        Some(ChatRequest {
            message: self.input.clone(),
            agent_type: self.selected_agent,
            session_id: self.session_id.clone(),
        })
    }

    /// True when a submit would be accepted.
    pub fn can_submit(&self) -> bool {
        !self.is_busy() && !self.input.trim().is_empty()
    }

    /// True while a request is outstanding.
    pub fn is_busy(&self) -> bool {
        self.phase == Phase::AwaitingResponse
    }

    /// The current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The session token sent with every request.
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// The conversation log, oldest first.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// The pending input text.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// The agent new messages are routed to.
    pub fn selected_agent(&self) -> AgentType {
        self.selected_agent
    }
}
