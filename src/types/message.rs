use serde::Serialize;

use crate::types::{AgentLabel, AgentType, Charts};

/// Content of the message appended when a chat request fails for any reason.
pub const ERROR_REPLY: &str = "Sorry, I encountered an error. Please try again.";

/// One entry in the conversation log.
///
/// Messages are created once and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    /// Text as typed by the user or returned by the backend.
    pub content: String,

    /// True for messages the user sent.
    pub is_user: bool,

    /// The agent the message was sent to or answered by.
    #[serde(rename = "agent_type", skip_serializing_if = "Option::is_none")]
    pub agent: Option<AgentLabel>,

    /// Charts attached to a bot reply.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub charts: Option<Charts>,
}

impl Message {
    /// A message typed by the user and addressed to `agent`.
    pub fn user(content: impl Into<String>, agent: AgentType) -> Self {
        Self {
            content: content.into(),
            is_user: true,
            agent: Some(AgentLabel::Agent(agent)),
            charts: None,
        }
    }

    /// A reply from the backend.
    pub fn bot(content: impl Into<String>, agent: AgentLabel, charts: Option<Charts>) -> Self {
        Self {
            content: content.into(),
            is_user: false,
            agent: Some(agent),
            charts,
        }
    }

    /// The fixed fallback shown when a chat request fails.
    pub fn error_reply() -> Self {
        Self {
            content: ERROR_REPLY.to_string(),
            is_user: false,
            agent: Some(AgentLabel::Error),
            charts: None,
        }
    }

    /// Returns true for the synthetic error message.
    pub fn is_error(&self) -> bool {
        !self.is_user && self.agent.as_ref().is_some_and(AgentLabel::is_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_reply_is_exact() {
        let msg = Message::error_reply();
        assert_eq!(
            msg,
            Message {
                content: "Sorry, I encountered an error. Please try again.".to_string(),
                is_user: false,
                agent: Some(AgentLabel::Error),
                charts: None,
            }
        );
        assert!(msg.is_error());
    }

    #[test]
    fn user_message_carries_agent() {
        let msg = Message::user("hi", AgentType::Sales);
        assert!(msg.is_user);
        assert_eq!(msg.agent, Some(AgentLabel::Agent(AgentType::Sales)));
        assert!(!msg.is_error());
    }

    #[test]
    fn serialization_skips_absent_charts() {
        let msg = Message::bot("ok", AgentLabel::Agent(AgentType::Manager), None);
        let json = serde_json::to_string(&msg).unwrap();
        assert_eq!(
            json,
            r#"{"content":"ok","is_user":false,"agent_type":"manager"}"#
        );
    }
}
