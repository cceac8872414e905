use serde::{Deserialize, Serialize};

use crate::types::{AgentLabel, AgentType, Charts};

/// Body of `POST /api/chat`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    /// The user's message, exactly as typed.
    pub message: String,

    /// Agent the message is routed to.
    pub agent_type: AgentType,

    /// Token correlating consecutive requests of one session.
    pub session_id: String,
}

/// Body returned by `POST /api/chat`.
///
/// `response` and `agent_type` are required; a body missing either fails to decode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    /// Reply text.
    pub response: String,

    /// Agent that actually answered.  This may differ from the requested agent when the
    /// manager routes the query.
    pub agent_type: AgentLabel,

    /// Chart images, normally `data:image/png;base64,...` strings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub charts: Option<Vec<String>>,

    /// Session the backend filed the exchange under.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,

    /// Raw rows behind the charts, if the backend included them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl ChatResponse {
    /// Creates a plain text response with no charts.
    pub fn new(response: impl Into<String>, agent_type: impl Into<AgentLabel>) -> Self {
        Self {
            response: response.into(),
            agent_type: agent_type.into(),
            charts: None,
            session_id: None,
            data: None,
        }
    }

    /// Attaches chart payloads.
    pub fn with_charts(mut self, charts: Vec<String>) -> Self {
        self.charts = Some(charts);
        self
    }

    /// The chart payloads keyed as the conversation log stores them.
    pub fn keyed_charts(&self) -> Option<Charts> {
        self.charts
            .as_ref()
            .and_then(|charts| Charts::from_payloads(charts.iter().cloned()))
    }
}
