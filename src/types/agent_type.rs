use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// The backend agents a message can be routed to.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentType {
    /// Routes the query to whichever specialist fits best.
    #[default]
    Manager,

    /// Salesperson and team performance.
    Sales,

    /// Revenue analytics, usually with charts.
    Analytics,

    /// Help with the system itself.
    Support,

    /// Lead scoring and qualification.
    LeadQualification,

    /// Dealer and customer relationships.
    CustomerManagement,
}

impl AgentType {
    /// Every agent, in the order the selector shows them.
    pub const ALL: [AgentType; 6] = [
        AgentType::Manager,
        AgentType::Sales,
        AgentType::Analytics,
        AgentType::Support,
        AgentType::LeadQualification,
        AgentType::CustomerManagement,
    ];

    /// The wire identifier for this agent.
    pub fn as_str(&self) -> &'static str {
        match self {
            AgentType::Manager => "manager",
            AgentType::Sales => "sales",
            AgentType::Analytics => "analytics",
            AgentType::Support => "support",
            AgentType::LeadQualification => "lead_qualification",
            AgentType::CustomerManagement => "customer_management",
        }
    }

    /// Human-readable label, e.g. "Lead Qualification Agent".
    pub fn label(&self) -> &'static str {
        match self {
            AgentType::Manager => "Manager Agent",
            AgentType::Sales => "Sales Agent",
            AgentType::Analytics => "Analytics Agent",
            AgentType::Support => "Support Agent",
            AgentType::LeadQualification => "Lead Qualification Agent",
            AgentType::CustomerManagement => "Customer Management Agent",
        }
    }
}

impl fmt::Display for AgentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error returned when parsing an unknown agent identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentTypeParseError {
    /// The identifier that did not match any agent.
    pub invalid_value: String,
}

impl fmt::Display for AgentTypeParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown agent: {}", self.invalid_value)
    }
}

impl std::error::Error for AgentTypeParseError {}

impl FromStr for AgentType {
    type Err = AgentTypeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AgentType::ALL
            .into_iter()
            .find(|agent| agent.as_str() == s)
            .ok_or_else(|| AgentTypeParseError {
                invalid_value: s.to_string(),
            })
    }
}

/// Who a message is attributed to.
///
/// The backend reports agent types as free-form strings.  Known identifiers map to
/// [`AgentType`]; anything else is kept verbatim so that a new backend agent is still
/// displayed rather than treated as a failed response.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AgentLabel {
    /// One of the known agents.
    Agent(AgentType),
    /// The synthetic label attached to the fallback error message.
    Error,
    /// An agent identifier this client does not know about.
    Unknown(String),
}

impl AgentLabel {
    /// Returns the known agent, if any.
    pub fn agent(&self) -> Option<AgentType> {
        match self {
            AgentLabel::Agent(agent) => Some(*agent),
            _ => None,
        }
    }

    /// Returns true for the synthetic error label.
    pub fn is_error(&self) -> bool {
        matches!(self, AgentLabel::Error)
    }

    /// Header shown above a bot message.
    pub fn display_name(&self) -> String {
        match self {
            AgentLabel::Agent(agent) => agent.label().to_string(),
            AgentLabel::Error => "Error".to_string(),
            AgentLabel::Unknown(other) => format!("{} Agent", other.replace('_', " ")),
        }
    }
}

impl From<AgentType> for AgentLabel {
    fn from(agent: AgentType) -> Self {
        AgentLabel::Agent(agent)
    }
}

impl From<&str> for AgentLabel {
    fn from(s: &str) -> Self {
        match s {
            "error" => AgentLabel::Error,
            other => match other.parse::<AgentType>() {
                Ok(agent) => AgentLabel::Agent(agent),
                Err(_) => AgentLabel::Unknown(other.to_string()),
            },
        }
    }
}

impl fmt::Display for AgentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AgentLabel::Agent(agent) => write!(f, "{agent}"),
            AgentLabel::Error => write!(f, "error"),
            AgentLabel::Unknown(other) => write!(f, "{other}"),
        }
    }
}

impl Serialize for AgentLabel {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for AgentLabel {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(AgentLabel::from(s.as_str()))
    }
}
