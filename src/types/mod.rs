// Public modules
pub mod agent_type;
pub mod charts;
pub mod chat;
pub mod message;
pub mod quick_action;
pub mod stats;

// Re-exports
pub use agent_type::{AgentLabel, AgentType, AgentTypeParseError};
pub use charts::{ChartImage, Charts, DecodedChart};
pub use chat::{ChatRequest, ChatResponse};
pub use message::{ERROR_REPLY, Message};
pub use quick_action::{QUICK_ACTIONS, QuickAction, quick_action};
pub use stats::{Collection, Stats};
