//! Configuration types for the chat application.
//!
//! This module provides CLI argument parsing via `arrrg` and configuration
//! structures for controlling chat behavior.

use std::path::PathBuf;
use std::time::Duration;

use arrrg_derive::CommandLine;

use crate::error::{Error, Result};
use crate::types::AgentType;

/// Command-line arguments for the salesbot-chat tool.
#[derive(CommandLine, Debug, Default, PartialEq, Eq)]
pub struct ChatArgs {
    /// Backend base URL.
    #[arrrg(
        optional,
        "Backend base URL (default: $SALESBOT_BACKEND_URL or http://localhost:8001)",
        "URL"
    )]
    pub backend_url: Option<String>,

    /// Agent selected at startup.
    #[arrrg(optional, "Initial agent (default: manager)", "AGENT")]
    pub agent: Option<String>,

    /// Per-request timeout.
    #[arrrg(optional, "Request timeout in seconds (default: 60)", "SECONDS")]
    pub timeout_secs: Option<u64>,

    /// Directory charts are written to.
    #[arrrg(optional, "Write received charts into this directory", "DIR")]
    pub chart_dir: Option<String>,

    /// File backend events are appended to as JSON lines.
    #[arrrg(optional, "Append request/failure events to this file", "FILE")]
    pub log_file: Option<String>,

    /// Disable ANSI colors and styles.
    #[arrrg(flag, "Disable ANSI colors/styles")]
    pub no_color: bool,
}

/// Configuration for a chat session.
///
/// This struct holds the resolved configuration values after processing
/// command-line arguments with appropriate defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatConfig {
    /// Explicit backend URL; `None` defers to the environment, then the default.
    pub backend_url: Option<String>,

    /// Agent selected when the session starts.
    pub initial_agent: AgentType,

    /// Per-request timeout; `None` uses the client default.
    pub timeout: Option<Duration>,

    /// Directory received charts are saved to.
    pub chart_dir: Option<PathBuf>,

    /// JSON lines event log.
    pub log_file: Option<PathBuf>,

    /// Whether to use ANSI colors and styles in output.
    pub use_color: bool,
}

impl ChatConfig {
    /// Creates a new ChatConfig with default values.
    ///
    /// Defaults:
    /// - Backend: environment, then http://localhost:8001
    /// - Agent: manager
    /// - Color: enabled
    pub fn new() -> Self {
        Self {
            backend_url: None,
            initial_agent: AgentType::default(),
            timeout: None,
            chart_dir: None,
            log_file: None,
            use_color: true,
        }
    }

    /// Sets the backend URL.
    pub fn with_backend_url(mut self, url: String) -> Self {
        self.backend_url = Some(url);
        self
    }

    /// Sets the agent selected at startup.
    pub fn with_initial_agent(mut self, agent: AgentType) -> Self {
        self.initial_agent = agent;
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the chart output directory.
    pub fn with_chart_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.chart_dir = dir;
        self
    }

    /// Sets the event log file.
    pub fn with_log_file(mut self, path: Option<PathBuf>) -> Self {
        self.log_file = path;
        self
    }

    /// Disables ANSI color output.
    pub fn without_color(mut self) -> Self {
        self.use_color = false;
        self
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl TryFrom<ChatArgs> for ChatConfig {
    type Error = Error;

    fn try_from(args: ChatArgs) -> Result<Self> {
        let initial_agent = match args.agent {
            Some(agent) => agent
                .parse::<AgentType>()
                .map_err(|err| Error::validation(err.to_string(), Some("agent".to_string())))?,
            None => AgentType::default(),
        };
        if args.timeout_secs == Some(0) {
            return Err(Error::validation(
                "timeout must be at least one second",
                Some("timeout-secs".to_string()),
            ));
        }

        Ok(ChatConfig {
            backend_url: args.backend_url,
            initial_agent,
            timeout: args.timeout_secs.map(Duration::from_secs),
            chart_dir: args.chart_dir.map(PathBuf::from),
            log_file: args.log_file.map(PathBuf::from),
            use_color: !args.no_color,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = ChatConfig::new();
        assert!(config.backend_url.is_none());
        assert_eq!(config.initial_agent, AgentType::Manager);
        assert!(config.timeout.is_none());
        assert!(config.chart_dir.is_none());
        assert!(config.log_file.is_none());
        assert!(config.use_color);
    }

    #[test]
    fn config_from_args_defaults() {
        let config = ChatConfig::try_from(ChatArgs::default()).unwrap();
        assert_eq!(config, ChatConfig::new());
    }

    #[test]
    fn config_from_args_custom() {
        let args = ChatArgs {
            backend_url: Some("http://sales.internal:9000".to_string()),
            agent: Some("analytics".to_string()),
            timeout_secs: Some(15),
            chart_dir: Some("charts".to_string()),
            log_file: Some("events.jsonl".to_string()),
            no_color: true,
        };
        let config = ChatConfig::try_from(args).unwrap();
        assert_eq!(
            config.backend_url.as_deref(),
            Some("http://sales.internal:9000")
        );
        assert_eq!(config.initial_agent, AgentType::Analytics);
        assert_eq!(config.timeout, Some(Duration::from_secs(15)));
        assert_eq!(config.chart_dir, Some(PathBuf::from("charts")));
        assert_eq!(config.log_file, Some(PathBuf::from("events.jsonl")));
        assert!(!config.use_color);
    }

    #[test]
    fn config_from_args_rejects_unknown_agent() {
        let args = ChatArgs {
            agent: Some("janitor".to_string()),
            ..ChatArgs::default()
        };
        let err = ChatConfig::try_from(args).unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("janitor"));
    }

    #[test]
    fn config_from_args_rejects_zero_timeout() {
        let args = ChatArgs {
            timeout_secs: Some(0),
            ..ChatArgs::default()
        };
        assert!(ChatConfig::try_from(args).unwrap_err().is_validation());
    }

    #[test]
    fn config_builder_pattern() {
        let config = ChatConfig::new()
            .with_backend_url("https://example.com".to_string())
            .with_initial_agent(AgentType::Support)
            .with_timeout(Some(Duration::from_secs(5)))
            .with_chart_dir(Some(PathBuf::from("out")))
            .with_log_file(Some(PathBuf::from("log.jsonl")))
            .without_color();
        assert_eq!(config.backend_url.as_deref(), Some("https://example.com"));
        assert_eq!(config.initial_agent, AgentType::Support);
        assert_eq!(config.timeout, Some(Duration::from_secs(5)));
        assert_eq!(config.chart_dir, Some(PathBuf::from("out")));
        assert_eq!(config.log_file, Some(PathBuf::from("log.jsonl")));
        assert!(!config.use_color);
    }
}
