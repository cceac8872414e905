//! Slash command parsing for the chat application.
//!
//! This module handles parsing of special commands that start with `/`,
//! allowing users to control the chat session without sending messages
//! to the backend.

use crate::types::{AgentType, QUICK_ACTIONS};

/// A parsed chat command.
///
/// These commands control the chat session and are not sent to the backend.
#[derive(Debug, Clone, PartialEq)]
pub enum ChatCommand {
    /// Select the agent new messages are routed to.
    Agent(AgentType),

    /// Show the agent selector.
    ListAgents,

    /// List the quick actions.
    ListQuickActions,

    /// Run the quick action with this 1-based number.
    QuickAction(usize),

    /// Refresh and show the stats panel.
    Stats,

    /// Show session id, backend and message count.
    Session,

    /// Re-render the conversation log.
    History,

    /// Display help information.
    Help,

    /// Exit the chat application.
    Quit,

    /// Report a parsing error back to the caller.
    Invalid(String),
}

/// Parses user input for slash commands.
///
/// Returns `Some(ChatCommand)` if the input is a valid command,
/// or `None` if it should be treated as a regular message.
///
/// # Examples
///
/// ```
/// # use salesbot::chat::parse_command;
/// assert!(parse_command("/quit").is_some());
/// assert!(parse_command("/agent analytics").is_some());
/// assert!(parse_command("How many leads do we have?").is_none());
/// ```
pub fn parse_command(input: &str) -> Option<ChatCommand> {
    let input = input.trim();

    if !input.starts_with('/') {
        return None;
    }

    let mut parts = input[1..].splitn(2, ' ');
    let command = parts.next()?.to_lowercase();
    let argument = parts.next().map(|s| s.trim()).filter(|s| !s.is_empty());

    let result = match command.as_str() {
        "agent" => match argument {
            Some(arg) => match arg.to_lowercase().parse::<AgentType>() {
                Ok(agent) => ChatCommand::Agent(agent),
                Err(err) => ChatCommand::Invalid(format!("{err} (see /agents)")),
            },
            None => ChatCommand::ListAgents,
        },
        "agents" => ChatCommand::ListAgents,
        "quick" => match argument {
            Some(arg) => match arg.parse::<usize>() {
                Ok(n) if (1..=QUICK_ACTIONS.len()).contains(&n) => ChatCommand::QuickAction(n),
                _ => ChatCommand::Invalid(format!(
                    "/quick expects a number from 1 to {}",
                    QUICK_ACTIONS.len()
                )),
            },
            None => ChatCommand::ListQuickActions,
        },
        "stats" => ChatCommand::Stats,
        "session" => ChatCommand::Session,
        "history" => ChatCommand::History,
        "help" | "?" => ChatCommand::Help,
        "quit" | "exit" | "q" => ChatCommand::Quit,
        _ => ChatCommand::Invalid(format!("Unknown command: /{}", command)),
    };

    Some(result)
}

/// Returns help text describing available commands.
pub fn help_text() -> &'static str {
    r#"Available commands:
  /agent <id>            Route messages to an agent (e.g., /agent analytics)
  /agents                Show the available agents
  /quick [n]             List quick actions, or run quick action n
  /stats                 Refresh and show system overview counts
  /session               Show session id and backend
  /history               Show the conversation so far
  /help                  Show this help message
  /quit                  Exit the chat

Press Enter to send, Shift+Enter or Alt+Enter for a new line."#
}
