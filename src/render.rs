//! Output rendering for the chat application.
//!
//! This module provides a trait-based rendering abstraction that allows for different
//! output styles.  The default implementation writes plain text with optional ANSI
//! escape codes.

use std::io::{self, Stdout, Write};

use crate::types::{AgentLabel, AgentType, Collection, Message, QUICK_ACTIONS, Stats};

/// ANSI escape code for dim text (used for the busy indicator).
const ANSI_DIM: &str = "\x1b[2m";

/// ANSI escape code for bold text (used for agent headers).
const ANSI_BOLD: &str = "\x1b[1m";

/// ANSI escape code to reset all styling.
const ANSI_RESET: &str = "\x1b[0m";

/// ANSI escape code for blue text (used for user messages and salespersons).
const ANSI_BLUE: &str = "\x1b[34m";

/// ANSI escape code for cyan text (used for chart lines).
const ANSI_CYAN: &str = "\x1b[36m";

/// ANSI escape code for green text (used for dealers).
const ANSI_GREEN: &str = "\x1b[32m";

/// ANSI escape code for red text (used for errors).
const ANSI_RED: &str = "\x1b[31m";

/// ANSI escape code for magenta text (used for meetings).
const ANSI_MAGENTA: &str = "\x1b[35m";

/// ANSI escape code for yellow text (used for leads).
const ANSI_YELLOW: &str = "\x1b[33m";

/// Trait for rendering chat output.
pub trait Renderer: Send {
    /// Print one message of the conversation log.
    fn print_message(&mut self, message: &Message);

    /// Print the busy indicator shown while a request is outstanding.
    fn print_thinking(&mut self, agent: AgentType);

    /// Print the greeting shown while the conversation is empty.
    fn print_welcome(&mut self);

    /// Print the system overview counts.
    fn print_stats(&mut self, stats: &Stats);

    /// Print the agent selector with `selected` marked.
    fn print_agents(&mut self, selected: AgentType);

    /// Print the numbered quick actions.
    fn print_quick_actions(&mut self);

    /// Print an error message.
    fn print_error(&mut self, error: &str);

    /// Print an informational message.
    fn print_info(&mut self, info: &str);
}

/// Plain text renderer with optional ANSI styling.
pub struct PlainTextRenderer<W: Write + Send = Stdout> {
    out: W,
    use_color: bool,
}

impl PlainTextRenderer<Stdout> {
    /// Creates a new PlainTextRenderer on stdout with ANSI colors enabled.
    pub fn new() -> Self {
        Self::with_color(true)
    }

    /// Creates a new PlainTextRenderer on stdout with specified color setting.
    pub fn with_color(use_color: bool) -> Self {
        Self::with_writer(io::stdout(), use_color)
    }
}

impl Default for PlainTextRenderer<Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write + Send> PlainTextRenderer<W> {
    /// Creates a renderer writing to `out`.
    pub fn with_writer(out: W, use_color: bool) -> Self {
        Self { out, use_color }
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn style(&self, code: &'static str) -> &'static str {
        if self.use_color { code } else { "" }
    }

    fn reset(&self) -> &'static str {
        self.style(ANSI_RESET)
    }

    fn line(&mut self, text: &str) {
        let _ = writeln!(self.out, "{text}");
    }

    fn flush(&mut self) {
        let _ = self.out.flush();
    }
}

impl<W: Write + Send> Renderer for PlainTextRenderer<W> {
    fn print_message(&mut self, message: &Message) {
        if message.is_user {
            let line = format!("{}You:{} {}", self.style(ANSI_BLUE), self.reset(), message.content);
            self.line(&line);
            self.flush();
            return;
        }

        let header_color = match &message.agent {
            Some(AgentLabel::Error) => ANSI_RED,
            _ => ANSI_BOLD,
        };
        if let Some(agent) = &message.agent {
            let header = format!(
                "{}[{}]{}",
                self.style(header_color),
                agent.display_name(),
                self.reset()
            );
            self.line(&header);
        }
        self.line(&message.content);

        if let Some(charts) = &message.charts {
            for image in charts.images() {
                let detail = match image.decode() {
                    Ok(decoded) => format!(
                        "{}, {}",
                        decoded.media_type,
                        describe_size(decoded.data.len())
                    ),
                    Err(_) => "unavailable".to_string(),
                };
                let chart_line = format!(
                    "{}[{}: {}]{}",
                    self.style(ANSI_CYAN),
                    image.key,
                    detail,
                    self.reset()
                );
                self.line(&chart_line);
            }
        }
        self.line("");
        self.flush();
    }

    fn print_thinking(&mut self, agent: AgentType) {
        let line = format!(
            "{}{} is thinking...{}",
            self.style(ANSI_DIM),
            agent.label(),
            self.reset()
        );
        self.line(&line);
        self.flush();
    }

    fn print_welcome(&mut self) {
        self.line("Welcome to Sales Agent Chatbot");
        self.line(
            "Select an agent and start asking questions about your sales data, \
             performance metrics, or system features.",
        );
        self.flush();
    }

    fn print_stats(&mut self, stats: &Stats) {
        self.line("    System Overview:");
        for (collection, count) in stats.iter() {
            let color = match collection {
                Collection::Salespersons => ANSI_BLUE,
                Collection::Dealers => ANSI_GREEN,
                Collection::Meetings => ANSI_MAGENTA,
                Collection::Leads => ANSI_YELLOW,
            };
            let line = format!(
                "      {:<14}{}{}{}",
                collection.label(),
                self.style(color),
                count,
                self.reset()
            );
            self.line(&line);
        }
        self.flush();
    }

    fn print_agents(&mut self, selected: AgentType) {
        self.line("    Select AI Agent:");
        for agent in AgentType::ALL {
            let marker = if agent == selected { "*" } else { " " };
            let line = format!("    {marker} {:<22}{}", agent.as_str(), agent.label());
            self.line(&line);
        }
        self.flush();
    }

    fn print_quick_actions(&mut self) {
        self.line("    Quick Actions:");
        for (index, action) in QUICK_ACTIONS.iter().enumerate() {
            let line = format!(
                "      {}. {:<18}({}) {}",
                index + 1,
                action.label,
                action.agent,
                action.query
            );
            self.line(&line);
        }
        self.flush();
    }

    fn print_error(&mut self, error: &str) {
        let line = format!("{}Error: {error}{}", self.style(ANSI_RED), self.reset());
        self.line(&line);
        self.flush();
    }

    fn print_info(&mut self, info: &str) {
        self.line(info);
        self.flush();
    }
}

fn describe_size(bytes: usize) -> String {
    if bytes < 1024 {
        format!("{bytes} B")
    } else {
        format!("{:.1} KiB", bytes as f64 / 1024.0)
    }
}
