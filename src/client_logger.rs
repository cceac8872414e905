//! Logging trait for backend operations.
//!
//! This module provides the [`ClientLogger`] trait that allows users to capture every
//! request a [`ChatSession`](crate::chat::ChatSession) makes, including the failures the
//! conversation itself hides behind the fallback reply.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::Mutex;

use serde::Serialize;
use time::OffsetDateTime;

use crate::error::{Error, Result};
use crate::types::{ChatRequest, ChatResponse, Collection};

/// A trait for logging backend interactions.
///
/// # Example
///
/// ```rust,ignore
/// use salesbot::{ChatRequest, ChatResponse, ClientLogger, Collection, Error};
///
/// struct StderrLogger;
///
/// impl ClientLogger for StderrLogger {
///     fn log_chat_request(&self, request: &ChatRequest) {
///         eprintln!("-> {}", request.message);
///     }
///
///     fn log_chat_response(&self, response: &ChatResponse) {
///         eprintln!("<- {}", response.response);
///     }
///
///     fn log_chat_failure(&self, request: &ChatRequest, error: &Error) {
///         eprintln!("chat failed for {}: {error}", request.session_id);
///     }
///
///     fn log_stats_failure(&self, collection: Collection, error: &Error) {
///         eprintln!("stats for {collection} failed: {error}");
///     }
/// }
/// ```
pub trait ClientLogger: Send + Sync {
    /// Log a chat request just before it is sent.
    fn log_chat_request(&self, request: &ChatRequest);

    /// Log a successfully decoded chat response.
    fn log_chat_response(&self, response: &ChatResponse);

    /// Log a chat request that failed for any reason.
    fn log_chat_failure(&self, request: &ChatRequest, error: &Error);

    /// Log a stats endpoint that failed and was counted as empty.
    fn log_stats_failure(&self, collection: Collection, error: &Error);
}

#[derive(Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
enum LogEvent<'a> {
    ChatRequest {
        request: &'a ChatRequest,
    },
    ChatResponse {
        agent_type: String,
        response_chars: usize,
        charts: usize,
    },
    ChatFailure {
        session_id: &'a str,
        kind: &'static str,
        #[serde(skip_serializing_if = "Option::is_none")]
        status: Option<u16>,
        error: String,
    },
    StatsFailure {
        collection: Collection,
        kind: &'static str,
        #[serde(skip_serializing_if = "Option::is_none")]
        status: Option<u16>,
        error: String,
    },
}

#[derive(Serialize)]
struct LogRecord<'a> {
    #[serde(with = "time::serde::rfc3339")]
    at: OffsetDateTime,
    #[serde(flatten)]
    event: LogEvent<'a>,
}

/// Appends one JSON object per event to a file.
///
/// Write failures are dropped; logging never interferes with the conversation.
pub struct JsonLinesLogger {
    writer: Mutex<BufWriter<File>>,
}

impl JsonLinesLogger {
    /// Opens `path` for appending, creating it if needed.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path.as_ref())
            .map_err(|err| Error::io("failed to open log file", err))?;
        Ok(Self {
            writer: Mutex::new(BufWriter::new(file)),
        })
    }

    fn write(&self, event: LogEvent<'_>) {
        let record = LogRecord {
            at: OffsetDateTime::now_utc(),
            event,
        };
        let Ok(line) = serde_json::to_string(&record) else {
            return;
        };
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{line}");
            let _ = writer.flush();
        }
    }
}

impl ClientLogger for JsonLinesLogger {
    fn log_chat_request(&self, request: &ChatRequest) {
        self.write(LogEvent::ChatRequest { request });
    }

    fn log_chat_response(&self, response: &ChatResponse) {
        self.write(LogEvent::ChatResponse {
            agent_type: response.agent_type.to_string(),
            response_chars: response.response.chars().count(),
            charts: response.charts.as_ref().map_or(0, Vec::len),
        });
    }

    fn log_chat_failure(&self, request: &ChatRequest, error: &Error) {
        self.write(LogEvent::ChatFailure {
            session_id: &request.session_id,
            kind: error.kind(),
            status: error.status_code(),
            error: error.to_string(),
        });
    }

    fn log_stats_failure(&self, collection: Collection, error: &Error) {
        self.write(LogEvent::StatsFailure {
            collection,
            kind: error.kind(),
            status: error.status_code(),
            error: error.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AgentType;

    fn temp_log_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("salesbot-{}-{name}.jsonl", std::process::id()))
    }

    #[test]
    fn writes_one_line_per_event() {
        let path = temp_log_path("events");
        let _ = std::fs::remove_file(&path);
        let logger = JsonLinesLogger::open(&path).unwrap();
        let request = ChatRequest {
            message: "hello".to_string(),
            agent_type: AgentType::Sales,
            session_id: "s1".to_string(),
        };
        logger.log_chat_request(&request);
        logger.log_chat_failure(&request, &Error::connection("refused", None));
        logger.log_stats_failure(Collection::Leads, &Error::api(500, "boom"));
        drop(logger);

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<serde_json::Value> = contents
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0]["event"], "chat_request");
        assert_eq!(lines[0]["request"]["agent_type"], "sales");
        assert_eq!(lines[1]["event"], "chat_failure");
        assert_eq!(lines[1]["kind"], "connection");
        assert!(lines[1].get("status").is_none());
        assert_eq!(lines[2]["event"], "stats_failure");
        assert_eq!(lines[2]["collection"], "leads");
        assert_eq!(lines[2]["status"], 500);
        assert!(lines[2]["at"].is_string());
        let _ = std::fs::remove_file(&path);
    }
}
