//! Chat application module for conversations with the sales agent backend.
//!
//! This module provides a REPL chat interface built on top of the salesbot client. It
//! supports:
//!
//! - Routing messages to one of six backend agents
//! - Rendering chart images attached to replies, optionally saving them to disk
//! - A system overview of salespersons, dealers, meetings and leads
//! - Slash commands and canned quick actions
//!
//! # Architecture
//!
//! The module is organized into several components:
//!
//! - [`config`]: CLI argument parsing and configuration
//! - [`state`]: The conversation reducer; no I/O
//! - [`session`]: Drives the reducer against a backend
//! - [`commands`]: Slash command parsing and handling
//! - [`input`]: Enter/newline key bindings

mod commands;
mod config;
mod export;
mod input;
mod session;
mod state;

pub use crate::render::{PlainTextRenderer, Renderer};
pub use commands::{ChatCommand, help_text, parse_command};
pub use config::{ChatArgs, ChatConfig};
pub use export::export_charts;
pub use input::{EnterAction, bind_enter_keys, classify_enter};
pub use session::{ChatSession, SendOutcome};
pub use state::{Action, ConversationState, Phase};
