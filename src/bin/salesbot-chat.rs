//! Interactive chat application for the sales agent backend.
//!
//! This binary provides a REPL interface for routing questions to the backend's agents
//! and displaying their replies, including any charts they attach.
//!
//! # Usage
//!
//! ```bash
//! # Talk to the backend at $SALESBOT_BACKEND_URL or http://localhost:8001
//! salesbot-chat
//!
//! # Point at another backend and start with the analytics agent
//! salesbot-chat --backend-url http://sales.internal:8001 --agent analytics
//!
//! # Save received charts and log backend events
//! salesbot-chat --chart-dir charts --log-file salesbot.jsonl
//! ```
//!
//! # Commands
//!
//! While chatting, you can use slash commands:
//! - `/help` - Show available commands
//! - `/agent <id>` - Route messages to another agent
//! - `/quick [n]` - List or run quick actions
//! - `/stats` - Refresh the system overview
//! - `/quit` - Exit the application

use std::path::Path;
use std::sync::Arc;

use arrrg::CommandLine;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use salesbot::chat::{
    ChatArgs, ChatCommand, ChatConfig, ChatSession, PlainTextRenderer, Renderer, SendOutcome,
    bind_enter_keys, export_charts, help_text, parse_command,
};
use salesbot::{Backend, JsonLinesLogger, quick_action};

/// Main entry point for the salesbot-chat application.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (args, _) = ChatArgs::from_command_line_relaxed("salesbot-chat [OPTIONS]");
    let config = ChatConfig::try_from(args)?;

    let backend = Backend::with_options(config.backend_url.clone(), config.timeout)?;
    let backend_url = backend.base_url().to_string();
    let mut session = ChatSession::new(backend);
    if let Some(path) = &config.log_file {
        session = session.with_logger(Arc::new(JsonLinesLogger::open(path)?));
    }
    session.select_agent(config.initial_agent);

    let mut renderer = PlainTextRenderer::with_color(config.use_color);
    let mut rl = DefaultEditor::new()?;
    bind_enter_keys(&mut rl);

    println!("Sales Agent Chatbot (session: {})", session.session_id());
    println!("Backend: {backend_url}");
    let stats = session.refresh_stats().await;
    renderer.print_stats(&stats);
    println!();
    renderer.print_welcome();
    println!("Type /help for commands, /quit to exit\n");

    loop {
        let prompt = format!("You ({}): ", session.selected_agent());
        let readline = rl.readline(&prompt);

        match readline {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }

                let _ = rl.add_history_entry(line.as_str());

                // Check for slash commands
                if let Some(cmd) = parse_command(&line) {
                    match cmd {
                        ChatCommand::Quit => {
                            println!("Goodbye!");
                            break;
                        }
                        ChatCommand::Help => {
                            for line in help_text().lines() {
                                println!("    {}", line);
                            }
                        }
                        ChatCommand::Agent(agent) => {
                            session.select_agent(agent);
                            renderer.print_info(&format!("Now talking to the {}.", agent.label()));
                        }
                        ChatCommand::ListAgents => {
                            renderer.print_agents(session.selected_agent());
                        }
                        ChatCommand::ListQuickActions => {
                            renderer.print_quick_actions();
                        }
                        ChatCommand::QuickAction(number) => {
                            let Some(action) = quick_action(number) else {
                                renderer.print_error(&format!("No quick action {number}"));
                                continue;
                            };
                            println!("You ({}): {}", action.agent, action.query);
                            renderer.print_thinking(action.agent);
                            let outcome = session.quick_action(action.query, action.agent).await;
                            print_reply(&session, &mut renderer, outcome, config.chart_dir.as_deref());
                        }
                        ChatCommand::Stats => {
                            let stats = session.refresh_stats().await;
                            renderer.print_stats(&stats);
                        }
                        ChatCommand::Session => {
                            println!("    Session: {}", session.session_id());
                            println!("    Backend: {backend_url}");
                            println!("    Agent: {}", session.selected_agent().label());
                            println!("    Messages: {}", session.message_count());
                        }
                        ChatCommand::History => {
                            if session.messages().is_empty() {
                                renderer.print_welcome();
                            }
                            for message in session.messages() {
                                renderer.print_message(message);
                            }
                        }
                        ChatCommand::Invalid(message) => {
                            renderer.print_error(&message);
                        }
                    }
                    continue;
                }

                // Regular message - send to the backend
                session.set_input(line);
                renderer.print_thinking(session.selected_agent());
                let outcome = session.send_message().await;
                print_reply(&session, &mut renderer, outcome, config.chart_dir.as_deref());
            }
            Err(ReadlineError::Interrupted) => {
                // Ctrl+C at prompt - soft interrupt
                println!();
                continue;
            }
            Err(ReadlineError::Eof) => {
                // Ctrl+D - exit
                println!("\nGoodbye!");
                break;
            }
            Err(err) => {
                renderer.print_error(&format!("Input error: {}", err));
                break;
            }
        }
    }

    Ok(())
}

fn print_reply<B: salesbot::ChatBackend>(
    session: &ChatSession<B>,
    renderer: &mut dyn Renderer,
    outcome: SendOutcome,
    chart_dir: Option<&Path>,
) {
    if outcome == SendOutcome::Skipped {
        return;
    }
    let Some(reply) = session.messages().last() else {
        return;
    };
    let index = session.message_count() - 1;
    renderer.print_message(reply);

    if let (Some(dir), Some(charts)) = (chart_dir, reply.charts.as_ref()) {
        match export_charts(dir, index, charts) {
            Ok(paths) => {
                for path in paths {
                    renderer.print_info(&format!("Saved chart to {}", path.display()));
                }
            }
            Err(err) => renderer.print_error(&format!("Failed to save charts: {}", err)),
        }
    }
}
