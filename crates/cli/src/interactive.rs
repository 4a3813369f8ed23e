//! Interactive toggle console
//!
//! Reads `<media> on|off` lines (stdin in the binary). Toggle input is debounced per
//! media type; settled toggles come back over a channel so the session is
//! only ever touched by this loop.

use anyhow::Result;
use colored::Colorize;
use queue_toggle_core::application::{QueueToggleService, ToggleDebouncer, Transition};
use queue_toggle_core::domain::AgentSession;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;
use tracing::debug;

use crate::render;

const HELP: &str = "Commands: <media type> on|off, refresh, status, help, quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    Toggle { media_type: String, desired: bool },
    Refresh,
    Status,
    Help,
    Quit,
}

/// Parse one console line; `Ok(None)` for blank input
pub fn parse_command(line: &str) -> std::result::Result<Option<ConsoleCommand>, String> {
    let words: Vec<&str> = line.split_whitespace().collect();
    let command = match words.as_slice() {
        [] => return Ok(None),
        ["refresh"] => ConsoleCommand::Refresh,
        ["status"] => ConsoleCommand::Status,
        ["help"] | ["?"] => ConsoleCommand::Help,
        ["quit"] | ["exit"] | ["q"] => ConsoleCommand::Quit,
        [media_type, switch] => ConsoleCommand::Toggle {
            media_type: media_type.to_string(),
            desired: parse_switch(switch)?,
        },
        _ => return Err(format!("Unrecognized input: {}", line.trim())),
    };
    Ok(Some(command))
}

fn parse_switch(word: &str) -> std::result::Result<bool, String> {
    match word.to_lowercase().as_str() {
        "on" | "join" | "true" => Ok(true),
        "off" | "leave" | "false" => Ok(false),
        other => Err(format!("Expected on/off, got {}", other)),
    }
}

/// Run the console until `quit` or end of input; returns the final session
pub async fn run<R>(
    service: &QueueToggleService,
    mut session: AgentSession,
    debouncer: ToggleDebouncer,
    input: R,
) -> Result<AgentSession>
where
    R: AsyncBufRead + Unpin,
{
    let (settled_tx, mut settled_rx) = mpsc::channel::<(String, bool)>(16);
    let mut lines = input.lines();

    println!("{}", render::session(&session, service.whitelist()));
    println!();
    println!("{}", HELP.dimmed());
    println!("{}", media_types_hint(service).dimmed());

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match parse_command(&line) {
                    Ok(None) => {}
                    Ok(Some(ConsoleCommand::Quit)) => break,
                    Ok(Some(ConsoleCommand::Help)) => {
                        println!("{}", HELP);
                        println!("{}", media_types_hint(service));
                    }
                    Ok(Some(ConsoleCommand::Status)) => {
                        println!("{}", render::session(&session, service.whitelist()));
                    }
                    Ok(Some(ConsoleCommand::Refresh)) => {
                        session = settle(service.refresh(session).await, service);
                    }
                    Ok(Some(ConsoleCommand::Toggle { media_type, desired })) => {
                        let key = match service.whitelist().resolve(&media_type) {
                            Ok(key) => key.to_string(),
                            Err(e) => {
                                println!("{}", e.to_string().red());
                                continue;
                            }
                        };
                        let debouncer = debouncer.clone();
                        let settled_tx = settled_tx.clone();
                        tokio::spawn(async move {
                            if let Some(desired) = debouncer.submit(&key, desired).await {
                                let _ = settled_tx.send((key, desired)).await;
                            } else {
                                debug!(media_type = %key, "Toggle input coalesced");
                            }
                        });
                    }
                    Err(msg) => println!("{}", msg.red()),
                }
            }
            Some((media_type, desired)) = settled_rx.recv() => {
                session = settle(service.toggle(session, &media_type, desired).await, service);
            }
        }
    }

    Ok(session)
}

fn media_types_hint(service: &QueueToggleService) -> String {
    let keys: Vec<&str> = service.whitelist().keys().collect();
    format!("Media types: {}", keys.join(", "))
}

/// Print the outcome of an operation and take back the session
fn settle<T>(transition: Transition<T>, service: &QueueToggleService) -> AgentSession {
    let (session, outcome) = transition.into_parts();
    match outcome {
        Ok(_) => println!("{}", render::session(&session, service.whitelist())),
        Err(e) => println!("{} {}", "✗".red(), e),
    }
    session
}
