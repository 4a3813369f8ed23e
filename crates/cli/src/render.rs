//! Terminal presentation: queue status table and toggle controls

use colored::Colorize;
use queue_toggle_core::application::is_mixed;
use queue_toggle_core::domain::{AgentSession, MediaTypeWhitelist};
use tabled::{Table, Tabled};

#[derive(Tabled)]
struct QueueStatusRow {
    #[tabled(rename = "Queue Name")]
    name: String,
    #[tabled(rename = "Joined")]
    joined: &'static str,
}

#[derive(Tabled)]
struct ControlRow {
    #[tabled(rename = "Media Type")]
    label: String,
    #[tabled(rename = "Toggle")]
    status: &'static str,
    #[tabled(rename = "Note")]
    note: &'static str,
}

/// Queue name / joined table, or a warning when the agent has no queues
pub fn queue_status(session: &AgentSession) -> String {
    if session.queues.is_empty() {
        return "Agent is not assigned to any queue".yellow().to_string();
    }

    let rows: Vec<QueueStatusRow> = session
        .queues
        .iter()
        .map(|queue| QueueStatusRow {
            name: queue.name.clone(),
            joined: if queue.joined { "Yes" } else { "No" },
        })
        .collect();
    Table::new(rows).to_string()
}

/// One toggle row per relevant media type; empty when there are none
pub fn controls(session: &AgentSession, whitelist: &MediaTypeWhitelist) -> String {
    if session.rows.is_empty() {
        return String::new();
    }

    let rows: Vec<ControlRow> = session
        .rows
        .iter()
        .map(|row| ControlRow {
            label: whitelist
                .label(&row.media_type)
                .unwrap_or(row.media_type.as_str())
                .to_string(),
            status: if row.join_status { "ON" } else { "OFF" },
            note: if is_mixed(&session.queues, &row.media_type) {
                "some queues differ"
            } else {
                ""
            },
        })
        .collect();
    Table::new(rows).to_string()
}

/// Both tables, separated by a blank line
pub fn session(session: &AgentSession, whitelist: &MediaTypeWhitelist) -> String {
    let mut out = queue_status(session);
    let controls = controls(session, whitelist);
    if !controls.is_empty() {
        out.push_str("\n\n");
        out.push_str(&controls);
    }
    out
}

/// Shown when login fails; nothing else is rendered afterwards
pub fn auth_failure_panel(reason: &str) -> String {
    format!(
        "{}\n  {}",
        "✗ Authentication failed".red().bold(),
        reason
    )
}
