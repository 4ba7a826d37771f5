//! Plain-text rendering of app state for the terminal.

use crate::{
    app::{App, AuthTab, Message, MessageKind, View},
    features::{groups::Group, tasks::Task},
    password::PasswordCheck,
    session::SessionStore,
};
use std::fmt::Write;

#[must_use]
pub fn groups(groups: &[Group]) -> String {
    if groups.is_empty() {
        return "No groups yet\n".to_string();
    }

    let mut out = String::new();
    for group in groups {
        let _ = writeln!(out, "{:>4}  {}", group.id, group.name);
    }
    out
}

#[must_use]
pub fn tasks(tasks: &[Task]) -> String {
    if tasks.is_empty() {
        return "No tasks found\n".to_string();
    }

    let mut out = String::new();
    for task in tasks {
        let mark = if task.is_completed { 'x' } else { ' ' };
        let status = if task.is_completed {
            "Completed"
        } else {
            "Pending"
        };
        let _ = write!(out, "{:>4}  [{mark}] {}", task.id, task.title);
        match &task.group_name {
            Some(name) => {
                let _ = write!(out, "  ({name}, {status})");
            }
            None => {
                let _ = write!(out, "  (group {}, {status})", task.group_id);
            }
        }
        out.push('\n');
        if let Some(description) = task.description.as_deref().filter(|d| !d.is_empty()) {
            let _ = writeln!(out, "        {description}");
        }
    }
    out
}

#[must_use]
pub fn password_check(check: &PasswordCheck) -> String {
    let mut out = String::new();
    for (rule, ok) in check.rules() {
        let mark = if ok { '✓' } else { '✗' };
        let _ = writeln!(out, "  {mark} {}", rule.label());
    }
    out
}

#[must_use]
pub fn message(message: &Message) -> String {
    match message.kind {
        MessageKind::Success => format!("{}\n", message.text),
        MessageKind::Error => format!("error: {}\n", message.text),
    }
}

/// Full screen for the current view, as the interactive shell shows it.
#[must_use]
pub fn screen<S: SessionStore>(app: &App<S>) -> String {
    let mut out = String::new();

    match app.view() {
        View::Auth(tab) => {
            let title = match tab {
                AuthTab::Login => "Login",
                AuthTab::Register => "Register",
            };
            let _ = writeln!(out, "== {title} ==");
            if tab == AuthTab::Register {
                if let Some(check) = app.password_check() {
                    out.push_str(&password_check(&check));
                }
            }
        }
        View::Application => {
            let _ = writeln!(out, "== Signed in as {} ==", app.username().unwrap_or("?"));
            out.push_str("-- Groups --\n");
            out.push_str(&groups(app.groups()));
            let filter = app.filter();
            if filter.is_empty() {
                out.push_str("-- Tasks --\n");
            } else {
                let group = filter
                    .group
                    .map_or_else(|| "all".to_string(), |id| id.to_string());
                let completed = filter
                    .completed
                    .map_or_else(|| "all".to_string(), |c| c.to_string());
                let _ = writeln!(out, "-- Tasks (group: {group}, completed: {completed}) --");
            }
            out.push_str(&tasks(app.tasks()));
        }
    }

    if let Some(msg) = app.message() {
        out.push_str(&message(msg));
    }

    out
}
