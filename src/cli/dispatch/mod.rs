//! Maps validated CLI matches to an [`Action`] plus the global options.

use crate::cli::{
    actions::{Action, GroupAction, TaskAction},
    commands::{auth, groups, tasks, ARG_API_URL, ARG_SESSION_FILE, ARG_YES},
    globals::GlobalArgs,
};
use crate::config::AppConfig;
use crate::features::tasks::{TaskFilter, TaskUpdate};
use anyhow::{anyhow, Context, Result};
use clap::ArgMatches;
use secrecy::SecretString;

/// Map validated CLI matches to an action.
///
/// # Errors
/// Returns an error if required arguments are missing or invalid.
pub fn handler(matches: &ArgMatches) -> Result<(Action, GlobalArgs)> {
    let config = AppConfig::new(
        matches.get_one::<String>(ARG_API_URL).map(String::as_str),
        matches.get_one::<String>(ARG_SESSION_FILE).map(String::as_str),
    )?;
    let globals = GlobalArgs::new(config);

    let action = match matches.subcommand() {
        Some(("login", sub_m)) => Action::Login {
            username: required(sub_m, auth::ARG_USERNAME)?,
            password: secret(sub_m, auth::ARG_PASSWORD),
        },
        Some(("register", sub_m)) => Action::Register {
            username: required(sub_m, auth::ARG_USERNAME)?,
            email: required(sub_m, auth::ARG_EMAIL)?,
            password: secret(sub_m, auth::ARG_PASSWORD),
        },
        Some(("logout", _)) => Action::Logout,
        Some(("whoami", _)) => Action::Whoami,
        Some(("password-check", sub_m)) => Action::PasswordCheck {
            password: secret(sub_m, auth::ARG_PASSWORD),
        },
        Some(("groups", sub_m)) => Action::Groups(group_action(sub_m)?),
        Some(("tasks", sub_m)) => Action::Tasks(task_action(sub_m)?),
        Some(("shell", _)) => Action::Shell,
        _ => return Err(anyhow!("missing subcommand, see --help")),
    };

    Ok((action, globals))
}

fn group_action(matches: &ArgMatches) -> Result<GroupAction> {
    Ok(match matches.subcommand() {
        Some(("list", _)) => GroupAction::List,
        Some(("create", sub_m)) => GroupAction::Create {
            name: group_name(sub_m)?,
        },
        Some(("rename", sub_m)) => GroupAction::Rename {
            id: id(sub_m, groups::ARG_ID)?,
            name: group_name(sub_m)?,
        },
        Some(("delete", sub_m)) => GroupAction::Delete {
            id: id(sub_m, groups::ARG_ID)?,
            yes: sub_m.get_flag(ARG_YES),
        },
        _ => return Err(anyhow!("missing groups subcommand, see groups --help")),
    })
}

fn task_action(matches: &ArgMatches) -> Result<TaskAction> {
    Ok(match matches.subcommand() {
        Some(("list", sub_m)) => TaskAction::List(TaskFilter {
            group: sub_m.get_one::<i64>(tasks::ARG_GROUP).copied(),
            completed: sub_m.get_one::<bool>(tasks::ARG_COMPLETED).copied(),
        }),
        Some(("create", sub_m)) => TaskAction::Create {
            title: required(sub_m, tasks::ARG_TITLE)?,
            description: optional(sub_m, tasks::ARG_DESCRIPTION).unwrap_or_default(),
            group_id: id(sub_m, tasks::ARG_GROUP)?,
        },
        Some(("edit", sub_m)) => {
            let update = TaskUpdate {
                title: optional(sub_m, tasks::ARG_TITLE),
                description: optional(sub_m, tasks::ARG_DESCRIPTION),
                is_completed: None,
                group_id: sub_m.get_one::<i64>(tasks::ARG_GROUP).copied(),
            };
            if update.is_empty() {
                return Err(anyhow!(
                    "nothing to change, pass --title, --description or --group"
                ));
            }
            TaskAction::Edit {
                id: id(sub_m, tasks::ARG_ID)?,
                update,
            }
        }
        Some(("done", sub_m)) => TaskAction::SetCompleted {
            id: id(sub_m, tasks::ARG_ID)?,
            completed: true,
        },
        Some(("undo", sub_m)) => TaskAction::SetCompleted {
            id: id(sub_m, tasks::ARG_ID)?,
            completed: false,
        },
        Some(("delete", sub_m)) => TaskAction::Delete {
            id: id(sub_m, tasks::ARG_ID)?,
            yes: sub_m.get_flag(ARG_YES),
        },
        _ => return Err(anyhow!("missing tasks subcommand, see tasks --help")),
    })
}

fn required(matches: &ArgMatches, name: &str) -> Result<String> {
    matches
        .get_one::<String>(name)
        .cloned()
        .with_context(|| format!("missing required argument: {name}"))
}

fn group_name(matches: &ArgMatches) -> Result<String> {
    let name = required(matches, groups::ARG_NAME)?;
    if name.trim().is_empty() {
        return Err(anyhow!("group name must not be blank"));
    }
    Ok(name)
}

fn optional(matches: &ArgMatches, name: &str) -> Option<String> {
    matches.get_one::<String>(name).cloned()
}

fn secret(matches: &ArgMatches, name: &str) -> Option<SecretString> {
    matches
        .get_one::<String>(name)
        .map(|value| SecretString::from(value.clone()))
}

fn id(matches: &ArgMatches, name: &str) -> Result<i64> {
    matches
        .get_one::<i64>(name)
        .copied()
        .with_context(|| format!("missing required argument: {name}"))
}
