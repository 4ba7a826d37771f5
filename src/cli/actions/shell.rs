//! Interactive loop: one command per line, the screen is printed after each
//! command that changes state.

use crate::{
    app::{App, Command},
    cli::{
        actions::{groups, input, tasks},
        globals::GlobalArgs,
    },
    features::tasks::{TaskFilter, TaskUpdate},
    render,
    session::SessionStore,
};
use anyhow::Result;
use tokio::io::AsyncBufRead;
use tracing::debug;

const PROMPT: &str = "taskdesk> ";

const HELP: &str = "\
commands:
  login <username>                  password is prompted
  register <username> <email>       password is prompted
  tab login|register
  password <candidate>              check against the password rules
  logout
  refresh | show
  group add <name>
  group rename <id> <name>
  group rm <id>
  task add <group-id> <title> [| <description>]
  task done <id> | task undo <id>
  task title <id> <title>
  task desc <id> <description>
  task move <id> <group-id>
  task rm <id>
  filter group <id>|all
  filter completed true|false|all
  filter clear
  help | quit
";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterChange {
    Group(Option<i64>),
    Completed(Option<bool>),
    Clear,
}

impl FilterChange {
    #[must_use]
    pub const fn apply(self, filter: TaskFilter) -> TaskFilter {
        match self {
            Self::Group(group) => TaskFilter { group, ..filter },
            Self::Completed(completed) => TaskFilter { completed, ..filter },
            Self::Clear => TaskFilter {
                group: None,
                completed: None,
            },
        }
    }
}

/// A parsed shell line.
#[derive(Debug)]
pub enum Line {
    Empty,
    Help,
    Quit,
    Show,
    Login { username: String },
    Register { username: String, email: String },
    Filter(FilterChange),
    /// Runs only after the question is answered with yes.
    Confirm {
        question: &'static str,
        command: Command,
    },
    Run(Command),
}

/// Parses one line of shell input.
///
/// # Errors
/// Returns a usage hint when the line is not a known command.
pub fn parse_line(line: &str) -> Result<Line, String> {
    let line = line.trim();
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Ok(Line::Empty);
    };
    let args: Vec<&str> = words.collect();

    match (head, args.as_slice()) {
        ("help" | "?", _) => Ok(Line::Help),
        ("quit" | "exit", _) => Ok(Line::Quit),
        ("show", []) => Ok(Line::Show),
        ("refresh", []) => Ok(Line::Run(Command::Refresh)),
        ("logout", []) => Ok(Line::Run(Command::Logout)),
        ("login", [username]) => Ok(Line::Login {
            username: (*username).to_string(),
        }),
        ("register", [username, email]) => Ok(Line::Register {
            username: (*username).to_string(),
            email: (*email).to_string(),
        }),
        ("tab", ["login"]) => Ok(Line::Run(Command::ShowLogin)),
        ("tab", ["register"]) => Ok(Line::Run(Command::ShowRegister)),
        ("password", _) => Ok(Line::Run(Command::PasswordInput(
            rest(line, 1).to_string(),
        ))),
        ("group", [sub, ..]) => parse_group(sub, line),
        ("task", [sub, ..]) => parse_task(sub, line),
        ("filter", ["clear"]) => Ok(Line::Filter(FilterChange::Clear)),
        ("filter", ["group", value]) => {
            let group = if *value == "all" {
                None
            } else {
                Some(id(value)?)
            };
            Ok(Line::Filter(FilterChange::Group(group)))
        }
        ("filter", ["completed", value]) => {
            let completed = match *value {
                "all" => None,
                "true" | "yes" => Some(true),
                "false" | "no" => Some(false),
                _ => return Err(format!("expected true, false or all, got {value}")),
            };
            Ok(Line::Filter(FilterChange::Completed(completed)))
        }
        _ => Err(format!("unknown command: {line} (try help)")),
    }
}

fn parse_group(sub: &str, line: &str) -> Result<Line, String> {
    match sub {
        "add" => Ok(Line::Run(Command::CreateGroup {
            name: rest(line, 2).to_string(),
        })),
        "rename" => Ok(Line::Run(Command::RenameGroup {
            id: id(word(line, 2)?)?,
            name: rest(line, 3).to_string(),
        })),
        "rm" => Ok(Line::Confirm {
            question: groups::CONFIRM_DELETE,
            command: Command::DeleteGroup {
                id: id(word(line, 2)?)?,
            },
        }),
        _ => Err(format!("unknown group command: {sub} (try help)")),
    }
}

fn parse_task(sub: &str, line: &str) -> Result<Line, String> {
    let task_id = || id(word(line, 2)?);
    match sub {
        "add" => {
            let group_id = id(word(line, 2)?)?;
            let (title, description) = rest(line, 3)
                .split_once('|')
                .unwrap_or((rest(line, 3), ""));
            Ok(Line::Run(Command::CreateTask {
                title: title.trim().to_string(),
                description: description.trim().to_string(),
                group_id: Some(group_id),
            }))
        }
        "done" | "undo" => Ok(Line::Run(Command::ToggleTask {
            id: task_id()?,
            completed: sub == "done",
        })),
        "title" => Ok(Line::Run(Command::UpdateTask {
            id: task_id()?,
            update: TaskUpdate {
                title: Some(rest(line, 3).to_string()),
                ..TaskUpdate::default()
            },
        })),
        "desc" => Ok(Line::Run(Command::UpdateTask {
            id: task_id()?,
            update: TaskUpdate {
                description: Some(rest(line, 3).to_string()),
                ..TaskUpdate::default()
            },
        })),
        "move" => Ok(Line::Run(Command::UpdateTask {
            id: task_id()?,
            update: TaskUpdate {
                group_id: Some(id(word(line, 3)?)?),
                ..TaskUpdate::default()
            },
        })),
        "rm" => Ok(Line::Confirm {
            question: tasks::CONFIRM_DELETE,
            command: Command::DeleteTask { id: task_id()? },
        }),
        _ => Err(format!("unknown task command: {sub} (try help)")),
    }
}

/// The n-th whitespace separated word.
fn word(line: &str, n: usize) -> Result<&str, String> {
    line.split_whitespace()
        .nth(n)
        .ok_or_else(|| "missing argument (try help)".to_string())
}

/// Everything after the first `n` words, with inner spacing kept.
fn rest(line: &str, n: usize) -> &str {
    let mut remaining = line.trim_start();
    for _ in 0..n {
        remaining = remaining
            .find(char::is_whitespace)
            .map_or("", |end| remaining[end..].trim_start());
    }
    remaining.trim_end()
}

fn id(value: &str) -> Result<i64, String> {
    value
        .parse()
        .map_err(|_| format!("expected a numeric id, got {value}"))
}

/// Runs the shell on stdin until `quit` or end of input.
///
/// # Errors
/// Returns an error if the app cannot start or stdin fails.
pub async fn execute(globals: &GlobalArgs) -> Result<()> {
    let mut app = globals.open_app(globals.timing)?;
    let mut reader = input::stdin();

    if app.session().is_some() {
        app.update(Command::Refresh).await;
    }
    print!("{}", render::screen(&app));

    run(&mut app, &mut reader).await
}

/// The read-eval-print loop, generic over the input for tests.
///
/// # Errors
/// Returns an error if reading input fails.
pub async fn run<S, R>(app: &mut App<S>, reader: &mut R) -> Result<()>
where
    S: SessionStore,
    R: AsyncBufRead + Unpin,
{
    loop {
        eprint!("{PROMPT}");
        let Some(line) = input::read_line(reader).await? else {
            break;
        };

        let parsed = match parse_line(&line) {
            Ok(parsed) => parsed,
            Err(hint) => {
                debug!("rejected shell input");
                eprintln!("{hint}");
                continue;
            }
        };

        match parsed {
            Line::Empty => continue,
            Line::Quit => break,
            Line::Help => {
                print!("{HELP}");
                continue;
            }
            Line::Show => {}
            Line::Login { username } => {
                let password = input::password(reader, None).await?;
                app.update(Command::Login { username, password }).await;
            }
            Line::Register { username, email } => {
                let password = input::password(reader, None).await?;
                app.update(Command::Register {
                    username,
                    email,
                    password,
                })
                .await;
            }
            Line::Filter(change) => {
                app.update(Command::SetFilter(change.apply(app.filter())))
                    .await;
            }
            Line::Confirm { question, command } => {
                if !input::confirm(reader, question).await? {
                    continue;
                }
                app.update(command).await;
            }
            Line::Run(Command::PasswordInput(candidate)) => {
                app.update(Command::PasswordInput(candidate)).await;
                if let Some(check) = app.password_check() {
                    print!("{}", render::password_check(&check));
                }
                continue;
            }
            Line::Run(command) => app.update(command).await,
        }

        print!("{}", render::screen(&*app));
    }

    Ok(())
}
