use crate::{
    api::ApiClient,
    app::Command,
    cli::{
        actions::{groups::signed_in, input, run::report},
        globals::GlobalArgs,
    },
    config::Timing,
    features::tasks::{self, TaskFilter, TaskUpdate},
    render,
};
use anyhow::{Context, Result};

pub const CONFIRM_DELETE: &str = "Delete this task?";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskAction {
    List(TaskFilter),
    Create {
        title: String,
        description: String,
        group_id: i64,
    },
    Edit {
        id: i64,
        update: TaskUpdate,
    },
    SetCompleted {
        id: i64,
        completed: bool,
    },
    Delete {
        id: i64,
        yes: bool,
    },
}

/// # Errors
/// Returns an error if nobody is logged in or the backend call fails.
pub async fn execute(action: TaskAction, globals: &GlobalArgs) -> Result<()> {
    let command = match action {
        TaskAction::List(filter) => return list(globals, filter).await,
        TaskAction::Create {
            title,
            description,
            group_id,
        } => Command::CreateTask {
            title,
            description,
            group_id: Some(group_id),
        },
        TaskAction::Edit { id, update } => Command::UpdateTask { id, update },
        TaskAction::SetCompleted { id, completed } => Command::ToggleTask { id, completed },
        TaskAction::Delete { id, yes } => {
            if !yes && !input::confirm(&mut input::stdin(), CONFIRM_DELETE).await? {
                println!("Cancelled");
                return Ok(());
            }
            Command::DeleteTask { id }
        }
    };

    let mut app = globals.open_app(Timing::immediate())?;
    app.update(command).await;
    report(&mut app)?;

    print!("{}", render::tasks(app.tasks()));
    Ok(())
}

async fn list(globals: &GlobalArgs, filter: TaskFilter) -> Result<()> {
    let session = signed_in(globals)?;
    let api = ApiClient::new(&globals.api_url)?;

    let tasks = tasks::list(&api, &session, &filter)
        .await
        .context("Error loading tasks")?;

    print!("{}", render::tasks(&tasks));
    Ok(())
}
