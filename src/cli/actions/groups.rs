use crate::{
    api::ApiClient,
    app::Command,
    cli::{
        actions::{input, run::report},
        globals::GlobalArgs,
    },
    config::Timing,
    features::groups,
    render,
    session::{Session, SessionStore},
};
use anyhow::{Context, Result};

pub const CONFIRM_DELETE: &str = "Delete this group and all its tasks?";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupAction {
    List,
    Create { name: String },
    Rename { id: i64, name: String },
    Delete { id: i64, yes: bool },
}

/// # Errors
/// Returns an error if nobody is logged in or the backend call fails.
pub async fn execute(action: GroupAction, globals: &GlobalArgs) -> Result<()> {
    let command = match action {
        GroupAction::List => return list(globals).await,
        GroupAction::Create { name } => Command::CreateGroup { name },
        GroupAction::Rename { id, name } => Command::RenameGroup { id, name },
        GroupAction::Delete { id, yes } => {
            if !yes && !input::confirm(&mut input::stdin(), CONFIRM_DELETE).await? {
                println!("Cancelled");
                return Ok(());
            }
            Command::DeleteGroup { id }
        }
    };

    let mut app = globals.open_app(Timing::immediate())?;
    app.update(command).await;
    report(&mut app)?;

    print!("{}", render::groups(app.groups()));
    Ok(())
}

async fn list(globals: &GlobalArgs) -> Result<()> {
    let session = signed_in(globals)?;
    let api = ApiClient::new(&globals.api_url)?;

    let groups = groups::list(&api, &session)
        .await
        .context("Error loading groups")?;

    print!("{}", render::groups(&groups));
    Ok(())
}

/// The stored session, required by every list command.
pub(crate) fn signed_in(globals: &GlobalArgs) -> Result<Session> {
    globals.store().load()?.context("Please login first")
}
