use crate::{
    app::{App, MessageKind},
    cli::{
        actions::{auth, groups, shell, tasks, Action},
        globals::GlobalArgs,
    },
    render,
    session::SessionStore,
};
use anyhow::{bail, Result};

/// Execute the provided action.
// This is the single dispatch point for all CLI actions.
/// # Errors
/// Returns an error if the action fails.
pub async fn execute(action: Action, globals: &GlobalArgs) -> Result<()> {
    match action {
        Action::Login { username, password } => auth::login(globals, username, password).await,
        Action::Register {
            username,
            email,
            password,
        } => auth::register(globals, username, email, password).await,
        Action::Logout => auth::logout(globals).await,
        Action::Whoami => auth::whoami(globals),
        Action::PasswordCheck { password } => auth::password_check(password).await,
        Action::Groups(action) => groups::execute(action, globals).await,
        Action::Tasks(action) => tasks::execute(action, globals).await,
        Action::Shell => shell::execute(globals).await,
    }
}

/// Prints the outcome of the last command; an error message fails the action.
///
/// # Errors
/// Returns the error message shown by the app.
pub fn report<S: SessionStore>(app: &mut App<S>) -> Result<()> {
    match app.take_message() {
        Some(message) if message.kind == MessageKind::Error => bail!("{}", message.text),
        Some(message) => {
            print!("{}", render::message(&message));
            Ok(())
        }
        None => Ok(()),
    }
}
