use crate::{
    app::Command,
    cli::{
        actions::{input, run::report},
        globals::GlobalArgs,
    },
    config::Timing,
    password, render,
    session::SessionStore,
};
use anyhow::{bail, Result};
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

/// # Errors
/// Returns an error if the password cannot be read or the backend rejects the
/// credentials.
pub async fn login(
    globals: &GlobalArgs,
    username: String,
    password: Option<SecretString>,
) -> Result<()> {
    let password = input::password(&mut input::stdin(), password).await?;
    let mut app = globals.open_app(Timing::immediate())?;

    app.update(Command::Login { username, password }).await;
    report(&mut app)
}

/// # Errors
/// Returns an error if the password cannot be read or the backend rejects the
/// registration.
pub async fn register(
    globals: &GlobalArgs,
    username: String,
    email: String,
    password: Option<SecretString>,
) -> Result<()> {
    let password = input::password(&mut input::stdin(), password).await?;
    let mut app = globals.open_app(Timing::immediate())?;

    app.update(Command::ShowRegister).await;
    app.update(Command::PasswordInput(password.expose_secret().to_string()))
        .await;
    if let Some(check) = app.password_check() {
        eprint!("{}", render::password_check(&check));
    }

    app.update(Command::Register {
        username,
        email,
        password,
    })
    .await;
    report(&mut app)
}

/// # Errors
/// Returns an error if the session file cannot be removed.
pub async fn logout(globals: &GlobalArgs) -> Result<()> {
    let mut app = globals.open_app(Timing::immediate())?;
    if app.session().is_none() {
        debug!("no stored session");
    }

    app.update(Command::Logout).await;
    report(&mut app)?;

    println!("Logged out");
    Ok(())
}

/// # Errors
/// Returns an error when nobody is logged in or the session file is unreadable.
pub fn whoami(globals: &GlobalArgs) -> Result<()> {
    match globals.store().load()? {
        Some(session) => {
            println!("{}", session.username());
            Ok(())
        }
        None => bail!("Not logged in"),
    }
}

/// Prints the rule checklist. The rules are advisory, so the command succeeds
/// whatever the outcome.
///
/// # Errors
/// Returns an error if the password cannot be read.
pub async fn password_check(password: Option<SecretString>) -> Result<()> {
    let password = input::password(&mut input::stdin(), password).await?;
    print!("{}", checklist(&password));
    Ok(())
}

fn checklist(password: &SecretString) -> String {
    render::password_check(&password::check(password.expose_secret()))
}
