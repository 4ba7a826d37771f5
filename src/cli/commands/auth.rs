use clap::{Arg, Command};

pub const ARG_USERNAME: &str = "username";
pub const ARG_EMAIL: &str = "email";
pub const ARG_PASSWORD: &str = "password";

fn password_arg() -> Arg {
    Arg::new(ARG_PASSWORD)
        .long("password")
        .help("Password (read from stdin when omitted)")
        .env("TASKDESK_PASSWORD")
        .hide_env_values(true)
}

#[must_use]
pub fn with_subcommands(command: Command) -> Command {
    command
        .subcommand(
            Command::new("login")
                .about("Sign in and store the session")
                .arg(Arg::new(ARG_USERNAME).help("Username").required(true))
                .arg(password_arg()),
        )
        .subcommand(
            Command::new("register")
                .about("Create an account")
                .arg(Arg::new(ARG_USERNAME).help("Username").required(true))
                .arg(Arg::new(ARG_EMAIL).help("Email address").required(true))
                .arg(password_arg()),
        )
        .subcommand(Command::new("logout").about("Forget the stored session"))
        .subcommand(Command::new("whoami").about("Show the signed-in user"))
        .subcommand(
            Command::new("password-check")
                .about("Show which password rules a candidate satisfies")
                .arg(
                    Arg::new(ARG_PASSWORD)
                        .help("Candidate password (read from stdin when omitted)"),
                ),
        )
}
