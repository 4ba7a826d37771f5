pub mod auth;
pub mod groups;
pub mod logging;
pub mod tasks;

use clap::{
    builder::styling::{AnsiColor, Effects, Styles},
    Arg, ColorChoice, Command,
};

pub const ARG_API_URL: &str = "api-url";
pub const ARG_SESSION_FILE: &str = "session-file";
pub const ARG_YES: &str = "yes";

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    let long_version: &'static str = Box::leak(
        format!("{} - {}", env!("CARGO_PKG_VERSION"), crate::GIT_COMMIT_HASH).into_boxed_str(),
    );

    let command = Command::new("taskdesk")
        .about("Task management client")
        .version(env!("CARGO_PKG_VERSION"))
        .long_version(long_version)
        .color(ColorChoice::Auto)
        .styles(styles)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new(ARG_API_URL)
                .short('a')
                .long("api-url")
                .help("Base URL of the task API")
                .default_value(crate::config::DEFAULT_API_URL)
                .env("TASKDESK_API_URL")
                .global(true),
        )
        .arg(
            Arg::new(ARG_SESSION_FILE)
                .long("session-file")
                .help("Where the session token is stored")
                .long_help(
                    "Where the session token is stored. Defaults to $XDG_CONFIG_HOME/taskdesk/session.json or $HOME/.config/taskdesk/session.json.",
                )
                .env("TASKDESK_SESSION_FILE")
                .global(true),
        );

    let command = auth::with_subcommands(command)
        .subcommand(groups::subcommand())
        .subcommand(tasks::subcommand())
        .subcommand(Command::new("shell").about("Interactive session"));

    logging::with_args(command)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let command = new();

        assert_eq!(command.get_name(), "taskdesk");
        assert_eq!(
            command.get_about().map(ToString::to_string),
            Some("Task management client".to_string())
        );
        assert_eq!(
            command.get_version().map(ToString::to_string),
            Some(env!("CARGO_PKG_VERSION").to_string())
        );
    }

    #[test]
    fn test_debug_assert() {
        new().debug_assert();
    }

    #[test]
    fn test_defaults() {
        temp_env::with_vars(
            [
                ("TASKDESK_API_URL", None::<&str>),
                ("TASKDESK_SESSION_FILE", None),
            ],
            || {
                let matches = new().get_matches_from(vec!["taskdesk", "whoami"]);
                assert_eq!(
                    matches.get_one::<String>(ARG_API_URL).cloned(),
                    Some(crate::config::DEFAULT_API_URL.to_string())
                );
                assert_eq!(matches.get_one::<String>(ARG_SESSION_FILE), None);
                assert_eq!(matches.subcommand_name(), Some("whoami"));
            },
        );
    }

    #[test]
    fn test_check_env() {
        temp_env::with_vars(
            [
                ("TASKDESK_API_URL", Some("https://tasks.example.com/api")),
                ("TASKDESK_SESSION_FILE", Some("/tmp/taskdesk.json")),
                ("TASKDESK_LOG_LEVEL", Some("info")),
                ("TASKDESK_PASSWORD", Some("Secret123!")),
            ],
            || {
                let matches = new().get_matches_from(vec!["taskdesk", "login", "alice"]);
                assert_eq!(
                    matches.get_one::<String>(ARG_API_URL).cloned(),
                    Some("https://tasks.example.com/api".to_string())
                );
                assert_eq!(
                    matches.get_one::<String>(ARG_SESSION_FILE).cloned(),
                    Some("/tmp/taskdesk.json".to_string())
                );
                assert_eq!(
                    matches.get_one::<u8>(logging::ARG_VERBOSITY).copied(),
                    Some(2)
                );

                let (name, login) = matches.subcommand().unwrap_or(("", &matches));
                assert_eq!(name, "login");
                assert_eq!(
                    login.get_one::<String>(auth::ARG_PASSWORD).cloned(),
                    Some("Secret123!".to_string())
                );
            },
        );
    }

    #[test]
    fn test_global_args_after_subcommand() {
        let matches = new().get_matches_from(vec![
            "taskdesk",
            "groups",
            "list",
            "--api-url",
            "http://127.0.0.1:9000/api",
            "-vv",
        ]);
        let (_, groups) = matches.subcommand().unwrap_or(("", &matches));
        let (_, list) = groups.subcommand().unwrap_or(("", groups));
        assert_eq!(
            list.get_one::<String>(ARG_API_URL).cloned(),
            Some("http://127.0.0.1:9000/api".to_string())
        );
    }

    #[test]
    fn test_task_list_filters() {
        let matches = new().get_matches_from(vec![
            "taskdesk",
            "tasks",
            "list",
            "--group",
            "3",
            "--completed",
            "false",
        ]);
        let (_, tasks_m) = matches.subcommand().unwrap_or(("", &matches));
        let (name, list) = tasks_m.subcommand().unwrap_or(("", tasks_m));
        assert_eq!(name, "list");
        assert_eq!(list.get_one::<i64>(tasks::ARG_GROUP).copied(), Some(3));
        assert_eq!(list.get_one::<bool>(tasks::ARG_COMPLETED).copied(), Some(false));
    }

    #[test]
    fn test_invalid_ids_are_rejected() {
        let result = new().try_get_matches_from(vec!["taskdesk", "tasks", "done", "seven"]);
        assert!(result.is_err());
    }
}
