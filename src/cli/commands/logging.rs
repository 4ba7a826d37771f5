use clap::{builder::ValueParser, Arg, ArgAction, Command};

pub const ARG_VERBOSITY: &str = "verbosity";
pub const ARG_LOG_JSON: &str = "log-json";

#[must_use]
pub fn validator_log_level() -> ValueParser {
    ValueParser::from(move |level: &str| -> std::result::Result<u8, String> {
        if let Ok(parsed) = level.parse::<u8>() {
            // Successfully parsed as a number
            if parsed <= 5 {
                return Ok(parsed);
            }
        }

        match level.to_lowercase().as_str() {
            "error" => Ok(0),
            "warn" => Ok(1),
            "info" => Ok(2),
            "debug" => Ok(3),
            "trace" => Ok(4),
            _ => Err("invalid log level".to_string()),
        }
    })
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_VERBOSITY)
                .short('v')
                .long("verbose")
                .help("Verbosity level: ERROR, WARN, INFO, DEBUG, TRACE (default: ERROR)")
                .env("TASKDESK_LOG_LEVEL")
                .global(true)
                .action(ArgAction::Count)
                .value_parser(validator_log_level()),
        )
        .arg(
            Arg::new(ARG_LOG_JSON)
                .long("log-json")
                .help("Write logs to stderr as JSON lines")
                .env("TASKDESK_LOG_JSON")
                .global(true)
                .action(ArgAction::SetTrue),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validator_log_level() {
        let command = with_args(Command::new("test"));
        for (index, level) in ["error", "warn", "info", "debug", "trace"].iter().enumerate() {
            let matches = temp_env::with_vars([("TASKDESK_LOG_LEVEL", Some(*level))], || {
                command.clone().get_matches_from(vec!["test"])
            });
            assert_eq!(
                matches.get_one::<u8>(ARG_VERBOSITY).copied(),
                Some(index as u8)
            );
        }
    }

    #[test]
    fn test_verbosity_count() {
        temp_env::with_vars([("TASKDESK_LOG_LEVEL", None::<&str>)], || {
            let command = with_args(Command::new("test"));
            let matches = command.get_matches_from(vec!["test", "-vvv"]);
            assert_eq!(matches.get_one::<u8>(ARG_VERBOSITY).copied(), Some(3));
        });
    }

    #[test]
    fn test_log_json_flag() {
        temp_env::with_vars([("TASKDESK_LOG_JSON", None::<&str>)], || {
            let command = with_args(Command::new("test"));
            let matches = command.clone().get_matches_from(vec!["test"]);
            assert!(!matches.get_flag(ARG_LOG_JSON));

            let matches = command.get_matches_from(vec!["test", "--log-json"]);
            assert!(matches.get_flag(ARG_LOG_JSON));
        });
    }
}
