//! Client configuration: where the API lives, where the session is kept and
//! how long UI transitions and messages last. Values come from CLI flags or
//! their `TASKDESK_*` environment variables; this module only normalizes them
//! and fills in defaults.

use crate::{api::normalize_base_url, errors::AppError};
use std::{env, path::PathBuf, time::Duration};

pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";
const SESSION_DIR: &str = "taskdesk";
const SESSION_FILE: &str = "session.json";

/// Delays applied by the app state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timing {
    /// Pause between "Login successful!" and showing the application view.
    pub login_redirect: Duration,
    /// Pause between a successful registration and switching to the login tab.
    pub register_redirect: Duration,
    /// How long a message stays visible.
    pub message_ttl: Duration,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            login_redirect: Duration::from_millis(1000),
            register_redirect: Duration::from_millis(1500),
            message_ttl: Duration::from_millis(3000),
        }
    }
}

impl Timing {
    /// No transition delays; used by one-shot commands.
    #[must_use]
    pub fn immediate() -> Self {
        Self {
            login_redirect: Duration::ZERO,
            register_redirect: Duration::ZERO,
            ..Self::default()
        }
    }
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub api_base_url: String,
    pub session_file: PathBuf,
    pub timing: Timing,
}

impl AppConfig {
    /// Builds a config from optional user-supplied values.
    ///
    /// # Errors
    /// Returns `AppError::Config` if the API URL is invalid or no session file
    /// location can be determined.
    pub fn new(api_url: Option<&str>, session_file: Option<&str>) -> Result<Self, AppError> {
        let api_base_url = normalize_value(api_url.unwrap_or_default())
            .map_or_else(|| normalize_base_url(DEFAULT_API_URL), |url| normalize_base_url(&url))?;

        let session_file = match session_file.and_then(normalize_value) {
            Some(path) => PathBuf::from(path),
            None => default_session_path().ok_or_else(|| {
                AppError::Config(
                    "cannot determine session file location, set TASKDESK_SESSION_FILE"
                        .to_string(),
                )
            })?,
        };

        Ok(Self {
            api_base_url,
            session_file,
            timing: Timing::default(),
        })
    }
}

/// `$XDG_CONFIG_HOME/taskdesk/session.json`, else `$HOME/.config/taskdesk/session.json`.
#[must_use]
pub fn default_session_path() -> Option<PathBuf> {
    let base = env::var("XDG_CONFIG_HOME")
        .ok()
        .and_then(|value| normalize_value(&value))
        .map(PathBuf::from)
        .or_else(|| {
            env::var("HOME")
                .ok()
                .and_then(|value| normalize_value(&value))
                .map(|home| PathBuf::from(home).join(".config"))
        })?;

    Some(base.join(SESSION_DIR).join(SESSION_FILE))
}

fn normalize_value(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
