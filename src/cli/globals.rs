use crate::{
    api::ApiClient,
    app::App,
    config::{AppConfig, Timing},
    session::FileStore,
};
use anyhow::Result;
use std::path::PathBuf;

/// Options shared by every subcommand.
#[derive(Debug, Clone)]
pub struct GlobalArgs {
    pub api_url: String,
    pub session_file: PathBuf,
    /// Delays for interactive use.
    pub timing: Timing,
}

impl GlobalArgs {
    #[must_use]
    pub fn new(config: AppConfig) -> Self {
        Self {
            api_url: config.api_base_url,
            session_file: config.session_file,
            timing: config.timing,
        }
    }

    #[must_use]
    pub fn store(&self) -> FileStore {
        FileStore::new(&self.session_file)
    }

    /// Opens the app against the configured API and session file.
    ///
    /// # Errors
    /// Returns an error if the API client cannot be built or the session file
    /// cannot be read.
    pub fn open_app(&self, timing: Timing) -> Result<App<FileStore>> {
        let api = ApiClient::new(&self.api_url)?;
        Ok(App::start(api, self.store(), timing)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::View;

    #[test]
    fn test_global_args() {
        let config = AppConfig::new(Some("http://localhost:8000/api/"), Some("/tmp/x.json"));
        assert!(config.is_ok());
        if let Ok(config) = config {
            let args = GlobalArgs::new(config);
            assert_eq!(args.api_url, "http://localhost:8000/api");
            assert_eq!(args.store().path(), PathBuf::from("/tmp/x.json").as_path());
        }
    }

    #[test]
    fn test_open_app_without_session() {
        let path = std::env::temp_dir().join(format!("taskdesk-{}.json", uuid::Uuid::new_v4()));
        let args = GlobalArgs {
            api_url: "http://127.0.0.1:1/api".to_string(),
            session_file: path,
            timing: Timing::default(),
        };
        let app = args.open_app(Timing::immediate());
        assert!(matches!(app.map(|a| a.view()), Ok(View::Auth(_))));
    }
}
