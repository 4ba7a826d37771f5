pub mod auth;
pub mod groups;
pub mod input;
pub mod shell;
pub mod tasks;

// Internal "interpreter" for `Action`.
mod run;

pub use groups::GroupAction;
pub use tasks::TaskAction;

use crate::cli::globals::GlobalArgs;
use secrecy::SecretString;

#[derive(Debug)]
pub enum Action {
    Login {
        username: String,
        password: Option<SecretString>,
    },
    Register {
        username: String,
        email: String,
        password: Option<SecretString>,
    },
    Logout,
    Whoami,
    PasswordCheck {
        password: Option<SecretString>,
    },
    Groups(GroupAction),
    Tasks(TaskAction),
    Shell,
}

impl Action {
    /// Execute the action.
    /// # Errors
    /// Returns an error if the action fails.
    pub async fn execute(self, globals: &GlobalArgs) -> anyhow::Result<()> {
        run::execute(self, globals).await
    }
}
