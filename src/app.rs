//! Application state machine.
//!
//! All user actions are expressed as [`Command`]s and applied one at a time by
//! [`App::update`]. The app owns the session, the visible view, the loaded
//! group and task lists, the task filter, the live password check and the
//! current transient message. Every command finishes before the next one
//! starts; after a mutation the affected lists are fetched again in full.

use crate::{
    api::ApiClient,
    config::Timing,
    errors::AppError,
    features::{
        auth,
        groups::{self, Group},
        tasks::{self, NewTask, Task, TaskFilter, TaskUpdate},
    },
    password::{self, PasswordCheck},
    session::{Session, SessionStore},
};
use secrecy::SecretString;
use tokio::time::{sleep, Instant};
use tracing::{debug, error, instrument};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthTab {
    Login,
    Register,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum View {
    Auth(AuthTab),
    Application,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageKind {
    Success,
    Error,
}

#[derive(Clone, Debug)]
pub struct Message {
    pub text: String,
    pub kind: MessageKind,
    shown_at: Instant,
}

#[derive(Debug)]
pub enum Command {
    ShowLogin,
    ShowRegister,
    Login {
        username: String,
        password: SecretString,
    },
    Register {
        username: String,
        email: String,
        password: SecretString,
    },
    /// The registration password field changed.
    PasswordInput(String),
    Logout,
    /// Reload groups and tasks.
    Refresh,
    LoadGroups,
    CreateGroup {
        name: String,
    },
    RenameGroup {
        id: i64,
        name: String,
    },
    DeleteGroup {
        id: i64,
    },
    LoadTasks,
    SetFilter(TaskFilter),
    CreateTask {
        title: String,
        description: String,
        group_id: Option<i64>,
    },
    ToggleTask {
        id: i64,
        completed: bool,
    },
    UpdateTask {
        id: i64,
        update: TaskUpdate,
    },
    DeleteTask {
        id: i64,
    },
}

impl Command {
    /// Short name for logs; never includes field values.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::ShowLogin => "show-login",
            Self::ShowRegister => "show-register",
            Self::Login { .. } => "login",
            Self::Register { .. } => "register",
            Self::PasswordInput(_) => "password-input",
            Self::Logout => "logout",
            Self::Refresh => "refresh",
            Self::LoadGroups => "load-groups",
            Self::CreateGroup { .. } => "create-group",
            Self::RenameGroup { .. } => "rename-group",
            Self::DeleteGroup { .. } => "delete-group",
            Self::LoadTasks => "load-tasks",
            Self::SetFilter(_) => "set-filter",
            Self::CreateTask { .. } => "create-task",
            Self::ToggleTask { .. } => "toggle-task",
            Self::UpdateTask { .. } => "update-task",
            Self::DeleteTask { .. } => "delete-task",
        }
    }
}

pub struct App<S> {
    api: ApiClient,
    store: S,
    timing: Timing,
    session: Option<Session>,
    view: View,
    groups: Vec<Group>,
    tasks: Vec<Task>,
    filter: TaskFilter,
    password_check: Option<PasswordCheck>,
    message: Option<Message>,
}

impl<S: SessionStore> App<S> {
    /// Builds the app from whatever session is stored. The stored token is
    /// trusted as-is; no request is made here.
    ///
    /// # Errors
    /// Returns `AppError::Storage` if the session store cannot be read.
    pub fn start(api: ApiClient, store: S, timing: Timing) -> Result<Self, AppError> {
        let session = store.load()?;
        let view = if session.is_some() {
            View::Application
        } else {
            View::Auth(AuthTab::Login)
        };

        debug!("starting in {:?}", view);

        Ok(Self {
            api,
            store,
            timing,
            session,
            view,
            groups: Vec::new(),
            tasks: Vec::new(),
            filter: TaskFilter::default(),
            password_check: None,
            message: None,
        })
    }

    #[must_use]
    pub const fn view(&self) -> View {
        self.view
    }

    #[must_use]
    pub const fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    #[must_use]
    pub fn username(&self) -> Option<&str> {
        self.session.as_ref().map(Session::username)
    }

    #[must_use]
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    #[must_use]
    pub const fn filter(&self) -> TaskFilter {
        self.filter
    }

    #[must_use]
    pub const fn password_check(&self) -> Option<PasswordCheck> {
        self.password_check
    }

    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// The current message, or `None` once it has expired.
    #[must_use]
    pub fn message(&self) -> Option<&Message> {
        self.message
            .as_ref()
            .filter(|message| message.shown_at.elapsed() < self.timing.message_ttl)
    }

    /// Removes and returns the last message, expired or not. One-shot commands
    /// use this to report the outcome after the command has finished.
    pub fn take_message(&mut self) -> Option<Message> {
        self.message.take()
    }

    /// Applies one command.
    #[instrument(skip_all)]
    pub async fn update(&mut self, command: Command) {
        debug!("command: {}", command.name());
        match command {
            Command::ShowLogin => self.view = View::Auth(AuthTab::Login),
            Command::ShowRegister => self.view = View::Auth(AuthTab::Register),
            Command::PasswordInput(candidate) => {
                self.password_check = Some(password::check(&candidate));
            }
            Command::Login { username, password } => self.login(&username, &password).await,
            Command::Register {
                username,
                email,
                password,
            } => self.register(&username, &email, &password).await,
            Command::Logout => self.logout(),
            Command::Refresh => {
                self.load_groups().await;
                self.load_tasks().await;
            }
            Command::LoadGroups => self.load_groups().await,
            Command::LoadTasks => self.load_tasks().await,
            Command::SetFilter(filter) => {
                self.filter = filter;
                self.load_tasks().await;
            }
            Command::CreateGroup { name } => self.create_group(&name).await,
            Command::RenameGroup { id, name } => self.rename_group(id, &name).await,
            Command::DeleteGroup { id } => self.delete_group(id).await,
            Command::CreateTask {
                title,
                description,
                group_id,
            } => self.create_task(&title, &description, group_id).await,
            Command::ToggleTask { id, completed } => {
                self.update_task(id, TaskUpdate::completion(completed)).await;
            }
            Command::UpdateTask { id, update } => self.update_task(id, update).await,
            Command::DeleteTask { id } => self.delete_task(id).await,
        }
    }

    fn notify(&mut self, kind: MessageKind, text: impl Into<String>) {
        self.message = Some(Message {
            text: text.into(),
            kind,
            shown_at: Instant::now(),
        });
    }

    /// Session for authenticated commands, or an error message when signed out.
    fn require_session(&mut self) -> Option<Session> {
        let session = self.session.clone();
        if session.is_none() {
            self.notify(MessageKind::Error, "Please login first");
        }
        session
    }

    async fn login(&mut self, username: &str, password: &SecretString) {
        match auth::login(&self.api, &self.store, username, password).await {
            Ok(session) => {
                self.session = Some(session);
                self.notify(MessageKind::Success, "Login successful!");
                sleep(self.timing.login_redirect).await;
                self.view = View::Application;
                self.load_groups().await;
                self.load_tasks().await;
            }
            Err(err) => self.notify(MessageKind::Error, err.to_string()),
        }
    }

    async fn register(&mut self, username: &str, email: &str, password: &SecretString) {
        match auth::register(&self.api, username, email, password).await {
            Ok(()) => {
                self.notify(MessageKind::Success, "Registration successful! Please login.");
                sleep(self.timing.register_redirect).await;
                self.view = View::Auth(AuthTab::Login);
            }
            Err(err) => self.notify(MessageKind::Error, err.to_string()),
        }
    }

    fn logout(&mut self) {
        if let Err(err) = auth::logout(&self.store) {
            error!("Error clearing session: {}", err);
            self.notify(MessageKind::Error, err.to_string());
        }
        self.session = None;
        self.groups.clear();
        self.tasks.clear();
        self.filter = TaskFilter::default();
        self.view = View::Auth(AuthTab::Login);
    }

    async fn load_groups(&mut self) {
        let Some(session) = self.require_session() else {
            return;
        };

        match groups::list(&self.api, &session).await {
            Ok(groups) => {
                // a filter on a group that no longer exists cannot stay selected
                if let Some(id) = self.filter.group {
                    if !groups.iter().any(|group| group.id == id) {
                        self.filter.group = None;
                    }
                }
                self.groups = groups;
            }
            Err(err) => error!("Error loading groups: {}", err),
        }
    }

    async fn load_tasks(&mut self) {
        let Some(session) = self.require_session() else {
            return;
        };

        match tasks::list(&self.api, &session, &self.filter).await {
            Ok(tasks) => self.tasks = tasks,
            Err(err) => error!("Error loading tasks: {}", err),
        }
    }

    async fn create_group(&mut self, name: &str) {
        let name = name.trim();
        if name.is_empty() {
            return;
        }
        let Some(session) = self.require_session() else {
            return;
        };

        match groups::create(&self.api, &session, name).await {
            Ok(()) => {
                self.notify(MessageKind::Success, "Group created!");
                self.load_groups().await;
            }
            Err(err) => self.mutation_failed("Error creating group", &err),
        }
    }

    async fn rename_group(&mut self, id: i64, name: &str) {
        let name = name.trim();
        if name.is_empty() {
            return;
        }
        let Some(session) = self.require_session() else {
            return;
        };

        match groups::rename(&self.api, &session, id, name).await {
            Ok(()) => {
                self.notify(MessageKind::Success, "Group renamed!");
                self.load_groups().await;
                // task rows show the group name
                self.load_tasks().await;
            }
            Err(err) => self.mutation_failed("Error renaming group", &err),
        }
    }

    async fn delete_group(&mut self, id: i64) {
        let Some(session) = self.require_session() else {
            return;
        };

        match groups::delete(&self.api, &session, id).await {
            Ok(()) => {
                self.notify(MessageKind::Success, "Group deleted!");
                self.load_groups().await;
                // tasks of the group are gone too
                self.load_tasks().await;
            }
            Err(err) => self.mutation_failed("Error deleting group", &err),
        }
    }

    async fn create_task(&mut self, title: &str, description: &str, group_id: Option<i64>) {
        let Some(task) = group_id.and_then(|id| NewTask::from_input(title, description, id))
        else {
            self.notify(MessageKind::Error, "Title and group are required");
            return;
        };
        let Some(session) = self.require_session() else {
            return;
        };

        match tasks::create(&self.api, &session, &task).await {
            Ok(()) => {
                self.notify(MessageKind::Success, "Task created!");
                self.load_tasks().await;
            }
            Err(err) => self.mutation_failed("Error creating task", &err),
        }
    }

    async fn update_task(&mut self, id: i64, update: TaskUpdate) {
        if update.is_empty() {
            return;
        }
        let Some(session) = self.require_session() else {
            return;
        };

        match tasks::update(&self.api, &session, id, &update).await {
            Ok(()) => {
                if update.is_completed.is_none() {
                    self.notify(MessageKind::Success, "Task updated!");
                }
                self.load_tasks().await;
            }
            Err(err) => self.mutation_failed("Error updating task", &err),
        }
    }

    async fn delete_task(&mut self, id: i64) {
        let Some(session) = self.require_session() else {
            return;
        };

        match tasks::delete(&self.api, &session, id).await {
            Ok(()) => {
                self.notify(MessageKind::Success, "Task deleted!");
                self.load_tasks().await;
            }
            Err(err) => self.mutation_failed("Error deleting task", &err),
        }
    }

    fn mutation_failed(&mut self, text: &str, err: &AppError) {
        error!("{}: {}", text, err);
        self.notify(MessageKind::Error, text);
    }
}
