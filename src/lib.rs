//! # taskdesk
//!
//! Command-line client for the task management API. It signs a user in,
//! manages groups and the tasks inside them, and renders the result as text.
//!
//! ## Session
//!
//! Login exchanges a username and password for a bearer token at
//! `/auth/login`. The token and username are persisted together through a
//! [`session::SessionStore`] and are cleared together on logout; a stored
//! session decides at startup whether the application view or the
//! authentication view is shown. The stored token is not re-validated until
//! the first authenticated request.
//!
//! ## Password policy
//!
//! [`password::check`] evaluates five independent rules (length, uppercase,
//! lowercase, digit, special character) for live feedback. The result is
//! advisory; the backend is the enforcement point.
//!
//! ## Commands
//!
//! Every user action is a [`app::Command`] dispatched through
//! [`app::App::update`], which performs at most one mutation followed by a full
//! reload of the affected lists.

pub mod api;
pub mod app;
pub mod cli;
pub mod config;
pub mod errors;
pub mod features;
pub mod password;
pub mod render;
pub mod session;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);
