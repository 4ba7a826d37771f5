//! Login, registration and logout. Login and logout are the only writers of
//! the session store.

pub mod client;
pub mod types;

pub use client::{login, logout, register};
pub use types::{AuthError, RegisterError};
