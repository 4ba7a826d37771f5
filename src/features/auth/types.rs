use crate::errors::AppError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const LOGIN_FAILED: &str = "Login failed";
pub const REGISTRATION_FAILED: &str = "Registration failed";
pub const NETWORK_ERROR: &str = "Network error";

#[derive(Serialize)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Serialize)]
pub struct RegisterRequest<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
}

/// Login failure. `Display` is the message shown to the user.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Network error")]
    Network(#[source] AppError),
    #[error("{message}")]
    Rejected { status: u16, message: String },
    #[error("{0}")]
    Storage(#[source] AppError),
}

impl AuthError {
    pub(crate) fn from_request(err: AppError) -> Self {
        match err {
            // an error body that is not JSON cannot be read at all
            AppError::Http { json: false, .. } => Self::Network(err),
            AppError::Http { status, detail, .. } => Self::Rejected {
                status,
                message: detail.unwrap_or_else(|| LOGIN_FAILED.to_string()),
            },
            other => Self::Network(other),
        }
    }
}

/// Registration failure. `Display` is the message shown to the user.
#[derive(Debug, Error)]
pub enum RegisterError {
    #[error("Network error")]
    Network(#[source] AppError),
    #[error("{message}")]
    Validation { status: u16, message: String },
}

impl RegisterError {
    pub(crate) fn from_request(err: AppError) -> Self {
        match err {
            // an error body that is not JSON cannot be read at all
            AppError::Http { json: false, .. } => Self::Network(err),
            AppError::Http { status, detail, .. } => Self::Validation {
                status,
                message: detail.unwrap_or_else(|| REGISTRATION_FAILED.to_string()),
            },
            other => Self::Network(other),
        }
    }
}
