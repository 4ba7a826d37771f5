//! Client wrappers for the auth endpoints. Passwords are only ever borrowed
//! into the request body and are never logged.

use crate::{
    api::ApiClient,
    errors::AppError,
    features::auth::types::{
        AuthError, LoginRequest, RegisterError, RegisterRequest, TokenResponse,
    },
    session::{Session, SessionStore},
};
use reqwest::Method;
use secrecy::{ExposeSecret, SecretString};
use tracing::{info, instrument, warn};

/// Exchanges credentials for a token and persists the new session.
///
/// The store is written only after the backend accepted the credentials, so a
/// failed attempt leaves any previous session in place.
///
/// # Errors
/// `AuthError::Rejected` with the backend message for non-success responses,
/// `AuthError::Network` when the request could not complete, and
/// `AuthError::Storage` when the session could not be persisted.
#[instrument(skip(api, store, password))]
pub async fn login<S: SessionStore + ?Sized>(
    api: &ApiClient,
    store: &S,
    username: &str,
    password: &SecretString,
) -> Result<Session, AuthError> {
    let request = LoginRequest {
        username,
        password: password.expose_secret(),
    };

    let response: TokenResponse = api
        .send_json(Method::POST, "/auth/login", &request, None)
        .await
        .map_err(|err| {
            warn!("login rejected: {}", err);
            AuthError::from_request(err)
        })?;

    if response.access_token.is_empty() {
        return Err(AuthError::Network(AppError::Parse(
            "login response carried an empty access_token".to_string(),
        )));
    }

    let session = Session::new(username, SecretString::from(response.access_token));
    store.save(&session).map_err(AuthError::Storage)?;

    info!(
        "logged in as {} ({})",
        session.username(),
        response.token_type.as_deref().unwrap_or("bearer")
    );

    Ok(session)
}

/// Creates an account. The caller switches to the login view on success.
///
/// # Errors
/// `RegisterError::Validation` with the backend message (field messages joined
/// by `". "`), or `RegisterError::Network` when the request could not complete.
#[instrument(skip(api, password))]
pub async fn register(
    api: &ApiClient,
    username: &str,
    email: &str,
    password: &SecretString,
) -> Result<(), RegisterError> {
    let request = RegisterRequest {
        username,
        email,
        password: password.expose_secret(),
    };

    api.send_json_empty(Method::POST, "/auth/register", &request, None)
        .await
        .map_err(|err| {
            warn!("registration rejected: {}", err);
            RegisterError::from_request(err)
        })?;

    info!("registered {}", username);

    Ok(())
}

/// Clears the stored session. There is no server-side logout.
///
/// # Errors
/// Returns `AppError::Storage` if the stored session cannot be removed.
pub fn logout<S: SessionStore + ?Sized>(store: &S) -> Result<(), AppError> {
    store.clear()?;
    info!("logged out");
    Ok(())
}
