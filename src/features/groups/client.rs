//! Client wrappers for `/groups`.

use crate::{
    api::ApiClient,
    errors::AppError,
    features::groups::types::{Group, GroupRequest},
    session::Session,
};
use reqwest::Method;
use tracing::instrument;

/// Lists the groups owned by the session user.
///
/// # Errors
/// Returns an `AppError` if the request fails or the body cannot be decoded.
#[instrument(skip(api, session))]
pub async fn list(api: &ApiClient, session: &Session) -> Result<Vec<Group>, AppError> {
    api.get_json("/groups", &[], Some(session.token())).await
}

/// Creates a group.
///
/// # Errors
/// Returns an `AppError` if the request fails.
#[instrument(skip(api, session))]
pub async fn create(api: &ApiClient, session: &Session, name: &str) -> Result<(), AppError> {
    api.send_json_empty(
        Method::POST,
        "/groups",
        &GroupRequest { name },
        Some(session.token()),
    )
    .await
}

/// Renames a group.
///
/// # Errors
/// Returns an `AppError` if the request fails.
#[instrument(skip(api, session))]
pub async fn rename(api: &ApiClient, session: &Session, id: i64, name: &str) -> Result<(), AppError> {
    api.send_json_empty(
        Method::PUT,
        &format!("/groups/{id}"),
        &GroupRequest { name },
        Some(session.token()),
    )
    .await
}

/// Deletes a group. The backend removes its tasks as well.
///
/// # Errors
/// Returns an `AppError` if the request fails.
#[instrument(skip(api, session))]
pub async fn delete(api: &ApiClient, session: &Session, id: i64) -> Result<(), AppError> {
    api.delete(&format!("/groups/{id}"), Some(session.token()))
        .await
}
