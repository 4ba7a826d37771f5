//! Client wrappers for `/tasks`.

use crate::{
    api::ApiClient,
    errors::AppError,
    features::tasks::types::{NewTask, Task, TaskFilter, TaskUpdate},
    session::Session,
};
use reqwest::Method;
use tracing::instrument;

/// Lists tasks matching `filter`.
///
/// # Errors
/// Returns an `AppError` if the request fails or the body cannot be decoded.
#[instrument(skip(api, session))]
pub async fn list(
    api: &ApiClient,
    session: &Session,
    filter: &TaskFilter,
) -> Result<Vec<Task>, AppError> {
    api.get_json("/tasks", &filter.query(), Some(session.token()))
        .await
}

/// Creates a task in an existing group.
///
/// # Errors
/// Returns an `AppError` if the request fails.
#[instrument(skip(api, session))]
pub async fn create(api: &ApiClient, session: &Session, task: &NewTask) -> Result<(), AppError> {
    api.send_json_empty(Method::POST, "/tasks", task, Some(session.token()))
        .await
}

/// Applies a partial update.
///
/// # Errors
/// Returns an `AppError` if the request fails.
#[instrument(skip(api, session))]
pub async fn update(
    api: &ApiClient,
    session: &Session,
    id: i64,
    update: &TaskUpdate,
) -> Result<(), AppError> {
    api.send_json_empty(
        Method::PUT,
        &format!("/tasks/{id}"),
        update,
        Some(session.token()),
    )
    .await
}

/// Deletes a task.
///
/// # Errors
/// Returns an `AppError` if the request fails.
#[instrument(skip(api, session))]
pub async fn delete(api: &ApiClient, session: &Session, id: i64) -> Result<(), AppError> {
    api.delete(&format!("/tasks/{id}"), Some(session.token()))
        .await
}
