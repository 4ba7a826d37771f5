//! HTTP helpers for the task API. Feature clients use these helpers so request
//! setup, bearer authentication and error classification live in one place.
//! The helpers never store tokens; callers pass the session token per request.
//! No client-side timeout is applied: a request either completes, fails at the
//! transport level, or returns a non-success status.

use crate::{errors::AppError, APP_USER_AGENT};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, instrument};
use url::Url;

/// JSON client bound to one API base URL (for example `http://host/api`).
#[derive(Clone, Debug)]
pub struct ApiClient {
    base_url: String,
    http: Client,
}

impl ApiClient {
    /// Creates a client for the given base URL.
    ///
    /// # Errors
    /// Returns `AppError::Config` if the URL is not an absolute http(s) URL or
    /// the underlying HTTP client cannot be built.
    pub fn new(base_url: &str) -> Result<Self, AppError> {
        let base_url = normalize_base_url(base_url)?;

        let http = Client::builder()
            .user_agent(APP_USER_AGENT)
            .build()
            .map_err(|err| AppError::Config(format!("Failed to build HTTP client: {err}")))?;

        Ok(Self { base_url, http })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetches JSON, optionally authenticated and with query parameters.
    ///
    /// # Errors
    /// Returns an `AppError` on transport failure, non-success status, or an
    /// undecodable body.
    #[instrument(skip(self, token), fields(base = %self.base_url))]
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
        token: Option<&SecretString>,
    ) -> Result<T, AppError> {
        let mut builder = self.request(Method::GET, path, token);
        if !query.is_empty() {
            builder = builder.query(query);
        }

        let response = send(builder).await?;
        handle_json_response(response).await
    }

    /// Sends a JSON body and parses a JSON response.
    ///
    /// # Errors
    /// Returns an `AppError` on transport failure, non-success status, or an
    /// undecodable body.
    #[instrument(skip(self, body, token), fields(base = %self.base_url))]
    pub async fn send_json<B: Serialize, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: &B,
        token: Option<&SecretString>,
    ) -> Result<T, AppError> {
        let builder = self.request(method, path, token);
        let response = send(builder.json(body)).await?;
        handle_json_response(response).await
    }

    /// Sends a JSON body and ignores the response body.
    ///
    /// # Errors
    /// Returns an `AppError` on transport failure or non-success status.
    #[instrument(skip(self, body, token), fields(base = %self.base_url))]
    pub async fn send_json_empty<B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: &B,
        token: Option<&SecretString>,
    ) -> Result<(), AppError> {
        let builder = self.request(method, path, token);
        let response = send(builder.json(body)).await?;
        handle_empty_response(response).await
    }

    /// Issues a `DELETE` and expects no response body.
    ///
    /// # Errors
    /// Returns an `AppError` on transport failure or non-success status.
    #[instrument(skip(self, token), fields(base = %self.base_url))]
    pub async fn delete(&self, path: &str, token: Option<&SecretString>) -> Result<(), AppError> {
        let builder = self.request(Method::DELETE, path, token);
        let response = send(builder).await?;
        handle_empty_response(response).await
    }

    fn request(&self, method: Method, path: &str, token: Option<&SecretString>) -> RequestBuilder {
        let url = build_url_with_base(&self.base_url, path);
        debug!("{} {}", method, url);

        let builder = self.http.request(method, url);
        match token {
            Some(token) => builder.bearer_auth(token.expose_secret()),
            None => builder,
        }
    }
}

/// Validates and normalizes an API base URL, dropping any trailing slash.
///
/// # Errors
/// Returns `AppError::Config` for empty, relative or non-http(s) URLs.
pub fn normalize_base_url(base_url: &str) -> Result<String, AppError> {
    let trimmed = base_url.trim();
    if trimmed.is_empty() {
        return Err(AppError::Config("API base URL is not configured.".to_string()));
    }

    let url = Url::parse(trimmed)
        .map_err(|err| AppError::Config(format!("Invalid API base URL {trimmed}: {err}")))?;

    match url.scheme() {
        "http" | "https" => {}
        scheme => {
            return Err(AppError::Config(format!(
                "Invalid API base URL {trimmed}: unsupported scheme {scheme}"
            )))
        }
    }

    Ok(trimmed.trim_end_matches('/').to_string())
}

/// Builds a URL from an explicit base URL and the provided path.
fn build_url_with_base(base_url: &str, path: &str) -> String {
    let base = base_url.trim().trim_end_matches('/');
    let path = path.trim();

    if base.is_empty() {
        path.to_string()
    } else {
        format!("{}/{}", base, path.trim_start_matches('/'))
    }
}

async fn send(builder: RequestBuilder) -> Result<Response, AppError> {
    builder.send().await.map_err(map_request_error)
}

/// Maps transport errors into `AppError::Network`.
fn map_request_error(err: reqwest::Error) -> AppError {
    if err.is_builder() {
        AppError::Serialization(format!("Failed to build request: {err}"))
    } else {
        AppError::Network(format!("Unable to reach the server: {err}"))
    }
}

async fn handle_json_response<T: DeserializeOwned>(response: Response) -> Result<T, AppError> {
    if response.status().is_success() {
        response
            .json::<T>()
            .await
            .map_err(|err| AppError::Parse(format!("Failed to decode response: {err}")))
    } else {
        Err(error_from_response(response).await)
    }
}

async fn handle_empty_response(response: Response) -> Result<(), AppError> {
    if response.status().is_success() {
        Ok(())
    } else {
        Err(error_from_response(response).await)
    }
}

async fn error_from_response(response: Response) -> AppError {
    let status: StatusCode = response.status();
    let body = response.text().await.unwrap_or_default();
    debug!("request failed with {}: {}", status, body);
    AppError::http(status.as_u16(), &body)
}
