//! HTTP client for the user registry API.

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

/// A registered user as returned by the service.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct User {
    pub id: i32,
    pub email: String,
    pub name: String,
    pub age: i32,
}

/// Payload for registering a user.
#[derive(Debug, Clone, Serialize)]
pub struct NewUser {
    pub email: String,
    pub name: String,
    pub age: i32,
}

/// Errors from talking to the registry service.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The service answered with a failure status and, usually, a JSON body
    /// carrying a human-readable message.
    #[error("{message}")]
    Server { status: StatusCode, message: String },

    /// The request never produced a response.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Extract the service-supplied message from an error body, falling back to
/// the status code when the body is not the expected JSON shape.
fn server_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| value.get("message")?.as_str().map(str::to_owned))
        .unwrap_or_else(|| format!("request failed with status {status}"))
}

/// Thin wrapper around `reqwest::Client` for the registry endpoints.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    fn users_url(&self) -> String {
        format!("{}/usuarios", self.base_url)
    }

    async fn error_from(response: reqwest::Response) -> ApiError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        ApiError::Server {
            status,
            message: server_message(status, &body),
        }
    }

    /// Fetch the full user collection.
    pub async fn list(&self) -> Result<Vec<User>, ApiError> {
        let response = self.http.get(self.users_url()).send().await?;
        if !response.status().is_success() {
            return Err(Self::error_from(response).await);
        }
        Ok(response.json().await?)
    }

    /// Register a user and return the stored record.
    pub async fn create(&self, user: &NewUser) -> Result<User, ApiError> {
        let response = self.http.post(self.users_url()).json(user).send().await?;
        if !response.status().is_success() {
            return Err(Self::error_from(response).await);
        }
        Ok(response.json().await?)
    }

    /// Remove a user by id.
    pub async fn delete(&self, id: i32) -> Result<(), ApiError> {
        let response = self
            .http
            .delete(format!("{}/{id}", self.users_url()))
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(Self::error_from(response).await);
        }
        Ok(())
    }
}
