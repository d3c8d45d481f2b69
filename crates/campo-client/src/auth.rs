//! # Login
//!
//! `POST /auth/login {username, password}` → `{access_token}`. The token is
//! then sent as `Authorization: Bearer` by [`BackendClient::with_token`].
//! Nothing else about sessions is handled here.

use campo_core::validation::validate_required;
use reqwest::Method;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::client::BackendClient;
use crate::error::{ClientError, ClientResult};

const LOGIN_PATH: [&str; 2] = ["auth", "login"];

/// Fallback when the backend gives no reason.
const DEFAULT_LOGIN_ERROR: &str = "Error al iniciar sesión";

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

/// A successful login.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginSession {
    pub access_token: String,
}

/// `message` may be a single string or a list of validation messages.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum FailureMessage {
    One(String),
    Many(Vec<String>),
}

#[derive(Debug, Deserialize)]
struct LoginFailure {
    #[serde(default)]
    message: Option<FailureMessage>,
}

fn failure_message(body: &str) -> String {
    let message = serde_json::from_str::<LoginFailure>(body)
        .ok()
        .and_then(|failure| failure.message)
        .map(|message| match message {
            FailureMessage::One(text) => text,
            FailureMessage::Many(texts) => texts.join("; "),
        })
        .filter(|text| !text.trim().is_empty());

    message.unwrap_or_else(|| DEFAULT_LOGIN_ERROR.to_string())
}

impl BackendClient {
    /// Exchanges credentials for an access token.
    pub async fn login(&self, username: &str, password: &str) -> ClientResult<LoginSession> {
        let username = validate_required("username", username)?;
        if password.is_empty() {
            return Err(campo_core::ValidationError::required("password").into());
        }

        let url = self.endpoint(&LOGIN_PATH)?;
        let response = self
            .request(Method::POST, url)
            .json(&LoginRequest {
                username: &username,
                password,
            })
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = failure_message(&body);
            warn!(status = status.as_u16(), %username, "Login rejected");
            return Err(ClientError::LoginRejected {
                status: status.as_u16(),
                message,
            });
        }

        let session: LoginSession = serde_json::from_str(&body)?;
        if session.access_token.trim().is_empty() {
            return Err(ClientError::Decode("login response has an empty access_token".into()));
        }

        info!(%username, "Logged in");
        Ok(session)
    }
}
