//! # Backend Client
//!
//! Thin HTTP layer over reqwest. Every call is a single request: no retry,
//! no backoff. Services ([`ProductService`], [`CustomerService`]) build on
//! the helpers here.

use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;
use url::Url;

use crate::config::BackendSettings;
use crate::customers::CustomerService;
use crate::error::{ClientError, ClientResult};
use crate::products::ProductService;

/// Result of a DELETE call.
#[derive(Debug, Clone, PartialEq)]
pub enum DeleteOutcome {
    /// 204, or a 2xx with an empty body.
    Deleted,
    /// The backend answered with a JSON body.
    Body(serde_json::Value),
}

/// HTTP client for the products/customers backend.
#[derive(Debug, Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    base_url: Url,
    token: Option<String>,
}

impl BackendClient {
    /// Builds a client from `[backend]` settings, including any saved token.
    pub fn new(settings: &BackendSettings) -> ClientResult<Self> {
        let base_url = settings.parsed_url()?;
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        Ok(BackendClient {
            http,
            base_url,
            token: settings.token.clone().filter(|t| !t.trim().is_empty()),
        })
    }

    /// Client for `base_url` with no token.
    pub fn from_url(base_url: &str) -> ClientResult<Self> {
        Self::new(&BackendSettings {
            base_url: base_url.to_string(),
            token: None,
        })
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    pub fn products(&self) -> ProductService<'_> {
        ProductService::new(self)
    }

    pub fn customers(&self) -> CustomerService<'_> {
        CustomerService::new(self)
    }

    // =========================================================================
    // Internal helpers
    // =========================================================================

    /// Base URL with `segments` appended, each percent-encoded.
    pub(crate) fn endpoint(&self, segments: &[&str]) -> ClientResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidUrl(format!("{} cannot be a base URL", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    pub(crate) fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let builder = self.http.request(method, url);
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, segments: &[&str]) -> ClientResult<T> {
        let url = self.endpoint(segments)?;
        debug!(method = "GET", %url, "Backend request");
        let response = self.request(Method::GET, url).send().await?;
        handle_response(response).await
    }

    pub(crate) async fn send_json<B, T>(&self, method: Method, segments: &[&str], body: &B) -> ClientResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(segments)?;
        debug!(method = %method, %url, "Backend request");
        let response = self.request(method, url).json(body).send().await?;
        handle_response(response).await
    }

    pub(crate) async fn delete(&self, segments: &[&str]) -> ClientResult<DeleteOutcome> {
        let url = self.endpoint(segments)?;
        debug!(method = "DELETE", %url, "Backend request");
        let response = self.request(Method::DELETE, url).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(api_error(status, response).await);
        }
        if status == StatusCode::NO_CONTENT {
            return Ok(DeleteOutcome::Deleted);
        }

        let body = response.text().await?;
        if body.trim().is_empty() {
            return Ok(DeleteOutcome::Deleted);
        }
        Ok(DeleteOutcome::Body(serde_json::from_str(&body)?))
    }
}

/// Decodes a 2xx JSON body or turns anything else into [`ClientError::Api`].
pub(crate) async fn handle_response<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
    let status = response.status();
    if !status.is_success() {
        return Err(api_error(status, response).await);
    }

    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|e| ClientError::Decode(format!("{} (status {})", e, status.as_u16())))
}

async fn api_error(status: StatusCode, response: Response) -> ClientError {
    let body = response.text().await.unwrap_or_default();
    debug!(status = status.as_u16(), %body, "Backend rejected request");
    ClientError::Api {
        status: status.as_u16(),
        body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::spawn_backend;
    use axum::http::{HeaderMap, StatusCode as AxumStatus};
    use axum::routing::{delete, get};
    use axum::{Json, Router};
    use serde_json::{json, Value};

    #[test]
    fn test_endpoint_joins_segments() {
        let client = BackendClient::from_url("http://localhost:3001").unwrap();
        assert_eq!(
            client.endpoint(&["api", "productos"]).unwrap().as_str(),
            "http://localhost:3001/api/productos"
        );

        let nested = BackendClient::from_url("https://api.elcampo.co/v1/").unwrap();
        assert_eq!(
            nested.endpoint(&["api", "clientes", "a b/c"]).unwrap().as_str(),
            "https://api.elcampo.co/v1/api/clientes/a%20b%2Fc"
        );
    }

    #[test]
    fn test_rejects_non_http_url() {
        assert!(matches!(
            BackendClient::from_url("ws://localhost:3001"),
            Err(ClientError::InvalidUrl(_))
        ));
    }

    #[tokio::test]
    async fn test_bearer_token_is_sent() {
        let router = Router::new().route(
            "/whoami",
            get(|headers: HeaderMap| async move {
                let auth = headers
                    .get("authorization")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("")
                    .to_string();
                Json(json!({ "authorization": auth }))
            }),
        );
        let base = spawn_backend(router).await;

        let anonymous = BackendClient::from_url(&base).unwrap();
        let body: Value = anonymous.get_json(&["whoami"]).await.unwrap();
        assert_eq!(body["authorization"], "");

        let client = anonymous.with_token("tok-1");
        let body: Value = client.get_json(&["whoami"]).await.unwrap();
        assert_eq!(body["authorization"], "Bearer tok-1");
    }

    #[tokio::test]
    async fn test_error_status_carries_body() {
        let router = Router::new().route(
            "/broken",
            get(|| async { (AxumStatus::INTERNAL_SERVER_ERROR, "base de datos caída") }),
        );
        let base = spawn_backend(router).await;

        let client = BackendClient::from_url(&base).unwrap();
        let err = client.get_json::<Value>(&["broken"]).await.unwrap_err();
        match err {
            ClientError::Api { status, body } => {
                assert_eq!(status, 500);
                assert_eq!(body, "base de datos caída");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_delete_outcomes() {
        let router = Router::new()
            .route("/no-content", delete(|| async { AxumStatus::NO_CONTENT }))
            .route("/empty", delete(|| async { AxumStatus::OK }))
            .route("/json", delete(|| async { Json(json!({ "deleted": true })) }))
            .route("/missing", delete(|| async { (AxumStatus::NOT_FOUND, "no existe") }));
        let base = spawn_backend(router).await;
        let client = BackendClient::from_url(&base).unwrap();

        assert_eq!(client.delete(&["no-content"]).await.unwrap(), DeleteOutcome::Deleted);
        assert_eq!(client.delete(&["empty"]).await.unwrap(), DeleteOutcome::Deleted);
        assert_eq!(
            client.delete(&["json"]).await.unwrap(),
            DeleteOutcome::Body(json!({ "deleted": true }))
        );
        assert!(client.delete(&["missing"]).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_transport_error() {
        // Nothing listens on the discard port
        let client = BackendClient::from_url("http://127.0.0.1:9").unwrap();
        let err = client.get_json::<Value>(&["api", "productos"]).await.unwrap_err();
        assert!(matches!(err, ClientError::Transport(_)));
    }
}
