//! HTTP client for the authentication API. Non-2xx responses carry the
//! server's optional `error` string next to the status so callers can surface
//! it verbatim; transport and decode failures stay separate variants.

use crate::konto::types::{
    InboxMessage, LoginRequest, LoginResponse, RegisterRequest, RegisterResponse,
    VerifyCodeRequest, VerifyCodeResponse,
};
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use std::fmt;
use tracing::{Instrument, info_span};
use url::Url;

#[derive(Clone, Debug)]
pub enum ApiError {
    /// Non-2xx response; carries the parsed `error` field when present.
    Status { status: u16, message: Option<String> },
    Transport(String),
    Decode(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Status {
                status,
                message: Some(message),
            } => {
                write!(formatter, "Request failed ({status}): {message}")
            }
            ApiError::Status {
                status,
                message: None,
            } => write!(formatter, "Request failed ({status})"),
            ApiError::Transport(message) => write!(formatter, "Network error: {message}"),
            ApiError::Decode(message) => write!(formatter, "Response error: {message}"),
        }
    }
}

impl std::error::Error for ApiError {}

/// Authentication API surface consumed by the flows. Implemented by
/// [`HttpApi`] in production and by scripted fakes in tests.
#[async_trait]
pub trait AuthApi {
    async fn register(&self, request: &RegisterRequest) -> Result<RegisterResponse, ApiError>;

    async fn verify_code(
        &self,
        request: &VerifyCodeRequest,
    ) -> Result<VerifyCodeResponse, ApiError>;

    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ApiError>;

    async fn dev_emails(&self, email: &str) -> Result<Vec<InboxMessage>, ApiError>;
}

#[derive(Clone, Debug)]
pub struct HttpApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpApi {
    /// Build a client for the given API base URL.
    ///
    /// # Errors
    /// Returns an error if the base URL does not parse or the HTTP client
    /// cannot be constructed.
    pub fn new(base_url: &str) -> Result<Self> {
        Url::parse(base_url).with_context(|| format!("invalid API base URL: {base_url}"))?;

        let client = reqwest::Client::builder()
            .user_agent(crate::APP_USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn post_json<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let url = self.url(path);
        let span = info_span!("http_post", url = %url);

        async move {
            let response = self
                .client
                .post(&url)
                .json(body)
                .send()
                .await
                .map_err(|err| ApiError::Transport(err.to_string()))?;

            decode_response(response).await
        }
        .instrument(span)
        .await
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.url(path);
        let span = info_span!("http_get", url = %url);

        async move {
            let response = self
                .client
                .get(&url)
                .send()
                .await
                .map_err(|err| ApiError::Transport(err.to_string()))?;

            decode_response(response).await
        }
        .instrument(span)
        .await
    }
}

#[async_trait]
impl AuthApi for HttpApi {
    async fn register(&self, request: &RegisterRequest) -> Result<RegisterResponse, ApiError> {
        self.post_json("/api/auth/register", request).await
    }

    async fn verify_code(
        &self,
        request: &VerifyCodeRequest,
    ) -> Result<VerifyCodeResponse, ApiError> {
        self.post_json("/api/auth/verify-code", request).await
    }

    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ApiError> {
        self.post_json("/api/auth/login", request).await
    }

    async fn dev_emails(&self, email: &str) -> Result<Vec<InboxMessage>, ApiError> {
        self.get_json(&format!("/api/auth/dev/emails/{email}")).await
    }
}

async fn decode_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    let status = response.status();

    if status.is_success() {
        response
            .json::<T>()
            .await
            .map_err(|err| ApiError::Decode(format!("Failed to decode response: {err}")))
    } else {
        let body = response.text().await.unwrap_or_default();

        Err(ApiError::Status {
            status: status.as_u16(),
            message: error_message(&body),
        })
    }
}

// Extract the optional `error` string from a failure body. Empty or
// non-string values count as absent so callers fall back to their fixed
// message.
fn error_message(body: &str) -> Option<String> {
    serde_json::from_str::<Value>(body)
        .ok()
        .as_ref()
        .and_then(|value| value.get("error"))
        .and_then(Value::as_str)
        .filter(|message| !message.is_empty())
        .map(ToString::to_string)
}
