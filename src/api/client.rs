//! HTTP client for the recognition service

use async_trait::async_trait;
use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

use super::types::{
    Ack, EngineConfig, HistoryListResponse, HistoryRecord, LoginRequest, LoginResponse,
    RecognizeRequest, RecognizeResponse,
};
use super::OcrService;
use crate::error::{ClientError, ClientResult};

/// Application code for a missing or expired session
const CODE_UNAUTHORIZED: i64 = 4;
/// Application code for an administrator-only operation
const CODE_FORBIDDEN: i64 = 7;

/// JSON-over-HTTP implementation of [`OcrService`]
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for the service at `base_url`
    pub fn new(base_url: &str, timeout: Duration) -> ClientResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::Transport(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        operation: &str,
    ) -> ClientResult<T> {
        debug!("{} request", operation);

        let response = request.send().await.map_err(|e| {
            warn!("{} failed to reach service: {}", operation, e);
            ClientError::from(e)
        })?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        let result = parse_response(status, &body, operation);
        if let Err(ref e) = result {
            warn!("{} failed: {}", operation, e);
        }
        result
    }
}

#[async_trait]
impl OcrService for ApiClient {
    async fn recognize(&self, token: &str, image_base64: &str) -> ClientResult<RecognizeResponse> {
        let request = self
            .http
            .post(self.url("/ocr"))
            .bearer_auth(token)
            .json(&RecognizeRequest { image: image_base64 });
        self.send(request, "Recognition").await
    }

    async fn fetch_history(&self, token: &str) -> ClientResult<Vec<HistoryRecord>> {
        let request = self.http.get(self.url("/ocr/history")).bearer_auth(token);
        let list: HistoryListResponse = self.send(request, "History fetch").await?;
        Ok(list.data)
    }

    async fn clear_history(&self, token: &str) -> ClientResult<()> {
        let request = self.http.delete(self.url("/ocr/history")).bearer_auth(token);
        let _: Ack = self.send(request, "History clear").await?;
        Ok(())
    }

    async fn login(&self, username: &str, password: &str) -> ClientResult<String> {
        let request = self
            .http
            .post(self.url("/login"))
            .json(&LoginRequest { username, password });
        let response: LoginResponse = self.send(request, "Login").await?;

        match response.token {
            Some(token) if !token.is_empty() => Ok(token),
            _ => Err(ClientError::Remote {
                code: 0,
                message: "Login failed: no token returned".to_string(),
            }),
        }
    }

    async fn engine_config(&self, token: &str) -> ClientResult<EngineConfig> {
        let request = self.http.get(self.url("/admin/ocr-config")).bearer_auth(token);
        self.send(request, "Engine config").await
    }
}

/// Classify a response body; success requires both a 2xx status and `errcode == 0`
pub(crate) fn parse_response<T: DeserializeOwned>(
    status: u16,
    body: &str,
    operation: &str,
) -> ClientResult<T> {
    let success = (200..300).contains(&status);

    let value: Value = match serde_json::from_str(body) {
        Ok(value) => value,
        Err(_) if success => {
            return Err(ClientError::Transport(format!(
                "{} failed: undecodable response",
                operation
            )))
        }
        Err(_) => {
            return Err(classify(status, 0, format!("{} failed: {}", operation, status)));
        }
    };

    let code = value.get("errcode").and_then(Value::as_i64).unwrap_or(0);
    let msg = value
        .get("msg")
        .and_then(Value::as_str)
        .filter(|m| !m.is_empty())
        .map(str::to_string);

    if !success {
        let message = msg.unwrap_or_else(|| format!("{} failed: {}", operation, status));
        return Err(classify(status, code, message));
    }

    if code != 0 {
        let message = msg.unwrap_or_else(|| format!("{} failed", operation));
        return Err(classify(status, code, message));
    }

    serde_json::from_value(value)
        .map_err(|e| ClientError::Transport(format!("{} failed: {}", operation, e)))
}

fn classify(status: u16, code: i64, message: String) -> ClientError {
    if status == 401 || status == 403 || code == CODE_UNAUTHORIZED || code == CODE_FORBIDDEN {
        ClientError::Auth(message)
    } else {
        ClientError::Remote {
            code: if code != 0 { code } else { status as i64 },
            message,
        }
    }
}
