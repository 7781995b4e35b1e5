use crate::app::ports::{ApiRequest, ApiResponse, HttpClientPort, HttpMethod};
use crate::error::{DedicatedError, Result};
use async_trait::async_trait;
use reqwest::Method;
use serde::Deserialize;

pub struct ReqwestHttp {
    client: reqwest::Client,
}

impl Default for ReqwestHttp {
    fn default() -> Self {
        Self::new()
    }
}

impl ReqwestHttp {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    error: Option<String>,
}

/// Pulls a human-readable message out of an error response body.
fn error_message(status: reqwest::StatusCode, bytes: &[u8]) -> String {
    if let Ok(body) = serde_json::from_slice::<ErrorBody>(bytes) {
        if let Some(msg) = body.message.or(body.error).filter(|m| !m.is_empty()) {
            return msg;
        }
    }
    let text = String::from_utf8_lossy(bytes).trim().to_string();
    if !text.is_empty() {
        return text;
    }
    status
        .canonical_reason()
        .unwrap_or("unexpected status")
        .to_string()
}

#[async_trait]
impl HttpClientPort for ReqwestHttp {
    async fn call(&self, request: ApiRequest) -> Result<ApiResponse> {
        let method = match request.method {
            HttpMethod::Post => Method::POST,
        };
        tracing::debug!("HTTP {} request to: {}", request.method.as_str(), request.url);

        let mut builder = self.client.request(method, request.url.clone());
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }
        if let Some(timeout) = request.timeout {
            builder = builder.timeout(timeout);
        }

        let resp = builder.send().await?;
        let status = resp.status();
        let bytes = resp.bytes().await?.to_vec();
        tracing::debug!("HTTP response: status={}, size={} bytes", status.as_u16(), bytes.len());

        if !status.is_success() {
            return Err(DedicatedError::Api {
                status: status.as_u16(),
                message: error_message(status, &bytes),
            });
        }
        Ok(ApiResponse {
            status: status.as_u16(),
            bytes,
        })
    }
}
