use crate::error::{PropsError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

const JSONRPC_VERSION: &str = "2.0";

/// Default HTTP timeout for node requests
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Serialize)]
struct JsonRpcRequest {
    jsonrpc: &'static str,
    method: String,
    params: Value,
    id: u64,
}

#[derive(Debug, Deserialize)]
struct JsonRpcResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<JsonRpcError>,
}

#[derive(Debug, Deserialize)]
struct JsonRpcError {
    code: i32,
    message: String,
}

/// JSON-RPC transport over HTTP
#[derive(Debug, Clone)]
pub struct JsonRpcHttpTransport {
    client: reqwest::Client,
    url: String,
    request_id: Arc<AtomicU64>,
}

impl JsonRpcHttpTransport {
    /// Create a new transport for the given endpoint
    pub fn new(url: String) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(DEFAULT_REQUEST_TIMEOUT)
            .build()
            .map_err(|e| PropsError::Network(e.to_string()))?;

        Ok(Self {
            client,
            url,
            request_id: Arc::new(AtomicU64::new(1)),
        })
    }

    /// Send one request and return its result value
    pub async fn send_request(&self, method: &str, params: Value) -> Result<Value> {
        let id = self.request_id.fetch_add(1, Ordering::SeqCst);
        let request = JsonRpcRequest {
            jsonrpc: JSONRPC_VERSION,
            method: method.to_string(),
            params,
            id,
        };

        tracing::trace!(method, id, "sending node request");

        let response = self
            .client
            .post(&self.url)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| PropsError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(PropsError::Network(format!(
                "HTTP error: {}",
                response.status()
            )));
        }

        let response: JsonRpcResponse = response
            .json()
            .await
            .map_err(|e| PropsError::Network(e.to_string()))?;

        if let Some(error) = response.error {
            return Err(PropsError::JsonRpc {
                code: error.code,
                message: error.message,
            });
        }

        // A null result is a valid success value, e.g. unset optional state
        Ok(response.result.unwrap_or(Value::Null))
    }

    /// The underlying HTTP client, shared with other fetch paths
    pub fn http_client(&self) -> &reqwest::Client {
        &self.client
    }

    /// The endpoint URL
    pub fn url(&self) -> &str {
        &self.url
    }
}
