//! Thin JSON-over-HTTP client shared by the inference and web3 gateways.

use std::time::Duration;

use civica_shared::ServiceEndpointConfig;
use reqwest::{Client, Method, StatusCode};
use serde_json::Value;
use tracing::debug;

/// Raw gateway reply: status plus the decoded JSON body (`Null` when empty).
#[derive(Debug, Clone)]
pub(crate) struct GatewayReply {
    pub status: StatusCode,
    pub body: Value,
}

/// Failure before a gateway reply could be decoded.
#[derive(Debug)]
pub(crate) enum GatewayFailure {
    Transport(String),
    Decode(String),
}

/// Client bound to one gateway base URL.
#[derive(Debug, Clone)]
pub(crate) struct GatewayClient {
    http: Client,
    base_url: String,
    api_key: Option<String>,
}

impl GatewayClient {
    pub(crate) fn new(config: &ServiceEndpointConfig) -> Result<Self, reqwest::Error> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone().filter(|k| !k.is_empty()),
        })
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub(crate) async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<GatewayReply, GatewayFailure> {
        let url = self.url(path);
        debug!(%method, %url, "Calling gateway");

        let mut request = self.http.request(method, &url);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| GatewayFailure::Transport(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| GatewayFailure::Transport(e.to_string()))?;

        let body = if text.trim().is_empty() {
            Value::Null
        } else if status.is_success() {
            serde_json::from_str(&text).map_err(|e| GatewayFailure::Decode(e.to_string()))?
        } else {
            // Error bodies are not always JSON; keep the text so it can be reported.
            serde_json::from_str(&text).unwrap_or(Value::String(text))
        };

        Ok(GatewayReply { status, body })
    }
}

/// Best-effort human-readable message from an error reply.
pub(crate) fn error_message(reply: &GatewayReply) -> String {
    let from_body = match &reply.body {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Object(map) => ["message", "error", "detail"]
            .iter()
            .find_map(|key| map.get(*key).and_then(Value::as_str))
            .map(String::from),
        _ => None,
    };

    from_body.unwrap_or_else(|| {
        reply
            .status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_string()
    })
}
