use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};
use vaultx_core::{ApiError, ClientConfig, ConfigError};

use crate::transport::{RawRequest, RawResponse, Transport};
use crate::{Result, VaultXError};

/// Performs one HTTP round-trip against the VaultX API and normalizes the
/// outcome.
///
/// Success yields the parsed JSON body (`None` for an empty body). Failures
/// are split into timeouts (status 0), API errors (non-2xx) and malformed
/// responses.
#[derive(Clone)]
pub struct RequestExecutor {
    config: ClientConfig,
    auth: Option<HeaderValue>,
    transport: Arc<dyn Transport>,
}

impl RequestExecutor {
    /// Normalize the config and bind it to a transport
    pub fn new(config: ClientConfig, transport: Arc<dyn Transport>) -> Result<Self> {
        let config = config.normalized()?;

        let auth = match &config.api_key {
            Some(key) => {
                let mut value = HeaderValue::from_str(&format!("Bearer {}", key))
                    .map_err(|_| ConfigError::InvalidApiKey)?;
                value.set_sensitive(true);
                Some(value)
            }
            None => None,
        };

        Ok(Self {
            config,
            auth,
            transport,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Join the base URL and `path` with exactly one slash
    pub fn url_for(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.config.api_base_url,
            path.trim_start_matches('/')
        )
    }

    fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(auth) = &self.auth {
            headers.insert(AUTHORIZATION, auth.clone());
        }

        headers
    }

    /// Execute a request with an optional JSON body.
    ///
    /// The transport future and its deadline are dropped together when the
    /// call returns, whichever side finishes first.
    pub async fn execute<B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<Option<Value>>
    where
        B: Serialize + ?Sized,
    {
        let url = self.url_for(path);
        let body = body.map(|b| serde_json::to_vec(b)).transpose()?;

        let request = RawRequest {
            method: method.clone(),
            url,
            headers: self.headers(),
            body,
        };

        // Log the path only; the base URL may carry userinfo
        debug!("VaultX request: {} {}", method, path);

        let sent = tokio::time::timeout(self.config.timeout(), self.transport.send(request)).await;

        let response = match sent {
            Ok(Ok(response)) => response,
            Ok(Err(e)) => {
                warn!("VaultX transport failed for {} {}: {:#}", method, path, e);
                return Err(VaultXError::Timeout {
                    cause: Some(format!("{:#}", e)),
                });
            }
            Err(_) => {
                warn!(
                    "VaultX request timed out after {}ms: {} {}",
                    self.config.timeout_ms, method, path
                );
                return Err(VaultXError::Timeout { cause: None });
            }
        };

        debug!("VaultX response: {} {} -> {}", method, path, response.status);

        classify(response)
    }

    pub async fn get(&self, path: &str) -> Result<Option<Value>> {
        self.execute::<()>(Method::GET, path, None).await
    }

    pub async fn post<B>(&self, path: &str, body: &B) -> Result<Option<Value>>
    where
        B: Serialize + ?Sized,
    {
        self.execute(Method::POST, path, Some(body)).await
    }
}

/// Only non-empty text is parsed; an empty body is an absent value
fn parse_body(text: &str) -> serde_json::Result<Option<Value>> {
    if text.is_empty() {
        Ok(None)
    } else {
        serde_json::from_str(text).map(Some)
    }
}

fn classify(response: RawResponse) -> Result<Option<Value>> {
    if response.is_success() {
        return parse_body(&response.body).map_err(|e| VaultXError::MalformedResponse {
            reason: format!("invalid JSON: {}", e),
            body: response.body.clone(),
        });
    }

    // Error pages are not always JSON; keep the raw text as details
    let details = match parse_body(&response.body) {
        Ok(parsed) => parsed,
        Err(_) => Some(Value::String(response.body)),
    };

    Err(VaultXError::Api(ApiError::from_response(response.status, details)))
}
