use std::sync::Arc;

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use vaultx_core::{
    ClientConfig, DealCreateRequest, DealCreated, DealStatus, UploadOptions, UploadReceipt,
};

use crate::executor::RequestExecutor;
use crate::transport::{ReqwestTransport, Transport};
use crate::{Result, VaultXError};

pub const HEALTH_PATH: &str = "/health";
pub const DEAL_PATH: &str = "/api/deal";

/// VaultX REST API Client
///
/// Cheap to clone; clones share the transport and the read-only config.
#[derive(Clone)]
pub struct VaultXClient {
    executor: RequestExecutor,
}

impl VaultXClient {
    /// Create a client backed by reqwest
    pub fn new(config: ClientConfig) -> Result<Self> {
        Self::with_transport(config, Arc::new(ReqwestTransport::new()))
    }

    /// Create a client over a custom transport
    pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> Result<Self> {
        Ok(Self {
            executor: RequestExecutor::new(config, transport)?,
        })
    }

    /// The normalized config this client was built with
    pub fn config(&self) -> &ClientConfig {
        self.executor.config()
    }

    /// Health check: GET /health
    pub async fn get_health(&self) -> Result<Option<Value>> {
        self.executor.get(HEALTH_PATH).await
    }

    /// Create a new storage deal: POST /api/deal
    pub async fn create_deal(&self, params: &DealCreateRequest) -> Result<DealCreated> {
        let value = self.executor.post(DEAL_PATH, params).await?;
        decode(value)
    }

    /// Get deal status: GET /api/deal/{id}
    pub async fn get_deal_status(&self, deal_id: &str) -> Result<DealStatus> {
        if deal_id.trim().is_empty() {
            return Err(VaultXError::Validation("dealId is required".to_string()));
        }

        let path = format!("{}/{}", DEAL_PATH, encode_path_segment(deal_id));
        let value = self.executor.get(&path).await?;
        decode(value)
    }

    /// Upload a file and open a deal for it.
    ///
    /// The upload endpoint is not part of the VaultX API yet; this always
    /// fails without touching the network.
    pub async fn upload_file(&self, _data: &[u8], _options: UploadOptions) -> Result<UploadReceipt> {
        Err(VaultXError::NotImplemented("VaultXClient::upload_file"))
    }

    /// Issue a request to an endpoint this client does not wrap
    pub async fn request<B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<Option<Value>>
    where
        B: Serialize + ?Sized,
    {
        self.executor.execute(method, path, body).await
    }
}

/// Create a client backed by reqwest
pub fn create_client(config: ClientConfig) -> Result<VaultXClient> {
    VaultXClient::new(config)
}

/// Validate a success body against the expected shape
fn decode<T: DeserializeOwned>(value: Option<Value>) -> Result<T> {
    let value = value.ok_or_else(|| VaultXError::MalformedResponse {
        reason: "empty response body".to_string(),
        body: String::new(),
    })?;

    T::deserialize(&value).map_err(|e| VaultXError::MalformedResponse {
        reason: format!("unexpected response shape: {}", e),
        body: value.to_string(),
    })
}

/// Percent-encode everything outside the URI-component unreserved set
fn encode_path_segment(s: &str) -> String {
    let mut encoded = String::with_capacity(s.len() * 3);
    for byte in s.bytes() {
        match byte {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'-'
            | b'_'
            | b'.'
            | b'!'
            | b'~'
            | b'*'
            | b'\''
            | b'('
            | b')' => encoded.push(byte as char),
            _ => encoded.push_str(&format!("%{:02X}", byte)),
        }
    }
    encoded
}
