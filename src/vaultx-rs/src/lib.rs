//! VaultX Client Library
//!
//! HTTP client for the VaultX storage-deal API.

mod client;
mod executor;
mod transport;

pub use client::{create_client, VaultXClient, DEAL_PATH, HEALTH_PATH};
pub use executor::RequestExecutor;
pub use reqwest::Method;
pub use transport::{RawRequest, RawResponse, ReqwestTransport, Transport};
pub use vaultx_core::{
    ApiError, ClientConfig, ConfigError, DealCreateRequest, DealCreated, DealState, DealStatus,
    UploadOptions, UploadReceipt, DEFAULT_TIMEOUT_MS, GENERIC_API_ERROR_MESSAGE, TIMEOUT_MESSAGE,
};

#[derive(Debug, thiserror::Error)]
pub enum VaultXError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid argument: {0}")]
    Validation(String),

    /// Deadline expired or no response could be obtained; status 0
    #[error("Request timed out")]
    Timeout { cause: Option<String> },

    #[error("VaultX API error {}: {}", .0.status, .0.message)]
    Api(ApiError),

    #[error("{0} is not implemented yet")]
    NotImplemented(&'static str),

    #[error("Malformed response: {reason}")]
    MalformedResponse { reason: String, body: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl VaultXError {
    /// Status code of a network-class error: 0 for timeouts, the HTTP status
    /// for API errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            VaultXError::Timeout { .. } => Some(0),
            VaultXError::Api(api) => Some(api.status),
            _ => None,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, VaultXError::Timeout { .. })
    }

    /// Project a timeout or API error into the normalized `ApiError` shape
    pub fn to_api_error(&self) -> Option<ApiError> {
        match self {
            VaultXError::Timeout { .. } => Some(ApiError::timeout()),
            VaultXError::Api(api) => Some(api.clone()),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, VaultXError>;
