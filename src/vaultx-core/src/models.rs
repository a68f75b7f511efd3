use serde::{Deserialize, Deserializer, Serialize};
use std::num::NonZeroU32;

/// Message carried by every client-side timeout error.
pub const TIMEOUT_MESSAGE: &str = "Request timed out";

/// Message used when an error response carries no `message` field.
pub const GENERIC_API_ERROR_MESSAGE: &str = "VaultX API error";

/// Normalized shape of a failed call.
///
/// `status` is 0 for client-side timeouts and transport failures, otherwise
/// the HTTP status code returned by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiError {
    pub status: u16,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ApiError {
    pub fn timeout() -> Self {
        Self {
            status: 0,
            message: TIMEOUT_MESSAGE.to_string(),
            details: None,
        }
    }

    /// Build an error from a non-2xx response and its parsed body.
    ///
    /// The message is taken from a string `message` field when the body has
    /// one; otherwise the generic message is used.
    pub fn from_response(status: u16, body: Option<serde_json::Value>) -> Self {
        let message = body
            .as_ref()
            .and_then(|b| b.get("message"))
            .and_then(|m| m.as_str())
            .filter(|m| !m.is_empty())
            .unwrap_or(GENERIC_API_ERROR_MESSAGE)
            .to_string();

        Self {
            status,
            message,
            details: body,
        }
    }

    pub fn is_timeout(&self) -> bool {
        self.status == 0
    }
}

/// Request body for creating a storage deal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DealCreateRequest {
    /// CID of the file content, passed through opaquely
    pub file_cid: String,
    /// Size in bytes
    pub size: u64,
    /// Number of replicas
    pub replication: NonZeroU32,
}

impl DealCreateRequest {
    pub fn new(file_cid: impl Into<String>, size: u64, replication: NonZeroU32) -> Self {
        Self {
            file_cid: file_cid.into(),
            size,
            replication,
        }
    }
}

/// Response to a successful deal creation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DealCreated {
    pub deal_id: String,
}

/// Lifecycle state of a deal: `pending` moves to `active` or `failed`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DealState {
    Pending,
    Active,
    Failed,
    /// Status the server did not report or this SDK does not recognize
    #[default]
    #[serde(other)]
    Unknown,
}

impl std::fmt::Display for DealState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            DealState::Pending => "pending",
            DealState::Active => "active",
            DealState::Failed => "failed",
            DealState::Unknown => "unknown",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DealStatus {
    pub deal_id: String,
    #[serde(default, deserialize_with = "deserialize_state")]
    pub status: DealState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// `null` is treated the same as a missing status
fn deserialize_state<'de, D>(deserializer: D) -> Result<DealState, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<DealState>::deserialize(deserializer)?.unwrap_or_default())
}

/// Options accepted by file upload
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
}

/// Result of a file upload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadReceipt {
    pub deal_id: String,
    pub cid: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deal_create_request_wire_format() {
        let req = DealCreateRequest::new("bafy123", 1024, NonZeroU32::new(3).unwrap());
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value, json!({"fileCid": "bafy123", "size": 1024, "replication": 3}));
    }

    #[test]
    fn test_zero_replication_is_rejected_on_decode() {
        let result: Result<DealCreateRequest, _> =
            serde_json::from_value(json!({"fileCid": "bafy", "size": 1, "replication": 0}));
        assert!(result.is_err());
    }

    #[test]
    fn test_deal_status_known_states() {
        let status: DealStatus =
            serde_json::from_value(json!({"dealId": "d1", "status": "active"})).unwrap();
        assert_eq!(status.deal_id, "d1");
        assert_eq!(status.status, DealState::Active);
        assert_eq!(status.message, None);
    }

    #[test]
    fn test_deal_status_unrecognized_or_absent_state_is_unknown() {
        let status: DealStatus = serde_json::from_value(
            json!({"dealId": "d2", "status": "sealing", "message": "in progress"}),
        )
        .unwrap();
        assert_eq!(status.status, DealState::Unknown);
        assert_eq!(status.message.as_deref(), Some("in progress"));

        let status: DealStatus = serde_json::from_value(json!({"dealId": "d3"})).unwrap();
        assert_eq!(status.status, DealState::Unknown);
    }

    #[test]
    fn test_deal_status_null_state_is_unknown() {
        let status: DealStatus =
            serde_json::from_value(json!({"dealId": "d1", "status": null})).unwrap();
        assert_eq!(status.status, DealState::Unknown);
    }

    #[test]
    fn test_deal_status_requires_deal_id() {
        let result: Result<DealStatus, _> = serde_json::from_value(json!({"status": "pending"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_api_error_from_response_message() {
        let err = ApiError::from_response(404, Some(json!({"message": "not found"})));
        assert_eq!(err.status, 404);
        assert_eq!(err.message, "not found");
        assert_eq!(err.details, Some(json!({"message": "not found"})));
        assert!(!err.is_timeout());
    }

    #[test]
    fn test_api_error_generic_message() {
        let err = ApiError::from_response(500, None);
        assert_eq!(err.message, GENERIC_API_ERROR_MESSAGE);
        assert_eq!(err.details, None);

        // Non-string message is ignored
        let err = ApiError::from_response(400, Some(json!({"message": 42})));
        assert_eq!(err.message, GENERIC_API_ERROR_MESSAGE);
    }

    #[test]
    fn test_api_error_timeout() {
        let err = ApiError::timeout();
        assert_eq!(err.status, 0);
        assert_eq!(err.message, TIMEOUT_MESSAGE);
        assert!(err.is_timeout());
    }
}
