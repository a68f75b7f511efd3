//! VaultX Core Library
//!
//! Wire and configuration types shared by the VaultX SDK:
//! - Client configuration and its validation
//! - Deal request/response payloads
//! - The normalized API error shape

pub mod config;
pub mod models;

// Re-export commonly used types
pub use config::{ClientConfig, ConfigError, DEFAULT_TIMEOUT_MS};
pub use models::*;
