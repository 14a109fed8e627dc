//! Shop Client - HTTP adapter for the storefront API
//!
//! Implements the product wizard's collaborator traits over REST, plus the
//! logger setup used by the `create-product` binary.

pub mod config;
pub mod error;
pub mod http;
pub mod logger;

pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::HttpClient;

// Re-export shared types for convenience
pub use shared::error::{ApiResponse, AppError};
