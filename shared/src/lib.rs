//! Shared types for the storefront
//!
//! Wire models and the unified error system used by the product wizard
//! core and the storefront HTTP client.

pub mod error;
pub mod models;

// Re-exports
pub use error::{ApiResponse, AppError, AppResult, ErrorCode};
pub use serde::{Deserialize, Serialize};
