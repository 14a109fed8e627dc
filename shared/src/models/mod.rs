//! Data models
//!
//! Shared between the wizard core, the HTTP client and the storefront API.
//! All server-side IDs are `i64`.

pub mod category;
pub mod image;
pub mod product;

// Re-exports
pub use category::*;
pub use image::*;
pub use product::*;
