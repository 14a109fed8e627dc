//! External collaborators
//!
//! The wizard never talks to the network itself. The host passes in
//! implementations of these traits; `shop-client` provides HTTP ones and the
//! tests provide in-memory fakes.

use crate::images::FileHandle;
use crate::validation::FieldErrors;
use async_trait::async_trait;
use shared::error::AppError;
use shared::models::{CategoryRecord, ProductCreate};
use thiserror::Error;

/// Source of the category list shown in the picker
#[async_trait]
pub trait CategorySource: Send + Sync {
    async fn fetch_categories(&self) -> Result<Vec<CategoryRecord>, AppError>;
}

/// Product creation endpoint
#[async_trait]
pub trait ProductGateway: Send + Sync {
    /// Create the product and return its id
    async fn create_product(&self, payload: &ProductCreate) -> Result<i64, CreateRejection>;
}

/// Image upload endpoint
#[async_trait]
pub trait ImageUploader: Send + Sync {
    /// Attach one image to an existing product and return the image id
    async fn upload_image(
        &self,
        product_id: i64,
        file: &FileHandle,
        is_primary: bool,
        sort_order: i32,
    ) -> Result<i64, AppError>;
}

/// Product creation refused, optionally with per-field reasons
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct CreateRejection {
    pub message: String,
    pub field_errors: FieldErrors,
}

impl CreateRejection {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            field_errors: FieldErrors::new(),
        }
    }

    pub fn with_field(mut self, field: impl Into<String>, message: impl Into<String>) -> Self {
        self.field_errors.insert(field, message);
        self
    }
}

impl From<AppError> for CreateRejection {
    fn from(err: AppError) -> Self {
        Self {
            field_errors: err.field_messages().into(),
            message: err.message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::error::ErrorCode;

    #[test]
    fn test_rejection_from_app_error_keeps_string_details() {
        let err = AppError::with_message(ErrorCode::ProductNameExists, "Name already in use")
            .with_detail("name", "A product with this name exists")
            .with_detail("existing_id", 17);

        let rejection = CreateRejection::from(err);
        assert_eq!(rejection.message, "Name already in use");
        assert_eq!(rejection.field_errors.len(), 1);
        assert_eq!(
            rejection.field_errors.get("name"),
            Some("A product with this name exists")
        );
    }

    #[test]
    fn test_rejection_without_details() {
        let rejection = CreateRejection::from(AppError::network("connection refused"));
        assert_eq!(rejection.to_string(), "connection refused");
        assert!(rejection.field_errors.is_empty());
    }
}
