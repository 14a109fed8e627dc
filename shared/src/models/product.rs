//! Product Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Product availability status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ProductStatus {
    #[default]
    Active,
    Inactive,
}

/// Product type; books carry an extra detail record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductType {
    #[default]
    General,
    Book,
}

/// Book detail payload. Empty fields are left out of the request body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub isbn: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publish_year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_count: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

impl BookPayload {
    pub fn is_empty(&self) -> bool {
        self.isbn.is_none()
            && self.description.is_none()
            && self.publish_year.is_none()
            && self.page_count.is_none()
            && self.language.is_none()
    }
}

/// Create product payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductCreate {
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub status: ProductStatus,
    pub product_type: ProductType,
    /// Category ids, ascending
    pub category_ids: Vec<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub book: Option<BookPayload>,
}

/// Response body of a successful product creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductCreated {
    pub id: i64,
}
