//! Product draft
//!
//! The in-progress product a wizard session edits. Numeric inputs are kept
//! as the raw text the user typed; they are parsed by validation and by
//! payload assembly.

use crate::category::CategorySelection;
use crate::config::WizardConfig;
use crate::images::{ImageCollection, PreviewPool};
use serde::{Deserialize, Serialize};
use shared::models::{BookPayload, ProductStatus, ProductType};

/// Editable book detail fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookField {
    Isbn,
    Description,
    PublishYear,
    PageCount,
    Language,
}

impl BookField {
    /// Error map / payload key of this field
    pub const fn key(&self) -> &'static str {
        match self {
            BookField::Isbn => "isbn",
            BookField::Description => "description",
            BookField::PublishYear => "publish_year",
            BookField::PageCount => "page_count",
            BookField::Language => "language",
        }
    }
}

/// Book details as typed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookDraft {
    pub isbn: String,
    pub description: String,
    pub publish_year: String,
    pub page_count: String,
    pub language: String,
}

impl BookDraft {
    pub fn get(&self, field: BookField) -> &str {
        match field {
            BookField::Isbn => &self.isbn,
            BookField::Description => &self.description,
            BookField::PublishYear => &self.publish_year,
            BookField::PageCount => &self.page_count,
            BookField::Language => &self.language,
        }
    }

    pub fn set(&mut self, field: BookField, value: impl Into<String>) {
        let slot = match field {
            BookField::Isbn => &mut self.isbn,
            BookField::Description => &mut self.description,
            BookField::PublishYear => &mut self.publish_year,
            BookField::PageCount => &mut self.page_count,
            BookField::Language => &mut self.language,
        };
        *slot = value.into();
    }

    /// Minimal payload: blank fields are dropped, and `None` if nothing is left.
    ///
    /// Numeric fields that do not parse are dropped too; validation rejects
    /// them before a payload is ever built.
    pub fn to_payload(&self) -> Option<BookPayload> {
        let payload = BookPayload {
            isbn: non_blank(&self.isbn),
            description: non_blank(&self.description),
            publish_year: self.publish_year.trim().parse().ok(),
            page_count: self.page_count.trim().parse().ok(),
            language: non_blank(&self.language),
        };
        (!payload.is_empty()).then_some(payload)
    }
}

fn non_blank(s: &str) -> Option<String> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Product being built by a wizard session
#[derive(Debug)]
pub struct ProductDraft {
    pub name: String,
    /// Price as typed; see [`crate::validation::parse_price`]
    pub price: String,
    pub status: ProductStatus,
    pub product_type: ProductType,
    pub categories: CategorySelection,
    /// Kept when switching back to a general product, but not submitted
    pub book: BookDraft,
    pub images: ImageCollection,
}

impl ProductDraft {
    /// Empty draft drawing preview handles from `pool`
    pub fn new(pool: PreviewPool, config: &WizardConfig) -> Self {
        Self {
            name: String::new(),
            price: String::new(),
            status: ProductStatus::default(),
            product_type: ProductType::default(),
            categories: CategorySelection::new(),
            book: BookDraft::default(),
            images: ImageCollection::new(pool, config),
        }
    }

    pub fn is_book(&self) -> bool {
        self.product_type == ProductType::Book
    }

    /// Book payload to submit; always `None` for general products
    pub fn book_payload(&self) -> Option<BookPayload> {
        if self.is_book() {
            self.book.to_payload()
        } else {
            None
        }
    }
}
