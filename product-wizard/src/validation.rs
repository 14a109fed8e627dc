//! Step validation
//!
//! Pure functions from a draft to a field -> message map. An empty map means
//! the step passes. Only the requested step is evaluated.

use crate::draft::ProductDraft;
use crate::wizard::WizardStep;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;
use std::str::FromStr;

// ── Limits ──────────────────────────────────────────────────────────

/// Product names
pub const MAX_NAME_LEN: usize = 100;

/// ISBN-10/13 with separators
pub const MAX_ISBN_LEN: usize = 20;

/// Book language
pub const MAX_LANGUAGE_LEN: usize = 50;

// ── Field keys ──────────────────────────────────────────────────────

pub const FIELD_NAME: &str = "name";
pub const FIELD_PRICE: &str = "price";
pub const FIELD_CATEGORIES: &str = "category_ids";
pub const FIELD_ISBN: &str = "isbn";
pub const FIELD_PUBLISH_YEAR: &str = "publish_year";
pub const FIELD_PAGE_COUNT: &str = "page_count";
pub const FIELD_LANGUAGE: &str = "language";
pub const FIELD_IMAGES: &str = "images";

/// Field-level error messages, ordered by field key
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.insert(field.into(), message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn remove(&mut self, field: &str) -> Option<String> {
        self.0.remove(field)
    }

    /// Copy every entry of `other` over this map
    pub fn merge(&mut self, other: FieldErrors) {
        self.0.extend(other.0);
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    fn check(&mut self, field: &str, result: Result<(), String>) {
        if let Err(message) = result {
            self.insert(field, message);
        }
    }
}

impl From<BTreeMap<String, String>> for FieldErrors {
    fn from(map: BTreeMap<String, String>) -> Self {
        Self(map)
    }
}

impl FromIterator<(String, String)> for FieldErrors {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

// ── Step rules ──────────────────────────────────────────────────────

/// Validate the draft for one step
pub fn validate(step: WizardStep, draft: &ProductDraft) -> FieldErrors {
    match step {
        WizardStep::BasicInfo => validate_basic_info(draft),
        WizardStep::Categories => validate_categories(draft),
        WizardStep::BookDetails => validate_book_details(draft),
        WizardStep::Images | WizardStep::Review => FieldErrors::new(),
    }
}

/// Final gate before submit: basic info, categories and book details together
pub fn validate_for_submit(draft: &ProductDraft) -> FieldErrors {
    let mut errors = validate_basic_info(draft);
    errors.merge(validate_categories(draft));
    errors.merge(validate_book_details(draft));
    errors
}

pub fn validate_basic_info(draft: &ProductDraft) -> FieldErrors {
    let mut errors = FieldErrors::new();
    errors.check(FIELD_NAME, check_required_text(&draft.name, "Name", MAX_NAME_LEN));
    errors.check(FIELD_PRICE, parse_price(&draft.price).map(|_| ()));
    errors
}

pub fn validate_categories(draft: &ProductDraft) -> FieldErrors {
    let mut errors = FieldErrors::new();
    if draft.categories.is_empty() {
        errors.insert(FIELD_CATEGORIES, "Select at least one category");
    }
    errors
}

/// Book rules; always passes for general products
pub fn validate_book_details(draft: &ProductDraft) -> FieldErrors {
    let mut errors = FieldErrors::new();
    if !draft.is_book() {
        return errors;
    }

    let book = &draft.book;
    errors.check(FIELD_ISBN, check_optional_text(&book.isbn, "ISBN", MAX_ISBN_LEN));
    errors.check(
        FIELD_PUBLISH_YEAR,
        check_optional_positive_int(&book.publish_year, "Publish year"),
    );
    errors.check(
        FIELD_PAGE_COUNT,
        check_optional_positive_int(&book.page_count, "Page count"),
    );
    errors.check(
        FIELD_LANGUAGE,
        check_optional_text(&book.language, "Language", MAX_LANGUAGE_LEN),
    );
    errors
}

// ── Helpers ─────────────────────────────────────────────────────────

/// Parse a typed price. It must be present, numeric and greater than zero.
pub fn parse_price(raw: &str) -> Result<Decimal, String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err("Price is required".to_string());
    }
    let price = Decimal::from_str(raw).map_err(|_| "Price must be a number".to_string())?;
    if price <= Decimal::ZERO {
        return Err("Price must be greater than 0".to_string());
    }
    Ok(price)
}

fn check_required_text(value: &str, label: &str, max_len: usize) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("{label} must not be empty"));
    }
    check_optional_text(value, label, max_len)
}

fn check_optional_text(value: &str, label: &str, max_len: usize) -> Result<(), String> {
    let len = value.trim().chars().count();
    if len > max_len {
        return Err(format!("{label} is too long ({len} chars, max {max_len})"));
    }
    Ok(())
}

fn check_optional_positive_int(value: &str, label: &str) -> Result<(), String> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(());
    }
    match value.parse::<i32>() {
        Ok(n) if n >= 1 => Ok(()),
        Ok(_) => Err(format!("{label} must be at least 1")),
        Err(_) => Err(format!("{label} must be a whole number")),
    }
}
