//! Create-product payload assembly

use crate::draft::ProductDraft;
use crate::validation::{self, FieldErrors, FIELD_PRICE};
use shared::models::ProductCreate;

/// Build the minimal create payload from a validated draft.
///
/// Name is trimmed, categories are sorted and the book record is present
/// only for book products with at least one filled-in field.
pub fn build_payload(draft: &ProductDraft) -> Result<ProductCreate, FieldErrors> {
    let price = validation::parse_price(&draft.price).map_err(|message| {
        let mut errors = FieldErrors::new();
        errors.insert(FIELD_PRICE, message);
        errors
    })?;

    Ok(ProductCreate {
        name: draft.name.trim().to_string(),
        price,
        status: draft.status,
        product_type: draft.product_type,
        category_ids: draft.categories.ids(),
        book: draft.book_payload(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::CategorySelection;
    use crate::config::WizardConfig;
    use crate::draft::BookField;
    use crate::images::PreviewPool;
    use rust_decimal::Decimal;
    use shared::models::ProductType;

    fn draft() -> ProductDraft {
        let mut draft = ProductDraft::new(PreviewPool::new(2), &WizardConfig::default());
        draft.name = "  Dune ".to_string();
        draft.price = "19.99".to_string();
        draft.categories = CategorySelection::seeded([7, 2, 5]);
        draft
    }

    #[test]
    fn test_general_payload() {
        let payload = build_payload(&draft()).unwrap();
        assert_eq!(payload.name, "Dune");
        assert_eq!(payload.price, Decimal::new(1999, 2));
        assert_eq!(payload.category_ids, vec![2, 5, 7]);
        assert!(payload.book.is_none());
    }

    #[test]
    fn test_book_payload_only_filled_fields() {
        let mut draft = draft();
        draft.product_type = ProductType::Book;
        draft.book.set(BookField::PublishYear, "1965");

        let json = serde_json::to_value(build_payload(&draft).unwrap()).unwrap();
        assert_eq!(json["book"], serde_json::json!({ "publish_year": 1965 }));
    }

    #[test]
    fn test_book_with_no_fields_is_omitted() {
        let mut draft = draft();
        draft.product_type = ProductType::Book;
        let payload = build_payload(&draft).unwrap();
        assert!(payload.book.is_none());
    }

    #[test]
    fn test_unparseable_price() {
        let mut draft = draft();
        draft.price = "free".to_string();
        let errors = build_payload(&draft).unwrap_err();
        assert!(errors.contains(FIELD_PRICE));
    }
}
