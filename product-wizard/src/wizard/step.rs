//! Wizard steps

use serde::{Deserialize, Serialize};
use shared::models::ProductType;
use std::fmt;

/// Wizard step, in order.
///
/// `BookDetails` only applies to book products and is passed over in both
/// directions for general products.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WizardStep {
    #[default]
    BasicInfo,
    Categories,
    BookDetails,
    Images,
    Review,
}

impl WizardStep {
    pub const ALL: [WizardStep; 5] = [
        WizardStep::BasicInfo,
        WizardStep::Categories,
        WizardStep::BookDetails,
        WizardStep::Images,
        WizardStep::Review,
    ];

    /// Following step for `product_type`; `None` at `Review`
    pub fn next(self, product_type: ProductType) -> Option<WizardStep> {
        let next = match self {
            WizardStep::BasicInfo => WizardStep::Categories,
            WizardStep::Categories => WizardStep::BookDetails,
            WizardStep::BookDetails => WizardStep::Images,
            WizardStep::Images => WizardStep::Review,
            WizardStep::Review => return None,
        };
        if next.applies_to(product_type) {
            Some(next)
        } else {
            next.next(product_type)
        }
    }

    /// Preceding step for `product_type`; `None` at `BasicInfo`
    pub fn prev(self, product_type: ProductType) -> Option<WizardStep> {
        let prev = match self {
            WizardStep::BasicInfo => return None,
            WizardStep::Categories => WizardStep::BasicInfo,
            WizardStep::BookDetails => WizardStep::Categories,
            WizardStep::Images => WizardStep::BookDetails,
            WizardStep::Review => WizardStep::Images,
        };
        if prev.applies_to(product_type) {
            Some(prev)
        } else {
            prev.prev(product_type)
        }
    }

    /// Whether this step is shown for `product_type`
    pub fn applies_to(self, product_type: ProductType) -> bool {
        self != WizardStep::BookDetails || product_type == ProductType::Book
    }

    pub const fn title(self) -> &'static str {
        match self {
            WizardStep::BasicInfo => "Basic info",
            WizardStep::Categories => "Categories",
            WizardStep::BookDetails => "Book details",
            WizardStep::Images => "Images",
            WizardStep::Review => "Review",
        }
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_book_walks_every_step() {
        let mut step = WizardStep::BasicInfo;
        let mut seen = vec![step];
        while let Some(next) = step.next(ProductType::Book) {
            seen.push(next);
            step = next;
        }
        assert_eq!(seen, WizardStep::ALL.to_vec());
    }

    #[test]
    fn test_general_skips_book_details() {
        assert_eq!(
            WizardStep::Categories.next(ProductType::General),
            Some(WizardStep::Images)
        );
        assert_eq!(
            WizardStep::Images.prev(ProductType::General),
            Some(WizardStep::Categories)
        );
        assert_eq!(
            WizardStep::Images.prev(ProductType::Book),
            Some(WizardStep::BookDetails)
        );
    }

    #[test]
    fn test_ends() {
        assert_eq!(WizardStep::Review.next(ProductType::Book), None);
        assert_eq!(WizardStep::BasicInfo.prev(ProductType::General), None);
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&WizardStep::BookDetails).unwrap();
        assert_eq!(json, "\"BOOK_DETAILS\"");
    }
}
