//! Wizard controller
//!
//! Owns the draft, the current step and the visible error map. Every user
//! action is a synchronous method call; the only awaits are the category
//! fetch in [`WizardController::open`] and the create + upload sequence in
//! [`WizardController::submit`].

use super::payload::build_payload;
use super::{Notice, SubmitOutcome, WizardStep};
use crate::category::{CategorySelection, CategoryTree};
use crate::collab::{CategorySource, ImageUploader, ProductGateway};
use crate::config::WizardConfig;
use crate::draft::{BookField, ProductDraft};
use crate::images::{FileHandle, ImageDraft, ImageError, PreviewPool};
use crate::validation::{self, FieldErrors, FIELD_CATEGORIES, FIELD_IMAGES, FIELD_NAME, FIELD_PRICE};
use futures::future::join_all;
use shared::models::{CategoryRecord, ProductStatus, ProductType};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Read-only snapshot for rendering
#[derive(Debug, Clone, Copy)]
pub struct WizardState<'a> {
    pub step: WizardStep,
    pub draft: &'a ProductDraft,
    pub errors: &'a FieldErrors,
}

/// Product creation wizard session
#[derive(Debug)]
pub struct WizardController {
    config: WizardConfig,
    pool: PreviewPool,
    tree: CategoryTree,
    step: WizardStep,
    draft: ProductDraft,
    errors: FieldErrors,
}

impl WizardController {
    /// Fresh session with an empty draft and an empty category tree
    pub fn new(config: WizardConfig, pool: PreviewPool) -> Self {
        let draft = ProductDraft::new(pool.clone(), &config);
        Self {
            config,
            pool,
            tree: CategoryTree::default(),
            step: WizardStep::BasicInfo,
            draft,
            errors: FieldErrors::new(),
        }
    }

    /// Session for a product that already has categories
    pub fn for_existing(
        config: WizardConfig,
        pool: PreviewPool,
        category_ids: impl IntoIterator<Item = i64>,
    ) -> Self {
        let mut wizard = Self::new(config, pool);
        wizard.draft.categories = CategorySelection::seeded(category_ids);
        wizard
    }

    /// Load categories. A failed fetch leaves the tree empty and returns a banner.
    pub async fn open(&mut self, source: &dyn CategorySource) -> Option<Notice> {
        match source.fetch_categories().await {
            Ok(records) => {
                self.refresh_categories(records);
                info!(categories = self.tree.len(), "Wizard opened");
                None
            }
            Err(e) => {
                warn!(code = %e.code, error = %e, "Failed to load categories");
                self.tree = CategoryTree::default();
                Some(Notice::warning(format!(
                    "Categories could not be loaded: {}",
                    e.message
                )))
            }
        }
    }

    /// Rebuild the tree from a new record list. The selection is kept as-is.
    pub fn refresh_categories(&mut self, records: Vec<CategoryRecord>) {
        self.tree = CategoryTree::build(records);
    }

    // ========== Read access ==========

    pub fn state(&self) -> WizardState<'_> {
        WizardState {
            step: self.step,
            draft: &self.draft,
            errors: &self.errors,
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn draft(&self) -> &ProductDraft {
        &self.draft
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn tree(&self) -> &CategoryTree {
        &self.tree
    }

    pub fn config(&self) -> &WizardConfig {
        &self.config
    }

    // ========== Field edits ==========

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.draft.name = name.into();
        self.errors.remove(FIELD_NAME);
    }

    pub fn set_price(&mut self, price: impl Into<String>) {
        self.draft.price = price.into();
        self.errors.remove(FIELD_PRICE);
    }

    pub fn set_status(&mut self, status: ProductStatus) {
        self.draft.status = status;
    }

    /// Switch product type. Book fields typed so far are kept but only
    /// submitted for book products.
    pub fn set_product_type(&mut self, product_type: ProductType) {
        self.draft.product_type = product_type;
        if product_type == ProductType::General {
            for field in [
                BookField::Isbn,
                BookField::PublishYear,
                BookField::PageCount,
                BookField::Language,
            ] {
                self.errors.remove(field.key());
            }
        }
    }

    pub fn set_book_field(&mut self, field: BookField, value: impl Into<String>) {
        self.draft.book.set(field, value);
        self.errors.remove(field.key());
    }

    // ========== Categories ==========

    /// Toggle a category; returns whether it is selected afterwards
    pub fn toggle_category(&mut self, id: i64) -> bool {
        self.errors.remove(FIELD_CATEGORIES);
        self.draft.categories.toggle(id, &self.tree)
    }

    // ========== Images ==========

    pub fn add_image(&mut self, file: FileHandle) -> Result<Uuid, ImageError> {
        let result = self.draft.images.add(file).map(ImageDraft::id);
        self.track_image_result(result)
    }

    pub fn remove_image(&mut self, id: Uuid) -> Result<(), ImageError> {
        let result = self.draft.images.remove(id);
        self.track_image_result(result)
    }

    pub fn set_primary_image(&mut self, id: Uuid) -> Result<(), ImageError> {
        let result = self.draft.images.set_primary(id);
        self.track_image_result(result)
    }

    pub fn reorder_images(&mut self, from: usize, to: usize) -> Result<(), ImageError> {
        let result = self.draft.images.reorder(from, to);
        self.track_image_result(result)
    }

    fn track_image_result<T>(&mut self, result: Result<T, ImageError>) -> Result<T, ImageError> {
        match &result {
            Ok(_) => {
                self.errors.remove(FIELD_IMAGES);
            }
            Err(e) => {
                warn!(code = %e.code(), error = %e, "Image action rejected");
                self.errors.insert(FIELD_IMAGES, e.to_string());
            }
        }
        result
    }

    // ========== Navigation ==========

    /// Validate the current step and advance if it passes.
    ///
    /// Returns `true` if the step changed.
    pub fn next(&mut self) -> bool {
        let errors = validation::validate(self.step, &self.draft);
        if !errors.is_empty() {
            warn!(step = ?self.step, fields = errors.len(), "Step validation failed");
            self.errors = errors;
            return false;
        }

        self.errors.clear();
        match self.step.next(self.draft.product_type) {
            Some(next) => {
                info!(from = ?self.step, to = ?next, "Wizard step advanced");
                self.step = next;
                true
            }
            None => false,
        }
    }

    /// Go back one step without validating. Returns `true` if the step changed.
    pub fn prev(&mut self) -> bool {
        self.errors.clear();
        match self.step.prev(self.draft.product_type) {
            Some(prev) => {
                debug!(from = ?self.step, to = ?prev, "Wizard step back");
                self.step = prev;
                true
            }
            None => false,
        }
    }

    /// Jump straight to `step` without validating.
    ///
    /// `BookDetails` is refused for general products; returns `false` then.
    pub fn go_to(&mut self, step: WizardStep) -> bool {
        if !step.applies_to(self.draft.product_type) {
            return false;
        }
        debug!(from = ?self.step, to = ?step, "Wizard step jump");
        self.errors.clear();
        self.step = step;
        true
    }

    // ========== Submit / reset ==========

    /// Create the product, then upload its images concurrently.
    ///
    /// Only allowed from `Review`. On success the draft is reset; on any
    /// failure it is kept so the user can fix and retry.
    pub async fn submit(
        &mut self,
        gateway: &dyn ProductGateway,
        uploader: &dyn ImageUploader,
    ) -> SubmitOutcome {
        if self.step != WizardStep::Review {
            warn!(step = ?self.step, "Submit attempted before review");
            return SubmitOutcome::NotReady;
        }

        let errors = validation::validate_for_submit(&self.draft);
        let payload = if errors.is_empty() {
            build_payload(&self.draft)
        } else {
            Err(errors)
        };
        let payload = match payload {
            Ok(payload) => payload,
            Err(errors) => {
                warn!(fields = errors.len(), "Submit blocked by validation");
                self.errors = errors.clone();
                return SubmitOutcome::Invalid { errors };
            }
        };

        info!(
            name = %payload.name,
            product_type = ?payload.product_type,
            categories = payload.category_ids.len(),
            images = self.draft.images.len(),
            "Submitting product"
        );

        let product_id = match gateway.create_product(&payload).await {
            Ok(id) => id,
            Err(rejection) => {
                warn!(error = %rejection, fields = rejection.field_errors.len(), "Product create rejected");
                self.errors.merge(rejection.field_errors);
                return SubmitOutcome::Rejected {
                    message: rejection.message,
                    errors: self.errors.clone(),
                };
            }
        };
        info!(product_id, "Product created");

        let (uploaded, failed) = upload_images(product_id, self.draft.images.images(), uploader).await;
        info!(product_id, uploaded, failed, "Image uploads finished");

        self.reset();
        SubmitOutcome::Created {
            product_id,
            uploaded,
            failed,
        }
    }

    /// Release every preview handle, discard the draft and start over
    pub fn reset(&mut self) {
        let released = self.draft.images.release_all();
        self.draft = ProductDraft::new(self.pool.clone(), &self.config);
        self.step = WizardStep::BasicInfo;
        self.errors.clear();
        debug!(released, "Wizard reset");
    }

    /// User closed the wizard
    pub fn cancel(&mut self) {
        info!(step = ?self.step, images = self.draft.images.len(), "Wizard cancelled");
        self.reset();
    }
}

/// Upload every image at once and count the results. Failures do not stop the others.
async fn upload_images(
    product_id: i64,
    images: &[ImageDraft],
    uploader: &dyn ImageUploader,
) -> (usize, usize) {
    let uploads = images.iter().map(|image| async move {
        let result = uploader
            .upload_image(product_id, image.file(), image.is_primary(), image.sort_order())
            .await;
        (image, result)
    });

    let mut uploaded = 0;
    let mut failed = 0;
    for (image, result) in join_all(uploads).await {
        match result {
            Ok(remote_id) => {
                debug!(image_id = %image.id(), remote_id, "Image uploaded");
                uploaded += 1;
            }
            Err(e) => {
                warn!(
                    image_id = %image.id(),
                    name = %image.file().name(),
                    code = %e.code,
                    error = %e,
                    "Image upload failed"
                );
                failed += 1;
            }
        }
    }
    (uploaded, failed)
}
