//! Product creation wizard core
//!
//! A multi-step form state machine for creating catalog products, plus the
//! two engines it drives:
//!
//! - [`category`]: an arena-indexed category tree and the selection set kept
//!   consistent with it (selecting pulls in ancestors, deselecting cascades
//!   to descendants).
//! - [`images`]: the ordered image collection with its single-primary
//!   invariant and the revocable preview handles it owns.
//!
//! [`WizardController`] sequences the steps, gates them with
//! [`validation`], and on submit talks to the outside world only through the
//! traits in [`collab`]. Nothing in this crate performs I/O by itself.

pub mod category;
pub mod collab;
pub mod config;
pub mod draft;
pub mod images;
pub mod validation;
pub mod wizard;

pub use category::{CategorySelection, CategoryTree};
pub use collab::{CategorySource, CreateRejection, ImageUploader, ProductGateway};
pub use config::WizardConfig;
pub use draft::{BookDraft, BookField, ProductDraft};
pub use images::{FileHandle, ImageCollection, ImageDraft, ImageError, PreviewPool};
pub use validation::FieldErrors;
pub use wizard::{Notice, NoticeLevel, SubmitOutcome, WizardController, WizardState, WizardStep};
