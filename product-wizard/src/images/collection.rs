//! Image Collection
//!
//! Ordered list of image drafts with two invariants kept after every call:
//! - exactly one image is primary iff the list is non-empty
//! - `sort_order` equals the list position (0..n-1)
//!
//! Each draft owns one preview handle. Handles are released on `remove`,
//! on `release_all`, and when the collection is dropped.

use super::{FileHandle, PreviewError, PreviewHandle, PreviewPool};
use crate::config::WizardConfig;
use shared::error::ErrorCode;
use thiserror::Error;
use uuid::Uuid;

/// Image collection errors. None of them mutate the collection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImageError {
    #[error("{name} is empty")]
    EmptyFile { name: String },

    #[error("{name} is too large ({size} bytes, max {max} bytes)")]
    TooLarge { name: String, size: usize, max: usize },

    #[error("{name} has unsupported type '{mime_type}'")]
    UnsupportedType { name: String, mime_type: String },

    #[error("A product can have at most {max} images")]
    TooManyImages { max: usize },

    #[error(transparent)]
    Preview(#[from] PreviewError),

    #[error("Image {0} not found")]
    NotFound(Uuid),

    #[error("Image position {index} is out of range (have {len})")]
    IndexOutOfRange { index: usize, len: usize },
}

impl ImageError {
    /// Storefront error code for this rejection
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::EmptyFile { .. } => ErrorCode::EmptyFile,
            Self::TooLarge { .. } => ErrorCode::FileTooLarge,
            Self::UnsupportedType { .. } => ErrorCode::UnsupportedFileFormat,
            Self::TooManyImages { .. } => ErrorCode::TooManyImages,
            Self::Preview(_) => ErrorCode::PreviewUnavailable,
            Self::NotFound(_) => ErrorCode::NotFound,
            Self::IndexOutOfRange { .. } => ErrorCode::ValueOutOfRange,
        }
    }
}

/// One image waiting to be uploaded
#[derive(Debug)]
pub struct ImageDraft {
    id: Uuid,
    file: FileHandle,
    preview: Option<PreviewHandle>,
    is_primary: bool,
    sort_order: i32,
}

impl ImageDraft {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn file(&self) -> &FileHandle {
        &self.file
    }

    /// Preview URI; `None` once the handle has been released
    pub fn preview_uri(&self) -> Option<&str> {
        self.preview.as_ref().map(PreviewHandle::uri)
    }

    pub fn is_primary(&self) -> bool {
        self.is_primary
    }

    pub fn sort_order(&self) -> i32 {
        self.sort_order
    }
}

/// Ordered image drafts of one product
#[derive(Debug)]
pub struct ImageCollection {
    images: Vec<ImageDraft>,
    pool: PreviewPool,
    limits: WizardConfig,
}

impl ImageCollection {
    pub fn new(pool: PreviewPool, config: &WizardConfig) -> Self {
        Self {
            images: Vec::new(),
            pool,
            limits: config.clone(),
        }
    }

    /// Append an image.
    ///
    /// The file is checked before a preview handle is allocated, so a
    /// rejected file never holds a handle. The first image becomes primary.
    pub fn add(&mut self, file: FileHandle) -> Result<&ImageDraft, ImageError> {
        self.check_file(&file)?;
        let sort_order = i32::try_from(self.images.len())
            .map_err(|_| ImageError::TooManyImages {
                max: self.limits.max_images,
            })?;
        let preview = self.pool.create(&file)?;

        let image = ImageDraft {
            id: Uuid::new_v4(),
            is_primary: self.images.is_empty(),
            sort_order,
            preview: Some(preview),
            file,
        };
        tracing::debug!(
            image_id = %image.id,
            name = %image.file.name(),
            size = image.file.size(),
            is_primary = image.is_primary,
            "Image added"
        );
        self.images.push(image);
        Ok(&self.images[self.images.len() - 1])
    }

    fn check_file(&self, file: &FileHandle) -> Result<(), ImageError> {
        if file.size() == 0 {
            return Err(ImageError::EmptyFile {
                name: file.name().to_string(),
            });
        }
        if file.size() > self.limits.max_image_bytes {
            return Err(ImageError::TooLarge {
                name: file.name().to_string(),
                size: file.size(),
                max: self.limits.max_image_bytes,
            });
        }
        if !self.limits.accepts_mime(file.mime_type()) {
            return Err(ImageError::UnsupportedType {
                name: file.name().to_string(),
                mime_type: file.mime_type().to_string(),
            });
        }
        if self.images.len() >= self.limits.max_images {
            return Err(ImageError::TooManyImages {
                max: self.limits.max_images,
            });
        }
        Ok(())
    }

    /// Remove an image and release its preview.
    ///
    /// If the removed image was primary, the new first image is promoted.
    pub fn remove(&mut self, id: Uuid) -> Result<(), ImageError> {
        let pos = self.position(id)?;
        let mut removed = self.images.remove(pos);
        self.release(&mut removed);

        if removed.is_primary
            && let Some(first) = self.images.first_mut()
        {
            first.is_primary = true;
        }
        self.renumber();
        Ok(())
    }

    /// Make `id` the only primary image. Already-primary is a no-op.
    pub fn set_primary(&mut self, id: Uuid) -> Result<(), ImageError> {
        self.position(id)?;
        for image in &mut self.images {
            image.is_primary = image.id == id;
        }
        Ok(())
    }

    /// Move the image at `from` to position `to`. Primary flags are untouched.
    pub fn reorder(&mut self, from: usize, to: usize) -> Result<(), ImageError> {
        let len = self.images.len();
        for index in [from, to] {
            if index >= len {
                return Err(ImageError::IndexOutOfRange { index, len });
            }
        }
        let image = self.images.remove(from);
        self.images.insert(to, image);
        self.renumber();
        Ok(())
    }

    /// Release every preview handle still held. Returns how many were released.
    ///
    /// The images themselves stay; calling this again releases nothing.
    pub fn release_all(&mut self) -> usize {
        let mut released = 0;
        for image in &mut self.images {
            if release_preview(&self.pool, image) {
                released += 1;
            }
        }
        released
    }

    fn release(&self, image: &mut ImageDraft) -> bool {
        release_preview(&self.pool, image)
    }

    fn position(&self, id: Uuid) -> Result<usize, ImageError> {
        self.images
            .iter()
            .position(|image| image.id == id)
            .ok_or(ImageError::NotFound(id))
    }

    fn renumber(&mut self) {
        for (image, sort_order) in self.images.iter_mut().zip(0..) {
            image.sort_order = sort_order;
        }
    }

    pub fn images(&self) -> &[ImageDraft] {
        &self.images
    }

    pub fn get(&self, id: Uuid) -> Option<&ImageDraft> {
        self.images.iter().find(|image| image.id == id)
    }

    pub fn primary(&self) -> Option<&ImageDraft> {
        self.images.iter().find(|image| image.is_primary)
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// The pool this collection draws preview handles from
    pub fn pool(&self) -> &PreviewPool {
        &self.pool
    }
}

impl Drop for ImageCollection {
    fn drop(&mut self) {
        let released = self.release_all();
        if released > 0 {
            tracing::debug!(released, "Released preview handles on drop");
        }
    }
}

/// Take the handle out of `image` and revoke it. `false` if it was already released.
fn release_preview(pool: &PreviewPool, image: &mut ImageDraft) -> bool {
    let Some(handle) = image.preview.take() else {
        return false;
    };
    if let Err(e) = pool.revoke(handle) {
        tracing::warn!(image_id = %image.id, error = %e, "Preview handle revoke failed");
    }
    true
}
