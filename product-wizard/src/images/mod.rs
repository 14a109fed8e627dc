//! Product images: file payloads, preview handles and the ordered collection

mod collection;
mod file;
mod preview;

pub use collection::{ImageCollection, ImageDraft, ImageError};
pub use file::FileHandle;
pub use preview::{PreviewError, PreviewHandle, PreviewPool};
