//! Wizard configuration

/// 5 MiB
pub const DEFAULT_MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// Image MIME types accepted by default
pub const DEFAULT_ALLOWED_MIME_TYPES: &[&str] = &["image/jpeg", "image/png", "image/webp", "image/gif"];

pub const DEFAULT_MAX_PREVIEW_HANDLES: usize = 32;

pub const DEFAULT_MAX_IMAGES: usize = 10;

/// Wizard limits
///
/// # Environment variables
///
/// Every field can be overridden from the environment:
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | WIZARD_MAX_IMAGE_BYTES | 5242880 | Max size of one image file |
/// | WIZARD_ALLOWED_MIME_TYPES | image/jpeg,image/png,image/webp,image/gif | Comma-separated MIME allow-list |
/// | WIZARD_MAX_PREVIEW_HANDLES | 32 | Preview handles the host can hold at once |
/// | WIZARD_MAX_IMAGES | 10 | Images per product |
///
/// Unparseable values fall back to the default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WizardConfig {
    /// Upper bound (inclusive) for a single image file, in bytes
    pub max_image_bytes: usize,
    /// Lower-case MIME types accepted by `add_image`
    pub allowed_mime_types: Vec<String>,
    /// Capacity of the preview handle pool
    pub max_preview_handles: usize,
    /// Max images per product
    pub max_images: usize,
}

impl WizardConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_image_bytes: std::env::var("WIZARD_MAX_IMAGE_BYTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_image_bytes),
            allowed_mime_types: std::env::var("WIZARD_ALLOWED_MIME_TYPES")
                .ok()
                .map(|v| parse_mime_list(&v))
                .filter(|list| !list.is_empty())
                .unwrap_or(defaults.allowed_mime_types),
            max_preview_handles: std::env::var("WIZARD_MAX_PREVIEW_HANDLES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_preview_handles),
            max_images: std::env::var("WIZARD_MAX_IMAGES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_images),
        }
    }

    /// Set the per-file size limit
    pub fn with_max_image_bytes(mut self, bytes: usize) -> Self {
        self.max_image_bytes = bytes;
        self
    }

    /// Set the preview pool capacity
    pub fn with_max_preview_handles(mut self, handles: usize) -> Self {
        self.max_preview_handles = handles;
        self
    }

    /// Set the per-product image limit
    pub fn with_max_images(mut self, images: usize) -> Self {
        self.max_images = images;
        self
    }

    /// Whether `mime_type` is on the allow-list (case-insensitive)
    pub fn accepts_mime(&self, mime_type: &str) -> bool {
        let mime = mime_type.trim().to_ascii_lowercase();
        self.allowed_mime_types.iter().any(|m| *m == mime)
    }
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            max_image_bytes: DEFAULT_MAX_IMAGE_BYTES,
            allowed_mime_types: DEFAULT_ALLOWED_MIME_TYPES
                .iter()
                .map(|m| m.to_string())
                .collect(),
            max_preview_handles: DEFAULT_MAX_PREVIEW_HANDLES,
            max_images: DEFAULT_MAX_IMAGES,
        }
    }
}

fn parse_mime_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|m| m.trim().to_ascii_lowercase())
        .filter(|m| !m.is_empty())
        .collect()
}
