//! Values the controller hands back to the host instead of showing UI itself

use crate::validation::FieldErrors;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// Non-fatal banner for the host to display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

/// Result of [`WizardController::submit`](super::WizardController::submit)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Submit was attempted before reaching the review step
    NotReady,
    /// Final validation failed; nothing was sent
    Invalid { errors: FieldErrors },
    /// The product was refused; the draft is untouched
    Rejected { message: String, errors: FieldErrors },
    /// The product exists. Some image uploads may have failed.
    Created {
        product_id: i64,
        uploaded: usize,
        failed: usize,
    },
}

impl SubmitOutcome {
    pub fn is_created(&self) -> bool {
        matches!(self, SubmitOutcome::Created { .. })
    }

    /// Summary line for the user
    pub fn message(&self) -> String {
        match self {
            SubmitOutcome::NotReady => "Review the product before submitting".to_string(),
            SubmitOutcome::Invalid { errors } => {
                format!("Please fix {} field(s) before submitting", errors.len())
            }
            SubmitOutcome::Rejected { message, .. } => {
                format!("Product could not be created: {message}")
            }
            SubmitOutcome::Created {
                uploaded, failed: 0, ..
            } if *uploaded == 0 => "Product created".to_string(),
            SubmitOutcome::Created {
                uploaded, failed: 0, ..
            } => format!("Product created with {uploaded} image(s)"),
            SubmitOutcome::Created {
                uploaded, failed, ..
            } => format!(
                "Product created, but {failed} of {} image(s) failed to upload",
                uploaded + failed
            ),
        }
    }

    /// The notice a host would show for this outcome
    pub fn notice(&self) -> Notice {
        match self {
            SubmitOutcome::Created { failed: 0, .. } => Notice::info(self.message()),
            SubmitOutcome::Created { .. } | SubmitOutcome::NotReady => {
                Notice::warning(self.message())
            }
            SubmitOutcome::Invalid { .. } | SubmitOutcome::Rejected { .. } => {
                Notice::error(self.message())
            }
        }
    }
}
