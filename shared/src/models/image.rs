//! Product Image Model

use serde::{Deserialize, Serialize};

/// Response body of a successful product image upload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageUploaded {
    pub id: i64,
    pub is_primary: bool,
    pub sort_order: i32,
}
