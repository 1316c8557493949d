//! Image Code Records

use karat::photos::PhotoCode;
use serde::{Deserialize, Serialize};

/// Table mapping photo codes to object names.
pub const IMAGE_CODES_TABLE: &str = "image_codes";

/// Image code row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageCodeRecord {
    pub image_name: String,
    pub code: PhotoCode,
}
