//! File input boundary: turns an uploaded file into a `data:` URI that the
//! academy stores as an opaque string. File bytes are never inspected.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

const FALLBACK_MIME: &str = "application/octet-stream";

/// Which form field the upload is meant for.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum UploadSlot {
    #[default]
    Image,
    Document,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct UploadedFile {
    pub data_uri: String,
    pub file_name: String,
    pub file_type: String,
    pub size_bytes: usize,
}

pub fn to_data_uri(mime: &str, bytes: &[u8]) -> String {
    format!("data:{mime};base64,{}", STANDARD.encode(bytes))
}

/// Image slots only take `image/*`; documents accept anything.
pub fn check_slot(slot: UploadSlot, mime: &str) -> Result<(), AppError> {
    if slot == UploadSlot::Image && !mime.starts_with("image/") {
        return Err(AppError::Validation(
            "Please select an image file (JPEG, PNG, GIF, etc.)".to_string(),
        ));
    }
    Ok(())
}

pub fn encode_upload(
    slot: UploadSlot,
    file_name: Option<&str>,
    mime: Option<&str>,
    bytes: &[u8],
) -> Result<UploadedFile, AppError> {
    let mime = mime.filter(|m| !m.is_empty()).unwrap_or(FALLBACK_MIME);
    check_slot(slot, mime)?;
    if bytes.is_empty() {
        return Err(AppError::Validation("Uploaded file is empty".to_string()));
    }
    Ok(UploadedFile {
        data_uri: to_data_uri(mime, bytes),
        file_name: file_name.unwrap_or("upload").to_string(),
        file_type: mime.to_string(),
        size_bytes: bytes.len(),
    })
}
