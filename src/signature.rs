//! Decoding of hand-drawn signature payloads.
//!
//! Signatures travel as inline data URLs. Only PNG is accepted; the payload
//! is base64-decoded and handed to [`ImageData::from_png`].

use base64::Engine;

use crate::writer::{ImageData, ImageError};

/// The only accepted data URL prefix.
pub const PNG_DATA_URL_PREFIX: &str = "data:image/png;base64,";

/// Decode a `data:image/png;base64,` URL into an embeddable image.
pub fn decode_data_url(data_url: &str) -> Result<ImageData, ImageError> {
    let payload = data_url
        .trim()
        .strip_prefix(PNG_DATA_URL_PREFIX)
        .ok_or_else(|| ImageError::UnsupportedDataUrl(describe_prefix(data_url)))?;

    // Some canvas exports wrap the payload
    let payload: String = payload.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    let png = base64::engine::general_purpose::STANDARD.decode(payload.as_bytes())?;

    ImageData::from_png(&png)
}

/// Short, log-safe description of whatever precedes the payload.
fn describe_prefix(data_url: &str) -> String {
    let trimmed = data_url.trim();
    if trimmed.is_empty() {
        return "empty payload".to_string();
    }
    match trimmed.find(',') {
        Some(idx) if idx <= 64 => trimmed[..idx].to_string(),
        _ => trimmed.chars().take(32).collect(),
    }
}
