//! Embedded content: document bytes carried inside the record as a `data:` URL.

use crate::error::{Result, ShelfError};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};

pub const PDF_MIME: &str = "application/pdf";

pub fn encode(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, BASE64.encode(bytes))
}

/// A parsed `data:` URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUrl {
    pub mime: String,
    pub bytes: Vec<u8>,
}

pub fn decode(data_url: &str) -> Result<DataUrl> {
    let rest = data_url
        .strip_prefix("data:")
        .ok_or_else(|| ShelfError::InvalidDataUrl("missing data: prefix".to_string()))?;
    let (meta, data) = rest
        .split_once(',')
        .ok_or_else(|| ShelfError::InvalidDataUrl("missing ',' separator".to_string()))?;

    let mut parts = meta.split(';');
    let mime = match parts.next() {
        Some(m) if !m.is_empty() => m.to_string(),
        _ => "text/plain".to_string(),
    };
    let is_base64 = parts.any(|p| p.eq_ignore_ascii_case("base64"));

    let bytes = if is_base64 {
        BASE64
            .decode(data.trim())
            .map_err(|e| ShelfError::InvalidDataUrl(e.to_string()))?
    } else {
        urlencoding::decode_binary(data.as_bytes()).into_owned()
    };

    Ok(DataUrl { mime, bytes })
}
