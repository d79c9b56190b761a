//! Turning picked files into records.
//!
//! Only PDFs are accepted; anything else in a multi-select is skipped without
//! complaint. Content is embedded as a base64 `data:` URL so a record never
//! points at an external file.

use crate::data_url::{self, PDF_MIME};
use crate::error::{Result, ShelfError};
use crate::model::PdfRecord;
use std::fs;
use std::path::Path;

const OCTET_STREAM: &str = "application/octet-stream";

/// A picked file: what a file input hands over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn new(filename: impl Into<String>, content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    /// Read a file from disk, typing it by extension.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| ShelfError::Api(format!("Not a file path: {}", path.display())))?
            .to_string();
        let bytes = fs::read(path).map_err(ShelfError::Io)?;
        let content_type = content_type_for(&filename);
        Ok(Self::new(filename, content_type, bytes))
    }

    pub fn is_pdf(&self) -> bool {
        self.content_type == PDF_MIME
    }

    /// Build a fresh record, or `None` for non-PDF content.
    pub fn into_record(self) -> Option<PdfRecord> {
        if !self.is_pdf() {
            return None;
        }
        let data_url = data_url::encode(PDF_MIME, &self.bytes);
        Some(PdfRecord::new(self.filename, self.bytes.len() as u64, data_url))
    }
}

pub fn content_type_for(filename: &str) -> &'static str {
    let is_pdf = Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("pdf"));
    if is_pdf {
        PDF_MIME
    } else {
        OCTET_STREAM
    }
}
