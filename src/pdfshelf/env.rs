//! # Environment
//!
//! Everything the core needs from its host, behind one injected capability:
//!
//! - durable key-value storage (the [`StorageBackend`] supertrait)
//! - the current page location, read and replaced without history entries
//! - a clipboard writer
//! - native find-in-document on the displayed content
//!
//! The browser provides these through `localStorage`, `window.location`,
//! `navigator.clipboard` and `window.find`. [`MemEnvironment`] provides them
//! in memory for tests; [`SystemEnvironment`] backs them with the data
//! directory and the OS clipboard for the CLI host.

use crate::clipboard::copy_to_clipboard;
use crate::data_url;
use crate::deeplink::Location;
use crate::error::{Result, ShelfError};
use crate::model::PdfRecord;
use crate::store::fs_backend::FsBackend;
use crate::store::mem_backend::MemBackend;
use crate::store::{StorageBackend, LOCATION_KEY};
use log::debug;
use std::cell::{Cell, RefCell};
use std::path::PathBuf;
use std::rc::Rc;

pub trait Environment: StorageBackend {
    /// The current page URL.
    fn location(&self) -> String;

    /// Replace the current page URL in place.
    fn replace_location(&self, href: &str) -> Result<()>;

    fn write_clipboard(&self, text: &str) -> Result<()>;

    /// Ask the host to search the displayed document for `query`.
    /// Best-effort: hosts without a usable search return an error.
    fn find_in_document(&self, record: &PdfRecord, query: &str) -> Result<bool>;
}

impl<E: Environment + ?Sized> Environment for Rc<E> {
    fn location(&self) -> String {
        (**self).location()
    }

    fn replace_location(&self, href: &str) -> Result<()> {
        (**self).replace_location(href)
    }

    fn write_clipboard(&self, text: &str) -> Result<()> {
        (**self).write_clipboard(text)
    }

    fn find_in_document(&self, record: &PdfRecord, query: &str) -> Result<bool> {
        (**self).find_in_document(record, query)
    }
}

// --- In-memory environment ---

/// In-memory environment for tests and embedding.
pub struct MemEnvironment {
    storage: MemBackend,
    location: RefCell<String>,
    location_writes: Cell<usize>,
    clipboard: RefCell<Vec<String>>,
    clipboard_available: Cell<bool>,
    find_requests: RefCell<Vec<(String, String)>>,
    find_supported: Cell<bool>,
}

impl Default for MemEnvironment {
    fn default() -> Self {
        Self::with_location("http://localhost/")
    }
}

impl MemEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_location(href: &str) -> Self {
        Self {
            storage: MemBackend::new(),
            location: RefCell::new(href.to_string()),
            location_writes: Cell::new(0),
            clipboard: RefCell::new(Vec::new()),
            clipboard_available: Cell::new(true),
            find_requests: RefCell::new(Vec::new()),
            find_supported: Cell::new(true),
        }
    }

    pub fn storage(&self) -> &MemBackend {
        &self.storage
    }

    /// Everything written to the clipboard, oldest first.
    pub fn clipboard_history(&self) -> Vec<String> {
        self.clipboard.borrow().clone()
    }

    pub fn set_clipboard_available(&self, available: bool) {
        self.clipboard_available.set(available);
    }

    pub fn set_find_supported(&self, supported: bool) {
        self.find_supported.set(supported);
    }

    /// `(record id, query)` pairs passed to `find_in_document`.
    pub fn find_requests(&self) -> Vec<(String, String)> {
        self.find_requests.borrow().clone()
    }

    pub fn location_writes(&self) -> usize {
        self.location_writes.get()
    }
}

impl StorageBackend for MemEnvironment {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        self.storage.get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.storage.set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        self.storage.remove_item(key)
    }
}

impl Environment for MemEnvironment {
    fn location(&self) -> String {
        self.location.borrow().clone()
    }

    fn replace_location(&self, href: &str) -> Result<()> {
        *self.location.borrow_mut() = href.to_string();
        self.location_writes.set(self.location_writes.get() + 1);
        Ok(())
    }

    fn write_clipboard(&self, text: &str) -> Result<()> {
        if !self.clipboard_available.get() {
            return Err(ShelfError::Unsupported("Clipboard unavailable".to_string()));
        }
        self.clipboard.borrow_mut().push(text.to_string());
        Ok(())
    }

    fn find_in_document(&self, record: &PdfRecord, query: &str) -> Result<bool> {
        self.find_requests
            .borrow_mut()
            .push((record.id.clone(), query.to_string()));
        if !self.find_supported.get() {
            return Err(ShelfError::Unsupported("find is not available".to_string()));
        }
        Ok(true)
    }
}

// --- System environment ---

/// Host environment for the CLI: storage in the data directory, the "page
/// location" persisted under the `location` key, the OS clipboard.
pub struct SystemEnvironment {
    storage: FsBackend,
    base_url: String,
}

impl SystemEnvironment {
    pub fn new(data_dir: impl Into<PathBuf>, base_url: impl Into<String>) -> Self {
        Self {
            storage: FsBackend::new(data_dir),
            base_url: base_url.into(),
        }
    }

    pub fn data_dir(&self) -> &std::path::Path {
        self.storage.root()
    }
}

impl StorageBackend for SystemEnvironment {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        self.storage.get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.storage.set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        self.storage.remove_item(key)
    }
}

impl Environment for SystemEnvironment {
    /// The stored location, as long as it still points at the configured page.
    fn location(&self) -> String {
        let stored = match self.storage.get_item(LOCATION_KEY) {
            Ok(Some(href)) => href,
            _ => return self.base_url.clone(),
        };
        let page = Location::parse(&self.base_url);
        if Location::parse(&stored).base() == page.base() {
            stored
        } else {
            debug!("Stored location {stored} no longer matches {}", self.base_url);
            self.base_url.clone()
        }
    }

    fn replace_location(&self, href: &str) -> Result<()> {
        self.storage.set_item(LOCATION_KEY, href)
    }

    fn write_clipboard(&self, text: &str) -> Result<()> {
        copy_to_clipboard(text)
    }

    /// Case-insensitive byte search over the embedded content. Only finds
    /// text stored uncompressed in the file; there is no PDF text extraction.
    fn find_in_document(&self, record: &PdfRecord, query: &str) -> Result<bool> {
        let content = data_url::decode(&record.data_url)?;
        let needle = query.to_ascii_lowercase().into_bytes();
        if needle.is_empty() {
            return Ok(false);
        }
        Ok(content
            .bytes
            .windows(needle.len())
            .any(|w| w.eq_ignore_ascii_case(&needle)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_url::{encode, PDF_MIME};
    use tempfile::tempdir;

    #[test]
    fn mem_clipboard_can_be_disabled() {
        let env = MemEnvironment::new();
        env.write_clipboard("a").unwrap();
        env.set_clipboard_available(false);
        assert!(env.write_clipboard("b").is_err());
        assert_eq!(env.clipboard_history(), vec!["a".to_string()]);
    }

    #[test]
    fn system_location_defaults_to_base_and_persists() {
        let dir = tempdir().unwrap();
        let env = SystemEnvironment::new(dir.path(), "http://localhost:5173/");
        assert_eq!(env.location(), "http://localhost:5173/");

        env.replace_location("http://localhost:5173/?pdfId=a").unwrap();
        let reopened = SystemEnvironment::new(dir.path(), "http://localhost:5173/");
        assert_eq!(reopened.location(), "http://localhost:5173/?pdfId=a");
    }

    #[test]
    fn system_location_resets_when_base_url_changes() {
        let dir = tempdir().unwrap();
        let env = SystemEnvironment::new(dir.path(), "http://localhost:5173/");
        env.replace_location("http://localhost:5173/?pdfId=a").unwrap();

        let moved = SystemEnvironment::new(dir.path(), "https://shelf.example.com/");
        assert_eq!(moved.location(), "https://shelf.example.com/");
    }

    #[test]
    fn system_find_searches_embedded_bytes() {
        let dir = tempdir().unwrap();
        let env = SystemEnvironment::new(dir.path(), "http://h/");
        let record = PdfRecord::new("a.pdf", 10, encode(PDF_MIME, b"%PDF-1.4 (Quarterly Report) Tj"));

        assert!(env.find_in_document(&record, "quarterly").unwrap());
        assert!(!env.find_in_document(&record, "annual").unwrap());

        let broken = PdfRecord::new("b.pdf", 0, "not a data url");
        assert!(env.find_in_document(&broken, "x").is_err());
    }
}
