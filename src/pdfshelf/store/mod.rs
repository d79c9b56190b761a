//! # Storage Layer
//!
//! The durable side of the shelf is a plain key-value store, the same shape as
//! a browser's local storage. [`StorageBackend`] abstracts it:
//!
//! - [`fs_backend::FsBackend`]: one JSON file per key in the data directory
//! - [`mem_backend::MemBackend`]: in-memory, for tests
//!
//! [`RecordStore`] sits on top and owns the `pdfs` key. It never fails towards
//! its caller: a missing or malformed value loads as an empty collection, and
//! a failed write is logged and dropped. Every save rewrites the whole
//! collection, so a value is either the old list or the new one.
//!
//! ## Keys
//!
//! ```text
//! pdfs       JSON array of PdfRecord
//! theme      "light" | "dark"            (see settings.rs)
//! primary    color string                (see settings.rs)
//! location   current page URL (CLI host only, see env.rs)
//! ```

use crate::model::PdfRecord;
use log::{debug, warn};

pub mod backend;
pub mod fs_backend;
pub mod mem_backend;

pub use backend::StorageBackend;

pub const PDFS_KEY: &str = "pdfs";
pub const THEME_KEY: &str = "theme";
pub const PRIMARY_KEY: &str = "primary";
pub const LOCATION_KEY: &str = "location";

/// Durable mapping of the record collection onto the `pdfs` key.
pub struct RecordStore<B: StorageBackend> {
    backend: B,
}

impl<B: StorageBackend> RecordStore<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Load the persisted collection. Missing or malformed data yields an empty list.
    pub fn load(&self) -> Vec<PdfRecord> {
        let raw = match self.backend.get_item(PDFS_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!("Could not read stored records: {e}");
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<PdfRecord>>(&raw) {
            Ok(records) => {
                debug!("Loaded {} records", records.len());
                records
            }
            Err(e) => {
                warn!("Ignoring malformed stored records: {e}");
                Vec::new()
            }
        }
    }

    /// Rewrite the whole collection. Failures are logged, never returned.
    pub fn save(&self, records: &[PdfRecord]) {
        let serialized = match serde_json::to_string(records) {
            Ok(s) => s,
            Err(e) => {
                warn!("Could not serialize records: {e}");
                return;
            }
        };
        if let Err(e) = self.backend.set_item(PDFS_KEY, &serialized) {
            warn!("Could not persist {} records: {e}", records.len());
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use crate::model::{Annotation, PdfRecord};

    /// Builds small record collections with predictable ids (`r1`, `r2`, ...).
    #[derive(Default)]
    pub struct RecordFixture {
        pub records: Vec<PdfRecord>,
    }

    impl RecordFixture {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_records(mut self, count: usize) -> Self {
            for _ in 0..count {
                let n = self.records.len() + 1;
                self.records.push(record(&format!("r{n}"), &format!("Document {n}")));
            }
            self
        }

        pub fn with_record(mut self, id: &str, name: &str) -> Self {
            self.records.push(record(id, name));
            self
        }

        pub fn with_favorite(mut self, id: &str, name: &str) -> Self {
            let mut r = record(id, name);
            r.favorite = true;
            self.records.push(r);
            self
        }

        pub fn with_category(mut self, id: &str, name: &str, category: &str) -> Self {
            let mut r = record(id, name);
            r.category = category.to_string();
            self.records.push(r);
            self
        }

        pub fn with_viewed(mut self, id: &str, name: &str, last_viewed_at: i64) -> Self {
            let mut r = record(id, name);
            r.views = 1;
            r.last_viewed_at = Some(last_viewed_at);
            self.records.push(r);
            self
        }

        pub fn with_annotated(mut self, id: &str, name: &str, count: usize) -> Self {
            let mut r = record(id, name);
            for i in 0..count {
                let offset = i as f64 * 0.1;
                r.annotations
                    .push(Annotation::new(offset, offset, 0.1, 0.05, "#fbbf24"));
            }
            self.records.push(r);
            self
        }

        pub fn build(self) -> Vec<PdfRecord> {
            self.records
        }
    }

    pub fn record(id: &str, name: &str) -> PdfRecord {
        PdfRecord::new(
            format!("{name}.pdf"),
            1024,
            "data:application/pdf;base64,JVBERi0xLjQK",
        )
        .with_id(id)
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::RecordFixture;
    use super::mem_backend::MemBackend;
    use super::*;

    #[test]
    fn load_of_empty_backend_is_empty() {
        let store = RecordStore::new(MemBackend::new());
        assert!(store.load().is_empty());
    }

    #[test]
    fn save_then_load_reproduces_collection() {
        let records = RecordFixture::new()
            .with_favorite("a", "Alpha")
            .with_viewed("b", "Beta", 300)
            .with_annotated("c", "Gamma", 2)
            .build();
        let store = RecordStore::new(MemBackend::new());

        store.save(&records);
        assert_eq!(store.load(), records);
    }

    #[test]
    fn malformed_data_loads_as_empty() {
        let backend = MemBackend::new();
        backend.set_item(PDFS_KEY, "{not json").unwrap();
        let store = RecordStore::new(backend);
        assert!(store.load().is_empty());

        store.backend().set_item(PDFS_KEY, r#"{"id":"x"}"#).unwrap();
        assert!(store.load().is_empty());
    }

    #[test]
    fn failed_save_is_swallowed_and_keeps_previous_copy() {
        let records = RecordFixture::new().with_records(2).build();
        let store = RecordStore::new(MemBackend::new());
        store.save(&records);

        store.backend().set_simulate_write_error(true);
        store.save(&records[..1]);

        assert_eq!(store.load().len(), 2);
    }
}
