//! # Collection Controller
//!
//! The in-memory, ordered list of records and the single source of truth for
//! them, annotations included. It is an explicit observable container: every
//! mutation that changes state notifies subscribers with the full list, which
//! is how the durable copy is kept in step (see `shell.rs`).
//!
//! Operations addressed by id never fail on a missing id; they report whether
//! anything changed and otherwise do nothing. Derived views (favorites,
//! recent, filtered, categories) are computed from the current list on each
//! call and cannot be mutated independently.
//!
//! Order matters: new uploads go first, replacements keep their position,
//! and reorders either take a full permutation or splice a reordered
//! subsequence back into the slots it came from.

use crate::error::{Result, ShelfError};
use crate::model::{now_millis, Annotation, Millis, PdfRecord, BUILTIN_CATEGORIES};
use log::{debug, warn};
use std::collections::HashSet;
use std::fmt;

/// Maximum number of entries in the recent view.
pub const RECENT_LIMIT: usize = 6;

/// Category value that matches every record.
pub const ALL_CATEGORIES: &str = "all";

pub type SubscriptionId = usize;
type Listener = Box<dyn FnMut(&[PdfRecord])>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Inserted,
    Replaced,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl From<&str> for CategoryFilter {
    fn from(value: &str) -> Self {
        if value == ALL_CATEGORIES {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(value.to_string())
        }
    }
}

/// Name query plus category; both must match.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RecordFilter {
    pub query: String,
    pub category: CategoryFilter,
}

impl RecordFilter {
    pub fn new(query: impl Into<String>, category: impl Into<CategoryFilter>) -> Self {
        Self {
            query: query.into(),
            category: category.into(),
        }
    }

    pub fn matches(&self, record: &PdfRecord) -> bool {
        let matches_query = record
            .name
            .to_lowercase()
            .contains(&self.query.to_lowercase());
        let matches_category = match &self.category {
            CategoryFilter::All => true,
            CategoryFilter::Only(c) => &record.category == c,
        };
        matches_query && matches_category
    }
}

pub struct Collection {
    records: Vec<PdfRecord>,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: SubscriptionId,
}

impl Default for Collection {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl fmt::Debug for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collection")
            .field("records", &self.records.len())
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl Collection {
    /// Builds a collection from loaded records. Later duplicates of an id are dropped.
    pub fn new(records: Vec<PdfRecord>) -> Self {
        let mut seen = HashSet::new();
        let total = records.len();
        let records: Vec<_> = records
            .into_iter()
            .filter(|r| seen.insert(r.id.clone()))
            .collect();
        if records.len() != total {
            warn!("Dropped {} records with duplicate ids", total - records.len());
        }
        Self {
            records,
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    // --- Observation ---

    /// Register a listener called with the full list after every change.
    pub fn subscribe(&mut self, listener: impl FnMut(&[PdfRecord]) + 'static) -> SubscriptionId {
        let id = self.next_subscription;
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() != before
    }

    fn emit(&mut self) {
        let records = &self.records;
        for (_, listener) in self.listeners.iter_mut() {
            listener(records);
        }
    }

    // --- Reads ---

    pub fn records(&self) -> &[PdfRecord] {
        &self.records
    }

    pub fn get(&self, id: &str) -> Option<&PdfRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.records.iter().position(|r| r.id == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    // --- Mutations ---

    /// Insert at the front, or replace in place when the id already exists.
    pub fn upsert(&mut self, record: PdfRecord) -> UpsertOutcome {
        let outcome = match self.position(&record.id) {
            Some(idx) => {
                self.records[idx] = record;
                UpsertOutcome::Replaced
            }
            None => {
                self.records.insert(0, record);
                UpsertOutcome::Inserted
            }
        };
        self.emit();
        outcome
    }

    pub fn remove(&mut self, id: &str) -> Option<PdfRecord> {
        let idx = self.position(id)?;
        let removed = self.records.remove(idx);
        self.emit();
        Some(removed)
    }

    /// Replace the whole ordering. `order` must be a permutation of every id.
    pub fn reorder(&mut self, order: &[String]) -> Result<()> {
        if order.len() != self.records.len() {
            return Err(ShelfError::InvalidOrder(format!(
                "expected {} ids, got {}",
                self.records.len(),
                order.len()
            )));
        }
        self.reorder_visible(order)
    }

    /// Reorder a subsequence (e.g. the records visible under a filter).
    ///
    /// The records named in `order` are written back into the positions they
    /// already occupy, in the new relative order. Records not named keep their
    /// slots, so nothing hidden by a filter is lost.
    pub fn reorder_visible(&mut self, order: &[String]) -> Result<()> {
        let mut named = HashSet::with_capacity(order.len());
        for id in order {
            if !self.contains(id) {
                warn!("Rejected reorder naming unknown record {id}");
                return Err(ShelfError::InvalidOrder(format!("unknown record {id}")));
            }
            if !named.insert(id.as_str()) {
                return Err(ShelfError::InvalidOrder(format!("record {id} named twice")));
            }
        }

        let slots: Vec<usize> = self
            .records
            .iter()
            .enumerate()
            .filter(|(_, r)| named.contains(r.id.as_str()))
            .map(|(i, _)| i)
            .collect();

        let mut placed: Vec<Option<PdfRecord>> =
            std::mem::take(&mut self.records).into_iter().map(Some).collect();
        let moving: Vec<PdfRecord> = order
            .iter()
            .filter_map(|id| {
                let idx = placed
                    .iter()
                    .position(|slot| slot.as_ref().is_some_and(|r| &r.id == id))?;
                placed[idx].take()
            })
            .collect();
        for (slot, record) in slots.into_iter().zip(moving) {
            placed[slot] = Some(record);
        }
        self.records = placed.into_iter().flatten().collect();

        debug!("Reordered {} of {} records", order.len(), self.records.len());
        self.emit();
        Ok(())
    }

    fn update(&mut self, id: &str, f: impl FnOnce(&mut PdfRecord)) -> bool {
        let Some(record) = self.records.iter_mut().find(|r| r.id == id) else {
            return false;
        };
        f(record);
        self.emit();
        true
    }

    pub fn set_favorite(&mut self, id: &str, value: bool) -> bool {
        self.update(id, |r| r.favorite = value)
    }

    /// Flip the favorite flag, returning the new value.
    pub fn toggle_favorite(&mut self, id: &str) -> Option<bool> {
        let next = !self.get(id)?.favorite;
        self.set_favorite(id, next);
        Some(next)
    }

    pub fn set_category(&mut self, id: &str, category: &str) -> bool {
        self.update(id, |r| r.category = category.to_string())
    }

    pub fn record_view(&mut self, id: &str) -> bool {
        self.record_view_at(id, now_millis())
    }

    pub fn record_view_at(&mut self, id: &str, at: Millis) -> bool {
        self.update(id, |r| {
            r.views += 1;
            r.last_viewed_at = Some(at);
        })
    }

    pub fn set_annotations(&mut self, id: &str, annotations: Vec<Annotation>) -> bool {
        self.update(id, |r| r.annotations = annotations)
    }

    /// Append on top of the existing annotations.
    pub fn push_annotation(&mut self, id: &str, annotation: Annotation) -> bool {
        let Some(record) = self.get(id) else {
            return false;
        };
        let mut next = record.annotations.clone();
        next.push(annotation);
        self.set_annotations(id, next)
    }

    /// Remove one annotation by id. Returns false if either id is unknown.
    pub fn remove_annotation(&mut self, id: &str, annotation_id: &str) -> bool {
        let Some(record) = self.get(id) else {
            return false;
        };
        if !record.annotations.iter().any(|a| a.id == annotation_id) {
            return false;
        }
        let next = record
            .annotations
            .iter()
            .filter(|a| a.id != annotation_id)
            .cloned()
            .collect();
        self.set_annotations(id, next)
    }

    // --- Projections ---

    pub fn favorites(&self) -> Vec<&PdfRecord> {
        self.records.iter().filter(|r| r.favorite).collect()
    }

    /// Most recently viewed first, at most [`RECENT_LIMIT`]. Never-viewed
    /// records sort as timestamp 0; ties keep collection order.
    pub fn recent(&self) -> Vec<&PdfRecord> {
        let mut sorted: Vec<&PdfRecord> = self.records.iter().collect();
        sorted.sort_by_key(|r| std::cmp::Reverse(r.last_viewed_at.unwrap_or(0)));
        sorted.truncate(RECENT_LIMIT);
        sorted
    }

    pub fn filtered(&self, filter: &RecordFilter) -> Vec<&PdfRecord> {
        self.records.iter().filter(|r| filter.matches(r)).collect()
    }

    /// Built-in categories followed by any others in use, first-seen order.
    pub fn categories(&self) -> Vec<String> {
        let mut categories: Vec<String> = BUILTIN_CATEGORIES.iter().map(|c| c.to_string()).collect();
        for record in &self.records {
            if !record.category.is_empty() && !categories.contains(&record.category) {
                categories.push(record.category.clone());
            }
        }
        categories
    }
}
