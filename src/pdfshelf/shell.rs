//! # Application Shell
//!
//! [`AppShell`] owns every piece of session state and is the only place they
//! meet:
//!
//! ```text
//!   Environment ──load──▶ RecordStore ──▶ Collection ◀── overlay commits
//!        ▲                    ▲              │
//!        │                    └── mirror ────┘  (subscribed on construction)
//!        └── deep link (open / close / restore)
//! ```
//!
//! The collection is the single source of truth. A [`RecordStore`] subscribed
//! to it rewrites the durable copy after every change, so nothing else ever
//! saves records. The viewer session (tool, zoom, find query, drag) belongs to
//! whichever record is active and is reset whenever the viewer opens or closes.
//!
//! Every operation addressed by id is a no-op on an unknown id. Nothing here
//! returns an error for clipboard, find or storage failures; they are logged.

use crate::collection::{Collection, UpsertOutcome};
use crate::deeplink::DeepLink;
use crate::env::Environment;
use crate::error::Result;
use crate::model::{Annotation, PdfRecord, DEFAULT_HIGHLIGHT_COLOR};
use crate::overlay::{AnnotationOverlay, OverlayLayer, SurfaceRect};
use crate::settings::Settings;
use crate::store::RecordStore;
use crate::upload::UploadFile;
use crate::viewer::{Tool, ViewerSurface};
use log::{debug, info, warn};
use std::rc::Rc;

pub struct AppShell<E: Environment + 'static> {
    env: Rc<E>,
    collection: Collection,
    viewer: ViewerSurface,
    overlay: AnnotationOverlay,
    active: Option<String>,
    deep_link: DeepLink,
}

impl<E: Environment + 'static> AppShell<E> {
    pub fn new(env: Rc<E>) -> Self {
        Self::with_highlight_color(env, DEFAULT_HIGHLIGHT_COLOR)
    }

    /// Load the persisted collection, start mirroring it and restore the
    /// viewer from the deep link.
    pub fn with_highlight_color(env: Rc<E>, color: &str) -> Self {
        let records = RecordStore::new(Rc::clone(&env)).load();
        let loaded = records.len();
        let mut collection = Collection::new(records);

        let mirror = RecordStore::new(Rc::clone(&env));
        if collection.len() != loaded {
            mirror.save(collection.records());
        }
        collection.subscribe(move |records| mirror.save(records));

        let mut shell = Self {
            env,
            collection,
            viewer: ViewerSurface::new(),
            overlay: AnnotationOverlay::new(color),
            active: None,
            deep_link: DeepLink::default(),
        };
        shell.restore_from_link();
        shell
    }

    /// A link naming a known record reopens it without counting a view.
    /// A stale link is cleared so the URL matches the closed viewer.
    fn restore_from_link(&mut self) {
        let Some(id) = self.deep_link.requested_id(&*self.env) else {
            return;
        };
        if self.collection.contains(&id) {
            debug!("Restored viewer for {id} from link");
            self.active = Some(id);
        } else {
            debug!("Link names unknown record {id}, viewer stays closed");
            if let Err(e) = self.deep_link.on_close(&*self.env) {
                warn!("Could not clear stale link: {e}");
            }
        }
    }

    pub fn env(&self) -> &E {
        &self.env
    }

    pub fn collection(&self) -> &Collection {
        &self.collection
    }

    pub fn viewer(&self) -> &ViewerSurface {
        &self.viewer
    }

    pub fn overlay(&self) -> &AnnotationOverlay {
        &self.overlay
    }

    // --- Viewer lifecycle ---

    pub fn active_id(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn active_record(&self) -> Option<&PdfRecord> {
        self.active.as_deref().and_then(|id| self.collection.get(id))
    }

    pub fn is_viewer_open(&self) -> bool {
        self.active_record().is_some()
    }

    /// Open the viewer on `id`: fresh session, one more view, link updated.
    pub fn open_viewer(&mut self, id: &str) -> bool {
        if !self.collection.contains(id) {
            debug!("Ignored open of unknown record {id}");
            return false;
        }
        self.reset_session();
        self.active = Some(id.to_string());
        self.collection.record_view(id);
        if let Err(e) = self.deep_link.on_open(&*self.env, id) {
            warn!("Could not update link for {id}: {e}");
        }
        info!("Opened {id}");
        true
    }

    /// Close the viewer. Returns whether one was open.
    pub fn close_viewer(&mut self) -> bool {
        let was_open = self.active.take().is_some();
        self.reset_session();
        if let Err(e) = self.deep_link.on_close(&*self.env) {
            warn!("Could not clear link: {e}");
        }
        if was_open {
            info!("Closed viewer");
        }
        was_open
    }

    fn reset_session(&mut self) {
        if self.overlay.cancel() {
            debug!("Discarded drag in progress");
        }
        self.viewer.reset();
    }

    /// Link that opens `id`, also copied to the clipboard when possible.
    /// `None` for an unknown record.
    pub fn share(&self, id: &str) -> Option<String> {
        if !self.collection.contains(id) {
            return None;
        }
        let url = self.deep_link.share_url(&*self.env, id);
        if let Err(e) = self.env.write_clipboard(&url) {
            debug!("Clipboard unavailable: {e}");
        }
        Some(url)
    }

    // --- Viewer surface ---

    /// Switching away from highlight drops any drag in progress.
    pub fn set_tool(&mut self, tool: Tool) -> Tool {
        let previous = self.viewer.set_tool(tool);
        if tool != Tool::Highlight && self.overlay.cancel() {
            debug!("Tool switched to {tool} mid-drag, drag discarded");
        }
        previous
    }

    pub fn zoom_in(&mut self) -> f64 {
        self.viewer.zoom_in()
    }

    pub fn zoom_out(&mut self) -> f64 {
        self.viewer.zoom_out()
    }

    pub fn set_zoom(&mut self, zoom: f64) -> f64 {
        self.viewer.set_zoom(zoom)
    }

    /// Search the active document. `None` without an open viewer, an empty
    /// query or a host that cannot search.
    pub fn find(&mut self, query: &str) -> Option<bool> {
        self.viewer.set_find_query(query);
        let record = self.active_record()?;
        self.viewer.find(&*self.env, record)
    }

    // --- Annotation overlay ---

    pub fn pointer_down(&mut self, surface: SurfaceRect, x: f64, y: f64) -> bool {
        if !self.is_viewer_open() {
            return false;
        }
        self.overlay.pointer_down(self.viewer.tool(), surface, x, y)
    }

    pub fn pointer_move(&mut self, surface: SurfaceRect, x: f64, y: f64) -> bool {
        self.overlay.pointer_move(surface, x, y)
    }

    /// End the drag, committing the highlight to the active record if it is
    /// large enough.
    pub fn pointer_up(&mut self) -> Option<Annotation> {
        let annotation = self.overlay.pointer_up()?;
        let id = self.active.clone()?;
        if !self.collection.push_annotation(&id, annotation.clone()) {
            return None;
        }
        debug!("Committed highlight {} on {id}", annotation.id);
        Some(annotation)
    }

    pub fn delete_annotation(&mut self, record_id: &str, annotation_id: &str) -> bool {
        self.collection.remove_annotation(record_id, annotation_id)
    }

    /// The overlay for the active record at the current zoom.
    pub fn overlay_layer(&self) -> Option<OverlayLayer> {
        let record = self.active_record()?;
        Some(self.overlay.render(&record.annotations, self.viewer.zoom()))
    }

    // --- Collection ---

    /// Add every PDF among `files`, one after another. Returns the new ids,
    /// in upload order; the last one ends up first in the collection.
    pub fn upload(&mut self, files: Vec<UploadFile>) -> Vec<String> {
        let mut added = Vec::new();
        for file in files {
            let filename = file.filename.clone();
            let Some(record) = file.into_record() else {
                debug!("Skipped non-PDF upload {filename}");
                continue;
            };
            let id = record.id.clone();
            if self.collection.upsert(record) == UpsertOutcome::Inserted {
                info!("Uploaded {filename} as {id}");
            }
            added.push(id);
        }
        added
    }

    /// Delete a record. Closes the viewer first if it was showing it.
    pub fn remove(&mut self, id: &str) -> Option<PdfRecord> {
        if self.active.as_deref() == Some(id) {
            self.close_viewer();
        }
        let removed = self.collection.remove(id)?;
        info!("Deleted {id}");
        Some(removed)
    }

    pub fn set_favorite(&mut self, id: &str, value: bool) -> bool {
        self.collection.set_favorite(id, value)
    }

    pub fn toggle_favorite(&mut self, id: &str) -> Option<bool> {
        self.collection.toggle_favorite(id)
    }

    pub fn set_category(&mut self, id: &str, category: &str) -> bool {
        self.collection.set_category(id, category)
    }

    pub fn reorder(&mut self, order: &[String]) -> Result<()> {
        self.collection.reorder(order)
    }

    pub fn reorder_visible(&mut self, order: &[String]) -> Result<()> {
        self.collection.reorder_visible(order)
    }

    // --- Settings ---

    pub fn settings(&self) -> Settings {
        Settings::load(&*self.env)
    }

    pub fn save_settings(&self, settings: &Settings) -> Result<()> {
        settings.save(&*self.env)
    }
}
