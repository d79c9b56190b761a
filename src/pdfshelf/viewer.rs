//! Viewer session state: the active tool, zoom and find query.
//!
//! A session lives from open to close. Opening (and closing) resets it, so
//! nothing carries over between two viewings of the same record.

use crate::env::Environment;
use crate::model::PdfRecord;
use log::debug;
use std::fmt;
use std::str::FromStr;

pub const MIN_ZOOM: f64 = 0.5;
pub const MAX_ZOOM: f64 = 2.0;
pub const ZOOM_STEP: f64 = 0.1;
pub const DEFAULT_ZOOM: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tool {
    #[default]
    Pointer,
    Highlight,
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tool::Pointer => write!(f, "pointer"),
            Tool::Highlight => write!(f, "highlight"),
        }
    }
}

impl FromStr for Tool {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pointer" => Ok(Tool::Pointer),
            "highlight" => Ok(Tool::Highlight),
            other => Err(format!("Unknown tool: {other}")),
        }
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewerSurface {
    tool: Tool,
    zoom: f64,
    find_query: String,
}

impl Default for ViewerSurface {
    fn default() -> Self {
        Self {
            tool: Tool::Pointer,
            zoom: DEFAULT_ZOOM,
            find_query: String::new(),
        }
    }
}

impl ViewerSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Back to pointer tool, 100% zoom, empty find query.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    /// Switch tools, returning the previous one.
    pub fn set_tool(&mut self, tool: Tool) -> Tool {
        std::mem::replace(&mut self.tool, tool)
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Zoom as a whole percentage, for display.
    pub fn zoom_percent(&self) -> u32 {
        (self.zoom * 100.0).round() as u32
    }

    pub fn zoom_in(&mut self) -> f64 {
        self.zoom = round2(self.zoom + ZOOM_STEP).min(MAX_ZOOM);
        self.zoom
    }

    pub fn zoom_out(&mut self) -> f64 {
        self.zoom = round2(self.zoom - ZOOM_STEP).max(MIN_ZOOM);
        self.zoom
    }

    /// Set an arbitrary zoom, clamped to the allowed range and snapped to the step.
    pub fn set_zoom(&mut self, zoom: f64) -> f64 {
        if zoom.is_finite() {
            let clamped = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
            self.zoom = round2((clamped / ZOOM_STEP).round() * ZOOM_STEP);
        }
        self.zoom
    }

    pub fn find_query(&self) -> &str {
        &self.find_query
    }

    pub fn set_find_query(&mut self, query: impl Into<String>) {
        self.find_query = query.into();
    }

    /// Hand the find query to the host's native search.
    ///
    /// `None` when there is nothing to search for or the host could not
    /// search; failures are logged and otherwise ignored.
    pub fn find<E: Environment + ?Sized>(&self, env: &E, record: &PdfRecord) -> Option<bool> {
        if self.find_query.is_empty() {
            return None;
        }
        match env.find_in_document(record, &self.find_query) {
            Ok(found) => Some(found),
            Err(e) => {
                debug!("Native find unavailable: {e}");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::MemEnvironment;
    use crate::store::fixtures::record;

    #[test]
    fn starts_in_pointer_mode_at_full_size() {
        let v = ViewerSurface::new();
        assert_eq!(v.tool(), Tool::Pointer);
        assert_eq!(v.zoom(), 1.0);
        assert_eq!(v.zoom_percent(), 100);
    }

    #[test]
    fn zoom_steps_are_rounded_to_two_decimals() {
        let mut v = ViewerSurface::new();
        assert_eq!(v.zoom_in(), 1.1);
        assert_eq!(v.zoom_in(), 1.2);
        assert_eq!(v.zoom_in(), 1.3);
        assert_eq!(v.zoom_out(), 1.2);
        assert_eq!(v.zoom_percent(), 120);
    }

    #[test]
    fn zoom_clamps_at_both_ends() {
        let mut v = ViewerSurface::new();
        for _ in 0..20 {
            v.zoom_in();
        }
        assert_eq!(v.zoom(), MAX_ZOOM);
        for _ in 0..30 {
            v.zoom_out();
        }
        assert_eq!(v.zoom(), MIN_ZOOM);

        assert_eq!(v.set_zoom(0.1), 0.5);
        assert_eq!(v.set_zoom(7.0), 2.0);
        assert_eq!(v.set_zoom(1.234), 1.2);
        assert_eq!(v.set_zoom(f64::NAN), 1.2);
    }

    #[test]
    fn reset_clears_session() {
        let mut v = ViewerSurface::new();
        v.set_tool(Tool::Highlight);
        v.zoom_in();
        v.set_find_query("budget");
        v.reset();
        assert_eq!(v, ViewerSurface::default());
    }

    #[test]
    fn tool_round_trips_through_strings() {
        assert_eq!("highlight".parse::<Tool>().unwrap(), Tool::Highlight);
        assert_eq!(Tool::Pointer.to_string(), "pointer");
        assert!("eraser".parse::<Tool>().is_err());
    }

    #[test]
    fn find_delegates_and_swallows_failures() {
        let env = MemEnvironment::new();
        let doc = record("a", "A");
        let mut v = ViewerSurface::new();

        assert_eq!(v.find(&env, &doc), None);
        assert!(env.find_requests().is_empty());

        v.set_find_query("total");
        assert_eq!(v.find(&env, &doc), Some(true));

        env.set_find_supported(false);
        assert_eq!(v.find(&env, &doc), None);
        assert_eq!(env.find_requests().len(), 2);
    }
}
