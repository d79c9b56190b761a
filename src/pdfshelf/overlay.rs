//! # Annotation Overlay
//!
//! Highlight rectangles drawn over the rendered document.
//!
//! ## Coordinates
//!
//! Everything stored is normalized: a fraction of the unscaled document frame.
//! Pointer positions arrive as pixels and are divided by the rendered size of
//! the viewing surface. The surface scales uniformly with zoom, so the same
//! spot on the page always normalizes to the same fraction whatever the zoom.
//!
//! Rendering goes the other way without any per-zoom recalculation: the
//! overlay layer carries the zoom as a transform and every rectangle is placed
//! in percent of that layer (see [`OverlayLayer`]).
//!
//! ## Gesture
//!
//! ```text
//!            pointer down (highlight tool)
//!   Idle ─────────────────────────────────▶ Dragging { origin, current }
//!    ▲                                          │  pointer move: current = cursor
//!    └──────────────────────────────────────────┘
//!      pointer up: commit if w and h > 0.01, else discard
//!      cancel (tool switched away): discard
//! ```

use crate::model::{Annotation, DEFAULT_HIGHLIGHT_COLOR};
use crate::viewer::Tool;
use log::debug;

/// Smallest committed width or height, as a fraction of the frame.
pub const MIN_ANNOTATION_SIZE: f64 = 0.01;

/// Alpha suffix appended to hex colors so highlights stay translucent.
const FILL_ALPHA: &str = "55";

/// A normalized point; both coordinates in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Rendered bounds of the viewing surface, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl SurfaceRect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// A surface whose pixels already are fractions.
    pub fn unit() -> Self {
        Self::new(0.0, 0.0, 1.0, 1.0)
    }

    /// Normalize a client position. `None` for a collapsed surface.
    pub fn normalize(&self, client_x: f64, client_y: f64) -> Option<Point> {
        if !(self.width > 0.0 && self.height > 0.0) {
            return None;
        }
        let x = ((client_x - self.left) / self.width).clamp(0.0, 1.0);
        let y = ((client_y - self.top) / self.height).clamp(0.0, 1.0);
        Some(Point::new(x, y))
    }
}

/// Top-left origin with non-negative size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedRect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl NormalizedRect {
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            x: a.x.min(b.x),
            y: a.y.min(b.y),
            w: (a.x - b.x).abs(),
            h: (a.y - b.y).abs(),
        }
    }

    pub fn is_committable(&self) -> bool {
        self.w > MIN_ANNOTATION_SIZE && self.h > MIN_ANNOTATION_SIZE
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.x + self.w && p.y >= self.y && p.y <= self.y + self.h
    }
}

impl From<&Annotation> for NormalizedRect {
    fn from(a: &Annotation) -> Self {
        Self {
            x: a.x,
            y: a.y,
            w: a.w,
            h: a.h,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging { origin: Point, current: Point },
}

/// Drag-to-create state machine for one viewer session.
#[derive(Debug, Clone)]
pub struct AnnotationOverlay {
    state: DragState,
    color: String,
}

impl Default for AnnotationOverlay {
    fn default() -> Self {
        Self::new(DEFAULT_HIGHLIGHT_COLOR)
    }
}

impl AnnotationOverlay {
    pub fn new(color: impl Into<String>) -> Self {
        Self {
            state: DragState::Idle,
            color: color.into(),
        }
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    /// Start a drag. Only the highlight tool draws, and only from idle.
    pub fn pointer_down(&mut self, tool: Tool, surface: SurfaceRect, x: f64, y: f64) -> bool {
        if tool != Tool::Highlight || self.is_dragging() {
            return false;
        }
        let Some(origin) = surface.normalize(x, y) else {
            return false;
        };
        self.state = DragState::Dragging {
            origin,
            current: origin,
        };
        true
    }

    pub fn pointer_move(&mut self, surface: SurfaceRect, x: f64, y: f64) -> bool {
        let DragState::Dragging { current, .. } = &mut self.state else {
            return false;
        };
        match surface.normalize(x, y) {
            Some(p) => {
                *current = p;
                true
            }
            None => false,
        }
    }

    /// Finish the drag. Always returns to idle; yields the annotation to
    /// commit when both sides exceed [`MIN_ANNOTATION_SIZE`].
    pub fn pointer_up(&mut self) -> Option<Annotation> {
        let DragState::Dragging { origin, current } = std::mem::take(&mut self.state) else {
            return None;
        };
        let rect = NormalizedRect::from_corners(origin, current);
        if !rect.is_committable() {
            debug!("Discarded highlight {:.4}x{:.4} below minimum size", rect.w, rect.h);
            return None;
        }
        Some(Annotation::new(rect.x, rect.y, rect.w, rect.h, self.color.clone()))
    }

    /// Drop an in-progress drag without committing. Returns whether one existed.
    pub fn cancel(&mut self) -> bool {
        let was_dragging = self.is_dragging();
        self.state = DragState::Idle;
        was_dragging
    }

    /// The in-progress rectangle, normalized.
    pub fn preview(&self) -> Option<NormalizedRect> {
        match self.state {
            DragState::Idle => None,
            DragState::Dragging { origin, current } => {
                Some(NormalizedRect::from_corners(origin, current))
            }
        }
    }

    /// Describe the overlay layer for the given annotations and zoom.
    pub fn render(&self, annotations: &[Annotation], zoom: f64) -> OverlayLayer {
        let mut rects: Vec<OverlayRect> = annotations
            .iter()
            .map(|a| OverlayRect::new(Some(a.id.clone()), NormalizedRect::from(a), &a.color))
            .collect();
        if let Some(preview) = self.preview() {
            rects.push(OverlayRect::new(None, preview, &self.color));
        }
        OverlayLayer {
            scale: zoom,
            width_pct: 100.0 / zoom,
            height_pct: 100.0 / zoom,
            rects,
        }
    }
}

/// Topmost annotation under a normalized point. Later annotations sit above earlier ones.
pub fn annotation_at(annotations: &[Annotation], point: Point) -> Option<&Annotation> {
    annotations
        .iter()
        .rev()
        .find(|a| NormalizedRect::from(*a).contains(point))
}

/// One rectangle of the overlay, positioned in percent of the layer.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayRect {
    /// `None` for the in-progress drag.
    pub annotation_id: Option<String>,
    pub left_pct: f64,
    pub top_pct: f64,
    pub width_pct: f64,
    pub height_pct: f64,
    pub fill: String,
}

impl OverlayRect {
    fn new(annotation_id: Option<String>, rect: NormalizedRect, color: &str) -> Self {
        Self {
            annotation_id,
            left_pct: rect.x * 100.0,
            top_pct: rect.y * 100.0,
            width_pct: rect.w * 100.0,
            height_pct: rect.h * 100.0,
            fill: translucent(color),
        }
    }

    /// Committed annotations carry a delete affordance; the drag preview does not.
    pub fn is_deletable(&self) -> bool {
        self.annotation_id.is_some()
    }
}

fn translucent(color: &str) -> String {
    if color.starts_with('#') && color.len() == 7 {
        format!("{color}{FILL_ALPHA}")
    } else {
        color.to_string()
    }
}

/// The overlay layer: scaled by `scale` from the top-left corner and sized
/// `width_pct` x `height_pct` of the surface, so its visual size matches the
/// surface at every zoom.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayLayer {
    pub scale: f64,
    pub width_pct: f64,
    pub height_pct: f64,
    pub rects: Vec<OverlayRect>,
}
