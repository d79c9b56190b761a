use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Category assigned to freshly uploaded records.
pub const DEFAULT_CATEGORY: &str = "misc";

/// Categories offered even when no record uses them yet.
pub const BUILTIN_CATEGORIES: [&str; 5] = ["education", "projects", "notes", "work", "misc"];

/// Fill color of new highlights unless configured otherwise.
pub const DEFAULT_HIGHLIGHT_COLOR: &str = "#fbbf24";

/// Milliseconds since the Unix epoch, the timestamp unit used in persisted records.
pub type Millis = i64;

pub fn now_millis() -> Millis {
    Utc::now().timestamp_millis()
}

/// A managed PDF document and its metadata.
///
/// Field names serialize in camelCase so the persisted `pdfs` value keeps the
/// same shape the dashboard writes to local storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PdfRecord {
    pub id: String,
    pub name: String,
    pub filename: String,
    pub size: u64,
    pub uploaded_at: Millis,
    pub data_url: String,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default)]
    pub favorite: bool,
    #[serde(default)]
    pub views: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_viewed_at: Option<Millis>,
    /// Insertion order is z-order.
    #[serde(default)]
    pub annotations: Vec<Annotation>,
}

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

impl PdfRecord {
    pub fn new(filename: impl Into<String>, size: u64, data_url: impl Into<String>) -> Self {
        let filename = filename.into();
        Self {
            id: new_record_id(),
            name: display_name(&filename),
            filename,
            size,
            uploaded_at: now_millis(),
            data_url: data_url.into(),
            category: default_category(),
            favorite: false,
            views: 0,
            last_viewed_at: None,
            annotations: Vec::new(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }
}

/// Strips a trailing `.pdf` extension, ignoring case.
pub fn display_name(filename: &str) -> String {
    let len = filename.len();
    if len >= 4 && filename.is_char_boundary(len - 4) {
        let (stem, ext) = filename.split_at(len - 4);
        if ext.eq_ignore_ascii_case(".pdf") {
            return stem.to_string();
        }
    }
    filename.to_string()
}

/// Record ids are `<upload millis>-<6 random chars>`.
pub fn new_record_id() -> String {
    let random = Uuid::new_v4().simple().to_string();
    format!("{}-{}", now_millis(), &random[..6])
}

/// A highlight rectangle in normalized coordinates.
///
/// `x`, `y`, `w` and `h` are fractions of the unscaled document frame, so a
/// stored annotation never changes when the viewer zoom does.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    pub color: String,
    #[serde(default)]
    pub note: String,
}

impl Annotation {
    pub fn new(x: f64, y: f64, w: f64, h: f64, color: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            x,
            y,
            w,
            h,
            color: color.into(),
            note: String::new(),
        }
    }
}
