//! # Command Layer
//!
//! One module per user-facing action. Each `run` takes the [`AppShell`] (and
//! already-resolved record ids where it acts on records) and returns a
//! [`CmdResult`]: the records it touched or listed plus user messages. No
//! command prints; rendering is the CLI's job.
//!
//! [`AppShell`]: crate::shell::AppShell

use crate::config::ShelfConfig;
use crate::model::{Annotation, PdfRecord};
use crate::settings::Settings;
use std::path::PathBuf;

pub mod annotate;
pub mod category;
pub mod config;
pub mod delete;
pub mod export;
pub mod favorite;
pub mod find;
pub mod list;
pub mod reorder;
pub mod settings;
pub mod share;
pub mod upload;
pub mod view;

pub use view::ViewerStatus;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// A record as shown in a listing, with its 1-based collection position.
#[derive(Debug, Clone)]
pub struct ListedRecord {
    pub position: usize,
    pub record: PdfRecord,
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_records: Vec<PdfRecord>,
    pub listed_records: Vec<ListedRecord>,
    pub annotations: Vec<Annotation>,
    pub categories: Vec<String>,
    pub paths: Vec<PathBuf>,
    pub status: Option<ViewerStatus>,
    pub settings: Option<Settings>,
    pub config: Option<ShelfConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_records(mut self, records: Vec<PdfRecord>) -> Self {
        self.affected_records = records;
        self
    }

    pub fn with_listed_records(mut self, records: Vec<ListedRecord>) -> Self {
        self.listed_records = records;
        self
    }

    pub fn with_annotations(mut self, annotations: Vec<Annotation>) -> Self {
        self.annotations = annotations;
        self
    }

    pub fn with_categories(mut self, categories: Vec<String>) -> Self {
        self.categories = categories;
        self
    }

    pub fn with_paths(mut self, paths: Vec<PathBuf>) -> Self {
        self.paths = paths;
        self
    }

    pub fn with_status(mut self, status: ViewerStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = Some(settings);
        self
    }

    pub fn with_config(mut self, config: ShelfConfig) -> Self {
        self.config = Some(config);
        self
    }
}
