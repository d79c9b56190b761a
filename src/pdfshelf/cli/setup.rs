use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Parser, Debug)]
#[command(name = "pdfshelf", bin_name = "pdfshelf", version)]
#[command(about = "A local shelf for PDFs: categories, favorites, links and highlights", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Unscaled page size in pixels, written `WIDTHxHEIGHT`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSize {
    pub width: f64,
    pub height: f64,
}

impl FromStr for PageSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (w, h) = s
            .split_once(|c: char| c == 'x' || c == 'X')
            .ok_or_else(|| format!("Expected WIDTHxHEIGHT, got {}", s))?;
        let parse = |v: &str| {
            v.trim()
                .parse::<f64>()
                .ok()
                .filter(|n| *n > 0.0 && n.is_finite())
                .ok_or_else(|| format!("Invalid size: {}", s))
        };
        Ok(Self {
            width: parse(w)?,
            height: parse(h)?,
        })
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add PDF files to the shelf (other files are skipped)
    #[command(alias = "add")]
    Upload {
        #[arg(required = true, num_args = 1..)]
        files: Vec<PathBuf>,
    },

    /// List documents
    #[command(alias = "ls")]
    List {
        /// Only names containing this text (case-insensitive)
        #[arg(short, long)]
        search: Option<String>,

        /// Only this category ("all" for every category)
        #[arg(short, long)]
        category: Option<String>,

        /// Only favorites
        #[arg(long, conflicts_with = "recent")]
        favorites: bool,

        /// Most recently viewed first
        #[arg(long)]
        recent: bool,
    },

    /// List categories in use
    Categories,

    /// Open a document in the viewer (e.g. 1, f1 or an id)
    #[command(alias = "o")]
    Open { selector: String },

    /// Close the viewer
    Close,

    /// Show the viewer state and current link
    Status,

    /// Mark documents as favorites
    #[command(alias = "fav")]
    Favorite {
        #[arg(required = true, num_args = 1..)]
        selectors: Vec<String>,
    },

    /// Remove documents from favorites
    #[command(alias = "unfav")]
    Unfavorite {
        #[arg(required = true, num_args = 1..)]
        selectors: Vec<String>,
    },

    /// Move documents into a category
    Category {
        category: String,

        #[arg(required = true, num_args = 1..)]
        selectors: Vec<String>,
    },

    /// Delete documents and their highlights
    #[command(alias = "rm")]
    Delete {
        #[arg(required = true, num_args = 1..)]
        selectors: Vec<String>,
    },

    /// Move a document to a new position
    #[command(alias = "mv")]
    Move {
        selector: String,

        /// 1-based target position (within the filtered view if filtered)
        position: usize,

        #[arg(short, long)]
        search: Option<String>,

        #[arg(short, long)]
        category: Option<String>,
    },

    /// Print a link that opens a document and copy it to the clipboard
    Share { selector: String },

    /// Save documents to disk (several are bundled into a tar.gz)
    Export {
        /// Documents to export (default: all)
        selectors: Vec<String>,

        /// Target directory
        #[arg(short, long, default_value = ".")]
        out: PathBuf,
    },

    /// Draw a highlight on the open document by dragging from one corner to the other
    #[command(alias = "hl")]
    Highlight {
        #[arg(allow_negative_numbers = true)]
        x1: f64,
        #[arg(allow_negative_numbers = true)]
        y1: f64,
        #[arg(allow_negative_numbers = true)]
        x2: f64,
        #[arg(allow_negative_numbers = true)]
        y2: f64,

        /// Zoom the page is rendered at
        #[arg(long, default_value_t = 1.0)]
        zoom: f64,

        /// Page size as WIDTHxHEIGHT; coordinates are then pixels on the zoomed page
        #[arg(long)]
        surface: Option<PageSize>,
    },

    /// List highlights of a document (default: the open one)
    Annotations { selector: Option<String> },

    /// Remove highlights by number or id
    Unhighlight {
        #[arg(required = true, num_args = 1..)]
        annotations: Vec<String>,

        /// Document to act on (default: the open one)
        #[arg(long)]
        on: Option<String>,
    },

    /// Search the open document
    Find { query: String },

    /// Show or change theme and primary color
    Settings {
        #[arg(long)]
        theme: Option<String>,

        #[arg(long)]
        primary: Option<String>,
    },

    /// Get or set configuration
    Config {
        /// Configuration key (base-url, highlight-color, log-level)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}
