//! # pdfshelf Architecture
//!
//! pdfshelf is the core of a local-first PDF dashboard: a shelf of uploaded
//! documents with categories, favorites, a view history, shareable deep links
//! and highlight annotations drawn over the rendered page. It is a library
//! first; the `pdfshelf` binary is one host for it, a browser front end is
//! another.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI (cli/, wired by main.rs)                               │
//! │  - Parses arguments, prints results, owns exit codes        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API (api.rs) + commands (commands/*.rs)                    │
//! │  - Selectors → record ids, one module per user action       │
//! │  - Returns CmdResult, never prints                          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Shell (shell.rs)                                           │
//! │  - Owns the collection, the viewer session and the overlay  │
//! │  - Mirrors the collection to storage, syncs the deep link   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Environment (env.rs, store/)                               │
//! │  - Key-value storage, page location, clipboard, find        │
//! │  - MemEnvironment (tests), SystemEnvironment (CLI)          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Single-threaded by construction
//!
//! Everything runs on one logical thread, driven by discrete events. State is
//! shared through `Rc` and `RefCell`; there are no locks and nothing is
//! `Send`. Every mutation completes (and is mirrored to storage) before the
//! next event is handled.
//!
//! ## Nothing here is fatal
//!
//! Corrupt storage loads as empty, unknown ids are no-ops, a missing
//! clipboard or search capability is logged and ignored. Errors are reserved
//! for bad input from the caller: an unreadable upload path, a reorder that
//! is not a permutation, an unknown selector.
//!
//! ## Module Overview
//!
//! - [`api`]: facade, entry point for every operation
//! - [`commands`]: one module per user action
//! - [`shell`]: the application state container
//! - [`collection`]: ordered, observable list of records and its projections
//! - [`deeplink`]: the `pdfId` URL parameter
//! - [`viewer`]: tool mode, zoom, find
//! - [`overlay`]: highlight drag state machine and render layer
//! - [`store`]: storage backends and the record store
//! - [`env`]: the host capabilities the core depends on
//! - [`upload`], [`export`], [`data_url`]: getting documents in and out
//! - [`selector`]: command-line record selectors
//! - [`settings`], [`config`]: persisted UI settings and host configuration
//! - [`model`], [`error`]: core types
//! - `cli`: argument parsing and printing for the binary (not part of the lib API)

pub mod api;
pub mod clipboard;
pub mod collection;
pub mod commands;
pub mod config;
pub mod data_url;
pub mod deeplink;
pub mod env;
pub mod error;
pub mod export;
pub mod model;
pub mod overlay;
pub mod selector;
pub mod settings;
pub mod shell;
pub mod store;
pub mod upload;
pub mod viewer;
