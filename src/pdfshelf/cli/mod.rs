//! # CLI Layer
//!
//! One host for the shelf; the only code that touches stdout, stderr and
//! exit codes. Each invocation builds a fresh [`AppShell`] over a
//! [`SystemEnvironment`], so state that must outlive the process (records,
//! settings, the "page location" carrying the deep link) lives in the data
//! directory. Viewer session state (tool, zoom) lasts one invocation.
//!
//! - `setup`: clap definitions
//! - `commands`: context setup and per-command handlers
//! - `print`: turning `CmdResult` into terminal output
//!
//! [`AppShell`]: pdfshelf::shell::AppShell
//! [`SystemEnvironment`]: pdfshelf::env::SystemEnvironment

mod commands;
mod print;
mod setup;

pub use commands::run;
