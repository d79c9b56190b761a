use crate::commands::{CmdMessage, CmdResult};
use crate::env::Environment;
use crate::error::Result;
use crate::shell::AppShell;
use crate::upload::UploadFile;
use std::path::PathBuf;

/// Upload files from disk. Unreadable paths fail the whole command before
/// anything is added; non-PDF files are skipped.
pub fn run<E: Environment + 'static>(shell: &mut AppShell<E>, paths: &[PathBuf]) -> Result<CmdResult> {
    let files = paths
        .iter()
        .map(UploadFile::from_path)
        .collect::<Result<Vec<_>>>()?;

    let added = shell.upload(files);
    let mut result = CmdResult::default();

    let mut records = Vec::with_capacity(added.len());
    for id in &added {
        if let Some(record) = shell.collection().get(id) {
            result.add_message(CmdMessage::success(format!("Uploaded: {}", record.name)));
            records.push(record.clone());
        }
    }
    if added.is_empty() {
        result.add_message(CmdMessage::info("No PDF files to upload."));
    }

    Ok(result.with_affected_records(records))
}
