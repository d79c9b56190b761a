use crate::commands::{CmdMessage, CmdResult};
use crate::env::Environment;
use crate::error::{Result, ShelfError};
use crate::export::{download, export_bundle};
use crate::model::PdfRecord;
use crate::shell::AppShell;
use std::path::Path;

/// Write records into `dir`: one record as its original file, several as a
/// single tar.gz bundle. An empty `ids` exports the whole collection.
pub fn run<E: Environment + 'static>(shell: &AppShell<E>, ids: &[String], dir: &Path) -> Result<CmdResult> {
    let collection = shell.collection();
    let records: Vec<&PdfRecord> = if ids.is_empty() {
        collection.records().iter().collect()
    } else {
        ids.iter()
            .map(|id| {
                collection
                    .get(id)
                    .ok_or_else(|| ShelfError::RecordNotFound(id.clone()))
            })
            .collect::<Result<_>>()?
    };

    let mut result = CmdResult::default();
    let path = match records.as_slice() {
        [] => {
            result.add_message(CmdMessage::info("No documents to export."));
            return Ok(result);
        }
        [single] => download(single, dir)?,
        many => export_bundle(many, dir)?,
    };

    result.add_message(CmdMessage::success(format!("Exported to {}", path.display())));
    Ok(result.with_paths(vec![path]))
}
