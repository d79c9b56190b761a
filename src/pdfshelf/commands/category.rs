use crate::commands::{CmdMessage, CmdResult};
use crate::env::Environment;
use crate::error::{Result, ShelfError};
use crate::shell::AppShell;

pub fn run<E: Environment + 'static>(
    shell: &mut AppShell<E>,
    ids: &[String],
    category: &str,
) -> Result<CmdResult> {
    let category = category.trim().to_lowercase();
    if category.is_empty() {
        return Err(ShelfError::Api("Category cannot be empty".to_string()));
    }

    let mut result = CmdResult::default();
    for id in ids {
        if !shell.set_category(id, &category) {
            continue;
        }
        if let Some(record) = shell.collection().get(id) {
            result.add_message(CmdMessage::success(format!(
                "{} moved to {}",
                record.name, category
            )));
            result.affected_records.push(record.clone());
        }
    }
    Ok(result)
}
