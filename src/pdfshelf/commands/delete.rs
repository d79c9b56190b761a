use crate::commands::{CmdMessage, CmdResult};
use crate::env::Environment;
use crate::error::Result;
use crate::shell::AppShell;

/// Delete records for good, annotations included.
pub fn run<E: Environment + 'static>(shell: &mut AppShell<E>, ids: &[String]) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    for id in ids {
        let was_open = shell.active_id() == Some(id.as_str());
        let Some(record) = shell.remove(id) else {
            continue;
        };
        result.add_message(CmdMessage::success(format!("Deleted: {}", record.name)));
        if was_open {
            result.add_message(CmdMessage::info("Viewer closed."));
        }
        result.affected_records.push(record);
    }

    Ok(result)
}
