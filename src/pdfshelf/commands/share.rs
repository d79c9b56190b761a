use crate::commands::{CmdMessage, CmdResult};
use crate::env::Environment;
use crate::error::{Result, ShelfError};
use crate::shell::AppShell;

/// Build the link that opens `id` and put it on the clipboard.
pub fn run<E: Environment + 'static>(shell: &AppShell<E>, id: &str) -> Result<CmdResult> {
    let url = shell
        .share(id)
        .ok_or_else(|| ShelfError::RecordNotFound(id.to_string()))?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::info(url));
    Ok(result)
}
