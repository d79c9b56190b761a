use crate::commands::{CmdMessage, CmdResult};
use crate::env::Environment;
use crate::error::Result;
use crate::shell::AppShell;

/// Search the open document. Never fails: no viewer or no search support
/// just means no answer.
pub fn run<E: Environment + 'static>(shell: &mut AppShell<E>, query: &str) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    let message = match shell.find(query) {
        Some(true) => CmdMessage::success(format!("Found \"{}\"", query)),
        Some(false) => CmdMessage::info(format!("No match for \"{}\"", query)),
        None if !shell.is_viewer_open() => CmdMessage::info("No document is open."),
        None => CmdMessage::info("Search is not available for this document."),
    };
    result.add_message(message);
    Ok(result)
}
