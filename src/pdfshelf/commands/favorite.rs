use crate::commands::{CmdMessage, CmdResult};
use crate::env::Environment;
use crate::error::Result;
use crate::shell::AppShell;

pub fn favorite<E: Environment + 'static>(shell: &mut AppShell<E>, ids: &[String]) -> Result<CmdResult> {
    set_state(shell, ids, true)
}

pub fn unfavorite<E: Environment + 'static>(shell: &mut AppShell<E>, ids: &[String]) -> Result<CmdResult> {
    set_state(shell, ids, false)
}

fn set_state<E: Environment + 'static>(
    shell: &mut AppShell<E>,
    ids: &[String],
    value: bool,
) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    for id in ids {
        if !shell.set_favorite(id, value) {
            continue;
        }
        if let Some(record) = shell.collection().get(id) {
            let verb = if value { "Favorited" } else { "Unfavorited" };
            result.add_message(CmdMessage::success(format!("{}: {}", verb, record.name)));
            result.affected_records.push(record.clone());
        }
    }

    Ok(result)
}
