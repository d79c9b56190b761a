use crate::commands::{CmdMessage, CmdResult};
use crate::env::Environment;
use crate::error::{Result, ShelfError};
use crate::model::PdfRecord;
use crate::shell::AppShell;
use crate::viewer::Tool;

/// Snapshot of the viewer for display.
#[derive(Debug, Clone)]
pub struct ViewerStatus {
    pub record: Option<PdfRecord>,
    pub tool: Tool,
    pub zoom_percent: u32,
    pub location: String,
}

pub fn open<E: Environment + 'static>(shell: &mut AppShell<E>, id: &str) -> Result<CmdResult> {
    if !shell.open_viewer(id) {
        return Err(ShelfError::RecordNotFound(id.to_string()));
    }
    let mut result = CmdResult::default();
    if let Some(record) = shell.active_record() {
        result.add_message(CmdMessage::success(format!("Viewing: {}", record.name)));
        result.affected_records.push(record.clone());
    }
    Ok(result.with_status(status_of(shell)))
}

pub fn close<E: Environment + 'static>(shell: &mut AppShell<E>) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    if shell.close_viewer() {
        result.add_message(CmdMessage::success("Viewer closed."));
    } else {
        result.add_message(CmdMessage::info("No document is open."));
    }
    Ok(result)
}

pub fn status<E: Environment + 'static>(shell: &AppShell<E>) -> Result<CmdResult> {
    Ok(CmdResult::default().with_status(status_of(shell)))
}

fn status_of<E: Environment + 'static>(shell: &AppShell<E>) -> ViewerStatus {
    ViewerStatus {
        record: shell.active_record().cloned(),
        tool: shell.viewer().tool(),
        zoom_percent: shell.viewer().zoom_percent(),
        location: shell.env().location(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::MemEnvironment;
    use crate::store::fixtures::RecordFixture;
    use crate::store::RecordStore;
    use std::rc::Rc;

    fn shell() -> AppShell<MemEnvironment> {
        let env = Rc::new(MemEnvironment::with_location("http://localhost:5173/"));
        RecordStore::new(Rc::clone(&env)).save(&RecordFixture::new().with_records(2).build());
        AppShell::new(env)
    }

    #[test]
    fn open_reports_status_with_link() {
        let mut shell = shell();
        let result = open(&mut shell, "r2").unwrap();
        let status = result.status.unwrap();
        assert_eq!(status.record.unwrap().id, "r2");
        assert_eq!(status.zoom_percent, 100);
        assert_eq!(status.location, "http://localhost:5173/?pdfId=r2");
        assert_eq!(result.affected_records[0].views, 1);
    }

    #[test]
    fn open_unknown_is_an_error() {
        let mut shell = shell();
        assert!(matches!(open(&mut shell, "zz"), Err(ShelfError::RecordNotFound(_))));
    }

    #[test]
    fn close_reports_whether_anything_was_open() {
        let mut shell = shell();
        let closed = close(&mut shell).unwrap();
        assert_eq!(closed.messages[0].level, crate::commands::MessageLevel::Info);

        open(&mut shell, "r1").unwrap();
        let closed = close(&mut shell).unwrap();
        assert_eq!(closed.messages[0].level, crate::commands::MessageLevel::Success);
        assert!(status(&shell).unwrap().status.unwrap().record.is_none());
    }
}
