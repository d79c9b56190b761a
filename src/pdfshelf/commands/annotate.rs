use crate::commands::{CmdMessage, CmdResult};
use crate::env::Environment;
use crate::error::{Result, ShelfError};
use crate::overlay::SurfaceRect;
use crate::shell::AppShell;
use crate::viewer::{Tool, DEFAULT_ZOOM};

/// A drag on the open document.
///
/// Without a page size the corners are fractions of the page. With one they
/// are pixels on the page as rendered at `zoom`, i.e. on a surface of
/// `page * zoom` pixels. The viewer itself snaps `zoom` to its own range and
/// step; that never changes how the positions are read.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Drag {
    pub from: (f64, f64),
    pub to: (f64, f64),
    pub zoom: f64,
    pub page: Option<(f64, f64)>,
}

impl Drag {
    pub fn fractions(from: (f64, f64), to: (f64, f64)) -> Self {
        Self {
            from,
            to,
            zoom: DEFAULT_ZOOM,
            page: None,
        }
    }
}

/// Replay a highlight drag on the open document.
pub fn highlight<E: Environment + 'static>(shell: &mut AppShell<E>, drag: Drag) -> Result<CmdResult> {
    if !shell.is_viewer_open() {
        return Err(ShelfError::Api("No document is open".to_string()));
    }

    if !(drag.zoom.is_finite() && drag.zoom > 0.0) {
        return Err(ShelfError::Api(format!("Invalid zoom: {}", drag.zoom)));
    }

    shell.set_tool(Tool::Highlight);
    shell.set_zoom(drag.zoom);
    // Positions were measured at the requested zoom, not the snapped viewer zoom.
    let surface = match drag.page {
        Some((w, h)) => SurfaceRect::new(0.0, 0.0, w * drag.zoom, h * drag.zoom),
        None => SurfaceRect::unit(),
    };

    shell.pointer_down(surface, drag.from.0, drag.from.1);
    shell.pointer_move(surface, drag.to.0, drag.to.1);

    let mut result = CmdResult::default();
    match shell.pointer_up() {
        Some(annotation) => {
            result.add_message(CmdMessage::success(format!(
                "Highlighted {:.1}% x {:.1}% at ({:.1}%, {:.1}%)",
                annotation.w * 100.0,
                annotation.h * 100.0,
                annotation.x * 100.0,
                annotation.y * 100.0
            )));
            result.annotations.push(annotation);
        }
        None => result.add_message(CmdMessage::warning("Highlight too small, discarded.")),
    }
    Ok(result)
}

pub fn list<E: Environment + 'static>(shell: &AppShell<E>, id: &str) -> Result<CmdResult> {
    let record = shell
        .collection()
        .get(id)
        .ok_or_else(|| ShelfError::RecordNotFound(id.to_string()))?;
    Ok(CmdResult::default().with_annotations(record.annotations.clone()))
}

/// Remove annotations by 1-based position or id prefix.
pub fn unhighlight<E: Environment + 'static>(
    shell: &mut AppShell<E>,
    id: &str,
    selectors: &[String],
) -> Result<CmdResult> {
    let record = shell
        .collection()
        .get(id)
        .ok_or_else(|| ShelfError::RecordNotFound(id.to_string()))?;

    let targets = selectors
        .iter()
        .map(|sel| {
            let by_position = sel
                .parse::<usize>()
                .ok()
                .and_then(|n| n.checked_sub(1))
                .and_then(|i| record.annotations.get(i));
            by_position
                .or_else(|| record.annotations.iter().find(|a| a.id.starts_with(sel.as_str())))
                .cloned()
                .ok_or_else(|| ShelfError::Api(format!("No annotation {} on {}", sel, record.name)))
        })
        .collect::<Result<Vec<_>>>()?;

    let mut result = CmdResult::default();
    for annotation in targets {
        if shell.delete_annotation(id, &annotation.id) {
            result.annotations.push(annotation);
        }
    }
    result.add_message(CmdMessage::success(format!(
        "Removed {} highlight(s).",
        result.annotations.len()
    )));
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::MemEnvironment;
    use crate::store::fixtures::RecordFixture;
    use crate::store::RecordStore;
    use std::rc::Rc;

    fn shell() -> AppShell<MemEnvironment> {
        let env = Rc::new(MemEnvironment::new());
        let records = RecordFixture::new()
            .with_record("plain", "Plain")
            .with_annotated("marked", "Marked", 3)
            .build();
        RecordStore::new(Rc::clone(&env)).save(&records);
        AppShell::new(env)
    }

    #[test]
    fn highlight_needs_open_viewer() {
        let mut shell = shell();
        assert!(highlight(&mut shell, Drag::fractions((0.1, 0.1), (0.5, 0.5))).is_err());
    }

    #[test]
    fn highlight_in_fractions() {
        let mut shell = shell();
        shell.open_viewer("plain");
        let result = highlight(&mut shell, Drag::fractions((0.5, 0.5), (0.3, 0.2))).unwrap();
        let a = &result.annotations[0];
        assert!((a.x - 0.3).abs() < 1e-9 && (a.w - 0.2).abs() < 1e-9);
        assert_eq!(shell.collection().get("plain").unwrap().annotations.len(), 1);
    }

    #[test]
    fn highlight_in_zoomed_pixels() {
        let mut shell = shell();
        shell.open_viewer("plain");
        let drag = Drag {
            from: (150.0, 200.0),
            to: (450.0, 600.0),
            zoom: 1.5,
            page: Some((600.0, 800.0)),
        };
        let result = highlight(&mut shell, drag).unwrap();
        let a = &result.annotations[0];
        assert!((a.x - 150.0 / 900.0).abs() < 1e-9);
        assert!((a.y - 200.0 / 1200.0).abs() < 1e-9);
        assert!((a.w - 300.0 / 900.0).abs() < 1e-9);
        assert!((a.h - 400.0 / 1200.0).abs() < 1e-9);
    }

    #[test]
    fn off_grid_zoom_keeps_fractions_exact() {
        let mut shell = shell();
        shell.open_viewer("plain");
        let drag = Drag {
            from: (625.0, 625.0),
            to: (875.0, 875.0),
            zoom: 1.25,
            page: Some((1000.0, 1000.0)),
        };
        let result = highlight(&mut shell, drag).unwrap();
        let a = &result.annotations[0];
        assert!((a.x - 0.5).abs() < 1e-9);
        assert!((a.y - 0.5).abs() < 1e-9);
        assert!((a.w - 0.2).abs() < 1e-9);
        assert!((a.h - 0.2).abs() < 1e-9);
    }

    #[test]
    fn zoom_outside_viewer_range_still_normalizes_by_it() {
        let mut shell = shell();
        shell.open_viewer("plain");
        let drag = Drag {
            from: (300.0, 300.0),
            to: (900.0, 600.0),
            zoom: 3.0,
            page: Some((1000.0, 1000.0)),
        };
        let a = highlight(&mut shell, drag).unwrap().annotations[0].clone();
        assert!((a.x - 0.1).abs() < 1e-9);
        assert!((a.w - 0.2).abs() < 1e-9);
        assert!((a.h - 0.1).abs() < 1e-9);
        assert_eq!(shell.viewer().zoom(), 2.0);
    }

    #[test]
    fn rejects_non_positive_zoom() {
        let mut shell = shell();
        shell.open_viewer("plain");
        let drag = Drag {
            zoom: 0.0,
            ..Drag::fractions((0.1, 0.1), (0.5, 0.5))
        };
        assert!(highlight(&mut shell, drag).is_err());
        assert!(shell.collection().get("plain").unwrap().annotations.is_empty());
    }

    #[test]
    fn small_highlight_is_reported_not_stored() {
        let mut shell = shell();
        shell.open_viewer("plain");
        let result = highlight(&mut shell, Drag::fractions((0.2, 0.2), (0.205, 0.4))).unwrap();
        assert!(result.annotations.is_empty());
        assert_eq!(result.messages[0].level, crate::commands::MessageLevel::Warning);
        assert!(shell.collection().get("plain").unwrap().annotations.is_empty());
    }

    #[test]
    fn unhighlight_by_position_and_prefix() {
        let mut shell = shell();
        let third = shell.collection().get("marked").unwrap().annotations[2].id.clone();

        let result = unhighlight(&mut shell, "marked", &["1".to_string(), third[..8].to_string()]).unwrap();
        assert_eq!(result.annotations.len(), 2);
        assert_eq!(list(&shell, "marked").unwrap().annotations.len(), 1);

        assert!(unhighlight(&mut shell, "marked", &["9".to_string()]).is_err());
        assert!(unhighlight(&mut shell, "gone", &["1".to_string()]).is_err());
    }
}
