use crate::error::{Result, ShelfError};
use std::io::Write;
use std::process::{Command, Stdio};

/// Clipboard programs to try, in order, for the current platform.
#[cfg(target_os = "macos")]
const CLIPBOARD_PROGRAMS: &[(&str, &[&str])] = &[("pbcopy", &[])];

#[cfg(target_os = "linux")]
const CLIPBOARD_PROGRAMS: &[(&str, &[&str])] = &[
    ("wl-copy", &[]),
    ("xclip", &["-selection", "clipboard"]),
    ("xsel", &["--clipboard", "--input"]),
];

#[cfg(target_os = "windows")]
const CLIPBOARD_PROGRAMS: &[(&str, &[&str])] = &[("clip", &[])];

#[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
const CLIPBOARD_PROGRAMS: &[(&str, &[&str])] = &[];

/// Copies text to the system clipboard by piping it into the first
/// clipboard program that can be spawned.
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    if CLIPBOARD_PROGRAMS.is_empty() {
        return Err(ShelfError::Unsupported(
            "Clipboard not supported on this platform".to_string(),
        ));
    }

    let mut last_error = None;
    for (program, args) in CLIPBOARD_PROGRAMS {
        match pipe_into(program, args, text) {
            Ok(()) => return Ok(()),
            Err(e) => last_error = Some(e),
        }
    }

    Err(last_error.unwrap_or_else(|| ShelfError::Unsupported("No clipboard program".to_string())))
}

fn pipe_into(program: &str, args: &[&str], text: &str) -> Result<()> {
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| ShelfError::Unsupported(format!("Failed to spawn {program}: {e}")))?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin
            .write_all(text.as_bytes())
            .map_err(|e| ShelfError::Api(format!("Failed to write to {program}: {e}")))?;
    }

    let status = child
        .wait()
        .map_err(|e| ShelfError::Api(format!("Failed to wait for {program}: {e}")))?;

    if status.success() {
        Ok(())
    } else {
        Err(ShelfError::Api(format!("{program} exited with error")))
    }
}
