//! Copy text (job ids, transcriptions) to the system clipboard.

use std::io::Write;
use std::process::{Command, Stdio};

use anyhow::{Context, Result};
use arboard::Clipboard;

/// Copy `text` to the clipboard.
///
/// arboard first; if the compositor refuses (GNOME on Wayland does not
/// implement the wlr-data-control protocol arboard needs), fall back to
/// spawning `wl-copy`.
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    match try_arboard(text) {
        Ok(()) => Ok(()),
        Err(primary) => copy_via_wl_copy(text).map_err(|_| primary),
    }
}

fn try_arboard(text: &str) -> Result<()> {
    let mut clipboard = Clipboard::new().context("failed to access clipboard")?;
    clipboard
        .set_text(text)
        .context("failed to copy text to clipboard")?;
    Ok(())
}

fn copy_via_wl_copy(text: &str) -> Result<()> {
    let mut child = Command::new("wl-copy")
        .stdin(Stdio::piped())
        .spawn()
        .context("failed to spawn wl-copy")?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin
            .write_all(text.as_bytes())
            .context("failed to write to wl-copy")?;
    }

    let status = child.wait().context("failed to wait for wl-copy")?;
    if !status.success() {
        anyhow::bail!("wl-copy exited with non-zero status");
    }

    Ok(())
}
