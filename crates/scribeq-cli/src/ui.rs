//! Console notification and prompt helpers.
//!
//! Styled one-liners stand in for the toasts a graphical front end would
//! show; dialoguer confirmations stand in for its dialogs.

use anyhow::Result;
use console::style;
use dialoguer::{Confirm, theme::ColorfulTheme};

fn theme() -> ColorfulTheme {
    ColorfulTheme::default()
}

/// Confirm yes/no. Non-interactive sessions decline instead of blocking,
/// so the CLI stays safe to script.
pub fn confirm(prompt: &str, default: bool) -> Result<bool> {
    if !console::user_attended() {
        return Ok(false);
    }

    let theme = theme();
    Ok(Confirm::with_theme(&theme)
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}

/// Print a success message
pub fn success(text: &str) {
    println!("{} {}", style("✓").green().bold(), text);
}

/// Print an error message
pub fn error(text: &str) {
    eprintln!("{} {}", style("✗").red().bold(), text);
}

/// Print an info message
pub fn info(text: &str) {
    println!("{} {}", style("ℹ").blue(), text);
}
