pub mod note;

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::config::DeliveryConfig;

/// Where the final text goes. An explicit enum rather than positional dialog
/// indices, so the flow's branching is independent of any presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    Clipboard,
    Note,
    Stdout,
    File(PathBuf),
}

/// Deliver `text` to the chosen destination. `original` is the source
/// transcript when `text` is a processed summary; note delivery keeps the two
/// together in one note.
pub fn deliver(
    text: &str,
    original: Option<&str>,
    destination: &Destination,
    config: &DeliveryConfig,
) -> Result<()> {
    match destination {
        Destination::Clipboard => {
            let mut clipboard =
                arboard::Clipboard::new().context("Failed to open the clipboard")?;
            clipboard
                .set_text(text.to_string())
                .context("Failed to copy to the clipboard")?;
            tracing::info!("Copied {} chars to clipboard", text.len());
            println!("Copied to clipboard.");
        }
        Destination::Note => {
            let title = format!(
                "{} {}",
                config.note_title,
                chrono::Local::now().format("%Y-%m-%d %H:%M")
            );
            let body = note::note_body(text, original);
            let url = note::create_url(&config.note_scheme, &title, &body);
            note::open_url(&url).context("Failed to open the note app")?;
            tracing::info!("Opened note URL ({} chars of body)", body.len());
            println!("Saved to note: {}", title);
        }
        Destination::Stdout => {
            println!("{}", text);
        }
        Destination::File(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)
                        .with_context(|| format!("Failed to create {}", parent.display()))?;
                }
            }
            std::fs::write(path, text)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("Written to {}", path.display());
        }
    }
    Ok(())
}
