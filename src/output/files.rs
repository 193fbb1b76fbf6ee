//! Filesystem output: run directories, seed page snapshots and raw article text

use std::fs;
use std::path::{Path, PathBuf};

/// Creates the page snapshot and article directories if they are missing
///
/// Existing directories and their contents are left alone, so calling this
/// twice is harmless.
pub fn prepare_environment(pages_dir: &Path, articles_dir: &Path) -> std::io::Result<()> {
    for dir in [pages_dir, articles_dir] {
        fs::create_dir_all(dir)?;
        tracing::debug!("Output directory ready: {}", dir.display());
    }
    Ok(())
}

/// Writes the markup of the `index`-th seed page to `<dir>/<index>.html`
pub fn save_page_snapshot(dir: &Path, index: usize, html: &str) -> std::io::Result<PathBuf> {
    let path = dir.join(format!("{}.html", index));
    fs::write(&path, html)?;
    Ok(path)
}

/// Writes article text to `<dir>/<file_name>` as UTF-8, replacing any previous file
pub fn save_raw_text(dir: &Path, file_name: &str, text: &str) -> std::io::Result<PathBuf> {
    let path = dir.join(file_name);
    fs::write(&path, text)?;
    tracing::debug!("Saved {} bytes to {}", text.len(), path.display());
    Ok(path)
}
