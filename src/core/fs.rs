//! File writes that never leave a half-written file behind.

use std::{fs, path::Path};

use anyhow::{Context, Result};

/// Write `content` to `path` via a temp file in the same directory + rename.
///
/// Parent directories are created when missing.
pub fn atomic_write(path: &Path, content: &str) -> Result<()> {
    let parent = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent)
        .with_context(|| format!("Failed to create directory '{}'", parent.display()))?;

    let file_name = path.file_name().unwrap_or_default().to_string_lossy();
    let temp_path = parent.join(format!(".{file_name}.tmp"));

    fs::write(&temp_path, content)
        .with_context(|| format!("Failed to write '{}'", temp_path.display()))?;
    // Same filesystem, so the rename is atomic.
    fs::rename(&temp_path, path).with_context(|| {
        let _ = fs::remove_file(&temp_path);
        format!("Failed to replace '{}'", path.display())
    })?;

    Ok(())
}
