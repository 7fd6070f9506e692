use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::foundation::error::StampResult;

/// `<dir>/<stem>_stamped<.ext>` beside `source`.
pub fn default_output_path(source: &Path) -> PathBuf {
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "photo".to_owned());
    let name = match source.extension() {
        Some(ext) => format!("{stem}_stamped.{}", ext.to_string_lossy()),
        None => format!("{stem}_stamped"),
    };
    source.with_file_name(name)
}

pub fn ensure_parent_dir(path: &Path) -> StampResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

/// Sibling temp file that is deleted on drop unless it was renamed into place.
struct StagingFile {
    path: PathBuf,
    keep: bool,
}

impl StagingFile {
    fn beside(target: &Path) -> Self {
        let name = target
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "output".to_owned());
        let path = target.with_file_name(format!(".{name}.{}.partial", std::process::id()));
        Self { path, keep: false }
    }
}

impl Drop for StagingFile {
    fn drop(&mut self) {
        if !self.keep {
            let _ = std::fs::remove_file(&self.path);
        }
    }
}

/// Write `bytes` to `path` via a staging file and a rename, creating parent directories.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> StampResult<()> {
    ensure_parent_dir(path)?;
    let mut staging = StagingFile::beside(path);
    std::fs::write(&staging.path, bytes)
        .with_context(|| format!("write '{}'", staging.path.display()))?;
    std::fs::rename(&staging.path, path).with_context(|| {
        format!(
            "move '{}' into place at '{}'",
            staging.path.display(),
            path.display()
        )
    })?;
    staging.keep = true;
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/stamp/output.rs"]
mod tests;
