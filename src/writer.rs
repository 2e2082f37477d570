//! Persists transformed bytes under the destination root.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::{debug, error};

use crate::error::{PipelineError, Result};

/// Write `data` to `destination_root/<file_name>`, replacing the extension with
/// `extension` (leading dot optional) when one is given.
///
/// Missing directories are created first; an existing file is overwritten.
pub async fn write(
    destination_root: &Path,
    file_name: &OsStr,
    extension: Option<&str>,
    data: &[u8],
) -> Result<PathBuf> {
    let mut path = destination_root.join(file_name);
    if let Some(ext) = extension {
        path.set_extension(ext.trim_start_matches('.'));
    }

    let parent = path.parent().unwrap_or(destination_root);
    tokio::fs::create_dir_all(parent).await.map_err(|e| {
        error!(path = %parent.display(), error = ?e, "Failed to create destination directory");
        PipelineError::io("create directory", parent, e)
    })?;

    tokio::fs::write(&path, data).await.map_err(|e| {
        error!(path = %path.display(), error = ?e, "Failed to write destination file");
        PipelineError::io("write file", path.clone(), e)
    })?;

    debug!(path = %path.display(), size = data.len(), "Wrote destination file");
    Ok(path)
}
