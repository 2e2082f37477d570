//! Batch orchestration: resolve → filter → read → plugins → sniff → write.
//!
//! # Scheduling contract
//! A batch is one linear sequence. Files are handled strictly in resolution order
//! and, within a file, plugins run strictly in configured order. Nothing is spawned
//! or joined concurrently, so the first failure always belongs to the earliest
//! failing file and no later file has been touched.
//!
//! # Error Handling
//! Any failure while a file is active aborts the batch and is returned wrapped in
//! [`PipelineError::HandleFile`] with the input set and file attached. Records of
//! files processed before the failure are dropped.

use std::fmt;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, error, info};

use crate::contract::{FileRecord, JunkFilter, Plugin, Sniffer};
use crate::error::{PipelineError, Result};
use crate::filter::{should_process, DefaultJunkFilter};
use crate::format::resolve_extension;
use crate::sniff::MagicSniffer;
use crate::{pipeline, resolve, writer};

/// Batch options. Taken by shared reference, never mutated by the pipeline.
#[derive(Clone)]
pub struct Options {
    /// Treat inputs as glob patterns (default) or as literal paths.
    pub glob: bool,
    /// Skip any file whose path contains one of these substrings.
    pub exclude_files: Option<Vec<String>>,
    /// Write root. Without it records only carry in-memory data.
    pub destination: Option<std::path::PathBuf>,
    pub plugins: Vec<Arc<dyn Plugin>>,
    pub sniffer: Arc<dyn Sniffer>,
    pub junk: Arc<dyn JunkFilter>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            glob: true,
            exclude_files: None,
            destination: None,
            plugins: Vec::new(),
            sniffer: Arc::new(MagicSniffer),
            junk: Arc::new(DefaultJunkFilter::new()),
        }
    }
}

impl fmt::Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options")
            .field("glob", &self.glob)
            .field("exclude_files", &self.exclude_files)
            .field("destination", &self.destination)
            .field("plugins", &self.plugins.len())
            .finish_non_exhaustive()
    }
}

impl Options {
    pub fn with_destination(mut self, destination: impl Into<std::path::PathBuf>) -> Self {
        self.destination = Some(destination.into());
        self
    }

    pub fn with_plugin(mut self, plugin: impl Plugin + 'static) -> Self {
        self.plugins.push(Arc::new(plugin));
        self
    }

    pub fn with_glob(mut self, glob: bool) -> Self {
        self.glob = glob;
        self
    }

    pub fn with_exclude_files(mut self, exclude_files: Vec<String>) -> Self {
        self.exclude_files = Some(exclude_files);
        self
    }
}

/// Run the full pipeline over every file matched by `input`.
pub async fn process(input: &[String], options: &Options) -> Result<Vec<FileRecord>> {
    info!(input = ?input, ?options, "Starting batch");

    let files = resolve::resolve(input, options.glob).await?;
    info!(resolved = files.len(), "Resolved input files");

    let mut records = Vec::new();
    for file in &files {
        if !should_process(file, options.exclude_files.as_deref(), options.junk.as_ref()) {
            debug!(path = %file.display(), "Skipping excluded file");
            continue;
        }
        match handle_file(file, options).await {
            Ok(record) => records.push(record),
            Err(e) => {
                error!(path = %file.display(), error = %e, "Batch aborted");
                return Err(PipelineError::HandleFile {
                    input: input.to_vec(),
                    path: file.clone(),
                    source: Box::new(e),
                });
            }
        }
    }

    info!(processed = records.len(), "Batch complete");
    Ok(records)
}

async fn handle_file(path: &Path, options: &Options) -> Result<FileRecord> {
    let data = tokio::fs::read(path)
        .await
        .map_err(|e| PipelineError::io("read file", path, e))?;
    debug!(path = %path.display(), size = data.len(), "Read source file");

    let data = pipeline::transform(data, &options.plugins).await?;
    let format = resolve_extension(&data, path, options.sniffer.as_ref());

    let destination_path = match &options.destination {
        Some(root) => {
            let file_name = path.file_name().ok_or_else(|| {
                PipelineError::io(
                    "derive file name of",
                    path,
                    std::io::Error::new(std::io::ErrorKind::InvalidInput, "path has no file name"),
                )
            })?;
            let extension = format.rewrite.then_some(format.extension.as_str());
            Some(writer::write(root, file_name, extension, &data).await?)
        }
        None => None,
    };

    Ok(FileRecord {
        data,
        source_path: path.to_path_buf(),
        destination_path,
    })
}

/// Apply only the plugin chain to an in-memory buffer. No filesystem access.
pub async fn process_buffer(data: Vec<u8>, plugins: &[Arc<dyn Plugin>]) -> Result<Vec<u8>> {
    if plugins.is_empty() {
        return Ok(data);
    }
    debug!(size = data.len(), plugins = plugins.len(), "Transforming buffer");
    pipeline::transform(data, plugins).await
}
