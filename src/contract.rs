//! # contract: seams between the pipeline and its collaborators
//!
//! This module defines the traits the batch pipeline talks to, plus the plain
//! data it hands back to callers.
//!
//! ## Interface & Extensibility
//! - Implement [`Plugin`] to add a byte transform (image optimiser, compressor, ...).
//! - Implement [`Sniffer`] to swap in a richer content-type detector.
//! - Implement [`JunkFilter`] to change which basenames are ignored by default.
//!
//! ## Mocking & Testing
//! - [`Plugin`] is annotated for `mockall`, so tests can assert call counts and ordering
//!   with `MockPlugin`.

use async_trait::async_trait;
use std::path::PathBuf;

#[cfg(any(test, feature = "test-export-mocks"))]
use mockall::automock;

/// Boxed error returned by plugins; chained into [`crate::error::PipelineError::Plugin`].
pub type PluginFailure = Box<dyn std::error::Error + Send + Sync>;

/// The per-file result unit returned by [`crate::process`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    /// Transformed bytes, exactly as written to `destination_path` (if any).
    pub data: Vec<u8>,
    /// The resolved source path the bytes were read from.
    pub source_path: PathBuf,
    /// Where the bytes were written; `None` when no destination was configured.
    pub destination_path: Option<PathBuf>,
}

/// A single asynchronous byte-buffer transformer.
///
/// Plugins own the buffer they are given and return a new one. They are run
/// strictly one after another, so an implementation never sees concurrent calls
/// from the same batch.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait Plugin: Send + Sync {
    /// Transform `data` into its new content.
    async fn transform(&self, data: Vec<u8>) -> Result<Vec<u8>, PluginFailure>;
}

/// Best-guess content type detection over a byte buffer.
pub trait Sniffer: Send + Sync {
    /// Returns the detected extension without a leading dot (e.g. `"webp"`),
    /// or `None` when the content is not recognised.
    fn sniff(&self, data: &[u8]) -> Option<&'static str>;
}

/// Classifies a basename as incidental OS/editor metadata.
pub trait JunkFilter: Send + Sync {
    fn is_junk(&self, basename: &str) -> bool;
}
