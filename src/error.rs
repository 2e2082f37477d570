//! Error types for the pipeline, derived with `thiserror`.

use std::path::PathBuf;
use thiserror::Error;

use crate::contract::PluginFailure;

/// Coarse classification of a [`PipelineError`], looking through file context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    InvalidInput,
    Io,
    Plugin,
}

#[derive(Error, Debug)]
pub enum PipelineError {
    /// Malformed input or plugin configuration, detected before any file is touched.
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// Buffer mode was handed something that is not a byte buffer.
    #[error("Expected a byte buffer, got {0}")]
    InvalidInput(String),

    #[error("Failed to {action} {path}")]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Plugin #{index} failed")]
    Plugin {
        index: usize,
        #[source]
        source: PluginFailure,
    },

    /// Any failure while a specific file was active in a batch.
    #[error("Error occurred when handling file {path} (input: {input:?})")]
    HandleFile {
        input: Vec<String>,
        path: PathBuf,
        #[source]
        source: Box<PipelineError>,
    },
}

impl PipelineError {
    pub(crate) fn io(action: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PipelineError::Io {
            action,
            path: path.into(),
            source,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            PipelineError::Configuration(_) => ErrorKind::Configuration,
            PipelineError::InvalidInput(_) => ErrorKind::InvalidInput,
            PipelineError::Io { .. } => ErrorKind::Io,
            PipelineError::Plugin { .. } => ErrorKind::Plugin,
            PipelineError::HandleFile { source, .. } => source.kind(),
        }
    }

    /// The file that was being handled when the error occurred, if known.
    pub fn file(&self) -> Option<&std::path::Path> {
        match self {
            PipelineError::HandleFile { path, .. } => Some(path),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn kind_looks_through_file_context() {
        let inner = PipelineError::Plugin {
            index: 1,
            source: "boom".into(),
        };
        let err = PipelineError::HandleFile {
            input: vec!["*.png".into()],
            path: PathBuf::from("b.png"),
            source: Box::new(inner),
        };
        assert_eq!(err.kind(), ErrorKind::Plugin);
        assert_eq!(err.file(), Some(std::path::Path::new("b.png")));
        assert!(err.to_string().contains("b.png"));

        let plugin = err.source().expect("wrapped error");
        assert_eq!(plugin.source().map(|e| e.to_string()), Some("boom".into()));
    }
}
