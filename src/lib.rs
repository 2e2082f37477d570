#![doc = "filepipe: batch file transformation through ordered async byte plugins."]

//! Resolves input patterns to files, pushes each file's bytes through an ordered
//! chain of [`Plugin`]s, sniffs the resulting content type and writes the result
//! under a destination directory.
//!
//! # Usage
//! - [`process`] runs a whole batch and returns one [`FileRecord`] per file.
//! - [`process_buffer`] applies only the plugin chain to bytes already in memory.
//! - [`load_config`] builds [`Options`] from a YAML file for configuration-driven runs.

pub mod batch;
pub mod cli;
pub mod config;
pub mod contract;
pub mod error;
pub mod filter;
pub mod format;
pub mod load_config;
pub mod paths;
pub mod pipeline;
pub mod plugins;
pub mod resolve;
pub mod sniff;
pub mod writer;

pub use batch::{process, process_buffer, Options};
pub use cli::{run, Cli, Commands};
pub use contract::{FileRecord, Plugin, PluginFailure};
pub use error::{ErrorKind, PipelineError};
pub use load_config::load_config;
pub use pipeline::plugin_fn;
