//! Command line interface for filepipe.
//!
//! The binary is a thin caller of [`crate::process`] and [`crate::process_buffer`]:
//! all pipeline behaviour lives in the library modules.
//!
//! - `filepipe run --config batch.yaml` processes every file the config matches and
//!   prints a JSON summary on stdout.
//! - `filepipe buffer --config batch.yaml --input a.png` runs only the config's plugins
//!   over one file's bytes and writes them to `--output` or stdout.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;

use crate::batch::{process, process_buffer};
use crate::error::PipelineError;
use crate::load_config::load_config;

#[derive(Parser)]
#[clap(
    name = "filepipe",
    version,
    about = "Run files through an ordered chain of byte-transform plugins"
)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Process every file matched by the config's input patterns
    Run {
        /// Path to the YAML config file
        #[clap(long)]
        config: PathBuf,
        /// Override the config's destination directory
        #[clap(long)]
        destination: Option<PathBuf>,
        /// Treat input entries as literal paths instead of glob patterns
        #[clap(long)]
        no_glob: bool,
    },
    /// Apply the config's plugins to a single buffer, without format detection
    Buffer {
        /// Path to the YAML config file (only `plugins` is used)
        #[clap(long)]
        config: PathBuf,
        /// File whose bytes form the buffer
        #[clap(long)]
        input: PathBuf,
        /// Where to write the result; stdout when omitted
        #[clap(long)]
        output: Option<PathBuf>,
    },
}

/// Async CLI entrypoint shared by `main()` and integration tests.
pub async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Run {
            config,
            destination,
            no_glob,
        } => {
            let config = load_config(&config)?;
            let mut options = config.options();
            if let Some(destination) = destination {
                options.destination = Some(destination);
            }
            if no_glob {
                options.glob = false;
            }

            tracing::info!(command = "run", "Starting batch");
            let records = process(&config.input, &options).await?;
            let summary: Vec<_> = records
                .iter()
                .map(|r| {
                    serde_json::json!({
                        "source": r.source_path,
                        "destination": r.destination_path,
                        "size": r.data.len(),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&summary)?);
            Ok(())
        }
        Commands::Buffer {
            config,
            input,
            output,
        } => {
            let config = load_config(&config)?;
            let data = read_buffer_source(&input).await?;
            tracing::info!(command = "buffer", size = data.len(), "Transforming buffer");
            let data = process_buffer(data, &config.plugins()).await?;
            match output {
                Some(path) => tokio::fs::write(&path, &data)
                    .await
                    .with_context(|| format!("failed to write {}", path.display()))?,
                None => {
                    let mut stdout = tokio::io::stdout();
                    stdout.write_all(&data).await?;
                    stdout.flush().await?;
                }
            }
            Ok(())
        }
    }
}

/// Reads `path` as a byte buffer, refusing anything that is not a regular file.
pub(crate) async fn read_buffer_source(path: &Path) -> Result<Vec<u8>, PipelineError> {
    let metadata = tokio::fs::metadata(path)
        .await
        .map_err(|e| PipelineError::io("stat", path, e))?;
    if !metadata.is_file() {
        return Err(PipelineError::InvalidInput(format!(
            "{} which is not a regular file",
            path.display()
        )));
    }
    tokio::fs::read(path)
        .await
        .map_err(|e| PipelineError::io("read file", path, e))
}
