//! Typed batch configuration and the plugin specs it can name.

use serde::Deserialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

use crate::batch::Options;
use crate::contract::Plugin;
use crate::plugins::{CommandPlugin, IdentityPlugin};

/// A batch described in YAML. See [`crate::load_config`] for loading and shape checks.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BatchConfig {
    pub input: Vec<String>,
    #[serde(default = "default_glob")]
    pub glob: bool,
    #[serde(default)]
    pub exclude_files: Option<Vec<String>>,
    #[serde(default)]
    pub destination: Option<PathBuf>,
    #[serde(default)]
    pub plugins: Vec<PluginSpec>,
}

fn default_glob() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PluginSpec {
    /// Pass bytes through unchanged.
    Identity,
    /// Pipe bytes through an external program's stdin/stdout.
    Command {
        program: String,
        #[serde(default)]
        args: Vec<String>,
    },
}

impl PluginSpec {
    pub fn build(&self) -> Arc<dyn Plugin> {
        match self {
            PluginSpec::Identity => Arc::new(IdentityPlugin),
            PluginSpec::Command { program, args } => Arc::new(CommandPlugin::new(program.clone(), args.clone())),
        }
    }
}

impl BatchConfig {
    pub fn trace_loaded(&self) {
        info!(
            inputs = self.input.len(),
            glob = self.glob,
            destination = ?self.destination,
            plugins = self.plugins.len(),
            "Loaded BatchConfig"
        );
        debug!(?self, "BatchConfig loaded (full debug)");
    }

    pub fn plugins(&self) -> Vec<Arc<dyn Plugin>> {
        self.plugins.iter().map(PluginSpec::build).collect()
    }

    /// Build pipeline options; collaborators (sniffer, junk filter) keep their defaults.
    pub fn options(&self) -> Options {
        Options {
            glob: self.glob,
            exclude_files: self.exclude_files.clone(),
            destination: self.destination.clone(),
            plugins: self.plugins(),
            ..Options::default()
        }
    }
}
