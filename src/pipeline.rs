//! Plugin pipeline: folds an ordered plugin list into one transform over a buffer.
//!
//! Plugins run strictly left to right. Each call is awaited before the next one
//! starts, since every plugin consumes the previous plugin's output.

use async_trait::async_trait;
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, error};

use crate::contract::{Plugin, PluginFailure};
use crate::error::{PipelineError, Result};

/// Apply `plugins` to `data` in order. An empty list returns `data` untouched.
pub async fn transform(data: Vec<u8>, plugins: &[Arc<dyn Plugin>]) -> Result<Vec<u8>> {
    let mut data = data;
    for (index, plugin) in plugins.iter().enumerate() {
        let input_len = data.len();
        data = plugin.transform(data).await.map_err(|source| {
            error!(plugin = index, error = %source, "Plugin failed");
            PipelineError::Plugin { index, source }
        })?;
        debug!(plugin = index, input_len, output_len = data.len(), "Plugin applied");
    }
    Ok(data)
}

/// Adapts an async closure into a [`Plugin`].
pub struct FnPlugin<F> {
    f: F,
}

/// Wrap `f` so it can sit in a plugin list.
///
/// ```
/// use filepipe::contract::PluginFailure;
/// use filepipe::pipeline::plugin_fn;
///
/// let upper = plugin_fn(|data: Vec<u8>| async move {
///     Ok::<_, PluginFailure>(data.to_ascii_uppercase())
/// });
/// ```
pub fn plugin_fn<F, Fut>(f: F) -> FnPlugin<F>
where
    F: Fn(Vec<u8>) -> Fut + Send + Sync,
    Fut: Future<Output = std::result::Result<Vec<u8>, PluginFailure>> + Send + 'static,
{
    FnPlugin { f }
}

#[async_trait]
impl<F, Fut> Plugin for FnPlugin<F>
where
    F: Fn(Vec<u8>) -> Fut + Send + Sync,
    Fut: Future<Output = std::result::Result<Vec<u8>, PluginFailure>> + Send + 'static,
{
    async fn transform(&self, data: Vec<u8>) -> std::result::Result<Vec<u8>, PluginFailure> {
        (self.f)(data).await
    }
}
