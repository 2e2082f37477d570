//! Expands input patterns into the ordered list of files a batch will visit.
//!
//! Expansion follows the usual glob conventions: `*` stays within one path
//! segment, `**` crosses directories, and wildcards do not match hidden
//! (dot-prefixed) names. A pattern starting with `!` removes matches of the
//! remaining positive patterns.

use glob::{MatchOptions, Pattern};
use std::collections::HashSet;
use std::path::PathBuf;
use tracing::{debug, error};

use crate::error::{PipelineError, Result};
use crate::paths::normalize;

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: true,
};

/// Resolve `patterns` to concrete file paths.
///
/// With `use_glob` disabled the normalized patterns are returned as literal paths.
pub async fn resolve(patterns: &[String], use_glob: bool) -> Result<Vec<PathBuf>> {
    let normalized: Vec<String> = patterns.iter().map(|p| normalize(p)).collect();
    if !use_glob {
        debug!(count = normalized.len(), "Glob disabled, using input paths literally");
        return Ok(normalized.into_iter().map(PathBuf::from).collect());
    }

    let joined = normalized.join(", ");
    tokio::task::spawn_blocking(move || expand(&normalized))
        .await
        .map_err(|e| {
            error!(error = ?e, "Pattern expansion task failed");
            PipelineError::io("expand patterns", joined, std::io::Error::other(e))
        })?
}

fn expand(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut negated = Vec::new();
    for pattern in patterns.iter().filter_map(|p| p.strip_prefix('!')) {
        negated.push(compile(pattern)?);
    }

    let mut seen = HashSet::new();
    let mut files = Vec::new();
    for pattern in patterns.iter().filter(|p| !p.starts_with('!')) {
        let paths = glob::glob_with(pattern, MATCH_OPTIONS).map_err(|e| {
            PipelineError::Configuration(format!("invalid glob pattern `{pattern}`: {e}"))
        })?;

        let before = files.len();
        for entry in paths {
            let path = entry.map_err(|e| {
                error!(path = %e.path().display(), "Failed to traverse directory during glob");
                let path = e.path().to_path_buf();
                PipelineError::io("read directory", path, e.into())
            })?;
            if !path.is_file() {
                continue;
            }
            if negated.iter().any(|n| n.matches_path_with(&path, MATCH_OPTIONS)) {
                continue;
            }
            if seen.insert(path.clone()) {
                files.push(path);
            }
        }
        debug!(pattern = %pattern, matched = files.len() - before, "Expanded pattern");
    }
    Ok(files)
}

fn compile(pattern: &str) -> Result<Pattern> {
    Pattern::new(pattern).map_err(|e| {
        PipelineError::Configuration(format!("invalid glob pattern `!{pattern}`: {e}"))
    })
}
