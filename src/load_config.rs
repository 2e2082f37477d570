//! Loads YAML batch configs, rejecting malformed `input` or `plugins` shapes up front.

use serde_yaml::Value;
use std::fs;
use std::path::Path;
use tracing::{error, info};

use crate::config::BatchConfig;
use crate::error::{PipelineError, Result};

/// Loads a YAML batch config file, checking the shape of `input` and `plugins`
/// before anything touches the files they name.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<BatchConfig> {
    let path_ref = path.as_ref();
    info!(config_path = ?path_ref, "Loading configuration from file");

    let content = match fs::read_to_string(path_ref) {
        Ok(content) => content,
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to read config file");
            return Err(PipelineError::Configuration(format!(
                "failed to read config file {}: {e}",
                path_ref.display()
            )));
        }
    };

    let config = parse_config(&content)?;
    config.trace_loaded();
    Ok(config)
}

/// Parses YAML config text. Exposed separately so callers can embed configs.
pub fn parse_config(content: &str) -> Result<BatchConfig> {
    let value: Value = match serde_yaml::from_str(content) {
        Ok(value) => value,
        Err(e) => {
            error!(error = ?e, "Failed to parse config YAML");
            return Err(PipelineError::Configuration(format!("failed to parse config YAML: {e}")));
        }
    };

    let Value::Mapping(map) = &value else {
        return Err(PipelineError::Configuration(format!(
            "expected a mapping at the top level, got {}",
            describe(&value)
        )));
    };

    match map.get("input") {
        Some(Value::Sequence(_)) => {}
        Some(other) => {
            error!(found = describe(other), "Config `input` is not a sequence");
            return Err(PipelineError::Configuration(format!(
                "`input` expected a sequence, got {}",
                describe(other)
            )));
        }
        None => return Err(PipelineError::Configuration("missing `input`".into())),
    }

    match map.get("plugins") {
        None | Some(Value::Null) | Some(Value::Sequence(_)) => {}
        Some(other) => {
            error!(found = describe(other), "Config `plugins` is not a sequence");
            return Err(PipelineError::Configuration(format!(
                "`plugins` should be a sequence, got {}",
                describe(other)
            )));
        }
    }

    serde_yaml::from_value(value).map_err(|e| {
        error!(error = ?e, "Config does not match the batch schema");
        PipelineError::Configuration(e.to_string())
    })
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PluginSpec;
    use crate::error::ErrorKind;

    #[test]
    fn parses_full_config() {
        let config = parse_config(
            r#"
input: ["images/*.jpg"]
glob: false
exclude_files: ["draft"]
destination: out
plugins:
  - type: identity
  - type: command
    program: cwebp
    args: ["-quiet"]
"#,
        )
        .unwrap();
        assert_eq!(config.input, vec!["images/*.jpg"]);
        assert!(!config.glob);
        assert_eq!(config.exclude_files, Some(vec!["draft".to_string()]));
        assert_eq!(config.destination.as_deref(), Some(Path::new("out")));
        assert_eq!(
            config.plugins,
            vec![
                PluginSpec::Identity,
                PluginSpec::Command {
                    program: "cwebp".into(),
                    args: vec!["-quiet".into()]
                }
            ]
        );
        assert_eq!(config.options().plugins.len(), 2);
    }

    #[test]
    fn defaults_apply() {
        let config = parse_config("input: []\nplugins: null\n").unwrap();
        assert!(config.glob);
        assert!(config.destination.is_none());
        assert!(config.plugins.is_empty());
    }

    #[test]
    fn non_sequence_input_is_rejected() {
        let err = parse_config("input: \"images/*.jpg\"\n").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert!(err.to_string().contains("sequence"), "got {err}");
    }

    #[test]
    fn non_sequence_plugins_is_rejected() {
        let err = parse_config("input: []\nplugins:\n  type: identity\n").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert!(err.to_string().contains("plugins"), "got {err}");
    }

    #[test]
    fn unknown_plugin_type_is_rejected() {
        let err = parse_config("input: []\nplugins:\n  - type: teleport\n").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }
}
