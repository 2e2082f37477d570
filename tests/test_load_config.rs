use filepipe::config::PluginSpec;
use filepipe::{load_config, process, ErrorKind};
use std::fs::write;
use std::path::PathBuf;
use tempfile::{tempdir, NamedTempFile};

/// A static config file loads into typed options.
#[test]
fn test_load_config_success() {
    let config_yaml = r#"
input:
  - "images/*.png"
  - "!images/draft-*"
destination: ./tmp/out
plugins:
  - type: command
    program: pngquant
    args: ["-"]
"#;
    let config_file = NamedTempFile::new().expect("temp file");
    write(config_file.path(), config_yaml).unwrap();

    let config = load_config(config_file.path()).expect("Config should load");

    assert_eq!(config.input, vec!["images/*.png", "!images/draft-*"]);
    assert!(config.glob);
    assert_eq!(config.destination, Some(PathBuf::from("./tmp/out")));
    assert_eq!(
        config.plugins,
        vec![PluginSpec::Command {
            program: "pngquant".into(),
            args: vec!["-".into()],
        }]
    );
}

#[test]
fn test_load_config_errors_for_invalid_file() {
    let config_file = NamedTempFile::new().expect("temp file");
    write(config_file.path(), b"not-yaml: [:::").unwrap();

    let err = load_config(config_file.path()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Configuration);
    assert!(err.to_string().contains("YAML"), "Parse error expected, got: {err}");
}

#[test]
fn test_load_config_errors_for_missing_file() {
    let tmp = tempdir().unwrap();
    let err = load_config(tmp.path().join("nope.yaml")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Configuration);
}

/// A scalar `input` is rejected before any pattern is expanded or file created.
#[tokio::test]
async fn test_non_sequence_input_fails_before_touching_files() {
    let tmp = tempdir().unwrap();
    let dest = tmp.path().join("out");
    let config_file = tmp.path().join("batch.yaml");
    write(
        &config_file,
        format!("input: \"{}/*.png\"\ndestination: {}\n", tmp.path().display(), dest.display()),
    )
    .unwrap();

    let err = load_config(&config_file).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Configuration);
    assert!(!dest.exists());
}

#[tokio::test]
async fn test_loaded_config_drives_a_batch() {
    let tmp = tempdir().unwrap();
    write(tmp.path().join("a.txt"), b"hello").unwrap();
    let dest = tmp.path().join("out");
    let config_file = tmp.path().join("batch.yaml");
    write(
        &config_file,
        format!(
            "input: [\"{}/*.txt\"]\ndestination: {}\nplugins:\n  - type: identity\n",
            tmp.path().display(),
            dest.display()
        ),
    )
    .unwrap();

    let config = load_config(&config_file).unwrap();
    let records = process(&config.input, &config.options()).await.unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].destination_path, Some(dest.join("a.txt")));
    assert_eq!(std::fs::read(dest.join("a.txt")).unwrap(), b"hello");
}
