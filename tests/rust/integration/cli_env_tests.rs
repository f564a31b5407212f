// Integration tests for the relplan binary reading its settings from the environment
use std::process::{Command, Output};

use relplan::config::{CliConfig, CompilerConfig, OutputFormat};
use serial_test::serial;

fn relplan(args: &[&str], env: &[(&str, &str)]) -> Output {
    let mut command = Command::new(env!("CARGO_BIN_EXE_relplan"));
    command
        .args(args)
        .env_remove("RELPLAN_ALIAS_FILE")
        .env_remove("RELPLAN_STRICT_IDENTIFIERS")
        .env_remove("RELPLAN_OUTPUT");
    for (key, value) in env {
        command.env(key, value);
    }
    command.output().unwrap()
}

#[test]
fn test_strict_identifiers_from_env() {
    let output = relplan(
        &[r#"eq: [".salary", 1]"#],
        &[("RELPLAN_STRICT_IDENTIFIERS", "true")],
    );
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("empty path segment"), "stderr: {}", stderr);

    let output = relplan(&[r#"eq: [".salary", 1]"#], &[]);
    assert!(output.status.success());
}

#[test]
fn test_output_format_from_env() {
    let output = relplan(&[r#"eq: ["a.b", 1]"#], &[("RELPLAN_OUTPUT", "tree")]);
    assert!(output.status.success());
    let tree: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(tree["name"], "");
    assert_eq!(tree["children"][0]["name"], "a");

    // the flag wins over the environment
    let output = relplan(
        &["--output", "expression", r#"eq: ["a.b", 1]"#],
        &[("RELPLAN_OUTPUT", "tree")],
    );
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "a");
}

#[test]
fn test_invalid_env_value_is_reported() {
    let output = relplan(&[r#"eq: ["a.b", 1]"#], &[("RELPLAN_OUTPUT", "xml")]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("RELPLAN_OUTPUT"));
}

#[test]
#[serial]
fn test_config_load_reads_env() {
    std::env::set_var("RELPLAN_STRICT_IDENTIFIERS", "true");
    std::env::set_var("RELPLAN_OUTPUT", "full");
    std::env::remove_var("RELPLAN_ALIAS_FILE");

    let config = CompilerConfig::load(None, CliConfig::default()).unwrap();
    assert!(config.compile_options().strict_identifiers);
    assert_eq!(config.output_format, OutputFormat::Full);

    let result = relplan::compile_predicate(
        r#"eq: [".salary", 1]"#,
        None,
        &config.compile_options(),
    );
    assert!(result.is_err());

    std::env::remove_var("RELPLAN_STRICT_IDENTIFIERS");
    std::env::remove_var("RELPLAN_OUTPUT");
}
