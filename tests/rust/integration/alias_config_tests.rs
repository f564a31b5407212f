// Integration tests for alias maps loaded through configuration
use std::io::Write;

use relplan::{
    compile_predicate,
    config::{CliConfig, CompilerConfig, ConfigError, OutputFormat},
};

#[test]
fn test_aliases_from_configured_yaml_file() {
    let mut alias_file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        alias_file,
        "# employee search aliases\nsalary: salaries.salary\nsalary_start_date: salaries.from_date\ndepartment: dept_emp.departments.dept_name"
    )
    .unwrap();

    let config = CompilerConfig::from_cli(CliConfig {
        alias_file: Some(alias_file.path().display().to_string()),
        strict_identifiers: true,
        output_format: Some(OutputFormat::Full),
    })
    .unwrap();

    let aliases = config.load_aliases().unwrap();
    let compiled = compile_predicate(
        r#"match_all: { geq: ["salary", 60000], eq: ["department", "Sales"], geq: ["salary_start_date", "1986-06-26"] }"#,
        aliases.as_ref(),
        &config.compile_options(),
    )
    .unwrap();

    assert_eq!(compiled.expression(), "[salaries,dept_emp.departments]");
}

#[test]
fn test_malformed_alias_file() {
    let mut alias_file = tempfile::NamedTempFile::new().unwrap();
    writeln!(alias_file, "- salary\n- salaries.salary").unwrap();

    let config = CompilerConfig {
        alias_file: Some(alias_file.path().display().to_string()),
        ..Default::default()
    };
    assert!(matches!(config.load_aliases(), Err(ConfigError::Aliases(_))));
}

#[test]
fn test_cli_config_validation() {
    let result = CompilerConfig::from_cli(CliConfig {
        alias_file: Some(String::new()),
        strict_identifiers: false,
        output_format: None,
    });
    assert!(matches!(result, Err(ConfigError::Validation(_))));
}
