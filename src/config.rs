use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;
use validator::Validate;

use crate::relation_compiler::{errors::AliasMapError, AliasMap, CompileOptions};

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Parse error for {field}: {value} - {source}")]
    Parse {
        field: String,
        value: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Alias map error: {0}")]
    Aliases(#[from] AliasMapError),
}

/// What the compiler prints for a predicate
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// The relation expression only
    #[default]
    Expression,
    /// The relation tree as JSON
    Tree,
    /// Normalized predicate and relation as JSON
    Full,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "expression" => Ok(OutputFormat::Expression),
            "tree" => Ok(OutputFormat::Tree),
            "full" => Ok(OutputFormat::Full),
            other => Err(format!(
                "unknown output format '{}' (expected expression, tree or full)",
                other
            )),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OutputFormat::Expression => "expression",
            OutputFormat::Tree => "tree",
            OutputFormat::Full => "full",
        })
    }
}

/// Compiler configuration with validation
#[derive(Clone, Debug, Default, Validate, Serialize, Deserialize)]
#[serde(default)]
pub struct CompilerConfig {
    /// YAML file holding the alias map
    #[validate(length(min = 1, message = "Alias file path cannot be empty"))]
    pub alias_file: Option<String>,

    /// Reject identifiers with empty path segments
    pub strict_identifiers: bool,

    pub output_format: OutputFormat,
}

impl CompilerConfig {
    /// Create configuration from environment variables with validation
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = Self {
            alias_file: env::var("RELPLAN_ALIAS_FILE").ok(),
            strict_identifiers: parse_env_var("RELPLAN_STRICT_IDENTIFIERS", "false")?,
            output_format: parse_env_var("RELPLAN_OUTPUT", "expression")?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Create configuration from CLI arguments with validation
    pub fn from_cli(cli: CliConfig) -> Result<Self, ConfigError> {
        let config = Self {
            alias_file: cli.alias_file,
            strict_identifiers: cli.strict_identifiers,
            output_format: cli.output_format.unwrap_or_default(),
        };

        config.validate()?;
        Ok(config)
    }

    /// Build the effective configuration: the YAML file when one is given,
    /// the `RELPLAN_*` environment otherwise, with CLI settings on top.
    pub fn load(config_file: Option<&Path>, cli: CliConfig) -> Result<Self, ConfigError> {
        let mut config = match config_file {
            Some(path) => Self::from_yaml_file(path)?,
            None => Self::from_env()?,
        };
        config.merge_cli(cli);

        config.validate()?;
        log::debug!("Effective compiler config: {:?}", config);
        Ok(config)
    }

    /// Merge CLI settings (CLI overrides file and environment)
    pub fn merge_cli(&mut self, cli: CliConfig) {
        if let Some(alias_file) = cli.alias_file {
            self.alias_file = Some(alias_file);
        }
        // a flag can only switch strict mode on
        self.strict_identifiers |= cli.strict_identifiers;
        if let Some(output_format) = cli.output_format {
            self.output_format = output_format;
        }
    }

    /// Create configuration from YAML file
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Parse {
            field: "yaml_file".to_string(),
            value: "file read failed".to_string(),
            source: Box::new(e),
        })?;

        let config: Self = serde_yaml::from_str(&content).map_err(|e| ConfigError::Parse {
            field: "yaml_content".to_string(),
            value: content,
            source: Box::new(e),
        })?;

        config.validate()?;
        Ok(config)
    }

    pub fn compile_options(&self) -> CompileOptions {
        CompileOptions {
            strict_identifiers: self.strict_identifiers,
        }
    }

    /// Load the configured alias map, if any
    pub fn load_aliases(&self) -> Result<Option<AliasMap>, ConfigError> {
        match &self.alias_file {
            Some(path) => Ok(Some(AliasMap::from_yaml_file(path)?)),
            None => Ok(None),
        }
    }
}

/// CLI configuration (parsed from command line arguments).
/// `None` leaves the file or environment setting in place.
#[derive(Clone, Debug, Default)]
pub struct CliConfig {
    pub alias_file: Option<String>,
    pub strict_identifiers: bool,
    pub output_format: Option<OutputFormat>,
}

/// Parse an environment variable with a default value
fn parse_env_var<T: FromStr>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T::Err: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let value = env::var(key).unwrap_or_else(|_| default.to_string());
    value.parse().map_err(|e: T::Err| ConfigError::Parse {
        field: key.to_string(),
        value,
        source: e.into(),
    })
}
