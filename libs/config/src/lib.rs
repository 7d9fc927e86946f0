pub mod interpolate;

use std::{fs::read_to_string, path::Path};

use interpolate::interpolate;
use querysmith_engine::{BuildOptions, Operation};
use querysmith_logger::config::LoggerConfigFormat;
use schemars::JsonSchema;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::warn;

/// Top-level configuration of the `querysmith` tool.
///
/// Both YAML and JSON files are supported; the format is picked from the file extension
/// (`.json`, `.yaml` or `.yml`).
///
/// ### Environment variables
///
/// The raw file is interpolated before it is parsed:
/// - `$VAR` / `${VAR}` inserts the value of `VAR`; an unknown variable expands to an empty
///   string and logs a warning.
/// - `${VAR-default}` / `${VAR:-default}` fall back to `default` when `VAR` is unset (or empty).
/// - `${VAR?message}` / `${VAR:?message}` fail loading when `VAR` is unset (or empty).
/// - `$$` produces a literal `$`.
///
/// Operation documents loaded with [`load_operation`] go through the same interpolation.
#[derive(Deserialize, Serialize, Debug, Clone, Default, JsonSchema)]
pub struct QuerysmithConfig {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  /// Logger configuration. Logs are written to stderr.
  pub logger: Option<LoggerConfig>,
  #[serde(default)]
  /// Options applied to every built request.
  pub build: BuildOptions,
}

#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
pub struct LoggerConfig {
  /// Environment filter directives, see
  /// [tracing_subscriber::EnvFilter](https://docs.rs/tracing-subscriber/latest/tracing_subscriber/filter/struct.EnvFilter.html).
  ///
  /// - `info` logs all messages at info level and higher.
  ///
  /// - `querysmith_engine=trace` also logs every selection visited while building a request.
  #[serde(default = "default_log_filter")]
  pub filter: String,
  /// Configures the logger format.
  ///
  /// By default, `pretty` is used in development builds. Release builds use `compact` in TTY
  /// environments and `json` otherwise.
  #[serde(default)]
  pub format: LoggerConfigFormat,
  /// Emits the duration of each request build (`close` span events).
  #[serde(default)]
  pub print_performance_info: bool,
}

impl Default for LoggerConfig {
  fn default() -> Self {
    Self {
      filter: default_log_filter(),
      format: LoggerConfigFormat::default(),
      print_performance_info: false,
    }
  }
}

fn default_log_filter() -> String {
  "info".to_string()
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
  #[error("failed to read file \"{path}\": {source}")]
  Io {
    path: String,
    source: std::io::Error,
  },
  #[error("unsupported file extension \"{0}\", expected json, yaml or yml")]
  UnsupportedExtension(String),
  #[error("file \"{0}\" has no extension")]
  MissingExtension(String),
  #[error("failed to interpolate environment variables: {}", .0.join("; "))]
  Interpolation(Vec<String>),
  #[error("failed to parse JSON: {0}")]
  Json(#[from] serde_json::Error),
  #[error("failed to parse YAML: {0}")]
  Yaml(#[from] serde_yaml::Error),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigFormat {
  Json,
  Yaml,
}

impl ConfigFormat {
  pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
    match path.extension() {
      Some(ext) => match ext.to_str() {
        Some("json") => Ok(ConfigFormat::Json),
        Some("yaml") | Some("yml") => Ok(ConfigFormat::Yaml),
        _ => Err(ConfigError::UnsupportedExtension(
          ext.to_string_lossy().to_string(),
        )),
      },
      None => Err(ConfigError::MissingExtension(path.display().to_string())),
    }
  }
}

#[tracing::instrument(level = "trace", skip(get_env_value))]
pub fn load_config(
  file_path: &str,
  get_env_value: impl Fn(&str) -> Option<String>,
) -> Result<QuerysmithConfig, ConfigError> {
  load_document(file_path, get_env_value)
}

pub fn parse_config_contents(
  contents: &str,
  format: ConfigFormat,
  get_env_value: impl Fn(&str) -> Option<String>,
) -> Result<QuerysmithConfig, ConfigError> {
  parse_document(contents, format, get_env_value)
}

/// Loads an operation document: the operation type, optional name and the root selections.
#[tracing::instrument(level = "trace", skip(get_env_value))]
pub fn load_operation(
  file_path: &str,
  get_env_value: impl Fn(&str) -> Option<String>,
) -> Result<Operation, ConfigError> {
  load_document(file_path, get_env_value)
}

pub fn parse_operation_contents(
  contents: &str,
  format: ConfigFormat,
  get_env_value: impl Fn(&str) -> Option<String>,
) -> Result<Operation, ConfigError> {
  parse_document(contents, format, get_env_value)
}

fn load_document<T: DeserializeOwned>(
  file_path: &str,
  get_env_value: impl Fn(&str) -> Option<String>,
) -> Result<T, ConfigError> {
  let path = Path::new(file_path);
  let format = ConfigFormat::from_path(path)?;
  let raw_contents = read_to_string(path).map_err(|source| ConfigError::Io {
    path: file_path.to_string(),
    source,
  })?;

  parse_document(&raw_contents, format, get_env_value)
}

fn parse_document<T: DeserializeOwned>(
  contents: &str,
  format: ConfigFormat,
  get_env_value: impl Fn(&str) -> Option<String>,
) -> Result<T, ConfigError> {
  let (interpolated, warnings) =
    interpolate(contents, get_env_value).map_err(ConfigError::Interpolation)?;

  for warning in warnings {
    warn!("{}", warning);
  }

  Ok(match format {
    ConfigFormat::Json => serde_json::from_str::<T>(&interpolated)?,
    ConfigFormat::Yaml => serde_yaml::from_str::<T>(&interpolated)?,
  })
}

#[cfg(test)]
mod tests {
  use super::*;
  use querysmith_engine::{build_graphql_request, OperationType};

  fn no_env(_: &str) -> Option<String> {
    None
  }

  #[test]
  fn parses_yaml_config() {
    let config = parse_config_contents(
      "logger:\n  filter: debug\n  format: json\nbuild:\n  pretty: true\n",
      ConfigFormat::Yaml,
      no_env,
    )
    .unwrap();

    let logger = config.logger.unwrap();
    assert_eq!(logger.filter, "debug");
    assert_eq!(logger.format, LoggerConfigFormat::Json);
    assert!(!logger.print_performance_info);
    assert!(config.build.pretty);
  }

  #[test]
  fn empty_json_config_uses_defaults() {
    let config = parse_config_contents("{}", ConfigFormat::Json, no_env).unwrap();

    assert!(config.logger.is_none());
    assert_eq!(config.build, BuildOptions::default());
  }

  #[test]
  fn interpolates_before_parsing() {
    let config = parse_config_contents(
      r#"{ "logger": { "filter": "${LOG_FILTER:-warn}" } }"#,
      ConfigFormat::Json,
      |key| (key == "LOG_FILTER").then(|| "trace".to_string()),
    )
    .unwrap();

    assert_eq!(config.logger.unwrap().filter, "trace");
  }

  #[test]
  fn interpolation_errors_are_reported() {
    let error = parse_config_contents(
      r#"{ "logger": { "filter": "${LOG_FILTER?required}" } }"#,
      ConfigFormat::Json,
      no_env,
    )
    .unwrap_err();

    assert!(matches!(error, ConfigError::Interpolation(errors) if errors.len() == 1));
  }

  #[test]
  fn detects_format_from_extension() {
    assert_eq!(
      ConfigFormat::from_path(Path::new("a/config.json")).unwrap(),
      ConfigFormat::Json
    );
    assert_eq!(
      ConfigFormat::from_path(Path::new("config.yml")).unwrap(),
      ConfigFormat::Yaml
    );
    assert!(matches!(
      ConfigFormat::from_path(Path::new("config.toml")),
      Err(ConfigError::UnsupportedExtension(ext)) if ext == "toml"
    ));
    assert!(matches!(
      ConfigFormat::from_path(Path::new("config")),
      Err(ConfigError::MissingExtension(_))
    ));
  }

  #[test]
  fn missing_file_is_an_io_error() {
    assert!(matches!(
      load_config("does/not/exist.json", no_env),
      Err(ConfigError::Io { .. })
    ));
  }

  #[test]
  fn parses_yaml_operation_with_env_values() {
    let contents = r#"
type: query
name: GetCustomers
operations:
  name: customers
  fields: [id]
  variables:
    - name: storeKey
      type: String
      value: ${STORE_KEY}
      required: true
"#;

    let operation = parse_operation_contents(contents, ConfigFormat::Yaml, |key| {
      (key == "STORE_KEY").then(|| "DE".to_string())
    })
    .unwrap();

    assert_eq!(operation.operation_type, OperationType::Query);
    assert_eq!(
      build_graphql_request(&operation).unwrap().query,
      "query GetCustomers(storeKey: String!) {customers(storeKey: String!){id}}"
    );
  }

  #[test]
  fn rejects_unknown_operation_type() {
    let error = parse_operation_contents(
      r#"{ "type": "subscription", "operations": { "name": "a", "fields": ["b"] } }"#,
      ConfigFormat::Json,
      no_env,
    )
    .unwrap_err();

    assert!(error.to_string().contains("must be one of: query, mutation"));
  }
}
