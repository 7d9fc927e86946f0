use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Debug, Clone, Copy, JsonSchema, PartialEq)]
/// Output format of the diagnostic log. Logs are written to stderr, the generated request to stdout.
pub enum LoggerConfigFormat {
  /// Minimal single-line records: level, target and message with its fields.
  #[serde(rename = "compact")]
  #[schemars(title = "compact")]
  Compact,

  /// Multi-line, human-readable records with source locations. Useful while debugging how a
  /// selection tree is traversed.
  #[serde(rename = "pretty")]
  #[schemars(title = "pretty")]
  Pretty,

  /// One JSON object per record, for log processors.
  #[serde(rename = "json")]
  #[schemars(title = "json")]
  Json,
}

impl Default for LoggerConfigFormat {
  // In development, we wish to see some more details and code locations.
  #[cfg(debug_assertions)]
  fn default() -> Self {
    LoggerConfigFormat::Pretty
  }

  #[cfg(not(debug_assertions))]
  fn default() -> Self {
    if atty::is(atty::Stream::Stderr) {
      LoggerConfigFormat::Compact
    } else {
      LoggerConfigFormat::Json
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn formats_use_lowercase_names() {
    let format: LoggerConfigFormat = serde_json::from_str("\"json\"").unwrap();
    assert_eq!(format, LoggerConfigFormat::Json);
    assert_eq!(
      serde_json::to_string(&LoggerConfigFormat::Compact).unwrap(),
      "\"compact\""
    );
    assert!(serde_json::from_str::<LoggerConfigFormat>("\"verbose\"").is_err());
  }
}
