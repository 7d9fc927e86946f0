#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum BuildError {
  #[error("invalid operation type \"{found}\", must be one of: {}", .valid.join(", "))]
  InvalidOperationType {
    found: String,
    valid: Vec<&'static str>,
  },
  #[error("malformed selection at \"{path}\": {reason}")]
  MalformedSelectionNode { path: String, reason: String },
  #[error("invalid variable: {reason}")]
  InvalidVariable { reason: String },
  #[error("variable \"{name}\" is declared differently in \"{first_scope}\" and \"{second_scope}\"")]
  ConflictingVariable {
    name: String,
    first_scope: String,
    second_scope: String,
  },
}

impl BuildError {
  pub(crate) fn malformed(path: &str, reason: &str) -> Self {
    BuildError::MalformedSelectionNode {
      path: path.to_string(),
      reason: reason.to_string(),
    }
  }
}
