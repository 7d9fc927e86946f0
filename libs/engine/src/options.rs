use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Debug, Clone, Copy, Default, PartialEq, JsonSchema)]
pub struct BuildOptions {
  /// Renders the selection set on multiple lines, indented by two spaces per level.
  ///
  /// The operation head and the variables map are the same in both modes.
  #[serde(default)]
  pub pretty: bool,
}

impl BuildOptions {
  pub fn pretty() -> Self {
    BuildOptions { pretty: true }
  }
}
