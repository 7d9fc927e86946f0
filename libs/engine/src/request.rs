use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The generated request, in the shape a GraphQL endpoint accepts as a POST body.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct GraphQLRequest {
  // The GraphQL operation, as string
  pub query: String,
  // The operation name, if specified
  #[serde(rename = "operationName")]
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub operation_name: Option<String>,
  // Variable values by name, absent when the operation declares none
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub variables: Option<Map<String, Value>>,
}

impl Display for GraphQLRequest {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match serde_json::to_string(self) {
      Ok(json) => write!(f, "{}", json),
      Err(e) => write!(f, "failed to serialize request: {}", e),
    }
  }
}
