use std::{
  fmt::{Display, Formatter},
  str::FromStr,
};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{error::BuildError, selection::Selection};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationType {
  Query,
  Mutation,
}

impl OperationType {
  pub const ALL: [OperationType; 2] = [OperationType::Query, OperationType::Mutation];

  pub fn as_str(&self) -> &'static str {
    match self {
      OperationType::Query => "query",
      OperationType::Mutation => "mutation",
    }
  }

  pub fn valid_kinds() -> Vec<&'static str> {
    Self::ALL.iter().map(OperationType::as_str).collect()
  }
}

impl Display for OperationType {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

impl FromStr for OperationType {
  type Err = BuildError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Self::ALL
      .into_iter()
      .find(|kind| kind.as_str() == s)
      .ok_or_else(|| BuildError::InvalidOperationType {
        found: s.to_string(),
        valid: Self::valid_kinds(),
      })
  }
}

impl Serialize for OperationType {
  fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
  where
    S: Serializer,
  {
    serializer.serialize_str(self.as_str())
  }
}

impl<'de> Deserialize<'de> for OperationType {
  fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
  where
    D: Deserializer<'de>,
  {
    let raw = String::deserialize(deserializer)?;
    raw.parse().map_err(serde::de::Error::custom)
  }
}

/// The top-level request descriptor: operation kind, optional name and the root selections.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Operation {
  #[serde(rename = "type")]
  pub operation_type: OperationType,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub name: Option<String>,
  #[serde(deserialize_with = "one_or_many")]
  pub operations: Vec<Selection>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
  One(Box<Selection>),
  Many(Vec<Selection>),
}

fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<Selection>, D::Error>
where
  D: Deserializer<'de>,
{
  Ok(match OneOrMany::deserialize(deserializer)? {
    OneOrMany::One(selection) => vec![*selection],
    OneOrMany::Many(selections) => selections,
  })
}

impl Operation {
  pub fn new(operation_type: OperationType, operations: Vec<Selection>) -> Self {
    Operation {
      operation_type,
      name: None,
      operations,
    }
  }

  pub fn query(operations: Vec<Selection>) -> Self {
    Self::new(OperationType::Query, operations)
  }

  pub fn mutation(operations: Vec<Selection>) -> Self {
    Self::new(OperationType::Mutation, operations)
  }

  pub fn with_name(mut self, name: impl Into<String>) -> Self {
    self.name = Some(name.into());
    self
  }

  /// The operation name, treating an empty name as absent.
  pub fn operation_name(&self) -> Option<&str> {
    self.name.as_deref().filter(|name| !name.is_empty())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn parses_known_kinds() {
    assert_eq!("query".parse::<OperationType>(), Ok(OperationType::Query));
    assert_eq!(
      "mutation".parse::<OperationType>(),
      Ok(OperationType::Mutation)
    );
  }

  #[test]
  fn unknown_kind_lists_valid_kinds() {
    let error = "subscription".parse::<OperationType>().unwrap_err();

    assert_eq!(
      error,
      BuildError::InvalidOperationType {
        found: "subscription".to_string(),
        valid: vec!["query", "mutation"],
      }
    );
    assert_eq!(
      error.to_string(),
      "invalid operation type \"subscription\", must be one of: query, mutation"
    );
  }

  #[test]
  fn deserializes_single_or_multiple_roots() {
    let single: Operation = serde_json::from_value(json!({
      "type": "query",
      "name": "GetCustomers",
      "operations": { "name": "customers", "fields": ["id"] }
    }))
    .unwrap();
    let many: Operation = serde_json::from_value(json!({
      "type": "mutation",
      "operations": [
        { "name": "a", "fields": ["id"] },
        { "name": "b", "fields": ["id"] }
      ]
    }))
    .unwrap();

    assert_eq!(single.operations.len(), 1);
    assert_eq!(single.operation_name(), Some("GetCustomers"));
    assert_eq!(many.operation_type, OperationType::Mutation);
    assert_eq!(many.operations.len(), 2);
    assert_eq!(many.operation_name(), None);
  }

  #[test]
  fn rejects_unknown_kind_on_the_wire() {
    let error = serde_json::from_value::<Operation>(json!({
      "type": "subscription",
      "operations": { "name": "a", "fields": ["id"] }
    }))
    .unwrap_err();

    assert!(error.to_string().contains("must be one of: query, mutation"));
  }

  #[test]
  fn empty_name_is_absent() {
    let operation = Operation::query(vec![]).with_name("");
    assert_eq!(operation.operation_name(), None);
  }
}
