use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::BuildError;

/// A named, typed value sent alongside the operation text.
///
/// `name` and `type` are never empty. `required` starts as `false` and can only be promoted.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(try_from = "VariableDefinition")]
pub struct Variable {
  name: String,
  value: Value,
  #[serde(rename = "type")]
  type_name: String,
  required: bool,
}

// Wire shape of a variable, validated into `Variable` on deserialization.
#[derive(Deserialize)]
struct VariableDefinition {
  name: String,
  #[serde(default)]
  value: Value,
  #[serde(rename = "type")]
  type_name: String,
  #[serde(default)]
  required: bool,
}

impl TryFrom<VariableDefinition> for Variable {
  type Error = BuildError;

  fn try_from(definition: VariableDefinition) -> Result<Self, Self::Error> {
    let variable = Variable::new(definition.name, definition.value, definition.type_name)?;

    Ok(match definition.required {
      true => variable.mark_required(),
      false => variable,
    })
  }
}

impl Variable {
  pub fn new(
    name: impl Into<String>,
    value: impl Into<Value>,
    type_name: impl Into<String>,
  ) -> Result<Self, BuildError> {
    let name = name.into();
    let type_name = type_name.into();

    if name.is_empty() {
      return Err(BuildError::InvalidVariable {
        reason: "variable name must not be empty".to_string(),
      });
    }

    if type_name.is_empty() {
      return Err(BuildError::InvalidVariable {
        reason: format!("type of variable \"{}\" must not be empty", name),
      });
    }

    Ok(Variable {
      name,
      value: value.into(),
      type_name,
      required: false,
    })
  }

  pub fn mark_required(mut self) -> Self {
    self.required = true;
    self
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn value(&self) -> &Value {
    &self.value
  }

  pub fn type_name(&self) -> &str {
    &self.type_name
  }

  pub fn is_required(&self) -> bool {
    self.required
  }

  /// Declaration fragment, `name: Type` or `name: Type!`.
  pub fn definition(&self) -> String {
    let mark = if self.required { "!" } else { "" };
    format!("{}: {}{}", self.name, self.type_name, mark)
  }

  pub fn reference(&self) -> String {
    format!("${}", self.name)
  }
}

pub fn definitions(variables: &[Variable]) -> String {
  variables
    .iter()
    .map(Variable::definition)
    .collect::<Vec<_>>()
    .join(", ")
}

pub fn references(variables: &[Variable]) -> String {
  variables
    .iter()
    .map(Variable::reference)
    .collect::<Vec<_>>()
    .join(", ")
}
