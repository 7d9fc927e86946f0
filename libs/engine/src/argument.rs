use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::variable::Variable;

/// A field argument: either a literal inlined into the document, or a variable reference.
#[derive(Debug, Clone, PartialEq)]
pub enum Argument {
  Literal(Value),
  Variable(Variable),
}

impl Argument {
  pub fn literal(value: impl Into<Value>) -> Self {
    Argument::Literal(value.into())
  }

  /// Classifies a JSON-shaped value.
  ///
  /// A value is a variable reference iff it carries a non-empty string `name`, a non-empty
  /// string `type`, a boolean `required` and a non-null `value`. Everything else is a literal.
  pub fn classify(value: Value) -> Self {
    if !is_variable_shaped(&value) {
      return Argument::Literal(value);
    }

    match serde_json::from_value::<Variable>(value.clone()) {
      Ok(variable) => Argument::Variable(variable),
      Err(_) => Argument::Literal(value),
    }
  }

  pub fn as_variable(&self) -> Option<&Variable> {
    match self {
      Argument::Variable(variable) => Some(variable),
      Argument::Literal(_) => None,
    }
  }
}

fn is_variable_shaped(value: &Value) -> bool {
  let Value::Object(object) = value else {
    return false;
  };

  let non_empty_str = |key: &str| matches!(object.get(key), Some(Value::String(s)) if !s.is_empty());

  non_empty_str("name")
    && non_empty_str("type")
    && matches!(object.get("required"), Some(Value::Bool(_)))
    && !matches!(object.get("value"), None | Some(Value::Null))
}

impl From<Variable> for Argument {
  fn from(variable: Variable) -> Self {
    Argument::Variable(variable)
  }
}

impl<'de> Deserialize<'de> for Argument {
  fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
  where
    D: Deserializer<'de>,
  {
    Value::deserialize(deserializer).map(Argument::classify)
  }
}

impl Serialize for Argument {
  fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
  where
    S: Serializer,
  {
    match self {
      Argument::Literal(value) => value.serialize(serializer),
      Argument::Variable(variable) => variable.serialize(serializer),
    }
  }
}

/// Arguments attached to a selection, keyed by argument name.
///
/// Accepts either a mapping or a list of variables (keyed by variable name) on the wire.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(from = "ArgumentsRepr")]
pub struct Arguments(BTreeMap<String, Argument>);

#[derive(Deserialize)]
#[serde(untagged)]
enum ArgumentsRepr {
  Map(BTreeMap<String, Argument>),
  List(Vec<Variable>),
}

impl From<ArgumentsRepr> for Arguments {
  fn from(repr: ArgumentsRepr) -> Self {
    match repr {
      ArgumentsRepr::Map(map) => Arguments(map),
      ArgumentsRepr::List(variables) => Arguments(
        variables
          .into_iter()
          .map(|variable| (variable.name().to_string(), Argument::Variable(variable)))
          .collect(),
      ),
    }
  }
}

impl Arguments {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn insert(&mut self, name: impl Into<String>, argument: impl Into<Argument>) {
    self.0.insert(name.into(), argument.into());
  }

  pub fn get(&self, name: &str) -> Option<&Argument> {
    self.0.get(name)
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn iter(&self) -> impl Iterator<Item = (&String, &Argument)> {
    self.0.iter()
  }

  pub fn variables(&self) -> impl Iterator<Item = &Variable> {
    self.0.values().filter_map(Argument::as_variable)
  }

  pub fn literals(&self) -> impl Iterator<Item = (&str, &Value)> {
    self.0.iter().filter_map(|(name, argument)| match argument {
      Argument::Literal(value) => Some((name.as_str(), value)),
      Argument::Variable(_) => None,
    })
  }
}

impl<K: Into<String>, A: Into<Argument>> FromIterator<(K, A)> for Arguments {
  fn from_iter<T: IntoIterator<Item = (K, A)>>(iter: T) -> Self {
    Arguments(
      iter
        .into_iter()
        .map(|(name, argument)| (name.into(), argument.into()))
        .collect(),
    )
  }
}

/// Renders a JSON value using GraphQL input-value syntax: object keys are bare names in sorted
/// order, strings are quoted, lists and objects are comma separated.
pub fn render_literal(value: &Value) -> String {
  match value {
    Value::Null => "null".to_string(),
    Value::Bool(b) => b.to_string(),
    Value::Number(n) => n.to_string(),
    Value::String(s) => Value::String(s.clone()).to_string(),
    Value::Array(items) => format!(
      "[{}]",
      items
        .iter()
        .map(render_literal)
        .collect::<Vec<_>>()
        .join(", ")
    ),
    Value::Object(fields) => {
      let mut fields: Vec<_> = fields.iter().collect();
      fields.sort_by(|(a, _), (b, _)| a.cmp(b));

      format!(
        "{{{}}}",
        fields
          .into_iter()
          .map(|(key, value)| format!("{}: {}", key, render_literal(value)))
          .collect::<Vec<_>>()
          .join(", ")
      )
    }
  }
}
