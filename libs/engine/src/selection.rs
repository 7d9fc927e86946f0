use serde::{Deserialize, Serialize};

use crate::{
  argument::{Argument, Arguments},
  variable::Variable,
};

/// One field selection: its name, arguments, declared variables and sub-selections.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Selection {
  pub name: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub alias: Option<String>,
  #[serde(default, skip_serializing_if = "Arguments::is_empty")]
  pub args: Arguments,
  pub fields: Vec<FieldEntry>,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub variables: Vec<Variable>,
  #[serde(default, skip_serializing_if = "SelectionOptions::is_empty")]
  pub options: SelectionOptions,
}

/// An entry of a selection set: a plain field name, or a nested selection.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum FieldEntry {
  Leaf(String),
  Nested(Box<Selection>),
}

impl FieldEntry {
  pub fn name(&self) -> &str {
    match self {
      FieldEntry::Leaf(name) => name,
      FieldEntry::Nested(selection) => &selection.name,
    }
  }
}

impl From<&str> for FieldEntry {
  fn from(name: &str) -> Self {
    FieldEntry::Leaf(name.to_string())
  }
}

impl From<String> for FieldEntry {
  fn from(name: String) -> Self {
    FieldEntry::Leaf(name)
  }
}

impl From<Selection> for FieldEntry {
  fn from(selection: Selection) -> Self {
    FieldEntry::Nested(Box::new(selection))
  }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct SelectionOptions {
  /// Child entries (plain or nested) with these names are left out of the document.
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub ignore_fields: Vec<String>,
}

impl SelectionOptions {
  pub fn is_empty(&self) -> bool {
    self.ignore_fields.is_empty()
  }

  pub fn ignores(&self, name: &str) -> bool {
    self.ignore_fields.iter().any(|ignored| ignored == name)
  }
}

impl Selection {
  pub fn new(name: impl Into<String>) -> Self {
    Selection {
      name: name.into(),
      alias: None,
      args: Arguments::new(),
      fields: vec![],
      variables: vec![],
      options: SelectionOptions::default(),
    }
  }

  pub fn alias(mut self, alias: impl Into<String>) -> Self {
    self.alias = Some(alias.into());
    self
  }

  pub fn arg(mut self, name: impl Into<String>, argument: impl Into<Argument>) -> Self {
    self.args.insert(name, argument);
    self
  }

  pub fn field(mut self, field: impl Into<FieldEntry>) -> Self {
    self.fields.push(field.into());
    self
  }

  pub fn fields<I, F>(mut self, fields: I) -> Self
  where
    I: IntoIterator<Item = F>,
    F: Into<FieldEntry>,
  {
    self.fields.extend(fields.into_iter().map(Into::into));
    self
  }

  pub fn nested(self, selection: Selection) -> Self {
    self.field(selection)
  }

  pub fn variable(mut self, variable: Variable) -> Self {
    self.variables.push(variable);
    self
  }

  pub fn ignore_field(mut self, name: impl Into<String>) -> Self {
    self.options.ignore_fields.push(name.into());
    self
  }

  /// The key this selection appears under in a response: the alias when set, otherwise the name.
  pub fn response_key(&self) -> &str {
    self.alias.as_deref().unwrap_or(&self.name)
  }

  /// The field token as written in the document, `alias: name` or `name`.
  pub fn field_token(&self) -> String {
    match &self.alias {
      Some(alias) => format!("{}: {}", alias, self.name),
      None => self.name.clone(),
    }
  }

  /// First literal argument whose name is also declared as a variable on this node.
  pub fn duplicate_argument(&self) -> Option<&str> {
    self.args.literals().map(|(name, _)| name).find(|name| {
      self
        .variables
        .iter()
        .chain(self.args.variables())
        .any(|variable| variable.name() == *name)
    })
  }

  /// Child entries that survive `options.ignore_fields`.
  pub fn effective_fields(&self) -> impl Iterator<Item = &FieldEntry> {
    self
      .fields
      .iter()
      .filter(|entry| !self.options.ignores(entry.name()))
  }
}
