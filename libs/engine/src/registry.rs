use std::collections::{BTreeMap, BTreeSet};

use serde_json::{Map, Value};

use crate::{argument::render_literal, error::BuildError, variable::Variable};

#[derive(Debug, Clone, PartialEq)]
struct DeclaredVariable {
  definition: String,
  value: Value,
}

#[derive(Debug, Default)]
struct Scope {
  // variable name -> declaration and value, upserted
  variables: BTreeMap<String, DeclaredVariable>,
  // argument name -> `name: literal`
  literals: BTreeMap<String, String>,
}

impl Scope {
  fn is_empty(&self) -> bool {
    self.variables.is_empty() && self.literals.is_empty()
  }

  fn declarations(&self) -> impl Iterator<Item = &str> {
    self
      .variables
      .values()
      .map(|declared| declared.definition.as_str())
      .chain(self.literals.values().map(String::as_str))
  }
}

/// Accumulates variable declarations, inlined literal arguments and variable values per
/// selection scope during one build.
#[derive(Debug, Default)]
pub struct VariableRegistry {
  scopes: BTreeMap<String, Scope>,
}

impl VariableRegistry {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn add_variables<'a>(
    &mut self,
    scope: &str,
    variables: impl IntoIterator<Item = &'a Variable>,
  ) -> &mut Self {
    let mut variables = variables.into_iter().peekable();

    if variables.peek().is_none() {
      return self;
    }

    let entry = self.scopes.entry(scope.to_string()).or_default();

    for variable in variables {
      entry.variables.insert(
        variable.name().to_string(),
        DeclaredVariable {
          definition: variable.definition(),
          value: variable.value().clone(),
        },
      );
    }

    self
  }

  pub fn add_literal_arguments<'a>(
    &mut self,
    scope: &str,
    arguments: impl IntoIterator<Item = (&'a str, &'a Value)>,
  ) -> &mut Self {
    let mut arguments = arguments.into_iter().peekable();

    if arguments.peek().is_none() {
      return self;
    }

    let entry = self.scopes.entry(scope.to_string()).or_default();

    for (name, value) in arguments {
      entry.literals.insert(
        name.to_string(),
        format!("{}: {}", name, render_literal(value)),
      );
    }

    self
  }

  /// Without a scope: whether any variable was declared at all (literals excluded).
  /// With a scope: whether that scope holds any declaration or literal argument.
  pub fn has_declarations(&self, scope: Option<&str>) -> bool {
    match scope {
      Some(scope) => self.scopes.get(scope).is_some_and(|s| !s.is_empty()),
      None => self.scopes.values().any(|s| !s.variables.is_empty()),
    }
  }

  /// Renders `(decl, decl, ...)` sorted by the full declaration text, or an empty string.
  ///
  /// Without a scope, the union of every scope's variable declarations is rendered; literal
  /// arguments only ever appear in their own scope's group.
  pub fn render_declarations(&self, scope: Option<&str>) -> String {
    let declarations: BTreeSet<&str> = match scope {
      Some(scope) => self
        .scopes
        .get(scope)
        .map(|s| s.declarations().collect())
        .unwrap_or_default(),
      None => self
        .scopes
        .values()
        .flat_map(|s| s.variables.values())
        .map(|declared| declared.definition.as_str())
        .collect(),
    };

    if declarations.is_empty() {
      return String::new();
    }

    format!(
      "({})",
      declarations.into_iter().collect::<Vec<_>>().join(", ")
    )
  }

  /// Variable values grouped by scope, scopes in lexicographic order.
  pub fn scoped_variables(&self) -> BTreeMap<&str, Map<String, Value>> {
    self
      .scopes
      .iter()
      .filter(|(_, s)| !s.variables.is_empty())
      .map(|(name, s)| {
        let values: Map<String, Value> = s
          .variables
          .iter()
          .map(|(variable, declared)| (variable.clone(), declared.value.clone()))
          .collect();
        (name.as_str(), values)
      })
      .collect()
  }

  /// Fails when one variable name is declared with different text or value in two scopes.
  pub fn check_conflicts(&self) -> Result<(), BuildError> {
    let mut seen: BTreeMap<&str, (&str, &DeclaredVariable)> = BTreeMap::new();

    for (scope, s) in &self.scopes {
      for (name, declared) in &s.variables {
        if let Some((first_scope, first)) = seen.get(name.as_str()) {
          if *first != declared {
            return Err(BuildError::ConflictingVariable {
              name: name.clone(),
              first_scope: first_scope.to_string(),
              second_scope: scope.clone(),
            });
          }
          continue;
        }

        seen.insert(name.as_str(), (scope.as_str(), declared));
      }
    }

    Ok(())
  }

  /// Flattened `name -> value` map sorted by name, `None` when nothing was declared.
  pub fn render_variables(&self) -> Result<Option<Map<String, Value>>, BuildError> {
    self.check_conflicts()?;

    if !self.has_declarations(None) {
      return Ok(None);
    }

    let mut flattened = BTreeMap::new();
    for s in self.scopes.values() {
      for (name, declared) in &s.variables {
        flattened.insert(name.clone(), declared.value.clone());
      }
    }

    Ok(Some(flattened.into_iter().collect()))
  }
}
