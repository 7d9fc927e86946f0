use std::collections::BTreeSet;

use tracing::{debug, trace};

use crate::{
  document::{render_body, Token},
  error::BuildError,
  operation::Operation,
  options::BuildOptions,
  registry::VariableRegistry,
  request::GraphQLRequest,
  selection::{FieldEntry, Selection},
};

/// Turns an [`Operation`] into the operation text and its variables map.
///
/// Every call to [`GraphQLRequestBuilder::build`] starts from a fresh registry, so one builder
/// can be reused and separate builders can run on separate threads.
///
/// Variables are written as their declaration text (`storeKey: String!`) both in the operation
/// head and at the field that uses them. The output does not use `$`-prefixed variable syntax;
/// [`Variable::reference`](crate::variable::Variable::reference) renders that form on request.
///
/// Sibling selections must have distinct response keys (alias or name), and a node may not pass
/// the same argument name both as a literal and as a variable. Both fail with
/// [`BuildError::MalformedSelectionNode`].
pub struct GraphQLRequestBuilder<'a> {
  operation: &'a Operation,
  options: BuildOptions,
}

impl<'a> GraphQLRequestBuilder<'a> {
  pub fn new(operation: &'a Operation) -> Self {
    GraphQLRequestBuilder {
      operation,
      options: BuildOptions::default(),
    }
  }

  pub fn with_options(mut self, options: BuildOptions) -> Self {
    self.options = options;
    self
  }

  #[tracing::instrument(
    level = "debug",
    name = "GraphQLRequestBuilder::build",
    skip_all,
    fields(
      operation_type = %self.operation.operation_type,
      operation_name = ?self.operation.operation_name()
    )
  )]
  pub fn build(&self) -> Result<GraphQLRequest, BuildError> {
    if self.operation.operations.is_empty() {
      return Err(BuildError::malformed(
        self.operation.operation_name().unwrap_or_default(),
        "operation must select at least one field",
      ));
    }

    let mut traversal = Traversal::default();
    traversal.visit(&self.operation.operations, None)?;
    debug!(visited = ?traversal.visited, "selection tree traversed");

    let variables = traversal.registry.render_variables()?;
    let query = format!(
      "{}{}{}",
      self.header(),
      traversal.registry.render_declarations(None),
      render_body(&traversal.tokens, self.options.pretty)
    );

    Ok(GraphQLRequest {
      query,
      operation_name: self.operation.operation_name().map(str::to_string),
      variables,
    })
  }

  fn header(&self) -> String {
    match self.operation.operation_name() {
      Some(name) => format!("{} {}", self.operation.operation_type, name),
      None => self.operation.operation_type.to_string(),
    }
  }
}

/// Builds a request with default options.
pub fn build_graphql_request(operation: &Operation) -> Result<GraphQLRequest, BuildError> {
  GraphQLRequestBuilder::new(operation).build()
}

// Per-build state, dropped once the request is assembled.
#[derive(Default)]
struct Traversal {
  registry: VariableRegistry,
  tokens: Vec<Token>,
  visited: Vec<String>,
}

impl Traversal {
  fn visit(&mut self, selections: &[Selection], parent: Option<&str>) -> Result<(), BuildError> {
    let mut siblings = BTreeSet::new();

    for selection in selections {
      self.visit_selection(selection, parent, &mut siblings)?;
    }

    Ok(())
  }

  fn visit_selection<'s>(
    &mut self,
    selection: &'s Selection,
    parent: Option<&str>,
    siblings: &mut BTreeSet<&'s str>,
  ) -> Result<(), BuildError> {
    let path = match parent {
      Some(parent) => format!("{}.{}", parent, selection.response_key()),
      None => selection.response_key().to_string(),
    };

    if selection.name.is_empty() {
      return Err(BuildError::malformed(&path, "selection name must not be empty"));
    }
    if !siblings.insert(selection.response_key()) {
      return Err(BuildError::malformed(
        &path,
        "response key is already used by a sibling selection, set an alias",
      ));
    }
    if let Some(name) = selection.duplicate_argument() {
      return Err(BuildError::malformed(
        &path,
        &format!("argument \"{}\" is given both as a literal and as a variable", name),
      ));
    }

    trace!(path = %path, "visiting selection");
    self.visited.push(path.clone());
    self.tokens.push(Token::Field(selection.field_token()));

    self
      .registry
      .add_variables(&path, &selection.variables)
      .add_variables(&path, selection.args.variables())
      .add_literal_arguments(&path, selection.args.literals());

    if self.registry.has_declarations(Some(path.as_str())) {
      let group = self.registry.render_declarations(Some(path.as_str()));
      self.tokens.push(Token::Arguments(group));
    }

    let mut fields = selection.effective_fields().peekable();
    if fields.peek().is_none() {
      return Err(BuildError::malformed(
        &path,
        "selection must select at least one field",
      ));
    }

    // nested selections share one namespace of response keys
    let mut children = BTreeSet::new();

    self.tokens.push(Token::Open);
    for entry in fields {
      match entry {
        FieldEntry::Leaf(name) if name.is_empty() => {
          return Err(BuildError::malformed(&path, "field name must not be empty"));
        }
        FieldEntry::Leaf(name) => self.tokens.push(Token::Field(name.clone())),
        FieldEntry::Nested(nested) => {
          self.visit_selection(nested, Some(path.as_str()), &mut children)?
        }
      }
    }
    self.tokens.push(Token::Close);

    Ok(())
  }
}
