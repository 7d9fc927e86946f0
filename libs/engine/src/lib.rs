//! Builds GraphQL operation text and its variables map from an in-memory description of an
//! operation: root selections, nested sub-selections, arguments and typed variables.
//!
//! ```ignore
//! let operation = Operation::query(vec![Selection::new("customers")
//!   .field("id")
//!   .variable(Variable::new("storeKey", "DE", "String")?.mark_required())])
//! .with_name("GetCustomers");
//!
//! let request = GraphQLRequestBuilder::new(&operation).build()?;
//! // query GetCustomers(storeKey: String!) {customers(storeKey: String!){id}}
//! ```

pub mod argument;
pub mod document;
pub mod error;
pub mod operation;
pub mod options;
pub mod registry;
pub mod request;
pub mod request_builder;
pub mod selection;
pub mod variable;

pub use argument::{Argument, Arguments};
pub use error::BuildError;
pub use operation::{Operation, OperationType};
pub use options::BuildOptions;
pub use registry::VariableRegistry;
pub use request::GraphQLRequest;
pub use request_builder::{build_graphql_request, GraphQLRequestBuilder};
pub use selection::{FieldEntry, Selection, SelectionOptions};
pub use variable::Variable;
