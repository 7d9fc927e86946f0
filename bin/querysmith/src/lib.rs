use anyhow::Context;
use querysmith_config::{load_operation, LoggerConfig, QuerysmithConfig};
use querysmith_engine::GraphQLRequestBuilder;
use tracing::{debug, info};
use tracing_subscriber::layer::SubscriberExt;

pub fn install_logger(logger_config: &LoggerConfig) -> anyhow::Result<()> {
  let logger = querysmith_logger::logger_layer::build_logger(
    &logger_config.format,
    &logger_config.filter,
    logger_config.print_performance_info,
  )
  .context("failed to build logger")?;

  tracing::subscriber::set_global_default(tracing_subscriber::registry().with(logger))
    .context("failed to set global default logger")
}

/// Loads the operation document at `operation_file_path` and renders the request body as
/// pretty-printed JSON.
pub fn render_request(
  operation_file_path: &str,
  config: &QuerysmithConfig,
  get_env_value: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<String> {
  let operation = load_operation(operation_file_path, get_env_value)
    .with_context(|| format!("failed to load operation \"{}\"", operation_file_path))?;
  info!(
    operation_type = %operation.operation_type,
    roots = operation.operations.len(),
    "operation loaded"
  );

  let request = GraphQLRequestBuilder::new(&operation)
    .with_options(config.build)
    .build()?;
  debug!(query = %request.query, "request built");

  Ok(serde_json::to_string_pretty(&request)?)
}

#[cfg(test)]
mod tests {
  use super::*;
  use querysmith_config::load_config;
  use querysmith_engine::BuildOptions;
  use serde_json::{json, Value};

  fn fixture(name: &str) -> String {
    format!("{}/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
  }

  fn no_env(_: &str) -> Option<String> {
    None
  }

  #[test]
  fn renders_customers_query() {
    let output =
      render_request(&fixture("customers.json"), &QuerysmithConfig::default(), no_env).unwrap();
    let request: Value = serde_json::from_str(&output).unwrap();

    assert_eq!(
      request["query"],
      json!(concat!(
        "query GetCustomers(limit: Long!, storeKey: String!, where: String) ",
        r#"{customers(limit: Long!, offset: 0, sort: {name: "asc"}, storeKey: String!, where: String)"#,
        r#"{results{id key name custom(includeNames: ["custom1", "custom2"]){name value}}}}"#
      ))
    );
    assert_eq!(request["operationName"], json!("GetCustomers"));
    assert_eq!(
      request["variables"],
      json!({ "limit": 1, "storeKey": "DE", "where": "d" })
    );
  }

  #[test]
  fn environment_feeds_variable_values() {
    let output = render_request(
      &fixture("customers.json"),
      &QuerysmithConfig::default(),
      |key| (key == "STORE_KEY").then(|| "AT".to_string()),
    )
    .unwrap();
    let request: Value = serde_json::from_str(&output).unwrap();

    assert_eq!(request["variables"]["storeKey"], json!("AT"));
  }

  #[test]
  fn renders_add_product_variant_mutation() {
    let output = render_request(
      &fixture("add_product_variant.yaml"),
      &QuerysmithConfig::default(),
      no_env,
    )
    .unwrap();

    insta::assert_snapshot!(output, @r###"
    {
      "query": "mutation AddProductVariant(actions: Actions!, id: String!) {updateProduct(actions: Actions!, id: String!, version: 1){id version masterData{current{allVariants{key sku}}}}}",
      "operationName": "AddProductVariant",
      "variables": {
        "actions": [
          {
            "addVariant": {
              "key": "my-product-variant-key",
              "sku": "myProductVariantSKU",
              "staged": false
            }
          }
        ],
        "id": "ID"
      }
    }
    "###);
  }

  #[test]
  fn config_fixture_enables_pretty_output() {
    let config = load_config(&fixture("config.yaml"), no_env).unwrap();
    assert_eq!(config.build, BuildOptions::pretty());

    let output = render_request(&fixture("customers.json"), &config, no_env).unwrap();
    let request: Value = serde_json::from_str(&output).unwrap();
    let query = request["query"].as_str().unwrap();

    assert!(query.starts_with("query GetCustomers(limit: Long!, storeKey: String!, where: String) {\n  customers("));
    assert!(query.ends_with("\n      }\n    }\n  }\n}"));
  }

  #[test]
  fn unknown_operation_file_fails() {
    let error = render_request(
      &fixture("missing.json"),
      &QuerysmithConfig::default(),
      no_env,
    )
    .unwrap_err();

    assert!(error.to_string().contains("failed to load operation"));
  }
}
