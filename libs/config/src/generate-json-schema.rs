use querysmith_config::QuerysmithConfig;
use schemars::schema_for;

pub fn main() -> Result<(), Box<dyn std::error::Error>> {
  println!("⚙️ Generating JSON schema for querysmith config file...");
  let schema = schema_for!(QuerysmithConfig);
  let as_string = serde_json::to_string_pretty(&schema)?;
  println!("✏️ Writing to: libs/config/querysmith.schema.json");
  std::fs::write("libs/config/querysmith.schema.json", as_string)?;
  println!("✅ Done");

  Ok(())
}
