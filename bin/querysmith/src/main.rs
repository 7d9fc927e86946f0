use anyhow::anyhow;
use querysmith::{install_logger, render_request};
use querysmith_config::{load_config, QuerysmithConfig};

fn main() -> anyhow::Result<()> {
  let mut args = std::env::args().skip(1);
  let operation_file_path = args
    .next()
    .ok_or_else(|| anyhow!("usage: querysmith <operation-file> [config-file]"))?;

  let config = match args.next() {
    Some(config_file_path) => load_config(&config_file_path, |key| std::env::var(key).ok())?,
    None => QuerysmithConfig::default(),
  };
  install_logger(&config.logger.clone().unwrap_or_default())?;

  let output = render_request(&operation_file_path, &config, |key| {
    std::env::var(key).ok()
  })?;
  println!("{}", output);

  Ok(())
}
