use crate::config::LoggerConfigFormat;
use std::io::{stderr, Stderr};
use tracing_subscriber::{
  filter::ParseError,
  fmt::{
    self,
    format::{DefaultFields, FmtSpan, Format},
    time::UtcTime,
  },
  EnvFilter, Layer, Registry,
};

type StderrLayer = fmt::Layer<Registry, DefaultFields, Format, fn() -> Stderr>;

/// Builds the diagnostic log layer for querysmith.
///
/// Records go to stderr so stdout carries only the generated request. `filter` uses
/// `EnvFilter` directives; with `print_performance_info` every closed span (such as one
/// `GraphQLRequestBuilder::build` call) is logged with its duration.
pub fn build_logger(
  format: &LoggerConfigFormat,
  filter: &str,
  print_performance_info: bool,
) -> Result<Box<dyn Layer<Registry> + Send + Sync>, ParseError> {
  let filter = EnvFilter::try_new(filter)?;
  let timer = UtcTime::rfc_3339();
  let span_events = if print_performance_info {
    FmtSpan::CLOSE
  } else {
    FmtSpan::NONE
  };

  Ok(match format {
    LoggerConfigFormat::Json => stderr_layer(span_events)
      .json()
      .with_timer(timer)
      .with_filter(filter)
      .boxed(),
    LoggerConfigFormat::Pretty => stderr_layer(span_events)
      .pretty()
      .with_timer(timer)
      .with_filter(filter)
      .boxed(),
    LoggerConfigFormat::Compact => stderr_layer(span_events)
      .compact()
      .with_timer(timer)
      .with_filter(filter)
      .boxed(),
  })
}

fn stderr_layer(span_events: FmtSpan) -> StderrLayer {
  fmt::Layer::default()
    .with_writer(stderr as fn() -> Stderr)
    .with_span_events(span_events)
}
