use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::Directive;

use crate::sink::LINES_TARGET;

/// Initialise diagnostics for the `levelog` binary.
///
/// `verbosity` comes from the CLI `-v/--verbose` flag:
///   * `0` → INFO
///   * `1` → DEBUG
///   * `2+` → TRACE
///
/// With `forward_lines` set, every level of the [`LINES_TARGET`] target is let
/// through regardless of `verbosity`, since the logger's own switches already
/// decided what gets emitted.
///
/// Calling this again in the same process keeps the subscriber installed by
/// the first call.
pub fn init(verbosity: u8, use_color: bool, forward_lines: bool) {
  let installed = tracing_subscriber::fmt()
    .with_env_filter(filter(verbosity, forward_lines))
    .with_target(false)
    .with_level(true)
    .with_ansi(use_color && !forward_lines)
    .with_writer(std::io::stderr)
    .compact()
    .try_init();

  if let Err(err) = installed {
    tracing::debug!(error = %err, "diagnostics subscriber already installed");
  }
}

fn filter(verbosity: u8, forward_lines: bool) -> EnvFilter {
  let level = match verbosity {
    0 => tracing::Level::INFO,
    1 => tracing::Level::DEBUG,
    _ => tracing::Level::TRACE,
  };

  // Respect `RUST_LOG`, falling back to the computed base level.
  let filter = EnvFilter::try_from_default_env()
    .unwrap_or_else(|_| EnvFilter::new(level.as_str()));

  if !forward_lines {
    return filter;
  }

  match format!("{LINES_TARGET}=trace").parse::<Directive>() {
    Ok(directive) => filter.add_directive(directive),
    Err(_) => filter,
  }
}
