use std::io::{self, IsTerminal};

use anyhow::{Context, Result, anyhow, bail};

use crate::{
  cli::{Cli, SinkKind},
  logger::{Logger, Tag},
  logging,
  sink::TracingSink,
  ui,
};

/// Resolve configuration, emit the requested lines and report their ids.
pub async fn run(cli: Cli) -> Result<i32> {
  let use_color_stdout = !cli.plain && io::stdout().is_terminal();
  let use_color_logs = !cli.plain && io::stderr().is_terminal();
  let forward_lines = cli.sink == SinkKind::Tracing;

  logging::init(cli.verbose, use_color_logs, forward_lines);

  let message = cli
    .message()
    .ok_or_else(|| anyhow!("message was empty after trimming whitespace"))?;

  if cli.tasks == 0 || cli.repeat == 0 {
    bail!("--tasks and --repeat must both be at least 1");
  }

  let flags = cli.flags();
  tracing::debug!(?flags, sink = ?cli.sink, "resolved logger flags");
  if flags.develop {
    tracing::warn!("develop mode is on; request dumps are not redacted");
  }

  let logger = match cli.sink {
    SinkKind::Stderr => Logger::new(flags),
    SinkKind::Tracing => Logger::with_sink(flags, TracingSink),
  };
  let tag = Tag::from(cli.tag.clone());

  let ids = emit(&logger, &cli, tag, message).await?;

  if logger.enabled(cli.level) {
    ui::render_ids(cli.level, &ids, use_color_stdout);
  } else {
    tracing::info!(level = %cli.level, "level disabled by current flags");
    ui::render_disabled(cli.level, use_color_stdout);
    ui::render_ids(cli.level, &ids, use_color_stdout);
  }

  Ok(0)
}

async fn emit(
  logger: &Logger,
  cli: &Cli,
  tag: Tag,
  message: String,
) -> Result<Vec<i64>> {
  let mut handles = Vec::with_capacity(cli.tasks as usize);

  for task in 0..cli.tasks {
    let logger = logger.clone();
    let tag = tag.clone();
    let message = message.clone();
    let level = cli.level;
    let repeat = cli.repeat;

    handles.push(tokio::task::spawn_blocking(move || {
      tracing::trace!(task, repeat, "emitter started");
      (0..repeat)
        .filter_map(|_| logger.log(level, &tag, format_args!("{message}")))
        .collect::<Vec<_>>()
    }));
  }

  let mut ids = Vec::new();
  for handle in handles {
    ids.extend(handle.await.context("emitter task panicked")?);
  }
  ids.sort_unstable();

  Ok(ids)
}

#[cfg(test)]
mod tests {
  use super::*;
  use clap::Parser;

  fn cli(args: &[&str]) -> Cli {
    Cli::try_parse_from(
      ["levelog", "--plain"].into_iter().chain(args.iter().copied()),
    )
    .expect("valid arguments")
  }

  #[tokio::test]
  async fn zero_tasks_is_rejected() {
    let err = run(cli(&["--tasks", "0", "hi"])).await.unwrap_err();
    assert!(err.to_string().contains("--tasks"));
  }

  #[tokio::test]
  async fn zero_repeat_is_rejected() {
    let err = run(cli(&["--repeat", "0", "hi"])).await.unwrap_err();
    assert!(err.to_string().contains("--repeat"));
  }

  #[tokio::test]
  async fn blank_message_is_rejected() {
    let err = run(cli(&["  "])).await.unwrap_err();
    assert!(err.to_string().contains("empty"));
  }

  #[tokio::test]
  async fn run_can_be_called_repeatedly() {
    assert!(run(cli(&["--tasks", "0", "hi"])).await.is_err());
    assert!(run(cli(&["--tasks", "0", "hi"])).await.is_err());
  }
}
