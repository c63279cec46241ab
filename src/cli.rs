use clap::{ArgAction, Parser, ValueEnum};

use crate::level::{Flags, Level};

/// Command-line arguments for the `levelog` demo binary.
#[derive(Parser, Debug, Clone)]
#[command(
  author,
  version,
  about = "Emit colorized, leveled log lines",
  trailing_var_arg = true
)]
pub struct Cli {
  /// Level to emit at: debug, verbose, info, warn, error or wtf.
  #[arg(long, env = "LEVELOG_LEVEL", default_value = "info")]
  pub level: Level,

  /// Subsystem tag printed after the level name.
  #[arg(long, env = "LEVELOG_TAG", default_value = "levelog")]
  pub tag: String,

  /// Preset the individual switches start from.
  #[arg(
    long,
    value_enum,
    env = "LEVELOG_PROFILE",
    default_value_t = Profile::Production
  )]
  pub profile: Profile,

  /// Override the DEBUG switch.
  #[arg(long, env = "LEVELOG_DEBUG", value_name = "BOOL")]
  pub debug_level: Option<bool>,

  /// Override develop mode (full request dumps). Never enable in production.
  #[arg(long, env = "LEVELOG_DEVELOP", value_name = "BOOL")]
  pub develop: Option<bool>,

  /// Override the VERBOSE switch.
  #[arg(long, env = "LEVELOG_VERBOSE", value_name = "BOOL")]
  pub verbose_level: Option<bool>,

  /// Override the INFO switch.
  #[arg(long, env = "LEVELOG_INFO", value_name = "BOOL")]
  pub info_level: Option<bool>,

  /// Override the switch shared by WARN, ERROR and WTF.
  #[arg(long, env = "LEVELOG_LOG", value_name = "BOOL")]
  pub log_level: Option<bool>,

  /// Where lines go.
  #[arg(long, value_enum, default_value_t = SinkKind::Stderr)]
  pub sink: SinkKind,

  /// Lines emitted by each task.
  #[arg(long, default_value_t = 1)]
  pub repeat: u32,

  /// Concurrent tasks emitting the message.
  #[arg(long, default_value_t = 1)]
  pub tasks: u32,

  /// Increase diagnostic verbosity (repeat for TRACE).
  #[arg(short, long, action = ArgAction::Count)]
  pub verbose: u8,

  /// Disable ANSI color in diagnostics and id output.
  #[arg(long)]
  pub plain: bool,

  /// Message to log.
  #[arg(value_name = "MESSAGE", required = true)]
  pub message: Vec<String>,
}

/// Starting point for [`Flags`] before per-switch overrides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Profile {
  Development,
  Production,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SinkKind {
  /// Standard error.
  Stderr,
  /// The diagnostics `tracing` subscriber.
  Tracing,
}

impl Cli {
  /// Resolve the logger switches: profile first, then explicit overrides.
  pub fn flags(&self) -> Flags {
    let base = match self.profile {
      Profile::Development => Flags::development(),
      Profile::Production => Flags::production(),
    };

    Flags {
      debug: self.debug_level.unwrap_or(base.debug),
      develop: self.develop.unwrap_or(base.develop),
      verbose: self.verbose_level.unwrap_or(base.verbose),
      info: self.info_level.unwrap_or(base.info),
      log: self.log_level.unwrap_or(base.log),
    }
  }

  /// The message words joined by spaces, or `None` if only whitespace remains.
  pub fn message(&self) -> Option<String> {
    let joined = self.message.join(" ");
    let trimmed = joined.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(std::iter::once("levelog").chain(args.iter().copied()))
      .expect("valid arguments")
  }

  #[test]
  fn defaults_to_production_info() {
    let cli = parse(&["hello", "world"]);
    assert_eq!(cli.level, Level::Info);
    assert_eq!(cli.flags(), Flags::production());
    assert_eq!(cli.message().as_deref(), Some("hello world"));
  }

  #[test]
  fn overrides_apply_on_top_of_profile() {
    let cli = parse(&[
      "--profile",
      "development",
      "--info-level",
      "false",
      "--level",
      "WTF",
      "boom",
    ]);

    let flags = cli.flags();
    assert!(flags.debug);
    assert!(flags.develop);
    assert!(!flags.info);
    assert_eq!(cli.level, Level::Wtf);
  }

  #[test]
  fn blank_message_is_rejected() {
    let cli = parse(&["   "]);
    assert_eq!(cli.message(), None);
  }

  #[test]
  fn unknown_level_fails_to_parse() {
    let result =
      Cli::try_parse_from(["levelog", "--level", "fatal", "hello"]);
    assert!(result.is_err());
  }
}
