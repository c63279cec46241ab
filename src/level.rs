use std::fmt;
use std::str::FromStr;

use owo_colors::{Color, colors};

/// Reset all attributes.
pub const RESET: &str = "\x1B[0m";
/// Decreased intensity. Not every terminal honours it.
pub const FAINT: &str = "\x1B[2m";
pub const RED: &str = colors::Red::ANSI_FG;
pub const GREEN: &str = colors::Green::ANSI_FG;
pub const YELLOW: &str = colors::Yellow::ANSI_FG;
pub const MAGENTA: &str = colors::Magenta::ANSI_FG;

/// Severity of a log line.
///
/// Levels are not ordered: each one is switched on or off by its own flag in
/// [`Flags`], so there is no "minimum level" to compare against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
  /// Developer output.
  Debug,
  /// Very detailed, temporary output such as large variable dumps.
  Verbose,
  /// Significant state changes worth reading in production.
  Info,
  /// Something went wrong but the process can continue.
  Warn,
  /// Something must be fixed. Carries a stack trace.
  Error,
  /// "What a terrible failure."
  Wtf,
}

/// Static formatting rules for a [`Level`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Style {
  pub name: &'static str,
  pub color: &'static str,
  /// Prefix the message with a correlation id and return it to the caller.
  pub stamped: bool,
  /// Append the current stack trace to the message.
  pub traced: bool,
}

impl Level {
  pub const ALL: [Level; 6] = [
    Level::Debug,
    Level::Verbose,
    Level::Info,
    Level::Warn,
    Level::Error,
    Level::Wtf,
  ];

  pub const fn style(self) -> Style {
    match self {
      Self::Debug => Style {
        name: "DEBUG",
        color: RESET,
        stamped: false,
        traced: false,
      },
      Self::Verbose => Style {
        name: "VERBOSE",
        color: FAINT,
        stamped: false,
        traced: false,
      },
      Self::Info => Style {
        name: "INFO",
        color: GREEN,
        stamped: true,
        traced: false,
      },
      Self::Warn => Style {
        name: "WARN",
        color: YELLOW,
        stamped: true,
        traced: false,
      },
      Self::Error => Style {
        name: "ERROR",
        color: RED,
        stamped: true,
        traced: true,
      },
      Self::Wtf => Style {
        name: "WTF",
        color: MAGENTA,
        stamped: true,
        traced: false,
      },
    }
  }

  pub const fn as_str(self) -> &'static str {
    self.style().name
  }
}

impl fmt::Display for Level {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Error returned when parsing a [`Level`] from text fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseLevelError {
  input: String,
}

impl ParseLevelError {
  pub fn input(&self) -> &str {
    &self.input
  }
}

impl fmt::Display for ParseLevelError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "unknown level `{}` (expected debug, verbose, info, warn, error or wtf)",
      self.input
    )
  }
}

impl std::error::Error for ParseLevelError {}

impl FromStr for Level {
  type Err = ParseLevelError;

  fn from_str(value: &str) -> Result<Self, Self::Err> {
    Level::ALL
      .into_iter()
      .find(|level| level.as_str().eq_ignore_ascii_case(value.trim()))
      .ok_or_else(|| ParseLevelError {
        input: value.to_owned(),
      })
  }
}

/// Switches fixed for the lifetime of a logger.
///
/// `develop` does not gate a level. It controls how much of an inbound request
/// [`crate::Logger::request`] exposes and must never be on in production.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Flags {
  pub debug: bool,
  pub develop: bool,
  pub verbose: bool,
  pub info: bool,
  /// Gates WARN, ERROR and WTF together.
  pub log: bool,
}

impl Flags {
  /// Everything on.
  pub const fn development() -> Self {
    Self {
      debug: true,
      develop: true,
      verbose: true,
      info: true,
      log: true,
    }
  }

  /// INFO and the WARN/ERROR/WTF tier only.
  pub const fn production() -> Self {
    Self {
      debug: false,
      develop: false,
      verbose: false,
      info: true,
      log: true,
    }
  }

  /// Everything off. Stamped levels still hand out correlation ids.
  pub const fn silent() -> Self {
    Self {
      debug: false,
      develop: false,
      verbose: false,
      info: false,
      log: false,
    }
  }

  pub const fn enables(&self, level: Level) -> bool {
    match level {
      Level::Debug => self.debug,
      Level::Verbose => self.verbose,
      Level::Info => self.info,
      Level::Warn | Level::Error | Level::Wtf => self.log,
    }
  }
}

impl Default for Flags {
  fn default() -> Self {
    Self::production()
  }
}
