use std::backtrace::Backtrace;
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::level::{Flags, Level, RESET};
use crate::sink::{Sink, WriterSink};

/// Name of the subsystem emitting a line.
///
/// Tags carry no meaning to the logger beyond being printed; any string works.
///
/// ```
/// use levelog::Tag;
///
/// const NET: Tag = Tag::new_static("net");
/// assert_eq!(NET.as_str(), "net");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Tag(Cow<'static, str>);

impl Tag {
  pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
    Self(name.into())
  }

  pub const fn new_static(name: &'static str) -> Self {
    Self(Cow::Borrowed(name))
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl fmt::Display for Tag {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

impl From<&'static str> for Tag {
  fn from(name: &'static str) -> Self {
    Self::new_static(name)
  }
}

impl From<String> for Tag {
  fn from(name: String) -> Self {
    Self(Cow::Owned(name))
  }
}

static LAST_ID: AtomicI64 = AtomicI64::new(i64::MIN);

/// Wall-clock nanoseconds since the Unix epoch, never lower than any id
/// previously handed out in this process.
pub fn correlation_id() -> i64 {
  let now = SystemTime::now()
    .duration_since(UNIX_EPOCH)
    .map(|elapsed| i64::try_from(elapsed.as_nanos()).unwrap_or(i64::MAX))
    .unwrap_or(0);

  LAST_ID.fetch_max(now, Ordering::Relaxed).max(now)
}

/// Leveled, colorized console logger.
///
/// Each level is gated by its own switch in [`Flags`]. INFO, WARN, ERROR and
/// WTF return a correlation id computed before the gate, so the id is
/// available even when nothing is printed.
#[derive(Clone)]
pub struct Logger {
  flags: Flags,
  sink: Arc<dyn Sink>,
}

impl fmt::Debug for Logger {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Logger")
      .field("flags", &self.flags)
      .finish_non_exhaustive()
  }
}

impl Default for Logger {
  fn default() -> Self {
    Self::new(Flags::default())
  }
}

impl Logger {
  /// Logger writing to standard error.
  pub fn new(flags: Flags) -> Self {
    Self::with_sink(flags, WriterSink::stderr())
  }

  pub fn with_sink(flags: Flags, sink: impl Sink + 'static) -> Self {
    Self {
      flags,
      sink: Arc::new(sink),
    }
  }

  pub fn flags(&self) -> Flags {
    self.flags
  }

  pub fn enabled(&self, level: Level) -> bool {
    self.flags.enables(level)
  }

  /// Developer output.
  pub fn debug(&self, tag: &Tag, args: fmt::Arguments<'_>) {
    self.plain(Level::Debug, tag, args);
  }

  /// Very detailed output, below DEBUG in importance.
  pub fn verbose(&self, tag: &Tag, args: fmt::Arguments<'_>) {
    self.plain(Level::Verbose, tag, args);
  }

  pub fn info(&self, tag: &Tag, args: fmt::Arguments<'_>) -> i64 {
    self.stamped(Level::Info, tag, args)
  }

  pub fn warn(&self, tag: &Tag, args: fmt::Arguments<'_>) -> i64 {
    self.stamped(Level::Warn, tag, args)
  }

  /// Like [`Logger::warn`], with the current stack trace appended.
  pub fn error(&self, tag: &Tag, args: fmt::Arguments<'_>) -> i64 {
    self.stamped(Level::Error, tag, args)
  }

  pub fn wtf(&self, tag: &Tag, args: fmt::Arguments<'_>) -> i64 {
    self.stamped(Level::Wtf, tag, args)
  }

  /// Emit at a level chosen at runtime. Returns the correlation id for
  /// stamped levels.
  pub fn log(
    &self,
    level: Level,
    tag: &Tag,
    args: fmt::Arguments<'_>,
  ) -> Option<i64> {
    if level.style().stamped {
      Some(self.stamped(level, tag, args))
    } else {
      self.plain(level, tag, args);
      None
    }
  }

  fn plain(&self, level: Level, tag: &Tag, args: fmt::Arguments<'_>) {
    if self.flags.enables(level) {
      self.write(level, tag, None, args);
    }
  }

  fn stamped(&self, level: Level, tag: &Tag, args: fmt::Arguments<'_>) -> i64 {
    let id = correlation_id();
    if self.flags.enables(level) {
      self.write(level, tag, Some(id), args);
    }
    id
  }

  fn write(
    &self,
    level: Level,
    tag: &Tag,
    id: Option<i64>,
    args: fmt::Arguments<'_>,
  ) {
    let style = level.style();

    // The trace is spliced in after interpolation so its text is never read
    // as a format string.
    let message = if style.traced {
      let trace = Backtrace::force_capture();
      Cow::Owned(format!("{args}\n StackTrace : {trace}"))
    } else {
      match args.as_str() {
        Some(literal) => Cow::Borrowed(literal),
        None => Cow::Owned(args.to_string()),
      }
    };

    let line = match id {
      Some(id) => format!(
        "{}{}/{tag} : {id} -- {message}{RESET}",
        style.color, style.name
      ),
      None => format!("{}{}/{tag} : {message}{RESET}", style.color, style.name),
    };

    self.sink.write_line(level, &line);
  }
}

/// Log at DEBUG: `debug!(logger, tag, "fmt", args...)`.
#[macro_export]
macro_rules! debug {
  ($logger:expr, $tag:expr, $($arg:tt)+) => {
    $logger.debug(&$tag, ::std::format_args!($($arg)+))
  };
}

/// Log at VERBOSE: `verbose!(logger, tag, "fmt", args...)`.
#[macro_export]
macro_rules! verbose {
  ($logger:expr, $tag:expr, $($arg:tt)+) => {
    $logger.verbose(&$tag, ::std::format_args!($($arg)+))
  };
}

/// Log at INFO and evaluate to the correlation id.
#[macro_export]
macro_rules! info {
  ($logger:expr, $tag:expr, $($arg:tt)+) => {
    $logger.info(&$tag, ::std::format_args!($($arg)+))
  };
}

/// Log at WARN and evaluate to the correlation id.
#[macro_export]
macro_rules! warn {
  ($logger:expr, $tag:expr, $($arg:tt)+) => {
    $logger.warn(&$tag, ::std::format_args!($($arg)+))
  };
}

/// Log at ERROR with a stack trace and evaluate to the correlation id.
#[macro_export]
macro_rules! error {
  ($logger:expr, $tag:expr, $($arg:tt)+) => {
    $logger.error(&$tag, ::std::format_args!($($arg)+))
  };
}

/// Log at WTF and evaluate to the correlation id.
#[macro_export]
macro_rules! wtf {
  ($logger:expr, $tag:expr, $($arg:tt)+) => {
    $logger.wtf(&$tag, ::std::format_args!($($arg)+))
  };
}
