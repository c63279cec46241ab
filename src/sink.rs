use std::io::{self, Stderr, Write};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::level::Level;

/// Destination for fully formatted log lines.
///
/// Implementations must write each line as a unit: two concurrent calls may
/// land in either order but never interleave. Failures are swallowed.
pub trait Sink: Send + Sync {
  fn write_line(&self, level: Level, line: &str);
}

impl<S: Sink + ?Sized> Sink for Arc<S> {
  fn write_line(&self, level: Level, line: &str) {
    (**self).write_line(level, line)
  }
}

/// Mutex-guarded [`io::Write`] sink.
#[derive(Debug)]
pub struct WriterSink<W> {
  writer: Mutex<W>,
}

impl WriterSink<Stderr> {
  /// The process-wide standard error stream.
  pub fn stderr() -> Self {
    Self::new(io::stderr())
  }
}

impl<W: Write + Send> WriterSink<W> {
  pub fn new(writer: W) -> Self {
    Self {
      writer: Mutex::new(writer),
    }
  }

  pub fn into_inner(self) -> W {
    self.writer.into_inner()
  }
}

impl<W: Write + Send> Sink for WriterSink<W> {
  fn write_line(&self, _level: Level, line: &str) {
    let mut buffer = String::with_capacity(line.len() + 1);
    buffer.push_str(line);
    buffer.push('\n');

    let mut writer = self.writer.lock();
    if writer.write_all(buffer.as_bytes()).is_ok() {
      let _ = writer.flush();
    }
  }
}

/// In-memory sink that keeps every line it receives.
///
/// Clones share the same buffer, so a test can hand one clone to a logger and
/// inspect the other.
#[derive(Debug, Clone, Default)]
pub struct CaptureSink {
  lines: Arc<Mutex<Vec<(Level, String)>>>,
}

impl CaptureSink {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn lines(&self) -> Vec<String> {
    self
      .lines
      .lock()
      .iter()
      .map(|(_, line)| line.clone())
      .collect()
  }

  pub fn records(&self) -> Vec<(Level, String)> {
    self.lines.lock().clone()
  }

  /// Drain everything captured so far.
  pub fn take(&self) -> Vec<String> {
    std::mem::take(&mut *self.lines.lock())
      .into_iter()
      .map(|(_, line)| line)
      .collect()
  }

  pub fn len(&self) -> usize {
    self.lines.lock().len()
  }

  pub fn is_empty(&self) -> bool {
    self.lines.lock().is_empty()
  }
}

impl Sink for CaptureSink {
  fn write_line(&self, level: Level, line: &str) {
    self.lines.lock().push((level, line.to_owned()));
  }
}

/// `tracing` target used by [`TracingSink`].
pub const LINES_TARGET: &str = "levelog::lines";

/// Forwards lines to the active `tracing` subscriber.
///
/// The line keeps its ANSI codes; pair it with a subscriber built with
/// `with_ansi(false)` if the escapes should not be doubled up.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl Sink for TracingSink {
  fn write_line(&self, level: Level, line: &str) {
    match level {
      Level::Verbose => tracing::trace!(target: LINES_TARGET, "{line}"),
      Level::Debug => tracing::debug!(target: LINES_TARGET, "{line}"),
      Level::Info => tracing::info!(target: LINES_TARGET, "{line}"),
      Level::Warn => tracing::warn!(target: LINES_TARGET, "{line}"),
      Level::Error | Level::Wtf => {
        tracing::error!(target: LINES_TARGET, "{line}")
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn writer_sink_terminates_each_line() {
    let sink = WriterSink::new(Vec::new());
    sink.write_line(Level::Info, "first");
    sink.write_line(Level::Warn, "second");

    let written = String::from_utf8(sink.into_inner()).expect("utf8");
    assert_eq!(written, "first\nsecond\n");
  }

  /// Records the level and target of every event it sees.
  #[derive(Clone, Default)]
  struct EventRecorder {
    events: Arc<Mutex<Vec<(tracing::Level, String)>>>,
  }

  impl tracing::Subscriber for EventRecorder {
    fn enabled(&self, _metadata: &tracing::Metadata<'_>) -> bool {
      true
    }

    fn new_span(
      &self,
      _span: &tracing::span::Attributes<'_>,
    ) -> tracing::span::Id {
      tracing::span::Id::from_u64(1)
    }

    fn record(
      &self,
      _span: &tracing::span::Id,
      _values: &tracing::span::Record<'_>,
    ) {
    }

    fn record_follows_from(
      &self,
      _span: &tracing::span::Id,
      _follows: &tracing::span::Id,
    ) {
    }

    fn event(&self, event: &tracing::Event<'_>) {
      let metadata = event.metadata();
      self
        .events
        .lock()
        .push((*metadata.level(), metadata.target().to_owned()));
    }

    fn enter(&self, _span: &tracing::span::Id) {}

    fn exit(&self, _span: &tracing::span::Id) {}
  }

  #[test]
  fn tracing_sink_maps_each_level() {
    let recorder = EventRecorder::default();

    tracing::subscriber::with_default(recorder.clone(), || {
      for level in Level::ALL {
        TracingSink.write_line(level, level.as_str());
      }
    });

    let events = recorder.events.lock().clone();
    let levels: Vec<tracing::Level> =
      events.iter().map(|(level, _)| *level).collect();
    assert_eq!(
      levels,
      vec![
        tracing::Level::DEBUG,
        tracing::Level::TRACE,
        tracing::Level::INFO,
        tracing::Level::WARN,
        tracing::Level::ERROR,
        tracing::Level::ERROR,
      ]
    );
    assert!(events.iter().all(|(_, target)| target == LINES_TARGET));
    assert_eq!(LINES_TARGET, "levelog::lines");
  }

  #[test]
  fn capture_sink_clones_share_buffer() {
    let sink = CaptureSink::new();
    let handle = sink.clone();
    sink.write_line(Level::Debug, "hello");

    assert_eq!(handle.lines(), vec!["hello"]);
    assert_eq!(handle.records()[0].0, Level::Debug);
    assert_eq!(handle.take(), vec!["hello"]);
    assert!(sink.is_empty());
  }
}
