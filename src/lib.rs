//! Leveled, colorized console logging.
//!
//! ```
//! use levelog::{CaptureSink, Flags, Logger, Tag};
//!
//! const NET: Tag = Tag::new_static("net");
//!
//! let sink = CaptureSink::new();
//! let logger = Logger::with_sink(Flags::production(), sink.clone());
//!
//! let id = levelog::warn!(logger, NET, "retry {}", 3);
//! levelog::debug!(logger, NET, "not printed in production");
//!
//! assert_eq!(
//!   sink.lines(),
//!   vec![format!("\x1B[33mWARN/net : {id} -- retry 3\x1B[0m")]
//! );
//! ```

pub mod cli;
pub mod core;
pub mod level;
pub mod logger;
pub mod logging;
pub mod request;
pub mod runtime;
pub mod sink;
pub mod ui;

pub use cli::Cli;
pub use core::run;
pub use level::{Flags, Level, ParseLevelError, Style};
pub use logger::{Logger, Tag, correlation_id};
pub use request::{RequestView, summarize_request};
pub use runtime::Runtime;
pub use sink::{CaptureSink, Sink, TracingSink, WriterSink};
