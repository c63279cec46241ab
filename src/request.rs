use std::fmt;

use http::Request;

use crate::logger::Logger;

/// What an inbound request looks like in a log line.
pub enum RequestView<'a, B> {
  /// The whole request, headers and body included. Develop mode only.
  Full(&'a Request<B>),
  /// Method and path, without the query string.
  Summary(String),
}

impl<B> RequestView<'_, B> {
  pub fn is_full(&self) -> bool {
    matches!(self, Self::Full(_))
  }
}

impl<B: fmt::Debug> fmt::Display for RequestView<'_, B> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Full(request) => write!(f, "{request:?}"),
      Self::Summary(summary) => f.write_str(summary),
    }
  }
}

impl<B: fmt::Debug> fmt::Debug for RequestView<'_, B> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Full(request) => f.debug_tuple("Full").field(request).finish(),
      Self::Summary(summary) => f.debug_tuple("Summary").field(summary).finish(),
    }
  }
}

/// Reduce `request` to something safe to log unless `develop` is set.
pub fn summarize_request<B>(
  request: &Request<B>,
  develop: bool,
) -> RequestView<'_, B> {
  if develop {
    RequestView::Full(request)
  } else {
    RequestView::Summary(format!(
      "[{}] {:?}",
      request.method(),
      request.uri().path()
    ))
  }
}

impl Logger {
  /// [`summarize_request`] using this logger's `develop` flag.
  pub fn request<'a, B>(&self, request: &'a Request<B>) -> RequestView<'a, B> {
    summarize_request(request, self.flags().develop)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::level::Flags;
  use crate::logger::Tag;
  use crate::sink::CaptureSink;

  fn get_x() -> Request<()> {
    Request::builder()
      .method("GET")
      .uri("https://example.com/x?token=secret")
      .header("authorization", "Bearer hunter2")
      .body(())
      .expect("valid request")
  }

  #[test]
  fn develop_mode_exposes_full_request() {
    let request = get_x();
    let view = summarize_request(&request, true);

    let RequestView::Full(full) = view else {
      panic!("expected full request");
    };
    assert!(std::ptr::eq(full, &request));
  }

  #[test]
  fn production_summary_drops_query_and_headers() {
    let request = get_x();
    let view = summarize_request(&request, false);

    assert!(!view.is_full());
    let text = view.to_string();
    assert_eq!(text, "[GET] \"/x\"");
    assert!(!text.contains("token"));
    assert!(!text.contains("hunter2"));
  }

  #[test]
  fn logger_uses_its_develop_flag() {
    let request = get_x();
    let sink = CaptureSink::new();
    let logger = Logger::with_sink(Flags::production(), sink.clone());
    let web = Tag::new_static("web");

    crate::info!(logger, web, "incoming {}", logger.request(&request));
    assert!(sink.lines()[0].contains("[GET] \"/x\""));

    let develop = Logger::with_sink(Flags::development(), CaptureSink::new());
    assert!(develop.request(&request).to_string().contains("hunter2"));
  }
}
