use owo_colors::{AnsiColors, OwoColorize};

use crate::level::Level;

fn level_color(level: Level) -> AnsiColors {
  match level {
    Level::Debug | Level::Verbose => AnsiColors::Default,
    Level::Info => AnsiColors::Green,
    Level::Warn => AnsiColors::Yellow,
    Level::Error => AnsiColors::Red,
    Level::Wtf => AnsiColors::Magenta,
  }
}

/// Print the correlation ids handed back by the logger, one per line.
pub fn render_ids(level: Level, ids: &[i64], use_color: bool) {
  for id in ids {
    if use_color {
      println!(
        "{} {}",
        level.as_str().color(level_color(level)).bold(),
        id.to_string().dimmed()
      );
    } else {
      println!("{level} {id}");
    }
  }
}

/// Note on stdout that the chosen level is switched off.
pub fn render_disabled(level: Level, use_color: bool) {
  let message = format!("{level} is disabled; no lines were written");
  if use_color {
    println!("{}", message.yellow().bold());
  } else {
    println!("{message}");
  }
}
