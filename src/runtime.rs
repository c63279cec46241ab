use crate::{Cli, run};
use owo_colors::OwoColorize;

/// Runs the binary and turns failures into an exit code.
pub struct Runtime {
  cli: Cli,
}

impl Runtime {
  /// Construct a new [`Runtime`] from parsed CLI arguments.
  #[must_use]
  pub fn new(cli: Cli) -> Self {
    Self { cli }
  }

  /// Execute and return the process exit code.
  ///
  /// Errors are printed with their cause chain on stderr and map to `1`.
  pub async fn execute(self) -> i32 {
    let plain = self.cli.plain;
    match run(self.cli).await {
      Ok(code) => code,
      Err(err) => {
        report(&err, plain);
        1
      }
    }
  }
}

fn report(err: &anyhow::Error, plain: bool) {
  if plain {
    eprintln!("error: {err}");
  } else {
    eprintln!("{} {}", "error:".red().bold(), err.to_string().red().bold());
  }

  for cause in err.chain().skip(1) {
    if plain {
      eprintln!("  caused by: {cause}");
    } else {
      eprintln!("  {} {}", "↳".red(), cause);
    }
  }
}
