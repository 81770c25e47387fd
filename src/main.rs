mod cli;

use clap::Parser;

use crate::cli::Cli;

fn main() -> anyhow::Result<()> {
  let cli = Cli::parse();

  tracing_subscriber::fmt()
    .with_max_level(cli.verbosity().tracing_level_filter())
    .with_target(false)
    .with_writer(std::io::stderr)
    .init();

  cli.execute()
}
