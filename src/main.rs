use std::process::ExitCode;

use anyhow::Context as _;
use clap::Parser as _;

fn main() -> ExitCode {
    if let Err(err) = try_main() {
        eprintln!("{err:#}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn try_main() -> anyhow::Result<()> {
    shelfmekko::logging::init(shelfmekko::logging::DEFAULT_FILTER).context("init logging")?;

    let cli = shelfmekko::cli::Cli::parse();
    tracing::debug!(?cli, "parsed cli");

    match cli.command {
        shelfmekko::cli::Command::Scene(args) => {
            shelfmekko::report::scene(args).context("scene")?;
        }
        shelfmekko::cli::Command::Table(args) => {
            shelfmekko::report::table(args).context("table")?;
        }
    }

    Ok(())
}
