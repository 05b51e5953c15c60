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
    yt_comments::logging::init().context("init logging")?;

    let cli = yt_comments::cli::Cli::parse();
    tracing::debug!(?cli, "parsed cli");

    match cli.command {
        yt_comments::cli::Command::Fetch(args) => {
            yt_comments::fetch::run(args).context("fetch")?;
        }
        yt_comments::cli::Command::Parse(args) => {
            yt_comments::parse::run(args).context("parse")?;
        }
    }

    Ok(())
}
