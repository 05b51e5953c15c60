use clap::builder::NonEmptyStringValueParser;
use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch all comment threads of a video into `output/raw/*.jsonl`.
    Fetch(FetchArgs),
    /// Flatten a raw `.jsonl` file into `output/parsed/*.csv`.
    Parse(ParseArgs),
}

#[derive(Debug, Args)]
#[command(after_help = "\
E.g. if the url is https://www.youtube.com/watch?v=dQw4w9WgXcQ
then run: yt-comments fetch dQw4w9WgXcQ")]
pub struct FetchArgs {
    /// YouTube video ID (the `v=` query value of the watch URL).
    #[arg(value_parser = NonEmptyStringValueParser::new())]
    pub video_id: String,
}

#[derive(Debug, Args)]
#[command(after_help = "\
E.g. yt-comments parse output/raw/dQw4w9WgXcQ_2024-01-31T23-59-59-000.jsonl")]
pub struct ParseArgs {
    /// Raw comment threads file (created by `fetch`).
    pub raw: String,
}
