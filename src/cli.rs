use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::config::DEFAULT_YEAR;

#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the Marimekko scene for a page range as JSON.
    Scene(SceneArgs),
    /// Print the book table for a page range and optional selection.
    Table(TableArgs),
}

#[derive(Debug, Args)]
pub struct DatasetArgs {
    /// Goodreads library export (CSV).
    #[arg(long)]
    pub input: String,

    /// Only books added in this year.
    #[arg(long, default_value_t = DEFAULT_YEAR)]
    pub year: i32,

    /// Exclusive shelves to include (repeatable; default: read, currently-reading).
    #[arg(long = "shelf")]
    pub shelves: Vec<String>,
}

#[derive(Debug, Args)]
pub struct RangeArgs {
    /// Lowest page count (default: smallest book in the log).
    #[arg(long, allow_negative_numbers = true)]
    pub low: Option<i64>,

    /// Highest page count (default: largest book in the log).
    #[arg(long, allow_negative_numbers = true)]
    pub high: Option<i64>,
}

#[derive(Debug, Args)]
pub struct SceneArgs {
    #[command(flatten)]
    pub dataset: DatasetArgs,

    #[command(flatten)]
    pub range: RangeArgs,
}

#[derive(Debug, Args)]
pub struct TableArgs {
    #[command(flatten)]
    pub dataset: DatasetArgs,

    #[command(flatten)]
    pub range: RangeArgs,

    /// Selected month (`YYYY-MM`); requires `--rating`.
    #[arg(long, requires = "rating")]
    pub month: Option<String>,

    /// Selected rating label (`Unrated`, `1`..`5`); requires `--month`.
    #[arg(long, requires = "month")]
    pub rating: Option<String>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = TableFormat::Json)]
    pub format: TableFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TableFormat {
    Json,
    Csv,
}
