use clap::{Args, Parser, Subcommand};

/// ratex - crypto rate ingestion and exact-decimal query CLI.
///
/// Pulls current prices for a set of trading pairs from the upstream API,
/// stores them with 18 fractional digits of precision, and serves range
/// queries over the stored history.
#[derive(Debug, Parser)]
#[command(name = "ratex", version, about = "Crypto rate ingestion and query CLI")]
pub struct Cli {
    /// SQLite database URL. Falls back to $RATEX_DB_URL, then
    /// $HOME/.ratex/rates.db.
    #[arg(long, global = true)]
    pub db_url: Option<String>,

    /// Pretty-print JSON output.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch current rates from the upstream API and persist them.
    Fetch(FetchArgs),
    /// List stored rates for a pair over the last 24 hours.
    #[command(name = "last24h")]
    Last24h(Last24hArgs),
    /// List stored rates for a pair on one calendar day.
    Day(DayArgs),
}

#[derive(Debug, Args)]
pub struct FetchArgs {
    /// Pairs to ingest, comma separated. Defaults to the built-in watch list.
    #[arg(long, value_delimiter = ',')]
    pub pairs: Vec<String>,

    /// How many pairs to process per upstream call (must be positive).
    #[arg(long, default_value_t = 100)]
    pub batch_count: i64,

    /// Override the upstream API base URL.
    #[arg(long)]
    pub base_url: Option<String>,
}

#[derive(Debug, Args)]
pub struct Last24hArgs {
    /// Trading pair, free form (`BTC/EUR` and `btceur` both work).
    #[arg(long)]
    pub pair: String,
}

#[derive(Debug, Args)]
pub struct DayArgs {
    /// Trading pair, free form (`BTC/EUR` and `btceur` both work).
    #[arg(long)]
    pub pair: String,

    /// Calendar day, YYYY-MM-DD. Must not be in the future.
    #[arg(long)]
    pub date: String,
}
