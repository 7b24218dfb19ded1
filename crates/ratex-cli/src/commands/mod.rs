mod fetch;
mod rates;

use serde_json::Value;

use ratex_core::{Warehouse, WarehouseConfig};

use crate::cli::{Cli, Command};
use crate::config::resolve_db_url;
use crate::error::CliError;

pub async fn run(cli: &Cli) -> Result<Value, CliError> {
    let warehouse = open_warehouse(cli).await?;

    match &cli.command {
        Command::Fetch(args) => fetch::run(args, warehouse).await,
        Command::Last24h(args) => rates::last24h(args, &warehouse).await,
        Command::Day(args) => rates::day(args, &warehouse).await,
    }
}

async fn open_warehouse(cli: &Cli) -> Result<Warehouse, CliError> {
    let url = resolve_db_url(cli.db_url.as_deref())?;
    Ok(Warehouse::open(WarehouseConfig::new(url)).await?)
}
