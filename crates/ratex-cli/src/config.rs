use std::env;
use std::fs;
use std::path::PathBuf;

use crate::error::CliError;

/// Pairs ingested when `fetch` is called without `--pairs`.
pub const DEFAULT_PAIRS: &[&str] = &["BTCEUR", "ETHEUR", "ADAEUR", "SOLEUR", "XRPEUR"];

/// Resolution order: explicit flag, `RATEX_DB_URL`, `$HOME/.ratex/rates.db`.
pub fn resolve_db_url(explicit: Option<&str>) -> Result<String, CliError> {
    if let Some(url) = explicit {
        return Ok(url.to_owned());
    }

    if let Ok(url) = env::var("RATEX_DB_URL") {
        if !url.is_empty() {
            return Ok(url);
        }
    }

    let home = env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    let data_dir = home.join(".ratex");
    fs::create_dir_all(&data_dir)?;

    Ok(format!("sqlite://{}", data_dir.join("rates.db").display()))
}
