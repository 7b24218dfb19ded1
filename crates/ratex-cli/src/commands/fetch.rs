use std::sync::Arc;

use serde_json::{json, Value};

use ratex_core::{ApiAdapter, RateService, ReqwestHttpClient, Warehouse};

use crate::cli::FetchArgs;
use crate::config::DEFAULT_PAIRS;
use crate::error::CliError;

pub async fn run(args: &FetchArgs, warehouse: Warehouse) -> Result<Value, CliError> {
    // The service itself resets a non-positive chunk size, but at the CLI
    // boundary a bad flag is operator error and gets rejected outright.
    if args.batch_count <= 0 {
        return Err(CliError::InvalidOption(String::from(
            "--batch-count must be a positive integer",
        )));
    }
    let batch_count = args.batch_count as usize;

    let pairs = if args.pairs.is_empty() {
        DEFAULT_PAIRS.iter().map(|p| String::from(*p)).collect()
    } else {
        args.pairs.clone()
    };

    let client = Arc::new(ReqwestHttpClient::new());
    let api = match &args.base_url {
        Some(base_url) => ApiAdapter::with_base_url(client, base_url),
        None => ApiAdapter::new(client),
    };

    let service = RateService::new(api, Arc::new(warehouse));
    service.fetch_rates(&pairs, batch_count).await?;

    Ok(json!({
        "data": {
            "message": "rates fetched successfully",
            "pairs": pairs.len(),
            "batch_count": batch_count,
        }
    }))
}
