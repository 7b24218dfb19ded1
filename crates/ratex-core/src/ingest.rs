//! Chunked ingestion of upstream quotes into the rate store.

use std::sync::Arc;

use thiserror::Error;

use ratex_warehouse::{Rate, Timestamp, Warehouse, WarehouseError};

use crate::binance::{ApiAdapter, ApiError, TickerPrice};

/// Applied when a caller passes a non-positive chunk size.
pub const DEFAULT_CHUNK_SIZE: usize = 100;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Warehouse(#[from] WarehouseError),
}

/// Maps fetched quotes into persistable rates. Pure: every rate in the
/// batch shares the single `created_at` captured for the chunk, so rows from
/// one upstream round-trip are temporally indistinguishable.
pub fn map_rates(ticker_prices: Vec<TickerPrice>, created_at: Timestamp) -> Vec<Rate> {
    ticker_prices
        .into_iter()
        .map(|ticker| Rate::new(ticker.symbol, ticker.price, created_at))
        .collect()
}

/// Drives the pipeline: chunk the pair list, then per chunk fetch, map,
/// save, clear — strictly in order.
pub struct RateService {
    api: ApiAdapter,
    warehouse: Arc<Warehouse>,
}

impl RateService {
    pub fn new(api: ApiAdapter, warehouse: Arc<Warehouse>) -> Self {
        Self { api, warehouse }
    }

    /// Ingests current rates for `pairs` in chunks of at most `chunk_size`.
    ///
    /// A non-positive chunk size silently falls back to
    /// [`DEFAULT_CHUNK_SIZE`]. Chunks run sequentially with no retry: the
    /// first failure aborts the run, and chunks saved before it stay
    /// committed — there is deliberately no cross-chunk transaction.
    pub async fn fetch_rates(
        &self,
        pairs: &[String],
        chunk_size: usize,
    ) -> Result<(), IngestError> {
        let chunk_size = if chunk_size < 1 {
            DEFAULT_CHUNK_SIZE
        } else {
            chunk_size
        };

        for (index, chunk) in pairs.chunks(chunk_size).enumerate() {
            let ticker_prices = self.api.fetch_rates(chunk).await?;
            let created_at = Timestamp::now();

            let rates = map_rates(ticker_prices, created_at);

            self.warehouse.save(&rates).await?;
            self.warehouse.clear();

            tracing::info!(chunk = index + 1, rows = rates.len(), "processed chunk");
        }

        Ok(())
    }
}
