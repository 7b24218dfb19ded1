//! Core contracts for ratex.
//!
//! This crate contains:
//! - The upstream pricing API adapter and its transport seam
//! - The chunked ingestion pipeline (fetch, map, persist)
//! - Pair normalization for the query surface

pub mod binance;
pub mod domain;
pub mod error;
pub mod http_client;
pub mod ingest;

pub use binance::{ApiAdapter, ApiError, TickerPrice, BASE_URL};
pub use error::ValidationError;
pub use http_client::{HttpClient, HttpError, HttpRequest, HttpResponse, ReqwestHttpClient};
pub use ingest::{map_rates, IngestError, RateService, DEFAULT_CHUNK_SIZE};
pub use ratex_warehouse::{
    Price, PriceError, Rate, RateFilter, Timestamp, TimestampError, Warehouse, WarehouseConfig,
    WarehouseError, PRICE_SCALE,
};
