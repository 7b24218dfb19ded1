//! Rate store for ratex.
//!
//! This crate contains:
//! - The SQLite-backed `Warehouse` (bulk save, filtered reads)
//! - `RateFilter`, the composable query predicate
//! - The exact-decimal `Price` and microsecond `Timestamp` codecs

pub mod error;
pub mod filter;
mod migrations;
pub mod models;
pub mod price;
pub mod timestamp;

use std::collections::HashMap;
use std::str::FromStr;
use std::sync::{Mutex, PoisonError};

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{QueryBuilder, SqlitePool};
use uuid::Uuid;

pub use error::WarehouseError;
pub use filter::RateFilter;
pub use models::Rate;
pub use price::{Price, PriceError, PRICE_SCALE};
pub use timestamp::{Timestamp, TimestampError};

use models::RateRow;

#[derive(Debug, Clone)]
pub struct WarehouseConfig {
    pub url: String,
    pub max_pool_size: u32,
}

impl WarehouseConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_pool_size: 4,
        }
    }
}

/// Persistence boundary for rates. The store exclusively owns persisted
/// rows; readers get owned copies back.
///
/// Besides the pool, the store keeps an identity map of the rows written by
/// the current unit of work. [`Warehouse::clear`] releases it between chunk
/// saves so memory stays bounded over long ingestion runs.
pub struct Warehouse {
    pool: SqlitePool,
    tracked: Mutex<HashMap<Uuid, Rate>>,
}

impl Warehouse {
    pub async fn open(config: WarehouseConfig) -> Result<Self, WarehouseError> {
        let options = SqliteConnectOptions::from_str(&config.url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_pool_size)
            .connect_with(options)
            .await?;

        Self::from_pool(pool).await
    }

    /// In-memory store. Pinned to a single connection because every SQLite
    /// connection gets its own private memory database.
    pub async fn open_in_memory() -> Result<Self, WarehouseError> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
        let pool = SqlitePoolOptions::new()
            .min_connections(1)
            .max_connections(1)
            .connect_with(options)
            .await?;

        Self::from_pool(pool).await
    }

    async fn from_pool(pool: SqlitePool) -> Result<Self, WarehouseError> {
        migrations::apply_migrations(&pool).await?;
        Ok(Self {
            pool,
            tracked: Mutex::new(HashMap::new()),
        })
    }

    /// Persists all given rates in one transaction: either every row commits
    /// or none do. Committed rows are also recorded in the identity map.
    pub async fn save(&self, rates: &[Rate]) -> Result<(), WarehouseError> {
        if rates.is_empty() {
            return Ok(());
        }

        let mut tx = self.pool.begin().await?;
        for rate in rates {
            sqlx::query("INSERT INTO rates (id, pair, price, created_at) VALUES (?, ?, ?, ?)")
                .bind(rate.id().to_string())
                .bind(rate.pair())
                .bind(rate.price().to_sortable())
                .bind(rate.created_at().to_storage())
                .execute(&mut *tx)
                .await?;
        }
        tx.commit().await?;

        let mut tracked = self.lock_tracked();
        for rate in rates {
            tracked.insert(rate.id(), rate.clone());
        }

        Ok(())
    }

    /// Drops the identity map. Persisted rows are unaffected.
    pub fn clear(&self) {
        self.lock_tracked().clear();
    }

    /// Number of rows held by the identity map since the last `clear`.
    pub fn tracked_count(&self) -> usize {
        self.lock_tracked().len()
    }

    /// Applies the filter and returns all matches ordered by `created_at`
    /// ascending, with the time-ordered id as tiebreaker. No implicit limit;
    /// an empty match yields an empty vec, never an error.
    pub async fn find_many(&self, filter: &RateFilter) -> Result<Vec<Rate>, WarehouseError> {
        let mut builder: QueryBuilder<'_, sqlx::Sqlite> =
            QueryBuilder::new("SELECT id, pair, price, created_at FROM rates");
        filter.apply(&mut builder);
        builder.push(" ORDER BY created_at ASC, id ASC");

        let rows: Vec<RateRow> = builder.build_query_as().fetch_all(&self.pool).await?;
        rows.into_iter().map(Rate::try_from).collect()
    }

    fn lock_tracked(&self) -> std::sync::MutexGuard<'_, HashMap<Uuid, Rate>> {
        self.tracked.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
