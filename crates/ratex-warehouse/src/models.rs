use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

use crate::price::Price;
use crate::timestamp::Timestamp;
use crate::WarehouseError;

/// A persisted quote. Immutable once created: the ingestion pipeline builds
/// rates, the store persists them, and nothing updates them afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rate {
    id: Uuid,
    pair: String,
    price: Price,
    created_at: Timestamp,
}

impl Rate {
    /// IDs are UUIDv7, so ID order coincides with creation order and serves
    /// as a stable secondary sort key.
    pub fn new(pair: impl Into<String>, price: Price, created_at: Timestamp) -> Self {
        Self {
            id: Uuid::now_v7(),
            pair: pair.into(),
            price,
            created_at,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn pair(&self) -> &str {
        &self.pair
    }

    pub fn price(&self) -> &Price {
        &self.price
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }
}

/// Raw row shape as it lives in SQLite; every column is TEXT.
#[derive(Debug, FromRow)]
pub(crate) struct RateRow {
    pub id: String,
    pub pair: String,
    pub price: String,
    pub created_at: String,
}

impl TryFrom<RateRow> for Rate {
    type Error = WarehouseError;

    fn try_from(row: RateRow) -> Result<Self, Self::Error> {
        let id = Uuid::parse_str(&row.id)
            .map_err(|_| WarehouseError::InvalidData(format!("malformed rate id '{}'", row.id)))?;
        let price = Price::parse(&row.price).map_err(|error| {
            WarehouseError::InvalidData(format!("malformed rate price: {error}"))
        })?;
        let created_at = Timestamp::parse(&row.created_at).map_err(|error| {
            WarehouseError::InvalidData(format!("malformed rate timestamp: {error}"))
        })?;

        Ok(Self {
            id,
            pair: row.pair,
            price,
            created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_rate_gets_a_unique_version_7_id() {
        let created_at = Timestamp::now();
        let first = Rate::new("BTCEUR", Price::from(1), created_at);
        let second = Rate::new("BTCEUR", Price::from(2), created_at);
        assert_ne!(first.id(), second.id());
        assert_eq!(first.id().get_version_num(), 7);
    }

    #[test]
    fn ids_order_by_creation_across_milliseconds() {
        let created_at = Timestamp::now();
        let first = Rate::new("BTCEUR", Price::from(1), created_at);
        std::thread::sleep(std::time::Duration::from_millis(2));
        let second = Rate::new("BTCEUR", Price::from(2), created_at);
        assert!(first.id() < second.id());
    }

    #[test]
    fn row_conversion_rejects_malformed_columns() {
        let row = RateRow {
            id: String::from("not-a-uuid"),
            pair: String::from("BTCEUR"),
            price: String::from("1.0"),
            created_at: String::from("2026-08-23T00:00:00.000000+00:00"),
        };
        assert!(matches!(
            Rate::try_from(row),
            Err(WarehouseError::InvalidData(_))
        ));
    }
}
