use sqlx::{QueryBuilder, Sqlite};
use uuid::Uuid;

use crate::price::Price;
use crate::timestamp::Timestamp;

/// Optional, AND-combined constraints for a rate query.
///
/// Built once, then applied; there are no setters after construction. An
/// unset field contributes no constraint. Every set field becomes a bound
/// parameter — user input never lands in the SQL text itself.
#[derive(Debug, Clone, Default)]
pub struct RateFilter {
    id: Option<Uuid>,
    pair: Option<String>,
    price_from: Option<Price>,
    price_to: Option<Price>,
    created_from: Option<Timestamp>,
    created_to: Option<Timestamp>,
}

impl RateFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = Some(id);
        self
    }

    /// Exact, case-sensitive match. Callers normalize the pair (uppercase,
    /// separators stripped) before setting it.
    pub fn with_pair(mut self, pair: impl Into<String>) -> Self {
        self.pair = Some(pair.into());
        self
    }

    pub fn with_price_from(mut self, price: Price) -> Self {
        self.price_from = Some(price);
        self
    }

    pub fn with_price_to(mut self, price: Price) -> Self {
        self.price_to = Some(price);
        self
    }

    pub fn with_created_from(mut self, created: Timestamp) -> Self {
        self.created_from = Some(created);
        self
    }

    pub fn with_created_to(mut self, created: Timestamp) -> Self {
        self.created_to = Some(created);
        self
    }

    /// Appends `WHERE`/`AND` clauses for every set field. Price and
    /// timestamp bounds bind their canonical TEXT forms, which compare
    /// exactly against the stored columns.
    pub(crate) fn apply(&self, builder: &mut QueryBuilder<'_, Sqlite>) {
        let mut has_clause = false;

        if let Some(id) = self.id {
            join(builder, &mut has_clause);
            builder.push("id = ").push_bind(id.to_string());
        }

        if let Some(pair) = &self.pair {
            join(builder, &mut has_clause);
            builder.push("pair = ").push_bind(pair.clone());
        }

        if let Some(price_from) = &self.price_from {
            join(builder, &mut has_clause);
            builder.push("price >= ").push_bind(price_from.to_sortable());
        }

        if let Some(price_to) = &self.price_to {
            join(builder, &mut has_clause);
            builder.push("price <= ").push_bind(price_to.to_sortable());
        }

        if let Some(created_from) = self.created_from {
            join(builder, &mut has_clause);
            builder
                .push("created_at >= ")
                .push_bind(created_from.to_storage());
        }

        if let Some(created_to) = self.created_to {
            join(builder, &mut has_clause);
            builder
                .push("created_at <= ")
                .push_bind(created_to.to_storage());
        }
    }
}

fn join(builder: &mut QueryBuilder<'_, Sqlite>, has_clause: &mut bool) {
    builder.push(if *has_clause { " AND " } else { " WHERE " });
    *has_clause = true;
}
