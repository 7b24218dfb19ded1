//! Client for the Binance ticker-price endpoint.

pub mod ticker;

use std::sync::Arc;

use serde_json::{Map, Value};
use thiserror::Error;

use ratex_warehouse::{Price, PriceError};

use crate::http_client::{HttpClient, HttpError, HttpRequest};

pub use ticker::TickerPrice;

pub const BASE_URL: &str = "https://api.binance.com";
const TICKER_PRICE_ENDPOINT: &str = "/api/v3/ticker/price";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Transport(#[from] HttpError),

    #[error("upstream returned HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("upstream response is not valid JSON: {body}")]
    InvalidJson { body: String },

    #[error("upstream entry is missing required fields: {fields}")]
    MissingFields { fields: &'static str },

    #[error("upstream field '{field}' must be {expected}")]
    InvalidField {
        field: &'static str,
        expected: &'static str,
    },

    #[error("upstream price is not numeric: {0}")]
    Price(#[from] PriceError),
}

/// Adapter over the external pricing API. One outbound GET per
/// [`ApiAdapter::fetch_rates`] call.
pub struct ApiAdapter {
    client: Arc<dyn HttpClient>,
    base_url: String,
}

impl ApiAdapter {
    pub fn new(client: Arc<dyn HttpClient>) -> Self {
        Self::with_base_url(client, BASE_URL)
    }

    pub fn with_base_url(client: Arc<dyn HttpClient>, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Fetches current prices for the given pairs. An empty list omits the
    /// symbol filter and the server returns every pair it trades.
    pub async fn fetch_rates(&self, pairs: &[String]) -> Result<Vec<TickerPrice>, ApiError> {
        let request = self.ticker_price_request(pairs);
        let response = self.client.execute(request).await?;

        if !response.is_success() {
            return Err(ApiError::Http {
                status: response.status,
                body: response.body,
            });
        }

        let decoded: Value = serde_json::from_str(&response.body).map_err(|_| {
            ApiError::InvalidJson {
                body: response.body.clone(),
            }
        })?;

        // The endpoint answers with an array for a symbol list and a bare
        // object for a single symbol; normalize to a list.
        let entries = match decoded {
            Value::Array(entries) => entries,
            Value::Object(_) => vec![decoded],
            _ => {
                return Err(ApiError::InvalidJson {
                    body: response.body,
                })
            }
        };

        let mut prices = Vec::with_capacity(entries.len());
        for entry in entries {
            // Non-object entries are dropped; incomplete objects fail the
            // whole call. This asymmetry mirrors the upstream contract.
            let Value::Object(fields) = entry else {
                continue;
            };
            prices.push(map_ticker(&fields)?);
        }

        Ok(prices)
    }

    fn ticker_price_request(&self, pairs: &[String]) -> HttpRequest {
        let mut url = format!("{}{}", self.base_url, TICKER_PRICE_ENDPOINT);

        if !pairs.is_empty() {
            let symbols =
                serde_json::to_string(pairs).expect("a list of strings always serializes");
            url.push_str("?symbols=");
            url.push_str(&urlencoding::encode(&symbols));
        }

        HttpRequest::get(url)
            .with_header("content-type", "application/json")
            .with_header("accept", "application/json")
    }
}

fn map_ticker(fields: &Map<String, Value>) -> Result<TickerPrice, ApiError> {
    if !fields.contains_key("symbol") || !fields.contains_key("price") {
        return Err(ApiError::MissingFields {
            fields: "symbol, price",
        });
    }

    let symbol = match &fields["symbol"] {
        Value::String(symbol) if !symbol.is_empty() => symbol.clone(),
        _ => {
            return Err(ApiError::InvalidField {
                field: "symbol",
                expected: "a non-empty string",
            })
        }
    };

    let price = match &fields["price"] {
        Value::String(price) => Price::parse(price)?,
        Value::Number(price) => Price::parse(&price.to_string())?,
        _ => {
            return Err(ApiError::InvalidField {
                field: "price",
                expected: "a number or numeric string",
            })
        }
    };

    Ok(TickerPrice { symbol, price })
}
