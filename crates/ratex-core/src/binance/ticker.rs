use ratex_warehouse::Price;

/// A symbol/price pair as received from the ticker endpoint. Transient:
/// mapped into a [`ratex_warehouse::Rate`] right after the fetch and then
/// discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickerPrice {
    pub symbol: String,
    pub price: Price,
}
