use std::fmt::{Display, Formatter};
use std::str::FromStr;

use bigdecimal::{BigDecimal, RoundingMode};
use serde::{Serialize, Serializer};
use thiserror::Error;

/// Fractional digits kept by the store and emitted by [`Price::to_fixed`].
pub const PRICE_SCALE: i64 = 18;

/// Integer digits covered by the sortable storage encoding.
const INTEGER_WIDTH: usize = 20;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum PriceError {
    #[error("invalid decimal value: '{value}'")]
    Invalid { value: String },
    #[error("price cannot be negative: '{value}'")]
    Negative { value: String },
    #[error("price must be a finite number, got {value}")]
    NonFinite { value: f64 },
}

/// Arbitrary-precision price. All arithmetic and comparison stays in base 10;
/// a price never passes through binary floating point.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Price(BigDecimal);

impl Price {
    /// Parses a numeric string. Scientific notation is accepted because the
    /// upstream API may serialize small numbers that way. Negative values are
    /// rejected: a quoted price is never below zero, and the sortable storage
    /// encoding relies on it.
    pub fn parse(value: &str) -> Result<Self, PriceError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(PriceError::Invalid {
                value: value.to_owned(),
            });
        }

        let decimal = BigDecimal::from_str(trimmed).map_err(|_| PriceError::Invalid {
            value: value.to_owned(),
        })?;

        if decimal < BigDecimal::from(0) {
            return Err(PriceError::Negative {
                value: value.to_owned(),
            });
        }

        Ok(Self(decimal))
    }

    /// Formats with exactly [`PRICE_SCALE`] fractional digits, zero-padded,
    /// plain notation. Values carrying more digits are rounded half-up, which
    /// matches a DECIMAL(38,18) column.
    ///
    /// Rendered from the scaled integer digits directly; `BigDecimal`'s
    /// `Display` switches to exponential notation for small magnitudes, which
    /// would break the fixed-width contract.
    pub fn to_fixed(&self) -> String {
        let (digits, _) = self
            .0
            .with_scale_round(PRICE_SCALE, RoundingMode::HalfUp)
            .into_bigint_and_exponent();

        let scale = PRICE_SCALE as usize;
        let mut body = digits.to_string();
        if body.len() <= scale {
            body = format!("{body:0>width$}", width = scale + 1);
        }

        let split = body.len() - scale;
        format!("{}.{}", &body[..split], &body[split..])
    }

    /// Canonical storage form: the integer part zero-padded to 20 digits plus
    /// the full 18-digit fraction. Lexicographic order of this form equals
    /// numeric order (prices are non-negative), so the store can range-filter
    /// on a TEXT column without losing precision.
    pub fn to_sortable(&self) -> String {
        let fixed = self.to_fixed();
        let (integer, fraction) = fixed
            .split_once('.')
            .unwrap_or((fixed.as_str(), "000000000000000000"));
        format!("{integer:0>width$}.{fraction}", width = INTEGER_WIDTH)
    }

    pub fn as_bigdecimal(&self) -> &BigDecimal {
        &self.0
    }
}

impl From<u64> for Price {
    fn from(value: u64) -> Self {
        Self(BigDecimal::from(value))
    }
}

impl TryFrom<f64> for Price {
    type Error = PriceError;

    /// Goes through the float's shortest decimal representation rather than
    /// its exact binary expansion, so `0.1_f64` becomes `0.1`.
    fn try_from(value: f64) -> Result<Self, PriceError> {
        if !value.is_finite() {
            return Err(PriceError::NonFinite { value });
        }
        Self::parse(&format!("{value}"))
    }
}

impl FromStr for Price {
    type Err = PriceError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value)
    }
}

impl Display for Price {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_fixed())
    }
}

impl Serialize for Price {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_fixed())
    }
}
