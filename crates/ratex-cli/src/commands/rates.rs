use serde::Serialize;
use serde_json::{json, Value};
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, Duration, OffsetDateTime};

use ratex_core::{domain::pair, Rate, RateFilter, Timestamp, Warehouse};

use crate::cli::{DayArgs, Last24hArgs};
use crate::error::CliError;

const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Read-side projection: price always carries 18 fractional digits, the
/// timestamp its microsecond storage form.
#[derive(Debug, Serialize)]
struct RateDto {
    pair: String,
    price: String,
    created_at: String,
}

impl From<&Rate> for RateDto {
    fn from(rate: &Rate) -> Self {
        Self {
            pair: rate.pair().to_owned(),
            price: rate.price().to_fixed(),
            created_at: rate.created_at().to_storage(),
        }
    }
}

pub async fn last24h(args: &Last24hArgs, warehouse: &Warehouse) -> Result<Value, CliError> {
    let normalized = pair::normalize(&args.pair)?;
    let from = Timestamp::now() - Duration::hours(24);

    let filter = RateFilter::new()
        .with_pair(normalized)
        .with_created_from(from);

    render_rates(warehouse, &filter).await
}

pub async fn day(args: &DayArgs, warehouse: &Warehouse) -> Result<Value, CliError> {
    let normalized = pair::normalize(&args.pair)?;
    let date = parse_date(&args.date)?;

    let filter = RateFilter::new()
        .with_pair(normalized)
        .with_created_from(Timestamp::start_of_day(date))
        .with_created_to(Timestamp::end_of_day(date));

    render_rates(warehouse, &filter).await
}

async fn render_rates(warehouse: &Warehouse, filter: &RateFilter) -> Result<Value, CliError> {
    let rates = warehouse.find_many(filter).await?;
    let items = rates.iter().map(RateDto::from).collect::<Vec<_>>();

    Ok(json!({
        "data": {
            "items": items,
            "count": items.len(),
        }
    }))
}

fn parse_date(input: &str) -> Result<Date, CliError> {
    let date = Date::parse(input, DATE_FORMAT).map_err(|_| {
        CliError::InvalidOption(format!("--date must be YYYY-MM-DD, got '{input}'"))
    })?;

    if date > OffsetDateTime::now_utc().date() {
        return Err(CliError::InvalidOption(String::from(
            "--date cannot be in the future",
        )));
    }

    Ok(date)
}
