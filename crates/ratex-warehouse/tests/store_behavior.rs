//! Behavior tests for the rate store: exact-decimal round-trips, filter
//! composition, ordering, and transactional saves.

use time::macros::datetime;

use ratex_warehouse::{Price, Rate, RateFilter, Timestamp, Warehouse, WarehouseConfig};

fn rate(pair: &str, price: &str, created_at: Timestamp) -> Rate {
    Rate::new(pair, Price::parse(price).expect("test price is numeric"), created_at)
}

fn at(odt: time::OffsetDateTime) -> Timestamp {
    Timestamp::from_offset_datetime(odt)
}

#[tokio::test]
async fn prices_round_trip_with_full_precision() {
    let warehouse = Warehouse::open_in_memory().await.expect("open store");
    let created_at = Timestamp::now();

    let originals = vec![
        rate("BTCEUR", "50000.123456789123456789", created_at),
        rate("BTCEUR", "0.000000000000000001", created_at),
        rate("BTCEUR", "99999999999999999999.999999999999999999", created_at),
    ];
    warehouse.save(&originals).await.expect("save");

    let found = warehouse
        .find_many(&RateFilter::new().with_pair("BTCEUR"))
        .await
        .expect("query");

    assert_eq!(found.len(), 3);
    let mut formatted = found
        .iter()
        .map(|r| r.price().to_fixed())
        .collect::<Vec<_>>();
    formatted.sort();
    assert_eq!(
        formatted,
        vec![
            "0.000000000000000001",
            "50000.123456789123456789",
            "99999999999999999999.999999999999999999",
        ]
    );
}

#[tokio::test]
async fn results_are_sorted_by_created_at_regardless_of_insert_order() {
    let warehouse = Warehouse::open_in_memory().await.expect("open store");

    let rates = vec![
        rate("BTCEUR", "3", at(datetime!(2026-08-23 12:00:00 UTC))),
        rate("BTCEUR", "1", at(datetime!(2026-08-23 08:00:00 UTC))),
        rate("BTCEUR", "2", at(datetime!(2026-08-23 10:00:00 UTC))),
    ];
    warehouse.save(&rates).await.expect("save");

    let found = warehouse
        .find_many(&RateFilter::new())
        .await
        .expect("query");

    let timestamps = found.iter().map(|r| r.created_at()).collect::<Vec<_>>();
    let mut sorted = timestamps.clone();
    sorted.sort();
    assert_eq!(timestamps, sorted);
    assert_eq!(
        found.iter().map(|r| r.price().to_fixed()).collect::<Vec<_>>(),
        vec![
            "1.000000000000000000",
            "2.000000000000000000",
            "3.000000000000000000",
        ]
    );
}

#[tokio::test]
async fn empty_filter_returns_all_rows_and_no_match_returns_empty() {
    let warehouse = Warehouse::open_in_memory().await.expect("open store");
    let created_at = Timestamp::now();

    warehouse
        .save(&[
            rate("BTCEUR", "1", created_at),
            rate("ETHEUR", "2", created_at),
        ])
        .await
        .expect("save");

    let all = warehouse
        .find_many(&RateFilter::new())
        .await
        .expect("query");
    assert_eq!(all.len(), 2);

    let none = warehouse
        .find_many(&RateFilter::new().with_pair("ADAEUR"))
        .await
        .expect("query");
    assert!(none.is_empty());
}

#[tokio::test]
async fn filters_combine_with_and_semantics() {
    let warehouse = Warehouse::open_in_memory().await.expect("open store");

    let morning = at(datetime!(2026-08-23 08:00:00 UTC));
    let evening = at(datetime!(2026-08-23 20:00:00 UTC));
    let rates = vec![
        rate("BTCEUR", "50000", morning),
        rate("BTCEUR", "51000", evening),
        rate("ETHEUR", "50500", morning),
        rate("BTCEUR", "49000", evening),
    ];
    warehouse.save(&rates).await.expect("save");

    // pair AND price range AND time range
    let filter = RateFilter::new()
        .with_pair("BTCEUR")
        .with_price_from(Price::parse("49500").expect("numeric"))
        .with_price_to(Price::parse("52000").expect("numeric"))
        .with_created_from(at(datetime!(2026-08-23 12:00:00 UTC)));
    let found = warehouse.find_many(&filter).await.expect("query");
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].price().to_fixed(), "51000.000000000000000000");

    // each bound is inclusive
    let inclusive = RateFilter::new()
        .with_price_from(Price::parse("49000").expect("numeric"))
        .with_price_to(Price::parse("49000").expect("numeric"));
    let found = warehouse.find_many(&inclusive).await.expect("query");
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].pair(), "BTCEUR");
}

#[tokio::test]
async fn id_filter_returns_exactly_one_row() {
    let warehouse = Warehouse::open_in_memory().await.expect("open store");
    let created_at = Timestamp::now();

    let rates = vec![
        rate("BTCEUR", "1", created_at),
        rate("BTCEUR", "2", created_at),
    ];
    warehouse.save(&rates).await.expect("save");

    let found = warehouse
        .find_many(&RateFilter::new().with_id(rates[1].id()))
        .await
        .expect("query");
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id(), rates[1].id());
}

#[tokio::test]
async fn price_range_filtering_is_exact_at_eighteen_digits() {
    let warehouse = Warehouse::open_in_memory().await.expect("open store");
    let created_at = Timestamp::now();

    warehouse
        .save(&[
            rate("BTCEUR", "50000.123456789123456788", created_at),
            rate("BTCEUR", "50000.123456789123456789", created_at),
        ])
        .await
        .expect("save");

    let found = warehouse
        .find_many(
            &RateFilter::new()
                .with_price_from(Price::parse("50000.123456789123456789").expect("numeric")),
        )
        .await
        .expect("query");

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].price().to_fixed(), "50000.123456789123456789");
}

#[tokio::test]
async fn save_is_all_or_nothing() {
    let warehouse = Warehouse::open_in_memory().await.expect("open store");
    let created_at = Timestamp::now();

    let good = rate("BTCEUR", "1", created_at);
    // Same primary key twice in one batch: the second insert violates the
    // constraint and the whole save must roll back.
    let batch = vec![good.clone(), good.clone()];
    warehouse.save(&batch).await.expect_err("duplicate id must fail");

    let remaining = warehouse
        .find_many(&RateFilter::new())
        .await
        .expect("query");
    assert!(remaining.is_empty(), "failed save must not commit partially");
    assert_eq!(warehouse.tracked_count(), 0);
}

#[tokio::test]
async fn clear_releases_the_identity_map_but_keeps_rows() {
    let warehouse = Warehouse::open_in_memory().await.expect("open store");
    let created_at = Timestamp::now();

    warehouse
        .save(&[rate("BTCEUR", "1", created_at)])
        .await
        .expect("save");
    assert_eq!(warehouse.tracked_count(), 1);

    warehouse.clear();
    assert_eq!(warehouse.tracked_count(), 0);

    let rows = warehouse
        .find_many(&RateFilter::new())
        .await
        .expect("query");
    assert_eq!(rows.len(), 1);
}

#[tokio::test]
async fn file_backed_store_persists_across_reopen() {
    let temp = tempfile::tempdir().expect("tempdir");
    let url = format!("sqlite://{}/rates.db", temp.path().display());

    let warehouse = Warehouse::open(WarehouseConfig::new(&url))
        .await
        .expect("open store");
    warehouse
        .save(&[rate("BTCEUR", "50000.123456789123456789", Timestamp::now())])
        .await
        .expect("save");
    drop(warehouse);

    let reopened = Warehouse::open(WarehouseConfig::new(&url))
        .await
        .expect("reopen store");
    let rows = reopened
        .find_many(&RateFilter::new().with_pair("BTCEUR"))
        .await
        .expect("query");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].price().to_fixed(), "50000.123456789123456789");
}
