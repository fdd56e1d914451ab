//! Live endpoint integration tests.
//!
//! These hit the published raw-content endpoints and are ignored by
//! default. Run them with:
//!
//! ```text
//! cargo test -p wql-core --features fetch -- --ignored
//! ```

#![cfg(feature = "fetch")]

use wql_core::fetch::DataClient;

#[tokio::test]
#[ignore]
async fn fetches_the_station_list() {
    let client = DataClient::new();
    let stations = client.stations().await.expect("station fetch failed");
    assert!(!stations.is_empty(), "expected at least one station");
    for station in &stations {
        assert!(station.latitude > 50.0 && station.latitude < 56.0);
        assert!(station.longitude > 8.0 && station.longitude < 13.0);
    }
}

#[tokio::test]
#[ignore]
async fn fetches_measurements_for_the_first_station() {
    let client = DataClient::new();
    let stations = client.stations().await.expect("station fetch failed");
    let first = stations.first().expect("no stations listed");
    let table = client
        .measurements(first.number)
        .await
        .expect("measurement fetch failed");
    assert!(!table.is_empty(), "expected measurement rows");
    assert!(
        !table.parameters().is_empty(),
        "expected parameter columns"
    );
}

#[tokio::test]
#[ignore]
async fn fetches_the_limit_table() {
    let client = DataClient::new();
    let limits = client.limits().await.expect("limit fetch failed");
    assert!(!limits.is_empty(), "expected limit rows");
    for entry in limits.entries() {
        assert!(entry.limit.is_finite());
    }
}

#[tokio::test]
#[ignore]
async fn repeat_fetches_are_served_from_the_cache() {
    let client = DataClient::new();
    let first = client.limits_csv().await.expect("limit fetch failed");
    let second = client.limits_csv().await.expect("cached fetch failed");
    assert_eq!(first, second);
}
