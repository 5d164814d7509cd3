use std::time::Duration;

use crate::common::{self, Recorder};
use finviz_sync::{SyncError, fetch_all, fetch_fundamentals};

#[tokio::test]
async fn non_200_maps_to_status_error() {
    let server = common::setup_server();
    let mock = common::mock_quote_status(&server, "BAD1", 404);
    let client = common::finviz_client(&server, Duration::ZERO);

    let err = fetch_fundamentals(&client, "BAD1").await.unwrap_err();
    mock.assert();

    match err {
        SyncError::Status { status, url } => {
            assert_eq!(status, 404);
            assert!(url.contains("/quote.ashx?t=BAD1"));
        }
        other => panic!("expected Status, got {other:?}"),
    }
}

#[tokio::test]
async fn no_content_is_a_failure() {
    let server = common::setup_server();
    let mock = common::mock_quote_status(&server, "ODD", 204);
    let client = common::finviz_client(&server, Duration::ZERO);

    let err = fetch_fundamentals(&client, "ODD").await.unwrap_err();
    mock.assert();
    assert!(matches!(err, SyncError::Status { status: 204, .. }));
}

#[tokio::test]
async fn page_without_table_maps_to_missing_table() {
    let server = common::setup_server();
    let mock = common::mock_quote(&server, "NOTABLE");
    let client = common::finviz_client(&server, Duration::ZERO);

    let err = fetch_fundamentals(&client, "NOTABLE").await.unwrap_err();
    mock.assert();
    assert!(matches!(err, SyncError::MissingTable { ticker } if ticker == "NOTABLE"));
}

#[tokio::test]
async fn failed_tickers_are_skipped_with_warnings() {
    let server = common::setup_server();
    let aapl = common::mock_quote(&server, "AAPL");
    let bad = common::mock_quote_status(&server, "BAD1", 500);
    let notable = common::mock_quote(&server, "NOTABLE");
    let msft = common::mock_quote(&server, "MSFT");
    let client = common::finviz_client(&server, Duration::ZERO);
    let mut rec = Recorder::default();

    let table = fetch_all(&client, ["AAPL", "BAD1", "NOTABLE", "MSFT"], &mut rec).await;

    aapl.assert();
    bad.assert();
    notable.assert();
    msft.assert();
    assert_eq!(table.column("Ticker"), [Some("AAPL"), Some("MSFT")]);
    assert_eq!(
        rec.warnings(),
        [
            "Failed to fetch data for BAD1",
            "Fundamentals table not found for NOTABLE"
        ]
    );
}

#[tokio::test]
async fn unreachable_host_is_a_per_ticker_failure() {
    // Nothing listens on port 9 (discard) in the test environment.
    let client = finviz_sync::FinvizClient::builder()
        .base_quote(url::Url::parse("http://127.0.0.1:9/quote.ashx").unwrap())
        .request_delay(Duration::ZERO)
        .connect_timeout(Duration::from_secs(2))
        .build()
        .unwrap();
    let mut rec = Recorder::default();

    let table = fetch_all(&client, ["AAPL"], &mut rec).await;

    assert!(table.is_empty());
    assert_eq!(rec.warnings(), ["Failed to fetch data for AAPL"]);
}
