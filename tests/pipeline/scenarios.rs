use std::time::Duration;

use crate::common::{self, Msg, Recorder};
use finviz_sync::fundamentals::parse::parse_snapshot;
use finviz_sync::{FundamentalsTable, Pipeline, RunOutcome};

fn pipeline(server: &httpmock::MockServer) -> Pipeline {
    Pipeline::with_clients(
        common::sheet_config(),
        common::finviz_client(server, Duration::ZERO),
        common::sheets_client(server),
    )
    .unwrap()
}

fn expected(tickers: &[&str]) -> FundamentalsTable {
    tickers
        .iter()
        .map(|t| parse_snapshot(&common::fixture("quote_html", t, "html"), t).unwrap())
        .collect()
}

#[tokio::test]
async fn two_tickers_overwrite_the_destination() {
    let server = common::setup_server();
    common::mock_metadata(&server, &["Ticker list", "Fundamentals"]);
    common::mock_column(&server, "Ticker list", &["Ticker", "AAPL", "MSFT"]);
    let aapl = common::mock_quote(&server, "AAPL");
    let msft = common::mock_quote(&server, "MSFT");
    let want = expected(&["AAPL", "MSFT"]);
    let clear = common::mock_clear(&server, "Fundamentals");
    let update = common::mock_update(&server, "Fundamentals", &want.to_rows());

    let mut rec = Recorder::default();
    let outcome = pipeline(&server).run(&mut rec).await.unwrap();

    aapl.assert();
    msft.assert();
    clear.assert();
    update.assert();

    let table = match outcome {
        RunOutcome::Updated(table) => table,
        other => panic!("expected Updated, got {other:?}"),
    };
    assert_eq!(table, want);
    assert_eq!(table.column("Ticker"), [Some("AAPL"), Some("MSFT")]);
    // union of both pages, first-seen order
    assert_eq!(table.columns().len(), 11);
    assert_eq!(table.column("Short Float"), [None, Some("0.80%")]);
    assert_eq!(table.column("Employees"), [Some("161000"), None]);

    assert_eq!(
        rec.messages,
        [
            Msg::Status("Fetching tickers from Google Sheet...".into()),
            Msg::Status("Scraping AAPL...".into()),
            Msg::Status("Scraping MSFT...".into()),
            Msg::Status("Writing data to Google Sheet...".into()),
            Msg::Success("Fundamentals successfully updated!".into()),
            Msg::Preview(2),
        ]
    );
}

#[tokio::test]
async fn all_failures_leave_the_destination_untouched() {
    let server = common::setup_server();
    common::mock_metadata(&server, &["Ticker list", "Fundamentals"]);
    common::mock_column(&server, "Ticker list", &["Ticker", "BAD1"]);
    let bad = common::mock_quote_status(&server, "BAD1", 404);
    let clear = common::mock_clear(&server, "Fundamentals");
    let update = common::mock_any_update(&server);

    let mut rec = Recorder::default();
    let outcome = pipeline(&server).run(&mut rec).await.unwrap();

    assert_eq!(outcome, RunOutcome::NoData);
    bad.assert();
    clear.assert_calls(0);
    update.assert_calls(0);
    assert_eq!(rec.warnings(), ["Failed to fetch data for BAD1"]);
    assert_eq!(rec.errors(), ["No data scraped."]);
    assert!(!rec.has_status("Writing data to Google Sheet..."));
}

#[tokio::test]
async fn header_only_ticker_list_stops_before_scraping() {
    let server = common::setup_server();
    common::mock_metadata(&server, &["Ticker list", "Fundamentals"]);
    common::mock_column(&server, "Ticker list", &["Ticker"]);
    let any_quote = server.mock(|when, then| {
        when.method(httpmock::Method::GET).path("/quote.ashx");
        then.status(200);
    });
    let clear = common::mock_clear(&server, "Fundamentals");
    let update = common::mock_any_update(&server);

    let mut rec = Recorder::default();
    let outcome = pipeline(&server).run(&mut rec).await.unwrap();

    assert_eq!(outcome, RunOutcome::NoTickers);
    any_quote.assert_calls(0);
    clear.assert_calls(0);
    update.assert_calls(0);
    assert_eq!(rec.errors(), ["No tickers found in Google Sheet."]);
}

#[tokio::test]
async fn failed_ticker_in_the_middle_is_skipped() {
    let server = common::setup_server();
    common::mock_metadata(&server, &["Ticker list", "Fundamentals"]);
    common::mock_column(&server, "Ticker list", &["Ticker", "AAPL", "BAD1", "MSFT"]);
    common::mock_quote(&server, "AAPL");
    common::mock_quote_status(&server, "BAD1", 404);
    common::mock_quote(&server, "MSFT");
    let want = expected(&["AAPL", "MSFT"]);
    let update = common::mock_update(&server, "Fundamentals", &want.to_rows());
    common::mock_clear(&server, "Fundamentals");

    let mut rec = Recorder::default();
    let outcome = pipeline(&server).run(&mut rec).await.unwrap();

    update.assert();
    assert_eq!(outcome, RunOutcome::Updated(want));
    assert_eq!(rec.warnings(), ["Failed to fetch data for BAD1"]);
    assert!(rec.has_status("Scraping BAD1..."));
    assert!(rec.errors().is_empty());
}

#[tokio::test]
async fn missing_ticker_worksheet_counts_as_no_tickers() {
    let server = common::setup_server();
    common::mock_metadata(&server, &["Sheet1", "Fundamentals"]);
    let update = common::mock_any_update(&server);

    let mut rec = Recorder::default();
    let outcome = pipeline(&server).run(&mut rec).await.unwrap();

    assert_eq!(outcome, RunOutcome::NoTickers);
    update.assert_calls(0);
    assert_eq!(rec.errors(), ["No tickers found in Google Sheet."]);
}

#[tokio::test]
async fn repeated_runs_write_identical_contents() {
    let server = common::setup_server();
    common::mock_metadata(&server, &["Ticker list", "Fundamentals"]);
    common::mock_column(&server, "Ticker list", &["Ticker", "MSFT", "AAPL"]);
    common::mock_quote(&server, "AAPL");
    common::mock_quote(&server, "MSFT");
    let want = expected(&["MSFT", "AAPL"]);
    let clear = common::mock_clear(&server, "Fundamentals");
    let update = common::mock_update(&server, "Fundamentals", &want.to_rows());

    let pipeline = pipeline(&server);
    let first = pipeline.run(&mut Recorder::default()).await.unwrap();
    let second = pipeline.run(&mut Recorder::default()).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(first, RunOutcome::Updated(want));
    clear.assert_calls(2);
    update.assert_calls(2);
}

#[tokio::test]
async fn worksheet_titles_come_from_config() {
    let server = common::setup_server();
    common::mock_metadata(&server, &["Symbols", "Output"]);
    common::mock_column(&server, "Symbols", &["Ticker", "AAPL"]);
    common::mock_quote(&server, "AAPL");
    let want = expected(&["AAPL"]);
    let clear = common::mock_clear(&server, "Output");
    let update = common::mock_update(&server, "Output", &want.to_rows());

    let config = common::sheet_config()
        .ticker_worksheet("Symbols")
        .fundamentals_worksheet("Output");
    let pipeline = Pipeline::with_clients(
        config,
        common::finviz_client(&server, Duration::ZERO),
        common::sheets_client(&server),
    )
    .unwrap();

    let outcome = pipeline.run(&mut Recorder::default()).await.unwrap();

    assert_eq!(outcome, RunOutcome::Updated(want));
    clear.assert();
    update.assert();
}
