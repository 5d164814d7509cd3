use httpmock::Method::GET;
use serde_json::json;

use crate::common::{self, SHEET_ID};
use finviz_sync::{Spreadsheet, SyncError, read_tickers};

#[tokio::test]
async fn column_values_include_the_header() {
    let server = common::setup_server();
    common::mock_metadata(&server, &["Ticker list", "Fundamentals"]);
    let col = common::mock_column(&server, "Ticker list", &["Symbol", "AAPL", "MSFT"]);

    let client = common::sheets_client(&server);
    let ws = Spreadsheet::open_by_key(&client, SHEET_ID)
        .worksheet("Ticker list")
        .await
        .unwrap();

    assert_eq!(ws.col_values(1).await.unwrap(), ["Symbol", "AAPL", "MSFT"]);
    col.assert();
}

#[tokio::test]
async fn tickers_skip_the_header_and_keep_order() {
    let server = common::setup_server();
    common::mock_metadata(&server, &["Ticker list"]);
    common::mock_column(&server, "Ticker list", &["Ticker", "MSFT", "", "brk.b", "AAPL"]);

    let client = common::sheets_client(&server);
    let ws = Spreadsheet::open_by_key(&client, SHEET_ID)
        .worksheet("Ticker list")
        .await
        .unwrap();

    // values are passed through as the sheet displays them
    assert_eq!(read_tickers(&ws).await.unwrap(), ["MSFT", "", "brk.b", "AAPL"]);
}

#[tokio::test]
async fn header_only_and_empty_columns_have_no_tickers() {
    let server = common::setup_server();
    common::mock_metadata(&server, &["Ticker list", "Empty"]);
    common::mock_column(&server, "Ticker list", &["Ticker"]);
    common::mock_column(&server, "Empty", &[]);

    let client = common::sheets_client(&server);
    let sheet = Spreadsheet::open_by_key(&client, SHEET_ID);

    let header_only = sheet.worksheet("Ticker list").await.unwrap();
    assert!(read_tickers(&header_only).await.unwrap().is_empty());

    let empty = sheet.worksheet("Empty").await.unwrap();
    assert!(empty.col_values(1).await.unwrap().is_empty());
    assert!(read_tickers(&empty).await.unwrap().is_empty());
}

#[tokio::test]
async fn missing_worksheet_is_reported_by_title() {
    let server = common::setup_server();
    common::mock_metadata(&server, &["Sheet1"]);

    let client = common::sheets_client(&server);
    let err = Spreadsheet::open_by_key(&client, SHEET_ID)
        .worksheet("Ticker list")
        .await
        .unwrap_err();

    assert!(matches!(&err, SyncError::WorksheetNotFound(t) if t == "Ticker list"));
    assert_eq!(err.to_string(), "worksheet not found: Ticker list");
}

#[tokio::test]
async fn api_errors_carry_googles_message() {
    let server = common::setup_server();
    server.mock(|when, then| {
        when.method(GET).path(format!("/v4/spreadsheets/{SHEET_ID}"));
        then.status(403)
            .header("content-type", "application/json")
            .json_body(json!({
                "error": {
                    "code": 403,
                    "message": "The caller does not have permission",
                    "status": "PERMISSION_DENIED"
                }
            }));
    });

    let client = common::sheets_client(&server);
    let err = Spreadsheet::open_by_key(&client, SHEET_ID)
        .worksheet("Ticker list")
        .await
        .unwrap_err();

    match err {
        SyncError::Api { status, message } => {
            assert_eq!(status, 403);
            assert_eq!(message, "The caller does not have permission");
        }
        other => panic!("expected Api, got {other:?}"),
    }
}

#[tokio::test]
async fn non_json_error_body_is_kept_verbatim() {
    let server = common::setup_server();
    server.mock(|when, then| {
        when.method(GET).path(format!("/v4/spreadsheets/{SHEET_ID}"));
        then.status(502).body("Bad Gateway");
    });

    let client = common::sheets_client(&server);
    let err = Spreadsheet::open_by_key(&client, SHEET_ID)
        .worksheet("Ticker list")
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        SyncError::Api { status: 502, ref message } if message == "Bad Gateway"
    ));
}

#[test]
fn open_by_url_extracts_the_id() {
    let client = finviz_sync::SheetsClient::builder()
        .bearer_token(common::TOKEN)
        .build()
        .unwrap();
    let sheet = Spreadsheet::open_by_url(
        &client,
        &format!("https://docs.google.com/spreadsheets/d/{SHEET_ID}/edit#gid=0"),
    )
    .unwrap();
    assert_eq!(sheet.id(), SHEET_ID);

    assert!(matches!(
        Spreadsheet::open_by_url(&client, "https://example.com/nothing"),
        Err(SyncError::InvalidSpreadsheetUrl(_))
    ));
}
