//! Fetch the Finviz quote page for one ticker.

use reqwest::StatusCode;

use crate::core::{FinvizClient, SyncError, net};

/// GETs the quote page and returns its body. Anything but `200 OK` is an error.
pub(crate) async fn fetch_quote_page(client: &FinvizClient, ticker: &str) -> Result<String, SyncError> {
    let url = client.quote_url(ticker);
    let resp = client.http().get(url.clone()).send().await?;
    let status = resp.status();

    if net::debug_enabled() {
        eprintln!("FINVIZ_DEBUG [fetch_quote_page]: GET {url} -> {status}");
    }

    if status != StatusCode::OK {
        return Err(SyncError::Status {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }

    let body = net::get_text(resp, "quote_html", ticker, "html").await?;
    if net::debug_enabled() {
        eprintln!(
            "FINVIZ_DEBUG [fetch_quote_page]: {ticker} body.len()={}",
            body.len()
        );
    }
    Ok(body)
}
