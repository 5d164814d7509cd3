//! Finviz snapshot fundamentals: fetch one ticker, or a whole list in order.
//!
//! Internals are split into:
//! - `scrape`: the quote page request
//! - `parse`:  pure table-to-record extraction, usable on stored HTML

mod model;
pub mod parse;
mod scrape;

pub use model::FundamentalRecord;

use crate::report::Reporter;
use crate::table::FundamentalsTable;
use crate::{FinvizClient, SyncError};

/// Fetches and parses the snapshot table for a single ticker.
///
/// The ticker is sent as-is; the returned record's `"Ticker"` field is exactly
/// `ticker`. No delay is applied here.
///
/// # Errors
///
/// Returns `SyncError::Status` for any non-200 response, `SyncError::Http` for
/// transport failures and `SyncError::MissingTable` when the page has no
/// snapshot table.
#[cfg_attr(feature = "tracing", tracing::instrument(skip(client), err))]
pub async fn fetch_fundamentals(
    client: &FinvizClient,
    ticker: &str,
) -> Result<FundamentalRecord, SyncError> {
    let body = scrape::fetch_quote_page(client, ticker).await?;
    parse::parse_snapshot(&body, ticker)
}

/// Fetches every ticker one after another and collects the successes.
///
/// Each attempt is announced with `Scraping {ticker}...`. A failed ticker is
/// reported as a warning and left out of the table. The client's request delay is
/// slept after every attempt, failed or not, so `n` tickers take at least
/// `n * delay`.
pub async fn fetch_all<I, R>(client: &FinvizClient, tickers: I, reporter: &mut R) -> FundamentalsTable
where
    I: IntoIterator,
    I::Item: AsRef<str>,
    R: Reporter + ?Sized,
{
    let mut table = FundamentalsTable::new();
    for ticker in tickers {
        let ticker = ticker.as_ref();
        reporter.status(&format!("Scraping {ticker}..."));

        match fetch_fundamentals(client, ticker).await {
            Ok(record) => table.push(record),
            Err(e) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(ticker, error = %e, "skipping ticker");
                if crate::core::net::debug_enabled() {
                    eprintln!("FINVIZ_DEBUG [fetch_all]: {ticker} failed: {e}");
                }
                let msg = match e {
                    SyncError::MissingTable { .. } => {
                        format!("Fundamentals table not found for {ticker}")
                    }
                    _ => format!("Failed to fetch data for {ticker}"),
                };
                reporter.warning(&msg);
            }
        }

        tokio::time::sleep(client.request_delay()).await;
    }
    table
}
