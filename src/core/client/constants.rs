//! Centralized constants for default endpoints, UA and sheet layout.

use std::time::Duration;

/// Minimal browser UA; Finviz blocks requests without one.
pub(crate) const USER_AGENT: &str = "Mozilla/5.0";

/// Finviz quote page (ticker goes in the `t` query parameter).
pub(crate) const DEFAULT_BASE_QUOTE: &str = "https://finviz.com/quote.ashx";

/// Class marker of the snapshot table holding the label/value pairs.
pub const SNAPSHOT_TABLE_CLASS: &str = "snapshot-table2";

/// Pause after every quote page attempt.
pub const DEFAULT_REQUEST_DELAY: Duration = Duration::from_secs(2);

/// Google Sheets API root (`v4/spreadsheets/...` is appended).
pub(crate) const DEFAULT_SHEETS_API: &str = "https://sheets.googleapis.com/";

/// OAuth token endpoint used when the key file does not name one.
pub(crate) const DEFAULT_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";

/// Scopes requested for the service account.
pub(crate) const SCOPES: [&str; 2] = [
    "https://spreadsheets.google.com/feeds",
    "https://www.googleapis.com/auth/drive",
];

/// Worksheet holding the input tickers in column A.
pub const TICKER_WORKSHEET: &str = "Ticker list";

/// Worksheet overwritten with the scraped table.
pub const FUNDAMENTALS_WORKSHEET: &str = "Fundamentals";
