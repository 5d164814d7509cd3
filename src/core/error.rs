use thiserror::Error;

/// The primary error type for all fallible operations in this crate.
#[derive(Debug, Error)]
pub enum SyncError {
    /// An error occurred during an HTTP request.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A provided URL could not be parsed.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// A JSON payload could not be encoded or decoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The quote page returned something other than HTTP 200.
    #[error("Unexpected response status: {status} at {url}")]
    Status {
        /// The HTTP status code.
        status: u16,
        /// The URL that returned the error.
        url: String,
    },

    /// The quote page loaded but carried no fundamentals table.
    #[error("fundamentals table not found for {ticker}")]
    MissingTable {
        /// The ticker whose page was missing the table.
        ticker: String,
    },

    /// The Sheets API rejected a request.
    #[error("Sheets API error ({status}): {message}")]
    Api {
        /// The HTTP status code.
        status: u16,
        /// The error message from the response body, or the raw body.
        message: String,
    },

    /// The spreadsheet has no worksheet with the requested title.
    #[error("worksheet not found: {0}")]
    WorksheetNotFound(String),

    /// The spreadsheet URL does not contain a `/spreadsheets/d/<id>` segment.
    #[error("not a spreadsheet URL: {0}")]
    InvalidSpreadsheetUrl(String),

    /// Service-account signing or the token exchange failed.
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Required configuration is missing or malformed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The data received was in an unexpected format or was missing a required field.
    #[error("Data format unexpected or missing field: {0}")]
    Data(String),
}
