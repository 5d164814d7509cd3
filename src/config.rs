//! Explicit configuration for the spreadsheet side of a run.
//!
//! Nothing below the binary reads the environment: the binary builds a
//! [`SpreadsheetConfig`] once via [`SpreadsheetConfig::from_env`] and hands it to
//! the pipeline.

use std::fmt;
use std::path::Path;

use serde::Deserialize;

use crate::core::{FUNDAMENTALS_WORKSHEET, SyncError, TICKER_WORKSHEET};

/// Env var holding the spreadsheet URL.
pub const ENV_SHEET_URL: &str = "GOOGLE_SHEET_URL";
/// Env var holding the service-account key JSON itself.
pub const ENV_SERVICE_ACCOUNT: &str = "GCP_SERVICE_ACCOUNT";
/// Env var holding a path to the service-account key JSON.
pub const ENV_SERVICE_ACCOUNT_FILE: &str = "GCP_SERVICE_ACCOUNT_FILE";

/// The fields of a Google service-account key file that signing needs.
#[derive(Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    /// PEM-encoded PKCS#8 RSA key.
    pub private_key: String,
    #[serde(default)]
    pub private_key_id: Option<String>,
    #[serde(default)]
    pub token_uri: Option<String>,
    #[serde(default)]
    pub project_id: Option<String>,
}

impl fmt::Debug for ServiceAccountKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceAccountKey")
            .field("client_email", &self.client_email)
            .field("private_key", &"<redacted>")
            .field("private_key_id", &self.private_key_id)
            .field("token_uri", &self.token_uri)
            .field("project_id", &self.project_id)
            .finish()
    }
}

impl ServiceAccountKey {
    /// Parses a key from its JSON text.
    ///
    /// # Errors
    ///
    /// Returns `SyncError::Config` if the JSON is malformed or lacks
    /// `client_email`/`private_key`.
    pub fn from_json(json: &str) -> Result<Self, SyncError> {
        serde_json::from_str(json)
            .map_err(|e| SyncError::Config(format!("service account key: {e}")))
    }

    /// Reads and parses a key file.
    ///
    /// # Errors
    ///
    /// Returns `SyncError::Config` if the file cannot be read or parsed.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SyncError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| SyncError::Config(format!("reading {}: {e}", path.display())))?;
        Self::from_json(&json)
    }
}

/// Where the tickers come from and where the table goes, plus the identity used
/// to reach both.
#[derive(Debug, Clone)]
pub struct SpreadsheetConfig {
    /// Full spreadsheet URL (`https://docs.google.com/spreadsheets/d/<id>/...`).
    pub url: String,
    pub credential: ServiceAccountKey,
    /// Source worksheet; tickers in column A below a header row.
    pub ticker_worksheet: String,
    /// Destination worksheet; overwritten on every successful run.
    pub fundamentals_worksheet: String,
}

impl SpreadsheetConfig {
    /// Config with the standard worksheet names.
    pub fn new(url: impl Into<String>, credential: ServiceAccountKey) -> Self {
        Self {
            url: url.into(),
            credential,
            ticker_worksheet: TICKER_WORKSHEET.to_string(),
            fundamentals_worksheet: FUNDAMENTALS_WORKSHEET.to_string(),
        }
    }

    #[must_use]
    pub fn ticker_worksheet(mut self, title: impl Into<String>) -> Self {
        self.ticker_worksheet = title.into();
        self
    }

    #[must_use]
    pub fn fundamentals_worksheet(mut self, title: impl Into<String>) -> Self {
        self.fundamentals_worksheet = title.into();
        self
    }

    /// Loads the config from the process environment.
    ///
    /// Reads `GOOGLE_SHEET_URL` and either `GCP_SERVICE_ACCOUNT` (key JSON) or
    /// `GCP_SERVICE_ACCOUNT_FILE` (path to it); the inline JSON wins when both are set.
    ///
    /// # Errors
    ///
    /// Returns `SyncError::Config` if a variable is missing or the key is invalid.
    pub fn from_env() -> Result<Self, SyncError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self, SyncError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = lookup(ENV_SHEET_URL)
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| SyncError::Config(format!("{ENV_SHEET_URL} is not set")))?;

        let credential = match (lookup(ENV_SERVICE_ACCOUNT), lookup(ENV_SERVICE_ACCOUNT_FILE)) {
            (Some(json), _) => ServiceAccountKey::from_json(&json)?,
            (None, Some(path)) => ServiceAccountKey::from_file(path)?,
            (None, None) => {
                return Err(SyncError::Config(format!(
                    "set {ENV_SERVICE_ACCOUNT} or {ENV_SERVICE_ACCOUNT_FILE}"
                )));
            }
        };

        Ok(Self::new(url, credential))
    }
}
