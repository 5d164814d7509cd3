//! Google Sheets v4 client: service-account auth plus the handful of value calls
//! a full-overwrite sync needs.
//!
//! Internals are split into:
//! - `auth`:        JWT signing and cached bearer tokens
//! - `spreadsheet`: `Spreadsheet`/`Worksheet` handles and their requests
//! - `wire`:        serde payloads

mod auth;
mod spreadsheet;
mod wire;

pub use spreadsheet::{Spreadsheet, Worksheet, column_letter, quote_sheet_title, spreadsheet_id};

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::{ServiceAccountKey, SpreadsheetConfig};
use crate::core::SyncError;
use crate::core::client::constants::{DEFAULT_SHEETS_API, DEFAULT_TOKEN_URL};
use auth::ServiceAccountAuth;

#[derive(Debug)]
enum Credentials {
    ServiceAccount(ServiceAccountAuth),
    Bearer(String),
}

/// Authenticated handle on the Sheets API. Cheap to clone; clones share the
/// cached access token.
#[derive(Debug, Clone)]
pub struct SheetsClient {
    http: Client,
    api_base: Url,
    credentials: Arc<Credentials>,
}

impl SheetsClient {
    /// Create a new builder.
    pub fn builder() -> SheetsClientBuilder {
        SheetsClientBuilder::default()
    }

    /// A client authenticated as the config's service account, default endpoints.
    ///
    /// # Errors
    ///
    /// Returns an error if a default URL fails to parse or the HTTP client
    /// cannot be constructed.
    pub fn from_config(config: &SpreadsheetConfig) -> Result<Self, SyncError> {
        Self::builder()
            .service_account(config.credential.clone())
            .build()
    }

    pub(crate) fn api_base(&self) -> &Url {
        &self.api_base
    }

    pub(crate) fn http(&self) -> &Client {
        &self.http
    }

    async fn bearer(&self) -> Result<String, SyncError> {
        match self.credentials.as_ref() {
            Credentials::Bearer(token) => Ok(token.clone()),
            Credentials::ServiceAccount(sa) => sa.token(&self.http).await,
        }
    }

    /// Sends an authenticated request and decodes a JSON body.
    /// Non-2xx responses become `SyncError::Api` with Google's error message.
    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        req: RequestBuilder,
    ) -> Result<T, SyncError> {
        let token = self.bearer().await?;
        let resp = req.bearer_auth(token).send().await?;
        let status = resp.status();
        let url = resp.url().clone();
        let body = resp.text().await?;

        if crate::core::net::debug_enabled() {
            eprintln!(
                "FINVIZ_DEBUG [sheets]: {url} -> {status} (body.len()={})",
                body.len()
            );
        }

        if !status.is_success() {
            let message = serde_json::from_str::<wire::ErrorEnvelope>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(SyncError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

/* ----------------------- Builder ----------------------- */

#[derive(Default)]
pub struct SheetsClientBuilder {
    api_base: Option<Url>,
    token_url: Option<Url>,
    service_account: Option<ServiceAccountKey>,
    bearer_token: Option<String>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
}

impl SheetsClientBuilder {
    /// Authenticate as a service account.
    #[must_use]
    pub fn service_account(mut self, key: ServiceAccountKey) -> Self {
        self.service_account = Some(key);
        self
    }

    /// Use an already-issued OAuth access token instead of a service account.
    /// Takes precedence over [`Self::service_account`].
    #[must_use]
    pub fn bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    /// Override the API root (e.g., `https://sheets.googleapis.com/`).
    #[must_use]
    pub fn api_base(mut self, url: Url) -> Self {
        self.api_base = Some(url);
        self
    }

    /// Override the OAuth token endpoint. Default: the key's `token_uri`, then
    /// `https://oauth2.googleapis.com/token`.
    #[must_use]
    pub fn token_url(mut self, url: Url) -> Self {
        self.token_url = Some(url);
        self
    }

    /// Set a global request timeout (overall). Default: none.
    #[must_use]
    pub fn timeout(mut self, dur: Duration) -> Self {
        self.timeout = Some(dur);
        self
    }

    /// Set a connect timeout. Default: none.
    #[must_use]
    pub fn connect_timeout(mut self, dur: Duration) -> Self {
        self.connect_timeout = Some(dur);
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// Returns `SyncError::Config` if no credential was given, or an error if a
    /// URL fails to parse or the HTTP client cannot be constructed.
    pub fn build(self) -> Result<SheetsClient, SyncError> {
        let api_base = match self.api_base {
            Some(url) => url,
            None => Url::parse(DEFAULT_SHEETS_API)?,
        };

        let credentials = match (self.bearer_token, self.service_account) {
            (Some(token), _) => Credentials::Bearer(token),
            (None, Some(key)) => {
                let token_url = match (self.token_url, key.token_uri.as_deref()) {
                    (Some(url), _) => url,
                    (None, Some(uri)) => Url::parse(uri)?,
                    (None, None) => Url::parse(DEFAULT_TOKEN_URL)?,
                };
                Credentials::ServiceAccount(ServiceAccountAuth::new(key, token_url))
            }
            (None, None) => {
                return Err(SyncError::Config(
                    "Sheets client needs a service account or a bearer token".into(),
                ));
            }
        };

        let mut httpb = reqwest::Client::builder();
        if let Some(t) = self.timeout {
            httpb = httpb.timeout(t);
        }
        if let Some(ct) = self.connect_timeout {
            httpb = httpb.connect_timeout(ct);
        }

        Ok(SheetsClient {
            http: httpb.build()?,
            api_base,
            credentials: Arc::new(credentials),
        })
    }
}
