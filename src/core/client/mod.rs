//! Public Finviz client surface + builder.
//! Defaults (UA, endpoints, delay) live in `constants`.

pub(crate) mod constants;

use crate::core::SyncError;
use constants::{DEFAULT_BASE_QUOTE, DEFAULT_REQUEST_DELAY, USER_AGENT};
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Thin wrapper that holds a configured HTTP client, the quote page base and the
/// pause applied after every quote page request.
#[derive(Debug, Clone)]
pub struct FinvizClient {
    http: Client,
    base_quote: Url,
    request_delay: Duration,
}

impl Default for FinvizClient {
    fn default() -> Self {
        Self::builder().build().expect("default client")
    }
}

impl FinvizClient {
    /// Create a new builder.
    pub fn builder() -> FinvizClientBuilder {
        FinvizClientBuilder::default()
    }

    /// The pause applied after each quote page attempt.
    pub fn request_delay(&self) -> Duration {
        self.request_delay
    }

    /* -------- internal getters used by other modules -------- */

    pub(crate) fn http(&self) -> &Client {
        &self.http
    }

    /// The quote page URL for `ticker`. The symbol is passed through untouched.
    pub(crate) fn quote_url(&self, ticker: &str) -> Url {
        let mut url = self.base_quote.clone();
        url.query_pairs_mut().append_pair("t", ticker);
        url
    }
}

/* ----------------------- Builder ----------------------- */

#[derive(Default)]
pub struct FinvizClientBuilder {
    user_agent: Option<String>,
    base_quote: Option<Url>,
    request_delay: Option<Duration>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
}

impl FinvizClientBuilder {
    /// Override the User-Agent. Default: `Mozilla/5.0`.
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Override the quote page (e.g., `https://finviz.com/quote.ashx`).
    #[must_use]
    pub fn base_quote(mut self, url: Url) -> Self {
        self.base_quote = Some(url);
        self
    }

    /// Override the pause after each quote page request. Default: 2 seconds.
    #[must_use]
    pub fn request_delay(mut self, dur: Duration) -> Self {
        self.request_delay = Some(dur);
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
    /// Returns an error if the default base URL fails to parse or the HTTP client
    /// cannot be constructed.
    pub fn build(self) -> Result<FinvizClient, SyncError> {
        let base_quote = match self.base_quote {
            Some(url) => url,
            None => Url::parse(DEFAULT_BASE_QUOTE)?,
        };

        let mut httpb = reqwest::Client::builder()
            .user_agent(self.user_agent.as_deref().unwrap_or(USER_AGENT));

        if let Some(t) = self.timeout {
            httpb = httpb.timeout(t);
        }
        if let Some(ct) = self.connect_timeout {
            httpb = httpb.connect_timeout(ct);
        }

        Ok(FinvizClient {
            http: httpb.build()?,
            base_quote,
            request_delay: self.request_delay.unwrap_or(DEFAULT_REQUEST_DELAY),
        })
    }
}
