//! Service-account bearer tokens for the Sheets API.
//!
//! A signed RS256 JWT is exchanged at the token endpoint for an access token,
//! which is cached until shortly before it expires.

use std::time::{Duration, Instant};

use base64::Engine;
use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};
use reqwest::Client;
use ring::rand::SystemRandom;
use ring::signature::{self, RsaKeyPair};
use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, RwLock};
use url::Url;

use crate::config::ServiceAccountKey;
use crate::core::SyncError;
use crate::core::client::constants::SCOPES;

const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_LIFETIME_SECS: i64 = 3600;
/// Tokens this close to expiry are treated as expired.
const EXPIRY_MARGIN: Duration = Duration::from_secs(60);

#[derive(Debug)]
struct AccessToken {
    value: String,
    expires_at: Instant,
}

#[derive(Debug)]
pub(crate) struct ServiceAccountAuth {
    key: ServiceAccountKey,
    token_url: Url,
    state: RwLock<Option<AccessToken>>,
    fetch_lock: Mutex<()>,
}

#[derive(Serialize)]
struct Header<'a> {
    alg: &'a str,
    typ: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    kid: Option<&'a str>,
}

#[derive(Serialize)]
struct Claims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<u64>,
}

impl ServiceAccountAuth {
    pub(crate) fn new(key: ServiceAccountKey, token_url: Url) -> Self {
        Self {
            key,
            token_url,
            state: RwLock::new(None),
            fetch_lock: Mutex::new(()),
        }
    }

    /// A valid access token, fetching a new one if none is cached or it is about to expire.
    pub(crate) async fn token(&self, http: &Client) -> Result<String, SyncError> {
        // Fast path: read lock only.
        if let Some(t) = self.cached().await {
            return Ok(t);
        }

        let _guard = self.fetch_lock.lock().await;

        // Another caller may have refreshed while we waited.
        if let Some(t) = self.cached().await {
            return Ok(t);
        }

        let fresh = self.fetch(http).await?;
        let value = fresh.value.clone();
        *self.state.write().await = Some(fresh);
        Ok(value)
    }

    async fn cached(&self) -> Option<String> {
        let state = self.state.read().await;
        state
            .as_ref()
            .filter(|t| Instant::now() + EXPIRY_MARGIN < t.expires_at)
            .map(|t| t.value.clone())
    }

    async fn fetch(&self, http: &Client) -> Result<AccessToken, SyncError> {
        let assertion = sign_assertion(
            &self.key,
            &SCOPES.join(" "),
            self.token_url.as_str(),
            chrono::Utc::now().timestamp(),
        )?;

        let resp = http
            .post(self.token_url.clone())
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(SyncError::Auth(format!(
                "token endpoint returned {status}: {body}"
            )));
        }

        let token: TokenResponse = resp.json().await?;
        if token.access_token.is_empty() {
            return Err(SyncError::Auth("token endpoint returned an empty token".into()));
        }

        Ok(AccessToken {
            value: token.access_token,
            expires_at: Instant::now() + token_lifetime(token.expires_in),
        })
    }
}

/// How long to trust a token. Server-reported lifetimes are capped at one hour.
fn token_lifetime(expires_in: Option<u64>) -> Duration {
    let max = ASSERTION_LIFETIME_SECS as u64;
    Duration::from_secs(expires_in.unwrap_or(max).min(max))
}

/// Builds the signed JWT presented to the token endpoint.
pub(crate) fn sign_assertion(
    key: &ServiceAccountKey,
    scope: &str,
    audience: &str,
    issued_at: i64,
) -> Result<String, SyncError> {
    let header = Header {
        alg: "RS256",
        typ: "JWT",
        kid: key.private_key_id.as_deref(),
    };
    let claims = Claims {
        iss: &key.client_email,
        scope,
        aud: audience,
        iat: issued_at,
        exp: issued_at + ASSERTION_LIFETIME_SECS,
    };

    let signing_input = format!(
        "{}.{}",
        URL_SAFE_NO_PAD.encode(serde_json::to_vec(&header)?),
        URL_SAFE_NO_PAD.encode(serde_json::to_vec(&claims)?)
    );

    let der = pem_to_der(&key.private_key)?;
    let pair = RsaKeyPair::from_pkcs8(&der)
        .map_err(|e| SyncError::Auth(format!("private key rejected: {e}")))?;

    let mut sig = vec![0u8; pair.public().modulus_len()];
    pair.sign(
        &signature::RSA_PKCS1_SHA256,
        &SystemRandom::new(),
        signing_input.as_bytes(),
        &mut sig,
    )
    .map_err(|_| SyncError::Auth("RS256 signing failed".into()))?;

    Ok(format!("{signing_input}.{}", URL_SAFE_NO_PAD.encode(sig)))
}

fn pem_to_der(pem: &str) -> Result<Vec<u8>, SyncError> {
    let body: String = pem
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with("-----"))
        .collect();
    if body.is_empty() {
        return Err(SyncError::Auth("private key is empty".into()));
    }
    STANDARD
        .decode(body)
        .map_err(|e| SyncError::Auth(format!("private key is not valid base64: {e}")))
}
