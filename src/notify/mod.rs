// src/notify/mod.rs
//! Search-engine change notification (IndexNow).
//!
//! Submission is split in two: [`IndexTransport`] performs one POST and
//! reports a status code or a classified failure, and
//! [`indexnow::submit_urls`] batches the URL list and folds every outcome
//! into a single [`NotificationResult`].

pub mod indexnow;

use std::fmt;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde::{Deserialize, Serialize};

pub use indexnow::{submit_urls, MANIFEST_FILE};

pub const USER_AGENT: &str = concat!("guidepress-indexnow/", env!("CARGO_PKG_VERSION"));
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Outcome of one notification run. Built once and not mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NotificationResult {
    pub enabled: bool,
    pub submitted: bool,
    pub endpoint: String,
    pub host: String,
    pub key_location: String,
    pub batch_count: usize,
    pub submitted_url_count: usize,
    pub failed_batches: usize,
    pub last_status_code: u16,
    pub error: Option<String>,
}

/// Request body of one batch.
#[derive(Debug, Clone, Serialize)]
pub struct IndexNowPayload<'a> {
    pub host: &'a str,
    pub key: &'a str,
    #[serde(rename = "keyLocation")]
    pub key_location: &'a str,
    #[serde(rename = "urlList")]
    pub url_list: &'a [String],
}

/// Why a POST produced no status code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// Connection, DNS, TLS or timeout failure; carries the reason.
    Network(String),
    /// Anything else; carries a short kind name.
    Other(String),
}

impl TransportError {
    /// Error tag as recorded in [`NotificationResult::error`].
    pub fn tag(&self) -> String {
        match self {
            TransportError::Network(reason) => format!("url_error:{reason}"),
            TransportError::Other(kind) => format!("exception:{kind}"),
        }
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tag())
    }
}

impl std::error::Error for TransportError {}

/// One POST to the notification endpoint.
#[async_trait]
pub trait IndexTransport: Send + Sync {
    /// HTTP status code of the response, whatever it is.
    async fn post(
        &self,
        endpoint: &str,
        payload: &IndexNowPayload<'_>,
    ) -> std::result::Result<u16, TransportError>;
}

/// reqwest-backed transport with a fixed per-request timeout.
#[derive(Clone)]
pub struct ReqwestTransport {
    client: Client,
    timeout: Duration,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .context("building http client")?;
        Ok(Self {
            client,
            timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
        })
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout = Duration::from_secs(secs);
        self
    }
}

fn classify(e: &reqwest::Error) -> TransportError {
    if e.is_builder() {
        TransportError::Other("InvalidRequest".into())
    } else if e.is_body() || e.is_decode() {
        TransportError::Other("BodyError".into())
    } else if e.is_timeout() {
        TransportError::Network("timed out".into())
    } else {
        TransportError::Network(e.to_string())
    }
}

#[async_trait]
impl IndexTransport for ReqwestTransport {
    async fn post(
        &self,
        endpoint: &str,
        payload: &IndexNowPayload<'_>,
    ) -> std::result::Result<u16, TransportError> {
        let rsp = self
            .client
            .post(endpoint)
            .timeout(self.timeout)
            .header(CONTENT_TYPE, "application/json; charset=utf-8")
            .json(payload)
            .send()
            .await
            .map_err(|e| classify(&e))?;
        Ok(rsp.status().as_u16())
    }
}
