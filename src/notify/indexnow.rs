// src/notify/indexnow.rs
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use metrics::counter;
use tracing::{info, warn};

use super::{IndexNowPayload, IndexTransport, NotificationResult};
use crate::config::site::{SiteConfig, DEFAULT_INDEXNOW_ENDPOINT};
use crate::paginate::chunked;
use crate::telemetry::{ensure_metrics_described, INDEXNOW_BATCHES_FAILED, INDEXNOW_BATCHES_OK};

pub const MANIFEST_FILE: &str = "indexnow-urls.txt";

const ACCEPTED: [u16; 2] = [200, 202];

/// Submit `urls` in batches of `site.indexnow_batch_size`.
///
/// Every batch is attempted exactly once, in order, even after failures.
/// The first error of the run is kept; `submitted` holds only when at least
/// one URL went through and no batch failed.
pub async fn submit_urls(
    site: &SiteConfig,
    urls: &[String],
    transport: &dyn IndexTransport,
) -> NotificationResult {
    ensure_metrics_described();

    let key = site.indexnow_key.trim();
    let mut result = NotificationResult {
        enabled: !key.is_empty(),
        endpoint: site.indexnow_endpoint.clone(),
        host: site.host(),
        ..NotificationResult::default()
    };
    if key.is_empty() {
        result.error = Some("indexnow_key_missing".into());
        return result;
    }

    let url_list: Vec<String> = urls
        .iter()
        .map(|u| u.trim())
        .filter(|u| !u.is_empty())
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    if url_list.is_empty() {
        result.error = Some("url_list_empty".into());
        return result;
    }

    result.key_location = site.key_location();
    let endpoint = match site.indexnow_endpoint.trim() {
        "" => DEFAULT_INDEXNOW_ENDPOINT,
        e => e,
    };
    let batches: Vec<&[String]> = chunked(&url_list, site.indexnow_batch_size).collect();
    result.batch_count = batches.len();

    for (i, batch) in batches.into_iter().enumerate() {
        let payload = IndexNowPayload {
            host: &result.host,
            key,
            key_location: &result.key_location,
            url_list: batch,
        };
        let outcome = transport.post(endpoint, &payload).await;

        let failure = match outcome {
            Ok(code) => {
                result.last_status_code = code;
                if ACCEPTED.contains(&code) {
                    result.submitted_url_count += batch.len();
                    counter!(INDEXNOW_BATCHES_OK).increment(1);
                    continue;
                }
                format!("http_{code}")
            }
            Err(e) => e.tag(),
        };

        result.failed_batches += 1;
        counter!(INDEXNOW_BATCHES_FAILED).increment(1);
        warn!(batch = i + 1, urls = batch.len(), error = %failure, "indexnow batch failed");
        if result.error.is_none() {
            result.error = Some(failure);
        }
    }

    result.submitted = result.submitted_url_count > 0 && result.failed_batches == 0;
    info!(
        batches = result.batch_count,
        submitted = result.submitted_url_count,
        failed = result.failed_batches,
        "indexnow submission finished"
    );
    result
}

/// Write `<key>.txt` holding the key. `None` when the key is blank.
pub fn write_key_file(dir: &Path, key: &str) -> Result<Option<PathBuf>> {
    let key = key.trim();
    if key.is_empty() {
        return Ok(None);
    }
    let path = dir.join(format!("{key}.txt"));
    fs::write(&path, key).with_context(|| format!("writing key file {}", path.display()))?;
    Ok(Some(path))
}

/// One URL per line.
pub fn write_url_manifest(dir: &Path, urls: &[String]) -> Result<PathBuf> {
    let path = dir.join(MANIFEST_FILE);
    let mut body = urls.join("\n");
    if !urls.is_empty() {
        body.push('\n');
    }
    fs::write(&path, body).with_context(|| format!("writing manifest {}", path.display()))?;
    Ok(path)
}

/// Non-blank manifest lines; a missing manifest reads as empty.
pub fn read_url_manifest(dir: &Path) -> Result<Vec<String>> {
    let path = dir.join(MANIFEST_FILE);
    if !path.exists() {
        return Ok(Vec::new());
    }
    let content = fs::read_to_string(&path)
        .with_context(|| format!("reading manifest {}", path.display()))?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::TransportError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Replies from a script and records batch sizes.
    struct Scripted {
        replies: Mutex<Vec<std::result::Result<u16, TransportError>>>,
        seen: Mutex<Vec<usize>>,
    }

    impl Scripted {
        fn new(mut replies: Vec<std::result::Result<u16, TransportError>>) -> Self {
            replies.reverse();
            Self {
                replies: Mutex::new(replies),
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl IndexTransport for Scripted {
        async fn post(
            &self,
            _endpoint: &str,
            payload: &IndexNowPayload<'_>,
        ) -> std::result::Result<u16, TransportError> {
            self.seen.lock().unwrap().push(payload.url_list.len());
            self.replies.lock().unwrap().pop().unwrap_or(Ok(200))
        }
    }

    fn site(batch: usize) -> SiteConfig {
        SiteConfig {
            site_url: "https://shop.test".into(),
            indexnow_key: "k1".into(),
            indexnow_batch_size: batch,
            ..SiteConfig::default()
        }
    }

    fn urls(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("https://shop.test/p{i:05}")).collect()
    }

    #[tokio::test]
    async fn missing_key_short_circuits() {
        let t = Scripted::new(vec![]);
        let mut cfg = site(10);
        cfg.indexnow_key = "  ".into();
        let r = submit_urls(&cfg, &urls(3), &t).await;
        assert!(!r.enabled && !r.submitted);
        assert_eq!(r.error.as_deref(), Some("indexnow_key_missing"));
        assert!(t.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn blank_list_short_circuits() {
        let t = Scripted::new(vec![]);
        let r = submit_urls(&site(10), &[" ".into(), String::new()], &t).await;
        assert_eq!(r.error.as_deref(), Some("url_list_empty"));
        assert_eq!(r.batch_count, 0);
        assert!(t.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn urls_are_deduped_before_batching() {
        let t = Scripted::new(vec![]);
        let mut list = urls(5);
        list.extend(urls(5));
        let r = submit_urls(&site(2), &list, &t).await;
        assert_eq!(*t.seen.lock().unwrap(), vec![2, 2, 1]);
        assert!(r.submitted);
        assert_eq!(r.submitted_url_count, 5);
        assert_eq!(r.key_location, "https://shop.test/k1.txt");
    }

    #[tokio::test]
    async fn first_error_is_kept_and_all_batches_run() {
        let t = Scripted::new(vec![
            Ok(202),
            Err(TransportError::Network("connection refused".into())),
            Ok(429),
            Ok(200),
        ]);
        let r = submit_urls(&site(1), &urls(4), &t).await;
        assert_eq!(t.seen.lock().unwrap().len(), 4);
        assert_eq!(r.failed_batches, 2);
        assert_eq!(r.submitted_url_count, 2);
        assert_eq!(r.error.as_deref(), Some("url_error:connection refused"));
        assert_eq!(r.last_status_code, 200);
        assert!(!r.submitted);
    }

    #[test]
    fn manifest_and_key_file_roundtrip_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read_url_manifest(dir.path()).unwrap().is_empty());
        write_url_manifest(dir.path(), &urls(2)).unwrap();
        assert_eq!(read_url_manifest(dir.path()).unwrap(), urls(2));
        assert!(write_key_file(dir.path(), " ").unwrap().is_none());
        let key = write_key_file(dir.path(), "abc").unwrap().unwrap();
        assert_eq!(fs::read_to_string(key).unwrap(), "abc");
    }
}
