// tests/indexnow_batches.rs
use std::sync::Mutex;

use async_trait::async_trait;
use guidepress::config::site::SiteConfig;
use guidepress::notify::{submit_urls, IndexNowPayload, IndexTransport, TransportError};

/// Fails exactly the batches listed in `fail_on` (1-based) and records what
/// it was sent.
struct FlakyTransport {
    fail_on: Vec<usize>,
    calls: Mutex<Vec<(String, usize, String)>>,
}

impl FlakyTransport {
    fn new(fail_on: &[usize]) -> Self {
        Self {
            fail_on: fail_on.to_vec(),
            calls: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl IndexTransport for FlakyTransport {
    async fn post(
        &self,
        endpoint: &str,
        payload: &IndexNowPayload<'_>,
    ) -> Result<u16, TransportError> {
        let mut calls = self.calls.lock().unwrap();
        calls.push((endpoint.to_string(), payload.url_list.len(), payload.host.to_string()));
        if self.fail_on.contains(&calls.len()) {
            Ok(500)
        } else {
            Ok(202)
        }
    }
}

fn site() -> SiteConfig {
    SiteConfig {
        site_url: "https://shop.test:8443".into(),
        indexnow_key: "abc123".into(),
        indexnow_batch_size: 10_000,
        ..SiteConfig::default()
    }
}

fn urls(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("https://shop.test/guide-{i:06}")).collect()
}

#[tokio::test]
async fn one_failed_batch_marks_the_run_unsubmitted() {
    let transport = FlakyTransport::new(&[2]);
    let result = submit_urls(&site(), &urls(25_000), &transport).await;

    let calls = transport.calls.lock().unwrap();
    let sizes: Vec<usize> = calls.iter().map(|c| c.1).collect();
    assert_eq!(sizes, vec![10_000, 10_000, 5_000]);
    assert!(calls.iter().all(|c| c.0 == "https://api.indexnow.org/indexnow"));
    assert!(calls.iter().all(|c| c.2 == "shop.test:8443"));

    assert!(result.enabled);
    assert!(!result.submitted);
    assert_eq!(result.batch_count, 3);
    assert_eq!(result.failed_batches, 1);
    assert_eq!(result.submitted_url_count, 15_000);
    assert_eq!(result.error.as_deref(), Some("http_500"));
    assert_eq!(result.last_status_code, 202);
}

#[tokio::test]
async fn clean_run_submits_everything() {
    let transport = FlakyTransport::new(&[]);
    let result = submit_urls(&site(), &urls(25_000), &transport).await;
    assert!(result.submitted);
    assert_eq!(result.submitted_url_count, 25_000);
    assert_eq!(result.error, None);
    assert_eq!(result.key_location, "https://shop.test:8443/abc123.txt");
}

#[tokio::test]
async fn explicit_key_location_is_used() {
    let mut cfg = site();
    cfg.indexnow_key_location = "/keys/abc123.txt".into();
    let transport = FlakyTransport::new(&[]);
    let result = submit_urls(&cfg, &urls(1), &transport).await;
    assert_eq!(result.key_location, "https://shop.test:8443/keys/abc123.txt");
}

#[tokio::test]
async fn nothing_is_sent_without_key_or_urls() {
    let transport = FlakyTransport::new(&[]);
    let mut cfg = site();
    cfg.indexnow_key.clear();
    let r = submit_urls(&cfg, &urls(10), &transport).await;
    assert_eq!(r.error.as_deref(), Some("indexnow_key_missing"));

    let r = submit_urls(&site(), &[], &transport).await;
    assert_eq!(r.error.as_deref(), Some("url_list_empty"));
    assert!(transport.calls.lock().unwrap().is_empty());
}
