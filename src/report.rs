// src/report.rs
//! `generation_report.json`: what a run wrote and how notification went.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::notify::NotificationResult;

pub const REPORT_FILE: &str = "generation_report.json";

/// Notification outcome plus the files it relied on.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndexNowReport {
    #[serde(flatten)]
    pub result: NotificationResult,
    pub url_count: usize,
    pub key_file: String,
    pub manifest_file: String,
}

impl IndexNowReport {
    pub fn new(
        result: NotificationResult,
        url_count: usize,
        key_file: Option<&Path>,
        manifest_file: &Path,
    ) -> Self {
        Self {
            result,
            url_count,
            key_file: key_file.map(|p| p.display().to_string()).unwrap_or_default(),
            manifest_file: manifest_file.display().to_string(),
        }
    }
}

/// Full report of a generation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationReport {
    pub generated_at: String,
    pub input_csv: String,
    pub output_dir: String,
    pub article_count: usize,
    pub static_count: usize,
    pub count_total: usize,
    pub article_files: Vec<String>,
    pub static_files: Vec<String>,
    pub site_url: String,
    pub config_file: String,
    pub indexnow: IndexNowReport,
}

/// Reduced report written by a submit-only run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmitReport {
    pub generated_at: String,
    pub output_dir: String,
    pub site_url: String,
    pub config_file: String,
    pub indexnow: IndexNowReport,
}

/// `2025-01-02T03:04:05Z`.
pub fn timestamp(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Secs, true)
}

pub fn display_path(path: Option<&Path>) -> String {
    path.map(|p| p.display().to_string()).unwrap_or_default()
}

/// Pretty JSON into `<dir>/generation_report.json`.
pub fn write_report<T: Serialize>(dir: &Path, report: &T) -> Result<PathBuf> {
    let path = dir.join(REPORT_FILE);
    let body = serde_json::to_string_pretty(report).context("serializing report")?;
    fs::write(&path, body).with_context(|| format!("writing report {}", path.display()))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::Value;

    #[test]
    fn notification_fields_are_flattened() {
        let result = NotificationResult {
            enabled: true,
            error: Some("http_500".into()),
            last_status_code: 500,
            ..NotificationResult::default()
        };
        let report = IndexNowReport::new(result, 3, None, Path::new("out/indexnow-urls.txt"));
        let v = serde_json::to_value(&report).unwrap();
        assert_eq!(v["error"], "http_500");
        assert_eq!(v["last_status_code"], 500);
        assert_eq!(v["url_count"], 3);
        assert_eq!(v["key_file"], "");
        assert!(v.get("result").is_none());
    }

    #[test]
    fn report_lands_in_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        let now = Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap();
        let report = SubmitReport {
            generated_at: timestamp(now),
            output_dir: dir.path().display().to_string(),
            site_url: "https://shop.test".into(),
            config_file: String::new(),
            indexnow: IndexNowReport::default(),
        };
        let path = write_report(dir.path(), &report).unwrap();
        let back: Value = serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(back["generated_at"], "2025-01-02T03:04:05Z");
        assert_eq!(back["indexnow"]["submitted"], false);
    }
}
