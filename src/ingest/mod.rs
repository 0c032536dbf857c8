// src/ingest/mod.rs
pub mod types;

use crate::ingest::types::{ProductRecord, UNRANKED};
use anyhow::{Context, Result};
use once_cell::sync::OnceCell;
use regex::Regex;
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Lowercase, trim, collapse inner whitespace.
pub fn norm(s: &str) -> String {
    s.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Clean scraped text: decode entities, fold typographic dashes/quotes (and
/// their mojibake forms) to ASCII, collapse whitespace.
pub fn clean_text_artifacts(s: &str) -> String {
    // 1) HTML entity decode
    let mut out = html_escape::decode_html_entities(s).to_string();

    // 2) Mojibake first, then the proper code points
    for (bad, good) in [
        ("â€“", "-"),
        ("â€”", "-"),
        ("â€˜", "'"),
        ("â€™", "'"),
        ("â€œ", "\""),
        ("â€\u{9d}", "\""),
        ("&amp;amp;", "&"),
    ] {
        out = out.replace(bad, good);
    }
    out = out
        .replace(['\u{2013}', '\u{2014}'], "-")
        .replace(['\u{2018}', '\u{2019}'], "'")
        .replace(['\u{201C}', '\u{201D}'], "\"");

    // 3) Collapse whitespace
    static RE_WS: OnceCell<Regex> = OnceCell::new();
    let re_ws = RE_WS.get_or_init(|| Regex::new(r"\s+").expect("whitespace regex"));
    re_ws.replace_all(&out, " ").trim().to_string()
}

/// `"12"`, `" 12.9 "` → 12; anything unparsable → `default`.
pub fn parse_int(raw: &str, default: i64) -> i64 {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .map(|v| v.trunc() as i64)
        .unwrap_or(default)
}

pub fn parse_float(raw: &str, default: f64) -> f64 {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(default)
}

/// Column positions resolved from the header row.
struct Columns {
    idx: HashMap<String, usize>,
}

impl Columns {
    fn from_headers(headers: &csv::StringRecord) -> Self {
        let idx = headers
            .iter()
            .enumerate()
            .map(|(i, h)| (h.trim_start_matches('\u{feff}').trim().to_string(), i))
            .collect();
        Self { idx }
    }

    fn get<'r>(&self, row: &'r csv::StringRecord, name: &str) -> &'r str {
        self.idx
            .get(name)
            .and_then(|&i| row.get(i))
            .unwrap_or_default()
    }
}

/// Read product rows from any CSV source. Rows missing keyword, product name
/// or product URL are dropped.
pub fn read_products<R: Read>(reader: R) -> Result<Vec<ProductRecord>> {
    let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let cols = Columns::from_headers(rdr.headers().context("reading CSV header")?);

    let mut out = Vec::new();
    let mut dropped = 0usize;
    for (line, row) in rdr.records().enumerate() {
        let row = row.with_context(|| format!("reading CSV row {}", line + 2))?;

        let keyword = clean_text_artifacts(cols.get(&row, "keyword"));
        let product_name = clean_text_artifacts(cols.get(&row, "product_name"));
        let product_url = cols.get(&row, "product_url").trim().to_string();
        if keyword.is_empty() || product_name.is_empty() || product_url.is_empty() {
            dropped += 1;
            continue;
        }

        out.push(ProductRecord {
            keyword,
            product_name,
            product_url,
            image_url: clean_text_artifacts(cols.get(&row, "image_url")),
            rating: parse_float(cols.get(&row, "rating"), 0.0),
            review_count: parse_int(cols.get(&row, "review_count"), 0).max(0) as u64,
            rank_for_keyword: parse_int(cols.get(&row, "rank_for_keyword"), UNRANKED),
            final_score: parse_float(cols.get(&row, "final_score"), 0.0),
        });
    }

    tracing::debug!(kept = out.len(), dropped, "product rows parsed");
    Ok(out)
}

pub fn load_products(path: &Path) -> Result<Vec<ProductRecord>> {
    let file =
        File::open(path).with_context(|| format!("opening input CSV {}", path.display()))?;
    read_products(file).with_context(|| format!("parsing {}", path.display()))
}
