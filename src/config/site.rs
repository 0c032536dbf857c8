// src/config/site.rs
use once_cell::sync::OnceCell;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::{parse_bool_like, parse_int_like, text_or, Settings};

pub const DEFAULT_SITE_URL: &str = "https://example.pages.dev";
pub const DEFAULT_INDEXNOW_ENDPOINT: &str = "https://api.indexnow.org/indexnow";

/// Site identity plus output and notification tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteConfig {
    pub site_name: String,
    pub site_url: String,
    pub author_name: String,
    pub author_role: String,
    pub author_bio: String,
    pub contact_email: String,
    pub home_cards_limit: usize,
    pub guides_page_size: usize,
    pub related_links_count: usize,
    pub sitemap_chunk_size: usize,
    pub indexnow_key: String,
    pub indexnow_key_location: String,
    pub indexnow_endpoint: String,
    pub indexnow_submit: bool,
    pub indexnow_batch_size: usize,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            site_name: "Buyer Verdict Hub".into(),
            site_url: DEFAULT_SITE_URL.into(),
            author_name: "Editorial Desk".into(),
            author_role: "Product Research Team".into(),
            author_bio: "We analyze product data and structure guides to help buyers compare faster."
                .into(),
            contact_email: "hello@example.com".into(),
            home_cards_limit: 250,
            guides_page_size: 500,
            related_links_count: 6,
            sitemap_chunk_size: 40_000,
            indexnow_key: String::new(),
            indexnow_key_location: String::new(),
            indexnow_endpoint: DEFAULT_INDEXNOW_ENDPOINT.into(),
            indexnow_submit: false,
            indexnow_batch_size: 10_000,
        }
    }
}

impl SiteConfig {
    /// Read from loose settings. Malformed values fall back to the defaults,
    /// then the lower bounds apply.
    pub fn from_settings(s: &Settings) -> Self {
        let d = Self::default();
        let at_least = |key: &str, default: usize, min: i64| -> usize {
            parse_int_like(s.get(key), default as i64).max(min) as usize
        };
        Self {
            site_name: text_or(s.get("site_name"), &d.site_name),
            site_url: normalize_site_url(&text_or(s.get("site_url"), &d.site_url)),
            author_name: text_or(s.get("author_name"), &d.author_name),
            author_role: text_or(s.get("author_role"), &d.author_role),
            author_bio: text_or(s.get("author_bio"), &d.author_bio),
            contact_email: text_or(s.get("contact_email"), &d.contact_email),
            home_cards_limit: at_least("home_cards_limit", d.home_cards_limit, 1),
            guides_page_size: at_least("guides_page_size", d.guides_page_size, 50),
            related_links_count: at_least("related_links_count", d.related_links_count, 2),
            sitemap_chunk_size: at_least("sitemap_chunk_size", d.sitemap_chunk_size, 1),
            indexnow_key: text_or(s.get("indexnow_key"), ""),
            indexnow_key_location: text_or(s.get("indexnow_key_location"), ""),
            indexnow_endpoint: text_or(s.get("indexnow_endpoint"), &d.indexnow_endpoint),
            indexnow_submit: parse_bool_like(s.get("indexnow_submit"), false),
            indexnow_batch_size: at_least("indexnow_batch_size", d.indexnow_batch_size, 1),
        }
    }

    pub fn absolute_url(&self, path: &str) -> String {
        absolute_url(&self.site_url, path)
    }

    /// Lowercase host of the site URL.
    pub fn host(&self) -> String {
        site_host(&self.site_url)
    }

    /// Public URL of the IndexNow key file.
    pub fn key_location(&self) -> String {
        let custom = self.indexnow_key_location.trim();
        if custom.is_empty() {
            self.absolute_url(&format!("{}.txt", self.indexnow_key.trim()))
        } else if has_http_scheme(custom) {
            custom.to_string()
        } else {
            self.absolute_url(custom)
        }
    }
}

fn has_http_scheme(url: &str) -> bool {
    static RE_SCHEME: OnceCell<Regex> = OnceCell::new();
    RE_SCHEME
        .get_or_init(|| Regex::new(r"(?i)^https?://").expect("scheme regex"))
        .is_match(url)
}

/// Add `https://` when no scheme is given and drop trailing slashes.
pub fn normalize_site_url(url: &str) -> String {
    let clean = url.trim();
    if clean.is_empty() {
        return DEFAULT_SITE_URL.to_string();
    }
    let with_scheme = if has_http_scheme(clean) {
        clean.to_string()
    } else {
        format!("https://{clean}")
    };
    with_scheme.trim_end_matches('/').to_string()
}

/// Extension-less public path; `index`/`index.html` map to the root.
/// Query and fragment are carried over.
pub fn normalize_public_path(path: &str) -> String {
    let raw = path.trim().trim_start_matches('/');
    if raw.is_empty() {
        return String::new();
    }
    let (rest, fragment) = match raw.split_once('#') {
        Some((p, f)) => (p, Some(f)),
        None => (raw, None),
    };
    let (path_part, query) = match rest.split_once('?') {
        Some((p, q)) => (p, Some(q)),
        None => (rest, None),
    };

    let clean = path_part.trim();
    let split = clean.len().saturating_sub(5);
    let mut out = if matches!(clean, "" | "index" | "index.html") {
        String::new()
    } else if clean
        .get(split..)
        .is_some_and(|ext| ext.eq_ignore_ascii_case(".html"))
    {
        clean[..split].to_string()
    } else {
        clean.to_string()
    };
    if let Some(q) = query {
        out.push('?');
        out.push_str(q);
    }
    if let Some(f) = fragment {
        out.push('#');
        out.push_str(f);
    }
    out
}

/// Public URL of an output file under `site_url`.
pub fn absolute_url(site_url: &str, path: &str) -> String {
    let public = normalize_public_path(path);
    if public.is_empty() {
        format!("{site_url}/")
    } else {
        format!("{site_url}/{public}")
    }
}

/// Lowercase `host[:port]` of `site_url`.
pub fn site_host(site_url: &str) -> String {
    match url::Url::parse(site_url) {
        Ok(u) => {
            let host = u.host_str().unwrap_or_default().to_lowercase();
            match u.port() {
                Some(port) => format!("{host}:{port}"),
                None => host,
            }
        }
        Err(_) => site_url.trim().to_lowercase(),
    }
}
