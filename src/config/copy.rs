// src/config/copy.rs
//! Overridable page copy with `{{placeholder}}` substitution.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use once_cell::sync::OnceCell;
use regex::{Captures, Regex};
use serde_json::Value;

use super::site::SiteConfig;
use super::{text_or, Settings};

const DEFAULT_COPY: &[(&str, &str)] = &[
    ("home_hero_kicker", "Programmatic Affiliate Hub"),
    ("home_hero_title", "{{site_name}}"),
    (
        "home_hero_intro",
        "Find structured comparisons with disclosure, author info, and buying guidance. \
         Use search to quickly filter guides.",
    ),
    ("home_search_placeholder", "Search a keyword (e.g. planner, solar lights...)"),
    ("home_latest_guides_title", "Latest Buying Guides"),
    ("home_important_pages_title", "Important Pages"),
    (
        "home_hidden_note_template",
        "{{hidden_count}} additional pages are available. <a href='all-guides.html'>Browse all guides</a>.",
    ),
    ("guides_index_title", "All Buying Guides"),
    (
        "guides_index_intro",
        "Browse all generated guides. This index is paginated for crawl efficiency and better internal linking.",
    ),
    ("guides_card_cta_text", "Open guide"),
    (
        "about_html",
        "<h1>About {{site_name}}</h1>\
         <p>This website publishes large-scale product comparison guides using structured data and repeatable editorial templates. \
         Our goal is to help readers shortlist products faster without depending only on marketing claims.</p>\
         <h2>How We Build Content</h2>\
         <p>Each guide is generated from product-level inputs such as ratings, review counts, and ranking position. \
         Then we apply a consistent layout that includes affiliate disclosure, buying guidance, FAQ, and author details.</p>\
         <p>We use a repeatable framework so the same evaluation logic can be applied across thousands of pages. \
         This keeps structure, legal disclosures, and user experience consistent as the site scales.</p>\
         <h2>Editorial Intent</h2>\
         <p>We aim to present practical comparisons, common buying mistakes, and shortlist-focused recommendations. \
         Content may be regenerated as source data changes, templates improve, or policy sections are updated.</p>\
         <h2>Corrections and Updates</h2>\
         <p>If you find factual errors, outdated details, or technical issues, contact us by email at \
         <a href='mailto:{{contact_email}}'>{{contact_email}}</a>.</p>",
    ),
    (
        "contact_html",
        "<h1>Contact Us</h1>\
         <p>For corrections, partnership inquiries, copyright concerns, and general questions, please contact us via email.</p>\
         <div class='contact-email-box'><strong>Email:</strong> <a href='mailto:{{contact_email}}'>{{contact_email}}</a></div>\
         <p>When contacting us, include the page URL and a short explanation so we can review your request faster.</p>\
         <p>We do not currently use a web form on this website. Email is the official contact channel.</p>",
    ),
    (
        "disclosure_html",
        "<h1>Affiliate Disclosure</h1>\
         <p>This website participates in affiliate advertising programs, including Amazon Associates and similar partner networks.</p>\
         <p>When visitors click affiliate links and make qualifying purchases, we may earn a commission at no additional cost to the buyer.</p>\
         <p>Affiliate relationships do not change our commitment to transparent disclosures and structured comparison methods.</p>\
         <p>Product prices, stock availability, ratings, and reviews may change over time. \
         Always verify current details on the merchant website before making a final purchase decision.</p>\
         <p>We aim to keep disclosures visible and understandable for readers so affiliate relationships remain clear across all pages.</p>",
    ),
    (
        "editorial_html",
        "<h1>Editorial Policy</h1>\
         <h2>Selection Framework</h2>\
         <p>Guides are assembled from structured input datasets and consistency rules, including rank signals, review confidence, and feature relevance.</p>\
         <p>Templates are designed to maintain a consistent section order so readers can compare products quickly across different categories.</p>\
         <h2>Content Updates</h2>\
         <p>Pages may be regenerated when source data changes or when layout/policy improvements are deployed site-wide.</p>\
         <p>We may also revise introduction, FAQ, or guidance sections to improve clarity, readability, and compliance standards.</p>\
         <h2>Independence</h2>\
         <p>Affiliate commissions do not guarantee product placement. Ranking logic follows predefined data-driven rules.</p>\
         <p>Editorial and policy updates are applied at the template level to keep site-wide consistency without manual edits on each page.</p>",
    ),
    (
        "privacy_html",
        "<h1>Privacy Policy</h1>\
         <p>This site may use analytics, server logs, and affiliate tracking parameters to understand traffic and link performance.</p>\
         <p>We do not intentionally collect sensitive personal data through article pages.</p>\
         <p>If you contact us by email, we may retain your message to respond, resolve issues, and keep an internal record of support requests.</p>\
         <p>Third-party services (such as affiliate networks) may process data under their own privacy policies.</p>\
         <p>Cookies and tracking technologies may be used by analytics or affiliate partners to measure site performance and referral attribution.</p>\
         <p>By continuing to use this site, you acknowledge these data-processing practices. \
         If you have privacy-related questions, contact us by email at <a href='mailto:{{contact_email}}'>{{contact_email}}</a>.</p>",
    ),
    (
        "terms_html",
        "<h1>Terms of Use</h1>\
         <p>All content is provided for informational purposes and may change without notice.</p>\
         <p>We do not guarantee completeness, merchant accuracy, or fitness for any specific purchase decision.</p>\
         <p>Before buying any product, you should verify product details, shipping, warranty, and return policy on the seller platform.</p>\
         <p>Unauthorized copying, bulk republishing, or automated scraping of this website content may violate applicable laws.</p>\
         <p>By using this website, you agree to evaluate products independently and use this information at your own discretion.</p>\
         <p>These terms may be updated periodically. Continued use of the site indicates acceptance of the latest version.</p>",
    ),
    (
        "article_footer_note",
        "This page is for informational purposes and does not replace independent product research.",
    ),
];

/// Named copy strings; defaults overlaid with configured values.
#[derive(Debug, Clone, PartialEq)]
pub struct PageCopy {
    entries: BTreeMap<String, String>,
}

impl Default for PageCopy {
    fn default() -> Self {
        Self {
            entries: DEFAULT_COPY
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

impl PageCopy {
    /// Overlay the inline `page_copy` object, or failing that the legacy
    /// `page_content_file` JSON (resolved against `base`). Non-string values
    /// are ignored; an unreadable legacy file keeps the defaults.
    pub fn from_settings(settings: &Settings, base: &Path) -> Self {
        let mut copy = Self::default();
        if let Some(Value::Object(inline)) = settings.get("page_copy") {
            copy.overlay(inline);
            return copy;
        }

        let raw = text_or(settings.get("page_content_file"), "");
        if raw.is_empty() {
            return copy;
        }
        let path = base.join(&raw);
        let loaded = fs::read_to_string(&path)
            .ok()
            .and_then(|s| serde_json::from_str::<Value>(&s).ok());
        match loaded {
            Some(Value::Object(map)) => {
                copy.overlay(&map);
                tracing::warn!(path = %path.display(), "page_content_file is legacy; move the copy into `page_copy`");
            }
            _ => {
                tracing::warn!(path = %path.display(), "page content file missing or not an object; using defaults");
            }
        }
        copy
    }

    fn overlay(&mut self, map: &serde_json::Map<String, Value>) {
        for (k, v) in map {
            if let Value::String(s) = v {
                self.entries.insert(k.clone(), s.clone());
            }
        }
    }

    pub fn entries(&self) -> &BTreeMap<String, String> {
        &self.entries
    }

    /// Raw entry, empty when unknown.
    pub fn get(&self, key: &str) -> &str {
        self.entries.get(key).map(String::as_str).unwrap_or_default()
    }

    /// Entry with placeholders filled from `ctx`.
    pub fn render(&self, key: &str, ctx: &BTreeMap<String, String>) -> String {
        apply_placeholders(self.get(key), ctx)
    }
}

/// Site-wide placeholder values plus `extras`.
pub fn placeholder_context(
    site: &SiteConfig,
    year: i32,
    extras: &[(&str, String)],
) -> BTreeMap<String, String> {
    let mut ctx = BTreeMap::from([
        ("site_name".to_string(), site.site_name.clone()),
        ("site_url".to_string(), site.site_url.clone()),
        ("author_name".to_string(), site.author_name.clone()),
        ("author_role".to_string(), site.author_role.clone()),
        ("author_bio".to_string(), site.author_bio.clone()),
        ("contact_email".to_string(), site.contact_email.clone()),
        ("year".to_string(), year.to_string()),
    ]);
    for (k, v) in extras {
        ctx.insert(k.to_string(), v.clone());
    }
    ctx
}

/// Replace `{{ name }}` slots; unknown names are left verbatim.
pub fn apply_placeholders(text: &str, ctx: &BTreeMap<String, String>) -> String {
    static RE_SLOT: OnceCell<Regex> = OnceCell::new();
    let re = RE_SLOT.get_or_init(|| {
        Regex::new(r"\{\{\s*([a-zA-Z0-9_]+)\s*\}\}").expect("placeholder regex")
    });
    re.replace_all(text, |c: &Captures| match ctx.get(&c[1]) {
        Some(v) => v.clone(),
        None => c[0].to_string(),
    })
    .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn placeholders_fill_known_and_keep_unknown() {
        let site = SiteConfig::default();
        let ctx = placeholder_context(&site, 2025, &[("hidden_count", "7".to_string())]);
        let out = apply_placeholders("{{ site_name }} {{year}} {{hidden_count}} {{nope}}", &ctx);
        assert_eq!(out, "Buyer Verdict Hub 2025 7 {{nope}}");
    }

    #[test]
    fn inline_copy_overrides_strings_only() {
        let s = json!({"page_copy": {"guides_index_title": "Everything", "home_hero_kicker": 5}});
        let copy = PageCopy::from_settings(s.as_object().unwrap(), Path::new("."));
        assert_eq!(copy.get("guides_index_title"), "Everything");
        assert_eq!(copy.get("home_hero_kicker"), "Programmatic Affiliate Hub");
    }

    #[test]
    fn legacy_file_is_read_relative_to_base() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("copy.json"), r#"{"article_footer_note": "Legacy"}"#).unwrap();
        let s = json!({"page_content_file": "copy.json"});
        let copy = PageCopy::from_settings(s.as_object().unwrap(), dir.path());
        assert_eq!(copy.get("article_footer_note"), "Legacy");

        let missing = json!({"page_content_file": "nope.json"});
        let copy = PageCopy::from_settings(missing.as_object().unwrap(), dir.path());
        assert_eq!(copy, PageCopy::default());
    }
}
