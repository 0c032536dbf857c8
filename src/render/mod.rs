// src/render/mod.rs
//! HTML rendering. Pages are assembled from plain string fragments around a
//! shared layout; nothing here touches the filesystem except [`assets`].

pub mod article;
pub mod assets;
pub mod home;
pub mod listing;
pub mod pages;
pub mod schema;

use std::collections::{BTreeMap, HashMap};
use std::fmt::Write as _;

use chrono::{DateTime, Datelike, Utc};
use once_cell::sync::OnceCell;
use regex::{Captures, Regex};
use serde_json::Value;

use crate::config::copy::{placeholder_context, PageCopy};
use crate::config::site::SiteConfig;
use crate::group::PageBuild;
use crate::slug::slugify;
use crate::variation::{display_keyword, PLACEHOLDER_IMAGE};

/// Everything page renderers share for one run.
#[derive(Debug, Clone)]
pub struct SiteContext<'a> {
    pub site: &'a SiteConfig,
    pub copy: &'a PageCopy,
    /// Generation time; drives "updated" lines, copyright year and schema dates.
    pub now: DateTime<Utc>,
}

impl<'a> SiteContext<'a> {
    pub fn new(site: &'a SiteConfig, copy: &'a PageCopy, now: DateTime<Utc>) -> Self {
        Self { site, copy, now }
    }

    pub fn year(&self) -> i32 {
        self.now.year()
    }

    pub fn placeholders(&self, extras: &[(&str, String)]) -> BTreeMap<String, String> {
        placeholder_context(self.site, self.year(), extras)
    }

    /// Copy entry `key` with the site-wide placeholders filled in.
    pub fn copy_text(&self, key: &str) -> String {
        self.copy.render(key, &self.placeholders(&[]))
    }
}

/// Head metadata of one document.
#[derive(Debug, Clone, Default)]
pub struct PageMeta<'a> {
    pub title: &'a str,
    pub description: &'a str,
    /// Output file name, used for the canonical URL and active nav state.
    pub path: &'a str,
    pub schema: Vec<Value>,
    pub og_image: Option<String>,
    pub noindex: bool,
}

/// HTML-escape text for element content and quoted attributes.
pub fn esc(text: &str) -> String {
    html_escape::encode_quoted_attribute(text).into_owned()
}

/// `12345` → `"12,345"`.
pub fn thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

const NAV_ITEMS: [(&str, &str); 5] = [
    ("Home", "index.html"),
    ("Best Picks", "all-guides.html"),
    ("Categories", "index.html#category-navigator"),
    ("About", "about.html"),
    ("Contact", "contact.html"),
];

fn render_header(site: &SiteConfig, current: &str) -> String {
    let current = if current.is_empty() { "index.html" } else { current };
    let mut links = String::new();
    for (label, href) in NAV_ITEMS {
        let is_guides = href == "all-guides.html" && current.starts_with("all-guides");
        let is_categories = href.starts_with("index.html#") && current == "index.html";
        let active = if current == href || is_guides || is_categories {
            " active"
        } else {
            ""
        };
        let _ = write!(
            links,
            "<a class='nav-link{active}' href='{}'>{}</a>",
            esc(href),
            esc(label)
        );
    }
    format!(
        "<header class='site-header'><div class='site-header-inner'>\
         <a class='logo' href='index.html'><span class='logo-mark'></span><span>{}</span></a>\
         <nav class='site-nav'>{links}<a class='nav-cta' href='all-guides.html'>Get Recommendations</a></nav>\
         </div></header>",
        esc(&site.site_name)
    )
}

fn render_footer(ctx: &SiteContext<'_>) -> String {
    let name = esc(&ctx.site.site_name);
    format!(
        "<footer class='site-footer'><div class='site-footer-inner'>\
         <div><strong>{name}</strong> publishes structured, transparent buying research built for fast decision-making.</div>\
         <div class='footer-columns'>\
         <div class='footer-col'><h4>Product Research</h4><a href='editorial-policy.html'>Methodology</a><a href='affiliate-disclosure.html'>Disclosure</a><a href='all-guides.html'>Best Picks</a></div>\
         <div class='footer-col'><h4>Company</h4><a href='about.html'>About</a><a href='contact.html'>Contact</a></div>\
         <div class='footer-col'><h4>Resources</h4><a href='all-guides.html'>Guides</a><a href='editorial-policy.html'>Scoring Method</a></div>\
         <div class='footer-col'><h4>Legal</h4><a href='privacy-policy.html'>Privacy</a><a href='terms-of-use.html'>Terms</a><a href='affiliate-disclosure.html'>Affiliate Disclosure</a></div>\
         </div>\
         <div>&copy; {year} {name}. All rights reserved.</div>\
         </div></footer>",
        year = ctx.year()
    )
}

fn schema_tags(schema: &[Value]) -> String {
    schema
        .iter()
        .map(|obj| {
            // `</` inside a script element would end it early.
            let json = obj.to_string().replace("</", "<\\/");
            format!("<script type='application/ld+json'>{json}</script>")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Full document around `main_html`.
pub fn render_layout(ctx: &SiteContext<'_>, meta: &PageMeta<'_>, main_html: &str) -> String {
    let site = ctx.site;
    let robots = if meta.noindex { "noindex,follow" } else { "index,follow" };
    let canonical = esc(&site.absolute_url(meta.path));
    let social_image = meta
        .og_image
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| site.absolute_url(PLACEHOLDER_IMAGE));
    let social_image = esc(&social_image);
    let title = esc(meta.title);
    let description = esc(meta.description);
    let site_name = esc(&site.site_name);

    format!(
        "<!doctype html>
<html lang='en'>
<head>
<meta charset='utf-8'>
<meta name='viewport' content='width=device-width, initial-scale=1'>
<title>{title}</title>
<meta name='description' content='{description}'>
<meta name='robots' content='{robots}'>
<meta property='og:type' content='website'>
<meta property='og:site_name' content='{site_name}'>
<meta property='og:title' content='{title}'>
<meta property='og:description' content='{description}'>
<meta property='og:url' content='{canonical}'>
<meta property='og:image' content='{social_image}'>
<meta name='twitter:card' content='summary_large_image'>
<meta name='twitter:title' content='{title}'>
<meta name='twitter:description' content='{description}'>
<meta name='twitter:image' content='{social_image}'>
<link rel='canonical' href='{canonical}'>
<link rel='stylesheet' href='assets/site.css'>
{schema}
</head>
<body>
{header}
<main class='page-wrap'>{main_html}</main>
{footer}
</body>
</html>",
        schema = schema_tags(&meta.schema),
        header = render_header(site, meta.path),
        footer = render_footer(ctx),
    )
}

/// Where a collage is shown; cards load lazily.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollageContext {
    Article,
    Card,
}

pub fn render_collage(build: &PageBuild, context: CollageContext) -> String {
    let collage = build.collage();
    let mut images: Vec<&str> = collage.images.iter().map(String::as_str).collect();
    if images.is_empty() {
        images.push(if collage.primary_image.is_empty() {
            PLACEHOLDER_IMAGE
        } else {
            collage.primary_image.as_str()
        });
    }
    let title = if collage.caption.is_empty() {
        crate::variation::caption_for(&build.keyword)
    } else {
        collage.caption.clone()
    };
    let (loading, class) = match context {
        CollageContext::Article => ("eager", "feature-collage feature-collage-article"),
        CollageContext::Card => ("lazy", "feature-collage feature-collage-card"),
    };
    let title = esc(&title);

    let mut tiles = String::new();
    for i in 0..crate::variation::COLLAGE_TILES {
        let url = images.get(i).or(images.last()).copied().unwrap_or(PLACEHOLDER_IMAGE);
        let _ = write!(
            tiles,
            "<img class='tile tile-{n}' src='{src}' alt='{title} collage image {n}' loading='{loading}' \
             decoding='async' onerror=\"this.onerror=null;this.src='{PLACEHOLDER_IMAGE}';\">",
            n = i + 1,
            src = esc(url),
        );
    }
    let v = collage.variant;
    format!(
        "<figure class='{class} {}'>{tiles}<div class='feature-collage-overlay {}'></div>\
         <figcaption class='feature-collage-title {}'>{title}</figcaption></figure>",
        esc(v.layout),
        esc(v.overlay),
        esc(v.font)
    )
}

/// Card heading label, e.g. `"Best Wool Socks"`.
pub fn card_title(build: &PageBuild) -> String {
    format!("Best {}", display_keyword(&build.keyword))
}

/// Give every h2/h3 with text a unique slug `id`. Headings that already carry
/// an id keep it but still reserve their slug.
pub fn add_heading_ids(html: &str) -> String {
    static RE_HEADING: OnceCell<Regex> = OnceCell::new();
    static RE_TAG: OnceCell<Regex> = OnceCell::new();
    let re = RE_HEADING
        .get_or_init(|| Regex::new(r"(?is)<h([23])([^>]*)>(.*?)</h([23])>").expect("heading regex"));
    let re_tag = RE_TAG.get_or_init(|| Regex::new(r"<[^>]+>").expect("tag regex"));

    let mut seen: HashMap<String, u32> = HashMap::new();
    re.replace_all(html, |c: &Captures| {
        let level = &c[1];
        if level != &c[4] {
            return c[0].to_string();
        }
        let mut attrs = c[2].to_string();
        let inner = &c[3];
        let plain = re_tag.replace_all(inner, "");
        let plain = plain.split_whitespace().collect::<Vec<_>>().join(" ");
        if plain.is_empty() {
            return c[0].to_string();
        }
        let base = slugify(&plain);
        let n = seen.entry(base.clone()).or_insert(0);
        *n += 1;
        let anchor = if *n == 1 { base } else { format!("{base}-{n}") };
        if !attrs.to_lowercase().contains(" id=") {
            let _ = write!(attrs, " id='{}'", esc(&anchor));
        }
        format!("<h{level}{attrs}>{inner}</h{level}>")
    })
    .into_owned()
}

/// Add `tag=<tag>` to the query when the URL has no `tag` parameter yet.
/// Unparseable URLs and blank tags are returned unchanged.
pub fn ensure_affiliate_tag(raw: &str, tag: &str) -> String {
    let tag = tag.trim();
    if tag.is_empty() || raw.is_empty() {
        return raw.to_string();
    }
    let Ok(mut url) = url::Url::parse(raw) else {
        return raw.to_string();
    };
    if url.query_pairs().any(|(k, _)| k == "tag") {
        return raw.to_string();
    }
    url.query_pairs_mut().append_pair("tag", tag);
    url.to_string()
}

/// Short spec line from a product title: the first segment of at least 8
/// characters that contains a digit, else the first such segment at all.
pub fn extract_feature(title: &str) -> String {
    let parts: Vec<String> = title
        .split(|c| matches!(c, '|' | ',' | ':' | ';' | '\\' | '-'))
        .map(|p| p.split_whitespace().collect::<Vec<_>>().join(" "))
        .collect();
    parts
        .iter()
        .find(|p| p.chars().count() >= 8 && p.chars().any(|c| c.is_ascii_digit()))
        .or_else(|| parts.iter().find(|p| p.chars().count() >= 8))
        .cloned()
        .unwrap_or_else(|| "Balanced feature set".to_string())
}

pub(crate) fn disclosure_block() -> &'static str {
    "<section class='disclosure-card'><strong>Amazon Affiliate Disclosure:</strong> \
     As an Amazon Associate, this site may earn from qualifying purchases. \
     Prices, ratings, and availability may change over time.</section>"
}

pub(crate) fn author_box(site: &SiteConfig) -> String {
    format!(
        "<section class='author-card'><div class='author-name'>Author</div>\
         <div class='author-name'>{}</div><div class='author-role'>{}</div><div>{}</div>\
         <div class='micro-note'>For correction requests, use the contact page.</div></section>",
        esc(&site.author_name),
        esc(&site.author_role),
        esc(&site.author_bio)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heading_ids_are_unique() {
        let html = "<h2>Buying Guide</h2><h3 class='x'>Buying <b>Guide</b></h3><h2 id='keep'>Buying Guide</h2><h2> </h2>";
        let out = add_heading_ids(html);
        assert!(out.contains("<h2 id='buying-guide'>Buying Guide</h2>"));
        assert!(out.contains("<h3 class='x' id='buying-guide-2'>Buying <b>Guide</b></h3>"));
        assert!(out.contains("<h2 id='keep'>Buying Guide</h2>"));
        assert!(out.contains("<h2> </h2>"));
    }

    #[test]
    fn mismatched_heading_pair_is_left_alone() {
        let out = add_heading_ids("<h2>Mismatch</h3><h3>Deal</h3>");
        assert!(out.contains("<h2>Mismatch</h3>"));
        assert!(!out.contains("</h2>"));
        assert!(out.contains("<h3 id='deal'>Deal</h3>"));
    }

    #[test]
    fn affiliate_tag_only_when_absent() {
        assert_eq!(
            ensure_affiliate_tag("https://shop.test/p?x=1", "me-20"),
            "https://shop.test/p?x=1&tag=me-20"
        );
        assert_eq!(
            ensure_affiliate_tag("https://shop.test/p?tag=old", "me-20"),
            "https://shop.test/p?tag=old"
        );
        assert_eq!(ensure_affiliate_tag("https://shop.test/p", ""), "https://shop.test/p");
        assert_eq!(ensure_affiliate_tag("not a url", "me-20"), "not a url");
    }

    #[test]
    fn feature_prefers_segments_with_digits() {
        assert_eq!(extract_feature("Acme Sock | Merino wool, 6 pairs included"), "6 pairs included");
        assert_eq!(extract_feature("Acme | Merino wool blend"), "Merino wool blend");
        assert_eq!(extract_feature("Tiny | Sock"), "Balanced feature set");
    }

    #[test]
    fn thousands_groups_digits() {
        assert_eq!(thousands(0), "0");
        assert_eq!(thousands(999), "999");
        assert_eq!(thousands(1234567), "1,234,567");
    }

    #[test]
    fn escaping_covers_quotes() {
        let out = esc("<a href='x'>&\"</a>");
        assert!(out.starts_with("&lt;a href="));
        assert!(!out.contains('\'') && !out.contains('"') && !out.contains('<'));
    }
}
