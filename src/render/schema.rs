// src/render/schema.rs
//! schema.org JSON-LD objects.

use serde_json::{json, Value};

use crate::config::site::SiteConfig;
use crate::variation::PLACEHOLDER_IMAGE;

/// Inputs of the per-article schema blocks.
#[derive(Debug, Clone)]
pub struct ArticleSchema<'a> {
    pub headline: &'a str,
    pub description: &'a str,
    pub url: &'a str,
    pub updated_iso: &'a str,
    pub image_url: &'a str,
    pub keyword: &'a str,
    pub picks: &'a [String; 3],
}

/// Article, FAQPage and BreadcrumbList, in that order.
pub fn article_schema(site: &SiteConfig, a: &ArticleSchema<'_>) -> Vec<Value> {
    let [top, budget, premium] = a.picks;
    let article = json!({
        "@context": "https://schema.org",
        "@type": "Article",
        "headline": a.headline,
        "description": a.description,
        "image": a.image_url,
        "mainEntityOfPage": {"@type": "WebPage", "@id": a.url},
        "datePublished": a.updated_iso,
        "dateModified": a.updated_iso,
        "author": {
            "@type": "Person",
            "name": site.author_name,
            "url": site.absolute_url("about.html"),
        },
        "publisher": {
            "@type": "Organization",
            "name": site.site_name,
            "url": site.site_url,
            "logo": {
                "@type": "ImageObject",
                "url": site.absolute_url(PLACEHOLDER_IMAGE),
                "width": 512,
                "height": 512,
            },
        },
    });

    let question = |name: String, answer: String| {
        json!({
            "@type": "Question",
            "name": name,
            "acceptedAnswer": {"@type": "Answer", "text": answer},
        })
    };
    let faq = json!({
        "@context": "https://schema.org",
        "@type": "FAQPage",
        "mainEntity": [
            question(
                format!("What is the best overall choice for {}?", a.keyword),
                format!("{top} is generally the best all-around option for balanced performance and value."),
            ),
            question(
                format!("Which option is good for budget buyers in {}?", a.keyword),
                format!("{budget} is a good starting point if your priority is lower cost with practical quality."),
            ),
            question(
                format!("Which pick is suitable for premium needs in {}?", a.keyword),
                format!("{premium} is better for demanding use cases where extra performance matters."),
            ),
        ],
    });

    let breadcrumb = json!({
        "@context": "https://schema.org",
        "@type": "BreadcrumbList",
        "itemListElement": [
            {"@type": "ListItem", "position": 1, "name": "Home", "item": site.absolute_url("index.html")},
            {"@type": "ListItem", "position": 2, "name": format!("Best {}", a.keyword), "item": a.url},
        ],
    });

    vec![article, faq, breadcrumb]
}

pub fn website_schema(site: &SiteConfig) -> Value {
    json!({
        "@context": "https://schema.org",
        "@type": "WebSite",
        "name": site.site_name,
        "url": site.absolute_url("index.html"),
    })
}
