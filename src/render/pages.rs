// src/render/pages.rs
//! Trust and legal pages. Bodies come from the copy table, so they are
//! trusted HTML; only placeholders are filled in.

use super::{render_layout, PageMeta, SiteContext};

struct StaticPage {
    file: &'static str,
    copy_key: &'static str,
    title: &'static str,
    description: &'static str,
}

const STATIC_PAGES: [StaticPage; 6] = [
    StaticPage {
        file: "about.html",
        copy_key: "about_html",
        title: "About",
        description: "Learn how this site builds structured product comparison guides.",
    },
    StaticPage {
        file: "contact.html",
        copy_key: "contact_html",
        title: "Contact",
        description: "Contact the editorial team for corrections and questions.",
    },
    StaticPage {
        file: "affiliate-disclosure.html",
        copy_key: "disclosure_html",
        title: "Affiliate Disclosure",
        description: "How affiliate links and commissions work on this site.",
    },
    StaticPage {
        file: "editorial-policy.html",
        copy_key: "editorial_html",
        title: "Editorial Policy",
        description: "Selection framework, update cadence and editorial independence.",
    },
    StaticPage {
        file: "privacy-policy.html",
        copy_key: "privacy_html",
        title: "Privacy Policy",
        description: "How analytics, logs and affiliate partners may process data.",
    },
    StaticPage {
        file: "terms-of-use.html",
        copy_key: "terms_html",
        title: "Terms of Use",
        description: "Terms that apply when using this website.",
    },
];

/// `(file name, document)` for every static page.
pub fn static_pages(ctx: &SiteContext<'_>) -> Vec<(String, String)> {
    STATIC_PAGES
        .iter()
        .map(|p| {
            let title = format!("{} | {}", p.title, ctx.site.site_name);
            let body = format!(
                "<article class='content-card legal-page'>{}</article>",
                ctx.copy_text(p.copy_key)
            );
            let html = render_layout(
                ctx,
                &PageMeta {
                    title: &title,
                    description: p.description,
                    path: p.file,
                    ..PageMeta::default()
                },
                &body,
            );
            (p.file.to_string(), html)
        })
        .collect()
}
