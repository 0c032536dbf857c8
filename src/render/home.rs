// src/render/home.rs
use std::fmt::Write as _;

use super::schema::website_schema;
use super::{card_title, esc, render_collage, render_layout, CollageContext, PageMeta, SiteContext};
use crate::group::PageBuild;
use crate::ingest::norm;
use crate::variation::display_keyword;

/// Navigator label and the keyword fragments that select its target guide.
pub const CATEGORY_NAVIGATOR: [(&str, &[&str]); 7] = [
    ("For Beginners", &["beginner", "starter", "new", "basic"]),
    ("For Professionals", &["pro", "professional", "heavy duty", "advanced"]),
    ("Budget Picks", &["budget", "cheap", "affordable", "value"]),
    ("Premium Picks", &["premium", "luxury", "high end", "professional"]),
    ("Outdoor / Travel", &["outdoor", "travel", "camping", "portable"]),
    ("Work / Safety", &["work", "safety", "industrial", "protection"]),
    ("Kids / Family", &["kids", "baby", "family", "children"]),
];

const IMPORTANT_PAGES: [(&str, &str); 7] = [
    ("all-guides.html", "Best Picks"),
    ("about.html", "About"),
    ("contact.html", "Contact"),
    ("affiliate-disclosure.html", "Affiliate Disclosure"),
    ("editorial-policy.html", "Editorial Policy"),
    ("privacy-policy.html", "Privacy Policy"),
    ("terms-of-use.html", "Terms of Use"),
];

/// Number of "Top Picks" cards: the configured limit held to 6..=12, never
/// more than there are guides.
pub fn top_pick_count(builds: usize, limit: usize) -> usize {
    builds.min(limit.clamp(6, 12))
}

/// First build (in the given order) whose normalized keyword contains any of
/// `terms`, else the first build.
pub fn first_build_for_terms<'a>(ordered: &[&'a PageBuild], terms: &[&str]) -> Option<&'a PageBuild> {
    let terms: Vec<String> = terms.iter().map(|t| norm(t)).collect();
    ordered
        .iter()
        .find(|b| {
            let kw = norm(&b.keyword);
            terms.iter().any(|t| kw.contains(t.as_str()))
        })
        .or_else(|| ordered.first())
        .copied()
}

fn guide_card(build: &PageBuild, class: &str, heading: &str, blurb: &str, cta: &str) -> String {
    format!(
        "<a class='{class}' href='{href}' data-title='{data}'>{collage}\
         <div class='article-card-content'><h3>{}</h3><p>{blurb}</p><span class='card-cta'>{cta}</span></div></a>",
        esc(heading),
        href = esc(&build.file_name()),
        data = esc(&display_keyword(&build.keyword)),
        collage = render_collage(build, CollageContext::Card),
    )
}

pub fn render_home(ctx: &SiteContext<'_>, builds: &[PageBuild]) -> String {
    let site = ctx.site;
    let mut ordered: Vec<&PageBuild> = builds.iter().collect();
    ordered.sort_by_cached_key(|b| norm(&b.keyword));

    let shown = top_pick_count(ordered.len(), site.home_cards_limit);
    let hidden = ordered.len() - shown;
    let benchmarked: usize = ordered.iter().map(|b| b.products().len()).sum();
    let total_products = if benchmarked == 0 { ordered.len() * 10 } else { benchmarked };

    let mut hero_title = ctx.copy_text("home_hero_title").trim().to_string();
    if hero_title.is_empty() || hero_title == site.site_name {
        hero_title = "Find the Best Products Faster, Without Guesswork".to_string();
    }

    let cards: String = ordered[..shown]
        .iter()
        .map(|b| {
            guide_card(
                b,
                "article-link-card article-card-item",
                &card_title(b),
                "Comparison, buying guide, FAQ and final verdict.",
                "See Top Picks",
            )
        })
        .collect();
    let hidden_note = if hidden > 0 {
        let ctx_map = ctx.placeholders(&[("hidden_count", hidden.to_string())]);
        format!(
            "<p class='micro-note'>{}</p>",
            ctx.copy.render("home_hidden_note_template", &ctx_map)
        )
    } else {
        String::new()
    };

    let preview_rows: String = ordered
        .iter()
        .take(4)
        .map(|b| {
            format!(
                "<div class='hero-mini-row'><span>{}</span><b>{}</b></div>",
                esc(&card_title(b)),
                ctx.year()
            )
        })
        .collect();

    let mut category_links = String::new();
    for (label, terms) in CATEGORY_NAVIGATOR {
        let href = first_build_for_terms(&ordered, terms)
            .map(|b| b.file_name())
            .unwrap_or_else(|| "all-guides.html".to_string());
        let _ = write!(
            category_links,
            "<a class='category-nav-item' href='{}'>{}</a>",
            esc(&href),
            esc(label)
        );
    }

    let featured: String = ordered
        .iter()
        .take(3)
        .map(|b| {
            guide_card(
                b,
                "article-link-card",
                &format!("How to choose {}", display_keyword(&b.keyword)),
                "Structured decision flow and practical shortlist logic.",
                "Read guide",
            )
        })
        .collect();

    let important: String = IMPORTANT_PAGES
        .iter()
        .map(|(href, label)| format!("<a href='{href}'>{label}</a>"))
        .collect::<Vec<_>>()
        .join("\n");

    let guides = ordered.len();
    let contact = esc(&site.contact_email);
    let main_html = format!(
        "<section class='hero-card'><div class='hero-grid'><div class='hero-copy'>\
         <span class='hero-kicker'>{kicker}</span><h1>{hero_title}</h1><p>{hero_intro}</p>\
         <div class='hero-actions'><a class='button' href='all-guides.html'>Browse Top Picks</a>\
         <a class='button secondary' href='editorial-policy.html'>How We Rank Products</a></div>\
         <div class='hero-stats'>\
         <div class='hero-stat'><strong>{refresh}</strong><span>Latest refresh cycle</span></div>\
         <div class='hero-stat'><strong>{guides}+</strong><span>Decision-ready guides</span></div>\
         <div class='hero-stat'><strong>{total_products}+</strong><span>Products benchmarked</span></div>\
         </div></div>\
         <aside class='hero-preview'><div class='ops-heading'>Top Picks Preview</div>\
         <div class='hero-mini-board'>{preview_rows}</div></aside></div>\
         <div class='hero-search-wrap'><input id='pageSearch' class='search-input' placeholder='{search}' /></div>\
         </section>\
         <section class='content-card'><h2>Top Picks Today</h2>\
         <div class='article-grid' id='articleGrid'>{cards}</div>{hidden_note}\
         <script>const q=document.getElementById('pageSearch');\
         const items=[...document.querySelectorAll('.article-card-item')];\
         q?.addEventListener('input',()=>{{const v=q.value.trim().toLowerCase();\
         items.forEach(it=>{{const t=(it.dataset.title||'').toLowerCase();it.style.display=t.includes(v)?'block':'none';}});}});\
         </script></section>\
         <section class='content-card' id='category-navigator'><h2>Category &amp; Use-Case Navigator</h2>\
         <div class='category-nav-grid'>{category_links}</div></section>\
         <section class='content-card'><h2>Featured Buying Guides</h2>\
         <div class='article-grid'>{featured}</div></section>\
         <section class='content-card final-fold'><h3>{important_title}</h3>\
         <div class='final-link-grid'>{important}</div>\
         <div class='final-contact'>Need correction or update request? Email \
         <a href='mailto:{contact}'>{contact}</a>.</div></section>",
        kicker = ctx.copy_text("home_hero_kicker"),
        hero_title = esc(&hero_title),
        hero_intro = esc(&ctx.copy_text("home_hero_intro")),
        refresh = ctx.now.format("%B %Y"),
        search = esc(&ctx.copy_text("home_search_placeholder")),
        important_title = ctx.copy_text("home_important_pages_title"),
    );

    let title = format!("{} | Product Comparisons and Buying Guides", site.site_name);
    render_layout(
        ctx,
        &PageMeta {
            title: &title,
            description: "Programmatic affiliate website with structured product comparisons, buying guides, and legal disclosures.",
            path: "index.html",
            schema: vec![website_schema(site)],
            ..PageMeta::default()
        },
        &main_html,
    )
}
