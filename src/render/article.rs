// src/render/article.rs
use std::fmt::Write as _;

use super::schema::{article_schema, ArticleSchema};
use super::{
    add_heading_ids, author_box, card_title, disclosure_block, ensure_affiliate_tag, esc,
    extract_feature, render_collage, render_layout, thousands, CollageContext, PageMeta,
    SiteContext,
};
use crate::group::PageBuild;
use crate::variation::body::{top_budget_premium, ArticleCopy, GUIDE_FACTORS, TYPICAL_LIFESPAN};
use crate::variation::{clean_keyword, display_keyword, PLACEHOLDER_IMAGE};

const REL_OUTBOUND: &str = "nofollow sponsored noopener";
const REVIEWS_FRAGMENT: &str = "#:~:text=Top%20reviews%20from%20the%20United%20States";

const FIXED_GUIDE: [(&str, &str); 3] = [
    (
        "Build Quality and Durability",
        "Regardless of category, durability matters. Look for reliable construction quality and long term buyer feedback.",
    ),
    (
        "Ease of Use and Comfort",
        "Choose a product that matches your experience level and routine. Complex features are not always necessary.",
    ),
    (
        "Warranty and Brand Trust",
        "Reliable brands usually provide better support, clear documentation, and stronger return policy confidence.",
    ),
];

fn outbound(href: &str, class: &str, inner: &str) -> String {
    format!(
        "<a href='{}' target='_blank' rel='{REL_OUTBOUND}' class='{class}'>{inner}</a>",
        esc(href)
    )
}

/// Article body: intro, comparison table, reviews, guide, mistakes, FAQ and
/// verdict. Heading ids are not yet assigned.
pub fn article_body(build: &PageBuild, copy: &ArticleCopy, tag: &str, year: i32) -> String {
    let kw_title = display_keyword(&build.keyword);
    let products = build.products();
    let urls: Vec<String> = products
        .iter()
        .map(|p| ensure_affiliate_tag(&p.product_url, tag))
        .collect();
    let mut html = String::from("<div class='affiliate-container'>");

    for p in &copy.intro {
        let _ = write!(html, "<p>{}</p>", esc(p));
    }

    let _ = write!(
        html,
        "<h2>Top {} Best {} {year}</h2><div class='table-scroll'><table class='compare-table'>\
         <thead><tr><th class='col-rank'>#</th><th>Product</th><th class='col-feature'>Feature</th>\
         <th class='col-action'>Action</th></tr></thead><tbody>",
        products.len(),
        esc(&kw_title)
    );
    for (i, (p, review)) in products.iter().zip(&copy.reviews).enumerate() {
        let _ = write!(
            html,
            "<tr><td class='col-rank'>{}</td><td class='col-product'>{}</td>\
             <td class='col-feature'>{}</td><td class='col-action'>{}</td></tr>",
            i + 1,
            outbound(&urls[i], "table-link", &esc(&review.title)),
            esc(&extract_feature(&p.product_name)),
            outbound(&urls[i], "table-btn", "Check Price"),
        );
    }
    html.push_str("</tbody></table></div>");

    let _ = write!(
        html,
        "<h2>Detailed Product Reviews of Best {}</h2>{}",
        esc(&kw_title),
        render_collage(build, CollageContext::Article)
    );
    for (i, (p, review)) in products.iter().zip(&copy.reviews).enumerate() {
        let url = &urls[i];
        let specs = [
            extract_feature(&p.product_name),
            format!("Average rating: {:.1}/5", p.rating),
            format!("Review count: {}", thousands(p.review_count)),
            format!("Best for: {}", review.role),
        ];
        let list = |items: &[String], mark: &str| {
            items
                .iter()
                .map(|x| format!("<li>{mark} {}</li>", esc(x)))
                .collect::<String>()
        };
        let image = if p.image_url.trim().is_empty() {
            PLACEHOLDER_IMAGE
        } else {
            p.image_url.as_str()
        };
        let _ = write!(
            html,
            "<div class='review-block'>\
             <h3>{n}. {title_link}</h3>\
             <div class='review-media'>{image_link}\
             <div class='amz-dual-btn-container'>{reviews_btn}{buy_btn}</div></div>\
             <div class='spec-box'><h4>Key Specifications</h4><ul>{specs}</ul></div>\
             <p class='review-summary'>{summary}</p>\
             <div class='amz-pros-cons-grid'>\
             <div class='amz-pros-cons-col pros'><h4>What We Like</h4><ul>{pros}</ul></div>\
             <div class='amz-pros-cons-col cons'><h4>Flaws</h4><ul>{cons}</ul></div></div>\
             <div class='review-cta'>{cta}</div></div>",
            n = i + 1,
            title_link = outbound(
                url,
                "review-title",
                &format!("{} - {}", esc(&review.title), esc(&review.role))
            ),
            image_link = outbound(
                url,
                "review-image",
                &format!("<img src='{}' alt='{}' loading='lazy'>", esc(image), esc(&review.title))
            ),
            reviews_btn = outbound(&format!("{url}{REVIEWS_FRAGMENT}"), "amz-user-review-btn", "Read User Reviews"),
            buy_btn = outbound(url, "amz-buy-btn", "View on Amazon"),
            specs = list(&specs[..], "*"),
            summary = esc(&review.summary),
            pros = list(&review.pros[..], "+"),
            cons = list(&review.cons[..], "-"),
            cta = outbound(url, "amz-buy-btn", "Buy on Amazon"),
        );
    }

    html.push_str("<h2>Buying Guide</h2>");
    for (factor, text) in GUIDE_FACTORS.iter().zip(&copy.guide) {
        let _ = write!(html, "<h3 class='guide-factor'>{}</h3><p>{}</p>", esc(factor), esc(text));
    }
    for (factor, text) in FIXED_GUIDE {
        let _ = write!(html, "<h3 class='guide-factor'>{factor}</h3><p>{text}</p>");
    }

    let _ = write!(
        html,
        "<h3>Common Mistakes When Buying {}</h3><ul class='mistakes'>",
        esc(&kw_title)
    );
    for m in &copy.mistakes {
        let _ = write!(html, "<li>{}</li>", esc(m));
    }
    html.push_str("</ul>");

    let [top, _, _] = top_budget_premium(build);
    let _ = write!(
        html,
        "<h2>Frequently Asked Questions</h2>\
         <h3>Q1: Which option is best for everyday use?</h3>\
         <p>A: It depends on your priorities, but {} is usually a safe choice for balanced quality and reliability.</p>\
         <h3>Q2: Are expensive options worth it?</h3><p>A: {}</p>\
         <h3>Q3: How long do products in this category usually last?</h3>\
         <p>A: Lifespan depends on quality, usage, and maintenance. A practical range is {}.</p>\
         <h3>Q4: What should I avoid before buying?</h3><p>A: {}</p>",
        esc(&top),
        esc(&copy.faq_premium),
        esc(TYPICAL_LIFESPAN),
        esc(&copy.faq_avoid)
    );

    html.push_str("<h2>Final Verdict</h2>");
    for v in &copy.verdict {
        let _ = write!(html, "<p>{}</p>", esc(v));
    }
    html.push_str("<p>Choose based on your needs, not only on price.</p>");
    let first = &products[0];
    let first_image = if first.image_url.trim().is_empty() {
        PLACEHOLDER_IMAGE
    } else {
        first.image_url.as_str()
    };
    let top_card = format!(
        "<div class='top-pick-card'><h3>Top Recommendation</h3>\
         <img src='{}' width='220' alt='{}'><p class='top-pick-name'>{}</p>\
         <span class='top-pick-btn'>Check Price on Amazon</span></div>",
        esc(first_image),
        esc(&top),
        esc(&top)
    );
    html.push_str(&outbound(&urls[0], "top-pick-link", &top_card));
    html.push_str("</div>");
    html
}

/// "Related Guides" section; empty when there are no neighbors.
pub fn related_section(related: &[&PageBuild]) -> String {
    if related.is_empty() {
        return String::new();
    }
    let cards: String = related
        .iter()
        .map(|b| {
            format!(
                "<a class='related-item' href='{}'>{}<div class='article-card-content'><h3>{}</h3></div></a>",
                esc(&b.file_name()),
                render_collage(b, CollageContext::Card),
                esc(&card_title(b))
            )
        })
        .collect();
    format!("<section class='related-card'><h2>Related Guides</h2><div class='related-grid'>{cards}</div></section>")
}

/// Complete article document.
pub fn render_article(
    ctx: &SiteContext<'_>,
    build: &PageBuild,
    copy: &ArticleCopy,
    tag: &str,
    related: &[&PageBuild],
) -> String {
    let site = ctx.site;
    let year = ctx.year();
    let kw = clean_keyword(&build.keyword);
    let kw_title = display_keyword(&build.keyword);
    let h1 = format!("Best {kw_title} in {year} - Top Picks and Complete Buying Guide");
    let updated_human = ctx.now.format("%B %d, %Y").to_string();
    let updated_iso = ctx.now.format("%Y-%m-%dT%H:%M:%SZ").to_string();
    let path = build.file_name();

    let primary = build.collage().primary_image.trim();
    let feature_image = if primary.starts_with("http://") || primary.starts_with("https://") {
        primary.to_string()
    } else if primary.is_empty() {
        site.absolute_url(PLACEHOLDER_IMAGE)
    } else {
        site.absolute_url(primary)
    };

    let body = add_heading_ids(&article_body(build, copy, tag, year));
    let main_html = format!(
        "<article class='article-card'>\
         <nav class='breadcrumb'><a href='index.html'>Home</a><span>/</span><span>{crumb}</span></nav>\
         <h1>{h1}</h1>\
         <p class='meta-line'>Last updated: {updated} | Reviewed by {author}</p>\
         {disclosure}<div class='article-body'>{body}</div>{author_box}{related}\
         <p class='micro-note'>{footer_note}</p></article>",
        crumb = esc(&kw_title),
        h1 = esc(&h1),
        updated = esc(&updated_human),
        author = esc(&site.author_name),
        disclosure = disclosure_block(),
        author_box = author_box(site),
        related = related_section(related),
        footer_note = ctx.copy_text("article_footer_note"),
    );

    let url = site.absolute_url(&path);
    let picks = top_budget_premium(build);
    let schema = article_schema(
        site,
        &ArticleSchema {
            headline: &h1,
            description: &copy.meta_description,
            url: &url,
            updated_iso: &updated_iso,
            image_url: &feature_image,
            keyword: &kw,
            picks: &picks,
        },
    );

    render_layout(
        ctx,
        &PageMeta {
            title: &copy.meta_title,
            description: &copy.meta_description,
            path: &path,
            schema,
            og_image: Some(feature_image.clone()),
            noindex: false,
        },
        &main_html,
    )
}
