// src/render/listing.rs
use super::{card_title, esc, render_collage, render_layout, CollageContext, PageMeta, SiteContext};
use crate::paginate::ListingPage;
use crate::variation::display_keyword;

fn pager(page: &ListingPage<'_>) -> String {
    let prev = match &page.prev {
        Some(href) => format!("<a class='button secondary' href='{}'>&larr; Previous</a>", esc(href)),
        None => "<span class='button secondary disabled'>&larr; Previous</span>".to_string(),
    };
    let next = match &page.next {
        Some(href) => format!("<a class='button' href='{}'>Next &rarr;</a>", esc(href)),
        None => "<span class='button disabled'>Next &rarr;</span>".to_string(),
    };
    format!(
        "<nav class='pager'>{prev}<span class='pager-status'>Page {} of {}</span>{next}</nav>",
        page.number, page.total
    )
}

pub fn render_listing(ctx: &SiteContext<'_>, page: &ListingPage<'_>) -> String {
    let cta = esc(&ctx.copy_text("guides_card_cta_text"));
    let cards: String = page
        .items
        .iter()
        .map(|b| {
            format!(
                "<a class='article-link-card' href='{href}' data-title='{data}'>{collage}\
                 <div class='article-card-content'><h3>{title}</h3>\
                 <p>Top picks, comparison table and buying guide.</p>\
                 <span class='card-cta'>{cta}</span></div></a>",
                href = esc(&b.file_name()),
                data = esc(&display_keyword(&b.keyword)),
                collage = render_collage(b, CollageContext::Card),
                title = esc(&card_title(b)),
            )
        })
        .collect();
    let body = if cards.is_empty() {
        "<p class='micro-note'>No guides have been published yet.</p>".to_string()
    } else {
        format!("<div class='article-grid'>{cards}</div>")
    };

    let main_html = format!(
        "<section class='content-card'><h1>{heading}</h1><p>{intro}</p>{pager}{body}{pager}</section>",
        heading = ctx.copy_text("guides_index_title"),
        intro = ctx.copy_text("guides_index_intro"),
        pager = pager(page),
    );
    let title = format!("All Guides - Page {} | {}", page.number, ctx.site.site_name);
    let description = format!(
        "Browse all product buying guides on {}. Page {} of {}.",
        ctx.site.site_name, page.number, page.total
    );
    render_layout(
        ctx,
        &PageMeta {
            title: &title,
            description: &description,
            path: &page.file_name,
            ..PageMeta::default()
        },
        &main_html,
    )
}
