// src/paginate.rs
//! Fixed-size chunking and the "all guides" listing page plan.

use crate::group::PageBuild;
use crate::ingest::norm;

pub const LISTING_BASE: &str = "all-guides";

/// Consecutive chunks of at most `size` items (size clamped to ≥ 1). Order is
/// preserved; only the last chunk may be short.
pub fn chunked<T>(items: &[T], size: usize) -> std::slice::Chunks<'_, T> {
    items.chunks(size.max(1))
}

/// File name of listing page `number` (1-based).
pub fn listing_file_name(number: usize) -> String {
    if number <= 1 {
        format!("{LISTING_BASE}.html")
    } else {
        format!("{LISTING_BASE}-{number}.html")
    }
}

/// One listing page: its builds plus navigation.
#[derive(Debug, Clone)]
pub struct ListingPage<'a> {
    pub number: usize,
    pub total: usize,
    pub file_name: String,
    pub prev: Option<String>,
    pub next: Option<String>,
    pub items: Vec<&'a PageBuild>,
}

/// Split builds, ordered by normalized keyword, into listing pages of
/// `page_size`. Always yields at least one page so the listing link never
/// dangles.
pub fn plan_listing(builds: &[PageBuild], page_size: usize) -> Vec<ListingPage<'_>> {
    let mut ordered: Vec<&PageBuild> = builds.iter().collect();
    ordered.sort_by_cached_key(|b| norm(&b.keyword));

    let chunks: Vec<&[&PageBuild]> = if ordered.is_empty() {
        vec![&[]]
    } else {
        chunked(&ordered, page_size).collect()
    };
    let total = chunks.len();
    chunks
        .into_iter()
        .enumerate()
        .map(|(i, items)| {
            let number = i + 1;
            ListingPage {
                number,
                total,
                file_name: listing_file_name(number),
                prev: (number > 1).then(|| listing_file_name(number - 1)),
                next: (number < total).then(|| listing_file_name(number + 1)),
                items: items.to_vec(),
            }
        })
        .collect()
}
