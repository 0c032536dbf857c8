//! Input grouping: bucket rows by keyword, rank and dedupe candidates, and
//! turn every qualifying keyword into a [`PageBuild`].

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashSet};

use crate::ingest::norm;
use crate::ingest::types::ProductRecord;
use crate::slug::SlugRegistry;
use crate::variation::Collage;

/// A comparison article is never produced from fewer items than this.
pub const MIN_PRODUCTS: usize = 3;

/// Working state of one generated article.
#[derive(Debug, Clone)]
pub struct PageBuild {
    pub keyword: String,
    pub slug: String,
    products: Vec<ProductRecord>,
    pub(crate) collage: Collage,
}

impl PageBuild {
    /// `None` when fewer than [`MIN_PRODUCTS`] products are given.
    pub fn new(keyword: String, slug: String, products: Vec<ProductRecord>) -> Option<Self> {
        if products.len() < MIN_PRODUCTS {
            return None;
        }
        Some(Self {
            keyword,
            slug,
            products,
            collage: Collage::default(),
        })
    }

    pub fn products(&self) -> &[ProductRecord] {
        &self.products
    }

    pub fn collage(&self) -> &Collage {
        &self.collage
    }

    pub fn file_name(&self) -> String {
        format!("{}.html", self.slug)
    }
}

/// Short display title: the part before the first separator when it is long
/// enough, otherwise the first 14 words.
pub fn short_title(title: &str) -> String {
    let title = title.split_whitespace().collect::<Vec<_>>().join(" ");
    for sep in ["|", " - ", ":", ";"] {
        if let Some((left, _)) = title.split_once(sep) {
            let left = left.trim();
            if left.chars().count() >= 3 {
                return left.to_string();
            }
        }
    }
    title.split(' ').take(14).collect::<Vec<_>>().join(" ")
}

/// Rank asc (invalid last), then score, rating and review count desc.
fn candidate_order(a: &ProductRecord, b: &ProductRecord) -> Ordering {
    a.effective_rank()
        .cmp(&b.effective_rank())
        .then_with(|| b.final_score.total_cmp(&a.final_score))
        .then_with(|| b.rating.total_cmp(&a.rating))
        .then_with(|| b.review_count.cmp(&a.review_count))
}

/// Pick up to `top_n` distinct candidates in ranking order.
pub fn pick_products(products: &[ProductRecord], top_n: usize) -> Vec<ProductRecord> {
    let mut ordered: Vec<&ProductRecord> = products.iter().collect();
    ordered.sort_by(|a, b| candidate_order(a, b));

    let mut seen: HashSet<String> = HashSet::new();
    let mut out = Vec::with_capacity(top_n.min(ordered.len()));
    for p in ordered {
        if out.len() >= top_n {
            break;
        }
        if !seen.insert(norm(&short_title(&p.product_name))) {
            continue;
        }
        out.push(p.clone());
    }
    out
}

/// Bucket rows by keyword, keeping only rows with keyword, name and URL.
pub fn group_by_keyword(records: Vec<ProductRecord>) -> BTreeMap<String, Vec<ProductRecord>> {
    let mut grouped: BTreeMap<String, Vec<ProductRecord>> = BTreeMap::new();
    for r in records {
        if r.keyword.trim().is_empty()
            || r.product_name.trim().is_empty()
            || r.product_url.trim().is_empty()
        {
            continue;
        }
        grouped.entry(r.keyword.clone()).or_default().push(r);
    }
    grouped
}

/// One build per qualifying keyword, in normalized-keyword order. Slugs are
/// handed out by `registry`; skipped keywords never consume a slug.
///
/// `only_keywords` restricts generation to those keywords (compared
/// normalized) when non-empty.
pub fn build_pages(
    grouped: &BTreeMap<String, Vec<ProductRecord>>,
    top_n: usize,
    only_keywords: &[String],
    registry: &mut SlugRegistry,
) -> Vec<PageBuild> {
    let wanted: HashSet<String> = only_keywords
        .iter()
        .map(|k| norm(k))
        .filter(|k| !k.is_empty())
        .collect();

    let mut keys: Vec<(&String, String)> = grouped.keys().map(|k| (k, norm(k))).collect();
    // BTreeMap iteration already orders raw keywords, so the stable sort keeps
    // that as the tie-break.
    keys.sort_by(|a, b| a.1.cmp(&b.1));

    let top_n = top_n.max(MIN_PRODUCTS);
    let mut builds = Vec::new();
    for (keyword, normalized) in keys {
        if !wanted.is_empty() && !wanted.contains(&normalized) {
            continue;
        }
        let picks = pick_products(&grouped[keyword], top_n);
        if picks.len() < MIN_PRODUCTS {
            tracing::debug!(keyword = %keyword, distinct = picks.len(), "keyword skipped");
            metrics::counter!(crate::telemetry::KEYWORDS_SKIPPED).increment(1);
            continue;
        }
        let slug = registry.assign(keyword);
        if let Some(build) = PageBuild::new(keyword.clone(), slug, picks) {
            builds.push(build);
        }
    }
    builds
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(kw: &str, name: &str, rank: i64, score: f64) -> ProductRecord {
        ProductRecord {
            keyword: kw.into(),
            product_name: name.into(),
            product_url: format!("https://shop.test/{}", name.replace(' ', "-")),
            image_url: String::new(),
            rating: 4.0,
            review_count: 10,
            rank_for_keyword: rank,
            final_score: score,
        }
    }

    #[test]
    fn short_title_prefers_left_of_separator() {
        assert_eq!(short_title("Acme Sock | Wool, 6 pack"), "Acme Sock");
        assert_eq!(short_title("AB: long tail words"), "AB: long tail words");
        let long = (1..=20).map(|i| format!("w{i}")).collect::<Vec<_>>().join(" ");
        assert_eq!(short_title(&long).split(' ').count(), 14);
    }

    #[test]
    fn invalid_rank_sorts_last_then_score_breaks_ties() {
        let items = vec![
            rec("socks", "Unranked", 0, 99.0),
            rec("socks", "Second", 2, 1.0),
            rec("socks", "First Low", 1, 0.5),
            rec("socks", "First High", 1, 0.9),
        ];
        let names: Vec<_> = pick_products(&items, 10)
            .into_iter()
            .map(|p| p.product_name)
            .collect();
        assert_eq!(names, vec!["First High", "First Low", "Second", "Unranked"]);
    }

    #[test]
    fn duplicates_by_short_title_keep_first() {
        let items = vec![
            rec("socks", "Acme Sock | red", 1, 1.0),
            rec("socks", "ACME  sock | blue", 2, 1.0),
            rec("socks", "Other Sock", 3, 1.0),
        ];
        let picks = pick_products(&items, 10);
        assert_eq!(picks.len(), 2);
        assert_eq!(picks[0].product_name, "Acme Sock | red");
    }

    #[test]
    fn groups_under_three_are_skipped() {
        let records = vec![
            rec("hats", "A", 1, 1.0),
            rec("hats", "B", 2, 1.0),
            rec("socks", "A", 1, 1.0),
            rec("socks", "B", 2, 1.0),
            rec("socks", "C", 3, 1.0),
        ];
        let grouped = group_by_keyword(records);
        let mut reg = SlugRegistry::new();
        let builds = build_pages(&grouped, 10, &[], &mut reg);
        assert_eq!(builds.len(), 1);
        assert_eq!(builds[0].slug, "socks");
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn keyword_filter_is_normalized() {
        let mut records = Vec::new();
        for kw in ["Wool Socks", "hats"] {
            for n in ["A", "B", "C"] {
                records.push(rec(kw, n, 1, 1.0));
            }
        }
        let grouped = group_by_keyword(records);
        let mut reg = SlugRegistry::new();
        let builds = build_pages(&grouped, 10, &["  wool   SOCKS ".to_string()], &mut reg);
        assert_eq!(builds.len(), 1);
        assert_eq!(builds[0].keyword, "Wool Socks");
    }

    #[test]
    fn top_n_caps_selection() {
        let items: Vec<_> = (1..=8).map(|i| rec("socks", &format!("P{i}"), i, 1.0)).collect();
        assert_eq!(pick_products(&items, 5).len(), 5);
        let grouped = group_by_keyword(items);
        let builds = build_pages(&grouped, 1, &[], &mut SlugRegistry::new());
        assert_eq!(builds[0].products().len(), MIN_PRODUCTS);
    }
}
