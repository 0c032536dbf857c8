// src/related.rs
//! Relatedness graph: each page links to the pages whose keywords share the
//! most tokens with its own.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use once_cell::sync::OnceCell;
use regex::Regex;

use crate::group::PageBuild;
use crate::ingest::norm;

const STOP_TOKENS: &[&str] = &[
    "for", "the", "and", "with", "best", "top", "guide", "in", "to", "of",
];

/// slug → neighbor slugs, best first.
pub type RelatednessMap = BTreeMap<String, Vec<String>>;

/// Meaningful keyword tokens: `[a-z0-9]+` runs longer than two characters
/// that are not stop words.
pub fn keyword_tokens(keyword: &str) -> BTreeSet<String> {
    static RE_TOKEN: OnceCell<Regex> = OnceCell::new();
    let re = RE_TOKEN.get_or_init(|| Regex::new(r"[a-z0-9]+").expect("token regex"));
    re.find_iter(&norm(keyword))
        .map(|m| m.as_str())
        .filter(|t| t.len() > 2 && !STOP_TOKENS.contains(t))
        .map(str::to_string)
        .collect()
}

/// Top-`k` neighbors per page by shared-token count, ties broken by slug.
/// Pages without any overlap fall back to the first `k` other pages in build
/// order.
pub fn build_related_map(builds: &[PageBuild], k: usize) -> RelatednessMap {
    let k = k.max(1);
    let tokens: Vec<BTreeSet<String>> = builds.iter().map(|b| keyword_tokens(&b.keyword)).collect();

    let mut index: HashMap<&str, Vec<usize>> = HashMap::new();
    for (i, toks) in tokens.iter().enumerate() {
        for t in toks {
            index.entry(t.as_str()).or_default().push(i);
        }
    }

    let mut out = RelatednessMap::new();
    for (i, build) in builds.iter().enumerate() {
        // Counting postings per candidate equals |A ∩ B| because each token
        // appears at most once per page.
        let mut scores: HashMap<usize, usize> = HashMap::new();
        for t in &tokens[i] {
            for &j in &index[t.as_str()] {
                if j != i {
                    *scores.entry(j).or_insert(0) += 1;
                }
            }
        }

        let neighbors: Vec<String> = if scores.is_empty() {
            builds
                .iter()
                .enumerate()
                .filter(|&(j, _)| j != i)
                .take(k)
                .map(|(_, b)| b.slug.clone())
                .collect()
        } else {
            let mut ranked: Vec<(usize, &str)> = scores
                .into_iter()
                .map(|(j, s)| (s, builds[j].slug.as_str()))
                .collect();
            ranked.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(b.1)));
            ranked.into_iter().take(k).map(|(_, s)| s.to_string()).collect()
        };
        out.insert(build.slug.clone(), neighbors);
    }

    tracing::debug!(pages = builds.len(), k, "relatedness map built");
    out
}

/// Neighbors of `slug` resolved to builds and ordered by slug for display.
pub fn related_for<'a>(
    slug: &str,
    map: &RelatednessMap,
    by_slug: &HashMap<&str, &'a PageBuild>,
) -> Vec<&'a PageBuild> {
    let mut items: Vec<&PageBuild> = map
        .get(slug)
        .map(|ns| ns.iter().filter_map(|s| by_slug.get(s.as_str()).copied()).collect())
        .unwrap_or_default();
    items.sort_by(|a, b| a.slug.cmp(&b.slug));
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::types::ProductRecord;

    fn page(keyword: &str) -> PageBuild {
        let products = (0..3)
            .map(|i| ProductRecord {
                keyword: keyword.into(),
                product_name: format!("P{i}"),
                product_url: format!("https://shop.test/{i}"),
                image_url: String::new(),
                rating: 4.0,
                review_count: 1,
                rank_for_keyword: i + 1,
                final_score: 0.0,
            })
            .collect();
        PageBuild::new(keyword.into(), crate::slug::slugify(keyword), products).unwrap()
    }

    #[test]
    fn tokens_drop_stop_words_and_short_runs() {
        let t = keyword_tokens("Best Wool Socks for Men & Women, XL");
        let got: Vec<&str> = t.iter().map(String::as_str).collect();
        assert_eq!(got, vec!["men", "socks", "women", "wool"]);
    }

    #[test]
    fn overlap_ranks_then_slug_breaks_ties() {
        let builds = vec![
            page("wool hiking socks"),
            page("wool socks"),
            page("hiking socks"),
            page("cotton socks"),
            page("desk lamps"),
        ];
        let map = build_related_map(&builds, 2);
        assert_eq!(map["wool-hiking-socks"], vec!["hiking-socks", "wool-socks"]);
        assert_eq!(map["wool-socks"], vec!["wool-hiking-socks", "cotton-socks"]);
        assert_eq!(map["cotton-socks"], vec!["hiking-socks", "wool-hiking-socks"]);
    }

    #[test]
    fn no_overlap_falls_back_to_build_order() {
        let builds = vec![page("desk lamps"), page("wool socks"), page("garden hose")];
        let map = build_related_map(&builds, 5);
        assert_eq!(map["wool-socks"], vec!["desk-lamps", "garden-hose"]);
        assert!(!map["desk-lamps"].contains(&"desk-lamps".to_string()));
    }

    #[test]
    fn zero_k_is_clamped_to_one() {
        let builds = vec![page("wool socks"), page("cotton socks")];
        let map = build_related_map(&builds, 0);
        assert_eq!(map["wool-socks"].len(), 1);
    }

    #[test]
    fn display_order_is_by_slug() {
        let builds = vec![page("wool hiking socks"), page("wool socks"), page("hiking socks")];
        let map = build_related_map(&builds, 2);
        let by_slug: HashMap<&str, &PageBuild> = builds.iter().map(|b| (b.slug.as_str(), b)).collect();
        let shown: Vec<&str> = related_for("wool-socks", &map, &by_slug)
            .iter()
            .map(|b| b.slug.as_str())
            .collect();
        assert_eq!(shown, vec!["hiking-socks", "wool-hiking-socks"]);
    }
}
