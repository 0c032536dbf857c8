// tests/pagination.rs
use guidepress::group::PageBuild;
use guidepress::ingest::types::ProductRecord;
use guidepress::paginate::{chunked, plan_listing};
use guidepress::slug::SlugRegistry;

fn builds(n: usize) -> Vec<PageBuild> {
    let mut registry = SlugRegistry::new();
    (0..n)
        .map(|i| {
            let keyword = format!("gadget {i:04}");
            let products = (0..3)
                .map(|j| ProductRecord {
                    keyword: keyword.clone(),
                    product_name: format!("Item {j}"),
                    product_url: format!("https://shop.test/{i}/{j}"),
                    image_url: String::new(),
                    rating: 4.0,
                    review_count: 1,
                    rank_for_keyword: j + 1,
                    final_score: 0.0,
                })
                .collect();
            let slug = registry.assign(&keyword);
            PageBuild::new(keyword, slug, products).unwrap()
        })
        .collect()
}

#[test]
fn page_count_is_ceiling_and_nothing_is_lost() {
    for (n, size, pages) in [(1, 50, 1), (50, 50, 1), (51, 50, 2), (500, 50, 10), (1234, 500, 3)] {
        let all = builds(n);
        let plan = plan_listing(&all, size);
        assert_eq!(plan.len(), pages, "n={n} size={size}");
        let total: usize = plan.iter().map(|p| p.items.len()).sum();
        assert_eq!(total, n);
        assert!(plan[..plan.len() - 1].iter().all(|p| p.items.len() == size));
    }
}

#[test]
fn navigation_links_chain_pages() {
    let all = builds(120);
    let plan = plan_listing(&all, 50);
    assert_eq!(plan[0].file_name, "all-guides.html");
    assert_eq!(plan[0].prev, None);
    assert_eq!(plan[0].next.as_deref(), Some("all-guides-2.html"));
    assert_eq!(plan[1].prev.as_deref(), Some("all-guides.html"));
    assert_eq!(plan[2].file_name, "all-guides-3.html");
    assert_eq!(plan[2].next, None);
    assert!(plan.iter().all(|p| p.total == 3));
}

#[test]
fn chunking_preserves_order() {
    let items: Vec<usize> = (0..25_000).collect();
    let flat: Vec<usize> = chunked(&items, 10_000).flatten().copied().collect();
    assert_eq!(flat, items);
}
