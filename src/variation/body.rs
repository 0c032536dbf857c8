// src/variation/body.rs
//! Article copy drawn from the per-keyword body stream.

use rand::Rng;

use super::bank::{pick, pick_many, TemplateCategory as T};
use super::{clean_keyword, title_case};
use crate::group::{short_title, PageBuild};

pub const USE_CASES: [&str; 3] = ["everyday use", "value-focused buying", "advanced needs"];

pub const GUIDE_FACTORS: [&str; 3] = [
    "Performance and Product Fit",
    "Value and Feature Balance",
    "Ease of Use and Support",
];

pub const TYPICAL_LIFESPAN: &str =
    "from a few months to several years, depending on product type and usage";

/// Copy for one product review block.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewCopy {
    pub title: String,
    pub role: String,
    pub summary: String,
    pub pros: Vec<String>,
    pub cons: Vec<String>,
}

/// Everything textual an article needs besides fixed markup.
#[derive(Debug, Clone, PartialEq)]
pub struct ArticleCopy {
    pub meta_title: String,
    pub meta_description: String,
    pub intro: Vec<String>,
    pub reviews: Vec<ReviewCopy>,
    pub guide: Vec<String>,
    pub mistakes: Vec<String>,
    pub faq_premium: String,
    pub faq_avoid: String,
    pub verdict: Vec<String>,
}

/// Role label by 0-based list position.
pub fn role_for(index: usize) -> String {
    match index {
        0 => "Best Overall".to_string(),
        1 => "Best Budget".to_string(),
        2 => "Best Premium".to_string(),
        3 => format!("Best for {}", USE_CASES[0]),
        4 => "Best Alternative".to_string(),
        n => format!("Top Pick #{}", n + 1),
    }
}

fn benefit_for(role: &str) -> &'static str {
    let role = role.to_lowercase();
    if role.contains("overall") {
        "overall reliability"
    } else if role.contains("budget") {
        "value for money"
    } else if role.contains("premium") {
        "advanced performance"
    } else {
        "everyday usability"
    }
}

/// Draw the article copy. The draw order is fixed so a given stream always
/// yields the same text.
pub fn article_copy<R: Rng + ?Sized>(build: &PageBuild, year: i32, rng: &mut R) -> ArticleCopy {
    let kw = clean_keyword(&build.keyword);
    let kw_title = title_case(&kw);
    let year = year.to_string();

    let meta_title = pick(T::MetaTitle, rng, &[("k", &kw_title), ("y", &year)]);
    let meta_description = pick(T::MetaDescription, rng, &[("k", &kw)]);
    let intro = vec![
        pick(T::IntroOpen, rng, &[("k", &kw)]),
        pick(T::IntroMid, rng, &[]),
        pick(
            T::IntroClose,
            rng,
            &[("u1", USE_CASES[0]), ("u2", USE_CASES[1]), ("u3", USE_CASES[2])],
        ),
    ];

    let mut reviews = Vec::with_capacity(build.products().len());
    for (i, p) in build.products().iter().enumerate() {
        let title = short_title(&p.product_name);
        let role = role_for(i);
        let summary = format!(
            "{} {}",
            pick(T::SummaryOpen, rng, &[("p", &title), ("b", benefit_for(&role))]),
            pick(T::SummaryClose, rng, &[])
        );

        let mut pros_pool: Vec<&str> = T::Pros.variants().to_vec();
        pros_pool.push(if p.rating >= 4.5 {
            "High rating consistency indicates broad buyer satisfaction over time."
        } else {
            "Rating profile remains competitive for value-focused buyers."
        });
        pros_pool.push(if p.review_count >= 1000 {
            "Large review volume improves confidence in overall product consistency."
        } else {
            "Early review signals are positive, though long-term data is still growing."
        });
        let pros = pick_many(rng, &pros_pool, 3);
        let cons = pick_many(rng, T::Cons.variants(), 2);

        reviews.push(ReviewCopy {
            title,
            role,
            summary,
            pros,
            cons,
        });
    }

    let guide = [T::GuideCore, T::GuideValue, T::GuideFeatures]
        .into_iter()
        .map(|c| pick(c, rng, &[]))
        .collect();
    let mistakes = [
        T::MistakePrice,
        T::MistakeFit,
        T::MistakeReviews,
        T::MistakeType,
        T::MistakeOverpay,
    ]
    .into_iter()
    .map(|c| pick(c, rng, &[]))
    .collect();
    let faq_premium = pick(T::FaqPremium, rng, &[]);
    let faq_avoid = pick(T::FaqAvoid, rng, &[]);

    let picks = top_budget_premium(build);
    let verdict = vec![
        pick(T::VerdictOverall, rng, &[("top", &picks[0])]),
        pick(T::VerdictBudget, rng, &[("budget", &picks[1])]),
        pick(T::VerdictPremium, rng, &[("premium", &picks[2])]),
    ];

    ArticleCopy {
        meta_title,
        meta_description,
        intro,
        reviews,
        guide,
        mistakes,
        faq_premium,
        faq_avoid,
        verdict,
    }
}

/// Short titles of the overall, budget and premium picks (positions 0, 1, 2,
/// falling back to the first product).
pub fn top_budget_premium(build: &PageBuild) -> [String; 3] {
    let products = build.products();
    let at = |i: usize| short_title(&products.get(i).unwrap_or(&products[0]).product_name);
    [at(0), at(1), at(2)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::types::ProductRecord;
    use crate::variation::body_rng;

    fn socks() -> PageBuild {
        let products = ["Acme Wool | 6 pack", "Budget Sock", "Luxe Sock", "Trail Sock"]
            .iter()
            .enumerate()
            .map(|(i, n)| ProductRecord {
                keyword: "best wool socks".into(),
                product_name: n.to_string(),
                product_url: format!("https://shop.test/{i}"),
                image_url: String::new(),
                rating: 4.6,
                review_count: 2000,
                rank_for_keyword: i as i64 + 1,
                final_score: 1.0,
            })
            .collect();
        PageBuild::new("best wool socks".into(), "best-wool-socks".into(), products).unwrap()
    }

    #[test]
    fn roles_follow_position() {
        assert_eq!(role_for(0), "Best Overall");
        assert_eq!(role_for(3), "Best for everyday use");
        assert_eq!(role_for(7), "Top Pick #8");
    }

    #[test]
    fn copy_is_reproducible_per_keyword_stream() {
        let b = socks();
        let a = article_copy(&b, 2025, &mut body_rng("s", &b.keyword));
        let c = article_copy(&b, 2025, &mut body_rng("s", &b.keyword));
        assert_eq!(a, c);
        assert_eq!(a.reviews.len(), 4);
        assert!(a.reviews.iter().all(|r| r.pros.len() == 3 && r.cons.len() == 2));
        assert_eq!(a.mistakes.len(), 5);
        assert!(a.meta_title.contains("Wool Socks"));
        assert!(a.verdict[0].contains("Acme Wool"));
    }

    #[test]
    fn picks_fall_back_to_first() {
        let b = socks();
        let [top, budget, premium] = top_budget_premium(&b);
        assert_eq!(top, "Acme Wool");
        assert_eq!(budget, "Budget Sock");
        assert_eq!(premium, "Luxe Sock");
    }
}
