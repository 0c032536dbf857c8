// src/variation/bank.rs
//! Text template bank. Every category owns an ordered list of variants with
//! named `{param}` slots; picking is a pure function of (category, rng).

use rand::seq::IndexedRandom;
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateCategory {
    MetaTitle,       // {k} {y}
    MetaDescription, // {k}
    IntroOpen,       // {k}
    IntroMid,
    IntroClose, // {u1} {u2} {u3}
    SummaryOpen, // {p} {b}
    SummaryClose,
    Pros,
    Cons,
    GuideCore,
    GuideValue,
    GuideFeatures,
    MistakePrice,
    MistakeFit,
    MistakeReviews,
    MistakeType,
    MistakeOverpay,
    FaqPremium,
    FaqAvoid,
    VerdictOverall, // {top}
    VerdictBudget,  // {budget}
    VerdictPremium, // {premium}
}

impl TemplateCategory {
    pub fn variants(self) -> &'static [&'static str] {
        match self {
            Self::MetaTitle => &[
                "Best {k} ({y}) - Reviews, Comparison and Buying Guide",
                "Top {k} Picks ({y}) - Detailed Comparison and Buyer Tips",
                "Best {k} in {y} - Top Rated Options and Final Recommendations",
                "{y} Guide: Best {k} for Value, Quality and Practical Use",
                "Top Rated {k} ({y}) - Features, Pros, Cons and Verdict",
                "Best {k} in {y} - Data Driven Comparison for Better Decisions",
                "Best {k} in {y} - What to Buy, What to Skip, and Why",
                "Best {k} ({y}) - Structured Comparison for Real Buyers",
            ],
            Self::MetaDescription => &[
                "Looking for the best {k}? This guide compares top options by ratings, reviews, feature quality, and practical buying value to help you choose confidently.",
                "Need the right {k}? Explore side by side comparisons, in-depth review blocks, and universal buying tips designed for faster and smarter decisions.",
                "Compare high rated {k} options using real product data, buyer feedback signals, and feature relevance so you can shortlist better products quickly.",
                "Shopping for {k}? This page covers top picks, pros and cons, buying mistakes to avoid, and final recommendations based on practical buyer needs.",
                "Use this {k} guide to compare leading options, evaluate tradeoffs, and select the most suitable product based on your priorities and budget.",
                "From overall winners to budget picks, this {k} comparison highlights what matters most before purchase and how to avoid common selection errors.",
            ],
            Self::IntroOpen => &[
                "If you are searching for the best {k}, you likely want something reliable, practical, and worth paying for over the long term.",
                "Choosing the best {k} can feel overwhelming because many products look similar at first glance, even when real performance differs.",
                "Finding the right {k} is easier when you compare measurable quality signals instead of relying only on marketing language.",
                "The {k} category is highly competitive, so using a structured evaluation process helps avoid weak or mismatched choices.",
                "A smart {k} purchase starts by separating feature noise from features that actually matter in everyday use.",
                "When comparing {k}, the safest approach is to focus on product data, buyer confidence, and practical use relevance.",
                "The best {k} is not always the most expensive option; often it is the one with the strongest value-to-performance ratio.",
            ],
            Self::IntroMid => &[
                "In this guide, we evaluate products using rating quality, review confidence, feature relevance, and practical value for typical buyers.",
                "The shortlist below is ranked through measurable signals so your final decision is based on consistency and fit, not guesswork.",
                "Each recommendation is selected through structured comparison of buyer trust indicators, usability factors, and value-for-money strength.",
                "We filtered options using repeatable criteria so you can compare products faster while still keeping decision quality high.",
                "The goal is simple: help you move from a large product list to a clear shortlist that you can trust.",
                "You will find both quick-scan data and detailed review sections so you can decide at the level of depth you prefer.",
            ],
            Self::IntroClose => &[
                "Whether your priority is {u1}, {u2}, or {u3}, the sections below are arranged to reduce confusion and help you move from browsing to a confident final pick.",
                "From {u1} to {u2} and {u3}, this page follows a practical sequence so you can shortlist quickly and still validate details before spending money.",
                "If you are balancing {u1}, {u2}, and {u3}, start with the comparison table and then use the review blocks to confirm real fit before checkout.",
                "Use the quick comparison section for fast shortlist creation, then validate your top candidates with the detailed review sections before making a final commitment.",
                "By the end of this page, you should clearly identify one safe overall choice plus strong alternatives for budget-focused and premium-focused buying situations.",
                "Everything below is designed to reduce decision fatigue while preserving the practical details that matter most for long-term satisfaction after purchase.",
            ],
            Self::SummaryOpen => &[
                "{p} is a strong option if your main priority is {b}, especially when balancing feature quality with practical value.",
                "{p} remains a dependable choice for {b} and is often considered by buyers who want fewer compromises.",
                "{p} looks like a reliable match for {b}, particularly for users who care about consistency over hype.",
                "{p} stands out as a practical pick for {b} with a profile that supports real-world everyday usage.",
                "{p} is commonly shortlisted for {b} because it provides a balanced mix of trust signals and practical features.",
                "{p} can be a smart fit for {b}, especially if you prefer reliable performance with manageable tradeoffs.",
            ],
            Self::SummaryClose => &[
                "The overall package supports confident buying decisions by combining useful features with stable day-to-day usability.",
                "It offers a practical balance of strengths that should work well for most buyers across common usage scenarios.",
                "This option delivers consistent value while keeping tradeoffs manageable, which is important for long-term satisfaction.",
                "For most buyers, this combination of quality signals and feature fit makes it a low-risk shortlist candidate.",
                "This recommendation is especially useful for buyers who want predictable outcomes rather than feature-heavy uncertainty.",
                "As a general-purpose pick, it maintains a healthy balance between what buyers need and what they actually use.",
            ],
            Self::Pros => &[
                "Strong buyer sentiment supports confidence in day-to-day performance across common usage scenarios.",
                "Feature mix is practical and aligned with what most buyers actually need in regular workflows.",
                "Works well for routine usage without requiring a steep learning curve or complex setup process.",
                "Delivers balanced value when quality, usability, and pricing are evaluated together instead of separately.",
                "Suitable for buyers who prefer dependable outcomes over unnecessary complexity or feature overload.",
                "Shows healthy trust signals for users who want a lower-risk purchase with predictable results.",
                "Can fit both first-time buyers and experienced users who need a balanced all-around option.",
                "Positioned as a stable long-term choice rather than a short-term novelty driven by marketing hype.",
                "Provides enough capability for most use cases without adding costly extras that go unused.",
                "Usability profile makes onboarding smoother for buyers with different experience levels.",
                "Reduces decision risk by combining useful feature coverage with consistent buyer confidence signals.",
                "Ownership effort is generally manageable, which helps maintain long-term product satisfaction.",
            ],
            Self::Cons => &[
                "May not include every specialized capability available in niche or premium-tier alternatives.",
                "Performance can vary depending on setup quality, usage intensity, and buyer expectations.",
                "Some buyers may find advanced settings unnecessary if their routine needs are simple.",
                "A higher-end model may offer stronger optimization for specialized or heavy-duty workflows.",
                "Availability, variant selection, or seller-level packaging can change over time.",
                "Best value depends on your priorities, so feature fit should be checked before purchase.",
                "Some users may need a short adjustment period before getting consistent results.",
                "Support and accessory ecosystem can differ by seller, region, and listing version.",
                "Lifespan expectations can vary by usage frequency and operating conditions.",
                "Differences between product generations can affect fit, so version checks are important.",
            ],
            Self::GuideCore => &[
                "Prioritize core performance before bonus features, because reliable baseline output usually matters more than advanced options in long-term ownership.",
                "Start by validating primary function quality, then compare secondary features only among products that already pass core reliability checks.",
                "Do not let feature lists hide poor fundamentals; verify practical results through ratings, review themes, and repeat complaints.",
                "Focus on consistency instead of headline numbers, because predictable results usually drive satisfaction more than peak performance alone.",
                "Filter weak options early using baseline quality signals so you spend time only on realistic shortlist candidates.",
            ],
            Self::GuideValue => &[
                "Match capacity and feature level to your real routine so you avoid paying for specifications you rarely use.",
                "Choose balanced value over the highest numbers, since maximum specs are not always equal to better day-to-day outcomes.",
                "Most buyers get stronger long-term value in the middle tier where price and practical performance are better aligned.",
                "Avoid overpaying for unused features by mapping your use frequency, priority tasks, and budget ceiling first.",
                "Pick value by use-case fit and ownership confidence, not by feature count alone.",
            ],
            Self::GuideFeatures => &[
                "Treat advanced features as optional unless they solve a real recurring problem in your workflow.",
                "Upgrade only when your routine clearly benefits from higher capability, not just because advanced specs are available.",
                "Avoid complexity that does not improve results, because more settings can increase friction without adding value.",
                "Simpler models can offer better practical value when your needs are stable and straightforward.",
                "Do not pay for advanced functions you are unlikely to use consistently over time.",
            ],
            Self::MistakePrice => &[
                "Choosing only by price without checking overall quality and long-term reliability signals.",
                "Buying the cheapest option first without validating core performance for your actual needs.",
                "Ignoring long-term ownership cost, including replacement risk and maintenance effort.",
                "Saving upfront but replacing too early due to poor product fit.",
            ],
            Self::MistakeFit => &[
                "Ignoring compatibility, sizing, or technical constraints that affect real-world usability.",
                "Buying before confirming compatibility with your setup, routine, or usage conditions.",
                "Selecting the wrong variant or version for your intended use case.",
                "Skipping practical fit verification and relying only on listing claims.",
            ],
            Self::MistakeReviews => &[
                "Not checking verified customer feedback for recurring strengths and recurring complaints.",
                "Relying only on photos and marketing copy without deeper buyer evidence.",
                "Reading star ratings only and skipping written reviews with practical context.",
                "Ignoring recent review trends that may reflect product or seller changes.",
            ],
            Self::MistakeType => &[
                "Buying the wrong type for your specific use case and daily usage level.",
                "Selecting a tier that is either too basic or too advanced for your workflow.",
                "Buying based on popularity instead of fit for your own requirements.",
                "Picking based on trends instead of practical performance needs.",
            ],
            Self::MistakeOverpay => &[
                "Overpaying for premium features that will rarely be used in regular routines.",
                "Paying for complexity that increases cost but does not improve outcomes.",
                "Buying premium when a strong mid-range option already covers your priorities.",
                "Choosing premium without a clear return in durability, output, or convenience.",
            ],
            Self::FaqPremium => &[
                "They are worth it when you need advanced capability, heavier usage support, or stronger long-term durability; otherwise a high-quality mid-range option usually offers better value.",
                "Premium models make the most sense for demanding workloads, while many buyers achieve excellent results from well-reviewed mid-tier products.",
                "Choose based on need intensity and expected usage duration, not price category alone.",
                "Paying more helps only when added capability directly improves your routine outcomes.",
                "For a large percentage of buyers, mid-range options deliver the best practical balance of cost and performance.",
            ],
            Self::FaqAvoid => &[
                "Avoid low-rated listings, unclear specifications, weak warranty terms, and marketing claims that are not backed by clear product details.",
                "Skip products with weak review patterns, vague technical information, or inconsistent seller support transparency.",
                "Avoid listings that hide key specifications or provide limited information about return and warranty conditions.",
                "Avoid options that repeatedly show reliability issues across verified customer feedback.",
                "Stay away from listings that show weak buyer trust signals across multiple indicators.",
            ],
            Self::VerdictOverall => &[
                "If you want the safest all-around choice with balanced performance and value, go with {top}.",
                "For most buyers, {top} remains the strongest overall recommendation because it keeps major tradeoffs under control.",
                "Our overall winner is {top}, mainly due to its consistency, buyer confidence signals, and practical day-to-day value.",
                "When you are unsure which option to trust most, {top} is the most balanced pick to start with.",
                "If you need one reliable pick without over-optimizing every detail, {top} is the best front-runner.",
            ],
            Self::VerdictBudget => &[
                "If you are on a budget, {budget} offers excellent value while keeping core quality signals competitive.",
                "For value-focused buyers, {budget} is the strongest budget direction without sacrificing key functionality.",
                "When cost control is the main goal, shortlist {budget} first and compare from that benchmark.",
                "On tighter budgets, {budget} delivers strong value per dollar for typical everyday requirements.",
                "Value seekers can confidently shortlist {budget} when they need practical results without premium pricing.",
            ],
            Self::VerdictPremium => &[
                "For premium performance and advanced feature depth, {premium} is the strongest high-end option on this page.",
                "If you need higher-end capability for demanding use, choose {premium} as the premium-focused recommendation.",
                "At the high end of this comparison, {premium} stands out for buyers with more demanding expectations.",
                "If you want a premium model with stronger capability signals, {premium} is the best candidate here.",
                "Users who need high-end outcomes and feature depth will likely prefer {premium}.",
            ],
        }
    }
}

/// Replace `{name}` slots. Unknown slots are left as-is.
pub fn fill(template: &str, params: &[(&str, &str)]) -> String {
    let mut out = template.to_string();
    for (name, value) in params {
        out = out.replace(&format!("{{{name}}}"), value);
    }
    out
}

/// Pick one variant of `category` and fill its slots.
pub fn pick<R: Rng + ?Sized>(
    category: TemplateCategory,
    rng: &mut R,
    params: &[(&str, &str)],
) -> String {
    let template = category.variants().choose(rng).copied().unwrap_or_default();
    fill(template, params)
}

/// Sample `count` distinct entries; the whole pool when it is not larger.
pub fn pick_many<R: Rng + ?Sized>(rng: &mut R, pool: &[&str], count: usize) -> Vec<String> {
    if count == 0 {
        return Vec::new();
    }
    if pool.len() <= count {
        return pool.iter().map(|s| s.to_string()).collect();
    }
    pool.choose_multiple(rng, count)
        .map(|s| s.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const ALL: [TemplateCategory; 22] = [
        TemplateCategory::MetaTitle,
        TemplateCategory::MetaDescription,
        TemplateCategory::IntroOpen,
        TemplateCategory::IntroMid,
        TemplateCategory::IntroClose,
        TemplateCategory::SummaryOpen,
        TemplateCategory::SummaryClose,
        TemplateCategory::Pros,
        TemplateCategory::Cons,
        TemplateCategory::GuideCore,
        TemplateCategory::GuideValue,
        TemplateCategory::GuideFeatures,
        TemplateCategory::MistakePrice,
        TemplateCategory::MistakeFit,
        TemplateCategory::MistakeReviews,
        TemplateCategory::MistakeType,
        TemplateCategory::MistakeOverpay,
        TemplateCategory::FaqPremium,
        TemplateCategory::FaqAvoid,
        TemplateCategory::VerdictOverall,
        TemplateCategory::VerdictBudget,
        TemplateCategory::VerdictPremium,
    ];

    #[test]
    fn every_category_has_variants() {
        for c in ALL {
            assert!(!c.variants().is_empty(), "{c:?} is empty");
        }
    }

    #[test]
    fn fill_replaces_named_slots_only() {
        let s = fill("Best {k} ({y}) {other}", &[("k", "Socks"), ("y", "2025")]);
        assert_eq!(s, "Best Socks (2025) {other}");
    }

    #[test]
    fn pick_is_a_function_of_seed() {
        let a = pick(
            TemplateCategory::MetaTitle,
            &mut StdRng::seed_from_u64(7),
            &[("k", "Socks"), ("y", "2025")],
        );
        let b = pick(
            TemplateCategory::MetaTitle,
            &mut StdRng::seed_from_u64(7),
            &[("k", "Socks"), ("y", "2025")],
        );
        assert_eq!(a, b);
        assert!(a.contains("Socks"));
    }

    #[test]
    fn pick_many_is_distinct_and_bounded() {
        let pool = TemplateCategory::Pros.variants();
        let mut rng = StdRng::seed_from_u64(1);
        let picked = pick_many(&mut rng, pool, 3);
        assert_eq!(picked.len(), 3);
        let mut uniq = picked.clone();
        uniq.sort();
        uniq.dedup();
        assert_eq!(uniq.len(), 3);

        assert_eq!(pick_many(&mut rng, &["a", "b"], 3), vec!["a", "b"]);
        assert!(pick_many(&mut rng, pool, 0).is_empty());
    }
}
