// src/ingest/types.rs

/// Rank assigned when the input has no usable `rank_for_keyword`.
pub const UNRANKED: i64 = 9999;

/// One candidate product row. Immutable once parsed.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq)]
pub struct ProductRecord {
    pub keyword: String,      // search term the article is built around
    pub product_name: String, // display name
    pub product_url: String,  // destination (affiliate) URL
    pub image_url: String,    // may be empty
    pub rating: f64,
    pub review_count: u64,
    pub rank_for_keyword: i64, // <= 0 means "no rank"
    pub final_score: f64,
}

impl ProductRecord {
    /// Rank used for ordering: invalid ranks sort after every valid one.
    pub fn effective_rank(&self) -> i64 {
        if self.rank_for_keyword > 0 {
            self.rank_for_keyword
        } else {
            i64::MAX
        }
    }
}
