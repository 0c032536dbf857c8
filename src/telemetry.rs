// src/telemetry.rs
//! Counter names and their one-time descriptions. No recorder is installed
//! here; without one the macros are no-ops.

use metrics::describe_counter;
use once_cell::sync::OnceCell;

pub const PAGES_GENERATED: &str = "pages_generated_total";
pub const KEYWORDS_SKIPPED: &str = "keywords_skipped_total";
pub const INDEXNOW_BATCHES_OK: &str = "indexnow_batches_ok_total";
pub const INDEXNOW_BATCHES_FAILED: &str = "indexnow_batches_failed_total";

/// One-time metrics registration.
pub fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!(PAGES_GENERATED, "HTML documents written.");
        describe_counter!(
            KEYWORDS_SKIPPED,
            "Keyword groups skipped for having fewer than three distinct products."
        );
        describe_counter!(INDEXNOW_BATCHES_OK, "IndexNow batches accepted (200/202).");
        describe_counter!(
            INDEXNOW_BATCHES_FAILED,
            "IndexNow batches rejected or failed in transport."
        );
    });
}
