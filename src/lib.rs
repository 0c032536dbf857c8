// src/lib.rs
// Public library surface for the binary and integration tests.

pub mod config;
pub mod engine;
pub mod group;
pub mod ingest;
pub mod paginate;
pub mod related;
pub mod render;
pub mod report;
pub mod sitemap;
pub mod slug;
pub mod telemetry;
pub mod variation;

// IndexNow submission
pub mod notify;

// ---- Re-exports for stable public API ----
pub use crate::config::copy::PageCopy;
pub use crate::config::site::SiteConfig;
pub use crate::config::RunOptions;
pub use crate::engine::{generate, run, submit_existing, Generation};
pub use crate::group::PageBuild;
pub use crate::ingest::types::ProductRecord;
pub use crate::notify::{IndexTransport, NotificationResult, ReqwestTransport};
