//! `landing-content`: content model and storage for the landing page.
//!
//! The whole public site is driven by one JSON document
//! ([`LandingPageContent`]) plus a second file holding A/B tests
//! ([`AbTest`]). This crate owns:
//!
//! - the typed document model and its hardcoded defaults,
//! - the aggregated (public) view: active items only, sorted by `displayOrder`,
//! - JSON deep merge used by settings updates,
//! - file stores for both documents,
//! - cache backends (Redis, in-process, disabled) behind [`ContentCache`].

pub mod ab_test;
pub mod aggregate;
pub mod cache;
pub mod defaults;
pub mod merge;
pub mod model;
pub mod store;

pub use ab_test::{AbTest, AbTestStatus, Variant, VariantKey, VariantMetrics};
pub use aggregate::{ActiveExperiment, PublicLandingPage, aggregate};
pub use cache::{CacheError, ContentCache, MemoryCache, NoopCache, RedisCache};
pub use merge::deep_merge;
pub use model::LandingPageContent;
pub use store::{AbTestStore, ContentStore, StoreError};

/// Cache key holding the serialized aggregated view.
pub const AGGREGATED_CACHE_KEY: &str = "landing_page:aggregated";
