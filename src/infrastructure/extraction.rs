//! Multi-site product extraction engine.
//!
//! A registry of per-platform extractors turns one product page's parsed
//! document into a canonical [`Product`]. Selector lists, fallback order and
//! normalization rules are plain data layered over one shared algorithm, so
//! parsing fixes land once and apply to every marketplace.

pub mod config;
pub mod context;
pub mod engine;
pub mod error;
pub mod normalize;
pub mod platforms;
pub mod registry;
pub mod select;

// Re-export public types
pub use config::PlatformSelectors;
pub use context::PageSnapshot;
pub use engine::{ExtractionEngine, PlatformDefaults};
pub use error::{ExtractError, ExtractResult};
pub use registry::{ExtractorFactory, ExtractorRegistry};

use crate::domain::product::Product;
use async_trait::async_trait;

/// One marketplace's product-page extractor.
///
/// `extract` is declared asynchronous for interface uniformity: an extractor
/// for lazily-rendered content may await a bounded condition before reading
/// the page. The baseline extractors are synchronous computation over the
/// snapshot and never block.
///
/// `extract` is total over hostile input. No field step may fail the whole
/// capture; missing or malformed markup degrades to that field's documented
/// default. The only "unsupported platform" signal in this subsystem is
/// [`ExtractorRegistry::resolve`] returning `None`.
#[async_trait(?Send)]
pub trait ProductExtractor {
    /// Registry key this extractor is bound to. The emitted
    /// `Product::platform` always equals it.
    fn platform(&self) -> &'static str;

    /// Produce the canonical product record for one page snapshot.
    async fn extract(&self, page: &PageSnapshot) -> Product;
}
