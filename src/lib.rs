//! MarketClip - Multi-Marketplace Product Page Extraction & Normalization Engine
//!
//! This crate turns the parsed document of a marketplace product page into a
//! single canonical [`Product`] record. A registry of per-platform extractors
//! (eBay, Amazon, AliExpress, Shopify, Walmart, Etsy) shares one
//! field-extraction engine; each platform contributes its CSS selector
//! profile as configuration data. Extraction is total over hostile markup:
//! missing or malformed fields degrade to documented defaults instead of
//! failing the capture.

// Module declarations
pub mod domain;
pub mod infrastructure;

// Re-export the public surface for easier access
pub use domain::product::{Product, ProductPrice, ProductVideo, Review, Variant};
pub use infrastructure::extraction::{
    ExtractorFactory, ExtractorRegistry, PageSnapshot, ProductExtractor,
};
