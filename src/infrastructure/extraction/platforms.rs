//! Built-in marketplace extractors.
//!
//! Each platform module owns its registry key, its selector profile and its
//! platform constants, and exposes a `register` function. The field
//! algorithms all live in the shared engine; a platform module is selector
//! configuration layered on top of it.

pub mod aliexpress;
pub mod amazon;
pub mod ebay;
pub mod etsy;
pub mod shopify;
pub mod walmart;

use super::registry::ExtractorRegistry;

/// Register every built-in platform extractor. Invoked once at startup by
/// [`ExtractorRegistry::with_builtin`].
pub fn register_builtin(registry: &mut ExtractorRegistry) {
    ebay::register(registry);
    amazon::register(registry);
    aliexpress::register(registry);
    shopify::register(registry);
    walmart::register(registry);
    etsy::register(registry);
}
