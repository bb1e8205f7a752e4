//! Platform key → extractor factory table.

use anyhow::Result;
use std::collections::HashMap;
use tracing::debug;

use super::ProductExtractor;

/// Constructor for one platform's extractor. Construction may fail when a
/// selector profile is invalid; extraction itself never does.
pub type ExtractorFactory = fn() -> Result<Box<dyn ProductExtractor>>;

/// Owned mapping from platform keys to extractor factories.
///
/// Populated once at startup ([`Self::with_builtin`]) and read-mostly
/// afterwards; it is passed through the application rather than living in
/// an ambient global. Resolving an unknown key yields `None`, which is the
/// sole "unsupported platform" signal in this subsystem.
#[derive(Default)]
pub struct ExtractorRegistry {
    factories: HashMap<String, ExtractorFactory>,
}

impl ExtractorRegistry {
    /// Empty registry; callers register platforms explicitly.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry pre-populated with every built-in platform module.
    #[must_use]
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        super::platforms::register_builtin(&mut registry);
        registry
    }

    /// Bind `platform` to `factory`. Idempotent: registering the same key
    /// again overwrites the previous binding and never errors.
    pub fn register(&mut self, platform: &str, factory: ExtractorFactory) {
        if self.factories.insert(platform.to_string(), factory).is_some() {
            debug!("re-registered extractor for platform '{platform}'");
        }
    }

    /// Look up the factory for `platform`.
    #[must_use]
    pub fn resolve(&self, platform: &str) -> Option<ExtractorFactory> {
        self.factories.get(platform).copied()
    }

    /// Registered platform keys, in no particular order.
    pub fn platforms(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}
