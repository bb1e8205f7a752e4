//! Selector profiles for platform extractors.
//!
//! Selectors are configuration data layered over the shared extraction
//! algorithm: each platform module supplies one [`PlatformSelectors`] value
//! and the engine supplies the behavior. Profiles are serde-serializable so
//! they can be inspected or overridden without touching the algorithms.

use serde::{Deserialize, Serialize};

use super::select::SelectorSpec;

/// Full selector profile for one marketplace.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlatformSelectors {
    /// Product title fallback chain.
    pub title: Vec<SelectorSpec>,
    pub price: PriceSelectors,
    pub media: MediaSelectors,
    pub variants: VariantSelectors,
    pub reviews: ReviewSelectors,
    /// Breadcrumb anchor candidates; the first selector yielding any
    /// anchors supplies the whole category path in document order.
    pub breadcrumbs: Vec<SelectorSpec>,
    pub specifics: SpecificsSelectors,
    pub brand: Vec<SelectorSpec>,
    pub sku: Vec<SelectorSpec>,
    pub rating: Vec<SelectorSpec>,
    pub description: Vec<SelectorSpec>,
}

/// Price candidates. Structured attributes (meta/itemprop `content`) should
/// come before visible-text candidates.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PriceSelectors {
    pub amount: Vec<SelectorSpec>,
    pub currency: Vec<SelectorSpec>,
}

/// Image and video sources. Entries are plain CSS selectors; the engine
/// applies its own source-attribute preference (`src`, then lazy-load data
/// attributes, then zoom attributes) to every matched element.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MediaSelectors {
    /// Primary gallery image elements.
    pub gallery: Vec<String>,
    /// Thumbnail strip image elements, scanned after the gallery.
    pub thumbnails: Vec<String>,
    /// `<video>`/player source elements.
    pub videos: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VariantSelectors {
    /// Variant-group containers. All matching containers across the list
    /// are scanned, so select-box and swatch groups can coexist.
    pub groups: Vec<String>,
    /// Label candidates tried inside the group's enclosing section.
    pub group_label: Vec<String>,
    /// Button/radio-like child controls of a non-select group.
    pub controls: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReviewSelectors {
    /// Review-item containers.
    pub items: Vec<String>,
    pub author: Vec<SelectorSpec>,
    pub body: Vec<SelectorSpec>,
    pub rating: Vec<SelectorSpec>,
}

/// Structured key/value containers feeding `Product::specifics`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpecificsSelectors {
    /// Info tables read as `tr` → first/second cell pairs.
    pub tables: Vec<String>,
    /// Definition lists read as `dt`/`dd` pairs.
    pub definition_lists: Vec<String>,
}
