use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Hard bounds applied to every emitted [`Product`].
///
/// Source pages are third-party markup of arbitrary size; these caps hold
/// no matter how much raw data a page exposes.
pub mod limits {
    /// Maximum number of image URLs kept per product.
    pub const MAX_IMAGES: usize = 30;

    /// Maximum number of video entries kept per product.
    pub const MAX_VIDEOS: usize = 5;

    /// Maximum number of variants kept across all variant groups on a page.
    pub const MAX_VARIANTS: usize = 100;

    /// Maximum number of reviews kept per product.
    pub const MAX_REVIEWS: usize = 20;

    /// Maximum length of a variant display name, in characters.
    pub const MAX_VARIANT_NAME_CHARS: usize = 100;

    /// Maximum length of a review body, in characters.
    pub const MAX_REVIEW_BODY_CHARS: usize = 1000;

    /// Maximum length of the product description, in characters.
    pub const MAX_DESCRIPTION_CHARS: usize = 2000;
}

/// Normalized price. `amount` is always finite and non-negative; absent
/// price data is represented as `0`, never `NaN` or a missing field, so
/// downstream arithmetic needs no null checks.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProductPrice {
    pub amount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
}

/// A single product video source, tagged with a fixed type label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductVideo {
    #[serde(rename = "type")]
    pub kind: String,
    pub url: String,
}

/// One selectable product option (size, color, style, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variant {
    /// Label of the variant group this option belongs to.
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    /// `Some(false)` when the source control is disabled; `None` when the
    /// control shape carries no availability signal.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected: Option<bool>,
}

/// A buyer review. `body` is guaranteed non-empty; items without body text
/// are dropped during extraction, author alone is not sufficient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub author: String,
    pub body: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
}

/// Canonical output of every platform extractor.
///
/// Created fresh per `extract()` call; the engine owns no state beyond the
/// returned record. `platform` always equals the registry key of the
/// extractor that produced it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub title: String,
    pub price: ProductPrice,
    pub images: Vec<String>,
    pub videos: Vec<ProductVideo>,
    pub variants: Vec<Variant>,
    pub reviews: Vec<Review>,
    pub specifics: HashMap<String, String>,
    pub brand: String,
    pub sku: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    pub description: String,
    /// `None` means no breadcrumb data was found on the page, as distinct
    /// from a category that happens to be the empty string (never emitted).
    pub category: Option<String>,
    pub platform: String,
    pub url: String,
    #[serde(rename = "extractedAt")]
    pub extracted_at: DateTime<Utc>,
}

impl Product {
    /// Empty shell for `platform`/`url`; field steps fill it in.
    pub fn empty(platform: &str, url: &str) -> Self {
        Self {
            title: String::new(),
            price: ProductPrice::default(),
            images: Vec::new(),
            videos: Vec::new(),
            variants: Vec::new(),
            reviews: Vec::new(),
            specifics: HashMap::new(),
            brand: String::new(),
            sku: String::new(),
            rating: None,
            description: String::new(),
            category: None,
            platform: platform.to_string(),
            url: url.to_string(),
            extracted_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_product_defaults() {
        let product = Product::empty("ebay", "https://www.ebay.com/itm/1");
        assert_eq!(product.platform, "ebay");
        assert_eq!(product.price.amount, 0.0);
        assert!(product.category.is_none());
        assert!(product.images.is_empty());
    }

    #[test]
    fn video_and_variant_serialize_type_field() {
        let video = ProductVideo {
            kind: "video".to_string(),
            url: "https://cdn.example.com/v.mp4".to_string(),
        };
        let json = serde_json::to_value(&video).unwrap();
        assert_eq!(json["type"], "video");

        let variant = Variant {
            kind: "Color".to_string(),
            name: "Red".to_string(),
            available: Some(true),
            selected: None,
        };
        let json = serde_json::to_value(&variant).unwrap();
        assert_eq!(json["type"], "Color");
        assert!(json.get("selected").is_none());
    }
}
