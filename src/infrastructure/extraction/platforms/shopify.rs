//! Shopify storefront extractor.
//!
//! Shopify themes vary widely; the profile leans on Online Store 2.0
//! conventions (Dawn and derivatives) plus the og: meta tags every theme
//! emits, with legacy `product-single__*` selectors as fallbacks.

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::product::Product;
use crate::infrastructure::extraction::config::{
    MediaSelectors, PlatformSelectors, PriceSelectors, ReviewSelectors, SpecificsSelectors,
    VariantSelectors,
};
use crate::infrastructure::extraction::engine::{ExtractionEngine, PlatformDefaults};
use crate::infrastructure::extraction::registry::ExtractorRegistry;
use crate::infrastructure::extraction::select::SelectorSpec;
use crate::infrastructure::extraction::{PageSnapshot, ProductExtractor};

pub const PLATFORM: &str = "shopify";

const DEFAULTS: PlatformDefaults = PlatformDefaults {
    review_author: "Verified Buyer",
    variant_sentinels: &["Choose an option", "Select"],
};

pub struct ShopifyExtractor {
    engine: ExtractionEngine,
}

impl ShopifyExtractor {
    pub fn new() -> Result<Self> {
        let engine = ExtractionEngine::new(PLATFORM, &selector_profile(), DEFAULTS)?;
        Ok(Self { engine })
    }
}

#[async_trait(?Send)]
impl ProductExtractor for ShopifyExtractor {
    fn platform(&self) -> &'static str {
        PLATFORM
    }

    async fn extract(&self, page: &PageSnapshot) -> Product {
        self.engine.extract(page)
    }
}

/// Register the Shopify extractor.
pub fn register(registry: &mut ExtractorRegistry) {
    registry.register(PLATFORM, || Ok(Box::new(ShopifyExtractor::new()?)));
}

fn selector_profile() -> PlatformSelectors {
    PlatformSelectors {
        title: vec![
            SelectorSpec::text(".product__title h1"),
            SelectorSpec::text("h1.product-single__title"),
            SelectorSpec::text("h1"),
        ],
        price: PriceSelectors {
            amount: vec![
                SelectorSpec::attr("meta[property='og:price:amount']", "content"),
                SelectorSpec::text(".price__current .money"),
                SelectorSpec::text(".price-item--regular"),
                SelectorSpec::text("[data-product-price]"),
                SelectorSpec::text(".product__price"),
            ],
            currency: vec![
                SelectorSpec::attr("meta[property='og:price:currency']", "content"),
                SelectorSpec::attr("[itemprop='priceCurrency']", "content"),
            ],
        },
        media: MediaSelectors {
            gallery: vec![
                ".product__media img".to_string(),
                ".product-single__photo img".to_string(),
                ".product-gallery img".to_string(),
            ],
            thumbnails: vec![
                ".thumbnail-list img".to_string(),
                ".product-single__thumbnails img".to_string(),
            ],
            videos: vec![
                ".product__media video source".to_string(),
                "video source".to_string(),
                "video".to_string(),
            ],
        },
        variants: VariantSelectors {
            groups: vec![
                ".product-form__input".to_string(),
                "variant-radios fieldset".to_string(),
                "variant-selects .select".to_string(),
            ],
            group_label: vec![
                ".form__label".to_string(),
                "legend".to_string(),
                "label".to_string(),
            ],
            controls: vec!["label".to_string(), "button".to_string(), "li".to_string()],
        },
        reviews: ReviewSelectors {
            items: vec![".spr-review".to_string(), ".review".to_string()],
            author: vec![
                SelectorSpec::text(".spr-review-header-byline strong"),
                SelectorSpec::text(".spr-review-header-byline"),
            ],
            body: vec![SelectorSpec::text(".spr-review-content-body")],
            rating: vec![
                SelectorSpec::attr(".spr-starratings", "aria-label"),
                SelectorSpec::attr(".spr-badge", "data-rating"),
            ],
        },
        breadcrumbs: vec![
            SelectorSpec::text("nav[aria-label='breadcrumbs'] a"),
            SelectorSpec::text(".breadcrumbs__list a"),
            SelectorSpec::text(".breadcrumb a"),
        ],
        specifics: SpecificsSelectors {
            tables: vec![".product-specs table".to_string(), "table.responsive-table".to_string()],
            definition_lists: vec!["dl".to_string()],
        },
        brand: vec![
            SelectorSpec::text(".product__vendor"),
            SelectorSpec::text("[itemprop='brand']"),
        ],
        sku: vec![
            SelectorSpec::text(".variant-sku"),
            SelectorSpec::text(".product__sku"),
            SelectorSpec::text("[data-sku]"),
        ],
        rating: vec![
            SelectorSpec::attr(".spr-badge", "data-rating"),
            SelectorSpec::text(".rating-value"),
        ],
        description: vec![
            SelectorSpec::text(".product__description"),
            SelectorSpec::text(".product-single__description"),
            SelectorSpec::text("[data-product-description]"),
        ],
    }
}
