//! eBay product page extractor.
//!
//! Covers both the current `x-`-prefixed item layout and the legacy
//! `#prcIsum`/`#itemTitle` layout, which still serves on some item
//! categories and regional sites.

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

pub const PLATFORM: &str = "ebay";

const DEFAULTS: PlatformDefaults = PlatformDefaults {
    review_author: "eBay Buyer",
    variant_sentinels: &["Select", "- Select -", "Choose"],
};

pub struct EbayExtractor {
    engine: ExtractionEngine,
}

impl EbayExtractor {
    pub fn new() -> Result<Self> {
        let engine = ExtractionEngine::new(PLATFORM, &selector_profile(), DEFAULTS)?;
        Ok(Self { engine })
    }
}

#[async_trait(?Send)]
impl ProductExtractor for EbayExtractor {
    fn platform(&self) -> &'static str {
        PLATFORM
    }

    async fn extract(&self, page: &PageSnapshot) -> Product {
        self.engine.extract(page)
    }
}

/// Register the eBay extractor.
pub fn register(registry: &mut ExtractorRegistry) {
    registry.register(PLATFORM, || Ok(Box::new(EbayExtractor::new()?)));
}

fn selector_profile() -> PlatformSelectors {
    PlatformSelectors {
        title: vec![
            SelectorSpec::text("h1.x-item-title__mainTitle span.ux-textspans"),
            SelectorSpec::text("h1.x-item-title__mainTitle"),
            SelectorSpec::text("#itemTitle"),
            SelectorSpec::text("h1"),
        ],
        price: PriceSelectors {
            amount: vec![
                SelectorSpec::attr("meta[itemprop='price']", "content"),
                SelectorSpec::text("#prcIsum"),
                SelectorSpec::text("#mm-saleDscPrc"),
                SelectorSpec::text(".x-price-primary .ux-textspans"),
                SelectorSpec::text(".display-price"),
            ],
            currency: vec![
                SelectorSpec::attr("meta[itemprop='priceCurrency']", "content"),
                SelectorSpec::attr("[itemprop='priceCurrency']", "content"),
            ],
        },
        media: MediaSelectors {
            gallery: vec![
                ".ux-image-carousel-item img".to_string(),
                "#icImg".to_string(),
                "#mainImgHldr img".to_string(),
            ],
            thumbnails: vec![
                ".ux-image-filmstrip-carousel-item img".to_string(),
                "#vertical-thumbnails img".to_string(),
            ],
            videos: vec![
                ".ux-video-player video source".to_string(),
                "video source".to_string(),
                "video".to_string(),
            ],
        },
        variants: VariantSelectors {
            groups: vec![
                "select[id^='msku-sel']".to_string(),
                ".x-msku__select-box".to_string(),
                ".x-msku".to_string(),
            ],
            group_label: vec![
                ".x-msku__label".to_string(),
                "label".to_string(),
                "legend".to_string(),
            ],
            controls: vec![
                "button".to_string(),
                "[role='radio']".to_string(),
                "li".to_string(),
            ],
        },
        reviews: ReviewSelectors {
            items: vec![
                ".ebay-review-section".to_string(),
                ".fdbk-container".to_string(),
                ".reviews .review-item".to_string(),
            ],
            author: vec![
                SelectorSpec::text(".review-item-author"),
                SelectorSpec::text(".fdbk-container__details__info__username span"),
            ],
            body: vec![
                SelectorSpec::text(".review-item-content p"),
                SelectorSpec::text(".fdbk-container__details__comment"),
                SelectorSpec::text(".review-item-content"),
            ],
            rating: vec![
                SelectorSpec::attr(".star-rating", "aria-label"),
                SelectorSpec::text(".review-item-stars .clipped"),
            ],
        },
        breadcrumbs: vec![
            SelectorSpec::text("nav.breadcrumbs a"),
            SelectorSpec::text(".seo-breadcrumb-text span"),
            SelectorSpec::text("#vi-VR-brumb-lnkLst a"),
            SelectorSpec::text(".breadcrumb a"),
        ],
        specifics: SpecificsSelectors {
            tables: vec![
                ".ux-layout-section-evo__item table".to_string(),
                ".itemAttr table".to_string(),
            ],
            definition_lists: vec!["dl.ux-labels-values".to_string(), "dl".to_string()],
        },
        brand: vec![
            SelectorSpec::text("[itemprop='brand']"),
            SelectorSpec::text(".ux-labels-values--brand .ux-labels-values__values"),
        ],
        sku: vec![
            SelectorSpec::text("[itemprop='sku']"),
            SelectorSpec::text("#descItemNumber"),
        ],
        rating: vec![
            SelectorSpec::attr("[itemprop='ratingValue']", "content"),
            SelectorSpec::text(".ebay-review-start-rating"),
        ],
        description: vec![
            SelectorSpec::text(".x-item-description"),
            SelectorSpec::text("#desc_div"),
            SelectorSpec::text("#ds_div"),
        ],
    }
}
