//! AliExpress product page extractor.
//!
//! AliExpress localizes price formats aggressively ("1 234,56 руб.",
//! "R$ 1.234,56"), so everything funnels through the locale-tolerant price
//! parser.

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

pub const PLATFORM: &str = "aliexpress";

const DEFAULTS: PlatformDefaults = PlatformDefaults {
    review_author: "AliExpress Shopper",
    variant_sentinels: &["Select", "Please select"],
};

pub struct AliexpressExtractor {
    engine: ExtractionEngine,
}

impl AliexpressExtractor {
    pub fn new() -> Result<Self> {
        let engine = ExtractionEngine::new(PLATFORM, &selector_profile(), DEFAULTS)?;
        Ok(Self { engine })
    }
}

#[async_trait(?Send)]
impl ProductExtractor for AliexpressExtractor {
    fn platform(&self) -> &'static str {
        PLATFORM
    }

    async fn extract(&self, page: &PageSnapshot) -> Product {
        self.engine.extract(page)
    }
}

/// Register the AliExpress extractor.
pub fn register(registry: &mut ExtractorRegistry) {
    registry.register(PLATFORM, || Ok(Box::new(AliexpressExtractor::new()?)));
}

fn selector_profile() -> PlatformSelectors {
    PlatformSelectors {
        title: vec![
            SelectorSpec::text("h1[data-pl='product-title']"),
            SelectorSpec::text(".product-title-text"),
            SelectorSpec::text("h1"),
        ],
        price: PriceSelectors {
            amount: vec![
                SelectorSpec::attr("meta[property='og:price:amount']", "content"),
                SelectorSpec::text(".product-price-value"),
                SelectorSpec::text(".uniform-banner-box-price"),
                SelectorSpec::text(".pdp-comp-price-current"),
            ],
            currency: vec![SelectorSpec::attr("meta[property='og:price:currency']", "content")],
        },
        media: MediaSelectors {
            gallery: vec![
                ".image-view-magnifier-wrap img".to_string(),
                "img.magnifier-image".to_string(),
                ".pdp-img img".to_string(),
            ],
            thumbnails: vec![
                ".images-view-item img".to_string(),
                ".slider--item img".to_string(),
            ],
            videos: vec![
                ".video-container video source".to_string(),
                "video source".to_string(),
                "video".to_string(),
            ],
        },
        variants: VariantSelectors {
            groups: vec![".sku-property".to_string(), ".sku-item".to_string()],
            group_label: vec![
                ".sku-title".to_string(),
                ".sku-property-title".to_string(),
                "label".to_string(),
            ],
            controls: vec![
                ".sku-property-item".to_string(),
                "li".to_string(),
                "button".to_string(),
            ],
        },
        reviews: ReviewSelectors {
            items: vec![".feedback-item".to_string(), ".eva-card".to_string()],
            author: vec![
                SelectorSpec::text(".user-name"),
                SelectorSpec::text(".fb-user-info span"),
            ],
            body: vec![
                SelectorSpec::text(".buyer-feedback span"),
                SelectorSpec::text(".feedback-content"),
                SelectorSpec::text(".eva-card-content"),
            ],
            rating: vec![
                SelectorSpec::text(".fb-star-num"),
                SelectorSpec::attr(".stars", "aria-label"),
            ],
        },
        breadcrumbs: vec![
            SelectorSpec::text(".base-breadcrumb a"),
            SelectorSpec::text(".breadcrumb a"),
        ],
        specifics: SpecificsSelectors {
            tables: vec![
                ".product-specs table".to_string(),
                ".specification table".to_string(),
            ],
            definition_lists: vec!["dl".to_string()],
        },
        brand: vec![
            SelectorSpec::text(".product-brand-name"),
            SelectorSpec::text("[itemprop='brand']"),
        ],
        sku: vec![
            SelectorSpec::text("[itemprop='sku']"),
            SelectorSpec::attr("[data-sku]", "data-sku"),
        ],
        rating: vec![
            SelectorSpec::text(".overview-rating-average"),
            SelectorSpec::text(".rating-value"),
        ],
        description: vec![
            SelectorSpec::text("#product-description"),
            SelectorSpec::text(".detail-desc-decorate-richtext"),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PRODUCT_PAGE: &str = r#"
        <html><body>
        <h1 data-pl="product-title">Wireless Earbuds Pro</h1>
        <div class="product-price-value">1 234,56 руб.</div>
        <div class="images-view-item">
            <img src="https://ae01.alicdn.com/kf/Habc.jpg_220x220.jpg">
        </div>
        <div class="images-view-item">
            <img src="https://ae01.alicdn.com/kf/Habc.jpg_960x960.jpg">
        </div>
        <div class="sku-property">
            <div class="sku-title">Color</div>
            <ul>
                <li class="sku-property-item selected">Black</li>
                <li class="sku-property-item">White</li>
            </ul>
        </div>
        <div class="overview-rating-average">4,7</div>
        </body></html>
    "#;

    #[tokio::test]
    async fn parses_comma_decimal_price() {
        let extractor = AliexpressExtractor::new().unwrap();
        let page = PageSnapshot::parse(PRODUCT_PAGE, "https://www.aliexpress.com/item/100500.html");
        let product = extractor.extract(&page).await;

        assert_eq!(product.platform, PLATFORM);
        assert!((product.price.amount - 1234.56).abs() < f64::EPSILON);
        assert_eq!(product.rating, Some(4.7));
    }

    #[tokio::test]
    async fn thumbnail_renditions_collapse_to_one_asset() {
        let extractor = AliexpressExtractor::new().unwrap();
        let page = PageSnapshot::parse(PRODUCT_PAGE, "https://www.aliexpress.com/item/100500.html");
        let product = extractor.extract(&page).await;

        assert_eq!(
            product.images,
            vec!["https://ae01.alicdn.com/kf/Habc.jpg"]
        );
    }

    #[tokio::test]
    async fn swatch_variants_carry_selection_state() {
        let extractor = AliexpressExtractor::new().unwrap();
        let page = PageSnapshot::parse(PRODUCT_PAGE, "https://www.aliexpress.com/item/100500.html");
        let product = extractor.extract(&page).await;

        assert_eq!(product.variants.len(), 2);
        assert_eq!(product.variants[0].kind, "Color");
        assert_eq!(product.variants[0].name, "Black");
        assert_eq!(product.variants[0].selected, Some(true));
        assert_eq!(product.variants[1].selected, Some(false));
    }
}
