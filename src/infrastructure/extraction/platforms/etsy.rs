//! Etsy listing page extractor.
//!
//! Etsy listings are seller-authored, so structured data is sparse compared
//! to the big marketplaces; the brand slot carries the shop name.

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

pub const PLATFORM: &str = "etsy";

const DEFAULTS: PlatformDefaults = PlatformDefaults {
    review_author: "Etsy Buyer",
    variant_sentinels: &["Select an option", "Select"],
};

pub struct EtsyExtractor {
    engine: ExtractionEngine,
}

impl EtsyExtractor {
    pub fn new() -> Result<Self> {
        let engine = ExtractionEngine::new(PLATFORM, &selector_profile(), DEFAULTS)?;
        Ok(Self { engine })
    }
}

#[async_trait(?Send)]
impl ProductExtractor for EtsyExtractor {
    fn platform(&self) -> &'static str {
        PLATFORM
    }

    async fn extract(&self, page: &PageSnapshot) -> Product {
        self.engine.extract(page)
    }
}

/// Register the Etsy extractor.
pub fn register(registry: &mut ExtractorRegistry) {
    registry.register(PLATFORM, || Ok(Box::new(EtsyExtractor::new()?)));
}

fn selector_profile() -> PlatformSelectors {
    PlatformSelectors {
        title: vec![
            SelectorSpec::text("h1[data-buy-box-listing-title]"),
            SelectorSpec::text("h1"),
        ],
        price: PriceSelectors {
            amount: vec![
                SelectorSpec::attr("meta[property='og:price:amount']", "content"),
                SelectorSpec::text("[data-buy-box-region='price'] .wt-text-title-largest"),
                SelectorSpec::text("[data-buy-box-region='price'] p"),
            ],
            currency: vec![SelectorSpec::attr("meta[property='og:price:currency']", "content")],
        },
        media: MediaSelectors {
            gallery: vec![
                ".image-carousel-container img".to_string(),
                ".listing-page-image-carousel-component img".to_string(),
            ],
            thumbnails: vec![
                "[data-carousel-pagination] img".to_string(),
                ".image-carousel-thumbnail img".to_string(),
            ],
            videos: vec!["video source".to_string(), "video".to_string()],
        },
        variants: VariantSelectors {
            groups: vec![
                "select[id^='variation-selector']".to_string(),
                "[data-variation-wrapper]".to_string(),
            ],
            group_label: vec!["label".to_string(), "legend".to_string()],
            controls: vec!["button".to_string(), "li".to_string()],
        },
        reviews: ReviewSelectors {
            items: vec![
                ".review-card".to_string(),
                "[data-reviews-container] .wt-grid__item-xs-12".to_string(),
            ],
            author: vec![
                SelectorSpec::text(".reviewer-name"),
                SelectorSpec::text("p.wt-text-truncate a"),
            ],
            body: vec![
                SelectorSpec::text("p[id^='review-preview-toggle']"),
                SelectorSpec::text(".review-text"),
            ],
            rating: vec![
                SelectorSpec::attr("input[name='rating']", "value"),
                SelectorSpec::attr("[data-stars-svg-container] input", "value"),
            ],
        },
        breadcrumbs: vec![
            SelectorSpec::text("nav[aria-label='Breadcrumbs'] a"),
            SelectorSpec::text(".wt-action-group__item-container a"),
            SelectorSpec::text(".breadcrumb a"),
        ],
        specifics: SpecificsSelectors {
            tables: vec!["table".to_string()],
            definition_lists: vec!["dl".to_string()],
        },
        brand: vec![
            SelectorSpec::text("[data-shop-name]"),
            SelectorSpec::text(".shop-name"),
            SelectorSpec::text("a[href*='/shop/']"),
        ],
        sku: vec![
            SelectorSpec::text("[itemprop='sku']"),
            SelectorSpec::attr("[data-listing-id]", "data-listing-id"),
        ],
        rating: vec![
            SelectorSpec::attr("input[name='rating']", "value"),
            SelectorSpec::attr("[itemprop='ratingValue']", "content"),
        ],
        description: vec![
            SelectorSpec::text("[data-product-details-description-text-content]"),
            SelectorSpec::text(".listing-page-overview-component p"),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTING_PAGE: &str = r#"
        <html><body>
        <meta property="og:price:amount" content="24.00">
        <meta property="og:price:currency" content="USD">
        <h1 data-buy-box-listing-title="true">Hand-Stamped Brass Keychain</h1>
        <a data-shop-name="" href="/shop/BrassWorks">BrassWorks</a>
        <div class="image-carousel-container">
            <img src="https://i.etsystatic.com/100/r/il/aa/il_340x270.123.jpg">
        </div>
        <div data-variation-wrapper="">
            <label>Font</label>
            <select id="variation-selector-0">
                <option value="">Select an option</option>
                <option value="1">Serif</option>
                <option value="2">Script</option>
            </select>
        </div>
        </body></html>
    "#;

    #[tokio::test]
    async fn extracts_listing_with_shop_as_brand() {
        let extractor = EtsyExtractor::new().unwrap();
        let page = PageSnapshot::parse(LISTING_PAGE, "https://www.etsy.com/listing/555");
        let product = extractor.extract(&page).await;

        assert_eq!(product.platform, PLATFORM);
        assert_eq!(product.title, "Hand-Stamped Brass Keychain");
        assert!((product.price.amount - 24.0).abs() < f64::EPSILON);
        assert_eq!(product.brand, "BrassWorks");
        assert_eq!(
            product.images,
            vec!["https://i.etsystatic.com/100/r/il/aa/il_fullxfull.123.jpg"]
        );
    }

    #[tokio::test]
    async fn variation_select_uses_its_label_and_skips_placeholder() {
        let extractor = EtsyExtractor::new().unwrap();
        let page = PageSnapshot::parse(LISTING_PAGE, "https://www.etsy.com/listing/555");
        let product = extractor.extract(&page).await;

        let names: Vec<&str> = product
            .variants
            .iter()
            .map(|variant| variant.name.as_str())
            .collect();
        assert_eq!(names, vec!["Serif", "Script"]);
        assert!(product.variants.iter().all(|variant| variant.kind == "Font"));
    }
}
