//! Walmart product page extractor.

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

pub const PLATFORM: &str = "walmart";

const DEFAULTS: PlatformDefaults = PlatformDefaults {
    review_author: "Walmart Customer",
    variant_sentinels: &["Select", "Select an option"],
};

pub struct WalmartExtractor {
    engine: ExtractionEngine,
}

impl WalmartExtractor {
    pub fn new() -> Result<Self> {
        let engine = ExtractionEngine::new(PLATFORM, &selector_profile(), DEFAULTS)?;
        Ok(Self { engine })
    }
}

#[async_trait(?Send)]
impl ProductExtractor for WalmartExtractor {
    fn platform(&self) -> &'static str {
        PLATFORM
    }

    async fn extract(&self, page: &PageSnapshot) -> Product {
        self.engine.extract(page)
    }
}

/// Register the Walmart extractor.
pub fn register(registry: &mut ExtractorRegistry) {
    registry.register(PLATFORM, || Ok(Box::new(WalmartExtractor::new()?)));
}

fn selector_profile() -> PlatformSelectors {
    PlatformSelectors {
        title: vec![
            SelectorSpec::text("h1[itemprop='name']"),
            SelectorSpec::text("h1.prod-ProductTitle"),
            SelectorSpec::text("h1"),
        ],
        price: PriceSelectors {
            amount: vec![
                SelectorSpec::attr("meta[itemprop='price']", "content"),
                SelectorSpec::text("[itemprop='price']"),
                SelectorSpec::text("[data-testid='price-wrap'] span"),
                SelectorSpec::text(".price-group"),
            ],
            currency: vec![SelectorSpec::attr("[itemprop='priceCurrency']", "content")],
        },
        media: MediaSelectors {
            gallery: vec![
                "[data-testid='hero-image'] img".to_string(),
                ".hover-zoom-hero-image".to_string(),
                ".prod-hero-image img".to_string(),
            ],
            thumbnails: vec![
                "[data-testid='media-thumbnail'] img".to_string(),
                ".slider-list img".to_string(),
            ],
            videos: vec!["video source".to_string(), "video".to_string()],
        },
        variants: VariantSelectors {
            groups: vec![
                "[data-testid='variant-group']".to_string(),
                ".variants__list".to_string(),
            ],
            group_label: vec![
                "[data-testid='variant-group-label']".to_string(),
                ".variants__label".to_string(),
                "label".to_string(),
            ],
            controls: vec!["button".to_string(), "li".to_string()],
        },
        reviews: ReviewSelectors {
            items: vec![
                "[data-testid='review-card']".to_string(),
                ".customer-review".to_string(),
            ],
            author: vec![
                SelectorSpec::text("[data-testid='review-author']"),
                SelectorSpec::text(".review-footer-userNickname"),
            ],
            body: vec![
                SelectorSpec::text("[data-testid='review-text']"),
                SelectorSpec::text(".review-text"),
            ],
            rating: vec![
                SelectorSpec::attr("[data-testid='review-stars']", "aria-label"),
                SelectorSpec::text(".review-rating"),
            ],
        },
        breadcrumbs: vec![
            SelectorSpec::text("nav[aria-label='breadcrumb'] a"),
            SelectorSpec::text(".breadcrumb a"),
        ],
        specifics: SpecificsSelectors {
            tables: vec![
                "[data-testid='product-specs'] table".to_string(),
                ".specifications table".to_string(),
            ],
            definition_lists: vec!["dl".to_string()],
        },
        brand: vec![
            SelectorSpec::text("a[link-identifier='brandName']"),
            SelectorSpec::text("[itemprop='brand']"),
        ],
        sku: vec![
            SelectorSpec::text("[itemprop='sku']"),
            SelectorSpec::text(".prod-ProductOffer-itemNumber"),
        ],
        rating: vec![
            SelectorSpec::attr("[itemprop='ratingValue']", "content"),
            SelectorSpec::text(".rating-number"),
        ],
        description: vec![
            SelectorSpec::text("[data-testid='product-description']"),
            SelectorSpec::text("#product-description-section"),
            SelectorSpec::text(".about-desc"),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PRODUCT_PAGE: &str = r#"
        <html><body>
        <nav aria-label="breadcrumb">
            <a href="/cp/home">Home</a>
            <a href="/cp/storage">Storage</a>
        </nav>
        <h1 itemprop="name">6-Shelf Storage Rack</h1>
        <meta itemprop="price" content="78.00">
        <meta itemprop="priceCurrency" content="USD">
        <div data-testid="variant-group">
            <span data-testid="variant-group-label">Finish</span>
            <button aria-checked="true">Chrome</button>
            <button>Black</button>
        </div>
        <div data-testid="review-card">
            <span data-testid="review-author">Pat</span>
            <span data-testid="review-text">Sturdy and easy to assemble.</span>
            <span data-testid="review-stars" aria-label="4 out of 5 stars"></span>
        </div>
        </body></html>
    "#;

    #[tokio::test]
    async fn extracts_structured_price_and_breadcrumbs() {
        let extractor = WalmartExtractor::new().unwrap();
        let page = PageSnapshot::parse(PRODUCT_PAGE, "https://www.walmart.com/ip/678");
        let product = extractor.extract(&page).await;

        assert_eq!(product.platform, PLATFORM);
        assert_eq!(product.title, "6-Shelf Storage Rack");
        assert!((product.price.amount - 78.0).abs() < f64::EPSILON);
        assert_eq!(product.price.currency.as_deref(), Some("USD"));
        assert_eq!(product.category.as_deref(), Some("Home > Storage"));
    }

    #[tokio::test]
    async fn variant_group_label_comes_from_the_section() {
        let extractor = WalmartExtractor::new().unwrap();
        let page = PageSnapshot::parse(PRODUCT_PAGE, "https://www.walmart.com/ip/678");
        let product = extractor.extract(&page).await;

        assert_eq!(product.variants.len(), 2);
        assert!(product.variants.iter().all(|variant| variant.kind == "Finish"));
        assert_eq!(product.variants[0].selected, Some(true));
    }

    #[tokio::test]
    async fn review_rating_parses_from_aria_label() {
        let extractor = WalmartExtractor::new().unwrap();
        let page = PageSnapshot::parse(PRODUCT_PAGE, "https://www.walmart.com/ip/678");
        let product = extractor.extract(&page).await;

        assert_eq!(product.reviews.len(), 1);
        assert_eq!(product.reviews[0].rating, Some(4.0));
        assert_eq!(product.reviews[0].body, "Sturdy and easy to assemble.");
    }
}
