//! Amazon product page extractor.

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

pub const PLATFORM: &str = "amazon";

const DEFAULTS: PlatformDefaults = PlatformDefaults {
    review_author: "Amazon Customer",
    variant_sentinels: &["Select", "Select Size", "Choose an option"],
};

pub struct AmazonExtractor {
    engine: ExtractionEngine,
}

impl AmazonExtractor {
    pub fn new() -> Result<Self> {
        let engine = ExtractionEngine::new(PLATFORM, &selector_profile(), DEFAULTS)?;
        Ok(Self { engine })
    }
}

#[async_trait(?Send)]
impl ProductExtractor for AmazonExtractor {
    fn platform(&self) -> &'static str {
        PLATFORM
    }

    async fn extract(&self, page: &PageSnapshot) -> Product {
        self.engine.extract(page)
    }
}

/// Register the Amazon extractor.
pub fn register(registry: &mut ExtractorRegistry) {
    registry.register(PLATFORM, || Ok(Box::new(AmazonExtractor::new()?)));
}

fn selector_profile() -> PlatformSelectors {
    PlatformSelectors {
        title: vec![
            SelectorSpec::text("#productTitle"),
            SelectorSpec::text("#title"),
            SelectorSpec::text("h1"),
        ],
        price: PriceSelectors {
            amount: vec![
                // The offscreen span carries the full price as plain text
                SelectorSpec::text(".a-price .a-offscreen"),
                SelectorSpec::text("#priceblock_ourprice"),
                SelectorSpec::text("#priceblock_dealprice"),
                SelectorSpec::text("#price_inside_buybox"),
            ],
            currency: vec![
                SelectorSpec::attr("[itemprop='priceCurrency']", "content"),
                SelectorSpec::attr("#attach-currency-code", "value"),
            ],
        },
        media: MediaSelectors {
            gallery: vec![
                "#landingImage".to_string(),
                "#imgBlkFront".to_string(),
                "#main-image-container img".to_string(),
            ],
            thumbnails: vec![
                "#altImages img".to_string(),
                ".imageThumbnail img".to_string(),
            ],
            videos: vec![
                "#vse-related-videos video source".to_string(),
                "video source".to_string(),
                "video".to_string(),
            ],
        },
        variants: VariantSelectors {
            groups: vec![
                "#twister [id^='variation_']".to_string(),
                "select[name='dropdown_selected_size_name']".to_string(),
            ],
            group_label: vec![
                ".a-form-label".to_string(),
                "label".to_string(),
                "legend".to_string(),
            ],
            controls: vec![
                "li .swatch-title-text".to_string(),
                "li".to_string(),
                "button".to_string(),
            ],
        },
        reviews: ReviewSelectors {
            items: vec!["[data-hook='review']".to_string(), ".review".to_string()],
            author: vec![SelectorSpec::text(".a-profile-name")],
            body: vec![
                SelectorSpec::text("[data-hook='review-body'] span"),
                SelectorSpec::text("[data-hook='review-body']"),
                SelectorSpec::text(".review-text-content"),
            ],
            rating: vec![
                SelectorSpec::text("[data-hook='review-star-rating'] .a-icon-alt"),
                SelectorSpec::text(".a-icon-alt"),
            ],
        },
        breadcrumbs: vec![
            SelectorSpec::text("#wayfinding-breadcrumbs_feature_div a"),
            SelectorSpec::text(".a-breadcrumb a"),
        ],
        specifics: SpecificsSelectors {
            tables: vec![
                "#productDetails_techSpec_section_1".to_string(),
                "#productDetails_detailBullets_sections1".to_string(),
                ".prodDetTable".to_string(),
            ],
            definition_lists: vec!["dl".to_string()],
        },
        brand: vec![
            SelectorSpec::text("#bylineInfo"),
            SelectorSpec::text("a#brand"),
        ],
        sku: vec![
            SelectorSpec::attr("#ASIN", "value"),
            SelectorSpec::attr("[data-asin]", "data-asin"),
            SelectorSpec::text("[itemprop='sku']"),
        ],
        rating: vec![
            SelectorSpec::attr("#acrPopover", "title"),
            SelectorSpec::text("#averageCustomerReviews .a-icon-alt"),
        ],
        description: vec![
            SelectorSpec::text("#productDescription"),
            SelectorSpec::text("#feature-bullets"),
            SelectorSpec::text("#bookDescription_feature_div"),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PRODUCT_PAGE: &str = r#"
        <html><body>
        <div id="wayfinding-breadcrumbs_feature_div">
            <a href="/kitchen">Kitchen</a><a href="/coffee">Coffee Makers</a>
        </div>
        <h1><span id="productTitle"> Acme 12-Cup Coffee Maker </span></h1>
        <span class="a-price"><span class="a-offscreen">$89.00</span></span>
        <img id="landingImage"
             src="https://m.media-amazon.com/images/I/61abc._AC_SX466_.jpg"
             data-old-hires="https://m.media-amazon.com/images/I/61abc._AC_SL1500_.jpg">
        <input type="hidden" id="ASIN" value="B01ABCDEFG">
        <span id="acrPopover" title="4.6 out of 5 stars"></span>
        <div data-hook="review">
            <span class="a-profile-name">Jo</span>
            <span data-hook="review-body"><span>Brews fast, keeps coffee hot.</span></span>
            <i data-hook="review-star-rating"><span class="a-icon-alt">5.0 out of 5 stars</span></i>
        </div>
        <div data-hook="review">
            <span class="a-profile-name">NoBodyText</span>
        </div>
        </body></html>
    "#;

    #[tokio::test]
    async fn extracts_core_fields() {
        let extractor = AmazonExtractor::new().unwrap();
        let page = PageSnapshot::parse(PRODUCT_PAGE, "https://www.amazon.com/dp/B01ABCDEFG");
        let product = extractor.extract(&page).await;

        assert_eq!(product.platform, PLATFORM);
        assert_eq!(product.title, "Acme 12-Cup Coffee Maker");
        assert!((product.price.amount - 89.0).abs() < f64::EPSILON);
        assert_eq!(product.sku, "B01ABCDEFG");
        assert_eq!(product.rating, Some(4.6));
        assert_eq!(
            product.category.as_deref(),
            Some("Kitchen > Coffee Makers")
        );
    }

    #[tokio::test]
    async fn size_modifiers_are_stripped_from_image_urls() {
        let extractor = AmazonExtractor::new().unwrap();
        let page = PageSnapshot::parse(PRODUCT_PAGE, "https://www.amazon.com/dp/B01ABCDEFG");
        let product = extractor.extract(&page).await;

        assert_eq!(
            product.images,
            vec!["https://m.media-amazon.com/images/I/61abc.jpg"]
        );
    }

    #[tokio::test]
    async fn reviews_without_body_text_are_dropped() {
        let extractor = AmazonExtractor::new().unwrap();
        let page = PageSnapshot::parse(PRODUCT_PAGE, "https://www.amazon.com/dp/B01ABCDEFG");
        let product = extractor.extract(&page).await;

        assert_eq!(product.reviews.len(), 1);
        assert_eq!(product.reviews[0].author, "Jo");
        assert_eq!(product.reviews[0].rating, Some(5.0));
    }
}
