//! End-to-end tests: registry contract plus full extraction over static
//! HTML fixtures.

use async_trait::async_trait;
use marketclip::domain::product::limits;
use marketclip::infrastructure::extraction::{PageSnapshot, ProductExtractor};
use marketclip::{ExtractorRegistry, Product};

const EBAY_FIXTURE: &str = include_str!("fixtures/ebay_product.html");
const EBAY_URL: &str = "https://www.ebay.com/itm/256012345678";

async fn extract(registry: &ExtractorRegistry, platform: &str, html: &str, url: &str) -> Product {
    let factory = registry.resolve(platform).expect("platform registered");
    let extractor = factory().expect("extractor construction");
    let page = PageSnapshot::parse(html, url);
    extractor.extract(&page).await
}

#[tokio::test]
async fn every_builtin_platform_reports_its_own_key() {
    let registry = ExtractorRegistry::with_builtin();
    let platforms: Vec<String> = registry.platforms().map(str::to_string).collect();
    assert_eq!(platforms.len(), 6);

    // A minimal page every profile can handle through its generic fallbacks
    let minimal = "<html><body><h1>Generic Product</h1></body></html>";
    for platform in &platforms {
        let product = extract(&registry, platform, minimal, "https://example.com/p/1").await;
        assert_eq!(&product.platform, platform);
        assert_eq!(product.title, "Generic Product");
        assert_eq!(product.price.amount, 0.0);
        assert!(product.category.is_none());
    }
}

#[tokio::test]
async fn resolve_is_none_for_unknown_platform() {
    let registry = ExtractorRegistry::with_builtin();
    assert!(registry.resolve("geocities").is_none());
    assert!(registry.resolve("").is_none());
}

struct StubExtractor;

#[async_trait(?Send)]
impl ProductExtractor for StubExtractor {
    fn platform(&self) -> &'static str {
        "ebay"
    }

    async fn extract(&self, page: &PageSnapshot) -> Product {
        let mut product = Product::empty(self.platform(), page.url());
        product.title = "stub".to_string();
        product
    }
}

#[tokio::test]
async fn re_registration_overwrites_the_previous_binding() {
    let mut registry = ExtractorRegistry::with_builtin();
    registry.register("ebay", || Ok(Box::new(StubExtractor)));

    let product = extract(&registry, "ebay", "<html></html>", "https://www.ebay.com/itm/1").await;
    assert_eq!(product.title, "stub");
    assert_eq!(product.platform, "ebay");
}

#[tokio::test]
async fn ebay_fixture_extracts_the_full_record() {
    let registry = ExtractorRegistry::with_builtin();
    let product = extract(&registry, "ebay", EBAY_FIXTURE, EBAY_URL).await;

    assert_eq!(product.platform, "ebay");
    assert_eq!(product.url, EBAY_URL);
    assert_eq!(product.title, "Trailblazer 45L Hiking Backpack Waterproof");

    // Structured meta price wins over the visible "US $1,034.00"
    assert!((product.price.amount - 1034.0).abs() < f64::EPSILON);
    assert_eq!(product.price.currency.as_deref(), Some("USD"));

    // Lazy-loaded and filmstrip renditions collapse into distinct hi-res URLs
    assert_eq!(
        product.images,
        vec![
            "https://i.ebayimg.com/images/g/pack1/s-l1600.jpg",
            "https://i.ebayimg.com/images/g/pack2/s-l1600.jpg",
            "https://i.ebayimg.com/images/g/pack3/s-l1600.jpg",
        ]
    );

    assert_eq!(product.videos.len(), 1);
    assert_eq!(product.videos[0].kind, "video");

    let names: Vec<&str> = product.variants.iter().map(|v| v.name.as_str()).collect();
    assert_eq!(names, vec!["Forest Green", "Slate Grey", "Sunset Orange"]);
    assert!(product.variants.iter().all(|v| v.kind == "Color"));
    assert_eq!(product.variants[2].available, Some(false));

    // The author-only item is dropped; the author-less one gets the default
    assert_eq!(product.reviews.len(), 2);
    assert_eq!(product.reviews[0].author, "hikerdan_42");
    assert_eq!(product.reviews[0].rating, Some(5.0));
    assert_eq!(product.reviews[1].author, "eBay Buyer");

    assert_eq!(
        product.specifics.get("Capacity").map(String::as_str),
        Some("45 L")
    );
    assert!(!product.specifics.contains_key("Warranty"));

    assert_eq!(product.brand, "Trailblazer");
    assert_eq!(product.sku, "TB-45L-2024");
    assert_eq!(product.rating, Some(4.8));
    assert_eq!(
        product.category.as_deref(),
        Some("Sporting Goods > Camping & Hiking > Backpacks")
    );
    assert!(product.description.starts_with("The Trailblazer 45L"));
}

#[tokio::test]
async fn image_list_is_deduped_and_capped_in_discovery_order() {
    let registry = ExtractorRegistry::with_builtin();

    // 35 distinct gallery assets, with the first three repeated at the end
    let mut gallery = String::new();
    for i in 0..35 {
        gallery.push_str(&format!(
            "<div class='ux-image-carousel-item'>\
             <img src='https://i.ebayimg.com/images/g/asset{i}/s-l500.jpg'></div>"
        ));
    }
    for i in 0..3 {
        gallery.push_str(&format!(
            "<div class='ux-image-carousel-item'>\
             <img src='https://i.ebayimg.com/images/g/asset{i}/s-l500.jpg'></div>"
        ));
    }
    let html = format!("<html><body>{gallery}</body></html>");

    let product = extract(&registry, "ebay", &html, EBAY_URL).await;
    assert_eq!(product.images.len(), limits::MAX_IMAGES);
    let unique: std::collections::HashSet<&String> = product.images.iter().collect();
    assert_eq!(unique.len(), product.images.len());
    assert_eq!(
        product.images[0],
        "https://i.ebayimg.com/images/g/asset0/s-l1600.jpg"
    );
    assert_eq!(
        product.images[29],
        "https://i.ebayimg.com/images/g/asset29/s-l1600.jpg"
    );
}

#[tokio::test]
async fn hostile_page_stays_within_every_bound() {
    let registry = ExtractorRegistry::with_builtin();

    let mut body = String::new();

    // 150 variant options, the first one absurdly long
    body.push_str("<select id='msku-sel-1'>");
    body.push_str("<option value='-1'>- Select -</option>");
    body.push_str(&format!("<option value='long'>{}</option>", "x".repeat(400)));
    for i in 0..149 {
        body.push_str(&format!("<option value='{i}'>Variant {i}</option>"));
    }
    body.push_str("</select>");

    // 25 reviews, each with a 3000-character body
    let long_body = "y".repeat(3000);
    for i in 0..25 {
        body.push_str(&format!(
            "<div class='ebay-review-section'>\
             <span class='review-item-author'>buyer{i}</span>\
             <div class='review-item-content'><p>{long_body}</p></div></div>"
        ));
    }

    // A 10k-character description
    body.push_str(&format!(
        "<div class='x-item-description'>{}</div>",
        "z".repeat(10_000)
    ));

    // 8 videos
    for i in 0..8 {
        body.push_str(&format!(
            "<video><source src='https://media.ebay.com/video/v{i}.mp4'></video>"
        ));
    }

    let html = format!("<html><body>{body}</body></html>");
    let product = extract(&registry, "ebay", &html, EBAY_URL).await;

    assert_eq!(product.variants.len(), limits::MAX_VARIANTS);
    assert_eq!(
        product.variants[0].name.chars().count(),
        limits::MAX_VARIANT_NAME_CHARS
    );
    assert!(product
        .variants
        .iter()
        .all(|v| v.name.chars().count() <= limits::MAX_VARIANT_NAME_CHARS));
    assert_eq!(product.reviews.len(), limits::MAX_REVIEWS);
    assert!(product
        .reviews
        .iter()
        .all(|r| !r.body.is_empty() && r.body.chars().count() <= limits::MAX_REVIEW_BODY_CHARS));
    assert_eq!(product.videos.len(), limits::MAX_VIDEOS);
    assert_eq!(
        product.description.chars().count(),
        limits::MAX_DESCRIPTION_CHARS
    );
    assert_eq!(product.price.amount, 0.0);
}

#[tokio::test]
async fn product_serializes_for_the_import_pipeline() {
    let registry = ExtractorRegistry::with_builtin();
    let product = extract(&registry, "ebay", EBAY_FIXTURE, EBAY_URL).await;

    let json = serde_json::to_value(&product).unwrap();
    assert_eq!(json["platform"], "ebay");
    assert_eq!(json["price"]["amount"], 1034.0);
    assert_eq!(json["videos"][0]["type"], "video");
    assert!(json["extractedAt"].is_string());
}
