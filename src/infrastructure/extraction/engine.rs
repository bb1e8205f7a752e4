//! Shared field-extraction engine.
//!
//! One engine instance holds one platform's compiled selector profile and
//! implements every field algorithm. Each field step is a total function:
//! missing or malformed markup degrades to that field's documented default
//! instead of failing the capture, so one broken selector can never blank
//! out unrelated fields.

use once_cell::sync::Lazy;
use ego_tree::NodeId;
use scraper::{ElementRef, Html, Selector};
use std::collections::{HashMap, HashSet};
use tracing::debug;

use crate::domain::product::{
    limits, Product, ProductPrice, ProductVideo, Review, Variant,
};

use super::config::PlatformSelectors;
use super::context::PageSnapshot;
use super::error::ExtractResult;
use super::normalize::{
    canonicalize_image_url, dedupe_and_cap, is_product_image_url, join_breadcrumbs, parse_rating,
    price_token, truncate,
};
use super::select::{
    self, element_value, first_value, first_value_in, select_group, select_group_in,
    CompiledSelector,
};

/// Source-attribute preference for image elements: a real `src` first, then
/// lazy-load data attributes, then zoom attributes. Values that fail the
/// product-image filter (placeholders, sprites) fall through to the next
/// attribute.
const IMAGE_SOURCE_ATTRS: [&str; 7] = [
    "src",
    "data-src",
    "data-lazy-src",
    "data-old-src",
    "data-old-hires",
    "data-zoom-src",
    "data-zoom-image",
];

/// Source-attribute preference for video elements.
const VIDEO_SOURCE_ATTRS: [&str; 3] = ["src", "data-src", "data-video-url"];

/// Fixed type label applied to every extracted video entry.
const VIDEO_KIND: &str = "video";

/// Label used when no variant-group label can be determined.
const GENERIC_VARIANT_LABEL: &str = "Option";

/// Option values that mark an "unselected" placeholder entry.
const VARIANT_VALUE_SENTINELS: [&str; 2] = ["", "-1"];

static SELECT_EL: Lazy<Selector> = Lazy::new(|| Selector::parse("select").unwrap());
static OPTION_EL: Lazy<Selector> = Lazy::new(|| Selector::parse("option").unwrap());
static TABLE_ROW: Lazy<Selector> = Lazy::new(|| Selector::parse("tr").unwrap());
static TABLE_CELL: Lazy<Selector> = Lazy::new(|| Selector::parse("td, th").unwrap());
static DEFINITION_TERM: Lazy<Selector> = Lazy::new(|| Selector::parse("dt").unwrap());
static DEFINITION_DESC: Lazy<Selector> = Lazy::new(|| Selector::parse("dd").unwrap());

/// Per-platform constants that are not selector data.
#[derive(Debug, Clone, Copy)]
pub struct PlatformDefaults {
    /// Author label applied to reviews that omit one.
    pub review_author: &'static str,
    /// Display names marking an "unselected" sentinel option, in addition
    /// to the universal value sentinels.
    pub variant_sentinels: &'static [&'static str],
}

/// Shared engine: compiled selector profile plus platform constants.
pub struct ExtractionEngine {
    platform: &'static str,
    defaults: PlatformDefaults,

    title: Vec<CompiledSelector>,
    price_amount: Vec<CompiledSelector>,
    price_currency: Vec<CompiledSelector>,
    gallery: Vec<Selector>,
    thumbnails: Vec<Selector>,
    videos: Vec<Selector>,
    variant_groups: Vec<Selector>,
    variant_group_label: Vec<Selector>,
    variant_controls: Vec<Selector>,
    review_items: Vec<Selector>,
    review_author: Vec<CompiledSelector>,
    review_body: Vec<CompiledSelector>,
    review_rating: Vec<CompiledSelector>,
    breadcrumbs: Vec<CompiledSelector>,
    spec_tables: Vec<Selector>,
    spec_definition_lists: Vec<Selector>,
    brand: Vec<CompiledSelector>,
    sku: Vec<CompiledSelector>,
    rating: Vec<CompiledSelector>,
    description: Vec<CompiledSelector>,
}

impl ExtractionEngine {
    /// Compile a platform's selector profile. This is the only fallible
    /// step in an extractor's life; extraction itself never errors.
    pub fn new(
        platform: &'static str,
        selectors: &PlatformSelectors,
        defaults: PlatformDefaults,
    ) -> ExtractResult<Self> {
        Ok(Self {
            platform,
            defaults,
            title: select::compile("title", &selectors.title)?,
            price_amount: select::compile("price.amount", &selectors.price.amount)?,
            price_currency: select::compile("price.currency", &selectors.price.currency)?,
            gallery: select::compile_css("media.gallery", &selectors.media.gallery)?,
            thumbnails: select::compile_css("media.thumbnails", &selectors.media.thumbnails)?,
            videos: select::compile_css("media.videos", &selectors.media.videos)?,
            variant_groups: select::compile_css("variants.groups", &selectors.variants.groups)?,
            variant_group_label: select::compile_css(
                "variants.group_label",
                &selectors.variants.group_label,
            )?,
            variant_controls: select::compile_css(
                "variants.controls",
                &selectors.variants.controls,
            )?,
            review_items: select::compile_css("reviews.items", &selectors.reviews.items)?,
            review_author: select::compile("reviews.author", &selectors.reviews.author)?,
            review_body: select::compile("reviews.body", &selectors.reviews.body)?,
            review_rating: select::compile("reviews.rating", &selectors.reviews.rating)?,
            breadcrumbs: select::compile("breadcrumbs", &selectors.breadcrumbs)?,
            spec_tables: select::compile_css("specifics.tables", &selectors.specifics.tables)?,
            spec_definition_lists: select::compile_css(
                "specifics.definition_lists",
                &selectors.specifics.definition_lists,
            )?,
            brand: select::compile("brand", &selectors.brand)?,
            sku: select::compile("sku", &selectors.sku)?,
            rating: select::compile("rating", &selectors.rating)?,
            description: select::compile("description", &selectors.description)?,
        })
    }

    /// Run every field step over the snapshot and assemble the canonical
    /// record. Total over hostile input.
    pub fn extract(&self, page: &PageSnapshot) -> Product {
        let html = page.document();
        let mut product = Product::empty(self.platform, page.url());

        product.title = first_value(html, &self.title).unwrap_or_default();
        product.price = self.extract_price(html);
        product.images = self.extract_images(page);
        product.videos = self.extract_videos(page);
        product.variants = self.extract_variants(html);
        product.reviews = self.extract_reviews(html);
        product.specifics = self.extract_specifics(html);
        product.brand = first_value(html, &self.brand).unwrap_or_default();
        product.sku = first_value(html, &self.sku).unwrap_or_default();
        product.rating = first_value(html, &self.rating).and_then(|raw| parse_rating(&raw));
        product.description = first_value(html, &self.description)
            .map(|text| truncate(&text, limits::MAX_DESCRIPTION_CHARS))
            .unwrap_or_default();
        product.category = self.extract_category(html);

        debug!(
            "extracted {} product: {} images, {} variants, {} reviews",
            self.platform,
            product.images.len(),
            product.variants.len(),
            product.reviews.len()
        );

        product
    }

    fn extract_price(&self, html: &Html) -> ProductPrice {
        let amount = self
            .price_amount
            .iter()
            .find_map(|candidate| {
                html.select(&candidate.selector).find_map(|element| {
                    let raw = match candidate.attr.as_deref() {
                        Some(attr) => element.value().attr(attr)?.to_string(),
                        // Prefer a structured content attribute over the
                        // visible text when the element carries one
                        None => match element
                            .value()
                            .attr("content")
                            .filter(|value| price_token(value).is_some())
                        {
                            Some(content) => content.to_string(),
                            None => element.text().collect::<String>(),
                        },
                    };
                    price_token(&raw)
                })
            })
            .unwrap_or(0.0);

        let currency = first_value(html, &self.price_currency);
        ProductPrice { amount, currency }
    }

    fn extract_images(&self, page: &PageSnapshot) -> Vec<String> {
        let html = page.document();
        let mut found = Vec::new();
        for group in [&self.gallery, &self.thumbnails] {
            for selector in group.iter() {
                for element in html.select(selector) {
                    if let Some(url) = image_candidate(page, element) {
                        found.push(url);
                    }
                }
            }
        }
        dedupe_and_cap(found, limits::MAX_IMAGES)
    }

    fn extract_videos(&self, page: &PageSnapshot) -> Vec<ProductVideo> {
        let html = page.document();
        let mut urls = Vec::new();
        for selector in &self.videos {
            for element in html.select(selector) {
                let source = VIDEO_SOURCE_ATTRS.iter().find_map(|attr| {
                    element
                        .value()
                        .attr(attr)
                        .map(str::trim)
                        .filter(|value| !value.is_empty())
                });
                if let Some(url) = source.and_then(|raw| page.resolve_url(raw)) {
                    urls.push(url);
                }
            }
        }
        dedupe_and_cap(urls, limits::MAX_VIDEOS)
            .into_iter()
            .map(|url| ProductVideo {
                kind: VIDEO_KIND.to_string(),
                url,
            })
            .collect()
    }

    fn extract_variants(&self, html: &Html) -> Vec<Variant> {
        let mut variants = Vec::new();
        let mut seen_groups = HashSet::new();
        // Group selectors may hit nested containers (a select and its
        // wrapper); deduping at the control level keeps each option single.
        let mut seen_controls = HashSet::new();

        'groups: for selector in &self.variant_groups {
            for container in html.select(selector) {
                if variants.len() >= limits::MAX_VARIANTS {
                    break 'groups;
                }
                if !seen_groups.insert(container.id()) {
                    continue;
                }
                self.collect_variant_group(container, &mut variants, &mut seen_controls);
            }
        }

        variants.truncate(limits::MAX_VARIANTS);
        variants
    }

    fn collect_variant_group(
        &self,
        container: ElementRef<'_>,
        variants: &mut Vec<Variant>,
        seen_controls: &mut HashSet<NodeId>,
    ) {
        let kind = self.variant_group_label(container);

        let select_control = if container.value().name() == "select" {
            Some(container)
        } else {
            container.select(&SELECT_EL).next()
        };

        if let Some(select_control) = select_control {
            for option in select_control.select(&OPTION_EL) {
                if variants.len() >= limits::MAX_VARIANTS {
                    return;
                }
                if !seen_controls.insert(option.id()) {
                    continue;
                }
                let Some(name) = element_value(option, None)
                    .or_else(|| element_value(option, Some("title")))
                else {
                    continue;
                };
                let value = option.value().attr("value").map_or(name.as_str(), str::trim);
                if self.is_variant_sentinel(value, &name) {
                    continue;
                }
                variants.push(Variant {
                    kind: kind.clone(),
                    name: truncate(&name, limits::MAX_VARIANT_NAME_CHARS),
                    available: Some(option.value().attr("disabled").is_none()),
                    selected: None,
                });
            }
        } else {
            for control in select_group_in(container, &self.variant_controls) {
                if variants.len() >= limits::MAX_VARIANTS {
                    return;
                }
                if !seen_controls.insert(control.id()) {
                    continue;
                }
                let Some(name) = element_value(control, None)
                    .or_else(|| element_value(control, Some("title")))
                else {
                    continue;
                };
                if self.is_variant_sentinel(&name, &name) {
                    continue;
                }
                let selected = control.value().attr("aria-checked") == Some("true")
                    || control
                        .value()
                        .classes()
                        .any(|class| matches!(class, "selected" | "active" | "checked"));
                variants.push(Variant {
                    kind: kind.clone(),
                    name: truncate(&name, limits::MAX_VARIANT_NAME_CHARS),
                    available: None,
                    selected: Some(selected),
                });
            }
        }
    }

    /// Group label resolution: an associated label in the nearest enclosing
    /// section, then the immediately preceding sibling's text, then a
    /// generic fallback.
    fn variant_group_label(&self, container: ElementRef<'_>) -> String {
        let mut scope = Some(container);
        for _ in 0..3 {
            let Some(element) = scope else { break };
            if let Some(label) = select_group_in(element, &self.variant_group_label)
                .into_iter()
                .find_map(|candidate| element_value(candidate, None))
            {
                return truncate(&label, limits::MAX_VARIANT_NAME_CHARS);
            }
            scope = element.parent().and_then(ElementRef::wrap);
        }

        if let Some(text) = container
            .prev_siblings()
            .find_map(ElementRef::wrap)
            .and_then(|sibling| element_value(sibling, None))
        {
            return truncate(&text, limits::MAX_VARIANT_NAME_CHARS);
        }

        GENERIC_VARIANT_LABEL.to_string()
    }

    fn is_variant_sentinel(&self, value: &str, name: &str) -> bool {
        let value = value.trim();
        if VARIANT_VALUE_SENTINELS.contains(&value) {
            return true;
        }
        let name = name.trim();
        self.defaults
            .variant_sentinels
            .iter()
            .any(|sentinel| name.eq_ignore_ascii_case(sentinel))
    }

    fn extract_reviews(&self, html: &Html) -> Vec<Review> {
        let mut reviews = Vec::new();
        for item in select_group(html, &self.review_items) {
            if reviews.len() == limits::MAX_REVIEWS {
                break;
            }
            // Body is required; an author alone does not make a review
            let Some(body) = first_value_in(item, &self.review_body) else {
                continue;
            };
            let author = first_value_in(item, &self.review_author)
                .unwrap_or_else(|| self.defaults.review_author.to_string());
            let rating =
                first_value_in(item, &self.review_rating).and_then(|raw| parse_rating(&raw));
            reviews.push(Review {
                author,
                body: truncate(&body, limits::MAX_REVIEW_BODY_CHARS),
                rating,
            });
        }
        reviews
    }

    fn extract_specifics(&self, html: &Html) -> HashMap<String, String> {
        let mut specifics = HashMap::new();

        for table in select_group(html, &self.spec_tables) {
            for row in table.select(&TABLE_ROW) {
                let cells: Vec<ElementRef<'_>> = row.select(&TABLE_CELL).collect();
                if cells.len() < 2 {
                    continue;
                }
                let key = cell_text(cells[0]);
                let value = cell_text(cells[1]);
                if !key.is_empty() && is_informative_value(&value) {
                    specifics.insert(key, value);
                }
            }
        }

        for list in select_group(html, &self.spec_definition_lists) {
            let terms: Vec<ElementRef<'_>> = list.select(&DEFINITION_TERM).collect();
            let descriptions: Vec<ElementRef<'_>> = list.select(&DEFINITION_DESC).collect();
            for (term, description) in terms.iter().zip(descriptions.iter()) {
                let key = cell_text(*term);
                let value = cell_text(*description);
                if !key.is_empty() && is_informative_value(&value) {
                    specifics.insert(key, value);
                }
            }
        }

        specifics
    }

    fn extract_category(&self, html: &Html) -> Option<String> {
        for candidate in &self.breadcrumbs {
            let segments: Vec<String> = html
                .select(&candidate.selector)
                .filter_map(|element| element_value(element, candidate.attr.as_deref()))
                .collect();
            if let Some(path) = join_breadcrumbs(&segments) {
                return Some(path);
            }
        }
        None
    }
}

fn image_candidate(page: &PageSnapshot, element: ElementRef<'_>) -> Option<String> {
    IMAGE_SOURCE_ATTRS.iter().find_map(|attr| {
        let raw = element.value().attr(attr)?.trim();
        if raw.is_empty() {
            return None;
        }
        let absolute = page.resolve_url(raw)?;
        let canonical = canonicalize_image_url(&absolute);
        is_product_image_url(&canonical).then_some(canonical)
    })
}

fn cell_text(cell: ElementRef<'_>) -> String {
    cell.text().collect::<String>().trim().to_string()
}

fn is_informative_value(value: &str) -> bool {
    !value.is_empty()
        && value != "-"
        && !value.eq_ignore_ascii_case("n/a")
        && !value.eq_ignore_ascii_case("tbd")
}
