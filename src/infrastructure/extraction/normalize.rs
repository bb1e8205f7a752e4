//! Shared field normalizers.
//!
//! Pure, stateless functions reused by every platform extractor so parsing
//! bugs are fixed once. None of these allocate global state beyond the
//! lazily compiled regexes.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;
use std::hash::Hash;

/// Locale-tolerant numeric token: digits possibly grouped by spaces, dots
/// or commas ("1 234,56", "1,234.56", "999").
static NUMERIC_TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+(?:[\s.,]\d+)*").unwrap());

/// Known CDN renditions that embed a size token in the URL. Rewriting the
/// token yields the high-resolution asset without a network round trip.
static CDN_SIZE_REWRITES: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    vec![
        // eBay: .../s-l64.jpg ... s-l500.jpg renditions
        (Regex::new(r"/s-l\d+(\.\w+)$").unwrap(), "/s-l1600$1"),
        // Amazon: size modifiers between asset id and extension (._AC_SX342_.)
        (Regex::new(r"\._[A-Za-z0-9,_]+_\.").unwrap(), "."),
        // AliExpress: thumbnail suffix repeats the extension (.jpg_220x220.jpg)
        (
            Regex::new(r"(\.(?:jpe?g|png|webp))_\d+x\d+[^/]*$").unwrap(),
            "$1",
        ),
        // Etsy: il_WxH listing thumbnails
        (Regex::new(r"/il_\d+x\d+\.").unwrap(), "/il_fullxfull."),
        // Shopify: _WxH or _WxH_crop_* rendition before the extension.
        // Most generic pattern, so it stays last.
        (
            Regex::new(r"_\d+x\d+(?:_crop_[a-z]+)?(\.\w+)$").unwrap(),
            "$1",
        ),
    ]
});

/// Sprite sheets, placeholders and tracking pixels that must never be
/// reported as product imagery.
static NON_PRODUCT_IMAGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)sprite|placeholder|spacer|blank|pixel|loading|1x1|\.svg(?:\?|$)").unwrap()
});

/// Extract the first numeric token from display text or an attribute value
/// and parse it, accepting `,` or `.` as the decimal separator.
///
/// Returns `None` when no token is present; use [`parse_price`] where the
/// documented default of `0` applies.
pub fn price_token(raw: &str) -> Option<f64> {
    let token = NUMERIC_TOKEN.find(raw)?;
    let compact: String = token
        .as_str()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    let value: f64 = normalize_separators(&compact).parse().ok()?;
    (value.is_finite() && value >= 0.0).then_some(value)
}

/// Normalize a compact numeric token to dot-decimal form.
///
/// A single trailing separator of either kind is treated as the decimal
/// separator; repeated separators of one kind are digit grouping. When both
/// appear, the later one is the decimal separator.
fn normalize_separators(token: &str) -> String {
    let commas = token.matches(',').count();
    let dots = token.matches('.').count();
    match (commas, dots) {
        (0, _) if dots > 1 => token.replace('.', ""),
        (0, _) => token.to_string(),
        (1, 0) => token.replace(',', "."),
        (_, 0) => token.replace(',', ""),
        (_, _) => {
            let comma_pos = token.rfind(',').unwrap_or(0);
            let dot_pos = token.rfind('.').unwrap_or(0);
            if comma_pos > dot_pos {
                let without_dots: String = token.chars().filter(|&c| c != '.').collect();
                without_dots.replace(',', ".")
            } else {
                token.replace(',', "")
            }
        }
    }
}

/// Parse a price out of arbitrary display text or attribute value.
/// Missing or malformed data parses to exactly `0`, never `NaN` or a
/// negative amount.
pub fn parse_price(raw: &str) -> f64 {
    price_token(raw).unwrap_or(0.0)
}

/// Parse a star rating out of text like "4.8 out of 5 stars". Absent data
/// is `None`.
pub fn parse_rating(raw: &str) -> Option<f64> {
    price_token(raw)
}

/// Truncate to at most `max` characters, on a character boundary.
pub fn truncate(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}

/// Rewrite known CDN size tokens to the highest-resolution rendition.
/// Unknown URLs pass through untouched; this is pattern substitution, not a
/// network re-fetch.
pub fn canonicalize_image_url(url: &str) -> String {
    for (pattern, replacement) in CDN_SIZE_REWRITES.iter() {
        if pattern.is_match(url) {
            return pattern.replace(url, *replacement).into_owned();
        }
    }
    url.to_string()
}

/// Candidate image URLs must be absolute http(s) and not a known sprite or
/// placeholder asset.
pub fn is_product_image_url(url: &str) -> bool {
    (url.starts_with("http://") || url.starts_with("https://"))
        && !NON_PRODUCT_IMAGE.is_match(url)
}

/// Order-preserving dedupe, truncated to `max` entries.
pub fn dedupe_and_cap<T>(items: Vec<T>, max: usize) -> Vec<T>
where
    T: Eq + Hash + Clone,
{
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for item in items {
        if out.len() == max {
            break;
        }
        if seen.insert(item.clone()) {
            out.push(item);
        }
    }
    out
}

/// Join breadcrumb segments with `" > "`, trimming and dropping blanks.
/// `None` means no breadcrumb data at all, as distinct from an empty
/// category string.
pub fn join_breadcrumbs(segments: &[String]) -> Option<String> {
    let parts: Vec<&str> = segments
        .iter()
        .map(|segment| segment.trim())
        .filter(|segment| !segment.is_empty())
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" > "))
    }
}
