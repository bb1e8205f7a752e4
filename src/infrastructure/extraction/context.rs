//! Page snapshot handed to extractors.
//!
//! Extraction never touches a live browser. Callers parse the page once and
//! hand the engine a [`PageSnapshot`]; all selector logic runs over the
//! parsed tree, which keeps the algorithms testable against static HTML
//! fixtures.

use scraper::Html;
use url::Url;

/// Parsed snapshot of one product page plus its URL at capture time.
pub struct PageSnapshot {
    document: Html,
    url: String,
}

impl PageSnapshot {
    /// Parse raw HTML into a snapshot. Parsing is lenient and never fails;
    /// malformed markup simply yields a sparse tree.
    pub fn parse(html: &str, url: impl Into<String>) -> Self {
        Self {
            document: Html::parse_document(html),
            url: url.into(),
        }
    }

    pub fn document(&self) -> &Html {
        &self.document
    }

    /// Page URL at extraction time, recorded on the product for provenance.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Resolve a possibly relative or protocol-relative candidate against
    /// the page URL. Returns `None` when no absolute http(s) URL can be
    /// formed.
    pub fn resolve_url(&self, candidate: &str) -> Option<String> {
        let candidate = candidate.trim();
        if candidate.is_empty() {
            return None;
        }
        if candidate.starts_with("http://") || candidate.starts_with("https://") {
            return Some(candidate.to_string());
        }
        if let Some(rest) = candidate.strip_prefix("//") {
            // Protocol-relative: inherit the page scheme, defaulting to https
            let scheme = match self.url.split_once("://") {
                Some(("http", _)) => "http",
                _ => "https",
            };
            return Some(format!("{scheme}://{rest}"));
        }
        let base = Url::parse(&self.url).ok()?;
        let joined = base.join(candidate).ok()?;
        matches!(joined.scheme(), "http" | "https").then(|| joined.to_string())
    }
}
