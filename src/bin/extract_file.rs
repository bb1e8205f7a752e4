//! Probe binary: run one platform extractor over a saved product page.
//!
//! Usage: `extract_file <platform> <page.html> [url]`
//!
//! Prints the canonical Product as pretty JSON, the same shape the
//! downstream import pipeline consumes.

use anyhow::{anyhow, Context, Result};

use marketclip::infrastructure::extraction::{ExtractorRegistry, PageSnapshot};
use marketclip::infrastructure::logging::init_logging;

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    let mut args = std::env::args().skip(1);
    let (Some(platform), Some(path)) = (args.next(), args.next()) else {
        eprintln!("usage: extract_file <platform> <page.html> [url]");
        std::process::exit(2);
    };
    let url = args
        .next()
        .unwrap_or_else(|| format!("https://{platform}.example/product"));

    let html = tokio::fs::read_to_string(&path)
        .await
        .with_context(|| format!("failed to read {path}"))?;

    let registry = ExtractorRegistry::with_builtin();
    let factory = registry
        .resolve(&platform)
        .ok_or_else(|| anyhow!("unsupported platform: {platform}"))?;
    let extractor = factory()?;

    let page = PageSnapshot::parse(&html, url);
    let product = extractor.extract(&page).await;

    println!("{}", serde_json::to_string_pretty(&product)?);
    Ok(())
}
