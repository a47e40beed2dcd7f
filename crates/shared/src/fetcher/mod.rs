mod client;
pub mod extract;

pub use client::HttpPageSource;
pub use extract::{RawSection, SectionExtractor, SkipReason};

use anyhow::Result;
use async_trait::async_trait;
use url::Url;

use crate::error::FetchError;
use crate::models::Product;

/// Anything that can hand back the raw HTML of a page
#[async_trait]
pub trait PageSource: Send + Sync {
    async fn fetch_page(&self, url: &str) -> Result<String, FetchError>;
}

pub struct ProductFetcher<P> {
    source: P,
    extractor: SectionExtractor,
}

impl<P: PageSource> ProductFetcher<P> {
    pub fn new(source: P) -> Result<Self> {
        Ok(Self {
            source,
            extractor: SectionExtractor::new()?,
        })
    }

    /// Fetch the listing page and return at most `limit` products in page order
    pub async fn fetch(&self, base_url: &str, limit: usize) -> Result<Vec<Product>> {
        let base = Url::parse(base_url)?;
        let html = self.source.fetch_page(base_url).await?;
        Ok(self.parse_products(&html, &base, limit))
    }

    pub fn parse_products(&self, html: &str, base: &Url, limit: usize) -> Vec<Product> {
        self.extractor
            .extract_sections(html, limit)
            .into_iter()
            .enumerate()
            .filter_map(|(index, raw)| match raw.into_product(base) {
                Ok(product) => Some(product),
                Err(reason) => {
                    tracing::warn!(section = index + 1, %reason, "skipping listing section");
                    None
                }
            })
            .collect()
    }
}
