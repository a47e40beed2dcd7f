//! Two-step listing extraction.
//!
//! [`SectionExtractor`] walks the page and collects whatever it can find in
//! each listing section into a [`RawSection`]. Nothing there can fail.
//! [`RawSection::into_product`] then decides whether the bag is good enough
//! to become a [`Product`].

use anyhow::{anyhow, Result};
use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::models::Product;

const SECTION_PREFIX: &str = "post-item-";

/// Loosely-typed fields pulled out of one listing section
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawSection {
    pub name: Option<String>,
    pub href: Option<String>,
    pub tagline: Option<String>,
    pub srcset: Option<String>,
    pub src: Option<String>,
    pub topics: Vec<String>,
    pub button_labels: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SkipReason {
    #[error("no product name")]
    MissingName,

    #[error("product name has no link")]
    MissingLink,

    #[error("unresolvable link {0:?}")]
    BadLink(String),
}

pub struct SectionExtractor {
    section: Selector,
    name_span: Selector,
    link: Selector,
    span: Selector,
    img: Selector,
    topic_link: Selector,
    button: Selector,
    paragraph: Selector,
}

impl SectionExtractor {
    pub fn new() -> Result<Self> {
        Ok(Self {
            section: parse_selector("section[data-test]")?,
            name_span: parse_selector("span[data-test^=\"post-name-\"]")?,
            link: parse_selector("a")?,
            span: parse_selector("span")?,
            img: parse_selector("img")?,
            topic_link: parse_selector("a[href^=\"/topics/\"]")?,
            button: parse_selector("button")?,
            paragraph: parse_selector("p")?,
        })
    }

    /// Collect up to `limit` listing sections, in document order
    pub fn extract_sections(&self, html: &str, limit: usize) -> Vec<RawSection> {
        let document = Html::parse_document(html);

        document
            .select(&self.section)
            .filter(|section| {
                section
                    .value()
                    .attr("data-test")
                    .is_some_and(is_listing_marker)
            })
            .take(limit)
            .map(|section| self.extract_section(section))
            .collect()
    }

    fn extract_section(&self, section: ElementRef<'_>) -> RawSection {
        let name_link = section
            .select(&self.name_span)
            .next()
            .and_then(|span| span.select(&self.link).next());

        let tagline = section
            .select(&self.span)
            .find(|span| span.value().classes().any(|c| c.contains("text-secondary")))
            .map(stripped_text);

        let img = section.select(&self.img).next();

        let topics = section
            .select(&self.topic_link)
            .map(stripped_text)
            .filter(|t| !t.is_empty())
            .collect();

        let button_labels = section
            .select(&self.button)
            .filter_map(|button| button.select(&self.paragraph).next())
            .map(stripped_text)
            .collect();

        RawSection {
            name: name_link.map(stripped_text),
            href: name_link.and_then(|a| a.value().attr("href").map(str::to_string)),
            tagline,
            srcset: img.and_then(|i| i.value().attr("srcset").map(str::to_string)),
            src: img.and_then(|i| i.value().attr("src").map(str::to_string)),
            topics,
            button_labels,
        }
    }
}

impl RawSection {
    pub fn into_product(self, base: &Url) -> Result<Product, SkipReason> {
        let name = self
            .name
            .filter(|n| !n.is_empty())
            .ok_or(SkipReason::MissingName)?;
        let href = self.href.ok_or(SkipReason::MissingLink)?;
        let url = base
            .join(&href)
            .map_err(|_| SkipReason::BadLink(href.clone()))?;

        let image_url = self
            .srcset
            .as_deref()
            .and_then(first_srcset_url)
            .or(self.src)
            .unwrap_or_default();

        let comments_count = self
            .button_labels
            .iter()
            .filter(|label| !label.is_empty() && label.bytes().all(|b| b.is_ascii_digit()))
            .find_map(|label| label.parse::<u32>().ok())
            .unwrap_or(0);

        Ok(Product {
            name,
            tagline: self.tagline.unwrap_or_default(),
            url: url.to_string(),
            image_url,
            topics: self.topics,
            comments_count,
        })
    }
}

fn parse_selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| anyhow!("Invalid selector {}: {}", css, e))
}

fn is_listing_marker(value: &str) -> bool {
    value
        .strip_prefix(SECTION_PREFIX)
        .is_some_and(|n| !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit()))
}

/// Trimmed text nodes joined without separators
fn stripped_text(element: ElementRef<'_>) -> String {
    element.text().map(str::trim).collect()
}

fn first_srcset_url(srcset: &str) -> Option<String> {
    let candidate = srcset.split(',').next()?.trim();
    let url = candidate.split(' ').next()?;
    if url.is_empty() {
        None
    } else {
        Some(url.to_string())
    }
}
