use serde::{Deserialize, Serialize};

/// A single launch scraped from the listing page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub name: String,
    pub tagline: String,
    pub url: String,
    pub image_url: String,
    pub topics: Vec<String>,
    pub comments_count: u32,
}

/// A product paired with the model-written copy for the digest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSummary {
    pub name: String,
    pub original_tagline: String,
    pub summary: String,
    pub why_it_matters: String,
    pub url: String,
    pub image_url: String,
    pub topics: Vec<String>,
    pub comments_count: u32,
}

impl ProductSummary {
    pub fn from_product(
        product: &Product,
        summary: impl Into<String>,
        why_it_matters: impl Into<String>,
    ) -> Self {
        Self {
            name: product.name.clone(),
            original_tagline: product.tagline.clone(),
            summary: summary.into(),
            why_it_matters: why_it_matters.into(),
            url: product.url.clone(),
            image_url: product.image_url.clone(),
            topics: product.topics.clone(),
            comments_count: product.comments_count,
        }
    }
}

/// Everything that goes into one digest email
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DigestContent {
    pub intro: String,
    pub products: Vec<ProductSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipient {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

impl Recipient {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    Sent { id: Option<String> },
    Failed { error: String },
}

/// Delivery result for one recipient
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendResult {
    pub recipient: String,
    pub outcome: SendOutcome,
}

impl SendResult {
    pub fn status(&self) -> &'static str {
        match self.outcome {
            SendOutcome::Sent { .. } => "sent",
            SendOutcome::Failed { .. } => "failed",
        }
    }

    pub fn is_sent(&self) -> bool {
        matches!(self.outcome, SendOutcome::Sent { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_copies_product_fields() {
        let product = Product {
            name: "Widget".to_string(),
            tagline: "Widgets for all".to_string(),
            url: "https://example.com/posts/widget".to_string(),
            image_url: "https://img.example.com/w.png".to_string(),
            topics: vec!["Productivity".to_string()],
            comments_count: 12,
        };

        let summary = ProductSummary::from_product(&product, "It does widgets.", "");

        assert_eq!(summary.name, "Widget");
        assert_eq!(summary.original_tagline, "Widgets for all");
        assert_eq!(summary.summary, "It does widgets.");
        assert_eq!(summary.topics, vec!["Productivity"]);
        assert_eq!(summary.comments_count, 12);
    }

    #[test]
    fn test_send_result_status() {
        let sent = SendResult {
            recipient: "a@example.com".to_string(),
            outcome: SendOutcome::Sent { id: None },
        };
        let failed = SendResult {
            recipient: "b@example.com".to_string(),
            outcome: SendOutcome::Failed {
                error: "boom".to_string(),
            },
        };

        assert_eq!(sent.status(), "sent");
        assert!(sent.is_sent());
        assert_eq!(failed.status(), "failed");
        assert!(!failed.is_sent());
    }
}
