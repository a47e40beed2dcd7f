mod gemini;

pub use gemini::GeminiClient;

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::ProviderResult;
use crate::models::{DigestContent, Product, ProductSummary};

pub const EMPTY_INTRO: &str = "No products found today.";
pub const FALLBACK_INTRO: &str = "Here are today's top Product Hunt launches!";
pub const FALLBACK_WHY_IT_MATTERS: &str = "Check it out on Product Hunt!";
pub const TEMPERATURE: f32 = 0.7;

pub const SYSTEM_INSTRUCTION: &str = r#"You are a tech product analyst and newsletter writer for Product Hunt daily digests.

Your task is to create engaging, concise summaries of new product launches.

For each product, you will receive:
- Product name
- Tagline
- Topics/Categories

You must provide:
1. A brief 2-3 sentence summary explaining what the product does and its key value proposition
2. A "Why it matters" insight (1 sentence) about who would benefit from this product

Guidelines:
- Be concise and informative
- Use an engaging, professional tone suitable for a newsletter
- Avoid marketing fluff - focus on practical utility
- Highlight unique or innovative aspects when relevant
- Keep each product summary under 100 words total

Format your response as JSON with the following structure for each product:
{
    "products": [
        {
            "name": "Product Name",
            "summary": "Your 2-3 sentence summary here.",
            "why_it_matters": "Your insight about who benefits."
        }
    ],
    "intro": "A brief 1-2 sentence intro for today's digest."
}"#;

/// A single request for JSON output from a language model
#[derive(Debug, Clone, PartialEq)]
pub struct JsonPrompt<'a> {
    pub system_instruction: &'a str,
    pub prompt: &'a str,
    pub temperature: f32,
}

#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Returns the raw response text, which is supposed to be JSON
    async fn generate_json(&self, request: &JsonPrompt<'_>) -> ProviderResult<String>;
}

#[derive(Debug, Default, Deserialize)]
struct ModelDigest {
    #[serde(default)]
    intro: Option<String>,
    #[serde(default)]
    products: Vec<ModelEntry>,
}

#[derive(Debug, Default, Deserialize)]
struct ModelEntry {
    #[serde(default)]
    summary: Option<String>,
    #[serde(default)]
    why_it_matters: Option<String>,
}

pub struct Summarizer<L> {
    model: L,
}

impl<L: LanguageModel> Summarizer<L> {
    pub fn new(model: L) -> Self {
        Self { model }
    }

    pub async fn summarize(&self, products: &[Product]) -> DigestContent {
        if products.is_empty() {
            return DigestContent {
                intro: EMPTY_INTRO.to_string(),
                products: Vec::new(),
            };
        }

        let prompt = build_prompt(products);
        let request = JsonPrompt {
            system_instruction: SYSTEM_INSTRUCTION,
            prompt: &prompt,
            temperature: TEMPERATURE,
        };

        let text = match self.model.generate_json(&request).await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(error = %e, "summary request failed, using fallback digest");
                return fallback_digest(products);
            }
        };

        match serde_json::from_str::<ModelDigest>(&text) {
            Ok(digest) => merge_digest(products, digest),
            Err(e) => {
                tracing::warn!(error = %e, "model response was not valid JSON, using fallback digest");
                fallback_digest(products)
            }
        }
    }
}

pub fn build_prompt(products: &[Product]) -> String {
    let product_info = products
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let topics = if p.topics.is_empty() {
                "N/A".to_string()
            } else {
                p.topics.join(", ")
            };
            format!(
                "Product {}:\n- Name: {}\n- Tagline: {}\n- Topics: {}",
                i + 1,
                p.name,
                p.tagline,
                topics
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    format!(
        "Please summarize these {} Product Hunt launches for today's digest:\n\n{}\n\n\
        Remember to provide a JSON response with summaries for each product and a brief intro.",
        products.len(),
        product_info
    )
}

/// Pair model entries with products by position; the `name` field is ignored
fn merge_digest(products: &[Product], digest: ModelDigest) -> DigestContent {
    let mut entries = digest.products.into_iter();

    let summaries = products
        .iter()
        .map(|product| {
            let entry = entries.next().unwrap_or_default();
            ProductSummary::from_product(
                product,
                entry.summary.unwrap_or_else(|| product.tagline.clone()),
                entry.why_it_matters.unwrap_or_default(),
            )
        })
        .collect();

    DigestContent {
        intro: digest.intro.unwrap_or_else(|| FALLBACK_INTRO.to_string()),
        products: summaries,
    }
}

pub fn fallback_digest(products: &[Product]) -> DigestContent {
    DigestContent {
        intro: FALLBACK_INTRO.to_string(),
        products: products
            .iter()
            .map(|p| ProductSummary::from_product(p, p.tagline.clone(), FALLBACK_WHY_IT_MATTERS))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProviderError;
    use std::sync::Mutex;

    /// Replays a canned response and remembers what it was asked
    struct ScriptedModel {
        response: Result<String, String>,
        prompts: Mutex<Vec<(String, f32)>>,
    }

    impl ScriptedModel {
        fn replying(text: &str) -> Self {
            Self {
                response: Ok(text.to_string()),
                prompts: Mutex::new(Vec::new()),
            }
        }

        fn failing(message: &str) -> Self {
            Self {
                response: Err(message.to_string()),
                prompts: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> usize {
            self.prompts.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl LanguageModel for ScriptedModel {
        async fn generate_json(&self, request: &JsonPrompt<'_>) -> ProviderResult<String> {
            self.prompts
                .lock()
                .unwrap()
                .push((request.prompt.to_string(), request.temperature));
            self.response.clone().map_err(ProviderError::Api)
        }
    }

    fn product(name: &str, topics: &[&str]) -> Product {
        Product {
            name: name.to_string(),
            tagline: format!("{} tagline", name),
            url: format!("https://www.producthunt.com/posts/{}", name.to_lowercase()),
            image_url: String::new(),
            topics: topics.iter().map(|t| t.to_string()).collect(),
            comments_count: 3,
        }
    }

    fn three_products() -> Vec<Product> {
        vec![
            product("Alpha", &["AI"]),
            product("Beta", &[]),
            product("Gamma", &["Dev Tools", "Open Source"]),
        ]
    }

    // ==================== Prompt Tests ====================

    #[test]
    fn test_build_prompt_lists_every_product() {
        let prompt = build_prompt(&three_products());

        assert!(prompt.starts_with("Please summarize these 3 Product Hunt launches"));
        assert!(prompt.contains("Product 1:\n- Name: Alpha\n- Tagline: Alpha tagline\n- Topics: AI"));
        assert!(prompt.contains("Product 2:\n- Name: Beta\n- Tagline: Beta tagline\n- Topics: N/A"));
        assert!(prompt.contains("- Topics: Dev Tools, Open Source"));
        assert!(prompt.ends_with("summaries for each product and a brief intro."));
    }

    #[test]
    fn test_system_instruction_describes_schema() {
        assert!(SYSTEM_INSTRUCTION.contains("\"why_it_matters\""));
        assert!(SYSTEM_INSTRUCTION.contains("under 100 words"));
    }

    // ==================== Mapping Tests ====================

    #[tokio::test]
    async fn test_empty_input_skips_model() {
        let model = ScriptedModel::replying("{}");
        let summarizer = Summarizer::new(model);

        let digest = summarizer.summarize(&[]).await;

        assert_eq!(digest.intro, "No products found today.");
        assert!(digest.products.is_empty());
        assert_eq!(summarizer.model.calls(), 0);
    }

    #[tokio::test]
    async fn test_full_response_is_mapped() {
        let model = ScriptedModel::replying(
            r#"{
                "intro": "Big day for builders.",
                "products": [
                    {"name": "Alpha", "summary": "A does a.", "why_it_matters": "For A people."},
                    {"name": "Beta", "summary": "B does b.", "why_it_matters": "For B people."},
                    {"name": "Gamma", "summary": "G does g.", "why_it_matters": "For G people."}
                ]
            }"#,
        );
        let summarizer = Summarizer::new(model);

        let digest = summarizer.summarize(&three_products()).await;

        assert_eq!(digest.intro, "Big day for builders.");
        assert_eq!(digest.products.len(), 3);
        assert_eq!(digest.products[1].summary, "B does b.");
        assert_eq!(digest.products[2].why_it_matters, "For G people.");
        assert_eq!(digest.products[2].original_tagline, "Gamma tagline");

        let prompts = summarizer.model.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert_eq!(prompts[0].1, 0.7);
    }

    #[tokio::test]
    async fn test_short_response_pads_with_taglines() {
        let model = ScriptedModel::replying(
            r#"{
                "intro": "Two of three.",
                "products": [
                    {"name": "Alpha", "summary": "A does a.", "why_it_matters": "For A people."},
                    {"name": "Beta", "summary": "B does b.", "why_it_matters": "For B people."}
                ]
            }"#,
        );
        let summarizer = Summarizer::new(model);

        let digest = summarizer.summarize(&three_products()).await;

        assert_eq!(digest.products.len(), 3);
        let names: Vec<_> = digest.products.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Alpha", "Beta", "Gamma"]);
        assert_eq!(digest.products[2].summary, "Gamma tagline");
        assert_eq!(digest.products[2].why_it_matters, "");
    }

    #[tokio::test]
    async fn test_pairs_by_position_not_name() {
        let model = ScriptedModel::replying(
            r#"{"intro": "x", "products": [
                {"name": "Beta", "summary": "first entry"},
                {"name": "Alpha", "summary": "second entry"}
            ]}"#,
        );
        let summarizer = Summarizer::new(model);

        let products = vec![product("Alpha", &[]), product("Beta", &[])];
        let digest = summarizer.summarize(&products).await;

        assert_eq!(digest.products[0].name, "Alpha");
        assert_eq!(digest.products[0].summary, "first entry");
        assert_eq!(digest.products[1].summary, "second entry");
    }

    #[tokio::test]
    async fn test_missing_fields_use_defaults() {
        let model = ScriptedModel::replying(r#"{"products": [{"name": "Alpha"}]}"#);
        let summarizer = Summarizer::new(model);

        let digest = summarizer.summarize(&[product("Alpha", &[])]).await;

        assert_eq!(digest.intro, FALLBACK_INTRO);
        assert_eq!(digest.products[0].summary, "Alpha tagline");
        assert_eq!(digest.products[0].why_it_matters, "");
    }

    // ==================== Fallback Tests ====================

    #[tokio::test]
    async fn test_invalid_json_uses_fallback() {
        let model = ScriptedModel::replying("Sure! Here are your summaries: ...");
        let summarizer = Summarizer::new(model);

        let digest = summarizer.summarize(&three_products()).await;

        assert_eq!(digest.intro, "Here are today's top Product Hunt launches!");
        assert_eq!(digest.products.len(), 3);
        for (summary, product) in digest.products.iter().zip(three_products()) {
            assert_eq!(summary.name, product.name);
            assert_eq!(summary.summary, product.tagline);
            assert_eq!(summary.why_it_matters, FALLBACK_WHY_IT_MATTERS);
        }
    }

    #[tokio::test]
    async fn test_request_failure_uses_fallback() {
        let model = ScriptedModel::failing("503: overloaded");
        let summarizer = Summarizer::new(model);

        let digest = summarizer.summarize(&three_products()).await;

        assert_eq!(digest.intro, FALLBACK_INTRO);
        assert_eq!(digest.products.len(), 3);
        assert_eq!(digest.products[0].summary, "Alpha tagline");
        assert_eq!(summarizer.model.calls(), 1);
    }
}
