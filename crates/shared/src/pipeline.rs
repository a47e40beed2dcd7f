//! The fetch → summarize → send run, independent of how the providers are built.

use anyhow::{Context, Result};

use crate::config::{Config, Secrets};
use crate::fetcher::{HttpPageSource, PageSource, ProductFetcher};
use crate::mailer::{EmailTransport, Mailer, ResendClient};
use crate::models::{DigestContent, Recipient, SendResult};
use crate::summarizer::{GeminiClient, LanguageModel, Summarizer};

/// Builds the three external capabilities on demand, so a missing key only
/// matters once the stage that needs it is reached
pub trait Providers {
    type Pages: PageSource;
    type Model: LanguageModel;
    type Transport: EmailTransport;

    fn page_source(&self) -> Result<Self::Pages>;
    fn language_model(&self) -> Result<Self::Model>;
    fn email_transport(&self) -> Result<Self::Transport>;
}

/// Providers backed by the real Product Hunt, Gemini and Resend endpoints
pub struct LiveProviders<'a> {
    config: &'a Config,
    secrets: &'a Secrets,
}

impl<'a> LiveProviders<'a> {
    pub fn new(config: &'a Config, secrets: &'a Secrets) -> Self {
        Self { config, secrets }
    }
}

impl Providers for LiveProviders<'_> {
    type Pages = HttpPageSource;
    type Model = GeminiClient;
    type Transport = ResendClient;

    fn page_source(&self) -> Result<HttpPageSource> {
        HttpPageSource::new()
    }

    fn language_model(&self) -> Result<GeminiClient> {
        let key = self.secrets.gemini_api_key()?;
        Ok(GeminiClient::new(key, &self.config.gemini.model))
    }

    fn email_transport(&self) -> Result<ResendClient> {
        let key = self.secrets.resend_api_key()?;
        Ok(ResendClient::new(key))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Send,
    DryRun,
}

#[derive(Debug)]
pub enum RunOutcome {
    /// The listing page had nothing on it
    NoProducts,
    /// Digest was rendered to stdout instead of being mailed
    Previewed(DigestContent),
    Delivered(Vec<SendResult>),
}

impl RunOutcome {
    pub fn failed_sends(&self) -> usize {
        match self {
            RunOutcome::Delivered(results) => results.iter().filter(|r| !r.is_sent()).count(),
            _ => 0,
        }
    }

    pub fn exit_code(&self) -> u8 {
        if self.failed_sends() == 0 {
            0
        } else {
            1
        }
    }
}

/// Recipients that can be mailed, or an error naming the config file
pub fn validated_recipients(config: &Config, source: &str) -> Result<Vec<Recipient>> {
    let recipients = config.recipients();
    if recipients.is_empty() {
        anyhow::bail!("No recipients configured in {}", source);
    }
    Ok(recipients)
}

pub async fn run<P: Providers>(
    config: &Config,
    recipients: &[Recipient],
    providers: &P,
    mode: Mode,
) -> Result<RunOutcome> {
    let limit = config.settings.product_count;
    let base_url = &config.settings.product_hunt_url;

    println!("🔍 Fetching top {} products from Product Hunt...", limit);
    let fetcher = ProductFetcher::new(providers.page_source()?)?;
    let products = fetcher
        .fetch(base_url, limit)
        .await
        .context("Error fetching products")?;

    if products.is_empty() {
        println!("⚠️  No products found. Exiting.");
        return Ok(RunOutcome::NoProducts);
    }

    println!("✅ Found {} products:", products.len());
    for (i, p) in products.iter().enumerate() {
        println!("   {}. {} - {}...", i + 1, p.name, truncate_chars(&p.tagline, 50));
    }
    println!();

    println!("🤖 Generating summaries with {}...", config.gemini.model);
    let summarizer = Summarizer::new(
        providers
            .language_model()
            .context("Error generating summaries")?,
    );
    let digest = summarizer.summarize(&products).await;
    println!("✅ Summaries generated successfully!");
    println!();

    if mode == Mode::DryRun {
        return Ok(RunOutcome::Previewed(digest));
    }

    println!("📤 Sending digest emails...");
    let mailer = Mailer::new(
        providers
            .email_transport()
            .context("Error sending emails")?,
    );
    let results = mailer
        .send(
            &digest,
            recipients,
            &config.email.from,
            &config.email.subject_prefix,
        )
        .await;

    Ok(RunOutcome::Delivered(results))
}

fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}
