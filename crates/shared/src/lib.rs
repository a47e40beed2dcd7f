// Public modules
pub mod config;
pub mod error;
pub mod fetcher;
pub mod mailer;
pub mod models;
pub mod pipeline;
pub mod summarizer;

// Re-export commonly used types
pub use config::{Config, Secrets};
pub use error::{FetchError, ProviderError};
pub use fetcher::{HttpPageSource, PageSource, ProductFetcher};
pub use mailer::{EmailTransport, Mailer, ResendClient};
pub use models::{DigestContent, Product, ProductSummary, Recipient, SendOutcome, SendResult};
pub use pipeline::{LiveProviders, Mode, Providers, RunOutcome};
pub use summarizer::{GeminiClient, LanguageModel, Summarizer};
