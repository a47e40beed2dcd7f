pub mod render;
mod resend;

pub use render::DigestRenderer;
pub use resend::ResendClient;

use async_trait::async_trait;
use chrono::{Local, NaiveDate};
use serde::Serialize;

use crate::error::ProviderResult;
use crate::models::{DigestContent, Recipient, SendOutcome, SendResult};

/// Wire shape of one outgoing message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutgoingEmail {
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub html: String,
    pub text: String,
}

#[async_trait]
pub trait EmailTransport: Send + Sync {
    /// Deliver one message, returning the provider's message id if it gave one
    async fn send_message(&self, message: &OutgoingEmail) -> ProviderResult<Option<String>>;
}

pub fn subject_line(subject_prefix: &str, date: NaiveDate) -> String {
    format!("{} - {}", subject_prefix, date.format("%Y-%m-%d"))
}

pub struct Mailer<T> {
    transport: T,
}

impl<T: EmailTransport> Mailer<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub async fn send(
        &self,
        digest: &DigestContent,
        recipients: &[Recipient],
        from: &str,
        subject_prefix: &str,
    ) -> Vec<SendResult> {
        let today = Local::now().date_naive();
        self.send_on(digest, recipients, from, subject_prefix, today)
            .await
    }

    /// Send to every recipient in order; one failure never stops the rest
    pub async fn send_on(
        &self,
        digest: &DigestContent,
        recipients: &[Recipient],
        from: &str,
        subject_prefix: &str,
        date: NaiveDate,
    ) -> Vec<SendResult> {
        let subject = subject_line(subject_prefix, date);
        let html = DigestRenderer::html(digest, date);
        let text = DigestRenderer::text(digest, date);

        let mut results = Vec::with_capacity(recipients.len());

        for recipient in recipients {
            let message = OutgoingEmail {
                from: from.to_string(),
                to: vec![recipient.email.clone()],
                subject: subject.clone(),
                html: html.clone(),
                text: text.clone(),
            };

            let outcome = match self.transport.send_message(&message).await {
                Ok(id) => {
                    println!("✅ Email sent to {} <{}>", recipient.name, recipient.email);
                    SendOutcome::Sent { id }
                }
                Err(e) => {
                    println!(
                        "❌ Failed to send email to {} <{}>: {}",
                        recipient.name, recipient.email, e
                    );
                    SendOutcome::Failed {
                        error: e.to_string(),
                    }
                }
            };

            results.push(SendResult {
                recipient: recipient.email.clone(),
                outcome,
            });
        }

        results
    }
}
