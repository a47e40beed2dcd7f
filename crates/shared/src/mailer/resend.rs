use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::error::{ProviderError, ProviderResult};
use crate::mailer::{EmailTransport, OutgoingEmail};

const RESEND_API_BASE: &str = "https://api.resend.com";

#[derive(Deserialize)]
struct SendResponse {
    id: Option<String>,
}

pub struct ResendClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl ResendClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: RESEND_API_BASE.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl EmailTransport for ResendClient {
    async fn send_message(&self, message: &OutgoingEmail) -> ProviderResult<Option<String>> {
        let url = format!("{}/emails", self.base_url.trim_end_matches('/'));

        let response = self
            .client
            .post(url)
            .bearer_auth(&self.api_key)
            .json(message)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!(%status, %body, "Resend API error");
            return Err(ProviderError::Api(format!("{status}: {body}")));
        }

        let response = response.json::<SendResponse>().await?;
        Ok(response.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn message() -> OutgoingEmail {
        OutgoingEmail {
            from: "Digest <digest@example.com>".to_string(),
            to: vec!["alice@example.com".to_string()],
            subject: "🚀 Product Hunt Daily - 2024-05-01".to_string(),
            html: "<p>hi</p>".to_string(),
            text: "hi".to_string(),
        }
    }

    #[tokio::test]
    async fn test_send_message_posts_email() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/emails"))
            .and(header("authorization", "Bearer re_test"))
            .and(body_json(json!({
                "from": "Digest <digest@example.com>",
                "to": ["alice@example.com"],
                "subject": "🚀 Product Hunt Daily - 2024-05-01",
                "html": "<p>hi</p>",
                "text": "hi"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "msg_123"})))
            .expect(1)
            .mount(&server)
            .await;

        let client = ResendClient::new("re_test").with_base_url(server.uri());
        let id = client.send_message(&message()).await.unwrap();

        assert_eq!(id.as_deref(), Some("msg_123"));
    }

    #[tokio::test]
    async fn test_missing_id_is_none() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&server)
            .await;

        let client = ResendClient::new("re_test").with_base_url(server.uri());
        assert_eq!(client.send_message(&message()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_rejected_message_is_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(422)
                    .set_body_string(r#"{"message":"Invalid `to` field"}"#),
            )
            .mount(&server)
            .await;

        let client = ResendClient::new("re_test").with_base_url(server.uri());
        let err = client.send_message(&message()).await.unwrap_err();

        assert!(err.to_string().contains("422"));
        assert!(err.to_string().contains("Invalid `to` field"));
    }
}
