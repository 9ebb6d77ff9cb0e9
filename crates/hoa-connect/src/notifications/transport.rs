use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use tracing::debug;

use super::params::TemplateParams;

/// Provider endpoint the production transport posts to.
pub const EMAILJS_API_BASE: &str = "https://api.emailjs.com/api/v1.0";

/// Success value returned by a delivery attempt, wrapping the
/// provider's raw response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryReceipt {
    pub status: u16,
    pub body: String,
}

/// Failure raised by the transport boundary.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("transport request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("provider rejected message ({status}): {body}")]
    Rejected { status: u16, body: String },
}

/// Outbound mail boundary so the dispatcher can be exercised in
/// isolation. Implementations own any timeout policy; this layer
/// imposes none of its own.
#[async_trait]
pub trait MailTransport: Send + Sync {
    async fn send(
        &self,
        service_id: &str,
        template_id: &str,
        params: &TemplateParams,
    ) -> Result<DeliveryReceipt, TransportError>;
}

/// Production transport talking to the EmailJS REST API.
///
/// The public key is bound once at construction; the base URL is
/// overridable so tests can point at a local stub server.
#[derive(Debug, Clone)]
pub struct EmailJsTransport {
    http_client: Client,
    base_url: String,
    public_key: String,
}

impl EmailJsTransport {
    pub fn new(public_key: impl Into<String>) -> Result<Self, TransportError> {
        Self::with_base_url(public_key, EMAILJS_API_BASE)
    }

    pub fn with_base_url(
        public_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, TransportError> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            http_client,
            base_url: base_url.into(),
            public_key: public_key.into(),
        })
    }
}

#[async_trait]
impl MailTransport for EmailJsTransport {
    async fn send(
        &self,
        service_id: &str,
        template_id: &str,
        params: &TemplateParams,
    ) -> Result<DeliveryReceipt, TransportError> {
        let url = format!("{}/email/send", self.base_url);
        let payload = json!({
            "service_id": service_id,
            "template_id": template_id,
            "user_id": self.public_key,
            "template_params": params,
        });

        debug!(service_id, template_id, "posting message to mail provider");

        let response = self.http_client.post(&url).json(&payload).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if status.is_success() {
            Ok(DeliveryReceipt {
                status: status.as_u16(),
                body,
            })
        } else {
            Err(TransportError::Rejected {
                status: status.as_u16(),
                body,
            })
        }
    }
}
