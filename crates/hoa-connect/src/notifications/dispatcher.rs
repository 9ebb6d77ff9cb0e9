use std::sync::Arc;

use tracing::{error, info};

use super::domain::{Complaint, ContactMessage, NotificationStatus};
use super::params::{
    complaint_admin_params, complaint_reply_params, contact_admin_params, contact_reply_params,
    TemplateParams,
};
use super::transport::{DeliveryReceipt, MailTransport, TransportError};
use crate::config::NotificationConfig;

/// Error surfaced to callers when a delivery attempt fails. The
/// underlying transport diagnostic is carried through unchanged; no
/// retry or fallback happens at this layer.
#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Orchestrates the four outbound message flows: submission
/// notifications to the administrator and admin-authored replies back
/// to the submitter, for complaints and contact inquiries alike.
///
/// Holds only the injected transport and the read-only delivery
/// settings, so concurrent calls need no coordination. Each operation
/// issues exactly one send attempt and never mutates its input record.
pub struct NotificationDispatcher {
    transport: Arc<dyn MailTransport>,
    config: NotificationConfig,
}

impl NotificationDispatcher {
    pub fn new(transport: Arc<dyn MailTransport>, config: NotificationConfig) -> Self {
        Self { transport, config }
    }

    /// Notifies the administrator of a newly submitted complaint.
    pub async fn notify_admin_of_complaint(
        &self,
        complaint: &Complaint,
    ) -> Result<DeliveryReceipt, DeliveryError> {
        let params = complaint_admin_params(complaint, &self.config);
        self.deliver(
            "complaint_admin_notification",
            &self.config.complaint_template_id,
            &params,
        )
        .await
    }

    /// Sends an admin-authored reply to the complainant. The status
    /// defaults to [`NotificationStatus::Pending`] when not supplied.
    pub async fn reply_to_complainant(
        &self,
        complaint: &Complaint,
        admin_message: &str,
        status: Option<NotificationStatus>,
    ) -> Result<DeliveryReceipt, DeliveryError> {
        let status = status.unwrap_or_default();
        let params = complaint_reply_params(complaint, admin_message, status, &self.config);
        self.deliver(
            "complaint_reply",
            &self.config.complaint_reply_template_id,
            &params,
        )
        .await
    }

    /// Notifies the administrator of a contact-form inquiry.
    pub async fn notify_admin_of_contact(
        &self,
        contact: &ContactMessage,
    ) -> Result<DeliveryReceipt, DeliveryError> {
        let params = contact_admin_params(contact, &self.config);
        self.deliver(
            "contact_admin_notification",
            &self.config.contact_template_id,
            &params,
        )
        .await
    }

    /// Sends an admin-authored reply to a contact-form submitter.
    pub async fn reply_to_contact(
        &self,
        contact: &ContactMessage,
        admin_message: &str,
    ) -> Result<DeliveryReceipt, DeliveryError> {
        let params = contact_reply_params(contact, admin_message, &self.config);
        self.deliver(
            "contact_reply",
            &self.config.contact_reply_template_id,
            &params,
        )
        .await
    }

    async fn deliver(
        &self,
        operation: &'static str,
        template_id: &str,
        params: &TemplateParams,
    ) -> Result<DeliveryReceipt, DeliveryError> {
        match self
            .transport
            .send(&self.config.service_id, template_id, params)
            .await
        {
            Ok(receipt) => {
                info!(
                    operation,
                    template_id,
                    provider_status = receipt.status,
                    "notification dispatched"
                );
                Ok(receipt)
            }
            Err(err) => {
                error!(operation, template_id, error = %err, "notification delivery failed");
                Err(err.into())
            }
        }
    }
}
