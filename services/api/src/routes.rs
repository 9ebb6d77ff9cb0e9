use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use hoa_connect::error::AppError;
use hoa_connect::notifications::{
    Complaint, ContactMessage, DeliveryReceipt, NotificationDispatcher, NotificationStatus,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub(crate) struct ComplaintReplyRequest {
    pub(crate) complaint: Complaint,
    pub(crate) message: String,
    #[serde(default)]
    pub(crate) status: Option<NotificationStatus>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ContactReplyRequest {
    pub(crate) contact: ContactMessage,
    pub(crate) message: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct DispatchResponse {
    pub(crate) status: &'static str,
    pub(crate) provider_status: u16,
}

impl From<DeliveryReceipt> for DispatchResponse {
    fn from(receipt: DeliveryReceipt) -> Self {
        Self {
            status: "sent",
            provider_status: receipt.status,
        }
    }
}

pub(crate) fn notification_routes(dispatcher: Arc<NotificationDispatcher>) -> axum::Router {
    axum::Router::new()
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/complaints",
            axum::routing::post(submit_complaint_endpoint),
        )
        .route(
            "/api/v1/complaints/reply",
            axum::routing::post(reply_to_complainant_endpoint),
        )
        .route(
            "/api/v1/contact",
            axum::routing::post(submit_contact_endpoint),
        )
        .route(
            "/api/v1/contact/reply",
            axum::routing::post(reply_to_contact_endpoint),
        )
        .layer(Extension(dispatcher))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn submit_complaint_endpoint(
    Extension(dispatcher): Extension<Arc<NotificationDispatcher>>,
    Json(complaint): Json<Complaint>,
) -> Result<Json<DispatchResponse>, AppError> {
    let receipt = dispatcher.notify_admin_of_complaint(&complaint).await?;
    Ok(Json(receipt.into()))
}

pub(crate) async fn reply_to_complainant_endpoint(
    Extension(dispatcher): Extension<Arc<NotificationDispatcher>>,
    Json(payload): Json<ComplaintReplyRequest>,
) -> Result<Json<DispatchResponse>, AppError> {
    let ComplaintReplyRequest {
        complaint,
        message,
        status,
    } = payload;

    let receipt = dispatcher
        .reply_to_complainant(&complaint, &message, status)
        .await?;
    Ok(Json(receipt.into()))
}

pub(crate) async fn submit_contact_endpoint(
    Extension(dispatcher): Extension<Arc<NotificationDispatcher>>,
    Json(contact): Json<ContactMessage>,
) -> Result<Json<DispatchResponse>, AppError> {
    let receipt = dispatcher.notify_admin_of_contact(&contact).await?;
    Ok(Json(receipt.into()))
}

pub(crate) async fn reply_to_contact_endpoint(
    Extension(dispatcher): Extension<Arc<NotificationDispatcher>>,
    Json(payload): Json<ContactReplyRequest>,
) -> Result<Json<DispatchResponse>, AppError> {
    let ContactReplyRequest { contact, message } = payload;

    let receipt = dispatcher.reply_to_contact(&contact, &message).await?;
    Ok(Json(receipt.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::response::IntoResponse;
    use chrono::{TimeZone, Utc};
    use hoa_connect::config::NotificationConfig;
    use hoa_connect::notifications::{MailTransport, TemplateParams, TransportError};
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingTransport {
        sent: Mutex<Vec<TemplateParams>>,
        reject: bool,
    }

    impl RecordingTransport {
        fn rejecting() -> Self {
            Self {
                sent: Mutex::new(Vec::new()),
                reject: true,
            }
        }

        fn sent(&self) -> Vec<TemplateParams> {
            self.sent.lock().expect("sent mutex poisoned").clone()
        }
    }

    #[async_trait]
    impl MailTransport for RecordingTransport {
        async fn send(
            &self,
            _service_id: &str,
            _template_id: &str,
            params: &TemplateParams,
        ) -> Result<DeliveryReceipt, TransportError> {
            if self.reject {
                return Err(TransportError::Rejected {
                    status: 400,
                    body: "The Public Key is invalid".to_string(),
                });
            }

            let mut guard = self.sent.lock().expect("sent mutex poisoned");
            guard.push(params.clone());
            Ok(DeliveryReceipt {
                status: 200,
                body: "OK".to_string(),
            })
        }
    }

    fn notify_config() -> NotificationConfig {
        NotificationConfig {
            public_key: "pk_test".to_string(),
            service_id: "service_hoa".to_string(),
            complaint_template_id: "template_complaint".to_string(),
            complaint_reply_template_id: "template_complaint".to_string(),
            contact_template_id: "template_contact".to_string(),
            contact_reply_template_id: "template_contact".to_string(),
            admin_email: "board@hoaconnect.com".to_string(),
        }
    }

    fn dispatcher_with(transport: Arc<RecordingTransport>) -> Arc<NotificationDispatcher> {
        Arc::new(NotificationDispatcher::new(transport, notify_config()))
    }

    fn sample_complaint() -> Complaint {
        Complaint {
            id: None,
            name: "Jane Doe".to_string(),
            email: "jane@x.com".to_string(),
            phone: None,
            property_address: "12 Oak Rd".to_string(),
            complaint_types: vec!["Noise".to_string(), "Parking".to_string()],
            description: "Loud parties".to_string(),
            desired_resolution: "Warning letter".to_string(),
            date_submitted: Utc.with_ymd_and_hms(2024, 1, 5, 12, 0, 0).unwrap(),
        }
    }

    #[tokio::test]
    async fn complaint_submission_dispatches_to_admin() {
        let transport = Arc::new(RecordingTransport::default());
        let dispatcher = dispatcher_with(transport.clone());

        let Json(body) =
            submit_complaint_endpoint(Extension(dispatcher), Json(sample_complaint()))
                .await
                .expect("dispatch succeeds");

        assert_eq!(body.status, "sent");
        assert_eq!(body.provider_status, 200);

        let sent = transport.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].get("to_email"), Some("board@hoaconnect.com"));
        assert_eq!(sent[0].get("complaint_types"), Some("Noise, Parking"));
    }

    #[tokio::test]
    async fn complaint_reply_accepts_optional_status() {
        let transport = Arc::new(RecordingTransport::default());
        let dispatcher = dispatcher_with(transport.clone());

        let request = ComplaintReplyRequest {
            complaint: sample_complaint(),
            message: "The board has opened a case.".to_string(),
            status: Some(NotificationStatus::InReview),
        };

        reply_to_complainant_endpoint(Extension(dispatcher), Json(request))
            .await
            .expect("dispatch succeeds");

        let sent = transport.sent();
        assert_eq!(sent[0].get("status"), Some("In-review"));
        assert_eq!(sent[0].get("to_email"), Some("jane@x.com"));
    }

    #[tokio::test]
    async fn delivery_failure_maps_to_bad_gateway() {
        let transport = Arc::new(RecordingTransport::rejecting());
        let dispatcher = dispatcher_with(transport);

        let err = submit_complaint_endpoint(Extension(dispatcher), Json(sample_complaint()))
            .await
            .expect_err("rejection surfaces");

        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }
}
