use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use hoa_connect::config::NotificationConfig;
use hoa_connect::error::AppError;
use hoa_connect::notifications::{DeliveryError, EmailJsTransport, NotificationDispatcher};
use metrics_exporter_prometheus::PrometheusHandle;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Builds the production dispatcher: EmailJS transport bound to the
/// configured public key, injected alongside the static delivery
/// settings.
pub(crate) fn build_dispatcher(
    notifications: &NotificationConfig,
) -> Result<Arc<NotificationDispatcher>, AppError> {
    let transport = EmailJsTransport::new(notifications.public_key.clone())
        .map_err(DeliveryError::from)
        .map_err(AppError::from)?;

    Ok(Arc::new(NotificationDispatcher::new(
        Arc::new(transport),
        notifications.clone(),
    )))
}
