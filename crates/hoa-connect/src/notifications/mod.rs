pub mod dispatcher;
pub mod domain;
pub mod params;
pub mod transport;

pub use dispatcher::{DeliveryError, NotificationDispatcher};
pub use domain::{Complaint, ContactMessage, NotificationStatus};
pub use params::{
    capitalize_first, complaint_admin_params, complaint_reply_params, contact_admin_params,
    contact_reply_params, format_submission_date, TemplateParams, ORGANIZATION_NAME,
    UNASSIGNED_COMPLAINT_ID,
};
pub use transport::{
    DeliveryReceipt, EmailJsTransport, MailTransport, TransportError, EMAILJS_API_BASE,
};
