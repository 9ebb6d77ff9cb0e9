use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Resident complaint captured by the submission form.
///
/// Records arrive already validated by the form-handling layer; this
/// subsystem only reads them. `date_submitted` is assigned once at
/// creation and never changes afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Complaint {
    /// Absent until the surrounding system assigns an identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub property_address: String,
    /// Ordered, non-empty list of complaint categories.
    pub complaint_types: Vec<String>,
    pub description: String,
    pub desired_resolution: String,
    pub date_submitted: DateTime<Utc>,
}

/// Inquiry captured by the site-wide contact form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub subject: String,
    pub message: String,
    pub submission_date: DateTime<Utc>,
}

/// Lifecycle label attached to complaint replies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NotificationStatus {
    #[default]
    Pending,
    InReview,
    Resolved,
    Closed,
}

impl NotificationStatus {
    /// Wire label, matching the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationStatus::Pending => "pending",
            NotificationStatus::InReview => "in-review",
            NotificationStatus::Resolved => "resolved",
            NotificationStatus::Closed => "closed",
        }
    }
}
