use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::domain::{Complaint, ContactMessage, NotificationStatus};
use crate::config::NotificationConfig;

/// Organization name stamped into every outbound template.
pub const ORGANIZATION_NAME: &str = "HOA Connect";

/// Placeholder used when a complaint has no assigned identifier yet.
pub const UNASSIGNED_COMPLAINT_ID: &str = "N/A";

/// Flat field mapping handed to the mail provider's template engine.
///
/// Built fresh for each send, used once, and discarded. Backed by a
/// `BTreeMap` so field ordering is deterministic in logs and tests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TemplateParams(BTreeMap<String, String>);

impl TemplateParams {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn insert(&mut self, key: &'static str, value: impl Into<String>) {
        self.0.insert(key.to_string(), value.into());
    }
}

/// Whether the message goes to the administrator or back to the
/// person who submitted the form.
enum Purpose<'a> {
    AdminNotification,
    Reply {
        admin_message: &'a str,
        status: Option<NotificationStatus>,
    },
}

/// Complaint fields shared by the admin notification and the reply.
fn complaint_rows(complaint: &Complaint) -> Vec<(&'static str, String)> {
    vec![
        ("name", complaint.name.clone()),
        ("email", complaint.email.clone()),
        ("phone", complaint.phone.clone().unwrap_or_default()),
        ("property_address", complaint.property_address.clone()),
        ("complaint_types", complaint.complaint_types.join(", ")),
        ("description", complaint.description.clone()),
        ("desired_resolution", complaint.desired_resolution.clone()),
    ]
}

fn contact_rows(contact: &ContactMessage) -> Vec<(&'static str, String)> {
    vec![
        ("name", contact.name.clone()),
        ("email", contact.email.clone()),
        ("phone", contact.phone.clone().unwrap_or_default()),
        ("subject", contact.subject.clone()),
    ]
}

/// Single transform behind all four mapping rules. Record-specific
/// rows come from the small tables above; everything common (date,
/// organization, admin address, reply fields, recipient selection)
/// is handled once here so the four cases cannot drift apart.
fn build_params(
    rows: Vec<(&'static str, String)>,
    submitted_at: DateTime<Utc>,
    submitter_email: &str,
    purpose: Purpose<'_>,
    notify: &NotificationConfig,
) -> TemplateParams {
    let mut params = TemplateParams::default();
    for (key, value) in rows {
        params.insert(key, value);
    }

    params.insert("submission_date", format_submission_date(submitted_at));
    params.insert("org_name", ORGANIZATION_NAME);
    params.insert("admin_email", notify.admin_email.clone());

    match purpose {
        Purpose::AdminNotification => {
            params.insert("to_email", notify.admin_email.clone());
        }
        Purpose::Reply {
            admin_message,
            status,
        } => {
            params.insert("to_email", submitter_email);
            params.insert("message", admin_message);
            if let Some(status) = status {
                params.insert("status", capitalize_first(status.as_str()));
            }
        }
    }

    params
}

/// Rule 1: complaint → admin notification.
pub fn complaint_admin_params(complaint: &Complaint, notify: &NotificationConfig) -> TemplateParams {
    build_params(
        complaint_rows(complaint),
        complaint.date_submitted,
        &complaint.email,
        Purpose::AdminNotification,
        notify,
    )
}

/// Rule 2: complaint → reply to the complainant.
pub fn complaint_reply_params(
    complaint: &Complaint,
    admin_message: &str,
    status: NotificationStatus,
    notify: &NotificationConfig,
) -> TemplateParams {
    let mut rows = complaint_rows(complaint);
    rows.push((
        "complaint_id",
        complaint
            .id
            .clone()
            .unwrap_or_else(|| UNASSIGNED_COMPLAINT_ID.to_string()),
    ));

    build_params(
        rows,
        complaint.date_submitted,
        &complaint.email,
        Purpose::Reply {
            admin_message,
            status: Some(status),
        },
        notify,
    )
}

/// Rule 3: contact inquiry → admin notification.
pub fn contact_admin_params(contact: &ContactMessage, notify: &NotificationConfig) -> TemplateParams {
    let mut rows = contact_rows(contact);
    rows.push(("message", contact.message.clone()));

    build_params(
        rows,
        contact.submission_date,
        &contact.email,
        Purpose::AdminNotification,
        notify,
    )
}

/// Rule 4: contact inquiry → reply to the submitter. The visitor's
/// original text moves to `original_message`; `message` carries the
/// admin-authored reply.
pub fn contact_reply_params(
    contact: &ContactMessage,
    admin_message: &str,
    notify: &NotificationConfig,
) -> TemplateParams {
    let mut rows = contact_rows(contact);
    rows.push(("original_message", contact.message.clone()));

    build_params(
        rows,
        contact.submission_date,
        &contact.email,
        Purpose::Reply {
            admin_message,
            status: None,
        },
        notify,
    )
}

/// Formats a submission timestamp the way the site renders dates:
/// `M/D/YYYY` without zero padding, e.g. 2024-01-05 → `1/5/2024`.
pub fn format_submission_date(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%-m/%-d/%Y").to_string()
}

/// Upper-cases the first character and leaves the remainder unchanged,
/// so `"in-review"` renders as `"In-review"` in reply templates.
pub fn capitalize_first(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
