//! Core library for the HOA Connect referral service.
//!
//! The site itself is presentational; what lives here is the
//! notification dispatch layer that turns resident complaints and
//! visitor contact inquiries into outbound email, plus the
//! configuration, telemetry, and error plumbing the HTTP service
//! builds on.

pub mod config;
pub mod error;
pub mod notifications;
pub mod telemetry;
