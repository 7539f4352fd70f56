//! Emergency alert collaborator.
//!
//! # Responsibility
//! - Define the seam through which an alert leaves the core.
//! - Provide a log-only default used when no delivery channel is wired.
//!
//! # Invariants
//! - The collaborator receives the contact data current at call time.
//! - Sending an alert never mutates the resident collection.

use crate::model::resident::EmergencyContact;
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Alert delivery errors reported by collaborators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlertError {
    /// Collaborator could not hand the alert to its channel.
    DeliveryFailed(String),
}

impl Display for AlertError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DeliveryFailed(details) => write!(f, "emergency alert delivery failed: {details}"),
        }
    }
}

impl Error for AlertError {}

/// External notifier invoked with an emergency contact's name and phone.
pub trait EmergencyAlert {
    fn send_alert(&self, contact_name: &str, contact_phone: &str) -> Result<(), AlertError>;
}

/// Default collaborator: records that an alert was raised, nothing else.
///
/// Contact details are kept out of the log line.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogAlert;

impl EmergencyAlert for LogAlert {
    fn send_alert(&self, contact_name: &str, contact_phone: &str) -> Result<(), AlertError> {
        info!(
            "event=emergency_alert module=alert status=ok channel=log name_len={} phone_len={}",
            contact_name.chars().count(),
            contact_phone.chars().count()
        );
        Ok(())
    }
}

/// Operator-facing text shown when an alert is raised.
pub fn alert_message(contact: &EmergencyContact) -> String {
    format!("Contacting {} {}", contact.name, contact.phone)
}
