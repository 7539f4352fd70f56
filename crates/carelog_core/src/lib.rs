//! Core domain logic for Carelog, a care-facility resident tracker.
//! This crate is the single source of truth for resident and medication
//! invariants; front ends only render snapshots and submit intents.

pub mod alert;
pub mod clock;
pub mod form;
pub mod logging;
pub mod model;
pub mod ops;
pub mod seed;
pub mod store;
pub mod view;

pub use alert::{alert_message, AlertError, EmergencyAlert, LogAlert};
pub use clock::{Clock, FixedClock, SystemClock};
pub use form::{FormError, FormSubmission, ResidentForm, DATE_INPUT_FORMAT};
pub use logging::{default_log_level, init_logging, logging_status, LogInitError};
pub use model::exam::{has_pdf_extension, ExamDocument, ExamError};
pub use model::medication::{Medication, MedicationId, MedicationSchedule, MedicationStatus};
pub use model::resident::{
    EmergencyContact, NewResident, Resident, ResidentId, ResidentValidationError,
    DEFAULT_PHOTO_URL,
};
pub use ops::{add_resident, toggle_medication, update_resident};
pub use seed::demo_residents;
pub use store::{MutationOutcome, ResidentStore, Snapshot, StoreError, StoreResult};
pub use view::{
    resident_detail, select_view, AlertCard, MedicationRow, MedicationTable, ResidentDetail,
    RosterCard, Session, View, ViewMode,
};

/// Minimal health-check API for front-end wiring.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
