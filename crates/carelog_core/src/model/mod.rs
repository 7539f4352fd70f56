//! Resident-centric domain model.
//!
//! # Responsibility
//! - Define canonical records for residents, medications and contacts.
//! - Enforce required fields at construction instead of relying on
//!   absent-field conventions.
//!
//! # Invariants
//! - Every resident is identified by a stable `ResidentId`.
//! - A medication's `last_taken_time` is set iff `taken` is `true`.
//! - Every resident carries exactly one emergency contact.

pub mod exam;
pub mod medication;
pub mod resident;
