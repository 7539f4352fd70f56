//! Medication domain model.
//!
//! # Responsibility
//! - Define one dosing entry owned by a resident.
//! - Provide the only transitions that touch `taken` / `last_taken_time`.
//!
//! # Invariants
//! - `id` is unique within the owning resident's medication list.
//! - `last_taken_time.is_some() == taken` after every transition.
//! - `schedule` is advisory; nothing derives `taken` from it.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable medication identifier, scoped to its owning resident.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MedicationId(String);

impl MedicationId {
    /// Generates a fresh random identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<&str> for MedicationId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for MedicationId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl Display for MedicationId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Intended administration windows. Display-only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MedicationSchedule {
    pub morning: bool,
    pub afternoon: bool,
    pub evening: bool,
}

impl MedicationSchedule {
    pub fn new(morning: bool, afternoon: bool, evening: bool) -> Self {
        Self {
            morning,
            afternoon,
            evening,
        }
    }

    /// Enabled window labels in fixed morning/afternoon/evening order.
    pub fn slots(&self) -> Vec<&'static str> {
        [
            (self.morning, "morning"),
            (self.afternoon, "afternoon"),
            (self.evening, "evening"),
        ]
        .into_iter()
        .filter_map(|(enabled, label)| enabled.then_some(label))
        .collect()
    }
}

/// Derived taken/pending status used by views.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MedicationStatus {
    Taken { at: String },
    Pending,
}

/// One dosing entry belonging to a resident.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Medication {
    pub id: MedicationId,
    pub name: String,
    pub dosage: String,
    pub frequency: String,
    #[serde(default)]
    pub schedule: MedicationSchedule,
    #[serde(default)]
    pub taken: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_taken_time: Option<String>,
}

impl Medication {
    /// Creates a pending medication entry.
    pub fn new(
        id: MedicationId,
        name: impl Into<String>,
        dosage: impl Into<String>,
        frequency: impl Into<String>,
        schedule: MedicationSchedule,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            dosage: dosage.into(),
            frequency: frequency.into(),
            schedule,
            taken: false,
            last_taken_time: None,
        }
    }

    /// Blank draft entry with a freshly assigned id.
    pub fn blank() -> Self {
        Self::new(
            MedicationId::generate(),
            "",
            "",
            "",
            MedicationSchedule::default(),
        )
    }

    /// Marks the current dose cycle as administered at `timestamp`.
    pub fn mark_taken(&mut self, timestamp: impl Into<String>) {
        self.taken = true;
        self.last_taken_time = Some(timestamp.into());
    }

    /// Resets the current dose cycle to pending.
    pub fn mark_pending(&mut self) {
        self.taken = false;
        self.last_taken_time = None;
    }

    pub fn status(&self) -> MedicationStatus {
        match (self.taken, self.last_taken_time.as_ref()) {
            (true, Some(at)) => MedicationStatus::Taken { at: at.clone() },
            (true, None) => MedicationStatus::Taken { at: String::new() },
            (false, _) => MedicationStatus::Pending,
        }
    }

    /// Whether name, dosage and frequency are all blank.
    pub fn is_blank(&self) -> bool {
        self.name.trim().is_empty()
            && self.dosage.trim().is_empty()
            && self.frequency.trim().is_empty()
    }
}
