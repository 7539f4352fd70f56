//! Resident domain model.
//!
//! # Responsibility
//! - Define the resident record and its embedded emergency contact.
//! - Validate required fields before a record enters the store.
//!
//! # Invariants
//! - `id` is assigned once at creation and never changes.
//! - `name` and every emergency contact field are non-blank.
//! - Medication ids are unique within one resident.
//! - An empty `allergies` list means "none recorded", not "unknown".

use crate::model::exam::ExamDocument;
use crate::model::medication::{Medication, MedicationId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Shown wherever a resident has no photo on file.
pub const DEFAULT_PHOTO_URL: &str =
    "https://images.unsplash.com/photo-1566616213894-2d4e1baee5d8?w=200&h=200&fit=crop";

/// Stable resident identifier, unique for the lifetime of the process.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResidentId(String);

impl ResidentId {
    /// Generates a fresh random identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<&str> for ResidentId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ResidentId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl Display for ResidentId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Record-level validation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResidentValidationError {
    /// A required text field is blank.
    MissingField(&'static str),
    /// Two medications of the same resident share an id.
    DuplicateMedicationId(MedicationId),
}

impl Display for ResidentValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField(field) => write!(f, "required field `{field}` is empty"),
            Self::DuplicateMedicationId(id) => write!(f, "duplicate medication id: {id}"),
        }
    }
}

impl Error for ResidentValidationError {}

/// The single person to notify in an emergency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawEmergencyContact")]
pub struct EmergencyContact {
    pub name: String,
    pub phone: String,
    pub relationship: String,
}

#[derive(Deserialize)]
struct RawEmergencyContact {
    name: String,
    phone: String,
    relationship: String,
}

impl TryFrom<RawEmergencyContact> for EmergencyContact {
    type Error = ResidentValidationError;

    fn try_from(raw: RawEmergencyContact) -> Result<Self, Self::Error> {
        Self::new(raw.name, raw.phone, raw.relationship)
    }
}

impl EmergencyContact {
    /// Builds a contact, trimming input and rejecting blank fields.
    pub fn new(
        name: impl Into<String>,
        phone: impl Into<String>,
        relationship: impl Into<String>,
    ) -> Result<Self, ResidentValidationError> {
        let contact = Self {
            name: name.into().trim().to_string(),
            phone: phone.into().trim().to_string(),
            relationship: relationship.into().trim().to_string(),
        };
        contact.validate()?;
        Ok(contact)
    }

    pub fn validate(&self) -> Result<(), ResidentValidationError> {
        require("emergencyContact.name", &self.name)?;
        require("emergencyContact.phone", &self.phone)?;
        require("emergencyContact.relationship", &self.relationship)
    }
}

/// Resident record that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewResident {
    pub name: String,
    pub date_of_birth: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    #[serde(default)]
    pub medical_conditions: Vec<String>,
    #[serde(default)]
    pub allergies: Vec<String>,
    pub emergency_contact: EmergencyContact,
    #[serde(default)]
    pub medications: Vec<Medication>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_exam: Option<ExamDocument>,
}

impl NewResident {
    /// Creates a draft with empty lists and no photo or exam.
    pub fn new(
        name: impl Into<String>,
        date_of_birth: NaiveDate,
        emergency_contact: EmergencyContact,
    ) -> Self {
        Self {
            name: name.into(),
            date_of_birth,
            photo: None,
            medical_conditions: Vec::new(),
            allergies: Vec::new(),
            emergency_contact,
            medications: Vec::new(),
            last_exam: None,
        }
    }

    pub fn validate(&self) -> Result<(), ResidentValidationError> {
        validate_fields(&self.name, &self.emergency_contact, &self.medications)
    }

    /// Attaches the given id, producing a full resident record.
    pub fn into_resident(self, id: ResidentId) -> Resident {
        Resident {
            id,
            name: self.name,
            date_of_birth: self.date_of_birth,
            photo: self.photo,
            medical_conditions: self.medical_conditions,
            allergies: self.allergies,
            emergency_contact: self.emergency_contact,
            medications: self.medications,
            last_exam: self.last_exam,
        }
    }
}

/// Canonical resident record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resident {
    pub id: ResidentId,
    pub name: String,
    pub date_of_birth: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    #[serde(default)]
    pub medical_conditions: Vec<String>,
    #[serde(default)]
    pub allergies: Vec<String>,
    pub emergency_contact: EmergencyContact,
    #[serde(default)]
    pub medications: Vec<Medication>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_exam: Option<ExamDocument>,
}

impl Resident {
    pub fn validate(&self) -> Result<(), ResidentValidationError> {
        validate_fields(&self.name, &self.emergency_contact, &self.medications)
    }

    /// Photo URI, or the shared placeholder when none is on file.
    pub fn photo_or_placeholder(&self) -> &str {
        self.photo
            .as_deref()
            .filter(|uri| !uri.trim().is_empty())
            .unwrap_or(DEFAULT_PHOTO_URL)
    }

    pub fn medication(&self, id: &MedicationId) -> Option<&Medication> {
        self.medications.iter().find(|med| &med.id == id)
    }

    /// Splits off the id, e.g. to reopen the record in an edit form.
    pub fn into_parts(self) -> (ResidentId, NewResident) {
        (
            self.id,
            NewResident {
                name: self.name,
                date_of_birth: self.date_of_birth,
                photo: self.photo,
                medical_conditions: self.medical_conditions,
                allergies: self.allergies,
                emergency_contact: self.emergency_contact,
                medications: self.medications,
                last_exam: self.last_exam,
            },
        )
    }
}

fn validate_fields(
    name: &str,
    contact: &EmergencyContact,
    medications: &[Medication],
) -> Result<(), ResidentValidationError> {
    require("name", name)?;
    contact.validate()?;

    let mut seen = HashSet::with_capacity(medications.len());
    for med in medications {
        if !seen.insert(&med.id) {
            return Err(ResidentValidationError::DuplicateMedicationId(
                med.id.clone(),
            ));
        }
    }
    Ok(())
}

fn require(field: &'static str, value: &str) -> Result<(), ResidentValidationError> {
    if value.trim().is_empty() {
        return Err(ResidentValidationError::MissingField(field));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{EmergencyContact, NewResident, ResidentId, ResidentValidationError};
    use crate::model::medication::{Medication, MedicationId, MedicationSchedule};
    use chrono::NaiveDate;

    fn contact() -> EmergencyContact {
        EmergencyContact::new("Jane Doe", "555-0123", "Daughter").unwrap()
    }

    #[test]
    fn contact_trims_and_rejects_blank_fields() {
        let trimmed = EmergencyContact::new(" Jane ", " 555 ", " Niece ").unwrap();
        assert_eq!(trimmed.name, "Jane");
        assert_eq!(trimmed.phone, "555");

        let err = EmergencyContact::new("Jane", "  ", "Niece").unwrap_err();
        assert_eq!(
            err,
            ResidentValidationError::MissingField("emergencyContact.phone")
        );
    }

    #[test]
    fn validate_rejects_duplicate_medication_ids() {
        let dob = NaiveDate::from_ymd_opt(1945, 5, 15).unwrap();
        let mut draft = NewResident::new("John Doe", dob, contact());
        let schedule = MedicationSchedule::default();
        draft.medications = vec![
            Medication::new(MedicationId::from("m1"), "A", "1mg", "daily", schedule),
            Medication::new(MedicationId::from("m1"), "B", "2mg", "daily", schedule),
        ];

        assert_eq!(
            draft.validate().unwrap_err(),
            ResidentValidationError::DuplicateMedicationId(MedicationId::from("m1"))
        );
    }

    #[test]
    fn photo_falls_back_to_placeholder() {
        let dob = NaiveDate::from_ymd_opt(1950, 1, 1).unwrap();
        let mut resident = NewResident::new("Ana", dob, contact()).into_resident(ResidentId::from("r1"));
        assert_eq!(resident.photo_or_placeholder(), super::DEFAULT_PHOTO_URL);

        resident.photo = Some("https://example.org/ana.jpg".to_string());
        assert_eq!(resident.photo_or_placeholder(), "https://example.org/ana.jpg");
    }

    #[test]
    fn into_parts_roundtrips_with_into_resident() {
        let dob = NaiveDate::from_ymd_opt(1950, 1, 1).unwrap();
        let resident = NewResident::new("Ana", dob, contact()).into_resident(ResidentId::from("r1"));
        let (id, draft) = resident.clone().into_parts();
        assert_eq!(draft.into_resident(id), resident);
    }
}
