//! Resident form builder.
//!
//! # Responsibility
//! - Accumulate a resident draft across personal info, conditions,
//!   allergies, medications, emergency contact and exam sections.
//! - Amend an existing resident one field at a time (edit mode).
//! - Turn the draft into a `FormSubmission` once required fields are set.
//!
//! # Invariants
//! - A medication entry gets its id when appended, not at submission.
//! - Committed medications cannot be removed through an edit form.
//! - Required fields: name, date of birth, contact name/phone/relationship.
//!   Nothing else is validated.
//! - Cancelling has no side effects.

use crate::model::exam::ExamDocument;
use crate::model::medication::{Medication, MedicationId};
use crate::model::resident::{EmergencyContact, NewResident, Resident, ResidentId};
use chrono::NaiveDate;
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Expected date input format (`YYYY-MM-DD`).
pub const DATE_INPUT_FORMAT: &str = "%Y-%m-%d";

/// Form-level errors. `MissingField` is the "submission blocked" path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    MissingField(&'static str),
    InvalidDate(String),
    EntryOutOfRange { section: &'static str, index: usize },
    CommittedMedication(MedicationId),
}

impl Display for FormError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField(field) => write!(f, "required field `{field}` is empty"),
            Self::InvalidDate(value) => {
                write!(f, "invalid date `{value}`; expected YYYY-MM-DD")
            }
            Self::EntryOutOfRange { section, index } => {
                write!(f, "no {section} entry at position {index}")
            }
            Self::CommittedMedication(id) => {
                write!(f, "medication {id} is already saved and cannot be removed")
            }
        }
    }
}

impl Error for FormError {}

/// What the form produces on submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormSubmission {
    /// New resident without id; goes to `add_resident`.
    Create(NewResident),
    /// Full replacement for an existing resident; goes to `update_resident`.
    Update(Resident),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum FormMode {
    Create,
    Edit {
        id: ResidentId,
        committed_medications: HashSet<MedicationId>,
    },
}

/// In-progress resident draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResidentForm {
    mode: FormMode,
    name: String,
    date_of_birth: String,
    photo: String,
    medical_conditions: Vec<String>,
    allergies: Vec<String>,
    contact_name: String,
    contact_phone: String,
    contact_relationship: String,
    medications: Vec<Medication>,
    last_exam: Option<ExamDocument>,
}

impl ResidentForm {
    /// Blank form with one empty condition, allergy and medication row.
    pub fn create() -> Self {
        Self {
            mode: FormMode::Create,
            name: String::new(),
            date_of_birth: String::new(),
            photo: String::new(),
            medical_conditions: vec![String::new()],
            allergies: vec![String::new()],
            contact_name: String::new(),
            contact_phone: String::new(),
            contact_relationship: String::new(),
            medications: vec![Medication::blank()],
            last_exam: None,
        }
    }

    /// Form pre-filled from an existing resident.
    pub fn edit(resident: &Resident) -> Self {
        let committed_medications = resident
            .medications
            .iter()
            .map(|med| med.id.clone())
            .collect();
        Self {
            mode: FormMode::Edit {
                id: resident.id.clone(),
                committed_medications,
            },
            name: resident.name.clone(),
            date_of_birth: resident.date_of_birth.format(DATE_INPUT_FORMAT).to_string(),
            photo: resident.photo.clone().unwrap_or_default(),
            medical_conditions: resident.medical_conditions.clone(),
            allergies: resident.allergies.clone(),
            contact_name: resident.emergency_contact.name.clone(),
            contact_phone: resident.emergency_contact.phone.clone(),
            contact_relationship: resident.emergency_contact.relationship.clone(),
            medications: resident.medications.clone(),
            last_exam: resident.last_exam.clone(),
        }
    }

    /// Id of the resident being edited, `None` in create mode.
    pub fn editing(&self) -> Option<&ResidentId> {
        match &self.mode {
            FormMode::Create => None,
            FormMode::Edit { id, .. } => Some(id),
        }
    }

    pub fn set_name(&mut self, value: impl Into<String>) {
        self.name = value.into();
    }

    /// Raw `YYYY-MM-DD` input; parsed on submit.
    pub fn set_date_of_birth(&mut self, value: impl Into<String>) {
        self.date_of_birth = value.into();
    }

    pub fn set_photo(&mut self, value: impl Into<String>) {
        self.photo = value.into();
    }

    pub fn set_contact_name(&mut self, value: impl Into<String>) {
        self.contact_name = value.into();
    }

    pub fn set_contact_phone(&mut self, value: impl Into<String>) {
        self.contact_phone = value.into();
    }

    pub fn set_contact_relationship(&mut self, value: impl Into<String>) {
        self.contact_relationship = value.into();
    }

    pub fn medical_conditions(&self) -> &[String] {
        &self.medical_conditions
    }

    pub fn add_condition(&mut self) -> usize {
        self.medical_conditions.push(String::new());
        self.medical_conditions.len() - 1
    }

    pub fn set_condition(&mut self, index: usize, value: impl Into<String>) -> Result<(), FormError> {
        set_entry(&mut self.medical_conditions, "condition", index, value.into())
    }

    /// Replaces every condition row at once.
    pub fn replace_conditions(&mut self, values: impl IntoIterator<Item = String>) {
        self.medical_conditions = values.into_iter().collect();
    }

    pub fn remove_condition(&mut self, index: usize) -> Result<String, FormError> {
        remove_entry(&mut self.medical_conditions, "condition", index)
    }

    pub fn allergies(&self) -> &[String] {
        &self.allergies
    }

    /// Appends a blank allergy row and returns its position.
    pub fn add_allergy(&mut self) -> usize {
        self.allergies.push(String::new());
        self.allergies.len() - 1
    }

    pub fn set_allergy(&mut self, index: usize, value: impl Into<String>) -> Result<(), FormError> {
        set_entry(&mut self.allergies, "allergy", index, value.into())
    }

    /// Replaces every allergy row at once.
    pub fn replace_allergies(&mut self, values: impl IntoIterator<Item = String>) {
        self.allergies = values.into_iter().collect();
    }

    pub fn remove_allergy(&mut self, index: usize) -> Result<String, FormError> {
        remove_entry(&mut self.allergies, "allergy", index)
    }

    pub fn medications(&self) -> &[Medication] {
        &self.medications
    }

    /// Appends a blank medication entry and returns its new id.
    pub fn add_medication(&mut self) -> MedicationId {
        let entry = Medication::blank();
        let id = entry.id.clone();
        self.medications.push(entry);
        id
    }

    pub fn medication_mut(&mut self, id: &MedicationId) -> Option<&mut Medication> {
        self.medications.iter_mut().find(|med| &med.id == id)
    }

    /// Removes the medication entry at `index`.
    ///
    /// # Errors
    /// - `EntryOutOfRange` for a bad position.
    /// - `CommittedMedication` when editing and the entry was already saved.
    pub fn remove_medication(&mut self, index: usize) -> Result<Medication, FormError> {
        let entry = self.medications.get(index).ok_or(FormError::EntryOutOfRange {
            section: "medication",
            index,
        })?;
        if self.is_committed(&entry.id) {
            return Err(FormError::CommittedMedication(entry.id.clone()));
        }
        Ok(self.medications.remove(index))
    }

    fn is_committed(&self, id: &MedicationId) -> bool {
        match &self.mode {
            FormMode::Create => false,
            FormMode::Edit {
                committed_medications,
                ..
            } => committed_medications.contains(id),
        }
    }

    pub fn attach_exam(&mut self, document: ExamDocument) {
        self.last_exam = Some(document);
    }

    pub fn clear_exam(&mut self) {
        self.last_exam = None;
    }

    pub fn last_exam(&self) -> Option<&ExamDocument> {
        self.last_exam.as_ref()
    }

    /// Checks required fields and produces the submission.
    ///
    /// Blank condition/allergy rows and entirely blank medication rows are
    /// dropped. A saved medication blanked in edit mode is rejected with
    /// `CommittedMedication` instead, since dropping it would remove it.
    pub fn submit(self) -> Result<FormSubmission, FormError> {
        if let Some(blanked) = self
            .medications
            .iter()
            .find(|med| med.is_blank() && self.is_committed(&med.id))
        {
            return Err(FormError::CommittedMedication(blanked.id.clone()));
        }
        let name = required("name", &self.name)?;
        let dob_text = required("dateOfBirth", &self.date_of_birth)?;
        let date_of_birth = NaiveDate::parse_from_str(&dob_text, DATE_INPUT_FORMAT)
            .map_err(|_| FormError::InvalidDate(dob_text.clone()))?;
        let contact = EmergencyContact {
            name: required("emergencyContact.name", &self.contact_name)?,
            phone: required("emergencyContact.phone", &self.contact_phone)?,
            relationship: required("emergencyContact.relationship", &self.contact_relationship)?,
        };

        let photo = Some(self.photo.trim().to_string()).filter(|uri| !uri.is_empty());
        let draft = NewResident {
            name,
            date_of_birth,
            photo,
            medical_conditions: non_blank(self.medical_conditions),
            allergies: non_blank(self.allergies),
            emergency_contact: contact,
            medications: self
                .medications
                .into_iter()
                .filter(|med| !med.is_blank())
                .collect(),
            last_exam: self.last_exam,
        };

        Ok(match self.mode {
            FormMode::Create => FormSubmission::Create(draft),
            FormMode::Edit { id, .. } => FormSubmission::Update(draft.into_resident(id)),
        })
    }

    /// Discards the draft.
    pub fn cancel(self) {}
}

fn required(field: &'static str, value: &str) -> Result<String, FormError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(FormError::MissingField(field));
    }
    Ok(trimmed.to_string())
}

fn non_blank(values: Vec<String>) -> Vec<String> {
    values
        .into_iter()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .collect()
}

fn set_entry(
    entries: &mut [String],
    section: &'static str,
    index: usize,
    value: String,
) -> Result<(), FormError> {
    let slot = entries
        .get_mut(index)
        .ok_or(FormError::EntryOutOfRange { section, index })?;
    *slot = value;
    Ok(())
}

fn remove_entry(
    entries: &mut Vec<String>,
    section: &'static str,
    index: usize,
) -> Result<String, FormError> {
    if index >= entries.len() {
        return Err(FormError::EntryOutOfRange { section, index });
    }
    Ok(entries.remove(index))
}
