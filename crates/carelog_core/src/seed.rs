//! Demo roster loaded at startup.

use crate::model::medication::{Medication, MedicationId, MedicationSchedule};
use crate::model::resident::{EmergencyContact, Resident, ResidentId, DEFAULT_PHOTO_URL};
use chrono::NaiveDate;

/// One sample resident with a single pending medication.
pub fn demo_residents() -> Vec<Resident> {
    let Some(date_of_birth) = NaiveDate::from_ymd_opt(1945, 5, 15) else {
        return Vec::new();
    };
    let emergency_contact = EmergencyContact {
        name: "Jane Doe".to_string(),
        phone: "555-0123".to_string(),
        relationship: "Daughter".to_string(),
    };

    vec![Resident {
        id: ResidentId::from("1"),
        name: "John Doe".to_string(),
        date_of_birth,
        photo: Some(DEFAULT_PHOTO_URL.to_string()),
        medical_conditions: vec!["Hypertension".to_string(), "Diabetes".to_string()],
        allergies: vec!["Penicillin".to_string()],
        emergency_contact,
        medications: vec![Medication::new(
            MedicationId::from("1"),
            "Metformin",
            "500mg",
            "Twice daily",
            MedicationSchedule::new(true, false, true),
        )],
        last_exam: None,
    }]
}

#[cfg(test)]
mod tests {
    use super::demo_residents;

    #[test]
    fn demo_roster_is_valid() {
        let residents = demo_residents();
        assert_eq!(residents.len(), 1);
        for resident in &residents {
            resident.validate().unwrap();
        }
    }
}
