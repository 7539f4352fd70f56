//! Mutation operations over the resident collection.
//!
//! # Responsibility
//! - Turn one user intent into a full replacement collection.
//! - Keep lookups by id in one place.
//!
//! # Invariants
//! - Inputs are never modified; every operation returns a new `Vec`.
//! - Unknown resident/medication ids are a silent no-op: the result is
//!   deep-equal to the input.
//! - After a toggle, `last_taken_time.is_some() == taken`.

use crate::model::medication::{Medication, MedicationId};
use crate::model::resident::{NewResident, Resident, ResidentId};

/// Appends `draft` under a freshly generated id unique in `residents`.
///
/// The draft is expected to be validated already.
pub fn add_resident(residents: &[Resident], draft: NewResident) -> Vec<Resident> {
    append_resident(residents, draft).0
}

/// Same as [`add_resident`], also returning the generated id.
pub fn append_resident(residents: &[Resident], draft: NewResident) -> (Vec<Resident>, ResidentId) {
    let id = fresh_resident_id(residents);
    let mut next = Vec::with_capacity(residents.len() + 1);
    next.extend_from_slice(residents);
    next.push(draft.into_resident(id.clone()));
    (next, id)
}

/// Sets the `taken` flag of one medication.
///
/// When `taken` is `true`, `last_taken_time` becomes `taken_at`, or the
/// value of `now` when no timestamp was supplied. When `taken` is `false`,
/// `last_taken_time` is cleared and `taken_at` is ignored. `now` is only
/// called when needed.
pub fn toggle_medication(
    residents: &[Resident],
    resident_id: &ResidentId,
    medication_id: &MedicationId,
    taken: bool,
    taken_at: Option<String>,
    now: impl FnOnce() -> String,
) -> Vec<Resident> {
    let mut next = residents.to_vec();
    let target = next
        .iter_mut()
        .find(|resident| &resident.id == resident_id)
        .and_then(|resident| {
            resident
                .medications
                .iter_mut()
                .find(|med| &med.id == medication_id)
        });

    if let Some(medication) = target {
        if taken {
            medication.mark_taken(taken_at.unwrap_or_else(now));
        } else {
            medication.mark_pending();
        }
    }
    next
}

/// Replaces the resident whose id matches `updated.id` (full replacement).
pub fn update_resident(residents: &[Resident], updated: Resident) -> Vec<Resident> {
    let mut next = residents.to_vec();
    if let Some(slot) = next.iter_mut().find(|resident| resident.id == updated.id) {
        *slot = updated;
    }
    next
}

pub fn find_resident<'a>(residents: &'a [Resident], id: &ResidentId) -> Option<&'a Resident> {
    residents.iter().find(|resident| &resident.id == id)
}

pub fn find_medication<'a>(
    residents: &'a [Resident],
    resident_id: &ResidentId,
    medication_id: &MedicationId,
) -> Option<&'a Medication> {
    find_resident(residents, resident_id)?.medication(medication_id)
}

fn fresh_resident_id(residents: &[Resident]) -> ResidentId {
    loop {
        let candidate = ResidentId::generate();
        if find_resident(residents, &candidate).is_none() {
            return candidate;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{add_resident, find_medication, toggle_medication, update_resident};
    use crate::model::medication::{Medication, MedicationId, MedicationSchedule};
    use crate::model::resident::{EmergencyContact, NewResident, Resident, ResidentId};
    use chrono::NaiveDate;

    fn resident(id: &str, med_ids: &[&str]) -> Resident {
        let contact = EmergencyContact::new("Jane Doe", "555-0123", "Daughter").unwrap();
        let dob = NaiveDate::from_ymd_opt(1945, 5, 15).unwrap();
        let mut draft = NewResident::new(format!("Resident {id}"), dob, contact);
        draft.medications = med_ids
            .iter()
            .map(|med_id| {
                Medication::new(
                    MedicationId::from(*med_id),
                    "Metformin",
                    "500mg",
                    "Twice daily",
                    MedicationSchedule::new(true, false, true),
                )
            })
            .collect();
        draft.into_resident(ResidentId::from(id))
    }

    fn no_clock() -> String {
        panic!("clock must not be read")
    }

    #[test]
    fn add_resident_leaves_input_untouched() {
        let before = vec![resident("1", &[])];
        let snapshot = before.clone();
        let (_, draft) = resident("tmp", &[]).into_parts();

        let after = add_resident(&before, draft);
        assert_eq!(before, snapshot);
        assert_eq!(after.len(), 2);
        assert_eq!(after[0], before[0]);
        assert_ne!(after[1].id, before[0].id);
    }

    #[test]
    fn toggle_on_uses_clock_only_without_timestamp() {
        let residents = vec![resident("1", &["m1"])];
        let r1 = ResidentId::from("1");
        let m1 = MedicationId::from("m1");

        let explicit = toggle_medication(&residents, &r1, &m1, true, Some("08:00".into()), no_clock);
        let med = find_medication(&explicit, &r1, &m1).unwrap();
        assert_eq!(med.last_taken_time.as_deref(), Some("08:00"));

        let implicit = toggle_medication(&residents, &r1, &m1, true, None, || "09:30".to_string());
        let med = find_medication(&implicit, &r1, &m1).unwrap();
        assert!(med.taken);
        assert_eq!(med.last_taken_time.as_deref(), Some("09:30"));
    }

    #[test]
    fn toggle_off_clears_timestamp_even_if_one_is_supplied() {
        let residents = vec![resident("1", &["m1"])];
        let r1 = ResidentId::from("1");
        let m1 = MedicationId::from("m1");
        let taken = toggle_medication(&residents, &r1, &m1, true, Some("08:00".into()), no_clock);

        let pending = toggle_medication(&taken, &r1, &m1, false, Some("10:00".into()), no_clock);
        let med = find_medication(&pending, &r1, &m1).unwrap();
        assert!(!med.taken);
        assert_eq!(med.last_taken_time, None);
    }

    #[test]
    fn toggle_touches_only_the_target_medication() {
        let residents = vec![resident("1", &["m1", "m2"]), resident("2", &["m1"])];
        let r1 = ResidentId::from("1");
        let m1 = MedicationId::from("m1");

        let after = toggle_medication(&residents, &r1, &m1, true, Some("08:00".into()), no_clock);
        assert_eq!(after[0].medications[1], residents[0].medications[1]);
        assert_eq!(after[1], residents[1]);
    }

    #[test]
    fn update_with_unknown_id_is_noop() {
        let residents = vec![resident("1", &[])];
        let stranger = resident("404", &["m1"]);
        assert_eq!(update_resident(&residents, stranger), residents);
    }
}
