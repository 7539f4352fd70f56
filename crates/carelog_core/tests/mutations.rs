use carelog_core::ops::find_medication;
use carelog_core::{
    add_resident, toggle_medication, update_resident, EmergencyContact, Medication, MedicationId,
    MedicationSchedule, NewResident, Resident, ResidentId,
};
use chrono::NaiveDate;
use proptest::prelude::*;
use std::collections::HashSet;

fn contact() -> EmergencyContact {
    EmergencyContact::new("Jane Doe", "555-0123", "Daughter").unwrap()
}

fn draft(name: &str, med_ids: &[String]) -> NewResident {
    let dob = NaiveDate::from_ymd_opt(1945, 5, 15).unwrap();
    let mut draft = NewResident::new(name, dob, contact());
    draft.medications = med_ids
        .iter()
        .map(|id| {
            Medication::new(
                MedicationId::from(id.as_str()),
                "Metformin",
                "500mg",
                "Twice daily",
                MedicationSchedule::default(),
            )
        })
        .collect();
    draft
}

fn collection(med_counts: &[usize]) -> Vec<Resident> {
    med_counts
        .iter()
        .enumerate()
        .map(|(idx, count)| {
            let med_ids: Vec<String> = (0..*count).map(|m| format!("m{m}")).collect();
            draft(&format!("Resident {idx}"), &med_ids).into_resident(ResidentId::from(format!("r{idx}")))
        })
        .collect()
}

fn never() -> String {
    panic!("clock must not be consulted")
}

#[test]
fn toggle_scenario_marks_medication_taken_at_given_time() {
    let residents = vec![draft("John", &["m1".to_string()]).into_resident(ResidentId::from("1"))];
    let r1 = ResidentId::from("1");
    let m1 = MedicationId::from("m1");

    let after = toggle_medication(&residents, &r1, &m1, true, Some("08:00".to_string()), never);

    assert_eq!(after.len(), 1);
    assert_eq!(after[0].id, r1);
    let med = &after[0].medications[0];
    assert_eq!(med.id, m1);
    assert!(med.taken);
    assert_eq!(med.last_taken_time.as_deref(), Some("08:00"));
}

#[test]
fn add_scenario_on_empty_collection() {
    let after = add_resident(&[], draft("Ana", &[]));
    assert_eq!(after.len(), 1);
    assert_eq!(after[0].name, "Ana");
    assert!(!after[0].id.as_str().is_empty());
}

#[test]
fn add_avoids_ids_already_in_use() {
    let mut residents = Vec::new();
    for idx in 0..50 {
        residents = add_resident(&residents, draft(&format!("R{idx}"), &[]));
    }
    let ids: HashSet<_> = residents.iter().map(|r| r.id.clone()).collect();
    assert_eq!(ids.len(), 50);
}

#[test]
fn update_replaces_every_field_of_the_match() {
    let residents = collection(&[1, 2]);
    let mut replacement = residents[1].clone();
    replacement.name = "Renamed".to_string();
    replacement.allergies = vec!["Latex".to_string()];
    replacement.medications.clear();
    replacement.photo = None;

    let after = update_resident(&residents, replacement.clone());
    assert_eq!(after[0], residents[0]);
    assert_eq!(after[1], replacement);
}

proptest! {
    #[test]
    fn add_grows_by_one_with_unique_id(counts in prop::collection::vec(0usize..4, 0..6)) {
        let residents = collection(&counts);
        let after = add_resident(&residents, draft("New", &[]));

        prop_assert_eq!(after.len(), residents.len() + 1);
        let added = &after[after.len() - 1];
        prop_assert!(residents.iter().all(|r| r.id != added.id));
        prop_assert_eq!(&after[..residents.len()], &residents[..]);
    }

    #[test]
    fn toggle_present_pair_sets_flag_and_time(
        counts in prop::collection::vec(1usize..4, 1..5),
        pick in any::<prop::sample::Index>(),
        stamp in "[0-9]{2}:[0-9]{2}",
    ) {
        let residents = collection(&counts);
        let target = &residents[pick.index(residents.len())];
        let med_id = target.medications[pick.index(target.medications.len())].id.clone();

        let on = toggle_medication(&residents, &target.id, &med_id, true, Some(stamp.clone()), never);
        let med = find_medication(&on, &target.id, &med_id).unwrap();
        prop_assert!(med.taken);
        prop_assert_eq!(med.last_taken_time.as_deref(), Some(stamp.as_str()));

        let off = toggle_medication(&on, &target.id, &med_id, false, None, never);
        let med = find_medication(&off, &target.id, &med_id).unwrap();
        prop_assert!(!med.taken);
        prop_assert_eq!(med.last_taken_time.as_deref(), None);
    }

    #[test]
    fn toggle_absent_pair_is_deep_equal_noop(
        counts in prop::collection::vec(0usize..3, 0..5),
        taken in any::<bool>(),
    ) {
        let residents = collection(&counts);
        let unknown_resident = ResidentId::from("missing");
        let unknown_med = MedicationId::from("missing");

        let after = toggle_medication(&residents, &unknown_resident, &MedicationId::from("m0"), taken, None, never);
        prop_assert_eq!(&after, &residents);

        if let Some(first) = residents.first() {
            let after = toggle_medication(&residents, &first.id, &unknown_med, taken, None, never);
            prop_assert_eq!(&after, &residents);
        }
    }

    #[test]
    fn toggle_taken_is_idempotent(
        counts in prop::collection::vec(1usize..3, 1..4),
        stamp in "[0-9]{2}:[0-9]{2}",
    ) {
        let residents = collection(&counts);
        let rid = residents[0].id.clone();
        let mid = residents[0].medications[0].id.clone();

        let once = toggle_medication(&residents, &rid, &mid, true, Some(stamp.clone()), never);
        let twice = toggle_medication(&once, &rid, &mid, true, Some(stamp.clone()), never);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn update_only_touches_the_matching_resident(
        counts in prop::collection::vec(0usize..3, 1..6),
        pick in any::<prop::sample::Index>(),
        new_name in "[A-Z][a-z]{1,10}",
    ) {
        let residents = collection(&counts);
        let idx = pick.index(residents.len());
        let mut replacement = residents[idx].clone();
        replacement.name = new_name;

        let after = update_resident(&residents, replacement.clone());
        for (pos, (before, now)) in residents.iter().zip(after.iter()).enumerate() {
            if pos == idx {
                prop_assert_eq!(now, &replacement);
            } else {
                prop_assert_eq!(now, before);
            }
        }
    }
}
