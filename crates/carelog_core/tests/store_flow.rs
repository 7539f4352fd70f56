use carelog_core::{
    demo_residents, resident_detail, select_view, FixedClock, LogAlert, MedicationId,
    MedicationStatus, MutationOutcome, ResidentForm, ResidentId, ResidentStore, Session, View,
    ViewMode, DEFAULT_PHOTO_URL,
};
use std::rc::Rc;

fn store() -> ResidentStore {
    ResidentStore::with_collaborators(
        demo_residents(),
        Box::new(FixedClock::new("2024-03-01T08:00:00.000Z")),
        Box::new(LogAlert),
    )
}

#[test]
fn add_submit_and_render_roster() {
    let mut store = store();
    let mut session = Session::new();
    session.open_add_form();

    let mut form = ResidentForm::create();
    form.set_name("Ana");
    form.set_date_of_birth("1938-11-02");
    form.set_contact_name("Luis");
    form.set_contact_phone("555-0100");
    form.set_contact_relationship("Son");
    let (id, _) = store.submit(form.submit().unwrap()).unwrap();
    session.close_add_form();

    let View::Roster(cards) = session.render(&store.snapshot()) else {
        panic!("session starts on the roster");
    };
    assert_eq!(cards.len(), 2);
    let card = cards.iter().find(|card| card.resident_id == id).unwrap();
    assert_eq!(card.name, "Ana");
    assert_eq!(card.photo, DEFAULT_PHOTO_URL);
    assert_eq!(card.medication_count, 0);
    assert!(!session.is_add_form_open());
}

#[test]
fn toggle_round_trip_is_visible_in_medication_grid() {
    let mut store = store();
    let r1 = ResidentId::from("1");
    let m1 = MedicationId::from("1");
    let before = store.snapshot();

    assert_eq!(store.toggle_medication(&r1, &m1, true, None), MutationOutcome::Applied);
    let View::MedicationGrid(tables) = select_view(ViewMode::MedicationGrid, &store.snapshot()) else {
        panic!("expected medication grid");
    };
    assert_eq!(
        tables[0].rows[0].status,
        MedicationStatus::Taken {
            at: "2024-03-01T08:00:00.000Z".to_string()
        }
    );
    assert!(!tables[0].rows[0].toggle_target());

    assert_eq!(store.toggle_medication(&r1, &m1, false, None), MutationOutcome::Applied);
    assert_eq!(store.snapshot()[0].medications[0].status(), MedicationStatus::Pending);

    assert!(!before[0].medications[0].taken);
    assert!(!Rc::ptr_eq(&before, &store.snapshot()));
}

#[test]
fn alert_panel_and_detail_show_contact_data() {
    let store = store();
    let snapshot = store.snapshot();

    let View::AlertPanel(cards) = select_view(ViewMode::AlertPanel, &snapshot) else {
        panic!("expected alert panel");
    };
    assert_eq!(cards[0].contact_name, "Jane Doe");
    assert_eq!(cards[0].contact_relationship, "Daughter");

    let detail = resident_detail(&snapshot[0]);
    assert_eq!(detail.contact_phone, "555-0123");
    assert_eq!(detail.allergies, vec!["Penicillin".to_string()]);
    assert_eq!(detail.exam_file_name, None);

    store.send_emergency_alert(&snapshot[0].id).unwrap();
}

#[test]
fn update_with_unknown_id_reports_unchanged() {
    let mut store = store();
    let before = store.snapshot();
    let mut stranger = before[0].clone();
    stranger.id = ResidentId::from("ghost");

    assert_eq!(store.update_resident(stranger).unwrap(), MutationOutcome::Unchanged);
    assert!(Rc::ptr_eq(&before, &store.snapshot()));
}
