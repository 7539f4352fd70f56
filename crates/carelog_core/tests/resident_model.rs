use carelog_core::{
    EmergencyContact, ExamDocument, Medication, MedicationId, MedicationSchedule, NewResident,
    Resident, ResidentId,
};
use chrono::NaiveDate;

fn sample_resident() -> Resident {
    let contact = EmergencyContact::new("Jane Doe", "555-0123", "Daughter").unwrap();
    let dob = NaiveDate::from_ymd_opt(1945, 5, 15).unwrap();
    let mut draft = NewResident::new("John Doe", dob, contact);
    draft.allergies = vec!["Penicillin".to_string()];
    let mut med = Medication::new(
        MedicationId::from("m1"),
        "Metformin",
        "500mg",
        "Twice daily",
        MedicationSchedule::new(true, false, true),
    );
    med.mark_taken("08:00");
    draft.medications.push(med);
    draft.into_resident(ResidentId::from("1"))
}

#[test]
fn serialization_uses_camel_case_wire_fields() {
    let resident = sample_resident();
    let json = serde_json::to_value(&resident).unwrap();

    assert_eq!(json["id"], "1");
    assert_eq!(json["dateOfBirth"], "1945-05-15");
    assert_eq!(json["emergencyContact"]["relationship"], "Daughter");
    assert_eq!(json["medicalConditions"], serde_json::json!([]));
    assert_eq!(json["medications"][0]["lastTakenTime"], "08:00");
    assert_eq!(json["medications"][0]["schedule"]["evening"], true);
    assert!(json.get("photo").is_none());
    assert!(json.get("lastExam").is_none());

    let decoded: Resident = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, resident);
}

#[test]
fn pending_medication_omits_last_taken_time() {
    let med = Medication::new(
        MedicationId::from("m2"),
        "Aspirin",
        "100mg",
        "Daily",
        MedicationSchedule::default(),
    );
    let json = serde_json::to_value(&med).unwrap();
    assert_eq!(json["taken"], false);
    assert!(json.get("lastTakenTime").is_none());
}

#[test]
fn exam_wire_shape_carries_name_but_not_bytes() {
    let mut resident = sample_resident();
    resident.last_exam = Some(ExamDocument::new("exam.pdf", b"%PDF-1.7".to_vec()).unwrap());

    let json = serde_json::to_value(&resident).unwrap();
    assert_eq!(json["lastExam"]["fileName"], "exam.pdf");
    assert_eq!(json["lastExam"]["contentType"], "application/pdf");
    assert!(json["lastExam"].get("bytes").is_none());

    let decoded: Resident = serde_json::from_value(json).unwrap();
    let exam = decoded.last_exam.unwrap();
    assert_eq!(exam.download_name(), "exam.pdf");
    assert!(exam.is_empty());
}

#[test]
fn deserialize_rejects_blank_emergency_contact_field() {
    let value = serde_json::json!({
        "id": "7",
        "name": "Ana",
        "dateOfBirth": "1938-11-02",
        "emergencyContact": { "name": "Luis", "phone": "", "relationship": "Son" }
    });

    let err = serde_json::from_value::<Resident>(value).unwrap_err();
    assert!(
        err.to_string().contains("emergencyContact.phone"),
        "unexpected error: {err}"
    );
}

#[test]
fn missing_lists_default_to_empty() {
    let value = serde_json::json!({
        "id": "8",
        "name": "Ana",
        "dateOfBirth": "1938-11-02",
        "emergencyContact": { "name": "Luis", "phone": "555", "relationship": "Son" }
    });

    let resident: Resident = serde_json::from_value(value).unwrap();
    assert!(resident.allergies.is_empty());
    assert!(resident.medications.is_empty());
    assert_eq!(resident.photo, None);
}
