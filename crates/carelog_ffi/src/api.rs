//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose resident roster, medication grid and alert panel data to Dart.
//! - Forward user intents (add, toggle, update, alert, exam) to the store.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - One store per calling thread; Flutter sync calls arrive on the UI
//!   thread, so there is exactly one logical store and no locking.
//! - Unknown ids never fail hard; they come back as `ok=false` envelopes.

use carelog_core::{
    alert_message, core_version as core_version_inner, demo_residents,
    init_logging as init_logging_inner, ping as ping_inner, select_view, ExamDocument,
    FormSubmission, MedicationId, MedicationSchedule, MedicationStatus, MutationOutcome,
    ResidentForm, ResidentId, ResidentStore, View, ViewMode,
};
use log::warn;
use std::cell::RefCell;

thread_local! {
    static STORE: RefCell<ResidentStore> = RefCell::new(ResidentStore::with_residents(demo_residents()));
}

/// Minimal health-check API for FRB smoke integration.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Exposes core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Returns an empty string on success and the error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// Replaces this thread's store, optionally with the demo roster.
#[flutter_rust_bridge::frb(sync)]
pub fn store_reset(seed_demo: bool) {
    let residents = if seed_demo {
        demo_residents()
    } else {
        Vec::new()
    };
    STORE.with(|store| *store.borrow_mut() = ResidentStore::with_residents(residents));
}

/// Roster card as seen by Dart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterItem {
    pub resident_id: String,
    pub name: String,
    pub photo: String,
    /// `YYYY-MM-DD`.
    pub date_of_birth: String,
    pub medication_count: u32,
}

/// One medication row, flattened with its owning resident.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MedicationItem {
    pub resident_id: String,
    pub resident_name: String,
    pub medication_id: String,
    pub name: String,
    pub dosage: String,
    pub frequency: String,
    pub taken: bool,
    pub last_taken_time: Option<String>,
}

/// Emergency panel entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertItem {
    pub resident_id: String,
    pub name: String,
    pub photo: String,
    pub contact_name: String,
    pub contact_relationship: String,
}

/// Medication entry of a new resident.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MedicationInput {
    pub name: String,
    pub dosage: String,
    pub frequency: String,
    pub morning: bool,
    pub afternoon: bool,
    pub evening: bool,
}

/// Form payload for creating a resident.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResidentInput {
    pub name: String,
    /// `YYYY-MM-DD`.
    pub date_of_birth: String,
    pub photo: Option<String>,
    pub medical_conditions: Vec<String>,
    pub allergies: Vec<String>,
    pub contact_name: String,
    pub contact_phone: String,
    pub contact_relationship: String,
    pub medications: Vec<MedicationInput>,
}

/// Edit payload; medications are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResidentUpdateInput {
    pub name: String,
    pub date_of_birth: String,
    pub photo: Option<String>,
    pub medical_conditions: Vec<String>,
    pub allergies: Vec<String>,
    pub contact_name: String,
    pub contact_phone: String,
    pub contact_relationship: String,
}

/// Downloadable exam document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExamPayload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Generic action response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionResponse {
    /// Whether the intent changed (or reached) something.
    pub ok: bool,
    /// Affected resident id, when known.
    pub resident_id: Option<String>,
    /// Human-readable message for UI display.
    pub message: String,
}

impl ActionResponse {
    fn success(message: impl Into<String>, resident_id: String) -> Self {
        Self {
            ok: true,
            resident_id: Some(resident_id),
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            resident_id: None,
            message: message.into(),
        }
    }
}

#[flutter_rust_bridge::frb(sync)]
pub fn roster() -> Vec<RosterItem> {
    match render(ViewMode::Roster) {
        View::Roster(cards) => cards
            .into_iter()
            .map(|card| RosterItem {
                resident_id: card.resident_id.to_string(),
                name: card.name,
                photo: card.photo,
                date_of_birth: card.date_of_birth.to_string(),
                medication_count: u32::try_from(card.medication_count).unwrap_or(u32::MAX),
            })
            .collect(),
        _ => Vec::new(),
    }
}

#[flutter_rust_bridge::frb(sync)]
pub fn medication_grid() -> Vec<MedicationItem> {
    let View::MedicationGrid(tables) = render(ViewMode::MedicationGrid) else {
        return Vec::new();
    };
    tables
        .into_iter()
        .flat_map(|table| {
            let resident_id = table.resident_id.to_string();
            let resident_name = table.resident_name;
            table.rows.into_iter().map(move |row| {
                let (taken, last_taken_time) = match row.status {
                    MedicationStatus::Taken { at } => (true, Some(at)),
                    MedicationStatus::Pending => (false, None),
                };
                MedicationItem {
                    resident_id: resident_id.clone(),
                    resident_name: resident_name.clone(),
                    medication_id: row.medication_id.to_string(),
                    name: row.name,
                    dosage: row.dosage,
                    frequency: row.frequency,
                    taken,
                    last_taken_time,
                }
            })
        })
        .collect()
}

#[flutter_rust_bridge::frb(sync)]
pub fn alert_panel() -> Vec<AlertItem> {
    let View::AlertPanel(cards) = render(ViewMode::AlertPanel) else {
        return Vec::new();
    };
    cards
        .into_iter()
        .map(|card| AlertItem {
            resident_id: card.resident_id.to_string(),
            name: card.name,
            photo: card.photo,
            contact_name: card.contact_name,
            contact_relationship: card.contact_relationship,
        })
        .collect()
}

/// Submits the add-resident form.
#[flutter_rust_bridge::frb(sync)]
pub fn resident_add(input: ResidentInput) -> ActionResponse {
    let mut form = ResidentForm::create();
    fill_common(
        &mut form,
        &input.name,
        &input.date_of_birth,
        input.photo.as_deref(),
        &input.medical_conditions,
        &input.allergies,
        (&input.contact_name, &input.contact_phone, &input.contact_relationship),
    );
    // The blank starter row is replaced by the caller's entries.
    while form.remove_medication(0).is_ok() {}
    for entry in input.medications {
        let id = form.add_medication();
        if let Some(med) = form.medication_mut(&id) {
            med.name = entry.name;
            med.dosage = entry.dosage;
            med.frequency = entry.frequency;
            med.schedule = MedicationSchedule::new(entry.morning, entry.afternoon, entry.evening);
        }
    }
    submit_form(form, "Resident added.")
}

/// Saves edited personal, list and contact fields of one resident.
#[flutter_rust_bridge::frb(sync)]
pub fn resident_update(resident_id: String, input: ResidentUpdateInput) -> ActionResponse {
    let Some(mut form) = with_store(|store| {
        store
            .get(&ResidentId::from(resident_id.as_str()))
            .map(ResidentForm::edit)
    }) else {
        return ActionResponse::failure(format!("resident not found: {resident_id}"));
    };

    fill_common(
        &mut form,
        &input.name,
        &input.date_of_birth,
        input.photo.as_deref(),
        &input.medical_conditions,
        &input.allergies,
        (&input.contact_name, &input.contact_phone, &input.contact_relationship),
    );
    submit_form(form, "Resident updated.")
}

/// Marks a medication taken (`taken=true`) or pending.
#[flutter_rust_bridge::frb(sync)]
pub fn medication_toggle(
    resident_id: String,
    medication_id: String,
    taken: bool,
    taken_at: Option<String>,
) -> ActionResponse {
    let resident = ResidentId::from(resident_id.as_str());
    let medication = MedicationId::from(medication_id.as_str());
    let taken_at = taken_at
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty());
    match with_store(|store| store.toggle_medication(&resident, &medication, taken, taken_at)) {
        MutationOutcome::Applied => ActionResponse::success(
            if taken {
                "Medication marked taken."
            } else {
                "Medication marked pending."
            },
            resident_id,
        ),
        MutationOutcome::Unchanged => ActionResponse::failure("Medication not found."),
    }
}

/// Raises the emergency alert for one resident.
#[flutter_rust_bridge::frb(sync)]
pub fn emergency_alert(resident_id: String) -> ActionResponse {
    let id = ResidentId::from(resident_id.as_str());
    with_store(|store| {
        let Some(message) = store
            .get(&id)
            .map(|resident| alert_message(&resident.emergency_contact))
        else {
            return ActionResponse::failure(format!("resident not found: {resident_id}"));
        };
        match store.send_emergency_alert(&id) {
            Ok(()) => ActionResponse::success(message, resident_id.clone()),
            Err(err) => ActionResponse::failure(format!("emergency_alert failed: {err}")),
        }
    })
}

/// Attaches (or replaces) the resident's exam document.
#[flutter_rust_bridge::frb(sync)]
pub fn exam_attach(resident_id: String, file_name: String, bytes: Vec<u8>) -> ActionResponse {
    let document = match ExamDocument::new(file_name, bytes) {
        Ok(document) => document,
        Err(err) => return ActionResponse::failure(format!("exam_attach failed: {err}")),
    };
    if !document.looks_like_pdf() {
        warn!("event=exam_attach module=ffi status=non_pdf_hint resident_id={resident_id}");
    }
    let Some(mut form) = with_store(|store| {
        store
            .get(&ResidentId::from(resident_id.as_str()))
            .map(ResidentForm::edit)
    }) else {
        return ActionResponse::failure(format!("resident not found: {resident_id}"));
    };
    form.attach_exam(document);
    submit_form(form, "Exam attached.")
}

/// Returns the exam on file, if any.
#[flutter_rust_bridge::frb(sync)]
pub fn exam_download(resident_id: String) -> Option<ExamPayload> {
    with_store(|store| {
        let exam = store
            .get(&ResidentId::from(resident_id.as_str()))?
            .last_exam
            .as_ref()?;
        Some(ExamPayload {
            file_name: exam.download_name().to_string(),
            content_type: exam.content_type().to_string(),
            bytes: exam.bytes().to_vec(),
        })
    })
}

fn with_store<T>(f: impl FnOnce(&mut ResidentStore) -> T) -> T {
    STORE.with(|store| f(&mut store.borrow_mut()))
}

fn render(mode: ViewMode) -> View {
    with_store(|store| select_view(mode, &store.snapshot()))
}

fn fill_common(
    form: &mut ResidentForm,
    name: &str,
    date_of_birth: &str,
    photo: Option<&str>,
    conditions: &[String],
    allergies: &[String],
    contact: (&str, &str, &str),
) {
    form.set_name(name);
    form.set_date_of_birth(date_of_birth);
    form.set_photo(photo.unwrap_or_default());
    form.replace_conditions(conditions.iter().cloned());
    form.replace_allergies(allergies.iter().cloned());
    form.set_contact_name(contact.0);
    form.set_contact_phone(contact.1);
    form.set_contact_relationship(contact.2);
}

fn submit_form(form: ResidentForm, message: &str) -> ActionResponse {
    let submission = match form.submit() {
        Ok(submission) => submission,
        Err(err) => return ActionResponse::failure(format!("submission blocked: {err}")),
    };
    let is_update = matches!(submission, FormSubmission::Update(_));
    match with_store(|store| store.submit(submission)) {
        Ok((id, MutationOutcome::Applied)) => ActionResponse::success(message, id.to_string()),
        Ok((id, MutationOutcome::Unchanged)) if is_update => {
            ActionResponse::failure(format!("resident not found: {id}"))
        }
        Ok((id, MutationOutcome::Unchanged)) => ActionResponse::success(message, id.to_string()),
        Err(err) => ActionResponse::failure(format!("submission failed: {err}")),
    }
}
