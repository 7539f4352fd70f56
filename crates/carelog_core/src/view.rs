//! View selection and read-only projections.
//!
//! # Responsibility
//! - Hold the session-local tab choice (never persisted).
//! - Project a resident snapshot into roster, medication grid, alert panel
//!   and detail presentations.
//!
//! # Invariants
//! - Projections are owned values; they never borrow from the store.
//! - Selecting a view never mutates resident data.

use crate::model::medication::{MedicationId, MedicationStatus};
use crate::model::resident::{Resident, ResidentId};
use chrono::NaiveDate;

/// Which of the three presentations is active.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ViewMode {
    #[default]
    Roster,
    MedicationGrid,
    AlertPanel,
}

impl ViewMode {
    pub const ALL: [ViewMode; 3] = [
        ViewMode::Roster,
        ViewMode::MedicationGrid,
        ViewMode::AlertPanel,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Roster => "Residents",
            Self::MedicationGrid => "Medication",
            Self::AlertPanel => "Alerts",
        }
    }
}

/// Session-local UI state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    active: ViewMode,
    add_form_open: bool,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> ViewMode {
        self.active
    }

    pub fn select(&mut self, mode: ViewMode) {
        self.active = mode;
    }

    pub fn open_add_form(&mut self) {
        self.add_form_open = true;
    }

    pub fn close_add_form(&mut self) {
        self.add_form_open = false;
    }

    pub fn is_add_form_open(&self) -> bool {
        self.add_form_open
    }

    /// Projects `residents` through the active view.
    pub fn render(&self, residents: &[Resident]) -> View {
        select_view(self.active, residents)
    }
}

/// Roster summary card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterCard {
    pub resident_id: ResidentId,
    pub name: String,
    pub photo: String,
    pub date_of_birth: NaiveDate,
    pub medication_count: usize,
}

/// One row of a resident's medication table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MedicationRow {
    pub medication_id: MedicationId,
    pub name: String,
    pub dosage: String,
    pub frequency: String,
    pub status: MedicationStatus,
}

impl MedicationRow {
    /// Target value for the row's toggle action.
    pub fn toggle_target(&self) -> bool {
        matches!(self.status, MedicationStatus::Pending)
    }
}

/// Medication table for one resident.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MedicationTable {
    pub resident_id: ResidentId,
    pub resident_name: String,
    pub rows: Vec<MedicationRow>,
}

/// Emergency panel for one resident.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertCard {
    pub resident_id: ResidentId,
    pub name: String,
    pub photo: String,
    pub contact_name: String,
    pub contact_relationship: String,
}

/// The rendered presentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    Roster(Vec<RosterCard>),
    MedicationGrid(Vec<MedicationTable>),
    AlertPanel(Vec<AlertCard>),
}

impl View {
    pub fn mode(&self) -> ViewMode {
        match self {
            Self::Roster(_) => ViewMode::Roster,
            Self::MedicationGrid(_) => ViewMode::MedicationGrid,
            Self::AlertPanel(_) => ViewMode::AlertPanel,
        }
    }
}

pub fn select_view(mode: ViewMode, residents: &[Resident]) -> View {
    match mode {
        ViewMode::Roster => View::Roster(residents.iter().map(roster_card).collect()),
        ViewMode::MedicationGrid => {
            View::MedicationGrid(residents.iter().map(medication_table).collect())
        }
        ViewMode::AlertPanel => View::AlertPanel(residents.iter().map(alert_card).collect()),
    }
}

pub fn roster_card(resident: &Resident) -> RosterCard {
    RosterCard {
        resident_id: resident.id.clone(),
        name: resident.name.clone(),
        photo: resident.photo_or_placeholder().to_string(),
        date_of_birth: resident.date_of_birth,
        medication_count: resident.medications.len(),
    }
}

pub fn medication_table(resident: &Resident) -> MedicationTable {
    MedicationTable {
        resident_id: resident.id.clone(),
        resident_name: resident.name.clone(),
        rows: resident
            .medications
            .iter()
            .map(|med| MedicationRow {
                medication_id: med.id.clone(),
                name: med.name.clone(),
                dosage: med.dosage.clone(),
                frequency: med.frequency.clone(),
                status: med.status(),
            })
            .collect(),
    }
}

pub fn alert_card(resident: &Resident) -> AlertCard {
    AlertCard {
        resident_id: resident.id.clone(),
        name: resident.name.clone(),
        photo: resident.photo_or_placeholder().to_string(),
        contact_name: resident.emergency_contact.name.clone(),
        contact_relationship: resident.emergency_contact.relationship.clone(),
    }
}

/// Full detail of one resident as shown in the details dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResidentDetail {
    pub resident_id: ResidentId,
    pub name: String,
    pub photo: String,
    pub date_of_birth: NaiveDate,
    pub medical_conditions: Vec<String>,
    /// Empty means no allergies recorded.
    pub allergies: Vec<String>,
    pub medications: Vec<MedicationRow>,
    pub contact_name: String,
    pub contact_phone: String,
    pub contact_relationship: String,
    /// Original file name of the exam on file.
    pub exam_file_name: Option<String>,
}

pub fn resident_detail(resident: &Resident) -> ResidentDetail {
    ResidentDetail {
        resident_id: resident.id.clone(),
        name: resident.name.clone(),
        photo: resident.photo_or_placeholder().to_string(),
        date_of_birth: resident.date_of_birth,
        medical_conditions: resident.medical_conditions.clone(),
        allergies: resident.allergies.clone(),
        medications: medication_table(resident).rows,
        contact_name: resident.emergency_contact.name.clone(),
        contact_phone: resident.emergency_contact.phone.clone(),
        contact_relationship: resident.emergency_contact.relationship.clone(),
        exam_file_name: resident
            .last_exam
            .as_ref()
            .map(|doc| doc.download_name().to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::{select_view, Session, View, ViewMode};
    use crate::seed::demo_residents;

    #[test]
    fn session_defaults_to_roster_with_form_closed() {
        let session = Session::new();
        assert_eq!(session.active(), ViewMode::Roster);
        assert!(!session.is_add_form_open());
    }

    #[test]
    fn render_follows_selected_mode() {
        let residents = demo_residents();
        let mut session = Session::new();
        for mode in ViewMode::ALL {
            session.select(mode);
            assert_eq!(session.render(&residents).mode(), mode);
        }
    }

    #[test]
    fn views_emit_one_entry_per_resident() {
        let residents = demo_residents();
        let View::MedicationGrid(tables) = select_view(ViewMode::MedicationGrid, &residents) else {
            panic!("expected medication grid");
        };
        assert_eq!(tables.len(), residents.len());
        assert_eq!(tables[0].rows.len(), residents[0].medications.len());
        assert!(tables[0].rows[0].toggle_target());
    }
}
