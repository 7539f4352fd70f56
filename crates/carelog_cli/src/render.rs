//! Plain-text rendering of view projections.

use carelog_core::{MedicationRow, MedicationStatus, ResidentDetail, View};
use chrono::NaiveDate;
use std::fmt::Write;

const DATE_DISPLAY_FORMAT: &str = "%d/%m/%Y";

pub fn render_view(view: &View) -> String {
    let mut out = String::new();
    match view {
        View::Roster(cards) => {
            for card in cards {
                let _ = writeln!(
                    out,
                    "[{}] {}\n    born {} | {} medication(s)\n    photo {}",
                    card.resident_id,
                    card.name,
                    format_date(card.date_of_birth),
                    card.medication_count,
                    card.photo
                );
            }
        }
        View::MedicationGrid(tables) => {
            for table in tables {
                let _ = writeln!(out, "== {} [{}]", table.resident_name, table.resident_id);
                if table.rows.is_empty() {
                    let _ = writeln!(out, "    (no medications)");
                }
                for row in &table.rows {
                    let _ = writeln!(out, "    {}", medication_line(row));
                }
            }
        }
        View::AlertPanel(cards) => {
            for card in cards {
                let _ = writeln!(
                    out,
                    "[{}] {}\n    Emergency: {} ({})",
                    card.resident_id, card.name, card.contact_name, card.contact_relationship
                );
            }
        }
    }
    if out.is_empty() {
        out.push_str("No residents yet.\n");
    }
    out
}

pub fn medication_line(row: &MedicationRow) -> String {
    format!(
        "{} | {} | {} | {}",
        row.name,
        row.dosage,
        row.frequency,
        status_label(&row.status)
    )
}

pub fn status_label(status: &MedicationStatus) -> String {
    match status {
        MedicationStatus::Taken { at } if at.is_empty() => "Taken".to_string(),
        MedicationStatus::Taken { at } => format!("Taken at {at}"),
        MedicationStatus::Pending => "Pending".to_string(),
    }
}

pub fn render_detail(detail: &ResidentDetail) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Name: {}", detail.name);
    let _ = writeln!(out, "Date of birth: {}", format_date(detail.date_of_birth));
    let _ = writeln!(out, "Photo: {}", detail.photo);

    let _ = writeln!(out, "Medical conditions:");
    write_list(&mut out, &detail.medical_conditions, "None recorded");
    let _ = writeln!(out, "Allergies:");
    write_list(&mut out, &detail.allergies, "No allergies recorded");

    let _ = writeln!(out, "Medications:");
    if detail.medications.is_empty() {
        let _ = writeln!(out, "  - None");
    }
    for row in &detail.medications {
        let _ = writeln!(out, "  - {}", medication_line(row));
    }

    let _ = writeln!(
        out,
        "Emergency contact: {} | {} | {}",
        detail.contact_name, detail.contact_phone, detail.contact_relationship
    );
    match &detail.exam_file_name {
        Some(name) => {
            let _ = writeln!(out, "Last exam: {name}");
        }
        None => {
            let _ = writeln!(out, "Last exam: none on file");
        }
    }
    out
}

fn write_list(out: &mut String, items: &[String], empty: &str) {
    if items.is_empty() {
        let _ = writeln!(out, "  - {empty}");
    }
    for item in items {
        let _ = writeln!(out, "  - {item}");
    }
}

fn format_date(date: NaiveDate) -> String {
    date.format(DATE_DISPLAY_FORMAT).to_string()
}
