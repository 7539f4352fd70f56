//! Interactive terminal menus.
//!
//! Every action reads a fresh snapshot, asks for input, and hands one
//! intent to the store; the active tab is re-rendered on the next loop.

use crate::exam_io::{export_exam, load_exam};
use crate::render::{medication_line, render_detail, render_view};
use anyhow::{anyhow, Result};
use carelog_core::view::medication_table;
use carelog_core::{
    alert_message, resident_detail, FormSubmission, MedicationId, MedicationSchedule,
    MutationOutcome, Resident, ResidentForm, ResidentId, ResidentStore, Session, ViewMode,
};
use derive_more::Display;
use inquire::{Confirm, MultiSelect, Select, Text};
use std::fmt::{Display as FmtDisplay, Formatter};
use std::path::PathBuf;
use strum::IntoEnumIterator;
use strum_macros::EnumIter;

type MenuExit = Option<()>;
const MENU_EXIT: MenuExit = None;
const MENU_LOOP: MenuExit = Some(());

const SCHEDULE_SLOTS: [&str; 3] = ["morning", "afternoon", "evening"];

/// A text menu that runs until it asks to stop.
trait Menu {
    fn enter(&mut self) -> Result<MenuExit>;

    /// Re-enters the menu, reporting errors without leaving.
    fn enter_loop(&mut self) {
        while let Some(result) = self.enter().transpose() {
            if let Err(error) = result {
                eprintln!("Error: {error}");
            }
        }
    }
}

pub struct App {
    store: ResidentStore,
    session: Session,
}

impl App {
    pub fn new(store: ResidentStore) -> Self {
        Self {
            store,
            session: Session::new(),
        }
    }

    pub fn start(&mut self) {
        println!("Carelog - resident care tracker");
        self.enter_loop();
    }

    fn pick_resident(&self, prompt: &str) -> Result<Option<ResidentId>> {
        let choices: Vec<ResidentChoice> = self
            .store
            .snapshot()
            .iter()
            .map(|resident| ResidentChoice {
                id: resident.id.clone(),
                label: resident.name.clone(),
            })
            .collect();
        if choices.is_empty() {
            println!("No residents yet.");
            return Ok(None);
        }
        Ok(Select::new(prompt, choices)
            .prompt_skippable()?
            .map(|choice| choice.id))
    }

    fn add_resident(&mut self) -> Result<()> {
        self.session.open_add_form();
        let result = fill_create_form().and_then(|form| {
            if !Confirm::new("Save resident?").with_default(true).prompt()? {
                form.cancel();
                println!("Discarded.");
                return Ok(());
            }
            match form.submit() {
                Ok(submission) => {
                    let (id, _) = self.store.submit(submission)?;
                    println!("Resident added [{id}].");
                }
                Err(err) => println!("Submission blocked: {err}"),
            }
            Ok(())
        });
        self.session.close_add_form();
        result
    }

    fn toggle_medication(&mut self) -> Result<()> {
        let Some(resident_id) = self.pick_resident("Resident:")? else {
            return Ok(());
        };
        let resident = self
            .store
            .get(&resident_id)
            .ok_or_else(|| anyhow!("resident {resident_id} is gone"))?;
        let rows: Vec<MedicationChoice> = medication_table(resident)
            .rows
            .into_iter()
            .map(|row| MedicationChoice {
                id: row.medication_id.clone(),
                taken_next: row.toggle_target(),
                label: medication_line(&row),
            })
            .collect();
        if rows.is_empty() {
            println!("No medications for this resident.");
            return Ok(());
        }

        let Some(choice) = Select::new("Medication:", rows).prompt_skippable()? else {
            return Ok(());
        };
        let taken_at = choice
            .taken_next
            .then(|| chrono::Local::now().format("%H:%M:%S").to_string());
        let outcome =
            self.store
                .toggle_medication(&resident_id, &choice.id, choice.taken_next, taken_at);
        if outcome == MutationOutcome::Unchanged {
            println!("Nothing to update.");
        }
        Ok(())
    }

    fn send_alert(&mut self) -> Result<()> {
        let Some(resident_id) = self.pick_resident("Alert for:")? else {
            return Ok(());
        };
        let message = self
            .store
            .get(&resident_id)
            .map(|resident| alert_message(&resident.emergency_contact));
        self.store.send_emergency_alert(&resident_id)?;
        if let Some(message) = message {
            println!("{message}");
        }
        Ok(())
    }

    fn show_details(&mut self) -> Result<()> {
        let Some(resident_id) = self.pick_resident("Resident:")? else {
            return Ok(());
        };
        DetailMenu {
            store: &mut self.store,
            resident_id,
        }
        .enter_loop();
        Ok(())
    }
}

impl Menu for App {
    fn enter(&mut self) -> Result<MenuExit> {
        #[derive(EnumIter, Display)]
        enum Choice {
            #[display("Switch tab")]
            SwitchTab,
            #[display("Add resident")]
            AddResident,
            #[display("Resident details")]
            Details,
            #[display("Toggle medication")]
            ToggleMedication,
            #[display("Send emergency alert")]
            Alert,
            #[display("Quit")]
            Exit,
        }

        let mode = self.session.active();
        println!("\n--- {} ---", mode.label());
        print!("{}", render_view(&self.session.render(&self.store.snapshot())));

        let choice = Select::new("What next?", Choice::iter().collect()).prompt()?;
        match choice {
            Choice::SwitchTab => {
                let tabs: Vec<TabChoice> = ViewMode::ALL.into_iter().map(TabChoice).collect();
                if let Some(TabChoice(mode)) = Select::new("Tab:", tabs).prompt_skippable()? {
                    self.session.select(mode);
                }
            }
            Choice::AddResident => self.add_resident()?,
            Choice::Details => self.show_details()?,
            Choice::ToggleMedication => self.toggle_medication()?,
            Choice::Alert => self.send_alert()?,
            Choice::Exit => return Ok(MENU_EXIT),
        }
        Ok(MENU_LOOP)
    }
}

struct DetailMenu<'st> {
    store: &'st mut ResidentStore,
    resident_id: ResidentId,
}

impl Menu for DetailMenu<'_> {
    fn enter(&mut self) -> Result<MenuExit> {
        #[derive(EnumIter, Display)]
        enum Choice {
            #[display("Edit details")]
            Edit,
            #[display("Attach exam (.pdf)")]
            AttachExam,
            #[display("Download exam")]
            ExportExam,
            #[display("Back")]
            Back,
        }

        let Some(resident) = self.store.get(&self.resident_id).cloned() else {
            println!("Resident {} not found.", self.resident_id);
            return Ok(MENU_EXIT);
        };
        println!();
        print!("{}", render_detail(&resident_detail(&resident)));

        let choice = Select::new("Details:", Choice::iter().collect()).prompt()?;
        let mut form = ResidentForm::edit(&resident);
        match choice {
            Choice::Edit => edit_fields(&mut form, &resident)?,
            Choice::AttachExam => {
                let path = Text::new("Path to exam PDF:").prompt()?;
                form.attach_exam(load_exam(&PathBuf::from(path.trim()))?);
            }
            Choice::ExportExam => {
                let Some(document) = resident.last_exam.as_ref() else {
                    println!("No exam on file.");
                    return Ok(MENU_LOOP);
                };
                let dir = Text::new("Save into directory:").with_default(".").prompt()?;
                let written = export_exam(document, &PathBuf::from(dir.trim()))?;
                println!("Saved {}", written.display());
                return Ok(MENU_LOOP);
            }
            Choice::Back => return Ok(MENU_EXIT),
        }

        match form.submit() {
            Ok(submission @ FormSubmission::Update(_)) => {
                self.store.submit(submission)?;
                println!("Saved.");
            }
            Ok(FormSubmission::Create(_)) => return Err(anyhow!("edit form produced a create")),
            Err(err) => println!("Submission blocked: {err}"),
        }
        Ok(MENU_LOOP)
    }
}

struct ResidentChoice {
    id: ResidentId,
    label: String,
}

impl FmtDisplay for ResidentChoice {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [{}]", self.label, self.id)
    }
}

struct MedicationChoice {
    id: MedicationId,
    taken_next: bool,
    label: String,
}

impl FmtDisplay for MedicationChoice {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let action = if self.taken_next { "mark taken" } else { "mark pending" };
        write!(f, "{} -> {action}", self.label)
    }
}

struct TabChoice(ViewMode);

impl FmtDisplay for TabChoice {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0.label())
    }
}

fn fill_create_form() -> Result<ResidentForm> {
    let mut form = ResidentForm::create();
    form.set_name(Text::new("Name:").prompt()?);
    form.set_date_of_birth(
        Text::new("Date of birth:")
            .with_help_message("YYYY-MM-DD")
            .prompt()?,
    );
    form.set_photo(
        Text::new("Photo URL:")
            .with_help_message("leave empty for the default picture")
            .prompt()?,
    );

    fill_list(&mut form, "Medical condition", ListKind::Condition)?;
    fill_list(&mut form, "Allergy", ListKind::Allergy)?;
    fill_medications(&mut form)?;

    form.set_contact_name(Text::new("Emergency contact name:").prompt()?);
    form.set_contact_phone(Text::new("Emergency contact phone:").prompt()?);
    form.set_contact_relationship(Text::new("Relationship:").prompt()?);

    loop {
        let exam_path = Text::new("Last exam PDF path:")
            .with_help_message("leave empty if none")
            .prompt()?;
        match attach_exam_from(&mut form, &exam_path) {
            Ok(_) => return Ok(form),
            Err(err) => eprintln!("Exam not attached: {err:#}"),
        }
    }
}

/// Attaches the exam at `raw_path`; a blank path attaches nothing.
///
/// On error the form is left exactly as it was.
fn attach_exam_from(form: &mut ResidentForm, raw_path: &str) -> Result<bool> {
    let path = raw_path.trim();
    if path.is_empty() {
        return Ok(false);
    }
    form.attach_exam(load_exam(&PathBuf::from(path))?);
    Ok(true)
}

#[derive(Clone, Copy)]
enum ListKind {
    Condition,
    Allergy,
}

fn fill_list(form: &mut ResidentForm, label: &str, kind: ListKind) -> Result<()> {
    let mut index = 0;
    loop {
        let value = Text::new(&format!("{label}:"))
            .with_help_message("leave empty to skip")
            .prompt()?;
        match kind {
            ListKind::Condition => form.set_condition(index, value)?,
            ListKind::Allergy => form.set_allergy(index, value)?,
        }
        if !Confirm::new(&format!("Add another {}?", label.to_lowercase()))
            .with_default(false)
            .prompt()?
        {
            return Ok(());
        }
        index = match kind {
            ListKind::Condition => form.add_condition(),
            ListKind::Allergy => form.add_allergy(),
        };
    }
}

fn fill_medications(form: &mut ResidentForm) -> Result<()> {
    let first = form.medications().first().map(|med| med.id.clone());
    let mut id = match first {
        Some(id) => id,
        None => form.add_medication(),
    };
    loop {
        let name = Text::new("Medication name:")
            .with_help_message("leave empty to skip")
            .prompt()?;
        if !name.trim().is_empty() {
            let dosage = Text::new("Dosage:").prompt()?;
            let frequency = Text::new("Frequency:").prompt()?;
            let slots = MultiSelect::new("Schedule:", SCHEDULE_SLOTS.to_vec()).prompt()?;
            if let Some(med) = form.medication_mut(&id) {
                med.name = name;
                med.dosage = dosage;
                med.frequency = frequency;
                med.schedule = MedicationSchedule::new(
                    slots.contains(&"morning"),
                    slots.contains(&"afternoon"),
                    slots.contains(&"evening"),
                );
            }
        }
        if !Confirm::new("Add another medication?")
            .with_default(false)
            .prompt()?
        {
            return Ok(());
        }
        id = form.add_medication();
    }
}

fn edit_fields(form: &mut ResidentForm, current: &Resident) -> Result<()> {
    form.set_name(Text::new("Name:").with_default(&current.name).prompt()?);
    form.set_photo(
        Text::new("Photo URL:")
            .with_default(current.photo.as_deref().unwrap_or(""))
            .prompt()?,
    );
    if Confirm::new("Add an allergy?").with_default(false).prompt()? {
        let index = form.add_allergy();
        form.set_allergy(index, Text::new("Allergy:").prompt()?)?;
    }
    if Confirm::new("Add a medical condition?")
        .with_default(false)
        .prompt()?
    {
        let index = form.add_condition();
        form.set_condition(index, Text::new("Condition:").prompt()?)?;
    }
    let contact = &current.emergency_contact;
    form.set_contact_name(
        Text::new("Emergency contact name:")
            .with_default(&contact.name)
            .prompt()?,
    );
    form.set_contact_phone(
        Text::new("Emergency contact phone:")
            .with_default(&contact.phone)
            .prompt()?,
    );
    form.set_contact_relationship(
        Text::new("Relationship:")
            .with_default(&contact.relationship)
            .prompt()?,
    );
    Ok(())
}
