//! Resident store: the single owner of the resident collection.
//!
//! # Responsibility
//! - Hold the current collection as an immutable shared snapshot.
//! - Expose exactly three writes (add, toggle, update) plus form dispatch.
//! - Route emergency alerts to the external collaborator.
//!
//! # Invariants
//! - Every write swaps in a whole new snapshot; handed-out snapshots are
//!   never modified.
//! - Unknown ids are a silent no-op reported as `MutationOutcome::Unchanged`.
//! - Log lines carry ids and counts only, never names or medical data.

use crate::alert::{AlertError, EmergencyAlert, LogAlert};
use crate::clock::{Clock, SystemClock};
use crate::form::FormSubmission;
use crate::model::medication::MedicationId;
use crate::model::resident::{NewResident, Resident, ResidentId, ResidentValidationError};
use crate::ops;
use log::{debug, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::rc::Rc;

/// Immutable view of the collection at one point in time.
pub type Snapshot = Rc<[Resident]>;

/// Whether a write changed the collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationOutcome {
    /// The collection was replaced.
    Applied,
    /// Target id not found; collection left as is.
    Unchanged,
}

impl MutationOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }
}

/// Store-level errors.
#[derive(Debug)]
pub enum StoreError {
    Validation(ResidentValidationError),
    Alert(AlertError),
    ResidentNotFound(ResidentId),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Alert(err) => write!(f, "{err}"),
            Self::ResidentNotFound(id) => write!(f, "resident not found: {id}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Alert(err) => Some(err),
            Self::ResidentNotFound(_) => None,
        }
    }
}

impl From<ResidentValidationError> for StoreError {
    fn from(value: ResidentValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<AlertError> for StoreError {
    fn from(value: AlertError) -> Self {
        Self::Alert(value)
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Root controller owning the resident collection.
pub struct ResidentStore {
    residents: Snapshot,
    clock: Box<dyn Clock>,
    alerts: Box<dyn EmergencyAlert>,
}

impl Default for ResidentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ResidentStore {
    /// Empty store using the wall clock and log-only alerts.
    pub fn new() -> Self {
        Self::with_collaborators(Vec::new(), Box::new(SystemClock), Box::new(LogAlert))
    }

    /// Store seeded with `residents`, e.g. the demo roster.
    pub fn with_residents(residents: Vec<Resident>) -> Self {
        Self::with_collaborators(residents, Box::new(SystemClock), Box::new(LogAlert))
    }

    pub fn with_collaborators(
        residents: Vec<Resident>,
        clock: Box<dyn Clock>,
        alerts: Box<dyn EmergencyAlert>,
    ) -> Self {
        Self {
            residents: Rc::from(residents),
            clock,
            alerts,
        }
    }

    /// Current collection. Later writes do not affect the returned value.
    pub fn snapshot(&self) -> Snapshot {
        Rc::clone(&self.residents)
    }

    pub fn len(&self) -> usize {
        self.residents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.residents.is_empty()
    }

    pub fn get(&self, id: &ResidentId) -> Option<&Resident> {
        ops::find_resident(&self.residents, id)
    }

    /// Adds a resident and returns its generated id.
    ///
    /// # Errors
    /// - `StoreError::Validation` when required fields are blank.
    pub fn add_resident(&mut self, draft: NewResident) -> StoreResult<ResidentId> {
        draft.validate()?;
        let (next, id) = ops::append_resident(&self.residents, draft);
        self.replace(next);
        info!(
            "event=resident_added module=store status=ok resident_id={} total={}",
            id,
            self.residents.len()
        );
        Ok(id)
    }

    /// Marks one medication taken or pending.
    ///
    /// `taken_at` defaults to the store clock when marking taken.
    pub fn toggle_medication(
        &mut self,
        resident_id: &ResidentId,
        medication_id: &MedicationId,
        taken: bool,
        taken_at: Option<String>,
    ) -> MutationOutcome {
        if ops::find_medication(&self.residents, resident_id, medication_id).is_none() {
            warn!(
                "event=medication_toggle module=store status=not_found resident_id={} medication_id={}",
                resident_id, medication_id
            );
            return MutationOutcome::Unchanged;
        }

        let clock = &self.clock;
        let next = ops::toggle_medication(
            &self.residents,
            resident_id,
            medication_id,
            taken,
            taken_at,
            || clock.now_timestamp(),
        );
        self.replace(next);
        info!(
            "event=medication_toggle module=store status=ok resident_id={} medication_id={} taken={}",
            resident_id, medication_id, taken
        );
        MutationOutcome::Applied
    }

    /// Replaces the resident with the same id.
    ///
    /// # Errors
    /// - `StoreError::Validation` when required fields are blank.
    pub fn update_resident(&mut self, updated: Resident) -> StoreResult<MutationOutcome> {
        updated.validate()?;
        if self.get(&updated.id).is_none() {
            warn!(
                "event=resident_update module=store status=not_found resident_id={}",
                updated.id
            );
            return Ok(MutationOutcome::Unchanged);
        }

        let id = updated.id.clone();
        let next = ops::update_resident(&self.residents, updated);
        self.replace(next);
        info!(
            "event=resident_update module=store status=ok resident_id={}",
            id
        );
        Ok(MutationOutcome::Applied)
    }

    /// Applies a submitted form through the matching write.
    ///
    /// Returns the affected resident id together with the outcome.
    pub fn submit(
        &mut self,
        submission: FormSubmission,
    ) -> StoreResult<(ResidentId, MutationOutcome)> {
        match submission {
            FormSubmission::Create(draft) => {
                let id = self.add_resident(draft)?;
                Ok((id, MutationOutcome::Applied))
            }
            FormSubmission::Update(resident) => {
                let id = resident.id.clone();
                let outcome = self.update_resident(resident)?;
                Ok((id, outcome))
            }
        }
    }

    /// Invokes the alert collaborator with the resident's current contact.
    ///
    /// # Errors
    /// - `StoreError::ResidentNotFound` for unknown ids.
    /// - `StoreError::Alert` when the collaborator fails.
    pub fn send_emergency_alert(&self, resident_id: &ResidentId) -> StoreResult<()> {
        let resident = self
            .get(resident_id)
            .ok_or_else(|| StoreError::ResidentNotFound(resident_id.clone()))?;
        let contact = &resident.emergency_contact;

        match self.alerts.send_alert(&contact.name, &contact.phone) {
            Ok(()) => {
                info!(
                    "event=emergency_alert module=store status=ok resident_id={}",
                    resident_id
                );
                Ok(())
            }
            Err(err) => {
                warn!(
                    "event=emergency_alert module=store status=error resident_id={}",
                    resident_id
                );
                Err(err.into())
            }
        }
    }

    fn replace(&mut self, next: Vec<Resident>) {
        debug!(
            "event=snapshot_swap module=store status=ok residents={}",
            next.len()
        );
        self.residents = Rc::from(next);
    }
}
