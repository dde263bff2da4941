// SPDX-License-Identifier: MPL-2.0
//! Analysis session: the patient list, the selected patient and whether the
//! report is open.
//!
//! Fields are private; state only changes through the transition methods,
//! which keep two invariants:
//!
//! - a selection always indexes into the current list
//! - the report flag is only set while a patient is selected
//!
//! Replacing or clearing the list clears both selection and report flag in
//! the same call.

use crate::domain::{Patient, PatientId};
use thiserror::Error;

/// Rejected session transitions. The session is left unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("the backend returned no patients")]
    EmptyResult,
    #[error("no patient list is loaded")]
    NoPatients,
    #[error("patient {0} is not in the current list")]
    UnknownPatient(PatientId),
    #[error("no patient is selected")]
    NoSelection,
}

/// Which screen the session state calls for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Upload,
    PatientList,
    PatientDetail,
    Report,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    patients: Option<Vec<Patient>>,
    selected: Option<usize>,
    show_report: bool,
}

impl Session {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Publishes a fresh upload result.
    ///
    /// An empty list is rejected so the caller can report "no data" while the
    /// previous state stays visible.
    pub fn receive_patients(&mut self, patients: Vec<Patient>) -> Result<(), SessionError> {
        if patients.is_empty() {
            return Err(SessionError::EmptyResult);
        }
        self.patients = Some(patients);
        self.selected = None;
        self.show_report = false;
        Ok(())
    }

    /// Selects a patient of the current list by analysis id.
    pub fn select_patient(&mut self, id: PatientId) -> Result<(), SessionError> {
        let patients = self.patients.as_ref().ok_or(SessionError::NoPatients)?;
        let index = patients
            .iter()
            .position(|patient| patient.id() == id)
            .ok_or(SessionError::UnknownPatient(id))?;
        self.selected = Some(index);
        self.show_report = false;
        Ok(())
    }

    pub fn show_report(&mut self) -> Result<(), SessionError> {
        self.require_selection()?;
        self.show_report = true;
        Ok(())
    }

    pub fn hide_report(&mut self) -> Result<(), SessionError> {
        self.require_selection()?;
        self.show_report = false;
        Ok(())
    }

    /// Back to the pre-upload state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Back to the patient list, keeping it.
    pub fn go_back(&mut self) {
        self.selected = None;
        self.show_report = false;
    }

    fn require_selection(&self) -> Result<(), SessionError> {
        if self.selected.is_some() {
            Ok(())
        } else {
            Err(SessionError::NoSelection)
        }
    }

    #[must_use]
    pub fn view(&self) -> View {
        match (&self.patients, self.selected, self.show_report) {
            (None, _, _) => View::Upload,
            (Some(_), None, _) => View::PatientList,
            (Some(_), Some(_), false) => View::PatientDetail,
            (Some(_), Some(_), true) => View::Report,
        }
    }

    #[must_use]
    pub fn patients(&self) -> Option<&[Patient]> {
        self.patients.as_deref()
    }

    #[must_use]
    pub fn selected_patient(&self) -> Option<&Patient> {
        let index = self.selected?;
        self.patients.as_ref()?.get(index)
    }

    #[must_use]
    pub fn is_report_visible(&self) -> bool {
        self.show_report
    }

    #[must_use]
    pub fn is_initial(&self) -> bool {
        self.patients.is_none() && self.selected.is_none() && !self.show_report
    }
}
