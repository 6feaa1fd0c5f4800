//! Edit workflow state for the exam form.
//!
//! # Responsibility
//! - Track which record the form is editing as an explicit state value.
//! - Route form submissions to id-based update/delete.
//!
//! # Invariants
//! - `Editing` holds a snapshot rebuilt from the displayed row, never a
//!   reference into the store.
//! - Successful update/delete always return the session to `Idle`.
//! - Update failing with `NotFound` resets to `Idle`; input errors keep the
//!   current target so the user can correct and resubmit.

use crate::model::exam::{ExamInput, ExamRecord, DATE_FORMAT, TIME_FORMAT};
use crate::model::row::{ExamRow, RowError};
use crate::repo::exam_repo::{ErrorKind, ExamRepository, RepoError};
use crate::service::exam_service::ExamService;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Form editing state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EditState {
    /// No record targeted; the form adds new exams.
    #[default]
    Idle,
    /// The form edits this record snapshot.
    Editing(ExamRecord),
}

/// Errors from edit-session actions.
#[derive(Debug)]
pub enum SessionError {
    /// Update/delete requested while no row is selected.
    NoSelection,
    /// Selected row could not be turned back into a record.
    Row(RowError),
    /// Store-level failure.
    Repo(RepoError),
}

impl SessionError {
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Repo(err) => Some(err.kind()),
            _ => None,
        }
    }
}

impl Display for SessionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoSelection => write!(f, "no exam is selected; select an exam from the list"),
            Self::Row(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for SessionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::NoSelection => None,
            Self::Row(err) => Some(err),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<RowError> for SessionError {
    fn from(value: RowError) -> Self {
        Self::Row(value)
    }
}

impl From<RepoError> for SessionError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Explicit replacement for a hidden "current edit target" field.
#[derive(Debug, Default)]
pub struct EditSession {
    state: EditState,
}

impl EditSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &EditState {
        &self.state
    }

    pub fn target(&self) -> Option<&ExamRecord> {
        match &self.state {
            EditState::Idle => None,
            EditState::Editing(record) => Some(record),
        }
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.state, EditState::Editing(_))
    }

    /// Targets the record shown in `row` and returns the form prefill.
    ///
    /// A row that cannot be parsed leaves the session `Idle`.
    pub fn select(&mut self, row: &ExamRow) -> Result<ExamInput, SessionError> {
        self.state = EditState::Idle;
        let record = row.to_record()?;
        let prefill = ExamInput::new(
            record.name.as_str(),
            record.date.format(DATE_FORMAT).to_string(),
            record.time.format(TIME_FORMAT).to_string(),
            record.room.as_str(),
        );
        self.state = EditState::Editing(record);
        Ok(prefill)
    }

    /// Clears the form target.
    pub fn clear(&mut self) {
        self.state = EditState::Idle;
    }

    /// Applies form input to the targeted record.
    pub fn submit_update<R: ExamRepository>(
        &mut self,
        service: &mut ExamService<R>,
        input: &ExamInput,
    ) -> Result<ExamRecord, SessionError> {
        let target_id = self
            .target()
            .map(|record| record.id)
            .ok_or(SessionError::NoSelection)?;

        match service.update_by_id(target_id, input) {
            Ok(updated) => {
                self.state = EditState::Idle;
                Ok(updated)
            }
            Err(err) => {
                if err.kind() == ErrorKind::NotFound {
                    self.state = EditState::Idle;
                }
                Err(err.into())
            }
        }
    }

    /// Deletes the targeted record.
    ///
    /// `NotFound` keeps the selection so the shell can report it in place.
    pub fn delete_selected<R: ExamRepository>(
        &mut self,
        service: &mut ExamService<R>,
    ) -> Result<ExamRecord, SessionError> {
        let target_id = self
            .target()
            .map(|record| record.id)
            .ok_or(SessionError::NoSelection)?;

        let removed = service.delete_by_id(target_id)?;
        self.state = EditState::Idle;
        Ok(removed)
    }
}
