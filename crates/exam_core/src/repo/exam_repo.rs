//! Exam repository contract and in-memory implementation.
//!
//! # Responsibility
//! - Own the ordered sequence of exam records for the session.
//! - Provide id-based writes and structural (all-field) lookup.
//!
//! # Invariants
//! - Write paths must call `validate()` before mutating the sequence.
//! - Replacement keeps both the record id and its sequence position.
//! - Structural lookup returns the first match in insertion order.

use crate::model::exam::{ExamFields, ExamId, ExamInputError, ExamRecord, ExamValidationError};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// What an update/delete tried to reach.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExamTarget {
    Id(ExamId),
    Fields(ExamFields),
}

/// User-facing error category for store operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A required field is empty.
    Validation,
    /// Date or time does not match its pattern.
    Format,
    /// Update/delete target matches no stored record.
    NotFound,
    /// Id-level invariant broken by a caller; never caused by form input.
    Internal,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Format => "format",
            Self::NotFound => "not_found",
            Self::Internal => "internal",
        }
    }
}

/// Error for exam store operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoError {
    Input(ExamInputError),
    Validation(ExamValidationError),
    DuplicateId(ExamId),
    NotFound(ExamTarget),
}

impl RepoError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Input(err) if err.is_format_error() => ErrorKind::Format,
            Self::Input(_) => ErrorKind::Validation,
            Self::Validation(ExamValidationError::NilId) | Self::DuplicateId(_) => {
                ErrorKind::Internal
            }
            Self::Validation(_) => ErrorKind::Validation,
            Self::NotFound(_) => ErrorKind::NotFound,
        }
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Input(err) => write!(f, "{err}"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::DuplicateId(id) => write!(f, "exam id already stored: {id}"),
            Self::NotFound(ExamTarget::Id(id)) => write!(f, "exam not found: {id}"),
            Self::NotFound(ExamTarget::Fields(_)) => write!(
                f,
                "could not find the original exam; it might have been deleted or modified"
            ),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Input(err) => Some(err),
            Self::Validation(err) => Some(err),
            Self::DuplicateId(_) | Self::NotFound(_) => None,
        }
    }
}

impl From<ExamInputError> for RepoError {
    fn from(value: ExamInputError) -> Self {
        Self::Input(value)
    }
}

impl From<ExamValidationError> for RepoError {
    fn from(value: ExamValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Repository interface for exam record storage.
pub trait ExamRepository {
    /// Appends one record at the end of the sequence.
    fn insert(&mut self, record: ExamRecord) -> RepoResult<ExamId>;
    /// Replaces the fields of the record carrying `id` in place.
    fn replace(&mut self, id: ExamId, fields: ExamFields) -> RepoResult<ExamRecord>;
    /// Removes the record carrying `id` and returns it.
    fn remove(&mut self, id: ExamId) -> RepoResult<ExamRecord>;
    fn get(&self, id: ExamId) -> Option<&ExamRecord>;
    /// First record (insertion order) whose four fields equal `fields`.
    fn find_first_matching(&self, fields: &ExamFields) -> Option<&ExamRecord>;
    /// All records in insertion order.
    fn records(&self) -> &[ExamRecord];
}

/// Session-lifetime repository backed by a `Vec`.
#[derive(Debug, Default)]
pub struct InMemoryExamRepository {
    records: Vec<ExamRecord>,
}

impl InMemoryExamRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn position(&self, id: ExamId) -> Option<usize> {
        self.records.iter().position(|record| record.id == id)
    }
}

impl ExamRepository for InMemoryExamRepository {
    fn insert(&mut self, record: ExamRecord) -> RepoResult<ExamId> {
        record.validate()?;
        if self.position(record.id).is_some() {
            return Err(RepoError::DuplicateId(record.id));
        }

        let id = record.id;
        self.records.push(record);
        Ok(id)
    }

    fn replace(&mut self, id: ExamId, fields: ExamFields) -> RepoResult<ExamRecord> {
        fields.validate()?;

        let index = self
            .position(id)
            .ok_or(RepoError::NotFound(ExamTarget::Id(id)))?;
        let record = &mut self.records[index];
        record.replace_fields(fields);
        Ok(record.clone())
    }

    fn remove(&mut self, id: ExamId) -> RepoResult<ExamRecord> {
        let index = self
            .position(id)
            .ok_or(RepoError::NotFound(ExamTarget::Id(id)))?;
        Ok(self.records.remove(index))
    }

    fn get(&self, id: ExamId) -> Option<&ExamRecord> {
        self.records.iter().find(|record| record.id == id)
    }

    fn find_first_matching(&self, fields: &ExamFields) -> Option<&ExamRecord> {
        self.records.iter().find(|record| record.matches(fields))
    }

    fn records(&self) -> &[ExamRecord] {
        &self.records
    }
}
