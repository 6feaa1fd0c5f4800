//! Table row projection for exam records.
//!
//! # Responsibility
//! - Format records into the string cells shown by the table.
//! - Rebuild a record snapshot from a selected row.
//!
//! # Invariants
//! - `date` is formatted as `YYYY-MM-DD` and `time` as `HH:MM`.
//! - A row rebuilt into a record is a value snapshot, never a store reference.

use crate::model::exam::{
    ExamId, ExamInput, ExamInputError, ExamRecord, ExamValidationError, DATE_FORMAT, TIME_FORMAT,
};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Column headings in display order.
pub const ROW_HEADINGS: [&str; 4] = ["Exam Name", "Date", "Time", "Room"];

/// Errors while turning a displayed row back into a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowError {
    InvalidId(String),
    Input(ExamInputError),
    Validation(ExamValidationError),
}

impl Display for RowError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidId(value) => write!(f, "invalid exam id `{value}` in table row"),
            Self::Input(err) => write!(f, "{err}"),
            Self::Validation(err) => write!(f, "{err}"),
        }
    }
}

impl Error for RowError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidId(_) => None,
            Self::Input(err) => Some(err),
            Self::Validation(err) => Some(err),
        }
    }
}

impl From<ExamInputError> for RowError {
    fn from(value: ExamInputError) -> Self {
        Self::Input(value)
    }
}

impl From<ExamValidationError> for RowError {
    fn from(value: ExamValidationError) -> Self {
        Self::Validation(value)
    }
}

/// One table row as displayed by the shell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExamRow {
    /// Stable record id in string form (hidden column).
    pub id: String,
    pub name: String,
    pub date: String,
    pub time: String,
    pub room: String,
}

impl ExamRow {
    /// Visible cells in heading order.
    pub fn cells(&self) -> [&str; 4] {
        [
            self.name.as_str(),
            self.date.as_str(),
            self.time.as_str(),
            self.room.as_str(),
        ]
    }

    /// Rebuilds the record snapshot this row was rendered from.
    pub fn to_record(&self) -> Result<ExamRecord, RowError> {
        let id: ExamId =
            Uuid::parse_str(self.id.trim()).map_err(|_| RowError::InvalidId(self.id.clone()))?;
        let fields = ExamInput::new(
            self.name.as_str(),
            self.date.as_str(),
            self.time.as_str(),
            self.room.as_str(),
        )
        .parse()?;
        Ok(ExamRecord::with_id(id, fields)?)
    }
}

impl From<&ExamRecord> for ExamRow {
    fn from(value: &ExamRecord) -> Self {
        Self {
            id: value.id.to_string(),
            name: value.name.clone(),
            date: value.date.format(DATE_FORMAT).to_string(),
            time: value.time.format(TIME_FORMAT).to_string(),
            room: value.room.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ExamRow, RowError};
    use crate::model::exam::{ExamInput, ExamRecord};

    #[test]
    fn row_formats_date_and_time_for_display() {
        let fields = ExamInput::new("Physics", "2024-05-09", "14:00", "Room B")
            .parse()
            .unwrap();
        let record = ExamRecord::new(fields);
        let row = ExamRow::from(&record);
        assert_eq!(row.cells(), ["Physics", "2024-05-09", "14:00", "Room B"]);
        assert_eq!(row.to_record().unwrap(), record);
    }

    #[test]
    fn row_with_garbage_id_is_rejected() {
        let row = ExamRow {
            id: "row-1".to_string(),
            name: "Physics".to_string(),
            date: "2024-05-09".to_string(),
            time: "14:00".to_string(),
            room: "Room B".to_string(),
        };
        assert_eq!(
            row.to_record().unwrap_err(),
            RowError::InvalidId("row-1".to_string())
        );
    }
}
