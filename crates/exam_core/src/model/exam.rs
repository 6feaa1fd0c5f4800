//! Exam record domain model.
//!
//! # Responsibility
//! - Define the canonical exam record and its structural field set.
//! - Parse raw form input into typed fields (`YYYY-MM-DD`, `HH:MM`).
//!
//! # Invariants
//! - `id` is stable and never reused for another exam record.
//! - `name` and `room` are never blank after trim.
//! - Structural identity (`ExamRecord::matches`) ignores `id`.

use chrono::{NaiveDate, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Date pattern accepted at the form boundary.
pub const DATE_FORMAT: &str = "%Y-%m-%d";
/// Time pattern accepted at the form boundary (24-hour clock).
pub const TIME_FORMAT: &str = "%H:%M";

static DATE_SHAPE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{1,2}-\d{1,2}$").expect("valid date shape regex"));
static TIME_SHAPE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{1,2}:\d{1,2}$").expect("valid time shape regex"));

/// Stable identifier attached to every exam record at creation time.
pub type ExamId = Uuid;

/// One user-editable exam field, in form order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExamField {
    Name,
    Date,
    Time,
    Room,
}

impl ExamField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Date => "date",
            Self::Time => "time",
            Self::Room => "room",
        }
    }
}

/// Errors raised while parsing raw form input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExamInputError {
    /// A required field is empty after trim.
    MissingField(ExamField),
    /// Date text is not a real calendar date in `YYYY-MM-DD` form.
    InvalidDate(String),
    /// Time text is not a valid `HH:MM` 24-hour time.
    InvalidTime(String),
}

impl ExamInputError {
    /// Returns `true` for date/time pattern failures.
    pub fn is_format_error(&self) -> bool {
        matches!(self, Self::InvalidDate(_) | Self::InvalidTime(_))
    }
}

impl Display for ExamInputError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField(field) => {
                write!(f, "all fields must be filled: `{}` is empty", field.as_str())
            }
            Self::InvalidDate(value) => {
                write!(f, "invalid date `{value}`; expected YYYY-MM-DD")
            }
            Self::InvalidTime(value) => {
                write!(f, "invalid time `{value}`; expected HH:MM (24-hour)")
            }
        }
    }
}

impl Error for ExamInputError {}

/// Invariant violations on already-typed exam values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExamValidationError {
    BlankName,
    BlankRoom,
    NilId,
}

impl Display for ExamValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankName => write!(f, "exam name must not be blank"),
            Self::BlankRoom => write!(f, "exam room must not be blank"),
            Self::NilId => write!(f, "exam id must not be nil"),
        }
    }
}

impl Error for ExamValidationError {}

/// Raw form input, exactly as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExamInput {
    pub name: String,
    pub date: String,
    pub time: String,
    pub room: String,
}

impl ExamInput {
    pub fn new(
        name: impl Into<String>,
        date: impl Into<String>,
        time: impl Into<String>,
        room: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            date: date.into(),
            time: time.into(),
            room: room.into(),
        }
    }

    /// Parses trimmed input into typed fields.
    ///
    /// Emptiness is checked for all four fields before any format check, so a
    /// blank field always wins over a malformed one.
    ///
    /// # Errors
    /// - `MissingField` naming the first empty field (name, date, time, room).
    /// - `InvalidDate` / `InvalidTime` when a value does not match its pattern.
    pub fn parse(&self) -> Result<ExamFields, ExamInputError> {
        let name = self.name.trim();
        let date = self.date.trim();
        let time = self.time.trim();
        let room = self.room.trim();

        for (field, value) in [
            (ExamField::Name, name),
            (ExamField::Date, date),
            (ExamField::Time, time),
            (ExamField::Room, room),
        ] {
            if value.is_empty() {
                return Err(ExamInputError::MissingField(field));
            }
        }

        Ok(ExamFields {
            name: name.to_string(),
            date: parse_date(date)?,
            time: parse_time(time)?,
            room: room.to_string(),
        })
    }
}

/// Parses a `YYYY-MM-DD` calendar date.
///
/// Month and day may be written without zero padding (`2024-5-1`).
pub fn parse_date(value: &str) -> Result<NaiveDate, ExamInputError> {
    if !DATE_SHAPE_RE.is_match(value) {
        return Err(ExamInputError::InvalidDate(value.to_string()));
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|_| ExamInputError::InvalidDate(value.to_string()))
}

/// Parses an `HH:MM` 24-hour wall-clock time.
///
/// Hour and minute may be written without zero padding (`9:00`).
pub fn parse_time(value: &str) -> Result<NaiveTime, ExamInputError> {
    if !TIME_SHAPE_RE.is_match(value) {
        return Err(ExamInputError::InvalidTime(value.to_string()));
    }
    NaiveTime::parse_from_str(value, TIME_FORMAT)
        .map_err(|_| ExamInputError::InvalidTime(value.to_string()))
}

/// Structural value of an exam: the four fields shown in the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExamFields {
    pub name: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub room: String,
}

impl ExamFields {
    /// Checks the non-blank invariant for text fields.
    pub fn validate(&self) -> Result<(), ExamValidationError> {
        if self.name.trim().is_empty() {
            return Err(ExamValidationError::BlankName);
        }
        if self.room.trim().is_empty() {
            return Err(ExamValidationError::BlankRoom);
        }
        Ok(())
    }
}

/// Canonical stored exam record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ExamRecordWire")]
pub struct ExamRecord {
    /// Generated at creation; survives updates.
    pub id: ExamId,
    pub name: String,
    pub date: NaiveDate,
    /// Serialized as `HH:MM`.
    #[serde(with = "hhmm")]
    pub time: NaiveTime,
    pub room: String,
}

impl ExamRecord {
    /// Creates a record with a freshly generated id.
    pub fn new(fields: ExamFields) -> Self {
        Self::from_parts(Uuid::new_v4(), fields)
    }

    /// Creates a record with a caller-provided id.
    ///
    /// Used when a record snapshot is rebuilt from a displayed row.
    pub fn with_id(id: ExamId, fields: ExamFields) -> Result<Self, ExamValidationError> {
        if id.is_nil() {
            return Err(ExamValidationError::NilId);
        }
        Ok(Self::from_parts(id, fields))
    }

    fn from_parts(id: ExamId, fields: ExamFields) -> Self {
        Self {
            id,
            name: fields.name,
            date: fields.date,
            time: fields.time,
            room: fields.room,
        }
    }

    /// Returns the structural field set of this record.
    pub fn fields(&self) -> ExamFields {
        ExamFields {
            name: self.name.clone(),
            date: self.date,
            time: self.time,
            room: self.room.clone(),
        }
    }

    /// Full-field structural equality; `id` is not compared.
    pub fn matches(&self, fields: &ExamFields) -> bool {
        self.name == fields.name
            && self.date == fields.date
            && self.time == fields.time
            && self.room == fields.room
    }

    /// Replaces every user-visible field, keeping `id`.
    pub fn replace_fields(&mut self, fields: ExamFields) {
        self.name = fields.name;
        self.date = fields.date;
        self.time = fields.time;
        self.room = fields.room;
    }

    /// Display ordering key: date first, then time.
    pub fn schedule_key(&self) -> (NaiveDate, NaiveTime) {
        (self.date, self.time)
    }

    pub fn validate(&self) -> Result<(), ExamValidationError> {
        if self.id.is_nil() {
            return Err(ExamValidationError::NilId);
        }
        if self.name.trim().is_empty() {
            return Err(ExamValidationError::BlankName);
        }
        if self.room.trim().is_empty() {
            return Err(ExamValidationError::BlankRoom);
        }
        Ok(())
    }
}

impl From<&ExamRecord> for ExamFields {
    fn from(value: &ExamRecord) -> Self {
        value.fields()
    }
}

#[derive(Deserialize)]
struct ExamRecordWire {
    id: ExamId,
    name: String,
    date: NaiveDate,
    #[serde(with = "hhmm")]
    time: NaiveTime,
    room: String,
}

impl TryFrom<ExamRecordWire> for ExamRecord {
    type Error = ExamValidationError;

    fn try_from(value: ExamRecordWire) -> Result<Self, Self::Error> {
        let record = Self {
            id: value.id,
            name: value.name,
            date: value.date,
            time: value.time,
            room: value.room,
        };
        record.validate()?;
        Ok(record)
    }
}

mod hhmm {
    use super::{parse_time, TIME_FORMAT};
    use chrono::NaiveTime;
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&time.format(TIME_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse_time(&raw).map_err(D::Error::custom)
    }
}
