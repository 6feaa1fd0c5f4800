//! Core domain logic for the exam scheduler.
//! This crate is the single source of truth for exam record invariants.

pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{
    default_log_level, init_logging, init_logging_with, logging_status, LogSettings, LoggingError,
};
pub use model::exam::{
    ExamField, ExamFields, ExamId, ExamInput, ExamInputError, ExamRecord, ExamValidationError,
    DATE_FORMAT, TIME_FORMAT,
};
pub use model::row::{ExamRow, RowError, ROW_HEADINGS};
pub use repo::exam_repo::{
    ErrorKind, ExamRepository, ExamTarget, InMemoryExamRepository, RepoError, RepoResult,
};
pub use service::edit_session::{EditSession, EditState, SessionError};
pub use service::exam_service::ExamService;
pub use service::sorted_view::SortedView;

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
