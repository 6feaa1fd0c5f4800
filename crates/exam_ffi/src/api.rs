//! FFI use-case API for the form/table shell.
//!
//! # Responsibility
//! - Expose add/update/delete/list entry points to the UI via FRB.
//! - Own the process-wide exam store for the application session.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Every mutating call is followed by the shell pulling `exam_list`.
//! - Records are targeted by stable id, never by row position.

use exam_core::{
    core_version as core_version_inner, default_log_level as default_log_level_inner,
    init_logging as init_logging_inner, ping as ping_inner, ExamId, ExamInput, ExamRow,
    ExamService, InMemoryExamRepository, RepoError, RepoResult,
};
use log::error;
use once_cell::sync::Lazy;
use std::sync::{Mutex, MutexGuard};
use uuid::Uuid;

static SESSION_STORE: Lazy<Mutex<ExamService<InMemoryExamRepository>>> =
    Lazy::new(|| Mutex::new(ExamService::in_memory()));

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// Returns the log level the shell should pass to `init_logging` by default.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - `debug` for debug builds, `info` for release builds.
#[flutter_rust_bridge::frb(sync)]
pub fn default_log_level() -> String {
    default_log_level_inner().to_owned()
}

/// One table row returned to the shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExamRowItem {
    /// Stable exam ID in string form; pass back for update/delete.
    pub exam_id: String,
    pub name: String,
    /// `YYYY-MM-DD`.
    pub date: String,
    /// `HH:MM`.
    pub time: String,
    pub room: String,
}

/// Table contents in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExamListResponse {
    /// Rows sorted by `date ASC, time ASC`.
    pub items: Vec<ExamRowItem>,
    /// Human-readable response message for diagnostics.
    pub message: String,
}

/// Result envelope for add/update/delete actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExamActionResponse {
    /// Whether operation succeeded.
    pub ok: bool,
    /// Affected exam ID on success.
    pub exam_id: Option<String>,
    /// `validation|format|not_found|internal` on failure.
    pub error_kind: Option<String>,
    /// User-facing notice text.
    pub message: String,
}

impl ExamActionResponse {
    fn success(message: impl Into<String>, exam_id: ExamId) -> Self {
        Self {
            ok: true,
            exam_id: Some(exam_id.to_string()),
            error_kind: None,
            message: message.into(),
        }
    }

    fn failure(kind: &str, message: impl Into<String>) -> Self {
        Self {
            ok: false,
            exam_id: None,
            error_kind: Some(kind.to_string()),
            message: message.into(),
        }
    }

    fn from_repo_error(err: RepoError) -> Self {
        Self::failure(err.kind().as_str(), err.to_string())
    }
}

/// Adds one exam from form input.
///
/// # FFI contract
/// - Sync call, in-memory execution.
/// - Never panics.
/// - On failure the store is unchanged.
#[flutter_rust_bridge::frb(sync)]
pub fn exam_add(name: String, date: String, time: String, room: String) -> ExamActionResponse {
    let input = ExamInput::new(name, date, time, room);
    match with_store(|service| service.add(&input)) {
        Ok(Ok(record)) => ExamActionResponse::success(
            format!("Exam '{}' added successfully!", record.name),
            record.id,
        ),
        Ok(Err(err)) => ExamActionResponse::from_repo_error(err),
        Err(response) => response,
    }
}

/// Replaces the exam with `exam_id` using form input.
///
/// # FFI contract
/// - Sync call, in-memory execution.
/// - Unknown or malformed `exam_id` yields `not_found`.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn exam_update(
    exam_id: String,
    name: String,
    date: String,
    time: String,
    room: String,
) -> ExamActionResponse {
    let Some(id) = parse_exam_id(exam_id.as_str()) else {
        return not_found_response(exam_id.as_str());
    };
    let input = ExamInput::new(name, date, time, room);
    match with_store(|service| service.update_by_id(id, &input)) {
        Ok(Ok(record)) => ExamActionResponse::success(
            format!("Exam '{}' updated successfully!", record.name),
            record.id,
        ),
        Ok(Err(err)) => ExamActionResponse::from_repo_error(err),
        Err(response) => response,
    }
}

/// Deletes the exam with `exam_id`.
///
/// # FFI contract
/// - Sync call, in-memory execution.
/// - Unknown or malformed `exam_id` yields `not_found`.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn exam_delete(exam_id: String) -> ExamActionResponse {
    let Some(id) = parse_exam_id(exam_id.as_str()) else {
        return not_found_response(exam_id.as_str());
    };
    match with_store(|service| service.delete_by_id(id)) {
        Ok(Ok(record)) => ExamActionResponse::success("Exam deleted successfully!", record.id),
        Ok(Err(err)) => ExamActionResponse::from_repo_error(err),
        Err(response) => response,
    }
}

/// Returns all exams in display order.
///
/// # FFI contract
/// - Sync call, read-only.
/// - Never panics; lock failures return an empty list with a message.
#[flutter_rust_bridge::frb(sync)]
pub fn exam_list() -> ExamListResponse {
    let service = match lock_store() {
        Ok(service) => service,
        Err(response) => {
            return ExamListResponse {
                items: Vec::new(),
                message: response.message,
            };
        }
    };
    let items = service
        .sorted_view()
        .rows()
        .into_iter()
        .map(to_row_item)
        .collect::<Vec<_>>();
    let message = if items.is_empty() {
        "No exams scheduled.".to_string()
    } else {
        format!("{} exam(s) scheduled.", items.len())
    };
    ExamListResponse { items, message }
}

fn with_store<T>(
    f: impl FnOnce(&mut ExamService<InMemoryExamRepository>) -> RepoResult<T>,
) -> Result<RepoResult<T>, ExamActionResponse> {
    let mut service = lock_store()?;
    Ok(f(&mut service))
}

fn lock_store(
) -> Result<MutexGuard<'static, ExamService<InMemoryExamRepository>>, ExamActionResponse> {
    SESSION_STORE.lock().map_err(|_| {
        error!("event=store_lock module=ffi status=error reason=poisoned");
        ExamActionResponse::failure(
            "internal",
            "exam store is unavailable after an earlier failure",
        )
    })
}

fn parse_exam_id(raw: &str) -> Option<ExamId> {
    Uuid::parse_str(raw.trim()).ok().filter(|id| !id.is_nil())
}

fn not_found_response(raw: &str) -> ExamActionResponse {
    ExamActionResponse::failure(
        "not_found",
        format!("exam not found: `{}`; it might have been deleted already", raw.trim()),
    )
}

fn to_row_item(row: ExamRow) -> ExamRowItem {
    ExamRowItem {
        exam_id: row.id,
        name: row.name,
        date: row.date,
        time: row.time,
        room: row.room,
    }
}

#[cfg(test)]
fn snapshot(id: ExamId) -> Option<exam_core::ExamRecord> {
    SESSION_STORE
        .lock()
        .ok()
        .and_then(|service| service.get(id).cloned())
}

#[cfg(test)]
mod tests {
    use super::{
        core_version, default_log_level, exam_add, exam_delete, exam_list, exam_update,
        init_logging, ping, snapshot,
    };
    use std::time::{SystemTime, UNIX_EPOCH};
    use uuid::Uuid;

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn default_log_level_is_accepted_by_init_logging() {
        let level = default_log_level();
        assert!(level == "debug" || level == "info");

        let error = init_logging(level, "relative/logs".to_string());
        assert!(error.contains("absolute"), "unexpected error: {error}");
    }

    #[test]
    fn init_logging_rejects_empty_log_dir() {
        let error = init_logging("info".to_string(), String::new());
        assert!(!error.is_empty());
    }

    #[test]
    fn init_logging_rejects_unsupported_level() {
        let error = init_logging("verbose".to_string(), "tmp/logs".to_string());
        assert!(!error.is_empty());
    }

    #[test]
    fn exam_add_then_list_contains_created_row() {
        let name = unique_token("add-list");
        let created = exam_add(
            name.clone(),
            "2024-05-10".to_string(),
            "09:00".to_string(),
            "Room A".to_string(),
        );
        assert!(created.ok, "{}", created.message);
        assert_eq!(created.message, format!("Exam '{name}' added successfully!"));
        let exam_id = created.exam_id.expect("add should return exam_id");

        let listed = exam_list();
        let row = listed
            .items
            .iter()
            .find(|item| item.exam_id == exam_id)
            .expect("created exam should be listed");
        assert_eq!(row.name, name);
        assert_eq!(row.date, "2024-05-10");
        assert_eq!(row.time, "09:00");
    }

    #[test]
    fn exam_add_reports_format_error_kind() {
        let response = exam_add(
            unique_token("bad-date"),
            "2024-13-40".to_string(),
            "09:00".to_string(),
            "Room A".to_string(),
        );
        assert!(!response.ok);
        assert_eq!(response.error_kind.as_deref(), Some("format"));
        assert!(response.message.contains("YYYY-MM-DD"));
    }

    #[test]
    fn exam_update_replaces_fields_and_keeps_id() {
        let created = exam_add(
            unique_token("update"),
            "2024-05-10".to_string(),
            "09:00".to_string(),
            "Room A".to_string(),
        );
        let exam_id = created.exam_id.expect("add should return exam_id");

        let renamed = unique_token("updated");
        let updated = exam_update(
            exam_id.clone(),
            renamed.clone(),
            "2024-05-11".to_string(),
            "10:30".to_string(),
            "Room C".to_string(),
        );
        assert!(updated.ok, "{}", updated.message);
        assert_eq!(updated.exam_id.as_deref(), Some(exam_id.as_str()));

        let id = Uuid::parse_str(&exam_id).unwrap();
        let stored = snapshot(id).expect("updated exam should remain stored");
        assert_eq!(stored.name, renamed);
        assert_eq!(stored.room, "Room C");
    }

    #[test]
    fn exam_update_rejects_blank_name() {
        let created = exam_add(
            unique_token("blank"),
            "2024-05-10".to_string(),
            "09:00".to_string(),
            "Room A".to_string(),
        );
        let exam_id = created.exam_id.expect("add should return exam_id");

        let response = exam_update(
            exam_id,
            "  ".to_string(),
            "2024-05-10".to_string(),
            "09:00".to_string(),
            "Room A".to_string(),
        );
        assert!(!response.ok);
        assert_eq!(response.error_kind.as_deref(), Some("validation"));
    }

    #[test]
    fn exam_delete_twice_reports_not_found() {
        let created = exam_add(
            unique_token("delete"),
            "2024-05-10".to_string(),
            "09:00".to_string(),
            "Room A".to_string(),
        );
        let exam_id = created.exam_id.expect("add should return exam_id");

        let first = exam_delete(exam_id.clone());
        assert!(first.ok, "{}", first.message);
        assert_eq!(first.message, "Exam deleted successfully!");

        let second = exam_delete(exam_id.clone());
        assert!(!second.ok);
        assert_eq!(second.error_kind.as_deref(), Some("not_found"));
        assert!(exam_list()
            .items
            .iter()
            .all(|item| item.exam_id != exam_id));
    }

    #[test]
    fn malformed_exam_id_is_not_found() {
        let response = exam_delete("row-7".to_string());
        assert!(!response.ok);
        assert_eq!(response.error_kind.as_deref(), Some("not_found"));
    }

    fn unique_token(prefix: &str) -> String {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time went backwards")
            .as_nanos();
        format!("{prefix}-{nanos}")
    }
}
