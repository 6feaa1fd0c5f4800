//! Exam record store use-case service.
//!
//! # Responsibility
//! - Provide add/update/delete/sorted-view entry points for the UI shell.
//! - Parse and validate raw form input before touching the repository.
//!
//! # Invariants
//! - No failure path leaves a partial mutation behind.
//! - Structural update/delete affect the first match in insertion order.
//! - Log events carry ids and counts only, never user-entered text.

use crate::model::exam::{ExamFields, ExamId, ExamInput, ExamRecord};
use crate::repo::exam_repo::{
    ExamRepository, ExamTarget, InMemoryExamRepository, RepoError, RepoResult,
};
use crate::service::sorted_view::SortedView;
use log::{info, warn};

/// Use-case facade over an exam repository.
pub struct ExamService<R: ExamRepository> {
    repo: R,
}

impl ExamService<InMemoryExamRepository> {
    /// Creates an empty session store.
    pub fn in_memory() -> Self {
        Self::new(InMemoryExamRepository::new())
    }
}

impl<R: ExamRepository> ExamService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Parses form input and appends a new record.
    ///
    /// # Errors
    /// - `ErrorKind::Validation` when a field is blank.
    /// - `ErrorKind::Format` when date or time is malformed.
    pub fn add(&mut self, input: &ExamInput) -> RepoResult<ExamRecord> {
        let result = input
            .parse()
            .map_err(RepoError::from)
            .and_then(|fields| {
                let record = ExamRecord::new(fields);
                self.repo.insert(record.clone())?;
                Ok(record)
            });
        match &result {
            Ok(record) => info!(
                "event=exam_add module=exam_service status=ok exam_id={} total={}",
                record.id,
                self.len()
            ),
            Err(err) => log_failure("exam_add", err),
        }
        result
    }

    /// Replaces the first record structurally equal to `original`.
    ///
    /// Input is parsed before the lookup, so a malformed form never reports
    /// `NotFound`.
    pub fn update(&mut self, original: &ExamFields, input: &ExamInput) -> RepoResult<ExamRecord> {
        let result = input.parse().map_err(RepoError::from).and_then(|fields| {
            let id = self
                .repo
                .find_first_matching(original)
                .map(|record| record.id)
                .ok_or_else(|| RepoError::NotFound(ExamTarget::Fields(original.clone())))?;
            self.repo.replace(id, fields)
        });
        log_outcome("exam_update", &result);
        result
    }

    /// Replaces the record carrying `id`, keeping its position.
    pub fn update_by_id(&mut self, id: ExamId, input: &ExamInput) -> RepoResult<ExamRecord> {
        let result = input
            .parse()
            .map_err(RepoError::from)
            .and_then(|fields| self.repo.replace(id, fields));
        log_outcome("exam_update", &result);
        result
    }

    /// Removes the first record structurally equal to `target`.
    pub fn delete(&mut self, target: &ExamFields) -> RepoResult<ExamRecord> {
        let result = match self.repo.find_first_matching(target).map(|record| record.id) {
            Some(id) => self.repo.remove(id),
            None => Err(RepoError::NotFound(ExamTarget::Fields(target.clone()))),
        };
        log_outcome("exam_delete", &result);
        result
    }

    /// Removes the record carrying `id`.
    pub fn delete_by_id(&mut self, id: ExamId) -> RepoResult<ExamRecord> {
        let result = self.repo.remove(id);
        log_outcome("exam_delete", &result);
        result
    }

    pub fn get(&self, id: ExamId) -> Option<&ExamRecord> {
        self.repo.get(id)
    }

    /// Records in insertion order.
    pub fn records(&self) -> &[ExamRecord] {
        self.repo.records()
    }

    /// Display-ordered view; the shell pulls it after every mutation.
    pub fn sorted_view(&self) -> SortedView<'_> {
        SortedView::new(self.repo.records())
    }

    pub fn len(&self) -> usize {
        self.repo.records().len()
    }

    pub fn is_empty(&self) -> bool {
        self.repo.records().is_empty()
    }
}

fn log_outcome(event: &str, result: &RepoResult<ExamRecord>) {
    match result {
        Ok(record) => info!(
            "event={} module=exam_service status=ok exam_id={}",
            event, record.id
        ),
        Err(err) => log_failure(event, err),
    }
}

fn log_failure(event: &str, err: &RepoError) {
    warn!(
        "event={} module=exam_service status=error kind={}",
        event,
        err.kind().as_str()
    );
}

#[cfg(test)]
mod tests {
    use super::ExamService;
    use crate::model::exam::ExamInput;
    use crate::repo::exam_repo::ErrorKind;

    #[test]
    fn malformed_input_wins_over_missing_target() {
        let mut service = ExamService::in_memory();
        let original = ExamInput::new("Ghost", "2024-01-01", "08:00", "Nowhere")
            .parse()
            .unwrap();

        let err = service
            .update(&original, &ExamInput::new("Ghost", "2024-01-01", "8am", "Nowhere"))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Format);
    }

    #[test]
    fn update_by_id_keeps_id() {
        let mut service = ExamService::in_memory();
        let added = service
            .add(&ExamInput::new("Calculus", "2024-05-10", "09:00", "Room A"))
            .unwrap();
        let updated = service
            .update_by_id(
                added.id,
                &ExamInput::new("Calculus II", "2024-05-11", "10:30", "Room C"),
            )
            .unwrap();
        assert_eq!(updated.id, added.id);
        assert_eq!(service.get(added.id), Some(&updated));
    }
}
