//! Read-only display ordering over stored exams.
//!
//! # Invariants
//! - Order is `(date ASC, time ASC)`; ties keep insertion order.
//! - Building or iterating a view never mutates the store.

use crate::model::exam::ExamRecord;
use crate::model::row::ExamRow;

/// Lazy, restartable projection of records in display order.
///
/// Sorting happens on each `iter()` call, so the view can be walked any
/// number of times and always reflects the borrowed sequence.
#[derive(Debug, Clone, Copy)]
pub struct SortedView<'a> {
    records: &'a [ExamRecord],
}

impl<'a> SortedView<'a> {
    pub fn new(records: &'a [ExamRecord]) -> Self {
        Self { records }
    }

    pub fn iter(&self) -> std::vec::IntoIter<&'a ExamRecord> {
        let mut ordered = self.records.iter().collect::<Vec<_>>();
        ordered.sort_by_key(|record| record.schedule_key());
        ordered.into_iter()
    }

    /// Table rows in display order.
    pub fn rows(&self) -> Vec<ExamRow> {
        self.iter().map(ExamRow::from).collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<'a> IntoIterator for &SortedView<'a> {
    type Item = &'a ExamRecord;
    type IntoIter = std::vec::IntoIter<&'a ExamRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
