//! Exam schedule domain model.
//!
//! # Responsibility
//! - Define the canonical exam record and its form input shape.
//! - Provide the table row projection used by the UI shell.
//!
//! # Invariants
//! - Every stored record carries a stable `ExamId`.
//! - Structural identity compares name, date, time and room only.

pub mod exam;
pub mod row;
