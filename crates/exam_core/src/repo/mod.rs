//! Repository layer for exam records.
//!
//! # Responsibility
//! - Define the storage contract used by the exam service.
//! - Keep the session-lifetime sequence behind one seam.
//!
//! # Invariants
//! - Repository writes must enforce validation before mutation.
//! - Repository APIs return semantic errors (`NotFound`) instead of panicking.

pub mod exam_repo;
