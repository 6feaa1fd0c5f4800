//! Flutter-facing bridge for the exam scheduler core.

pub mod api;
