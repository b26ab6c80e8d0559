//! Note domain model.
//!
//! # Responsibility
//! - Define the in-memory shape of one imported note record.
//! - Derive the canonical moment and display projections from raw timestamps.
//!
//! # Invariants
//! - The original JSON record of every note is retained untouched.
//! - Derived timestamp fields are computed once and never mutated.

pub mod collection;
pub mod note;
pub mod timestamp;
