//! Pure transformation stages between a parsed payload and the grouped view.
//!
//! # Responsibility
//! - Validate the payload shape (`validate`).
//! - Order notes newest-first (`order`).
//! - Bucket ordered notes by calendar month (`group`).
//!
//! # Invariants
//! - Every stage is a pure function of its inputs; no stage holds state.
//! - Ordering and grouping never create or drop notes.

pub mod group;
pub mod order;
pub mod validate;
