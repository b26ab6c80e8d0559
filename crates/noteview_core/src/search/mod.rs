//! In-memory search over a loaded note collection.
//!
//! # Responsibility
//! - Provide the type-as-you-search title filter.

pub mod title;
