//! Ingestion use-cases.
//!
//! # Responsibility
//! - Turn raw payload text into an ordered collection (`ingest`).
//! - Own the current collection and swap it atomically (`library`).
//!
//! # See also
//! - `crate::source` for the collaborators that supply payload text.

pub mod ingest;
pub mod library;
