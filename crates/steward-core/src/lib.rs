//! # steward-core
//!
//! Core types for the Steward workflow wizard.
//!
//! This crate provides the foundational types shared across all Steward crates:
//! - Entity structs for CDEs, issues, reconciliation matches, and lineage records
//! - Status enums with state machine transitions
//! - Wizard phase/step ordering and the serialized workflow snapshot
//! - Pure transition functions that return a new collection
//! - Cross-cutting error types

pub mod entities;
pub mod enums;
pub mod errors;
pub mod progress;
pub mod snapshot;
pub mod transitions;
