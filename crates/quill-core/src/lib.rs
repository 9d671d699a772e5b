//! # quill-core
//!
//! Core types, id validation, and error types for Quill.
//!
//! This crate provides the foundational types shared across all Quill crates:
//! - The `ContentUnit` record and its metadata
//! - Compliance/verification state enums and the draft/approved location state machine
//! - Gate thresholds supplied per run
//! - Id validation for store-addressable units
//! - Cross-cutting error types
//! - Decision trail envelope for JSONL persistence
//! - CLI response types

pub mod entities;
pub mod enums;
pub mod errors;
pub mod ids;
pub mod responses;
pub mod thresholds;
pub mod trail;
