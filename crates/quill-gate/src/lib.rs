//! # quill-gate
//!
//! The text quality gate: a unit of prose is scored for readability, annotated
//! with `[VERIFY]` markers, assessed by the accuracy and brand collaborators,
//! judged against the run's thresholds, and routed to the `approved` or
//! `draft` store.
//!
//! Every step except routing is a pure function. [`GatePass`] chains them for
//! one unit; [`tools::ToolRegistry`] exposes them as named tool calls.

pub mod annotate;
pub mod collaborators;
pub mod decision;
mod error;
pub mod pass;
pub mod readability;
pub mod router;
pub mod tools;

pub use annotate::{MARKER, annotate};
pub use decision::{Decision, GateInput, decide};
pub use error::GateError;
pub use pass::{GatePass, PassOutcome, Stage};
pub use readability::{ReadabilityReport, score};
pub use router::{RouteOutcome, route};
