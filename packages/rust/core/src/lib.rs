//! Core pipeline orchestration for placepress.
//!
//! Ties together catalog loading, content derivation, document rendering,
//! publication, and the optional notification step into one build workflow.

pub mod loader;
pub mod pipeline;
