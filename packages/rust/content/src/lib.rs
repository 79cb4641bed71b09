//! Content derivation for placepress entities.
//!
//! Fills in missing narrative fields — description and FAQ — from fields
//! already on the record, plus the compact opening-hours expander. All
//! functions here are pure and deterministic: the same record always yields
//! the same derived content, so every document rendered in one build agrees.

mod description;
mod faq;
mod hours;

pub use description::derive_description;
pub use faq::derive_faq;
pub use hours::{OpeningHoursSpan, expand_opening_hours};
