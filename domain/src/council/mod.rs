//! Council results domain
//!
//! Result types produced by the three activation modes, and the tolerant
//! parsers that turn free-form model output into those types.
//!
//! # Parsing policies
//!
//! | Function | Used by | Fallback |
//! |----------|---------|----------|
//! | [`parse_flow_response`] | Flow mode | long text → low "plot" alert, short text → no alert |
//! | [`parse_synthesis_response`] | Synthesis | raw text becomes the verdict |
//!
//! Neither parser ever fails. When the structured path cannot be taken the
//! fallback is recorded as [`ParseOutcome::Degraded`] on the returned value.

pub mod entities;
pub mod parsing;
pub mod value_objects;

pub use entities::{ConsistencyAlert, Severity};
pub use parsing::{
    OK_SENTINEL, ParseThresholds, find_json_object, parse_flow_response, parse_synthesis_response,
};
pub use value_objects::{AnalysisResult, ParseOutcome, Parsed, PolishReport, SynthesisRecord};
