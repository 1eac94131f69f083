//! Domain layer for editorial-council
//!
//! This crate contains the core concepts, result types, prompt templates and
//! response parsers. It has no dependencies on infrastructure or presentation
//! concerns and performs no I/O.
//!
//! # Core Concepts
//!
//! ## Roles
//!
//! Three fixed analytical personas, each bound to one model backend:
//!
//! - **Style**: prose density, syntax, authorial voice
//! - **Coherence**: continuity and fact-checking
//! - **Structure**: causality, subtext, tension
//!
//! ## Activation Modes
//!
//! - **Flow**: Coherence checks the text being written, alerting only on problems
//! - **Doubt**: Structure answers a specific question from the author
//! - **Polish**: all three roles critique in parallel, then a synthesis reconciles them

pub mod config;
pub mod core;
pub mod council;
pub mod prompt;

// Re-export commonly used types
pub use config::OutputFormat;
pub use core::{error::DomainError, mode::ActivationMode, role::ModelRole};
pub use council::{
    AnalysisResult, ConsistencyAlert, OK_SENTINEL, ParseOutcome, ParseThresholds, Parsed,
    PolishReport, Severity, SynthesisRecord, find_json_object, parse_flow_response,
    parse_synthesis_response,
};
pub use prompt::{
    BriefingFields, DEFAULT_STYLE_REFERENCE, PromptRegistry, StyleReference, build_briefing,
};
