//! Application layer for editorial-council
//!
//! This crate contains the mode controller, the synthesis engine, the port
//! definitions for model backends and progress reporting, and application
//! configuration. It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::CouncilBehavior;
pub use ports::{
    model_backend::{BackendError, CouncilBackends, ModelBackend},
    progress::{CouncilProgress, NoProgress},
};
pub use use_cases::run_council::{
    CouncilError, CouncilOutcome, CouncilRequest, DoubtRequest, EditorialCouncil, FlowRequest,
    PolishRequest,
};
pub use use_cases::synthesize::SynthesisEngine;
