//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod run_council;
pub mod synthesize;

#[cfg(test)]
pub(crate) mod test_support;
