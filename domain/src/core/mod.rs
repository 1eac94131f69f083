//! Core domain concepts shared across all subdomains.
//!
//! - [`role::ModelRole`] - the three fixed analytical personas
//! - [`mode::ActivationMode`] - the three orchestration patterns
//! - [`error::DomainError`] - domain-level errors

pub mod error;
pub mod mode;
pub mod role;
