//! Progress reporters for the council

pub mod reporter;
