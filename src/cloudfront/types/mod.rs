//! Foundational data structures, error types, and codec configuration.

pub mod error;
pub mod models;
