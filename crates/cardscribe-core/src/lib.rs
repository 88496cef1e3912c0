//! Shared building blocks for the cardscribe crates.
//!
//! Holds the pieces that carry no vCard knowledge: error types,
//! configuration loading and the generator identity stamped into output.

pub mod config;
pub mod constants;
pub mod error;
