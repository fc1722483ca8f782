//! Common Fixed-Point Utilities and Types Library
//!
//! This crate provides the fixed-point types and conversion primitives shared
//! across the baseband table-generation components.

pub mod agc;
pub mod fixed;

// Re-export commonly used items
pub use agc::*;
pub use fixed::*;
