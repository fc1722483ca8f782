//! Physical Layer Compensation Table Library
//!
//! This crate precomputes the fixed-point phase-rotation lookup tables used
//! by the real-time PHY compensation kernels: a timing-alignment (TA) table
//! rotating each subcarrier by a candidate sample-timing offset, and a
//! frequency-offset (FO) table carrying a per-sample phase ramp replicated
//! across the kernel lanes. All trigonometry and Q15 quantization happen
//! here, at configuration time; the per-symbol hot path only indexes.

pub mod frequency_offset;
pub mod subcarrier_map;
pub mod timing_alignment;

// Re-export commonly used types
pub use frequency_offset::{
    generate_frequency_offset_table, FrequencyOffsetTable, FrequencyTableRequest, NUM_LANES,
};
pub use subcarrier_map::{build_bin_map, subcarrier_to_fft_bin};
pub use timing_alignment::{
    generate_timing_alignment_table, TimingAlignmentTable, TimingTableRequest,
};

use thiserror::Error;

/// Errors surfaced by the table generators
#[derive(Error, Debug)]
pub enum PhyError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Response buffer holds {provided} int16 words, table needs {required}")]
    BufferSizeMismatch { required: usize, provided: usize },
}
