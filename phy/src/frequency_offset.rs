//! Frequency-Offset Compensation Table Generation
//!
//! One Q15 rotor per FFT sample index, following a linear phase ramp of
//! 2*pi/fft_size per sample starting at angle 0, replicated across the 16
//! lanes the compensation kernel processes in parallel. One full rotation is
//! traversed over fft_size samples.

use crate::PhyError;
use common::fixed::{quantize_phase, PhaseSample};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use tracing::debug;

/// Parallel lane slots sharing one rotor per sample instant
pub const NUM_LANES: usize = 16;

/// Sizing parameters for one frequency-offset table
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FrequencyTableRequest {
    /// FFT length; must fit a signed 16-bit sample count
    pub fft_size: usize,
}

impl FrequencyTableRequest {
    pub fn validate(&self) -> Result<(), PhyError> {
        if self.fft_size == 0 {
            return Err(PhyError::InvalidConfiguration(
                "fft_size must be nonzero".to_string(),
            ));
        }
        if self.fft_size > i16::MAX as usize {
            return Err(PhyError::InvalidConfiguration(format!(
                "fft_size {} exceeds the 16-bit sample index range",
                self.fft_size
            )));
        }
        Ok(())
    }

    /// Number of (cos, sin) entries in the table
    pub fn num_entries(&self) -> usize {
        self.fft_size * NUM_LANES
    }

    /// Required response buffer length in int16 words
    pub fn buffer_len(&self) -> usize {
        2 * self.num_entries()
    }
}

/// Generate a frequency-offset table into a caller-owned buffer.
///
/// Layout is sample-major, lane-minor: 16 consecutive identical interleaved
/// (cos, sin) pairs per sample index. On error nothing is written.
pub fn generate_frequency_offset_table(
    request: &FrequencyTableRequest,
    response: &mut [i16],
) -> Result<(), PhyError> {
    request.validate()?;
    let required = request.buffer_len();
    if response.len() != required {
        return Err(PhyError::BufferSizeMismatch {
            required,
            provided: response.len(),
        });
    }

    let step = 2.0 * PI / request.fft_size as f64;
    let mut theta = 0.0;
    for block in response.chunks_exact_mut(2 * NUM_LANES) {
        let sample = quantize_phase(theta);
        for pair in block.chunks_exact_mut(2) {
            pair[0] = sample.cos;
            pair[1] = sample.sin;
        }
        theta += step;
    }

    debug!(
        "Generated FO table: fft_size={}, {} entries across {} lanes",
        request.fft_size,
        request.num_entries(),
        NUM_LANES
    );
    Ok(())
}

/// Owned frequency-offset table with indexed access
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrequencyOffsetTable {
    request: FrequencyTableRequest,
    data: Vec<i16>,
}

impl FrequencyOffsetTable {
    /// Allocate and fill a table for the given request
    pub fn generate(request: FrequencyTableRequest) -> Result<Self, PhyError> {
        request.validate()?;
        let mut data = vec![0i16; request.buffer_len()];
        generate_frequency_offset_table(&request, &mut data)?;
        Ok(Self { request, data })
    }

    /// The request this table was generated from
    pub fn request(&self) -> &FrequencyTableRequest {
        &self.request
    }

    /// Rotor for FFT sample index `sample` in lane `lane`
    pub fn get(&self, sample: usize, lane: usize) -> PhaseSample {
        assert!(sample < self.request.fft_size);
        assert!(lane < NUM_LANES);
        let pair = sample * NUM_LANES + lane;
        PhaseSample {
            cos: self.data[2 * pair],
            sin: self.data[2 * pair + 1],
        }
    }

    /// Raw interleaved (cos, sin) words, sample-major lane-minor
    pub fn as_i16_slice(&self) -> &[i16] {
        &self.data
    }
}
