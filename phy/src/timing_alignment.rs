//! Timing-Alignment Compensation Table Generation
//!
//! For every candidate timing offset t in [-cp, +cp] and every active
//! subcarrier k, the table stores the Q15 rotor e^(j*2*pi*bin(k)*t/fft_size).
//! The generator builds the full-circle phase table once, then resolves each
//! (t, k) cell by modular indexing, so no trigonometry is left for the
//! per-symbol compensation kernels.

use crate::subcarrier_map::build_bin_map;
use crate::PhyError;
use common::fixed::{quantize_phase, PhaseSample};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use tracing::debug;

/// Sizing parameters for one timing-alignment table
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TimingTableRequest {
    /// FFT length, power of two
    pub fft_size: usize,
    /// Maximum timing offset magnitude in samples; offsets
    /// -cyclic_prefix_len..=+cyclic_prefix_len are tabulated
    pub cyclic_prefix_len: usize,
    /// Number of active subcarriers, even, at most fft_size
    pub num_subcarriers: usize,
}

impl TimingTableRequest {
    /// Reject parameter combinations the mapping and indexing are
    /// undefined for, before anything is computed or written
    pub fn validate(&self) -> Result<(), PhyError> {
        if self.fft_size == 0 || !self.fft_size.is_power_of_two() {
            return Err(PhyError::InvalidConfiguration(format!(
                "fft_size must be a nonzero power of two, got {}",
                self.fft_size
            )));
        }
        if self.fft_size > i16::MAX as usize {
            return Err(PhyError::InvalidConfiguration(format!(
                "fft_size {} exceeds the 16-bit sample index range",
                self.fft_size
            )));
        }
        if self.num_subcarriers == 0 || self.num_subcarriers % 2 != 0 {
            return Err(PhyError::InvalidConfiguration(format!(
                "num_subcarriers must be even and nonzero, got {}",
                self.num_subcarriers
            )));
        }
        if self.num_subcarriers > self.fft_size {
            return Err(PhyError::InvalidConfiguration(format!(
                "num_subcarriers {} exceeds fft_size {}",
                self.num_subcarriers, self.fft_size
            )));
        }
        Ok(())
    }

    /// Number of (cos, sin) entries in the table
    pub fn num_entries(&self) -> usize {
        (2 * self.cyclic_prefix_len + 1) * self.num_subcarriers
    }

    /// Required response buffer length in int16 words
    pub fn buffer_len(&self) -> usize {
        2 * self.num_entries()
    }
}

/// Wrap a modular index into [0, len), also for negative values.
///
/// The raw remainder of `bin * t` is negative for negative offsets; using it
/// directly would index out of range. The product is taken in i64 so it
/// cannot wrap before the reduction.
fn wrap_index(value: i64, len: usize) -> usize {
    value.rem_euclid(len as i64) as usize
}

/// Generate a timing-alignment table into a caller-owned buffer.
///
/// Layout is offset-major, subcarrier-minor: entry `(t, k)` lands at pair
/// index `(t + cyclic_prefix_len) * num_subcarriers + k`, stored as
/// interleaved (cos, sin) int16 words. On error nothing is written.
pub fn generate_timing_alignment_table(
    request: &TimingTableRequest,
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

    let fft_size = request.fft_size;
    let cp = request.cyclic_prefix_len as i64;

    // Full-circle phase table, one quantization per FFT bin
    let phase_table: Vec<PhaseSample> = (0..fft_size)
        .map(|n| quantize_phase(2.0 * PI * n as f64 / fft_size as f64))
        .collect();

    let bin_map = build_bin_map(request.num_subcarriers, fft_size);

    let mut seq = 0;
    for time_offset in -cp..=cp {
        for &bin in &bin_map {
            let idx = wrap_index(bin as i64 * time_offset, fft_size);
            debug_assert!(idx < fft_size);
            let sample = phase_table[idx];
            response[2 * seq] = sample.cos;
            response[2 * seq + 1] = sample.sin;
            seq += 1;
        }
    }

    debug!(
        "Generated TA table: fft_size={}, cp={}, subcarriers={}, {} entries",
        fft_size,
        request.cyclic_prefix_len,
        request.num_subcarriers,
        request.num_entries()
    );
    Ok(())
}

/// Owned timing-alignment table with indexed access
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimingAlignmentTable {
    request: TimingTableRequest,
    data: Vec<i16>,
}

impl TimingAlignmentTable {
    /// Allocate and fill a table for the given request
    pub fn generate(request: TimingTableRequest) -> Result<Self, PhyError> {
        request.validate()?;
        let mut data = vec![0i16; request.buffer_len()];
        generate_timing_alignment_table(&request, &mut data)?;
        Ok(Self { request, data })
    }

    /// The request this table was generated from
    pub fn request(&self) -> &TimingTableRequest {
        &self.request
    }

    /// Rotor for timing offset `time_offset` and subcarrier `subcarrier`
    pub fn get(&self, time_offset: i32, subcarrier: usize) -> PhaseSample {
        let cp = self.request.cyclic_prefix_len as i32;
        assert!(time_offset >= -cp && time_offset <= cp);
        assert!(subcarrier < self.request.num_subcarriers);
        let pair = (time_offset + cp) as usize * self.request.num_subcarriers + subcarrier;
        PhaseSample {
            cos: self.data[2 * pair],
            sin: self.data[2 * pair + 1],
        }
    }

    /// Raw interleaved (cos, sin) words, offset-major subcarrier-minor
    pub fn as_i16_slice(&self) -> &[i16] {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::fixed::Q15_MAX;

    fn reference_request() -> TimingTableRequest {
        TimingTableRequest {
            fft_size: 4,
            cyclic_prefix_len: 1,
            num_subcarriers: 2,
        }
    }

    #[test]
    fn test_reference_table() {
        // fft_size=4: phase table is (32767,0), (0,32767), (-32767,0), (0,-32767)
        // bin(0)=3, bin(1)=0
        let table = TimingAlignmentTable::generate(reference_request()).unwrap();
        assert_eq!(
            table.as_i16_slice(),
            &[
                0, 32767, 32767, 0, // t=-1: idx 1, idx 0
                32767, 0, 32767, 0, // t=0:  identity for every subcarrier
                0, -32767, 32767, 0, // t=+1: idx 3, idx 0
            ]
        );
    }

    #[test]
    fn test_zero_offset_row_is_identity() {
        let request = TimingTableRequest {
            fft_size: 256,
            cyclic_prefix_len: 18,
            num_subcarriers: 132,
        };
        let table = TimingAlignmentTable::generate(request).unwrap();
        for k in 0..request.num_subcarriers {
            assert_eq!(table.get(0, k), PhaseSample::IDENTITY);
        }
    }

    #[test]
    fn test_conjugate_symmetry() {
        let request = TimingTableRequest {
            fft_size: 64,
            cyclic_prefix_len: 5,
            num_subcarriers: 48,
        };
        let table = TimingAlignmentTable::generate(request).unwrap();
        for t in 1..=5 {
            for k in 0..request.num_subcarriers {
                assert_eq!(table.get(-t, k), table.get(t, k).conj());
            }
        }
    }

    #[test]
    fn test_entries_are_unit_rotors() {
        let request = TimingTableRequest {
            fft_size: 128,
            cyclic_prefix_len: 9,
            num_subcarriers: 128,
        };
        let table = TimingAlignmentTable::generate(request).unwrap();
        let cp = request.cyclic_prefix_len as i32;
        for t in -cp..=cp {
            for k in 0..request.num_subcarriers {
                let sample = table.get(t, k);
                assert!(sample.cos.abs() <= Q15_MAX);
                assert!(sample.sin.abs() <= Q15_MAX);
                // Magnitude of a quantized unit phasor stays near full scale
                let norm = (sample.cos as i64).pow(2) + (sample.sin as i64).pow(2);
                assert!(norm > (Q15_MAX as i64 - 200).pow(2));
                assert!(norm <= 2 * (Q15_MAX as i64).pow(2));
            }
        }
    }

    #[test]
    fn test_zero_cp_boundary() {
        // cp=0 collapses the table to the single identity row
        let request = TimingTableRequest {
            fft_size: 16,
            cyclic_prefix_len: 0,
            num_subcarriers: 16,
        };
        let mut buffer = vec![0i16; request.buffer_len()];
        generate_timing_alignment_table(&request, &mut buffer).unwrap();
        for pair in buffer.chunks_exact(2) {
            assert_eq!(pair, &[32767, 0]);
        }
    }

    #[test]
    fn test_rejects_invalid_configuration() {
        let odd = TimingTableRequest {
            fft_size: 64,
            cyclic_prefix_len: 4,
            num_subcarriers: 33,
        };
        assert!(matches!(
            odd.validate(),
            Err(PhyError::InvalidConfiguration(_))
        ));

        let too_wide = TimingTableRequest {
            fft_size: 64,
            cyclic_prefix_len: 4,
            num_subcarriers: 66,
        };
        assert!(too_wide.validate().is_err());

        let not_pow2 = TimingTableRequest {
            fft_size: 60,
            cyclic_prefix_len: 4,
            num_subcarriers: 12,
        };
        assert!(not_pow2.validate().is_err());

        let zero_fft = TimingTableRequest {
            fft_size: 0,
            cyclic_prefix_len: 4,
            num_subcarriers: 12,
        };
        assert!(zero_fft.validate().is_err());
    }

    #[test]
    fn test_undersized_buffer_left_untouched() {
        let request = reference_request();
        let mut buffer = vec![7i16; request.buffer_len() - 2];
        let result = generate_timing_alignment_table(&request, &mut buffer);
        assert!(matches!(
            result,
            Err(PhyError::BufferSizeMismatch {
                required: 12,
                provided: 10
            })
        ));
        assert!(buffer.iter().all(|&word| word == 7));
    }

    #[test]
    fn test_wrap_index_normalizes_negative_products() {
        assert_eq!(wrap_index(-1, 4), 3);
        assert_eq!(wrap_index(-4, 4), 0);
        assert_eq!(wrap_index(-9, 4), 3);
        assert_eq!(wrap_index(9, 4), 1);
        // Product of the largest bin and offset must survive the reduction
        assert_eq!(wrap_index(32766 * -32767, 32768), (32768 - 32766 * 32767 % 32768) % 32768);
    }
}
