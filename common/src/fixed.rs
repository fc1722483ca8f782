//! Q15 Fixed-Point Phase Quantization
//!
//! Converts angles to 16S15 (Q15) cosine/sine pairs as consumed by the
//! compensation kernels. This is the only place in the table-generation path
//! where floating-point trigonometry runs; callers precompute angle tables
//! at configuration time so the per-symbol hot path never calls into here.

use num_complex::Complex32;
use serde::{Deserialize, Serialize};

/// Full-scale Q15 magnitude.
///
/// The quantizer maps [-1.0, 1.0] onto [-32767, 32767]; the asymmetric
/// -32768 representable by two's complement Q15 is never emitted, keeping
/// negation and conjugation lossless.
pub const Q15_MAX: i16 = 32767;

/// One quantized phase rotor: interleaved (cosine, sine) in Q15.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseSample {
    /// Cosine component in Q15
    pub cos: i16,
    /// Sine component in Q15
    pub sin: i16,
}

impl PhaseSample {
    /// The zero-angle rotor (unity gain, no rotation)
    pub const IDENTITY: PhaseSample = PhaseSample { cos: Q15_MAX, sin: 0 };

    /// Complex conjugate (rotation in the opposite direction)
    pub fn conj(&self) -> Self {
        Self {
            cos: self.cos,
            sin: -self.sin,
        }
    }

    /// Float-domain view of the rotor, for verification and debugging
    pub fn to_complex32(&self) -> Complex32 {
        Complex32::new(
            self.cos as f32 / Q15_MAX as f32,
            self.sin as f32 / Q15_MAX as f32,
        )
    }
}

/// Quantize an angle in radians to a Q15 (cosine, sine) pair.
///
/// Rounding is half-away-from-zero, matching the 16S15 convention of the
/// downstream SIMD kernels. Both components land in [-32767, 32767].
pub fn quantize_phase(theta: f64) -> PhaseSample {
    PhaseSample {
        cos: (theta.cos() * Q15_MAX as f64).round() as i16,
        sin: (theta.sin() * Q15_MAX as f64).round() as i16,
    }
}
