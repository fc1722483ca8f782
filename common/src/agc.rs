//! Float/Int16 AGC Conversion
//!
//! Gain-scaled conversions between floating-point samples and 16-bit
//! fixed-point samples, used when moving signal data across the
//! float/fixed boundary of the processing chain.

/// Convert int16 samples to float with a linear gain applied
pub fn int16_to_float_agc(input: &[i16], output: &mut [f32], gain: f32) {
    debug_assert_eq!(input.len(), output.len());
    for (out, &sample) in output.iter_mut().zip(input) {
        *out = sample as f32 * gain;
    }
}

/// Convert float samples to int16 with a linear gain applied,
/// rounding and saturating to the int16 range
pub fn float_to_int16_agc(input: &[f32], output: &mut [i16], gain: f32) {
    debug_assert_eq!(input.len(), output.len());
    for (out, &sample) in output.iter_mut().zip(input) {
        *out = saturate_i16(sample * gain);
    }
}

/// Same as [`float_to_int16_agc`] but additionally clamps the converted
/// magnitude to `[-threshold, +threshold]`
pub fn float_to_int16_agc_threshold(
    input: &[f32],
    output: &mut [i16],
    gain: f32,
    threshold: i16,
) {
    debug_assert_eq!(input.len(), output.len());
    for (out, &sample) in output.iter_mut().zip(input) {
        *out = saturate_i16(sample * gain).clamp(-threshold, threshold);
    }
}

fn saturate_i16(value: f32) -> i16 {
    // f32 -> i16 via `as` saturates in Rust, but round first so the
    // conversion matches the half-away-from-zero fixed-point convention
    value.round().clamp(i16::MIN as f32, i16::MAX as f32) as i16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_int16_to_float_gain() {
        let input = [16384i16, -16384, 0, 1];
        let mut output = [0.0f32; 4];
        int16_to_float_agc(&input, &mut output, 2.0);
        assert_eq!(output, [32768.0, -32768.0, 0.0, 2.0]);
    }

    #[test]
    fn test_float_to_int16_rounds_and_saturates() {
        let input = [0.4f32, -0.6, 100_000.0, -100_000.0];
        let mut output = [0i16; 4];
        float_to_int16_agc(&input, &mut output, 1.0);
        assert_eq!(output, [0, -1, 32767, -32768]);
    }

    #[test]
    fn test_threshold_clamps_magnitude() {
        let input = [1.0f32, -1.0, 0.25];
        let mut output = [0i16; 3];
        float_to_int16_agc_threshold(&input, &mut output, 16384.0, 8192);
        assert_eq!(output, [8192, -8192, 4096]);
    }
}
