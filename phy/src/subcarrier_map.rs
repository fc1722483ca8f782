//! Subcarrier to FFT Bin Mapping
//!
//! Logical subcarriers are numbered 0..num_subcarriers with the first half
//! representing negative frequencies. The FFT works on a DC-first layout, so
//! the negative-frequency half maps to the top of the bin range and the
//! non-negative half to the bottom (the usual centered-spectrum/fftshift
//! convention).

/// Map a logical subcarrier index to its physical FFT bin.
///
/// Callers must have validated that `num_subcarriers` is even and no larger
/// than `fft_size`; the mapping is undefined otherwise.
pub fn subcarrier_to_fft_bin(subcarrier: usize, num_subcarriers: usize, fft_size: usize) -> usize {
    debug_assert!(num_subcarriers % 2 == 0);
    debug_assert!(num_subcarriers <= fft_size);
    debug_assert!(subcarrier < num_subcarriers);

    if subcarrier < num_subcarriers / 2 {
        subcarrier + (fft_size - num_subcarriers / 2)
    } else {
        subcarrier - num_subcarriers / 2
    }
}

/// Precompute the bin for every subcarrier in 0..num_subcarriers
pub fn build_bin_map(num_subcarriers: usize, fft_size: usize) -> Vec<usize> {
    (0..num_subcarriers)
        .map(|k| subcarrier_to_fft_bin(k, num_subcarriers, fft_size))
        .collect()
}
