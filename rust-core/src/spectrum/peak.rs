//! Dominant-frequency estimate from a byte magnitude snapshot

/// Width of one frequency bin in Hz
pub fn bin_width(sample_rate: f64, fft_size: usize) -> f64 {
    sample_rate / fft_size as f64
}

/// Frequency of the strongest bin: `argmax(snapshot) * bin_width`
///
/// Equal magnitudes resolve to the lowest index, so an all-zero (silent)
/// snapshot yields bin 0, i.e. 0 Hz. An empty snapshot also yields 0 Hz.
pub fn extract_peak(snapshot: &[u8], bin_width: f64) -> f64 {
    let mut max: i16 = -1;
    let mut index = 0usize;

    for (i, &value) in snapshot.iter().enumerate() {
        if i16::from(value) > max {
            max = i16::from(value);
            index = i;
        }
    }

    index as f64 * bin_width
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RATE: f64 = 44100.0;

    #[test]
    fn test_silence_is_zero_hz() {
        let snapshot = vec![0u8; 1024];
        assert_eq!(extract_peak(&snapshot, bin_width(SAMPLE_RATE, 2048)), 0.0);
    }

    #[test]
    fn test_empty_snapshot_is_zero_hz() {
        assert_eq!(extract_peak(&[], 21.5), 0.0);
    }

    #[test]
    fn test_single_maximum() {
        let snapshot = [0, 0, 5, 0];
        let width = bin_width(SAMPLE_RATE, 8);
        assert_eq!(extract_peak(&snapshot, width), 11025.0);
    }

    #[test]
    fn test_exact_bin_frequency() {
        let fft_size = 2048;
        let width = bin_width(48000.0, fft_size);
        for i in [1usize, 17, 500, 1023] {
            let mut snapshot = vec![10u8; fft_size / 2];
            snapshot[i] = 200;
            assert_eq!(extract_peak(&snapshot, width), i as f64 * 48000.0 / fft_size as f64);
        }
    }

    #[test]
    fn test_ties_resolve_to_lowest_bin() {
        let snapshot = [3, 9, 1, 9, 9, 0];
        assert_eq!(extract_peak(&snapshot, 10.0), 10.0);

        let saturated = [255u8; 16];
        assert_eq!(extract_peak(&saturated, 10.0), 0.0);
    }

    #[test]
    fn test_peak_stays_below_nyquist() {
        let fft_size = 2048;
        let mut snapshot = vec![0u8; fft_size / 2];
        *snapshot.last_mut().unwrap() = 1;

        let peak = extract_peak(&snapshot, bin_width(SAMPLE_RATE, fft_size));
        assert!(peak < SAMPLE_RATE / 2.0);
    }
}
