//! Peak extraction
//!
//! Bin 0 carries the mean acceleration (gravity bias, sensor offset), never a
//! mechanical fault, so it always scores as zero here whether or not the
//! spectrum was computed with DC removal.

use std::cmp::Ordering;

use super::ProcessingError;
use crate::types::{Peak, Spectrum};

/// Magnitude of `bin` as seen by peak selection.
fn scored_magnitude(spectrum: &Spectrum, bin: usize) -> f64 {
    if bin == 0 {
        0.0
    } else {
        spectrum.magnitudes[bin]
    }
}

/// Find the dominant component of a spectrum.
///
/// Returns the bin with the largest magnitude; on ties the lowest-frequency
/// bin wins. A spectrum that is zero everywhere yields bin 0 with magnitude 0.
///
/// # Errors
/// [`ProcessingError::EmptySpectrum`] when the spectrum has no bins.
pub fn extract_peak(spectrum: &Spectrum) -> Result<Peak, ProcessingError> {
    let bins = spectrum.frequencies.len().min(spectrum.magnitudes.len());
    if bins == 0 {
        return Err(ProcessingError::EmptySpectrum);
    }

    let mut best_bin = 0;
    let mut best_magnitude = scored_magnitude(spectrum, 0);
    for bin in 1..bins {
        let magnitude = scored_magnitude(spectrum, bin);
        if magnitude > best_magnitude {
            best_bin = bin;
            best_magnitude = magnitude;
        }
    }

    let peak = Peak::new(best_bin, spectrum.frequencies[best_bin], best_magnitude);
    tracing::debug!(
        bin = peak.bin,
        frequency_hz = peak.frequency,
        magnitude_g = peak.magnitude,
        "Peak extracted"
    );
    Ok(peak)
}

/// Find up to `n_peaks` local maxima, strongest first.
///
/// Bin 0 is never reported. The last bin counts as a maximum when it rises
/// above its neighbour.
pub fn find_dominant_frequencies(spectrum: &Spectrum, n_peaks: usize) -> Vec<Peak> {
    let bins = spectrum.frequencies.len().min(spectrum.magnitudes.len());
    let mut peaks: Vec<Peak> = Vec::new();

    for i in 1..bins {
        let prev = scored_magnitude(spectrum, i - 1);
        let curr = scored_magnitude(spectrum, i);
        let next = if i + 1 < bins {
            scored_magnitude(spectrum, i + 1)
        } else {
            f64::NEG_INFINITY
        };

        if curr > prev && curr > next {
            peaks.push(Peak::new(i, spectrum.frequencies[i], curr));
        }
    }

    // Sort by magnitude descending; stable so equal peaks keep frequency order
    peaks.sort_by(|a, b| b.magnitude.partial_cmp(&a.magnitude).unwrap_or(Ordering::Equal));
    peaks.truncate(n_peaks);
    peaks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spectrum(magnitudes: Vec<f64>) -> Spectrum {
        let n = magnitudes.len();
        Spectrum {
            frequencies: (0..n).map(|k| k as f64).collect(),
            magnitudes,
            dc_removed: false,
            sample_rate: 2.0 * n as f64,
            sample_count: 2 * n,
        }
    }

    #[test]
    fn test_picks_largest_bin() {
        let peak = extract_peak(&spectrum(vec![0.0, 0.1, 0.7, 0.3])).unwrap();
        assert_eq!(peak.bin, 2);
        assert_eq!(peak.frequency, 2.0);
        assert_eq!(peak.magnitude, 0.7);
    }

    #[test]
    fn test_ignores_dc_bin() {
        // Gravity bias left in bin 0 must not win
        let peak = extract_peak(&spectrum(vec![5.0, 0.1, 0.4, 0.2])).unwrap();
        assert_eq!(peak.bin, 2);
    }

    #[test]
    fn test_tie_goes_to_lowest_frequency() {
        let peak = extract_peak(&spectrum(vec![0.0, 0.5, 0.2, 0.5])).unwrap();
        assert_eq!(peak.bin, 1);
    }

    #[test]
    fn test_all_zero_spectrum_yields_zero_peak() {
        let peak = extract_peak(&spectrum(vec![0.0; 8])).unwrap();
        assert_eq!(peak.bin, 0);
        assert_eq!(peak.frequency, 0.0);
        assert_eq!(peak.magnitude, 0.0);
    }

    #[test]
    fn test_single_bin_spectrum() {
        let peak = extract_peak(&spectrum(vec![3.0])).unwrap();
        assert_eq!(peak.bin, 0);
        assert_eq!(peak.magnitude, 0.0);
    }

    #[test]
    fn test_empty_spectrum_is_error() {
        assert_eq!(
            extract_peak(&spectrum(Vec::new())),
            Err(ProcessingError::EmptySpectrum)
        );
    }

    #[test]
    fn test_dominant_frequencies_sorted_by_magnitude() {
        let s = spectrum(vec![9.0, 0.1, 0.6, 0.1, 0.2, 0.9, 0.3, 0.0, 0.4]);
        let peaks = find_dominant_frequencies(&s, 10);
        let bins: Vec<usize> = peaks.iter().map(|p| p.bin).collect();
        assert_eq!(bins, vec![5, 2, 8]);
    }

    #[test]
    fn test_dominant_frequencies_truncates() {
        let s = spectrum(vec![0.0, 0.5, 0.0, 0.7, 0.0, 0.2, 0.0]);
        let peaks = find_dominant_frequencies(&s, 2);
        assert_eq!(peaks.len(), 2);
        assert_eq!(peaks[0].bin, 3);
        assert_eq!(peaks[1].bin, 1);
    }

    #[test]
    fn test_dominant_frequency_agrees_with_peak() {
        let s = spectrum(vec![0.0, 0.2, 0.8, 0.1, 0.3, 0.1]);
        let top = find_dominant_frequencies(&s, 1);
        assert_eq!(top[0], extract_peak(&s).unwrap());
    }
}
