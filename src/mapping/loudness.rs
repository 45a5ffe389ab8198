//! Loudness measurement over a sample window

/// Number of samples read from an emitter each frame
pub const SAMPLE_WINDOW: usize = 256;

/// Root-mean-square amplitude of a sample window
///
/// An empty window is silent.
pub fn rms(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum: f32 = samples.iter().map(|s| s * s).sum();
    (sum / samples.len() as f32).sqrt()
}

/// Loudness of a sample window in decibels
///
/// `rms_multiplier` scales the RMS before conversion: the higher it is,
/// the louder a given signal reads. A silent (or non-positive) product
/// yields `-inf` rather than NaN; range mappers clamp it to their floor.
pub fn compute_loudness_decibels(samples: &[f32], rms_multiplier: f32) -> f32 {
    let scaled = rms(samples) * rms_multiplier;
    if scaled > 0.0 {
        20.0 * scaled.log10()
    } else {
        f32::NEG_INFINITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rms_constant_signal() {
        let samples = [0.5_f32; SAMPLE_WINDOW];
        assert!((rms(&samples) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_rms_sign_independent() {
        let samples: Vec<f32> = (0..SAMPLE_WINDOW)
            .map(|i| if i % 2 == 0 { 0.25 } else { -0.25 })
            .collect();
        assert!((rms(&samples) - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_rms_empty() {
        assert_eq!(rms(&[]), 0.0);
    }

    #[test]
    fn test_decibels_full_scale() {
        // 0.02 * 50 = 1.0 -> 0 dB
        let samples = [0.02_f32; SAMPLE_WINDOW];
        let db = compute_loudness_decibels(&samples, 50.0);
        assert!(db.abs() < 1e-3, "expected 0 dB, got {}", db);
    }

    #[test]
    fn test_decibels_tenth() {
        // 0.1 -> -20 dB
        let samples = [0.1_f32; SAMPLE_WINDOW];
        let db = compute_loudness_decibels(&samples, 1.0);
        assert!((db + 20.0).abs() < 1e-2, "expected -20 dB, got {}", db);
    }

    #[test]
    fn test_decibels_silence_is_negative_infinity() {
        let samples = [0.0_f32; SAMPLE_WINDOW];
        let db = compute_loudness_decibels(&samples, 50.0);
        assert_eq!(db, f32::NEG_INFINITY);
        assert!(!db.is_nan());
    }

    #[test]
    fn test_decibels_zero_multiplier() {
        let samples = [0.3_f32; SAMPLE_WINDOW];
        assert_eq!(compute_loudness_decibels(&samples, 0.0), f32::NEG_INFINITY);
        assert_eq!(compute_loudness_decibels(&samples, -5.0), f32::NEG_INFINITY);
    }
}
