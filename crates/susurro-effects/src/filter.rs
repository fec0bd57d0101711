//! Low-pass filter stage with exponential position mapping.
//!
//! The UI exposes the cutoff as a position in [0, 1]; the mapping to Hz is
//! exponential so the slider feels perceptually even across the range.

use libm::powf;
use susurro_core::{Biquad, Effect, SmoothedParam, lowpass_coefficients};

/// Lowest reachable cutoff frequency, at position 0.
pub const FILTER_FREQ_MIN: f32 = 200.0;

/// Butterworth response.
const FILTER_Q: f32 = 0.707;

/// Map a normalized filter position to a cutoff frequency in Hz.
///
/// `cutoff = FREQ_MIN * (freq_max / FREQ_MIN)^position`, so position 0 is
/// exactly [`FILTER_FREQ_MIN`] and position 1 is exactly `freq_max`, with
/// equal slider travel per octave in between. Out-of-range positions are
/// clamped.
///
/// # Example
///
/// ```rust
/// use susurro_effects::position_to_cutoff;
///
/// assert_eq!(position_to_cutoff(0.0, 15000.0), 200.0);
/// assert_eq!(position_to_cutoff(1.0, 15000.0), 15000.0);
/// ```
pub fn position_to_cutoff(position: f32, freq_max: f32) -> f32 {
    let position = position.clamp(0.0, 1.0);
    FILTER_FREQ_MIN * powf(freq_max / FILTER_FREQ_MIN, position)
}

/// Stereo low-pass filter stage.
///
/// One biquad per channel sharing the same coefficients. Cutoff changes
/// are smoothed and coefficients recomputed while the smoothing is in
/// flight, so sweeps are continuous with no source restart.
///
/// # Example
///
/// ```rust
/// use susurro_effects::{LowPassFilter, position_to_cutoff};
/// use susurro_core::Effect;
///
/// let mut filter = LowPassFilter::new(48000.0);
/// filter.set_cutoff_hz(position_to_cutoff(0.5, 15000.0));
/// let (l, r) = filter.process_stereo(0.5, 0.5);
/// ```
#[derive(Debug, Clone)]
pub struct LowPassFilter {
    biquad_l: Biquad,
    biquad_r: Biquad,
    cutoff: SmoothedParam,
    sample_rate: f32,
    needs_update: bool,
}

impl LowPassFilter {
    /// Create a filter that starts fully open (cutoff at ~Nyquist/2).
    pub fn new(sample_rate: f32) -> Self {
        let mut filter = Self {
            biquad_l: Biquad::new(),
            biquad_r: Biquad::new(),
            cutoff: SmoothedParam::slow(15000.0, sample_rate),
            sample_rate,
            needs_update: true,
        };
        filter.update_coefficients();
        filter
    }

    /// Set cutoff frequency in Hz, clamped below Nyquist.
    pub fn set_cutoff_hz(&mut self, cutoff: f32) {
        let clamped = cutoff.clamp(20.0, self.sample_rate * 0.49);
        self.cutoff.set_target(clamped);
        self.needs_update = true;
    }

    /// Current cutoff target in Hz.
    pub fn cutoff_hz(&self) -> f32 {
        self.cutoff.target()
    }

    fn update_coefficients(&mut self) {
        let (b0, b1, b2, a0, a1, a2) =
            lowpass_coefficients(self.cutoff.get(), FILTER_Q, self.sample_rate);
        self.biquad_l.set_coefficients(b0, b1, b2, a0, a1, a2);
        self.biquad_r.set_coefficients(b0, b1, b2, a0, a1, a2);
        self.needs_update = false;
    }
}

impl Effect for LowPassFilter {
    #[inline]
    fn process_stereo(&mut self, left: f32, right: f32) -> (f32, f32) {
        self.cutoff.advance();
        if self.needs_update || !self.cutoff.is_settled() {
            self.update_coefficients();
        }
        (self.biquad_l.process(left), self.biquad_r.process(right))
    }

    fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.cutoff.set_sample_rate(sample_rate);
        self.needs_update = true;
        self.update_coefficients();
    }

    fn reset(&mut self) {
        self.biquad_l.clear();
        self.biquad_r.clear();
        self.cutoff.snap_to_target();
        self.needs_update = true;
        self.update_coefficients();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::f32::consts::PI;

    #[test]
    fn test_position_mapping_endpoints_exact() {
        assert_eq!(position_to_cutoff(0.0, 15000.0), 200.0);
        assert_eq!(position_to_cutoff(1.0, 15000.0), 15000.0);
        assert_eq!(position_to_cutoff(0.0, 5000.0), 200.0);
        assert_eq!(position_to_cutoff(1.0, 5000.0), 5000.0);
    }

    #[test]
    fn test_position_mapping_strictly_increasing() {
        let mut prev = 0.0;
        for i in 0..=100 {
            let cutoff = position_to_cutoff(i as f32 / 100.0, 15000.0);
            assert!(cutoff > prev, "mapping must be strictly increasing");
            prev = cutoff;
        }
    }

    #[test]
    fn test_position_mapping_exponential_midpoint() {
        // Halfway in position = geometric mean in frequency
        let mid = position_to_cutoff(0.5, 15000.0);
        let expected = (200.0f32 * 15000.0).sqrt();
        assert!((mid - expected).abs() / expected < 0.001, "got {}", mid);
    }

    #[test]
    fn test_position_clamped() {
        assert_eq!(position_to_cutoff(-1.0, 15000.0), 200.0);
        assert_eq!(position_to_cutoff(2.0, 15000.0), 15000.0);
    }

    #[test]
    fn test_dc_passes() {
        let mut filter = LowPassFilter::new(48000.0);
        filter.set_cutoff_hz(1000.0);
        filter.reset();

        let mut out = (0.0, 0.0);
        for _ in 0..2000 {
            out = filter.process_stereo(1.0, 1.0);
        }
        assert!((out.0 - 1.0).abs() < 0.05, "DC should pass, got {}", out.0);
        assert!((out.1 - 1.0).abs() < 0.05);
    }

    #[test]
    fn test_high_frequency_attenuated() {
        let mut filter = LowPassFilter::new(48000.0);
        filter.set_cutoff_hz(200.0);
        filter.reset();

        let mut sum = 0.0;
        for i in 0..4800 {
            let t = i as f32 / 48000.0;
            let input = libm::sinf(2.0 * PI * 10000.0 * t);
            let (l, _) = filter.process_stereo(input, input);
            sum += l.abs();
        }
        let avg = sum / 4800.0;
        assert!(avg < 0.05, "10 kHz should be attenuated at 200 Hz cutoff, avg {}", avg);
    }

    #[test]
    fn test_channels_filtered_independently() {
        let mut filter = LowPassFilter::new(48000.0);
        filter.set_cutoff_hz(500.0);
        filter.reset();

        // Drive only the left channel; the right must stay silent.
        for i in 0..1000 {
            let t = i as f32 / 48000.0;
            let (_, r) = filter.process_stereo(libm::sinf(2.0 * PI * 100.0 * t), 0.0);
            assert_eq!(r, 0.0, "right channel leaked");
        }
    }
}
