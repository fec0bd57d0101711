//! Low-frequency sine oscillator for slow amplitude modulation.
//!
//! Drives the "breathe" swell of the volume stage: one sine cycle every
//! ten seconds or so, far below audio rate. Uses phase accumulation for
//! alias-free oscillation.

use core::f32::consts::PI;
use libm::sinf;

/// Sine low-frequency oscillator.
///
/// # Example
///
/// ```rust
/// use susurro_core::Lfo;
///
/// let mut lfo = Lfo::new(48000.0, 0.1); // one cycle per 10 seconds
/// let value = lfo.next(); // in [-1.0, 1.0]
/// ```
#[derive(Debug, Clone)]
pub struct Lfo {
    /// Current phase position [0.0, 1.0)
    phase: f32,
    /// Phase increment per sample
    phase_inc: f32,
    /// Sample rate in Hz
    sample_rate: f32,
}

impl Lfo {
    /// Create a new LFO with given sample rate and frequency.
    pub fn new(sample_rate: f32, freq_hz: f32) -> Self {
        Self {
            phase: 0.0,
            phase_inc: freq_hz / sample_rate,
            sample_rate,
        }
    }

    /// Set frequency in Hz.
    pub fn set_frequency(&mut self, freq_hz: f32) {
        self.phase_inc = freq_hz / self.sample_rate;
    }

    /// Get current frequency in Hz.
    pub fn frequency(&self) -> f32 {
        self.phase_inc * self.sample_rate
    }

    /// Reset phase to 0.
    pub fn reset(&mut self) {
        self.phase = 0.0;
    }

    /// Get current phase (0.0 - 1.0).
    pub fn phase(&self) -> f32 {
        self.phase
    }

    /// Get next LFO value (-1.0 to 1.0).
    #[inline]
    pub fn next(&mut self) -> f32 {
        let output = sinf(self.phase * 2.0 * PI);
        self.phase += self.phase_inc;
        if self.phase >= 1.0 {
            self.phase -= 1.0;
        }
        output
    }

    /// Set sample rate, preserving the configured frequency.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        let freq = self.phase_inc * self.sample_rate;
        self.sample_rate = sample_rate;
        self.set_frequency(freq);
    }
}

impl Default for Lfo {
    fn default() -> Self {
        Self::new(48000.0, 1.0)
    }
}
