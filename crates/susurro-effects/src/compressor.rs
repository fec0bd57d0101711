//! Fixed-configuration safety compressor.
//!
//! The noise synthesizer peak-normalizes its buffers, but the width
//! transform and pan fold-in can still push transient peaks close to full
//! scale. This stage is a soft-knee limiter bolted to the end of the noise
//! chain: threshold -24 dB, knee 12 dB, ratio 4:1, attack 5 ms, release
//! 100 ms. It is not user-adjustable.

use susurro_core::{Effect, EnvelopeFollower, db_to_linear, linear_to_db};

const THRESHOLD_DB: f32 = -24.0;
const KNEE_DB: f32 = 12.0;
const RATIO: f32 = 4.0;
const ATTACK_MS: f32 = 5.0;
const RELEASE_MS: f32 = 100.0;

/// Soft-knee compressor with linked stereo detection.
///
/// The envelope is derived from the mid signal `(L + R) / 2` and the same
/// gain reduction is applied to both channels, so compression never shifts
/// the stereo image.
///
/// # Example
///
/// ```rust
/// use susurro_effects::SafetyCompressor;
/// use susurro_core::Effect;
///
/// let mut comp = SafetyCompressor::new(48000.0);
/// let (l, r) = comp.process_stereo(0.8, 0.8);
/// ```
#[derive(Debug, Clone)]
pub struct SafetyCompressor {
    envelope_follower: EnvelopeFollower,
    /// Last computed gain reduction in dB (always non-positive).
    last_gain_reduction_db: f32,
}

impl SafetyCompressor {
    /// Create a compressor with the fixed safety configuration.
    pub fn new(sample_rate: f32) -> Self {
        Self {
            envelope_follower: EnvelopeFollower::with_times(sample_rate, ATTACK_MS, RELEASE_MS),
            last_gain_reduction_db: 0.0,
        }
    }

    /// Returns the last computed gain reduction in dB (non-positive).
    ///
    /// 0.0 means no compression is occurring; -6.0 means the signal is
    /// being pulled down by 6 dB.
    pub fn gain_reduction_db(&self) -> f32 {
        self.last_gain_reduction_db
    }

    /// Soft-knee gain computer: dB of reduction for a given envelope level.
    #[inline]
    fn compute_gain_db(envelope_db: f32) -> f32 {
        let overshoot = envelope_db - THRESHOLD_DB;
        let half_knee = KNEE_DB / 2.0;
        let inv_ratio_complement = 1.0 - 1.0 / RATIO;

        if overshoot <= -half_knee {
            0.0
        } else if overshoot > half_knee {
            -(overshoot * inv_ratio_complement)
        } else {
            let knee_factor = (overshoot + half_knee) / KNEE_DB;
            -(knee_factor * knee_factor * overshoot * inv_ratio_complement)
        }
    }
}

impl Effect for SafetyCompressor {
    #[inline]
    fn process_stereo(&mut self, left: f32, right: f32) -> (f32, f32) {
        // Linked stereo: detect on the mid signal, apply identical gain
        let mid = (left + right) * 0.5;
        let envelope = self.envelope_follower.process(mid);
        let envelope_db = linear_to_db(envelope);
        let gain_reduction_db = Self::compute_gain_db(envelope_db);
        self.last_gain_reduction_db = gain_reduction_db;
        let gain = db_to_linear(gain_reduction_db);

        (left * gain, right * gain)
    }

    fn set_sample_rate(&mut self, sample_rate: f32) {
        self.envelope_follower.set_sample_rate(sample_rate);
    }

    fn reset(&mut self) {
        self.envelope_follower.reset();
        self.last_gain_reduction_db = 0.0;
    }
}
