//! Equal-power stereo panner.
//!
//! Implements the stereo-input equal-power pan law: panning left folds the
//! right channel into the left with a cosine gain (and vice versa), so a
//! centered pan passes both channels through untouched and full pan
//! collapses everything into one ear without a level bump in between.

use core::f32::consts::FRAC_PI_2;
use libm::{cosf, sinf};
use susurro_core::{Effect, SmoothedParam};

/// Stereo panner stage.
///
/// Pan position runs from -1 (hard left) through 0 (neutral) to +1 (hard
/// right). Out-of-range positions are clamped. Position changes are
/// smoothed, so sweeping the pan is click-free.
///
/// # Example
///
/// ```rust
/// use susurro_effects::StereoPanner;
/// use susurro_core::Effect;
///
/// let mut panner = StereoPanner::new(48000.0);
/// panner.set_pan(-0.5);
/// let (l, r) = panner.process_stereo(0.3, 0.3);
/// ```
#[derive(Debug, Clone)]
pub struct StereoPanner {
    pan: SmoothedParam,
}

impl StereoPanner {
    /// Create a neutral (centered) panner.
    pub fn new(sample_rate: f32) -> Self {
        Self {
            pan: SmoothedParam::standard(0.0, sample_rate),
        }
    }

    /// Set the pan position in [-1, 1]. Values outside are clamped.
    pub fn set_pan(&mut self, pan: f32) {
        self.pan.set_target(pan.clamp(-1.0, 1.0));
    }

    /// Current pan target.
    pub fn pan(&self) -> f32 {
        self.pan.target()
    }
}

impl Effect for StereoPanner {
    #[inline]
    fn process_stereo(&mut self, left: f32, right: f32) -> (f32, f32) {
        let pan = self.pan.advance();

        // Map pan to an angle in [0, pi/2]; the half that is being
        // attenuated folds into the other channel with equal power.
        if pan <= 0.0 {
            let x = (pan + 1.0) * FRAC_PI_2;
            (left + right * cosf(x), right * sinf(x))
        } else {
            let x = pan * FRAC_PI_2;
            (left * cosf(x), right + left * sinf(x))
        }
    }

    fn set_sample_rate(&mut self, sample_rate: f32) {
        self.pan.set_sample_rate(sample_rate);
    }

    fn reset(&mut self) {
        self.pan.snap_to_target();
    }
}
