//! Volume stage with optional breathing modulation.
//!
//! The final gain of every chain. When breathing is enabled, a slow sine
//! LFO adds a gentle swell on top of the set volume — additive, not
//! multiplicative, matching the patch-cord wiring of an LFO into a gain
//! control input: `gain = volume + depth * lfo`.

use susurro_core::{Effect, Lfo, SmoothedParam};

/// Breathe LFO rate: one cycle per ten seconds.
pub const BREATHE_RATE_HZ: f32 = 0.1;

/// Breathe modulation depth when enabled.
pub const BREATHE_DEPTH: f32 = 0.05;

/// Volume gain stage with a breathe LFO on its control input.
///
/// # Example
///
/// ```rust
/// use susurro_effects::BreathingVolume;
/// use susurro_core::Effect;
///
/// let mut volume = BreathingVolume::new(48000.0, 0.25);
/// volume.set_breathe(true);
/// let (l, r) = volume.process_stereo(0.5, 0.5);
/// ```
#[derive(Debug, Clone)]
pub struct BreathingVolume {
    volume: SmoothedParam,
    depth: SmoothedParam,
    lfo: Lfo,
    breathing: bool,
}

impl BreathingVolume {
    /// Create a volume stage at the given initial level, breathing off.
    pub fn new(sample_rate: f32, initial_volume: f32) -> Self {
        Self {
            volume: SmoothedParam::standard(initial_volume.max(0.0), sample_rate),
            depth: SmoothedParam::standard(0.0, sample_rate),
            lfo: Lfo::new(sample_rate, BREATHE_RATE_HZ),
            breathing: false,
        }
    }

    /// Set the volume scalar. Negative values are clamped to silence.
    pub fn set_volume(&mut self, volume: f32) {
        self.volume.set_target(volume.max(0.0));
    }

    /// Current volume target.
    pub fn volume(&self) -> f32 {
        self.volume.target()
    }

    /// Enable or disable the breathing swell.
    ///
    /// The depth ramps between 0 and [`BREATHE_DEPTH`] through the usual
    /// parameter smoothing, so toggling mid-playback is click-free.
    pub fn set_breathe(&mut self, enabled: bool) {
        self.breathing = enabled;
        self.depth.set_target(if enabled { BREATHE_DEPTH } else { 0.0 });
    }

    /// Whether breathing is currently enabled.
    pub fn breathing(&self) -> bool {
        self.breathing
    }
}

impl Effect for BreathingVolume {
    #[inline]
    fn process_stereo(&mut self, left: f32, right: f32) -> (f32, f32) {
        let gain = self.volume.advance() + self.depth.advance() * self.lfo.next();
        (left * gain, right * gain)
    }

    fn set_sample_rate(&mut self, sample_rate: f32) {
        self.volume.set_sample_rate(sample_rate);
        self.depth.set_sample_rate(sample_rate);
        self.lfo.set_sample_rate(sample_rate);
    }

    fn reset(&mut self) {
        self.volume.snap_to_target();
        self.depth.snap_to_target();
        self.lfo.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_applies_volume() {
        let mut volume = BreathingVolume::new(48000.0, 0.25);
        volume.reset();
        let (l, r) = volume.process_stereo(1.0, -1.0);
        assert!((l - 0.25).abs() < 1e-3);
        assert!((r + 0.25).abs() < 1e-3);
    }

    #[test]
    fn test_breathe_off_is_static_gain() {
        let mut volume = BreathingVolume::new(48000.0, 0.5);
        volume.reset();
        for _ in 0..10000 {
            let (l, _) = volume.process_stereo(1.0, 1.0);
            assert!((l - 0.5).abs() < 1e-3, "gain should be static, got {}", l);
        }
    }

    #[test]
    fn test_breathe_on_swells_around_volume() {
        let mut volume = BreathingVolume::new(48000.0, 0.25);
        volume.set_breathe(true);
        volume.reset();

        // One full breathe cycle at 0.1 Hz = 10 s = 480000 samples
        let mut min = f32::MAX;
        let mut max = f32::MIN;
        for _ in 0..480000 {
            let (l, _) = volume.process_stereo(1.0, 1.0);
            min = min.min(l);
            max = max.max(l);
        }

        // Additive swell: volume +/- depth
        assert!((max - 0.30).abs() < 0.01, "peak should reach volume + depth, got {}", max);
        assert!((min - 0.20).abs() < 0.01, "trough should reach volume - depth, got {}", min);
    }

    #[test]
    fn test_breathe_toggle_is_smooth() {
        let mut volume = BreathingVolume::new(48000.0, 0.25);
        volume.reset();
        volume.set_breathe(true);

        let mut prev = 0.25;
        for _ in 0..2000 {
            let (l, _) = volume.process_stereo(1.0, 1.0);
            assert!((l - prev).abs() < 0.001, "toggle should ramp, jumped {} -> {}", prev, l);
            prev = l;
        }
    }

    #[test]
    fn test_negative_volume_clamped() {
        let mut volume = BreathingVolume::new(48000.0, 0.25);
        volume.set_volume(-1.0);
        assert_eq!(volume.volume(), 0.0);
    }
}
