//! Property-based tests for the chain stages.
//!
//! Every stage must stay finite and bounded for arbitrary in-range input,
//! across its whole parameter range.

use proptest::prelude::*;
use susurro_core::Effect;
use susurro_effects::{
    BreathingVolume, LowPassFilter, SafetyCompressor, StereoPanner, position_to_cutoff,
};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// The panner never produces more total energy than hard-panning both
    /// channels into one ear would.
    #[test]
    fn panner_bounded(
        pan in -1.0f32..=1.0,
        frames in prop::collection::vec((-1.0f32..=1.0, -1.0f32..=1.0), 64..=256),
    ) {
        let mut panner = StereoPanner::new(48000.0);
        panner.set_pan(pan);
        panner.reset();

        for (l, r) in frames {
            let (out_l, out_r) = panner.process_stereo(l, r);
            prop_assert!(out_l.is_finite() && out_r.is_finite());
            prop_assert!(out_l.abs() <= 2.0 + 1e-6);
            prop_assert!(out_r.abs() <= 2.0 + 1e-6);
        }
    }

    /// The filter is stable at every position for both chain ceilings.
    #[test]
    fn filter_stable_across_positions(
        position in 0.0f32..=1.0,
        freq_max in prop::sample::select(vec![5000.0f32, 15000.0]),
        input in prop::array::uniform32(-1.0f32..=1.0f32),
    ) {
        let mut filter = LowPassFilter::new(48000.0);
        filter.set_cutoff_hz(position_to_cutoff(position, freq_max));
        filter.reset();

        for &sample in &input {
            let (l, r) = filter.process_stereo(sample, sample);
            prop_assert!(l.is_finite() && r.is_finite());
            prop_assert_eq!(l, r, "identical inputs must stay identical");
        }
    }

    /// The compressor only ever attenuates: output magnitude never exceeds
    /// input magnitude once the envelope has charged.
    #[test]
    fn compressor_never_amplifies(level in 0.0f32..=1.0) {
        let mut comp = SafetyCompressor::new(48000.0);
        let mut out = (0.0f32, 0.0f32);
        for _ in 0..4800 {
            out = comp.process_stereo(level, level);
        }
        prop_assert!(out.0.abs() <= level + 1e-6, "amplified {} to {}", level, out.0);
        prop_assert!(comp.gain_reduction_db() <= 0.0);
    }

    /// Volume output scales both channels identically and stays finite for
    /// any volume and breathe combination.
    #[test]
    fn volume_scales_uniformly(
        volume in 0.0f32..=1.0,
        breathe in prop::bool::ANY,
        input in -1.0f32..=1.0,
    ) {
        let mut stage = BreathingVolume::new(48000.0, volume);
        stage.set_breathe(breathe);
        stage.reset();

        for _ in 0..512 {
            let (l, r) = stage.process_stereo(input, -input);
            prop_assert!(l.is_finite() && r.is_finite());
            prop_assert!((l + r).abs() < 1e-5, "symmetric input must stay symmetric");
        }
    }
}
