//! Core Effect trait for stereo processing stages.
//!
//! Every stage in a susurro processing chain (panner, filter, compressor,
//! volume) implements this trait. Unlike mono pedal-style frameworks, the
//! chains here are inherently two-channel — noise sources draw independent
//! left/right channels and binaural pairs are hard-panned by construction —
//! so the trait is stereo-first.
//!
//! ## Design Decisions
//!
//! - **Object-safe**: chains store stages as plain struct fields, but the
//!   trait stays object-safe so `dyn Effect` remains possible.
//!
//! - **In-place blocks**: block processing mutates the buffers directly.
//!   The render path works on per-layer scratch buffers that are mixed into
//!   the device buffer afterwards, so there is no separate output slice.
//!
//! - **No allocations**: all methods are called from the real-time audio
//!   callback and must not touch the heap.

/// A stereo audio processing stage.
///
/// Stages process sample pairs, either one frame at a time or in blocks.
///
/// # Example
///
/// ```rust
/// use susurro_core::Effect;
///
/// struct Gain {
///     gain: f32,
/// }
///
/// impl Effect for Gain {
///     fn process_stereo(&mut self, left: f32, right: f32) -> (f32, f32) {
///         (left * self.gain, right * self.gain)
///     }
///
///     fn set_sample_rate(&mut self, _sample_rate: f32) {}
///
///     fn reset(&mut self) {}
/// }
/// ```
pub trait Effect {
    /// Process a single stereo frame.
    ///
    /// For stages with internal state (filters, envelopes, LFOs), this
    /// advances the state by one sample.
    fn process_stereo(&mut self, left: f32, right: f32) -> (f32, f32);

    /// Process a block of stereo samples in-place.
    ///
    /// Default implementation calls [`process_stereo`](Self::process_stereo)
    /// per frame. Stages may override this to hoist per-block work out of
    /// the loop.
    ///
    /// # Panics
    /// Default implementation debug-asserts `left.len() == right.len()`.
    fn process_block_stereo(&mut self, left: &mut [f32], right: &mut [f32]) {
        debug_assert_eq!(
            left.len(),
            right.len(),
            "Left and right buffers must have same length"
        );
        for (l, r) in left.iter_mut().zip(right.iter_mut()) {
            (*l, *r) = self.process_stereo(*l, *r);
        }
    }

    /// Update the sample rate.
    ///
    /// Called when the output device rate is known or changes. Stages
    /// recalculate sample-rate-dependent coefficients here (filter
    /// coefficients, smoothing constants, LFO increments).
    fn set_sample_rate(&mut self, sample_rate: f32);

    /// Reset internal state.
    ///
    /// Clears delay lines, envelopes, and LFO phase without changing
    /// parameters. Called when a new source is attached so stale state
    /// from the previous play cycle cannot bleed into the next.
    fn reset(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Gain(f32);

    impl Effect for Gain {
        fn process_stereo(&mut self, left: f32, right: f32) -> (f32, f32) {
            (left * self.0, right * self.0)
        }
        fn set_sample_rate(&mut self, _: f32) {}
        fn reset(&mut self) {}
    }

    #[test]
    fn test_process_stereo() {
        let mut gain = Gain(2.0);
        assert_eq!(gain.process_stereo(1.0, 0.5), (2.0, 1.0));
    }

    #[test]
    fn test_block_default_matches_per_frame() {
        let mut gain = Gain(0.5);
        let mut left = [1.0, 2.0, 3.0];
        let mut right = [4.0, 5.0, 6.0];
        gain.process_block_stereo(&mut left, &mut right);
        assert_eq!(left, [0.5, 1.0, 1.5]);
        assert_eq!(right, [2.0, 2.5, 3.0]);
    }
}
