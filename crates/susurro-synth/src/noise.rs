//! Spectral noise synthesis.
//!
//! A single slope parameter in [-6, 6] selects the noise color. Negative
//! slopes integrate the white draw toward brown noise, positive slopes
//! differentiate it toward violet, and the magnitude interpolates along
//! each pathway through the intermediate anchor color (pink on the
//! integration side, blue on the differentiation side):
//!
//! ```text
//! slope:  -6 ...... -3 ...... 0 ...... +3 ...... +6
//! color: brown     pink    white     blue     violet
//! ```
//!
//! The piecewise-linear blend across three anchors per pathway gives one
//! continuous knob spanning five recognizable colors with no discontinuity
//! at the pathway boundary (slope 0) or the anchor boundaries (|slope| 3).
//!
//! Randomness is intentionally unseeded: repeated calls produce different
//! sample data with the same distributional properties. Callers (and
//! tests) may only rely on statistics, never exact samples.

use rand::Rng;
use susurro_core::lerp;

/// Minimum slope value; lower inputs are clamped.
pub const SLOPE_MIN: f32 = -6.0;

/// Maximum slope value; higher inputs are clamped.
pub const SLOPE_MAX: f32 = 6.0;

/// Half-width of the dead zone around slope 0 that returns pure white
/// noise, avoiding pathological near-zero filter behavior.
pub const SLOPE_DEAD_ZONE: f32 = 0.1;

/// Default mid/side width factor applied to generated stereo buffers.
/// A width of 2 roughly doubles the perceived channel separation.
pub const DEFAULT_STEREO_WIDTH: f32 = 2.0;

/// Generate one channel of noise with the given spectral slope.
///
/// Returns `len` samples in [-1, 1] with peak |sample| == 1 (the dead-zone
/// white path skips normalization; its peak is statistically 1 but not
/// forced). The buffer is suitable for seamless looping: it carries no
/// envelope, so the playback side treats it as a ring.
///
/// `slope` is clamped to [[`SLOPE_MIN`], [`SLOPE_MAX`]].
pub fn generate_noise(slope: f32, len: usize) -> Vec<f32> {
    let slope = slope.clamp(SLOPE_MIN, SLOPE_MAX);
    let mut rng = rand::rng();

    let mut white = vec![0.0f32; len];
    for w in &mut white {
        *w = rng.random_range(-1.0f32..=1.0);
    }

    // Dead zone: raw white, no filtering path applied.
    if slope.abs() < SLOPE_DEAD_ZONE {
        return white;
    }

    let mut buffer = if slope < 0.0 {
        blend_integrated(&white, slope.abs() / 6.0)
    } else {
        blend_differentiated(&white, slope / 6.0)
    };

    peak_normalize(&mut buffer);
    buffer
}

/// Integration pathway: blend white -> pink -> brown.
fn blend_integrated(white: &[f32], t: f32) -> Vec<f32> {
    let len = white.len();

    // Brown: leaky random walk, clamped so the accumulator cannot drift
    // outside [-1, 1].
    let mut brown = vec![0.0f32; len];
    let mut acc = 0.0f32;
    for (i, &w) in white.iter().enumerate() {
        acc += w * 0.1;
        acc = acc.clamp(-1.0, 1.0);
        brown[i] = acc;
    }

    // Pink: Paul Kellett's weighted 6-pole recursive filter.
    let mut pink = vec![0.0f32; len];
    let (mut b0, mut b1, mut b2, mut b3, mut b4, mut b5, mut b6) =
        (0.0f32, 0.0f32, 0.0f32, 0.0f32, 0.0f32, 0.0f32, 0.0f32);
    for (i, &w) in white.iter().enumerate() {
        b0 = 0.99886 * b0 + w * 0.0555179;
        b1 = 0.99332 * b1 + w * 0.0750759;
        b2 = 0.969 * b2 + w * 0.153852;
        b3 = 0.8665 * b3 + w * 0.3104856;
        b4 = 0.55 * b4 + w * 0.5329522;
        b5 = -0.7616 * b5 - w * 0.016898;
        pink[i] = (b0 + b1 + b2 + b3 + b4 + b5 + b6 + w * 0.5362) * 0.11;
        b6 = w * 0.115926;
    }

    let mut buffer = vec![0.0f32; len];
    if t <= 0.5 {
        let local = t * 2.0;
        for i in 0..len {
            buffer[i] = lerp(white[i], pink[i], local);
        }
    } else {
        let local = (t - 0.5) * 2.0;
        for i in 0..len {
            buffer[i] = lerp(pink[i], brown[i], local);
        }
    }
    buffer
}

/// Differentiation pathway: blend white -> blue -> violet.
fn blend_differentiated(white: &[f32], t: f32) -> Vec<f32> {
    let len = white.len();

    // Blue: first difference.
    let mut blue = vec![0.0f32; len];
    for i in 1..len {
        blue[i] = white[i] - white[i - 1];
    }

    // Violet: second difference.
    let mut violet = vec![0.0f32; len];
    for i in 1..len {
        violet[i] = blue[i] - blue[i - 1];
    }

    // Differencing roughly doubles the amplitude each time; bring both
    // derived series back to unit peak before blending against white.
    peak_normalize(&mut blue);
    peak_normalize(&mut violet);

    let mut buffer = vec![0.0f32; len];
    if t <= 0.5 {
        let local = t * 2.0;
        for i in 0..len {
            buffer[i] = lerp(white[i], blue[i], local);
        }
    } else {
        let local = (t - 0.5) * 2.0;
        for i in 0..len {
            buffer[i] = lerp(blue[i], violet[i], local);
        }
    }
    buffer
}

/// Divide every sample by the buffer's peak absolute value.
///
/// No-op when the peak is zero (all-silent buffer).
fn peak_normalize(buffer: &mut [f32]) {
    let max = buffer.iter().fold(0.0f32, |m, &s| m.max(s.abs()));
    if max > 0.0 {
        for s in buffer.iter_mut() {
            *s /= max;
        }
    }
}

/// A stereo noise buffer ready for looped playback.
///
/// Left and right channels are drawn independently — correlated-but-distinct
/// noise per ear widens the perceived image — then pushed further apart by
/// a mid/side width transform.
#[derive(Debug, Clone)]
pub struct NoiseBuffer {
    /// Left channel samples, in [-1, 1].
    pub left: Vec<f32>,
    /// Right channel samples, same length as `left`.
    pub right: Vec<f32>,
}

impl NoiseBuffer {
    /// Generate a stereo buffer with the default width factor.
    pub fn generate(slope: f32, len: usize) -> Self {
        Self::generate_with_width(slope, len, DEFAULT_STEREO_WIDTH)
    }

    /// Generate a stereo buffer with an explicit mid/side width factor.
    ///
    /// Each channel is an independent draw of [`generate_noise`]. The width
    /// transform rebalances mid and side content per frame:
    ///
    /// ```text
    /// mid  = (l + r) / 2
    /// side = l - mid
    /// l'   = mid + side * width
    /// r'   = mid - side * width
    /// ```
    ///
    /// Widths above 1 can push samples outside [-1, 1], so the pair is
    /// jointly peak-normalized afterwards — jointly, not per channel, to
    /// preserve the mid/side balance the transform just established.
    pub fn generate_with_width(slope: f32, len: usize, width: f32) -> Self {
        let mut left = generate_noise(slope, len);
        let mut right = generate_noise(slope, len);

        for i in 0..len {
            let mid = (left[i] + right[i]) / 2.0;
            let side = left[i] - mid;
            left[i] = mid + side * width;
            right[i] = mid - side * width;
        }

        let max = left
            .iter()
            .chain(right.iter())
            .fold(0.0f32, |m, &s| m.max(s.abs()));
        if max > 1.0 {
            for s in left.iter_mut().chain(right.iter_mut()) {
                *s /= max;
            }
        }

        Self { left, right }
    }

    /// Number of frames in the buffer.
    pub fn len(&self) -> usize {
        self.left.len()
    }

    /// Whether the buffer holds no frames.
    pub fn is_empty(&self) -> bool {
        self.left.is_empty()
    }
}
