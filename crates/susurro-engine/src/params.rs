//! Layer parameters, documented ranges, and compiled defaults.
//!
//! All parameters arrive from UI-driven continuous controls, so out-of-range
//! values are clamped rather than rejected.

use susurro_synth::{SLOPE_MAX, SLOPE_MIN, Waveform};

/// Filter ceiling for noise chains: position 1 opens the filter to 15 kHz.
pub const NOISE_FILTER_FREQ_MAX: f32 = 15000.0;

/// Filter ceiling for binaural chains. Tones live far below noise energy,
/// so the filter tops out at 5 kHz.
pub const BINAURAL_FILTER_FREQ_MAX: f32 = 5000.0;

/// Length of generated noise buffers, in seconds of audio.
pub const NOISE_BUFFER_SECONDS: f32 = 2.0;

/// Carrier frequency range in Hz.
pub const CARRIER_HZ_RANGE: (f32, f32) = (100.0, 500.0);

/// Beat frequency range in Hz.
pub const BEAT_HZ_RANGE: (f32, f32) = (0.1, 40.0);

/// Parameters of a noise layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoiseParams {
    /// Output volume scalar, >= 0.
    pub volume: f32,
    /// Pan position in [-1, 1].
    pub pan: f32,
    /// Spectral slope in [-6, 6]; 0 is white noise.
    pub slope: f32,
    /// Filter position in [0, 1]; 1 is fully open.
    pub filter_position: f32,
    /// Whether the breathing swell is enabled.
    pub breathe: bool,
}

impl Default for NoiseParams {
    fn default() -> Self {
        Self {
            volume: 0.25,
            pan: 0.0,
            slope: 0.0,
            filter_position: 1.0,
            breathe: false,
        }
    }
}

impl NoiseParams {
    /// Clamp every field to its documented range.
    pub fn clamped(self) -> Self {
        Self {
            volume: self.volume.max(0.0),
            pan: self.pan.clamp(-1.0, 1.0),
            slope: self.slope.clamp(SLOPE_MIN, SLOPE_MAX),
            filter_position: self.filter_position.clamp(0.0, 1.0),
            breathe: self.breathe,
        }
    }
}

/// Parameters of a binaural layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BinauralParams {
    /// Output volume scalar, >= 0. Tones default quieter than noise.
    pub volume: f32,
    /// Left-ear carrier frequency in Hz.
    pub carrier_hz: f32,
    /// Beat frequency in Hz; the right ear runs at carrier + beat.
    pub beat_hz: f32,
    /// Waveform of both oscillators.
    pub waveform: Waveform,
    /// Filter position in [0, 1]. The default of 0.5 lands the cutoff at
    /// 1 kHz, softening the tone.
    pub filter_position: f32,
}

impl Default for BinauralParams {
    fn default() -> Self {
        Self {
            volume: 0.15,
            carrier_hz: 200.0,
            beat_hz: 10.0,
            waveform: Waveform::Sine,
            filter_position: 0.5,
        }
    }
}

impl BinauralParams {
    /// Clamp every field to its documented range.
    pub fn clamped(self) -> Self {
        Self {
            volume: self.volume.max(0.0),
            carrier_hz: self.carrier_hz.clamp(CARRIER_HZ_RANGE.0, CARRIER_HZ_RANGE.1),
            beat_hz: self.beat_hz.clamp(BEAT_HZ_RANGE.0, BEAT_HZ_RANGE.1),
            waveform: self.waveform,
            filter_position: self.filter_position.clamp(0.0, 1.0),
        }
    }
}

/// Partial update of a noise layer. `None` fields are left untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoiseUpdate {
    /// New volume, if changing.
    pub volume: Option<f32>,
    /// New pan, if changing.
    pub pan: Option<f32>,
    /// New slope, if changing. Triggers regeneration while playing.
    pub slope: Option<f32>,
    /// New filter position, if changing.
    pub filter_position: Option<f32>,
    /// New breathe state, if changing.
    pub breathe: Option<bool>,
    /// New mute state, if changing.
    pub muted: Option<bool>,
}

/// Partial update of a binaural layer. `None` fields are left untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct BinauralUpdate {
    /// New volume, if changing.
    pub volume: Option<f32>,
    /// New carrier frequency, if changing. Applied to the live oscillators.
    pub carrier_hz: Option<f32>,
    /// New beat frequency, if changing. Applied to the live right oscillator.
    pub beat_hz: Option<f32>,
    /// New waveform, if changing. Applied to both live oscillators.
    pub waveform: Option<Waveform>,
    /// New filter position, if changing.
    pub filter_position: Option<f32>,
    /// New mute state, if changing.
    pub muted: Option<bool>,
}
