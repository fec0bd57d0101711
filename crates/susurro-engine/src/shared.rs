//! Lock-free parameter cells shared between control and render threads.
//!
//! Scalar parameters are stored as f32 bit patterns in `AtomicU32`. The
//! control thread stores with `Release`, the render thread loads with
//! `Acquire` once per block — no locks anywhere near the audio path.

use crate::params::{BinauralParams, NoiseParams};
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use susurro_synth::Waveform;

/// An `f32` readable and writable from different threads without locks.
#[derive(Debug)]
pub struct AtomicF32(AtomicU32);

impl AtomicF32 {
    /// Create a cell holding `value`.
    pub fn new(value: f32) -> Self {
        Self(AtomicU32::new(value.to_bits()))
    }

    /// Store a new value (control thread).
    #[inline]
    pub fn store(&self, value: f32) {
        self.0.store(value.to_bits(), Ordering::Release);
    }

    /// Load the current value (render thread).
    #[inline]
    pub fn load(&self) -> f32 {
        f32::from_bits(self.0.load(Ordering::Acquire))
    }
}

/// Shared scalar parameters of a noise chain.
///
/// The slope is deliberately absent: slope edits regenerate the source
/// buffer and travel as an attach command instead.
#[derive(Debug)]
pub struct NoiseShared {
    /// Volume scalar.
    pub volume: AtomicF32,
    /// Pan position in [-1, 1].
    pub pan: AtomicF32,
    /// Filter position in [0, 1].
    pub filter_position: AtomicF32,
    /// Breathe swell enabled.
    pub breathe: AtomicBool,
}

impl NoiseShared {
    /// Create cells initialized from `params`.
    pub fn new(params: &NoiseParams) -> Self {
        Self {
            volume: AtomicF32::new(params.volume),
            pan: AtomicF32::new(params.pan),
            filter_position: AtomicF32::new(params.filter_position),
            breathe: AtomicBool::new(params.breathe),
        }
    }

    /// Store the breathe flag.
    #[inline]
    pub fn set_breathe(&self, enabled: bool) {
        self.breathe.store(enabled, Ordering::Release);
    }

    /// Load the breathe flag.
    #[inline]
    pub fn breathe(&self) -> bool {
        self.breathe.load(Ordering::Acquire)
    }
}

/// Shared scalar parameters of a binaural chain.
///
/// Carrier, beat, and waveform are here because the oscillators update
/// live: the render side retunes them in place each block, with no source
/// replacement.
#[derive(Debug)]
pub struct BinauralShared {
    /// Volume scalar.
    pub volume: AtomicF32,
    /// Filter position in [0, 1].
    pub filter_position: AtomicF32,
    /// Carrier frequency in Hz.
    pub carrier_hz: AtomicF32,
    /// Beat frequency in Hz.
    pub beat_hz: AtomicF32,
    /// Waveform as a stable index (see [`Waveform::to_index`]).
    pub waveform: AtomicU32,
}

impl BinauralShared {
    /// Create cells initialized from `params`.
    pub fn new(params: &BinauralParams) -> Self {
        Self {
            volume: AtomicF32::new(params.volume),
            filter_position: AtomicF32::new(params.filter_position),
            carrier_hz: AtomicF32::new(params.carrier_hz),
            beat_hz: AtomicF32::new(params.beat_hz),
            waveform: AtomicU32::new(params.waveform.to_index()),
        }
    }

    /// Store the waveform.
    #[inline]
    pub fn set_waveform(&self, waveform: Waveform) {
        self.waveform.store(waveform.to_index(), Ordering::Release);
    }

    /// Load the waveform.
    #[inline]
    pub fn waveform(&self) -> Waveform {
        Waveform::from_index(self.waveform.load(Ordering::Acquire))
    }
}
