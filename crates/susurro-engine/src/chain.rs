//! Per-layer processing chains — the render-side audio graphs.
//!
//! Each layer owns one chain for its whole lifetime. The effect stages are
//! built once and survive play/stop cycles; only the signal source is
//! attached and discarded per play cycle. Stage state is intentionally not
//! reset on source swaps, mirroring how a patched-up signal path keeps
//! running while the input is re-plugged.

use crate::params::{BINAURAL_FILTER_FREQ_MAX, NOISE_FILTER_FREQ_MAX};
use crate::shared::{BinauralShared, NoiseShared};
use crate::source::LoopingBuffer;
use std::sync::Arc;
use susurro_core::Effect;
use susurro_effects::{
    BreathingVolume, LowPassFilter, SafetyCompressor, StereoPanner, position_to_cutoff,
};
use susurro_synth::BinauralPair;

/// Noise layer graph:
/// `source → panner → low-pass → compressor → breathing volume`.
#[derive(Debug)]
pub struct NoiseChain {
    shared: Arc<NoiseShared>,
    source: Option<LoopingBuffer>,
    panner: StereoPanner,
    filter: LowPassFilter,
    compressor: SafetyCompressor,
    volume: BreathingVolume,
}

impl NoiseChain {
    /// Build the chain with stages initialized from the shared cells.
    pub fn new(sample_rate: f32, shared: Arc<NoiseShared>) -> Self {
        let mut filter = LowPassFilter::new(sample_rate);
        filter.set_cutoff_hz(position_to_cutoff(
            shared.filter_position.load(),
            NOISE_FILTER_FREQ_MAX,
        ));
        let mut panner = StereoPanner::new(sample_rate);
        panner.set_pan(shared.pan.load());
        let volume = BreathingVolume::new(sample_rate, shared.volume.load());

        Self {
            shared,
            source: None,
            panner,
            filter,
            compressor: SafetyCompressor::new(sample_rate),
            volume,
        }
    }

    /// Attach a freshly generated source, replacing any current one.
    ///
    /// Replacement is the stop-then-attach sequencing in one step: the old
    /// source is dropped before the first sample of the new one is read,
    /// so exactly one source ever feeds the chain.
    pub fn attach(&mut self, source: LoopingBuffer) {
        self.source = Some(source);
    }

    /// Detach and drop the current source, if any. Idempotent.
    pub fn detach(&mut self) {
        self.source = None;
    }

    /// Whether a source is currently attached.
    pub fn is_active(&self) -> bool {
        self.source.is_some()
    }

    /// Pull the shared parameter cells into the stages. Called once per
    /// render block.
    fn sync_params(&mut self) {
        self.panner.set_pan(self.shared.pan.load());
        self.filter.set_cutoff_hz(position_to_cutoff(
            self.shared.filter_position.load(),
            NOISE_FILTER_FREQ_MAX,
        ));
        self.volume.set_volume(self.shared.volume.load());
        self.volume.set_breathe(self.shared.breathe());
    }

    /// Render one block into the provided buffers.
    ///
    /// Returns `false` without touching the buffers when no source is
    /// attached.
    pub fn render(&mut self, left: &mut [f32], right: &mut [f32]) -> bool {
        if self.source.is_none() {
            return false;
        }
        self.sync_params();

        let Some(source) = self.source.as_mut() else {
            return false;
        };
        for (l, r) in left.iter_mut().zip(right.iter_mut()) {
            (*l, *r) = source.next_frame();
        }
        self.panner.process_block_stereo(left, right);
        self.filter.process_block_stereo(left, right);
        self.compressor.process_block_stereo(left, right);
        self.volume.process_block_stereo(left, right);
        true
    }
}

/// Binaural layer graph: `oscillator pair → low-pass → volume`.
///
/// The pair is hard-panned by construction, so there is no panner; the
/// compressor and breathe stages are noise-chain additions that tones do
/// not need.
#[derive(Debug)]
pub struct BinauralChain {
    shared: Arc<BinauralShared>,
    pair: Option<BinauralPair>,
    filter: LowPassFilter,
    volume: BreathingVolume,
}

impl BinauralChain {
    /// Build the chain with stages initialized from the shared cells.
    pub fn new(sample_rate: f32, shared: Arc<BinauralShared>) -> Self {
        let mut filter = LowPassFilter::new(sample_rate);
        filter.set_cutoff_hz(position_to_cutoff(
            shared.filter_position.load(),
            BINAURAL_FILTER_FREQ_MAX,
        ));
        let volume = BreathingVolume::new(sample_rate, shared.volume.load());

        Self {
            shared,
            pair: None,
            filter,
            volume,
        }
    }

    /// Attach a fully-formed oscillator pair, replacing any current one.
    pub fn attach(&mut self, pair: BinauralPair) {
        self.pair = Some(pair);
    }

    /// Detach and drop the current pair, if any. Idempotent.
    pub fn detach(&mut self) {
        self.pair = None;
    }

    /// Whether an oscillator pair is currently attached.
    pub fn is_active(&self) -> bool {
        self.pair.is_some()
    }

    /// Pull the shared cells into the stages and live-retune the
    /// oscillators. Called once per render block.
    fn sync_params(&mut self) {
        self.filter.set_cutoff_hz(position_to_cutoff(
            self.shared.filter_position.load(),
            BINAURAL_FILTER_FREQ_MAX,
        ));
        self.volume.set_volume(self.shared.volume.load());

        if let Some(pair) = self.pair.as_mut() {
            let carrier = self.shared.carrier_hz.load();
            let beat = self.shared.beat_hz.load();
            let waveform = self.shared.waveform();
            if pair.carrier_hz() != carrier {
                pair.set_carrier_hz(carrier);
            }
            if pair.beat_hz() != beat {
                pair.set_beat_hz(beat);
            }
            if pair.waveform() != waveform {
                pair.set_waveform(waveform);
            }
        }
    }

    /// Render one block into the provided buffers.
    ///
    /// Returns `false` without touching the buffers when no pair is
    /// attached.
    pub fn render(&mut self, left: &mut [f32], right: &mut [f32]) -> bool {
        self.sync_params();

        let Some(pair) = self.pair.as_mut() else {
            return false;
        };

        for (l, r) in left.iter_mut().zip(right.iter_mut()) {
            (*l, *r) = pair.advance();
        }
        self.filter.process_block_stereo(left, right);
        self.volume.process_block_stereo(left, right);
        true
    }
}
