//! Control-side sound engines — one per layer.
//!
//! An engine holds a layer's current parameters, its idle/playing state,
//! and the two paths by which changes reach the render thread: atomic
//! cells for cheap scalar updates, and attach/detach commands for source
//! replacement.

use crate::mixer::RenderCommand;
use crate::params::{
    BEAT_HZ_RANGE, BinauralParams, CARRIER_HZ_RANGE, NOISE_BUFFER_SECONDS, NoiseParams,
};
use crate::registry::LayerId;
use crate::shared::{BinauralShared, NoiseShared};
use crate::source::LoopingBuffer;
use std::sync::Arc;
use std::sync::mpsc::Sender;
use susurro_synth::{BinauralPair, NoiseBuffer, SLOPE_MAX, SLOPE_MIN, Waveform};
use tracing::debug;

/// Playback state of a single engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// No source attached; the chain exists but renders nothing.
    Idle,
    /// A source is attached and the chain is rendering.
    Playing,
}

/// Errors surfaced by engine operations.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The render side (and with it the output device) is gone. Play
    /// calls keep failing until the device is reopened and the layers
    /// recreated.
    #[error("render side detached; audio output unavailable")]
    DeviceDetached,

    /// The registry was asked to update a layer it does not hold.
    #[error("no layer with id {0}")]
    UnknownLayer(u64),
}

/// Control-side engine of a noise layer.
#[derive(Debug)]
pub struct NoiseEngine {
    id: LayerId,
    params: NoiseParams,
    shared: Arc<NoiseShared>,
    tx: Sender<RenderCommand>,
    state: EngineState,
    muted: bool,
    sample_rate: f32,
}

impl NoiseEngine {
    pub(crate) fn new(
        id: LayerId,
        sample_rate: f32,
        params: NoiseParams,
        shared: Arc<NoiseShared>,
        tx: Sender<RenderCommand>,
    ) -> Self {
        Self {
            id,
            params,
            shared,
            tx,
            state: EngineState::Idle,
            muted: false,
            sample_rate,
        }
    }

    /// Current parameters.
    pub fn params(&self) -> NoiseParams {
        self.params
    }

    /// Current playback state.
    pub fn state(&self) -> EngineState {
        self.state
    }

    /// Whether the layer is muted.
    pub fn muted(&self) -> bool {
        self.muted
    }

    /// Generate a fresh buffer at the current slope and attach it.
    ///
    /// Generation happens here, on the control thread; the render side
    /// receives the finished source and swaps it in at the next block,
    /// dropping any previous source first.
    pub fn play(&mut self) -> Result<(), EngineError> {
        let len = (self.sample_rate * NOISE_BUFFER_SECONDS) as usize;
        let buffer = NoiseBuffer::generate(self.params.slope, len);
        debug!(
            layer = self.id.0,
            slope = self.params.slope,
            frames = len,
            "generated noise source"
        );
        self.tx
            .send(RenderCommand::AttachNoise(self.id, LoopingBuffer::new(buffer)))
            .map_err(|_| EngineError::DeviceDetached)?;
        self.state = EngineState::Playing;
        Ok(())
    }

    /// Detach the source. Idempotent: stopping an idle engine is a no-op.
    pub fn stop(&mut self) {
        if self.state == EngineState::Idle {
            return;
        }
        // Best-effort: a dead render side has already dropped the source.
        let _ = self.tx.send(RenderCommand::Detach(self.id));
        self.state = EngineState::Idle;
    }

    /// Mute or unmute without forgetting parameters.
    ///
    /// Muting stops the source; unmuting resumes only while the registry
    /// is globally playing.
    pub fn set_muted(&mut self, muted: bool, global_playing: bool) -> Result<(), EngineError> {
        self.muted = muted;
        if muted {
            self.stop();
        } else if global_playing {
            self.play()?;
        }
        Ok(())
    }

    /// Set the volume scalar. Applied live through the shared cell.
    pub fn apply_volume(&mut self, volume: f32) {
        self.params.volume = volume.max(0.0);
        self.shared.volume.store(self.params.volume);
    }

    /// Set the pan position. Applied live through the shared cell.
    pub fn apply_pan(&mut self, pan: f32) {
        self.params.pan = pan.clamp(-1.0, 1.0);
        self.shared.pan.store(self.params.pan);
    }

    /// Set the filter position. Applied live through the shared cell.
    pub fn apply_filter(&mut self, position: f32) {
        self.params.filter_position = position.clamp(0.0, 1.0);
        self.shared.filter_position.store(self.params.filter_position);
    }

    /// Toggle the breathing swell. Applied live through the shared cell.
    pub fn apply_breathe(&mut self, enabled: bool) {
        self.params.breathe = enabled;
        self.shared.set_breathe(enabled);
    }

    /// Set the spectral slope.
    ///
    /// Slope changes cannot be applied to a live source: the buffer is
    /// regenerated and swapped, which restarts playback audibly. The swap
    /// happens only while playing and unmuted; otherwise the new slope is
    /// stored and sounds on the next play.
    pub fn apply_slope(&mut self, slope: f32) -> Result<(), EngineError> {
        self.params.slope = slope.clamp(SLOPE_MIN, SLOPE_MAX);
        if self.state == EngineState::Playing && !self.muted {
            self.play()?;
        }
        Ok(())
    }
}

/// Control-side engine of a binaural layer.
#[derive(Debug)]
pub struct BinauralEngine {
    id: LayerId,
    params: BinauralParams,
    shared: Arc<BinauralShared>,
    tx: Sender<RenderCommand>,
    state: EngineState,
    muted: bool,
    sample_rate: f32,
}

impl BinauralEngine {
    pub(crate) fn new(
        id: LayerId,
        sample_rate: f32,
        params: BinauralParams,
        shared: Arc<BinauralShared>,
        tx: Sender<RenderCommand>,
    ) -> Self {
        Self {
            id,
            params,
            shared,
            tx,
            state: EngineState::Idle,
            muted: false,
            sample_rate,
        }
    }

    /// Current parameters.
    pub fn params(&self) -> BinauralParams {
        self.params
    }

    /// Current playback state.
    pub fn state(&self) -> EngineState {
        self.state
    }

    /// Whether the layer is muted.
    pub fn muted(&self) -> bool {
        self.muted
    }

    /// Build a tuned oscillator pair and attach it.
    pub fn play(&mut self) -> Result<(), EngineError> {
        let pair = BinauralPair::new(
            self.sample_rate,
            self.params.carrier_hz,
            self.params.beat_hz,
            self.params.waveform,
        );
        debug!(
            layer = self.id.0,
            carrier = self.params.carrier_hz,
            beat = self.params.beat_hz,
            "attached oscillator pair"
        );
        self.tx
            .send(RenderCommand::AttachBinaural(self.id, Box::new(pair)))
            .map_err(|_| EngineError::DeviceDetached)?;
        self.state = EngineState::Playing;
        Ok(())
    }

    /// Detach the pair. Idempotent.
    pub fn stop(&mut self) {
        if self.state == EngineState::Idle {
            return;
        }
        let _ = self.tx.send(RenderCommand::Detach(self.id));
        self.state = EngineState::Idle;
    }

    /// Mute or unmute without forgetting parameters.
    pub fn set_muted(&mut self, muted: bool, global_playing: bool) -> Result<(), EngineError> {
        self.muted = muted;
        if muted {
            self.stop();
        } else if global_playing {
            self.play()?;
        }
        Ok(())
    }

    /// Set the volume scalar. Applied live through the shared cell.
    pub fn apply_volume(&mut self, volume: f32) {
        self.params.volume = volume.max(0.0);
        self.shared.volume.store(self.params.volume);
    }

    /// Set the filter position. Applied live through the shared cell.
    pub fn apply_filter(&mut self, position: f32) {
        self.params.filter_position = position.clamp(0.0, 1.0);
        self.shared.filter_position.store(self.params.filter_position);
    }

    /// Retune the carrier. The live oscillators follow without a restart.
    pub fn apply_carrier_frequency(&mut self, hz: f32) {
        self.params.carrier_hz = hz.clamp(CARRIER_HZ_RANGE.0, CARRIER_HZ_RANGE.1);
        self.shared.carrier_hz.store(self.params.carrier_hz);
    }

    /// Change the beat frequency. Only the right oscillator moves.
    pub fn apply_beat_frequency(&mut self, hz: f32) {
        self.params.beat_hz = hz.clamp(BEAT_HZ_RANGE.0, BEAT_HZ_RANGE.1);
        self.shared.beat_hz.store(self.params.beat_hz);
    }

    /// Switch the waveform of both live oscillators.
    pub fn apply_waveform(&mut self, waveform: Waveform) {
        self.params.waveform = waveform;
        self.shared.set_waveform(waveform);
    }
}
