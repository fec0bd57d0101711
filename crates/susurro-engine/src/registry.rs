//! Layer registry — the control-side owner of every engine.
//!
//! The registry tracks zero or more layers, applies partial parameter
//! updates through the matching engine, and aggregates play/stop/mute.
//! Dispatch over the layer kind happens once here, at the boundary;
//! everything below works with a concrete engine type.

use crate::engine::{BinauralEngine, EngineError, EngineState, NoiseEngine};
use crate::mixer::{Mixer, RenderCommand};
use crate::params::{BinauralParams, BinauralUpdate, NoiseParams, NoiseUpdate};
use crate::shared::{BinauralShared, NoiseShared};
use std::sync::Arc;
use std::sync::mpsc::{self, Sender};
use tracing::info;

/// Identity of a layer, unique within one registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LayerId(pub u64);

enum LayerEngine {
    Noise(NoiseEngine),
    Binaural(BinauralEngine),
}

struct Layer {
    id: LayerId,
    engine: LayerEngine,
}

/// Control-side registry of sound layers.
///
/// Created together with its [`Mixer`]; the mixer goes to the audio
/// backend (or a test harness), the registry stays with the caller.
///
/// # Example
///
/// ```rust
/// use susurro_engine::{LayerRegistry, NoiseParams};
///
/// let (mut registry, mut mixer) = LayerRegistry::new(48000.0);
/// let id = registry.add_noise_layer(NoiseParams::default());
/// registry.play_all().unwrap();
///
/// let mut left = [0.0f32; 256];
/// let mut right = [0.0f32; 256];
/// mixer.render(&mut left, &mut right);
/// # let _ = id;
/// ```
pub struct LayerRegistry {
    layers: Vec<Layer>,
    tx: Sender<RenderCommand>,
    global_playing: bool,
    sample_rate: f32,
    next_id: u64,
}

impl LayerRegistry {
    /// Create a registry and the mixer it feeds.
    pub fn new(sample_rate: f32) -> (Self, Mixer) {
        let (tx, rx) = mpsc::channel();
        let registry = Self {
            layers: Vec::new(),
            tx,
            global_playing: false,
            sample_rate,
            next_id: 0,
        };
        (registry, Mixer::new(sample_rate, rx))
    }

    /// Number of layers.
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Whether the registry holds no layers.
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Whether the registry is globally playing.
    pub fn global_playing(&self) -> bool {
        self.global_playing
    }

    /// Ids of all layers, in insertion order.
    pub fn layer_ids(&self) -> Vec<LayerId> {
        self.layers.iter().map(|l| l.id).collect()
    }

    /// Playback state of a layer.
    pub fn layer_state(&self, id: LayerId) -> Option<EngineState> {
        self.layers.iter().find(|l| l.id == id).map(|l| match &l.engine {
            LayerEngine::Noise(e) => e.state(),
            LayerEngine::Binaural(e) => e.state(),
        })
    }

    /// Whether a layer is muted.
    pub fn layer_muted(&self, id: LayerId) -> Option<bool> {
        self.layers.iter().find(|l| l.id == id).map(|l| match &l.engine {
            LayerEngine::Noise(e) => e.muted(),
            LayerEngine::Binaural(e) => e.muted(),
        })
    }

    /// Current parameters of a noise layer, if `id` names one.
    pub fn noise_params(&self, id: LayerId) -> Option<NoiseParams> {
        self.layers.iter().find(|l| l.id == id).and_then(|l| match &l.engine {
            LayerEngine::Noise(e) => Some(e.params()),
            LayerEngine::Binaural(_) => None,
        })
    }

    /// Current parameters of a binaural layer, if `id` names one.
    pub fn binaural_params(&self, id: LayerId) -> Option<BinauralParams> {
        self.layers.iter().find(|l| l.id == id).and_then(|l| match &l.engine {
            LayerEngine::Binaural(e) => Some(e.params()),
            LayerEngine::Noise(_) => None,
        })
    }

    /// Add a noise layer. Starts playing when the registry is globally
    /// playing.
    pub fn add_noise_layer(&mut self, params: NoiseParams) -> LayerId {
        let params = params.clamped();
        let id = self.allocate_id();
        let shared = Arc::new(NoiseShared::new(&params));
        let _ = self.tx.send(RenderCommand::AddNoiseLayer {
            id,
            shared: Arc::clone(&shared),
        });

        let mut engine =
            NoiseEngine::new(id, self.sample_rate, params, shared, self.tx.clone());
        if self.global_playing {
            let _ = engine.play();
        }
        info!(layer = id.0, "added noise layer");
        self.layers.push(Layer {
            id,
            engine: LayerEngine::Noise(engine),
        });
        id
    }

    /// Add a binaural layer. Starts playing when the registry is globally
    /// playing.
    pub fn add_binaural_layer(&mut self, params: BinauralParams) -> LayerId {
        let params = params.clamped();
        let id = self.allocate_id();
        let shared = Arc::new(BinauralShared::new(&params));
        let _ = self.tx.send(RenderCommand::AddBinauralLayer {
            id,
            shared: Arc::clone(&shared),
        });

        let mut engine =
            BinauralEngine::new(id, self.sample_rate, params, shared, self.tx.clone());
        if self.global_playing {
            let _ = engine.play();
        }
        info!(layer = id.0, "added binaural layer");
        self.layers.push(Layer {
            id,
            engine: LayerEngine::Binaural(engine),
        });
        id
    }

    /// Remove a layer, stopping it and releasing its chain.
    pub fn remove_layer(&mut self, id: LayerId) -> Result<(), EngineError> {
        let index = self
            .layers
            .iter()
            .position(|l| l.id == id)
            .ok_or(EngineError::UnknownLayer(id.0))?;

        let mut layer = self.layers.remove(index);
        match &mut layer.engine {
            LayerEngine::Noise(e) => e.stop(),
            LayerEngine::Binaural(e) => e.stop(),
        }
        let _ = self.tx.send(RenderCommand::RemoveLayer(id));
        info!(layer = id.0, "removed layer");
        Ok(())
    }

    /// Apply a partial update to a noise layer.
    pub fn update_noise(&mut self, id: LayerId, update: NoiseUpdate) -> Result<(), EngineError> {
        let global_playing = self.global_playing;
        let engine = match self.engine_mut(id)? {
            LayerEngine::Noise(e) => e,
            LayerEngine::Binaural(_) => return Err(EngineError::UnknownLayer(id.0)),
        };

        if let Some(volume) = update.volume {
            engine.apply_volume(volume);
        }
        if let Some(pan) = update.pan {
            engine.apply_pan(pan);
        }
        if let Some(position) = update.filter_position {
            engine.apply_filter(position);
        }
        if let Some(breathe) = update.breathe {
            engine.apply_breathe(breathe);
        }
        if let Some(slope) = update.slope {
            engine.apply_slope(slope)?;
        }
        if let Some(muted) = update.muted {
            engine.set_muted(muted, global_playing)?;
        }
        Ok(())
    }

    /// Apply a partial update to a binaural layer.
    pub fn update_binaural(
        &mut self,
        id: LayerId,
        update: BinauralUpdate,
    ) -> Result<(), EngineError> {
        let global_playing = self.global_playing;
        let engine = match self.engine_mut(id)? {
            LayerEngine::Binaural(e) => e,
            LayerEngine::Noise(_) => return Err(EngineError::UnknownLayer(id.0)),
        };

        if let Some(volume) = update.volume {
            engine.apply_volume(volume);
        }
        if let Some(carrier) = update.carrier_hz {
            engine.apply_carrier_frequency(carrier);
        }
        if let Some(beat) = update.beat_hz {
            engine.apply_beat_frequency(beat);
        }
        if let Some(waveform) = update.waveform {
            engine.apply_waveform(waveform);
        }
        if let Some(position) = update.filter_position {
            engine.apply_filter(position);
        }
        if let Some(muted) = update.muted {
            engine.set_muted(muted, global_playing)?;
        }
        Ok(())
    }

    /// Start every unmuted layer and mark the registry globally playing.
    pub fn play_all(&mut self) -> Result<(), EngineError> {
        self.global_playing = true;
        info!(layers = self.layers.len(), "play all");
        for layer in &mut self.layers {
            match &mut layer.engine {
                LayerEngine::Noise(e) => {
                    if !e.muted() {
                        e.play()?;
                    }
                }
                LayerEngine::Binaural(e) => {
                    if !e.muted() {
                        e.play()?;
                    }
                }
            }
        }
        Ok(())
    }

    /// Stop every layer and clear the global playing flag.
    pub fn stop_all(&mut self) {
        self.global_playing = false;
        info!(layers = self.layers.len(), "stop all");
        for layer in &mut self.layers {
            match &mut layer.engine {
                LayerEngine::Noise(e) => e.stop(),
                LayerEngine::Binaural(e) => e.stop(),
            }
        }
    }

    /// Mute or unmute a layer without touching its parameters.
    pub fn set_muted(&mut self, id: LayerId, muted: bool) -> Result<(), EngineError> {
        let global_playing = self.global_playing;
        match self.engine_mut(id)? {
            LayerEngine::Noise(e) => e.set_muted(muted, global_playing),
            LayerEngine::Binaural(e) => e.set_muted(muted, global_playing),
        }
    }

    /// Stop everything and remove all layers.
    pub fn reset(&mut self) {
        self.stop_all();
        for layer in self.layers.drain(..) {
            let _ = self.tx.send(RenderCommand::RemoveLayer(layer.id));
        }
    }

    fn engine_mut(&mut self, id: LayerId) -> Result<&mut LayerEngine, EngineError> {
        self.layers
            .iter_mut()
            .find(|l| l.id == id)
            .map(|l| &mut l.engine)
            .ok_or(EngineError::UnknownLayer(id.0))
    }

    fn allocate_id(&mut self) -> LayerId {
        let id = LayerId(self.next_id);
        self.next_id += 1;
        id
    }
}
