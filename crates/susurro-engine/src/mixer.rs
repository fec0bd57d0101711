//! Render-side state: commands, layer chains, and the block mixer.
//!
//! The [`Mixer`] lives inside the audio callback. Each block it drains the
//! command channel (structural changes shipped as fully-formed values),
//! renders every active layer chain into preallocated scratch, and sums
//! the results into the device buffer. Nothing here allocates per block or
//! takes a lock.

use crate::chain::{BinauralChain, NoiseChain};
use crate::registry::LayerId;
use crate::shared::{BinauralShared, NoiseShared};
use crate::source::LoopingBuffer;
use std::sync::Arc;
use std::sync::mpsc::Receiver;
use susurro_synth::BinauralPair;
use tracing::debug;

/// Scratch block size; device blocks larger than this are rendered in
/// chunks.
const SCRATCH_FRAMES: usize = 4096;

/// Headroom reserved in the layer vector so typical sessions never
/// reallocate on the render thread.
const LAYER_CAPACITY: usize = 16;

/// Structural change shipped from the control thread.
///
/// Every variant carries fully-formed data: buffers are generated and
/// oscillators tuned before the command is sent, so the render side only
/// ever installs or drops values.
pub enum RenderCommand {
    /// Create the chain for a new noise layer.
    AddNoiseLayer {
        /// Identity of the new layer.
        id: LayerId,
        /// Parameter cells shared with the control-side engine.
        shared: Arc<NoiseShared>,
    },
    /// Create the chain for a new binaural layer.
    AddBinauralLayer {
        /// Identity of the new layer.
        id: LayerId,
        /// Parameter cells shared with the control-side engine.
        shared: Arc<BinauralShared>,
    },
    /// Drop a layer's chain and whatever source it holds.
    RemoveLayer(LayerId),
    /// Attach a freshly generated noise source, replacing any current one.
    AttachNoise(LayerId, LoopingBuffer),
    /// Attach a fully-formed oscillator pair, replacing any current one.
    AttachBinaural(LayerId, Box<BinauralPair>),
    /// Detach the layer's source, returning the chain to idle.
    Detach(LayerId),
}

enum LayerChain {
    Noise(NoiseChain),
    Binaural(BinauralChain),
}

/// Render-side mixer driven by the audio callback (or directly by tests).
pub struct Mixer {
    rx: Receiver<RenderCommand>,
    layers: Vec<(LayerId, LayerChain)>,
    scratch_left: Vec<f32>,
    scratch_right: Vec<f32>,
    sample_rate: f32,
}

impl Mixer {
    /// Create a mixer reading structural changes from `rx`.
    pub fn new(sample_rate: f32, rx: Receiver<RenderCommand>) -> Self {
        Self {
            rx,
            layers: Vec::with_capacity(LAYER_CAPACITY),
            scratch_left: vec![0.0; SCRATCH_FRAMES],
            scratch_right: vec![0.0; SCRATCH_FRAMES],
            sample_rate,
        }
    }

    /// The sample rate the chains run at.
    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Number of layers currently installed on the render side.
    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Number of layers with an attached source.
    pub fn active_count(&self) -> usize {
        self.layers
            .iter()
            .filter(|(_, chain)| match chain {
                LayerChain::Noise(c) => c.is_active(),
                LayerChain::Binaural(c) => c.is_active(),
            })
            .count()
    }

    /// Render one block of mixed output.
    ///
    /// Drains pending commands, then sums every active layer into the
    /// provided buffers (which are cleared first).
    pub fn render(&mut self, left: &mut [f32], right: &mut [f32]) {
        debug_assert_eq!(left.len(), right.len());

        while let Ok(command) = self.rx.try_recv() {
            self.apply(command);
        }

        left.fill(0.0);
        right.fill(0.0);

        let mut offset = 0;
        while offset < left.len() {
            let n = (left.len() - offset).min(SCRATCH_FRAMES);
            for (_, chain) in &mut self.layers {
                let wrote = match chain {
                    LayerChain::Noise(c) => {
                        c.render(&mut self.scratch_left[..n], &mut self.scratch_right[..n])
                    }
                    LayerChain::Binaural(c) => {
                        c.render(&mut self.scratch_left[..n], &mut self.scratch_right[..n])
                    }
                };
                if wrote {
                    for i in 0..n {
                        left[offset + i] += self.scratch_left[i];
                        right[offset + i] += self.scratch_right[i];
                    }
                }
            }
            offset += n;
        }
    }

    fn apply(&mut self, command: RenderCommand) {
        match command {
            RenderCommand::AddNoiseLayer { id, shared } => {
                debug!(layer = id.0, "installing noise chain");
                self.layers
                    .push((id, LayerChain::Noise(NoiseChain::new(self.sample_rate, shared))));
            }
            RenderCommand::AddBinauralLayer { id, shared } => {
                debug!(layer = id.0, "installing binaural chain");
                self.layers.push((
                    id,
                    LayerChain::Binaural(BinauralChain::new(self.sample_rate, shared)),
                ));
            }
            RenderCommand::RemoveLayer(id) => {
                debug!(layer = id.0, "removing chain");
                self.layers.retain(|(layer_id, _)| *layer_id != id);
            }
            RenderCommand::AttachNoise(id, source) => {
                if let Some(LayerChain::Noise(chain)) = self.chain_mut(id) {
                    chain.attach(source);
                }
            }
            RenderCommand::AttachBinaural(id, pair) => {
                if let Some(LayerChain::Binaural(chain)) = self.chain_mut(id) {
                    chain.attach(*pair);
                }
            }
            RenderCommand::Detach(id) => match self.chain_mut(id) {
                Some(LayerChain::Noise(chain)) => chain.detach(),
                Some(LayerChain::Binaural(chain)) => chain.detach(),
                None => {}
            },
        }
    }

    fn chain_mut(&mut self, id: LayerId) -> Option<&mut LayerChain> {
        self.layers
            .iter_mut()
            .find(|(layer_id, _)| *layer_id == id)
            .map(|(_, chain)| chain)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::NoiseParams;
    use std::sync::mpsc;
    use susurro_synth::NoiseBuffer;

    fn rms(buffer: &[f32]) -> f32 {
        (buffer.iter().map(|&s| s * s).sum::<f32>() / buffer.len() as f32).sqrt()
    }

    #[test]
    fn test_empty_mixer_renders_silence() {
        let (_tx, rx) = mpsc::channel();
        let mut mixer = Mixer::new(48000.0, rx);
        let mut left = [1.0f32; 256];
        let mut right = [1.0f32; 256];
        mixer.render(&mut left, &mut right);
        assert!(left.iter().all(|&s| s == 0.0), "stale data must be cleared");
    }

    #[test]
    fn test_commands_applied_in_order() {
        let (tx, rx) = mpsc::channel();
        let mut mixer = Mixer::new(48000.0, rx);

        let id = LayerId(1);
        let shared = Arc::new(NoiseShared::new(&NoiseParams::default()));
        tx.send(RenderCommand::AddNoiseLayer { id, shared }).unwrap();
        tx.send(RenderCommand::AttachNoise(
            id,
            LoopingBuffer::new(NoiseBuffer::generate(0.0, 48000)),
        ))
        .unwrap();

        let mut left = [0.0f32; 512];
        let mut right = [0.0f32; 512];
        mixer.render(&mut left, &mut right);

        assert_eq!(mixer.layer_count(), 1);
        assert_eq!(mixer.active_count(), 1);
        assert!(rms(&left) > 0.0);

        tx.send(RenderCommand::Detach(id)).unwrap();
        mixer.render(&mut left, &mut right);
        assert_eq!(mixer.active_count(), 0);
        assert!(rms(&left) == 0.0, "detached layer must fall silent");

        tx.send(RenderCommand::RemoveLayer(id)).unwrap();
        mixer.render(&mut left, &mut right);
        assert_eq!(mixer.layer_count(), 0);
    }

    #[test]
    fn test_blocks_larger_than_scratch_are_chunked() {
        let (tx, rx) = mpsc::channel();
        let mut mixer = Mixer::new(48000.0, rx);

        let id = LayerId(7);
        let shared = Arc::new(NoiseShared::new(&NoiseParams::default()));
        tx.send(RenderCommand::AddNoiseLayer { id, shared }).unwrap();
        tx.send(RenderCommand::AttachNoise(
            id,
            LoopingBuffer::new(NoiseBuffer::generate(0.0, 48000)),
        ))
        .unwrap();

        let mut left = vec![0.0f32; SCRATCH_FRAMES * 2 + 100];
        let mut right = vec![0.0f32; SCRATCH_FRAMES * 2 + 100];
        mixer.render(&mut left, &mut right);

        // Signal must reach past every chunk boundary
        assert!(rms(&left[..256]) > 0.0);
        assert!(rms(&left[SCRATCH_FRAMES..SCRATCH_FRAMES + 256]) > 0.0);
        assert!(rms(&left[SCRATCH_FRAMES * 2..]) > 0.0);
    }

    #[test]
    fn test_layers_mix_additively() {
        let (tx, rx) = mpsc::channel();
        let mut mixer = Mixer::new(48000.0, rx);

        let mut left = vec![0.0f32; 4096];
        let mut right = vec![0.0f32; 4096];

        let a = LayerId(1);
        tx.send(RenderCommand::AddNoiseLayer {
            id: a,
            shared: Arc::new(NoiseShared::new(&NoiseParams::default())),
        })
        .unwrap();
        tx.send(RenderCommand::AttachNoise(
            a,
            LoopingBuffer::new(NoiseBuffer::generate(0.0, 48000)),
        ))
        .unwrap();
        mixer.render(&mut left, &mut right);
        let one_layer = rms(&left);

        let b = LayerId(2);
        tx.send(RenderCommand::AddBinauralLayer {
            id: b,
            shared: Arc::new(crate::shared::BinauralShared::new(
                &crate::params::BinauralParams::default(),
            )),
        })
        .unwrap();
        tx.send(RenderCommand::AttachBinaural(
            b,
            Box::new(susurro_synth::BinauralPair::new(
                48000.0,
                200.0,
                10.0,
                susurro_synth::Waveform::Sine,
            )),
        ))
        .unwrap();
        mixer.render(&mut left, &mut right);
        let two_layers = rms(&left);

        assert!(
            two_layers > one_layer,
            "second layer should add energy: {} vs {}",
            one_layer,
            two_layers
        );
    }
}
