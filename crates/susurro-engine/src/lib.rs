//! Susurro Engine - per-layer sound engines and the layer registry.
//!
//! This crate ties the signal sources (susurro-synth) and chain stages
//! (susurro-effects) into playable layers:
//!
//! - [`NoiseChain`] / [`BinauralChain`] - the fixed-topology processing
//!   graphs, one per layer, living on the render side
//! - [`NoiseEngine`] / [`BinauralEngine`] - control-side handles holding
//!   parameters and the idle/playing state machine
//! - [`LayerRegistry`] - owns the engines, applies partial updates, and
//!   aggregates play/stop/mute across layers
//! - [`Mixer`] - the render-side state driven by the audio callback
//!
//! # Threading model
//!
//! Control thread and render thread never share mutable structures.
//! Scalar parameters cross over through lock-free atomic cells
//! ([`shared::NoiseShared`], [`shared::BinauralShared`]) that the render
//! side reads once per block. Structural changes — attaching a freshly
//! generated noise buffer, adding or removing a layer — travel as
//! fully-formed values over an mpsc channel drained at block start, so the
//! render callback never allocates buffers, never generates noise, and
//! never blocks on a lock.
//!
//! The registry and mixer are device-agnostic: tests drive
//! [`Mixer::render`] directly, and susurro-io connects it to a cpal
//! output stream.

pub mod chain;
pub mod engine;
pub mod mixer;
pub mod params;
pub mod registry;
pub mod shared;
pub mod source;

pub use chain::{BinauralChain, NoiseChain};
pub use engine::{BinauralEngine, EngineError, EngineState, NoiseEngine};
pub use mixer::{Mixer, RenderCommand};
pub use params::{
    BINAURAL_FILTER_FREQ_MAX, BinauralParams, BinauralUpdate, NOISE_FILTER_FREQ_MAX,
    NoiseParams, NoiseUpdate,
};
pub use registry::{LayerId, LayerRegistry};
pub use source::LoopingBuffer;
