//! Susurro Effects - the stages of the ambient processing chains.
//!
//! Each layer's chain wires these stages in a fixed topology:
//!
//! ```text
//! noise:    source → StereoPanner → LowPassFilter → SafetyCompressor → BreathingVolume
//! binaural: pair   → LowPassFilter → BreathingVolume
//! ```
//!
//! All stages implement [`susurro_core::Effect`] and are long-lived: they
//! are built once per layer and survive play/stop cycles, with only the
//! signal source swapped in and out.

#![cfg_attr(not(feature = "std"), no_std)]

pub mod compressor;
pub mod filter;
pub mod panner;
pub mod volume;

pub use compressor::SafetyCompressor;
pub use filter::{FILTER_FREQ_MIN, LowPassFilter, position_to_cutoff};
pub use panner::StereoPanner;
pub use volume::{BREATHE_DEPTH, BREATHE_RATE_HZ, BreathingVolume};
