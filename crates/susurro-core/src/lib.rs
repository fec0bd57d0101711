//! Susurro Core - DSP primitives for the ambient sound engine
//!
//! This crate provides the foundational building blocks shared by the
//! susurro synthesis and effect crates, designed for real-time audio
//! processing with zero allocation in the audio path.
//!
//! # Core Abstractions
//!
//! - [`Effect`] - Object-safe trait for stereo processing stages
//! - [`SmoothedParam`] - Exponential parameter smoothing (zipper-free changes)
//! - [`Biquad`] - Second-order IIR filter with RBJ cookbook low-pass coefficients
//! - [`Lfo`] - Sine low-frequency oscillator for slow amplitude modulation
//! - [`EnvelopeFollower`] - Amplitude envelope detection for dynamics
//! - Math functions: [`db_to_linear`], [`linear_to_db`], [`lerp`]
//!
//! # no_std Support
//!
//! This crate is `no_std` compatible for embedded use. Disable the default
//! `std` feature in your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! susurro-core = { version = "0.1", default-features = false }
//! ```
//!
//! # Design Principles
//!
//! - **Real-time safe**: No allocations in audio processing paths
//! - **No dependencies on std**: Pure `no_std` with `libm` for math
//! - **Stereo-first**: The processing chains this crate serves are
//!   inherently two-channel; the [`Effect`] trait reflects that

#![cfg_attr(not(feature = "std"), no_std)]

pub mod biquad;
pub mod effect;
pub mod envelope;
pub mod lfo;
pub mod math;
pub mod param;

// Re-export main types at crate root
pub use biquad::{Biquad, lowpass_coefficients};
pub use effect::Effect;
pub use envelope::EnvelopeFollower;
pub use lfo::Lfo;
pub use math::{db_to_linear, lerp, linear_to_db};
pub use param::SmoothedParam;
