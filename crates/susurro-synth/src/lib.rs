//! Susurro Synth - signal sources for the ambient sound engine.
//!
//! Two families of sources feed the processing chains:
//!
//! - **Spectral noise synthesis** ([`NoiseBuffer`], [`generate_noise`]):
//!   a single slope knob sweeps the spectral tilt of a looping noise
//!   buffer continuously from deeply-integrated brown noise through white
//!   to doubly-differentiated violet noise.
//! - **Binaural beat tones** ([`BinauralPair`], [`Oscillator`]): two
//!   continuously-running oscillators detuned by the beat frequency, one
//!   per ear.
//!
//! Noise buffers are rendered up-front on the control thread and looped by
//! the playback side; oscillators generate sample-by-sample in the render
//! path. Neither allocates while audio is running.

pub mod binaural;
pub mod noise;
pub mod oscillator;

pub use binaural::BinauralPair;
pub use noise::{
    DEFAULT_STEREO_WIDTH, NoiseBuffer, SLOPE_DEAD_ZONE, SLOPE_MAX, SLOPE_MIN, generate_noise,
};
pub use oscillator::{Oscillator, Waveform};
