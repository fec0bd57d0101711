//! Audio output backend for susurro.
//!
//! Connects a [`susurro_engine::Mixer`] to the system's output device via
//! cpal:
//!
//! - [`OutputStream`] - output-only stream whose callback pulls blocks
//!   from the mixer
//! - [`list_output_devices`] / [`default_output_device`] - device discovery
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use susurro_engine::{LayerRegistry, NoiseParams};
//! use susurro_io::{OutputConfig, OutputStream, default_output_device};
//!
//! let device = default_output_device()?;
//! let (mut registry, mixer) = LayerRegistry::new(device.default_sample_rate as f32);
//! registry.add_noise_layer(NoiseParams::default());
//!
//! let stream = OutputStream::spawn(OutputConfig::default(), mixer)?;
//! registry.play_all()?;
//! // ... audio renders until `stream` is dropped
//! ```

mod stream;

pub use stream::{
    AudioDevice, OutputConfig, OutputStream, default_output_device, list_output_devices,
};

/// Error types for audio output operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No audio output device available on the system.
    #[error("No audio output device available")]
    NoDevice,

    /// Audio stream setup or runtime error.
    #[error("Audio stream error: {0}")]
    Stream(String),

    /// The requested audio device was not found.
    #[error("Device not found: {0}")]
    DeviceNotFound(String),
}

/// Convenience result type for audio output operations.
pub type Result<T> = std::result::Result<T, Error>;
