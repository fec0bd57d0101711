//! Real-time audio output via cpal.

use crate::{Error, Result};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Device, Host, Stream};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use susurro_engine::Mixer;
use tracing::{info, warn};

/// Frames rendered per planar scratch pass inside the callback. Device
/// blocks larger than this are rendered in chunks.
const SCRATCH_FRAMES: usize = 4096;

/// Extract device name via `description()` (cpal 0.17+).
fn device_name(device: &Device) -> std::result::Result<String, cpal::DeviceNameError> {
    device.description().map(|d| d.name().to_string())
}

/// Audio output device information.
#[derive(Debug, Clone)]
pub struct AudioDevice {
    /// Human-readable device name.
    pub name: String,
    /// Default sample rate in Hz.
    pub default_sample_rate: u32,
}

/// Output stream configuration.
#[derive(Debug, Clone, Default)]
pub struct OutputConfig {
    /// Output device name or index (uses the default device if `None`).
    pub output_device: Option<String>,
}

/// List all available audio output devices.
pub fn list_output_devices() -> Result<Vec<AudioDevice>> {
    let host = cpal::default_host();
    let mut devices = Vec::new();

    if let Ok(outputs) = host.output_devices() {
        for device in outputs {
            if let Ok(name) = device_name(&device) {
                let sample_rate = device
                    .default_output_config()
                    .map(|c| c.sample_rate())
                    .unwrap_or(48000);
                devices.push(AudioDevice {
                    name,
                    default_sample_rate: sample_rate,
                });
            }
        }
    }

    Ok(devices)
}

/// Get the default audio output device.
pub fn default_output_device() -> Result<AudioDevice> {
    let host = cpal::default_host();
    let device = host.default_output_device().ok_or(Error::NoDevice)?;
    let name = device_name(&device).map_err(|e| Error::Stream(e.to_string()))?;
    let default_sample_rate = device
        .default_output_config()
        .map(|c| c.sample_rate())
        .unwrap_or(48000);
    Ok(AudioDevice {
        name,
        default_sample_rate,
    })
}

/// Output-only audio stream rendering a [`Mixer`].
///
/// The stream starts on [`spawn`](Self::spawn) and renders until stopped
/// or dropped. Dropping the stream releases the device handle
/// deterministically; a dropped stream also drops the mixer and with it
/// the command channel, which the control side observes as
/// device-unavailable on its next play.
pub struct OutputStream {
    #[allow(dead_code)]
    host: Host,
    _stream: Stream,
    sample_rate: u32,
    channels: u16,
    running: Arc<AtomicBool>,
}

impl OutputStream {
    /// Open the output device and start rendering the mixer.
    ///
    /// The mixer must have been created at the device's sample rate (see
    /// [`default_output_device`]); the chains do not resample.
    pub fn spawn(config: OutputConfig, mut mixer: Mixer) -> Result<Self> {
        let host = cpal::default_host();

        let device = match &config.output_device {
            Some(name) => find_output_device(&host, name)?,
            None => host.default_output_device().ok_or(Error::NoDevice)?,
        };

        let output_config = device
            .default_output_config()
            .map_err(|e| Error::Stream(e.to_string()))?;
        let sample_rate = output_config.sample_rate();
        let channels = output_config.channels();

        info!(
            device = %device_name(&device).unwrap_or_else(|_| "unknown".into()),
            sample_rate,
            channels,
            "opening output stream"
        );

        let running = Arc::new(AtomicBool::new(true));
        let callback_running = Arc::clone(&running);

        let mut scratch_left = vec![0.0f32; SCRATCH_FRAMES];
        let mut scratch_right = vec![0.0f32; SCRATCH_FRAMES];
        let channel_count = channels as usize;

        let stream = device
            .build_output_stream(
                &output_config.into(),
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                    if !callback_running.load(Ordering::SeqCst) {
                        data.fill(0.0);
                        return;
                    }

                    let mut frame_offset = 0;
                    let total_frames = data.len() / channel_count;
                    while frame_offset < total_frames {
                        let n = (total_frames - frame_offset).min(SCRATCH_FRAMES);
                        mixer.render(&mut scratch_left[..n], &mut scratch_right[..n]);
                        interleave_into(
                            &scratch_left[..n],
                            &scratch_right[..n],
                            &mut data[frame_offset * channel_count..(frame_offset + n) * channel_count],
                            channel_count,
                        );
                        frame_offset += n;
                    }
                },
                |err| warn!(error = %err, "output stream error"),
                None,
            )
            .map_err(|e| Error::Stream(e.to_string()))?;

        stream.play().map_err(|e| Error::Stream(e.to_string()))?;

        Ok(Self {
            host,
            _stream: stream,
            sample_rate,
            channels,
            running,
        })
    }

    /// The sample rate the device opened at.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// The device's channel count.
    pub fn channels(&self) -> u16 {
        self.channels
    }

    /// Silence the stream. The device stays open until the stream drops.
    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
        info!("output stream stopped");
    }

    /// Whether the stream is still rendering.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }
}

/// Interleave planar left/right channels into the device buffer.
///
/// Mono devices receive the L/R mix; extra channels beyond stereo are
/// silenced.
fn interleave_into(left: &[f32], right: &[f32], output: &mut [f32], channels: usize) {
    let frames = left.len().min(right.len());

    match channels {
        1 => {
            for i in 0..frames {
                output[i] = (left[i] + right[i]) * 0.5;
            }
        }
        2 => {
            for i in 0..frames {
                output[i * 2] = left[i];
                output[i * 2 + 1] = right[i];
            }
        }
        _ => {
            for i in 0..frames {
                let idx = i * channels;
                output[idx] = left[i];
                output[idx + 1] = right[i];
                for c in 2..channels {
                    output[idx + c] = 0.0;
                }
            }
        }
    }
}

/// Find an output device by index, exact name, or case-insensitive
/// partial match.
fn find_output_device(host: &Host, name_or_index: &str) -> Result<Device> {
    let devices: Vec<_> = host
        .output_devices()
        .map_err(|e| Error::Stream(e.to_string()))?
        .collect();

    // Numeric index first
    if let Ok(index) = name_or_index.parse::<usize>() {
        return devices.get(index).cloned().ok_or_else(|| {
            Error::DeviceNotFound(format!(
                "output device index {} (only {} devices available)",
                index,
                devices.len()
            ))
        });
    }

    // Exact match
    for device in &devices {
        if device_name(device).is_ok_and(|n| n == name_or_index) {
            return Ok(device.clone());
        }
    }

    // Case-insensitive partial match
    let search_lower = name_or_index.to_lowercase();
    let mut matches: Vec<_> = devices
        .iter()
        .filter_map(|d| {
            device_name(d).ok().and_then(|name| {
                name.to_lowercase()
                    .contains(&search_lower)
                    .then(|| (d.clone(), name))
            })
        })
        .collect();

    match matches.len() {
        0 => Err(Error::DeviceNotFound(format!(
            "no output device matching '{}'",
            name_or_index
        ))),
        1 => Ok(matches.remove(0).0),
        _ => {
            let names: Vec<_> = matches.iter().map(|(_, n)| n.as_str()).collect();
            warn!(
                query = name_or_index,
                candidates = ?names,
                "multiple output devices match; using first"
            );
            Ok(matches.remove(0).0)
        }
    }
}
