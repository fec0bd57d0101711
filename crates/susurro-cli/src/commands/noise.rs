//! Noise playback command.

use clap::Args;
use susurro_engine::{LayerRegistry, NoiseParams};
use susurro_io::OutputStream;

#[derive(Args)]
pub struct NoiseArgs {
    /// Spectral slope: -6 (brown) through 0 (white) to 6 (violet)
    #[arg(short, long, default_value = "0.0", allow_hyphen_values = true)]
    slope: f32,

    /// Output volume (0.0 - 1.0)
    #[arg(short, long, default_value = "0.25")]
    volume: f32,

    /// Pan position: -1 (left) to 1 (right)
    #[arg(short, long, default_value = "0.0", allow_hyphen_values = true)]
    pan: f32,

    /// Low-pass filter position: 0 (200 Hz) to 1 (fully open)
    #[arg(short, long, default_value = "1.0")]
    filter: f32,

    /// Enable the breathing volume swell
    #[arg(long)]
    breathe: bool,

    /// Play for this many seconds, then exit (default: until Ctrl+C)
    #[arg(short, long)]
    duration: Option<f32>,

    /// Output device name or index
    #[arg(long)]
    output_device: Option<String>,
}

pub fn run(args: NoiseArgs) -> anyhow::Result<()> {
    let (device, config) = super::resolve_device(args.output_device.as_deref())?;

    let (mut registry, mixer) = LayerRegistry::new(device.default_sample_rate as f32);
    registry.add_noise_layer(NoiseParams {
        volume: args.volume,
        pan: args.pan,
        slope: args.slope,
        filter_position: args.filter,
        breathe: args.breathe,
    });

    let stream = OutputStream::spawn(config, mixer)?;
    registry.play_all()?;

    println!("Playing noise (slope {:.1}) on {}", args.slope, device.name);
    println!("  Sample rate: {} Hz", stream.sample_rate());
    println!("\nPress Ctrl+C to stop...\n");

    super::wait_for_exit(args.duration)?;

    registry.stop_all();
    stream.stop();
    Ok(())
}
