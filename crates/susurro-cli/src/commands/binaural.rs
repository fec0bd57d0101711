//! Binaural beat playback command.

use clap::Args;
use susurro_engine::{BinauralParams, LayerRegistry};
use susurro_io::OutputStream;
use susurro_synth::Waveform;

#[derive(Args)]
pub struct BinauralArgs {
    /// Carrier frequency in Hz (left ear)
    #[arg(short, long, default_value = "200.0")]
    carrier: f32,

    /// Beat frequency in Hz (right ear runs at carrier + beat)
    #[arg(short, long, default_value = "10.0")]
    beat: f32,

    /// Waveform: sine, triangle, square, or saw
    #[arg(short, long, default_value = "sine", value_parser = parse_waveform)]
    waveform: Waveform,

    /// Output volume (0.0 - 1.0)
    #[arg(short, long, default_value = "0.15")]
    volume: f32,

    /// Low-pass filter position: 0 (200 Hz) to 1 (5 kHz)
    #[arg(short, long, default_value = "0.5")]
    filter: f32,

    /// Play for this many seconds, then exit (default: until Ctrl+C)
    #[arg(short, long)]
    duration: Option<f32>,

    /// Output device name or index
    #[arg(long)]
    output_device: Option<String>,
}

fn parse_waveform(s: &str) -> Result<Waveform, String> {
    Waveform::from_name(&s.to_lowercase())
        .ok_or_else(|| format!("unknown waveform '{}' (expected sine, triangle, square, saw)", s))
}

pub fn run(args: BinauralArgs) -> anyhow::Result<()> {
    let (device, config) = super::resolve_device(args.output_device.as_deref())?;

    let (mut registry, mixer) = LayerRegistry::new(device.default_sample_rate as f32);
    registry.add_binaural_layer(BinauralParams {
        volume: args.volume,
        carrier_hz: args.carrier,
        beat_hz: args.beat,
        waveform: args.waveform,
        filter_position: args.filter,
    });

    let stream = OutputStream::spawn(config, mixer)?;
    registry.play_all()?;

    println!(
        "Playing binaural beat: {} Hz left, {} Hz right ({} waveform) on {}",
        args.carrier,
        args.carrier + args.beat,
        args.waveform.name(),
        device.name
    );
    println!("  Sample rate: {} Hz", stream.sample_rate());
    println!("\nPress Ctrl+C to stop...\n");

    super::wait_for_exit(args.duration)?;

    registry.stop_all();
    stream.stop();
    Ok(())
}
