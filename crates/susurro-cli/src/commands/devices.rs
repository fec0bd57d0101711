//! Device listing command.

use clap::Args;
use susurro_io::{default_output_device, list_output_devices};

#[derive(Args)]
pub struct DevicesArgs {}

pub fn run(_args: DevicesArgs) -> anyhow::Result<()> {
    let default = default_output_device().ok();
    let devices = list_output_devices()?;

    if devices.is_empty() {
        println!("No audio output devices found.");
        return Ok(());
    }

    println!("Audio output devices:");
    for (index, device) in devices.iter().enumerate() {
        let marker = match &default {
            Some(d) if d.name == device.name => " (default)",
            _ => "",
        };
        println!(
            "  [{}] {}{} - {} Hz",
            index, device.name, marker, device.default_sample_rate
        );
    }

    Ok(())
}
