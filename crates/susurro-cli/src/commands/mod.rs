//! CLI subcommand implementations.

pub mod binaural;
pub mod devices;
pub mod noise;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};
use susurro_io::{AudioDevice, OutputConfig, default_output_device, list_output_devices};

/// Resolve the output device the user asked for (default when `None`).
pub fn resolve_device(name: Option<&str>) -> anyhow::Result<(AudioDevice, OutputConfig)> {
    let device = match name {
        None => default_output_device()?,
        Some(query) => {
            let devices = list_output_devices()?;
            let found = if let Ok(index) = query.parse::<usize>() {
                devices.into_iter().nth(index)
            } else {
                let lower = query.to_lowercase();
                devices
                    .into_iter()
                    .find(|d| d.name == query || d.name.to_lowercase().contains(&lower))
            };
            found.ok_or_else(|| anyhow::anyhow!("no output device matching '{}'", query))?
        }
    };
    let config = OutputConfig {
        output_device: name.map(String::from),
    };
    Ok((device, config))
}

/// Block until Ctrl+C, or until `duration_secs` elapses when given.
pub fn wait_for_exit(duration_secs: Option<f32>) -> anyhow::Result<()> {
    let running = Arc::new(AtomicBool::new(true));
    let r = Arc::clone(&running);
    ctrlc::set_handler(move || {
        println!("\nStopping...");
        r.store(false, Ordering::SeqCst);
    })?;

    let started = Instant::now();
    while running.load(Ordering::SeqCst) {
        if let Some(limit) = duration_secs {
            if started.elapsed() >= Duration::from_secs_f32(limit) {
                break;
            }
        }
        std::thread::sleep(Duration::from_millis(100));
    }
    Ok(())
}
