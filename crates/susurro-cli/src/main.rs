//! Susurro CLI - play ambient noise and binaural beats from the terminal.

mod commands;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "susurro")]
#[command(author, version, about = "Ambient sound engine CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play tunable-color noise
    Noise(commands::noise::NoiseArgs),

    /// Play a binaural beat tone
    Binaural(commands::binaural::BinauralArgs),

    /// List audio output devices
    Devices(commands::devices::DevicesArgs),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Noise(args) => commands::noise::run(args),
        Commands::Binaural(args) => commands::binaural::run(args),
        Commands::Devices(args) => commands::devices::run(args),
    }
}
