//! CLI interface for audiocue

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// On-screen indicators for off-screen and distant sounds
#[derive(Parser)]
#[command(name = "audiocue")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate a scene file
    Check {
        /// Scene file path
        #[arg(short, long, default_value = "scene.yaml")]
        config: PathBuf,
    },

    /// Run a scene for a number of frames and report the cues
    Simulate {
        /// Scene file path
        #[arg(short, long, default_value = "scene.yaml")]
        config: PathBuf,

        /// Number of frames to run
        #[arg(short, long, default_value = "120")]
        frames: u64,

        /// Record every frame to a JSON Lines file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print every frame as JSON instead of a summary
        #[arg(long)]
        json: bool,
    },

    /// Show the scene's indicators in the terminal
    Preview {
        /// Scene file path
        #[arg(short, long, default_value = "scene.yaml")]
        config: PathBuf,
    },

    /// Print the loudness of each sample window of a WAV file
    Loudness {
        /// WAV file path
        file: PathBuf,

        /// Gain applied to the RMS before conversion to dB
        #[arg(long, default_value = "50")]
        rms_multiplier: f32,
    },

    /// Generate an example scene file
    Init,
}
