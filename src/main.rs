//! audiocue - On-screen indicators for off-screen and distant sounds

use std::path::Path;

use anyhow::Result;
use audiocue::config;
use audiocue::engine::{CueEventKind, FrameRecorder, FrameReport};
use audiocue::mapping::{compute_loudness_decibels, SAMPLE_WINDOW};
use audiocue::scene::Scene;
use audiocue::signal::WavSignal;
use clap::Parser;

mod cli;

use cli::{Cli, Commands};

fn load_scene(config_path: &Path) -> Result<Scene> {
    let cfg = config::load_config(config_path)?;
    let base_dir = config_path.parent().unwrap_or_else(|| Path::new("."));
    Scene::from_config(cfg, base_dir)
}

fn print_summary(report: &FrameReport) {
    println!(
        "  {:<18} {:<8} {:>10} {:>9} {:>8} {:>6}  {:>12}",
        "cue", "state", "distance", "dB", "opacity", "size", "screen"
    );
    for cue in &report.cues {
        match &cue.indicator {
            Some(indicator) => println!(
                "  {:<18} {:<8} {:>10.2} {:>9.1} {:>8.2} {:>6.0}  ({:>4.0}, {:>4.0})",
                cue.cue,
                "active",
                indicator.distance,
                indicator.decibels,
                indicator.opacity,
                indicator.size,
                indicator.position.x,
                indicator.position.y
            ),
            None => {
                let state = if report.skipped.iter().any(|s| s.cue == cue.cue) {
                    "skipped"
                } else {
                    "hidden"
                };
                println!("  {:<18} {:<8}", cue.cue, state);
            }
        }
    }
    for skipped in &report.skipped {
        println!("  ! {}", skipped.reason);
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Check { config: config_path } => {
            println!("Checking scene at {:?}...", config_path);

            match config::load_config(&config_path) {
                Ok(cfg) => {
                    println!("Scene is valid!");
                    println!("  Viewport: {}x{}", cfg.viewport.width, cfg.viewport.height);
                    println!("  Frame rate: {} fps", cfg.frame_rate);
                    println!("  Listener: {:?}", cfg.listener.mode);
                    println!("  Cues enabled: {}", cfg.enabled);
                    println!("  Mixer groups: {}", cfg.mixer_groups.len());
                    for group in &cfg.mixer_groups {
                        println!(
                            "    - {} (image: {})",
                            group.name,
                            group.image.as_ref().map_or("none", |i| i.name.as_str())
                        );
                    }
                    println!("  Emitters: {}", cfg.emitters.len());
                    for emitter in &cfg.emitters {
                        println!(
                            "    - {} ({:?} signal, range {}) {}",
                            emitter.name,
                            emitter.signal.kind,
                            emitter.max_distance,
                            emitter.output_group.as_deref().unwrap_or("")
                        );
                    }
                    println!("  Cues: {}", cfg.cues.len());
                    for cue in &cfg.cues {
                        println!(
                            "    - {} -> {} {}",
                            cue.label(),
                            cue.emitter.as_deref().unwrap_or("(unassigned)"),
                            if cue.enabled { "[enabled]" } else { "[disabled]" }
                        );
                    }
                }
                Err(e) => {
                    println!("Scene is invalid: {:#}", e);
                    std::process::exit(1);
                }
            }
        }

        Commands::Simulate {
            config: config_path,
            frames,
            output,
            json,
        } => {
            let mut scene = load_scene(&config_path)?;
            let mut recorder = match &output {
                Some(path) => Some(FrameRecorder::new(path)?),
                None => None,
            };

            if !json {
                println!("Simulating {} frames at {} fps...", frames, scene.frame_rate());
            }

            let mut last = FrameReport::default();
            for _ in 0..frames {
                let report = scene.step();
                if let Some(recorder) = recorder.as_mut() {
                    recorder.write_frame(&report)?;
                }
                if json {
                    println!("{}", serde_json::to_string(&report)?);
                } else {
                    for event in &report.events {
                        let verb = match event.kind {
                            CueEventKind::Activated => "activated",
                            CueEventKind::Deactivated => "deactivated",
                        };
                        println!("  frame {:>5}: {} {}", report.frame, event.cue, verb);
                    }
                }
                last = report;
            }

            if !json {
                println!("\nAfter frame {}:", last.frame);
                print_summary(&last);
            }

            if let (Some(recorder), Some(path)) = (recorder, output) {
                let written = recorder.frames_written();
                let activations = recorder.activations();
                recorder.finalize()?;
                if !json {
                    println!(
                        "\nRecorded {} frames ({} activations) to {:?}",
                        written, activations, path
                    );
                }
            }
        }

        Commands::Preview { config: config_path } => {
            let mut scene = load_scene(&config_path)?;
            audiocue::viz::run_preview(&mut scene)?;
        }

        Commands::Loudness { file, rms_multiplier } => {
            let wav = WavSignal::open(&file)?;
            println!(
                "{:?}: {:.2}s at {} Hz, {}-sample windows",
                file,
                wav.duration_secs(),
                wav.sample_rate(),
                SAMPLE_WINDOW
            );

            let mut peak = f32::NEG_INFINITY;
            for (i, window) in wav.windows(SAMPLE_WINDOW).enumerate() {
                let db = compute_loudness_decibels(window, rms_multiplier);
                peak = peak.max(db);
                let time = (i * SAMPLE_WINDOW) as f64 / wav.sample_rate() as f64;
                println!("  {:>8.3}s  {:>7.1} dB", time, db);
            }
            println!("Peak: {:.1} dB", peak);
        }

        Commands::Init => {
            let example_config = include_str!("../scene.example.yaml");

            let path = "scene.yaml";
            if Path::new(path).exists() {
                println!("scene.yaml already exists. Not overwriting.");
            } else {
                std::fs::write(path, example_config)?;
                println!("Created scene.yaml with an example scene.");
            }
        }
    }

    Ok(())
}
