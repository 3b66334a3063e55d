//! `laras`: play and inspect notation scores from the terminal.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use laras::audio::{AudioEngine, BankOptions, SampleBank};
use laras::config::Config;
use laras::instrument::{Instrument, Registry};
use laras::playback::{Clock, PlaybackState, Scheduler, VoiceBank};
use laras::score::Score;
use laras::timeline::{build_timeline, effective_tempo, Timeline};
use laras::{fs, notation};

const DEFAULT_SCORE: &str = "scores/template.laras";

/// How often the control loop wakes to schedule ticks.
const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Extra time after the last tick for releases to fade.
const TAIL: Duration = Duration::from_millis(400);

#[derive(Parser)]
#[command(
    name = "laras",
    version,
    about = "Notation compiler and player for percussion and vocal scores"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Play a score through the default audio output
    Play {
        /// Score file
        file: Option<PathBuf>,
        /// Mute an instrument label (repeatable)
        #[arg(long = "mute", value_name = "LABEL")]
        mute: Vec<String>,
        /// Directory of WAV samples
        #[arg(long, value_name = "DIR")]
        sounds: Option<PathBuf>,
        /// Master volume, 0.0 to 1.0
        #[arg(long, value_name = "V")]
        volume: Option<f32>,
    },
    /// Print the parsed score and its timeline
    Inspect {
        /// Score file
        file: Option<PathBuf>,
    },
    /// List the built-in instruments
    Instruments,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("laras=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Play {
            file,
            mute,
            sounds,
            volume,
        } => play(&score_path(file), &mute, sounds, volume),
        Command::Inspect { file } => inspect(&score_path(file)),
        Command::Instruments => {
            list_instruments(Registry::builtin());
            Ok(())
        }
    }
}

fn score_path(file: Option<PathBuf>) -> PathBuf {
    file.unwrap_or_else(|| PathBuf::from(DEFAULT_SCORE))
}

fn load(path: &Path) -> (Score, Timeline) {
    let score = notation::parse(&fs::read_file(path));
    let timeline = build_timeline(&score);
    (score, timeline)
}

fn play(path: &Path, mute: &[String], sounds: Option<PathBuf>, volume: Option<f32>) -> Result<()> {
    let config = Config::load().unwrap_or_default();
    let (score, timeline) = load(path);
    if timeline.is_empty() {
        warn!(path = %path.display(), "score has nothing to play");
        return Ok(());
    }

    let registry = Registry::builtin();
    let engine =
        AudioEngine::new(registry.atomics().count()).context("failed to open audio output")?;
    let clock = engine.clock();
    let options = BankOptions {
        sample_rate: engine.sample_rate(),
        sounds_dir: sounds.or(config.sounds_dir.clone()),
        seed: config.seed,
    };

    let mut bank = SampleBank::new(registry, engine, options);
    bank.set_volume(volume.unwrap_or(config.master_volume));
    // Load samples before reading the clock so the first tick is not late.
    bank.prime();

    let mut scheduler = Scheduler::new(timeline, registry, bank);
    for label in config.muted.iter().chain(mute) {
        if !scheduler.is_muted(label) {
            scheduler.toggle_mute(label);
        }
    }

    let interrupted = Arc::new(AtomicBool::new(false));
    {
        let flag = Arc::clone(&interrupted);
        ctrlc::set_handler(move || flag.store(true, Ordering::SeqCst))
            .context("failed to install Ctrl-C handler")?;
    }

    print_header(&score);
    if !scheduler.muted().is_empty() {
        println!("muted: {}", scheduler.muted().join(", "));
    }

    let lookahead = config.lookahead_seconds();
    scheduler.play(clock.now() + lookahead);

    let mut shown_section = None;
    loop {
        if interrupted.load(Ordering::SeqCst) {
            scheduler.stop(clock.now());
            info!("interrupted");
            break;
        }

        if let Some(cursor) = scheduler.cursor() {
            if scheduler.is_playing() && shown_section != Some(cursor.section_id) {
                shown_section = Some(cursor.section_id);
                if let Some(section) = score.sections.get(cursor.section_id) {
                    println!("▶ {} ({} bpm)", section.title, effective_tempo(section.tempo));
                }
            }
        }

        scheduler.poll(clock.now() + lookahead);
        if scheduler.state() == PlaybackState::Ready {
            break;
        }
        thread::sleep(POLL_INTERVAL);
    }

    thread::sleep(Duration::from_secs_f64(lookahead) + TAIL);
    let bank = scheduler.into_voices();
    if bank.dropped() > 0 {
        warn!(dropped = bank.dropped(), "audio commands were dropped during playback");
    }
    bank.sink().pause().context("failed to pause audio output")?;
    Ok(())
}

fn print_header(score: &Score) {
    match (score.title.is_empty(), score.composer.is_empty()) {
        (true, _) => println!("(untitled)"),
        (false, true) => println!("{}", score.title),
        (false, false) => println!("{} ({})", score.title, score.composer),
    }
}

fn inspect(path: &Path) -> Result<()> {
    let (score, timeline) = load(path);
    let yaml = serde_yaml::to_string(&score).context("failed to serialize score")?;
    print!("{yaml}");

    println!("---");
    println!("{} points, {:.2}s", timeline.len(), timeline.duration());
    for point in &timeline {
        let actions: Vec<String> = point
            .actions
            .iter()
            .map(|a| format!("{}:{}", a.label, a.symbol))
            .collect();
        println!(
            "{:>5}  {:>3}:{:<4} {:>8.3}s {:>4}bpm  {}",
            point.timeline_step,
            point.section_id,
            point.section_step,
            point.time,
            point.tempo,
            actions.join(" ")
        );
    }
    Ok(())
}

fn list_instruments(registry: &Registry) {
    for instrument in registry.instruments() {
        match instrument {
            Instrument::Atomic(a) => {
                let alphabet: String = a.alphabet().iter().collect();
                println!("{:<5} {:<12} {:>6.1} dB", a.id(), alphabet, a.output_level());
            }
            Instrument::Composite(c) => {
                println!("{:<5} = {}", c.id(), c.members().join(" + "));
            }
        }
    }
}
