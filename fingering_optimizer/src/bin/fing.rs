//! Command line front-end: reads a note file (or generates a MIGT exercise), fingers it and
//! prints the result.

use fingering_evaluation::metrics::fingering_stats::FingeringStats;
use fingering_optimizer::{
    config::Config,
    migt::{self, Exercise, Scale},
    note_reader, render,
};
use fretboard::{
    hand_model::HandModelKind,
    instrument::Instrument,
    note::{Note, Spelling},
};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use std::{fs, path::PathBuf, time::Instant};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum HandModelArg {
    Standard,
    ExtendedLow,
    ExtendedBoth,
}

impl From<HandModelArg> for HandModelKind {
    fn from(arg: HandModelArg) -> Self {
        match arg {
            HandModelArg::Standard => HandModelKind::Standard,
            HandModelArg::ExtendedLow => HandModelKind::ExtendedLow,
            HandModelArg::ExtendedBoth => HandModelKind::ExtendedBoth,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "fing")]
#[command(about = "Find a playable left-hand fingering for a note sequence.")]
struct Options {
    /// Note file, one `<type> <number> [annotation]` entry per line
    #[arg(required_unless_present = "migt_scale")]
    input: Option<PathBuf>,

    /// Fingering configuration
    #[arg(short, long, default_value = "config/fingering.yml")]
    config: PathBuf,

    /// Instrument definition (a standard-tuned guitar if omitted)
    #[arg(short, long)]
    instrument: Option<PathBuf>,

    /// Pin notes given as string and fret to their string
    #[arg(long)]
    tab: bool,

    /// Hand model, overriding the configuration
    #[arg(long, value_enum)]
    hand_model: Option<HandModelArg>,

    /// Maximum number of passes, overriding the configuration
    #[arg(long)]
    max_passes: Option<usize>,

    /// Largest position shift accepted without placing a hint, overriding the configuration
    #[arg(long)]
    max_shift: Option<i32>,

    /// Allow back-to-back glissando shifts
    #[arg(long)]
    back_to_back: bool,

    /// Print statistics of the fingering and the run time
    #[arg(long)]
    statistics: bool,

    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Spell accidentals with flats instead of sharps
    #[arg(long)]
    use_flats: bool,

    /// Finger a MIGT exercise for this scale instead of reading a note file: a pattern such as
    /// `O.O.OO.O.O.O` or the scale number
    #[arg(long, conflicts_with = "input")]
    migt_scale: Option<String>,

    /// Largest step size of the MIGT exercise (0 for all)
    #[arg(long, default_value_t = 1)]
    migt_step: u32,

    /// Lowest note of the MIGT exercise
    #[arg(long, default_value_t = migt::DEFAULT_START)]
    migt_start: i32,

    /// Range of the MIGT exercise in octaves
    #[arg(long, default_value_t = migt::DEFAULT_OCTAVES)]
    migt_range: u32,

    /// Write the fingering to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn load_config(options: &Options) -> Result<Config> {
    let mut config = if options.config.exists() {
        Config::from_yaml_file(&options.config)?
    } else {
        log::warn!(
            "Config file {} not found, using defaults",
            options.config.display()
        );
        Config::default()
    };

    if let Some(hand_model) = options.hand_model {
        config.hand_model = hand_model.into();
    }
    if let Some(max_passes) = options.max_passes {
        config.max_passes = max_passes;
    }
    if let Some(max_shift) = options.max_shift {
        config.max_shift = max_shift;
    }
    if options.back_to_back {
        config.constraints.back_to_back_glissando = true;
    }

    Ok(config)
}

/// The notes to finger and a description of where they came from.
fn read_input(options: &Options, instrument: &Instrument) -> Result<(Vec<Note>, String)> {
    if let Some(scale) = &options.migt_scale {
        let exercise = Exercise {
            scale: Scale::parse(scale)?,
            step: options.migt_step,
            start: options.migt_start,
            octaves: options.migt_range,
        };
        return Ok((exercise.notes(), format!("MIGT scale {}", scale)));
    }

    let path = options
        .input
        .as_ref()
        .context("Either a note file or a MIGT scale is needed")?;
    let notes = note_reader::read_notes_file(path, instrument, options.tab)?;
    Ok((notes, path.display().to_string()))
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let options = Options::parse();
    let config = load_config(&options)?;

    let instrument = match &options.instrument {
        Some(path) => Instrument::from_yaml_file(path)?,
        None => Instrument::standard_guitar(),
    };
    log::info!(
        "Fingering for {} with the {:?} hand model",
        instrument.name(),
        config.hand_model
    );

    let (notes, source) = read_input(&options, &instrument)?;
    let mut engine = config.build_engine(instrument);

    let start = Instant::now();
    let fingered = engine
        .compute(&notes, config.max_passes)
        .with_context(|| format!("Could not finger {}", source))?
        .to_vec();
    let elapsed = start.elapsed();

    let spelling = if options.use_flats {
        Spelling::Flats
    } else {
        Spelling::Sharps
    };
    let rendered = match options.format {
        Format::Text => render::render_table(&fingered, spelling),
        Format::Json => render::render_json(&fingered, spelling)?,
    };
    match &options.output {
        Some(path) => {
            fs::write(path, &rendered)
                .with_context(|| format!("Could not write {}", path.display()))?;
            log::info!("Wrote fingering to {}", path.display());
        }
        None => print!("{}", rendered),
    }

    if options.statistics {
        let stats = FingeringStats::new(&config.statistics);
        println!("{}", stats.message(&stats.summarize(&fingered)));

        let millis = elapsed.as_millis().max(1);
        println!(
            "{}: {} notes in {} passes, {}ms ({} notes/sec)",
            "Run time".underline(),
            fingered.len(),
            engine.passes(),
            millis,
            fingered.len() as u128 * 1000 / millis
        );
    }

    Ok(())
}
