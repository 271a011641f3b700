use fingering_evaluation::metrics::fingering_stats::{self, FingeringStats};
use fingering_optimizer::{
    config::Config,
    migt::{Exercise, Scale},
    note_reader::read_notes,
    render,
};
use fretboard::{
    fingering::{Annotation, Finger},
    hand_model::HandModelKind,
    instrument::Instrument,
    note::{Note, Spelling},
};

use std::path::PathBuf;

fn workspace_file(relative: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join(relative)
}

fn finger(text: &str, config: &Config) -> (Vec<Note>, usize) {
    let instrument = Instrument::standard_guitar();
    let notes = read_notes(text, &instrument, false).unwrap();
    let mut engine = config.build_engine(instrument);
    let output = engine.compute(&notes, config.max_passes).unwrap().to_vec();
    (output, engine.passes())
}

#[test]
fn shipped_config_files_load() {
    let config = Config::from_yaml_file(workspace_file("config/fingering.yml")).unwrap();
    assert_eq!(config.hand_model, HandModelKind::Standard);
    assert_eq!(config.max_passes, 50);
    assert!(!config.constraints.back_to_back_glissando);

    let instrument =
        Instrument::from_yaml_file(workspace_file("config/instrument/guitar_standard.yml"))
            .unwrap();
    assert_eq!(instrument, Instrument::standard_guitar());
}

#[test]
fn short_phrase_is_fingered_in_one_position() {
    let (output, passes) = finger("M 45 .\nM 46 .\nM 47 .", &Config::default());

    assert_eq!(passes, 1);
    let fingers: Vec<Finger> = output.iter().map(Note::finger).collect();
    assert_eq!(fingers, vec![Finger::Index, Finger::Middle, Finger::Ring]);

    let table = render::render_table(&output, Spelling::Sharps);
    assert!(table.contains("\\fret-diagram #\"s:1;f:1;6-5-1;6-6-2;6-7-3;\""));
}

#[test]
fn large_jump_gets_an_automatic_hint() {
    let (output, passes) = finger("M 45 .\nM 86 .", &Config::default());

    assert_eq!(passes, 2);
    assert!(output[0].has_annotation(Annotation::AUTO_HINT));
    assert!(output[1].has_annotation(Annotation::POSITION_SHIFT));

    let stats = FingeringStats::new(&fingering_stats::Parameters::default());
    let summary = stats.summarize(&output);
    assert_eq!(summary.position_shifts, 1);
    assert_eq!(summary.auto_hints, 1);
}

#[test]
fn tab_input_with_finger_is_honoured() {
    let instrument = Instrument::standard_guitar();
    let notes = read_notes("1 7 4\n1 5 .", &instrument, true).unwrap();
    let mut engine = Config::default().build_engine(instrument);
    let output = engine.compute(&notes, 50).unwrap();

    assert_eq!(output[0].string(), Some(1));
    assert_eq!(output[0].fret(), Some(7));
    assert_eq!(output[0].finger(), Finger::Little);
    assert_eq!(output[1].string(), Some(1));
}

#[test]
fn json_output_carries_fingers() {
    let (output, _) = finger("R 480 .\nM 45 .\nM 46 .", &Config::default());
    let json = render::render_json(&output, Spelling::Sharps).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert!(value[0]["finger"].is_null());
    // The rest counts as a lead-in from below the nut, which rules out an index finger at fret 5.
    assert_eq!(value[1]["finger"], 2);
    assert_eq!(value[2]["finger"], 3);
    assert_eq!(value[2]["name"], "A#2");
}

#[test]
fn unplayable_note_fails_the_run() {
    let instrument = Instrument::standard_guitar();
    let notes = read_notes("M 30 .", &instrument, false).unwrap();
    let mut engine = Config::default().build_engine(instrument);
    assert!(engine.compute(&notes, 50).is_err());
}

#[test]
fn migt_exercise_is_fingered_completely() {
    let exercise = Exercise::new(Scale::parse("O.O.OO.O.O.O").unwrap(), 2);
    let notes = exercise.notes();
    let mut engine = Config::default().build_engine(Instrument::standard_guitar());
    let output = engine.compute(&notes, 50).unwrap();

    assert_eq!(output.len(), notes.len());
    assert!(output.iter().all(|n| n.finger().is_set()));
    assert_eq!(output[0].pitch, 45);
    assert_eq!(output[output.len() - 1].pitch, 45);
}
