//! A single note, with or without fingering data.
//!
//! Notes handed to the engine may carry an explicit string, finger and hint annotations. Such
//! data is always honoured: it overrides anything the engine would compute and affects the
//! fingering of the notes that follow.

use crate::{
    fingering::{Annotation, Finger, Fingering},
    FretNum, NoteNum, StringNum,
};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Pitch value of a rest.
pub const REST: NoteNum = 0;

/// Pitch value terminating a note sequence.
pub const END_OF_SEQUENCE: NoteNum = -1;

/// Duration given to notes created without one (MusicXML units, 960 = crotchet).
pub const DEFAULT_DURATION: u32 = 240;

const SHARP_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];
const FLAT_NAMES: [&str; 12] = [
    "C", "Db", "D", "Eb", "E", "F", "Gb", "G", "Ab", "A", "Bb", "B",
];

/// How accidentals are written in pitch names.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Spelling {
    #[default]
    Sharps,
    Flats,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Note {
    pub pitch: NoteNum,
    #[serde(default = "default_duration")]
    pub duration: u32,
    #[serde(default)]
    pub fingering: Fingering,
    /// Fret diagram markup attached by the engine to the first note of a chunk.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub diagram: String,
}

fn default_duration() -> u32 {
    DEFAULT_DURATION
}

impl Default for Note {
    fn default() -> Self {
        Self::rest(DEFAULT_DURATION)
    }
}

impl Note {
    pub fn new(pitch: NoteNum) -> Self {
        Self::with_duration(pitch, DEFAULT_DURATION)
    }

    pub fn with_duration(pitch: NoteNum, duration: u32) -> Self {
        Self {
            pitch,
            duration,
            fingering: Fingering::default(),
            diagram: String::new(),
        }
    }

    /// A rest always has pitch `0` and an unset fingering.
    pub fn rest(duration: u32) -> Self {
        Self::with_duration(REST, duration)
    }

    pub fn end_of_sequence() -> Self {
        Self::new(END_OF_SEQUENCE)
    }

    pub fn is_rest(&self) -> bool {
        self.pitch == REST
    }

    pub fn is_end_of_sequence(&self) -> bool {
        self.pitch == END_OF_SEQUENCE
    }

    pub fn string(&self) -> Option<StringNum> {
        self.fingering.string
    }

    pub fn fret(&self) -> Option<FretNum> {
        self.fingering.fret
    }

    pub fn finger(&self) -> Finger {
        self.fingering.finger
    }

    pub fn annotation(&self) -> Annotation {
        self.fingering.annotation
    }

    pub fn has_annotation(&self, mark: Annotation) -> bool {
        self.fingering.has_annotation(mark)
    }

    pub fn add_annotation(&mut self, mark: Annotation) {
        self.fingering.add_annotation(mark);
    }

    /// Pin the string this note must be played on.
    pub fn with_string(mut self, string: StringNum) -> Self {
        self.fingering.string = Some(string);
        self
    }

    /// Pin the finger this note must be played with.
    pub fn with_finger(mut self, finger: Finger) -> Self {
        self.fingering.finger = finger;
        self
    }

    pub fn with_annotation(mut self, mark: Annotation) -> Self {
        self.add_annotation(mark);
        self
    }

    pub fn has_shift_hint(&self) -> bool {
        self.fingering.annotation.has_shift_hint()
    }

    /// Does this note end a chunk (shift up/down, restart or free break)?
    pub fn has_break_hint(&self) -> bool {
        self.fingering.annotation.has_break_hint()
    }

    pub fn has_restart_hint(&self) -> bool {
        self.has_annotation(Annotation::RESTART)
    }

    pub fn has_glissando_hint(&self) -> bool {
        self.has_annotation(Annotation::GLISSANDO)
    }

    /// Scientific pitch name with sharps, MIDI 60 being `C4`.
    pub fn pitch_name(&self) -> String {
        self.pitch_name_with(Spelling::Sharps)
    }

    pub fn pitch_name_with(&self, spelling: Spelling) -> String {
        let names = match spelling {
            Spelling::Sharps => &SHARP_NAMES,
            Spelling::Flats => &FLAT_NAMES,
        };
        match self.pitch {
            REST => "r".to_string(),
            END_OF_SEQUENCE => "end".to_string(),
            p => format!("{}{}", names[p.rem_euclid(12) as usize], p.div_euclid(12) - 1),
        }
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.pitch_name())?;
        if let (Some(string), Some(fret)) = (self.string(), self.fret()) {
            write!(f, " s{} f{} ({})", string, fret, self.finger())?;
        }
        let annotation = self.annotation();
        if !annotation.is_empty() {
            write!(f, " {}", annotation)?;
        }

        Ok(())
    }
}
