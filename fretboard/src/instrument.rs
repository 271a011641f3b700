//! The geometry of a fretted instrument: which strings and frets produce which pitches.

use crate::{fingering::FretPos, FretNum, NoteNum, StringNum};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum InstrumentError {
    #[error("an instrument needs at least one string")]
    NoStrings,
    #[error("an instrument supports at most {max} strings, got {got}")]
    TooManyStrings { max: usize, got: usize },
}

/// One string of an instrument.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct InstrumentString {
    /// Pitch of the open string.
    pub base_note: NoteNum,
    /// Number of frets on this string. Zero marks an unfretted (drone) string.
    pub num_frets: FretNum,
}

impl InstrumentString {
    pub fn new(base_note: NoteNum, num_frets: FretNum) -> Self {
        Self {
            base_note,
            num_frets,
        }
    }

    fn covers(&self, pitch: NoteNum) -> bool {
        self.base_note <= pitch && pitch <= self.base_note + self.num_frets
    }
}

#[derive(Clone, Deserialize, Debug)]
pub struct Parameters {
    #[serde(default)]
    pub name: String,
    /// Strings in rising order of pitch.
    pub strings: Vec<InstrumentString>,
}

/// An instrument made of one or more strings, numbered from `1` (lowest pitch) upwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Instrument {
    name: String,
    strings: Vec<InstrumentString>,
}

impl Instrument {
    pub fn new(params: &Parameters) -> Result<Self, InstrumentError> {
        if params.strings.is_empty() {
            return Err(InstrumentError::NoStrings);
        }
        let max = StringNum::MAX as usize;
        if params.strings.len() > max {
            return Err(InstrumentError::TooManyStrings {
                max,
                got: params.strings.len(),
            });
        }

        Ok(Self {
            name: params.name.clone(),
            strings: params.strings.clone(),
        })
    }

    /// A six-string guitar in standard tuning (E2 A2 D3 G3 B3 E4).
    pub fn standard_guitar() -> Self {
        Self {
            name: "Guitar (standard tuning)".to_string(),
            strings: vec![
                InstrumentString::new(40, 14),
                InstrumentString::new(45, 16),
                InstrumentString::new(50, 18),
                InstrumentString::new(55, 18),
                InstrumentString::new(59, 20),
                InstrumentString::new(64, 22),
            ],
        }
    }

    pub fn from_yaml_str(s: &str) -> Result<Self> {
        let params: Parameters =
            serde_yaml::from_str(s).context("Could not parse instrument definition")?;
        Ok(Self::new(&params)?)
    }

    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let s = fs::read_to_string(path)
            .with_context(|| format!("Could not read instrument file {}", path.display()))?;
        Self::from_yaml_str(&s)
            .with_context(|| format!("Invalid instrument file {}", path.display()))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn num_strings(&self) -> usize {
        self.strings.len()
    }

    pub fn strings(&self) -> &[InstrumentString] {
        &self.strings
    }

    /// All fretted positions producing `pitch`, at most one per string.
    ///
    /// Open strings are never returned: a hand position is always anchored on a stopped note.
    /// An empty list means the pitch cannot be played on this instrument.
    pub fn candidates(&self, pitch: NoteNum) -> Vec<FretPos> {
        self.strings
            .iter()
            .zip(1..)
            .filter(|(s, _)| s.covers(pitch))
            .map(|(s, string)| FretPos::new(string, pitch - s.base_note))
            .filter(|pos| pos.fret != 0)
            .collect()
    }

    /// The pitch sounding at a fretboard position.
    ///
    /// # Panics
    ///
    /// Panics if `pos.string` is not a string of this instrument.
    pub fn pitch_at(&self, pos: FretPos) -> NoteNum {
        assert!(
            pos.string >= 1 && (pos.string as usize) <= self.strings.len(),
            "string {} out of range 1..={}",
            pos.string,
            self.strings.len()
        );
        self.strings[pos.string as usize - 1].base_note + pos.fret
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn candidates_one_per_string() {
        let guitar = Instrument::standard_guitar();
        assert_eq!(
            guitar.candidates(64),
            vec![FretPos::new(3, 14), FretPos::new(4, 9), FretPos::new(5, 5)]
        );
    }

    #[test]
    fn open_strings_are_never_candidates() {
        let guitar = Instrument::standard_guitar();
        // A2 is the open fifth string and the fifth fret of the low E.
        assert_eq!(guitar.candidates(45), vec![FretPos::new(1, 5)]);
        // The open low E has no stopped alternative at all.
        assert!(guitar.candidates(40).is_empty());
    }

    #[test]
    fn out_of_range_pitch_has_no_candidates() {
        let guitar = Instrument::standard_guitar();
        assert!(guitar.candidates(30).is_empty());
        assert!(guitar.candidates(87).is_empty());
        assert_eq!(guitar.candidates(86), vec![FretPos::new(6, 22)]);
    }

    #[test]
    fn pitch_at_inverts_candidates() {
        let guitar = Instrument::standard_guitar();
        for pos in guitar.candidates(57) {
            assert_eq!(guitar.pitch_at(pos), 57);
        }
        assert_eq!(guitar.pitch_at(FretPos::new(6, 0)), 64);
    }

    #[test]
    #[should_panic]
    fn pitch_at_rejects_unknown_string() {
        Instrument::standard_guitar().pitch_at(FretPos::new(7, 1));
    }

    #[test]
    fn instrument_from_yaml() {
        let bass = Instrument::from_yaml_str(
            r#"
name: Bass
strings:
  - { base_note: 28, num_frets: 20 }
  - { base_note: 33, num_frets: 20 }
  - { base_note: 38, num_frets: 20 }
  - { base_note: 43, num_frets: 20 }
"#,
        )
        .unwrap();

        assert_eq!(bass.name(), "Bass");
        assert_eq!(bass.num_strings(), 4);
        assert_eq!(bass.candidates(43), vec![FretPos::new(1, 15), FretPos::new(2, 10), FretPos::new(3, 5)]);
    }

    #[test]
    fn instrument_needs_strings() {
        let params = Parameters {
            name: String::new(),
            strings: vec![],
        };
        assert_eq!(Instrument::new(&params), Err(InstrumentError::NoStrings));
    }
}
