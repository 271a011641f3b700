//! Reader for plain-text note files.
//!
//! Every line holds one note as `<type> <number> [annotation]`:
//!
//! * `M 64 .` is a note given by its MIDI number,
//! * `R 480 .` is a rest lasting 480 units,
//! * `x ...` is skipped,
//! * `6 5 2+` is a note given as string 6, fret 5.
//!
//! An annotation `.` means no annotation. Otherwise a leading digit `1` to `4` fixes the finger
//! and the remaining characters are annotation symbols (see [`Annotation::from_symbols`]).
//! Everything after a `#` is a comment.

use fretboard::{
    fingering::{Annotation, Finger, FretPos},
    instrument::Instrument,
    note::Note,
    FretNum, StringNum,
};

use anyhow::{anyhow, bail, Context, Result};
use std::{fs, path::Path};

/// Parse a note file. With `tab`, notes given by string and fret are pinned to that string.
pub fn read_notes(text: &str, instrument: &Instrument, tab: bool) -> Result<Vec<Note>> {
    let mut notes = Vec::new();
    for (line_num, line) in text.lines().enumerate() {
        let line = line.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }

        let note = parse_line(line, instrument, tab)
            .with_context(|| format!("Invalid note on line {}: '{}'", line_num + 1, line))?;
        if let Some(note) = note {
            notes.push(note);
        }
    }

    log::debug!("Read {} notes", notes.len());

    Ok(notes)
}

pub fn read_notes_file<P: AsRef<Path>>(
    path: P,
    instrument: &Instrument,
    tab: bool,
) -> Result<Vec<Note>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .with_context(|| format!("Could not read note file {}", path.display()))?;
    read_notes(&text, instrument, tab).with_context(|| format!("In file {}", path.display()))
}

fn parse_line(line: &str, instrument: &Instrument, tab: bool) -> Result<Option<Note>> {
    let mut fields = line.split_whitespace();
    let note_type = fields.next().ok_or_else(|| anyhow!("missing note type"))?;
    if note_type == "x" {
        return Ok(None);
    }

    let number: i32 = fields
        .next()
        .ok_or_else(|| anyhow!("missing number"))?
        .parse()
        .context("number is not an integer")?;
    let annotation = fields.next().unwrap_or(".");
    if let Some(extra) = fields.next() {
        bail!("unexpected field '{}'", extra);
    }

    let note = match note_type {
        "M" => Note::new(number),
        "R" => {
            if number < 0 {
                bail!("negative rest duration {}", number);
            }
            Note::rest(number as u32)
        }
        string => {
            let string: StringNum = string
                .parse()
                .with_context(|| format!("unknown note type '{}'", string))?;
            let note = Note::new(fretted_pitch(instrument, string, number)?);
            if tab {
                note.with_string(string)
            } else {
                note
            }
        }
    };

    apply_annotation(note, annotation).map(Some)
}

fn fretted_pitch(instrument: &Instrument, string: StringNum, fret: FretNum) -> Result<i32> {
    let num_frets = instrument
        .strings()
        .get((string as usize).wrapping_sub(1))
        .map(|s| s.num_frets)
        .ok_or_else(|| {
            anyhow!(
                "no string {} on {} (strings 1 to {})",
                string,
                instrument.name(),
                instrument.num_strings()
            )
        })?;
    if fret < 0 || fret > num_frets {
        bail!("fret {} outside 0 to {} on string {}", fret, num_frets, string);
    }

    Ok(instrument.pitch_at(FretPos::new(string, fret)))
}

fn apply_annotation(mut note: Note, annotation: &str) -> Result<Note> {
    let mut symbols = annotation;
    if let Some(digit) = symbols.chars().next().and_then(|c| c.to_digit(10)) {
        let finger = Finger::from_numeric_index(digit as i32)
            .filter(|f| Finger::FRETTING.contains(f))
            .ok_or_else(|| anyhow!("no finger {}", digit))?;
        note = note.with_finger(finger);
        symbols = &symbols[1..];
    }

    if !symbols.is_empty() && symbols != "." {
        let mark = Annotation::from_symbols(symbols)
            .ok_or_else(|| anyhow!("unknown annotation '{}'", symbols))?;
        note.add_annotation(mark);
    }

    Ok(note)
}
