//! Output formats for fingered note sequences.

use fretboard::note::{Note, Spelling};

use anyhow::{Context, Result};
use itertools::Itertools;
use serde::Serialize;
use std::fmt::Write;

/// One fingered note as written to JSON.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NoteRecord {
    pub index: usize,
    pub pitch: i32,
    pub name: String,
    pub duration: u32,
    pub string: Option<u8>,
    pub fret: Option<i32>,
    /// `null` for rests and notes without a finger.
    pub finger: Option<i32>,
    pub annotation: String,
    /// The annotation marks as a bit set.
    pub flags: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagram: Option<String>,
}

impl NoteRecord {
    pub fn new(index: usize, note: &Note, spelling: Spelling) -> Self {
        let finger = note.finger();
        Self {
            index,
            pitch: note.pitch,
            name: note.pitch_name_with(spelling),
            duration: note.duration,
            string: note.string(),
            fret: note.fret(),
            finger: finger.is_set().then(|| finger.numeric_index()),
            annotation: note.annotation().to_string(),
            flags: note.annotation().bits(),
            diagram: (!note.diagram.is_empty()).then(|| note.diagram.clone()),
        }
    }
}

fn or_dash<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

/// A plain text table, one line per note.
pub fn render_table(notes: &[Note], spelling: Spelling) -> String {
    let mut table = String::new();
    writeln!(
        table,
        "{:>5}  {:<5} {:>6} {:>4} {:>6}  {}",
        "#", "Note", "String", "Fret", "Finger", "Marks"
    )
    .ok();

    for (index, note) in notes.iter().enumerate() {
        let marks = [note.annotation().to_string(), note.diagram.clone()]
            .iter()
            .filter(|s| !s.is_empty())
            .join("  ");
        writeln!(
            table,
            "{:>5}  {:<5} {:>6} {:>4} {:>6}  {}",
            index,
            note.pitch_name_with(spelling),
            or_dash(note.string()),
            or_dash(note.fret()),
            note.finger(),
            marks
        )
        .ok();
    }

    table
}

pub fn render_json(notes: &[Note], spelling: Spelling) -> Result<String> {
    let records: Vec<NoteRecord> = notes
        .iter()
        .enumerate()
        .map(|(index, note)| NoteRecord::new(index, note, spelling))
        .collect();

    serde_json::to_string_pretty(&records).context("Could not serialize fingering")
}

#[cfg(test)]
mod tests {
    use super::*;
    use fretboard::fingering::{Annotation, Finger, Fingering, FretPos};

    fn fingered() -> Vec<Note> {
        let mut note = Note::new(45);
        note.fingering = Fingering::new(FretPos::new(1, 5), Finger::Index);
        note.add_annotation(Annotation::POSITION_SHIFT);
        note.diagram = "\\fret-diagram #\"s:1;f:1;6-5-1;\"".to_string();

        vec![note, Note::rest(480)]
    }

    #[test]
    fn table_lists_every_note() {
        let table = render_table(&fingered(), Spelling::Sharps);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[1].contains("A2"));
        assert!(lines[1].contains("\\fret-diagram"));
        assert!(lines[2].trim_end().ends_with('-'));
    }

    #[test]
    fn json_has_one_record_per_note() {
        let json = render_json(&fingered(), Spelling::Sharps).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value[0]["string"], 1);
        assert_eq!(value[0]["fret"], 5);
        assert_eq!(value[0]["finger"], 1);
        assert_eq!(value[0]["annotation"], "*");
        assert_eq!(value[0]["flags"], 0x10);
        assert_eq!(value[1]["name"], "r");
        assert!(value[1]["finger"].is_null());
        assert!(value[1].get("diagram").is_none());
    }

    #[test]
    fn flats_are_used_when_asked_for() {
        let notes = vec![Note::new(70), Note::new(61)];
        let table = render_table(&notes, Spelling::Flats);
        assert!(table.contains("Bb4"));
        assert!(table.contains("Db4"));

        let json = render_json(&notes, Spelling::Flats).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["name"], "Bb4");
        assert_eq!(value[1]["flags"], 0);
    }
}
