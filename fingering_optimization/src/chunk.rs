//! A run of notes played without changing hand position.

use fretboard::{fingering::Annotation, note::Note, HandPosition};

/// Fingered notes sharing one hand position, with the accumulated cost of playing them (lower is
/// better).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Chunk {
    notes: Vec<Note>,
    position: HandPosition,
    cost: i32,
}

impl Chunk {
    pub fn new(position: HandPosition) -> Self {
        Self {
            notes: Vec::new(),
            position,
            cost: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn cost(&self) -> i32 {
        self.cost
    }

    pub fn add_cost(&mut self, cost: i32) {
        self.cost += cost;
    }

    pub fn push(&mut self, note: Note) {
        self.notes.push(note);
    }

    pub fn position(&self) -> HandPosition {
        self.position
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn into_notes(self) -> Vec<Note> {
        self.notes
    }

    /// Mark the first note as the start of a new hand position, unless the caller already
    /// hinted a shift there.
    pub fn tag_position_shift(&mut self) {
        if let Some(first) = self.notes.first_mut() {
            if !first.has_shift_hint() {
                first.add_annotation(Annotation::POSITION_SHIFT);
            }
        }
    }

    /// LilyPond markup of a fret diagram showing the chunk's finger dots.
    ///
    /// Diagram strings count from the highest-pitched string, so the instrument's string count
    /// is needed to flip the numbering. Q-shifted notes are left out.
    pub fn fret_diagram(&self, num_strings: usize) -> String {
        let mut diagram = String::from("\\fret-diagram #\"s:1;f:1;");

        for note in self.notes.iter() {
            if note.is_rest() || note.has_annotation(Annotation::Q_SHIFT) {
                continue;
            }
            if let Some(pos) = note.fingering.fret_pos() {
                let dot = format!(
                    "{}-{}-{};",
                    num_strings + 1 - pos.string as usize,
                    pos.fret,
                    note.finger().numeric_index()
                );
                if !diagram.contains(&dot) {
                    diagram.push_str(&dot);
                }
            }
        }

        diagram.push('"');
        diagram
    }

    /// Attach the fret diagram to the first note, if the chunk is long enough to warrant one.
    pub fn attach_fret_diagram(&mut self, num_strings: usize) {
        if self.notes.len() > 2 {
            let diagram = self.fret_diagram(num_strings);
            self.notes[0].diagram = diagram;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fretboard::fingering::{Finger, Fingering, FretPos};

    fn fingered(pitch: i32, string: u8, fret: i32, finger: Finger) -> Note {
        let mut note = Note::new(pitch);
        note.fingering = Fingering::new(FretPos::new(string, fret), finger);
        note
    }

    fn chunk() -> Chunk {
        let mut c = Chunk::new(5);
        c.push(fingered(45, 1, 5, Finger::Index));
        c.push(Note::rest(240));
        c.push(fingered(46, 1, 6, Finger::Middle));
        c.push(fingered(45, 1, 5, Finger::Index));
        c
    }

    #[test]
    fn cost_accumulates() {
        let mut c = Chunk::new(3);
        assert!(c.is_empty());
        c.add_cost(4);
        c.add_cost(-5);
        assert_eq!(c.cost(), -1);
        assert_eq!(c.position(), 3);
    }

    #[test]
    fn diagram_lists_distinct_dots() {
        assert_eq!(
            chunk().fret_diagram(6),
            "\\fret-diagram #\"s:1;f:1;6-5-1;6-6-2;\""
        );
    }

    #[test]
    fn diagram_skips_q_shifted_notes() {
        let mut c = Chunk::new(5);
        c.push(fingered(55, 2, 10, Finger::Index));
        c.push(fingered(50, 1, 10, Finger::Middle).with_annotation(Annotation::Q_SHIFT));
        assert_eq!(c.fret_diagram(6), "\\fret-diagram #\"s:1;f:1;5-10-1;\"");
    }

    #[test]
    fn diagram_attached_to_long_chunks_only() {
        let mut long = chunk();
        long.attach_fret_diagram(6);
        assert!(long.notes()[0].diagram.starts_with("\\fret-diagram"));

        let mut short = Chunk::new(5);
        short.push(fingered(45, 1, 5, Finger::Index));
        short.push(fingered(46, 1, 6, Finger::Middle));
        short.attach_fret_diagram(6);
        assert!(short.notes()[0].diagram.is_empty());
    }

    #[test]
    fn position_shift_respects_shift_hints() {
        let mut c = chunk();
        c.tag_position_shift();
        assert!(c.notes()[0].has_annotation(Annotation::POSITION_SHIFT));

        let mut hinted = Chunk::new(5);
        hinted.push(fingered(45, 1, 5, Finger::Index).with_annotation(Annotation::SHIFT_UP));
        hinted.tag_position_shift();
        assert!(!hinted.notes()[0].has_annotation(Annotation::POSITION_SHIFT));

        let mut empty = Chunk::new(5);
        empty.tag_position_shift();
        assert!(empty.into_notes().is_empty());
    }
}
