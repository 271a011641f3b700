//! Automatic placement of position hints.
//!
//! The chunk generator is greedy: given a starting position it plays as many notes as it can
//! there. When a position shift finally becomes inevitable the jump can be large. The engine then
//! looks back along the notes played since the last chunk boundary and places a shift (or break)
//! hint where the melody crosses the middle of its range, so that the next pass shifts earlier.

use fretboard::{fingering::Annotation, note::Note, HandPosition};

use std::collections::BTreeMap;

/// Smallest span of notes in which hints are placed automatically.
///
/// A genuinely large shift inherent in the melody cannot be hinted away. Below this size the
/// engine stops trying.
pub const GIVE_UP_SIZE: usize = 12;

/// Minimum number of notes per threshold crossing for a crossing to be a sensible hint location.
const NOTES_PER_CROSSING: usize = 4;

/// A hint decided by the engine during a pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HintPlacement {
    /// Index of the note receiving the hint.
    pub location: usize,
    /// [`Annotation::SHIFT_UP`], [`Annotation::SHIFT_DOWN`] or [`Annotation::BREAK`].
    pub kind: Annotation,
}

/// Decide where to place a hint for an excessive shift from `last` to `new` at note `current`.
///
/// `cursor` is the index of the last chunk boundary. Returns `None` if no sensible location
/// exists, in which case the shift is accepted as it is.
pub fn decide(
    notes: &[Note],
    cursor: usize,
    current: usize,
    last: HandPosition,
    new: HandPosition,
) -> Option<HintPlacement> {
    let diff = (last - new).abs();
    let mut kind = if last > new {
        Annotation::SHIFT_DOWN
    } else {
        Annotation::SHIFT_UP
    };

    // At the very start (or a restart) the hint can lever the chunk start itself.
    let at_cursor = &notes[cursor];
    if (cursor == 0 || at_cursor.has_restart_hint()) && !at_cursor.has_shift_hint() {
        log::debug!("Hinting {} at chunk start {}", kind, cursor);
        return Some(HintPlacement {
            location: cursor,
            kind,
        });
    }

    // Shift hints on small jumps do more harm than good.
    if diff < 5 {
        kind = Annotation::BREAK;
    }

    let span = (cursor + 1).min(current)..current;
    let note_count = span.len();
    let (lowest, highest) = notes[span.clone()]
        .iter()
        .fold((10_000, 0), |(low, high), n| (low.min(n.pitch), high.max(n.pitch)));

    if diff == 5 && highest > lowest && note_count / ((highest - lowest) as usize) < 2 {
        kind = Annotation::BREAK;
    }

    if note_count < GIVE_UP_SIZE {
        log::debug!(
            "Shift of {} after only {} notes, accepting it",
            diff,
            note_count
        );
        return None;
    }

    let threshold = (lowest + highest) / 2;

    // Scan backwards for the points where the melody crosses the threshold, rising crossings
    // for an upward shift and falling ones for a downward shift.
    let mut crossings = Vec::new();
    let mut later_pitch = notes[current - 1].pitch;
    for index in span.rev() {
        let pitch = notes[index].pitch;
        if pitch <= threshold && later_pitch > threshold {
            if kind != Annotation::SHIFT_DOWN {
                crossings.push(index);
            }
        } else if pitch > threshold && later_pitch <= threshold && kind != Annotation::SHIFT_UP {
            crossings.push(index);
        }
        later_pitch = pitch;
    }

    if crossings.is_empty() || note_count / crossings.len() < NOTES_PER_CROSSING {
        log::debug!(
            "{} crossings in {} notes, no hint for shift of {}",
            crossings.len(),
            note_count,
            diff
        );
        return None;
    }

    let mut location = crossings[crossings.len() / 2] + 1;
    if notes[location].is_rest() {
        location -= 1;
    }

    Some(HintPlacement { location, kind })
}

/// Hints inserted by the engine, kept apart from the caller's notes.
///
/// Every pass starts from the caller's notes with these hints applied, so the caller's own hints
/// are never lost.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AutoHints {
    hints: BTreeMap<usize, Annotation>,
}

impl AutoHints {
    pub fn len(&self) -> usize {
        self.hints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hints.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Annotation> {
        self.hints.get(&index).copied()
    }

    /// Record a decided hint.
    ///
    /// Hints after it are stale now: they are dropped up to (not including) the next note of
    /// `source` carrying a restart hint.
    pub fn insert(&mut self, placement: HintPlacement, source: &[Note]) {
        let start = placement.location + 1;
        let end = source
            .iter()
            .enumerate()
            .skip(start)
            .find(|(_, n)| n.has_restart_hint())
            .map_or(usize::MAX, |(index, _)| index);
        self.hints.retain(|index, _| !(start..end).contains(index));

        *self.hints.entry(placement.location).or_default() |=
            placement.kind | Annotation::AUTO_HINT;
    }

    /// A copy of `source` with the hints added.
    pub fn apply(&self, source: &[Note]) -> Vec<Note> {
        let mut notes = source.to_vec();
        for (index, hint) in self.hints.iter() {
            if let Some(note) = notes.get_mut(*index) {
                note.add_annotation(*hint);
            }
        }

        notes
    }
}
