//! Generator for MIGT scale exercises.
//!
//! A scale is a set of pitch classes, written either as a 12 character pattern (`O` for a scale
//! note, anything else for a gap, starting at the root) or as the decimal value of the bit set
//! (bit 0 is the root). For every step size `k` from 1 up to the requested step, the exercise
//! walks the scale `k` notes at a time across the range, starting and ending on the root, then
//! comes back down the same way from the top of the range.

use fretboard::{note::Note, NoteNum};

use anyhow::{bail, Context, Result};
use std::fmt;

pub const DEFAULT_START: NoteNum = 45;
pub const DEFAULT_OCTAVES: u32 = 2;

/// The pitch classes of a scale, bit 0 being the root.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Scale(u16);

impl Scale {
    pub fn parse(text: &str) -> Result<Self> {
        if text.chars().count() == 12 && !text.chars().all(|c| c.is_ascii_digit()) {
            let bits = text
                .chars()
                .enumerate()
                .filter(|(_, c)| *c == 'O')
                .fold(0, |bits, (i, _)| bits | (1 << i));
            return Ok(Scale(bits));
        }

        let bits: u16 = text
            .parse()
            .with_context(|| format!("'{}' is neither a scale pattern nor a number", text))?;
        if bits >= 1 << 12 {
            bail!("scale number {} has more than 12 bits", bits);
        }
        Ok(Scale(bits))
    }

    pub fn contains(&self, pitch_class: usize) -> bool {
        self.0 & (1 << pitch_class) != 0
    }

    /// Semitone steps from each scale note to the next, the last one closing the octave.
    pub fn steps(&self) -> Vec<u32> {
        let mut steps = vec![1];
        for pitch_class in 1..12 {
            if self.contains(pitch_class) {
                steps.push(1);
            } else if let Some(last) = steps.last_mut() {
                *last += 1;
            }
        }
        steps
    }
}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for pitch_class in 0..12 {
            write!(f, "{}", if self.contains(pitch_class) { 'O' } else { '.' })?;
        }
        Ok(())
    }
}

/// Settings of an exercise. A `step` of 0 means all step sizes up to one less than the number
/// of scale notes. `start == 0` and `octaves == 0` fall back to the defaults.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Exercise {
    pub scale: Scale,
    pub step: u32,
    pub start: NoteNum,
    pub octaves: u32,
}

impl Exercise {
    pub fn new(scale: Scale, step: u32) -> Self {
        Self {
            scale,
            step,
            start: DEFAULT_START,
            octaves: DEFAULT_OCTAVES,
        }
    }

    pub fn notes(&self) -> Vec<Note> {
        let steps = self.scale.steps();
        let start = if self.start == 0 {
            DEFAULT_START
        } else {
            self.start
        };
        let range = if self.octaves == 0 {
            DEFAULT_OCTAVES * 12
        } else {
            self.octaves * 12
        };
        let max_step = if self.step == 0 {
            steps.len() as u32 - 1
        } else {
            self.step
        };

        log::info!(
            "MIGT scale {} ({} notes), steps {}, step sizes up to {}",
            self.scale,
            steps.len(),
            steps.iter().map(u32::to_string).collect::<Vec<_>>().join("/"),
            max_step
        );

        let mut notes = vec![Note::new(start)];
        for k in 1..=max_step {
            let walk = walk(&steps, k, range);
            let up = walk.iter().skip(1);
            let down = walk.iter().take(walk.len() - 1).rev();

            notes.extend(up.map(|offset| Note::new(start + *offset as NoteNum)));
            notes.push(Note::new(start + range as NoteNum));
            notes.extend(down.map(|offset| Note::new(start + *offset as NoteNum)));
        }

        notes
    }
}

/// Offsets from the root visited when going `k` scale steps at a time, wrapping at `range`,
/// until the root comes round again.
fn walk(steps: &[u32], k: u32, range: u32) -> Vec<u32> {
    let mut offsets = Vec::new();
    let mut offset = 0;
    let mut step = 0;
    loop {
        offsets.push(offset);
        for _ in 0..k {
            offset = (offset + steps[step]) % range;
            step = (step + 1) % steps.len();
        }
        if offset == 0 {
            break;
        }
    }
    offsets
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAJOR: &str = "O.O.OO.O.O.O";

    fn pitches(notes: &[Note]) -> Vec<NoteNum> {
        notes.iter().map(|n| n.pitch).collect()
    }

    #[test]
    fn pattern_and_number_give_the_same_scale() {
        let scale = Scale::parse(MAJOR).unwrap();
        assert_eq!(scale, Scale::parse("2741").unwrap());
        assert_eq!(scale.to_string(), MAJOR);
        assert_eq!(scale.steps(), vec![2, 2, 1, 2, 2, 2, 1]);
    }

    #[test]
    fn rejects_bad_scales() {
        assert!(Scale::parse("major").is_err());
        assert!(Scale::parse("4096").is_err());
    }

    #[test]
    fn single_steps_run_up_and_down_the_range() {
        let mut exercise = Exercise::new(Scale::parse(MAJOR).unwrap(), 1);
        exercise.octaves = 1;
        let notes = exercise.notes();

        assert_eq!(
            pitches(&notes),
            vec![45, 47, 49, 50, 52, 54, 56, 57, 54, 52, 50, 49, 47, 45]
        );
    }

    #[test]
    fn thirds_follow_the_scale() {
        let exercise = Exercise::new(Scale::parse(MAJOR).unwrap(), 2);
        let notes = exercise.notes();
        let thirds = &pitches(&notes)[28..];

        assert_eq!(
            thirds,
            &[49, 52, 56, 59, 62, 66, 69, 62, 59, 56, 52, 49, 45]
        );
    }

    #[test]
    fn step_zero_covers_every_step_size() {
        let pentatonic = Scale::parse("O.O.O..O.O..").unwrap();
        let all = Exercise::new(pentatonic, 0).notes();
        let four = Exercise::new(pentatonic, 4).notes();
        assert_eq!(all, four);
    }
}
