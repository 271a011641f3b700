//! The [`PositionChoice`] metric adds a preference for the hand position a new chunk starts in.
//!
//! With a known previous position, small moves are preferred (or, under a shift hint, a move of
//! about `nice_shift` frets in the hinted direction). Without one, the hand prefers the middle of
//! the neck.
use fretboard::{fingering::Annotation, HandPosition};

use serde::Deserialize;

#[derive(Clone, Deserialize, Debug)]
#[serde(default)]
pub struct Parameters {
    /// Size of an ideal hinted shift.
    pub nice_shift: HandPosition,
    /// Penalty for staying in the same position although a shift was hinted.
    pub repeat_deter: i32,
    /// Lowest position without a penalty when starting afresh.
    pub preferred_low: HandPosition,
    /// Highest position without a penalty when starting afresh.
    pub preferred_high: HandPosition,
    /// Position a hinted shift is anchored to when starting afresh.
    pub hinted_anchor: HandPosition,
    /// Position a hinted upward shift aims for when starting afresh.
    pub hint_up_ceiling: HandPosition,
    /// Penalty for a one-note chunk when starting afresh.
    pub single_note_penalty: i32,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            nice_shift: 1,
            repeat_deter: 0,
            preferred_low: 5,
            preferred_high: 7,
            hinted_anchor: 7,
            hint_up_ceiling: 24,
            single_note_penalty: 5,
        }
    }
}

#[derive(Clone, Debug)]
pub struct PositionChoice {
    nice_shift: HandPosition,
    repeat_deter: i32,
    preferred_low: HandPosition,
    preferred_high: HandPosition,
    hinted_anchor: HandPosition,
    hint_up_ceiling: HandPosition,
    single_note_penalty: i32,
}

impl Default for PositionChoice {
    fn default() -> Self {
        Self::new(&Parameters::default())
    }
}

impl PositionChoice {
    pub fn new(params: &Parameters) -> Self {
        Self {
            nice_shift: params.nice_shift,
            repeat_deter: params.repeat_deter,
            preferred_low: params.preferred_low,
            preferred_high: params.preferred_high,
            hinted_anchor: params.hinted_anchor,
            hint_up_ceiling: params.hint_up_ceiling,
            single_note_penalty: params.single_note_penalty,
        }
    }

    pub fn name(&self) -> &str {
        "Position Choice"
    }

    /// Cost of moving from the `last` hand position to `candidate`, given the annotation of the
    /// note starting the new chunk.
    pub fn shift_cost(
        &self,
        last: HandPosition,
        candidate: HandPosition,
        annotation: Annotation,
    ) -> i32 {
        let target = if annotation.contains(Annotation::SHIFT_UP) {
            last + self.nice_shift
        } else if annotation.contains(Annotation::SHIFT_DOWN) {
            last - self.nice_shift
        } else {
            return (candidate - last).abs();
        };

        let deter = if candidate == last {
            self.repeat_deter
        } else {
            0
        };

        deter + (candidate - target).abs()
    }

    /// Cost of starting afresh (no previous position or a restart) in `candidate` with a chunk of
    /// `chunk_len` notes.
    pub fn initial_cost(
        &self,
        candidate: HandPosition,
        annotation: Annotation,
        chunk_len: usize,
    ) -> i32 {
        let mut cost = if annotation.contains(Annotation::SHIFT_UP) {
            2 * (self.hint_up_ceiling - candidate) + (candidate - self.hinted_anchor).abs()
        } else if annotation.contains(Annotation::SHIFT_DOWN) {
            candidate
        } else if candidate > self.preferred_high {
            candidate - self.preferred_high
        } else if candidate < self.preferred_low {
            self.preferred_low - candidate
        } else {
            0
        };

        if chunk_len == 1 {
            cost += self.single_note_penalty;
        }

        cost
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unhinted_shift_prefers_small_moves() {
        let choice = PositionChoice::default();
        assert_eq!(choice.shift_cost(5, 5, Annotation::NONE), 0);
        assert_eq!(choice.shift_cost(5, 9, Annotation::NONE), 4);
        assert_eq!(choice.shift_cost(9, 5, Annotation::NONE), 4);
    }

    #[test]
    fn hinted_shift_aims_one_fret_away() {
        let choice = PositionChoice::default();
        assert_eq!(choice.shift_cost(5, 6, Annotation::SHIFT_UP), 0);
        assert_eq!(choice.shift_cost(5, 5, Annotation::SHIFT_UP), 1);
        assert_eq!(choice.shift_cost(5, 4, Annotation::SHIFT_DOWN), 0);
        assert_eq!(choice.shift_cost(5, 8, Annotation::SHIFT_DOWN), 4);
    }

    #[test]
    fn repeat_deterrent_applies_only_under_hints() {
        let params = Parameters {
            repeat_deter: 3,
            ..Parameters::default()
        };
        let choice = PositionChoice::new(&params);
        assert_eq!(choice.shift_cost(5, 5, Annotation::SHIFT_UP), 4);
        assert_eq!(choice.shift_cost(5, 5, Annotation::NONE), 0);
    }

    #[test]
    fn initial_position_window() {
        let choice = PositionChoice::default();
        assert_eq!(choice.initial_cost(5, Annotation::NONE, 3), 0);
        assert_eq!(choice.initial_cost(7, Annotation::NONE, 3), 0);
        assert_eq!(choice.initial_cost(10, Annotation::NONE, 3), 3);
        assert_eq!(choice.initial_cost(2, Annotation::NONE, 3), 3);
        assert_eq!(choice.initial_cost(5, Annotation::NONE, 1), 5);
    }

    #[test]
    fn initial_hinted_position() {
        let choice = PositionChoice::default();
        assert_eq!(choice.initial_cost(12, Annotation::SHIFT_UP, 2), 29);
        assert_eq!(choice.initial_cost(20, Annotation::SHIFT_UP, 2), 21);
        assert_eq!(choice.initial_cost(3, Annotation::SHIFT_DOWN, 2), 3);
        assert_eq!(choice.initial_cost(3, Annotation::SHIFT_DOWN, 1), 8);
    }
}
