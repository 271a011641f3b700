//! The transition metric [`FingerMoves`] scores the move between two consecutive notes played
//! in the same hand position.
//!
//! Besides the intrinsic cost of the new fingering (see [`HandModel::cost`]), it penalizes string
//! changes and the named finger transfer patterns:
//! - *Q-shift*: the same finger would have to cross to a lower string, so the next finger of
//!   the hand takes the note instead.
//! - *T-move*: the same finger transfers to a lower string.
//! - *Layover*: the same finger bars across to a higher string on the same fret.
//! - *O-move*: the same finger transfers to a higher string on another fret.
//! - *A-move*: the same finger moves along its string without a slur.
use super::{Transition, TransitionMetric};

use fretboard::{
    fingering::{Annotation, Finger, Fingering},
    hand_model::HandModel,
    HandPosition,
};

use serde::Deserialize;

#[derive(Clone, Deserialize, Debug)]
#[serde(default)]
pub struct Parameters {
    pub string_change: i32,
    pub q_shift: i32,
    pub t_move: i32,
    pub layover: i32,
    pub o_move: i32,
    pub a_move: i32,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            string_change: 1,
            q_shift: 5,
            t_move: 10,
            layover: 2,
            o_move: 10,
            a_move: 10,
        }
    }
}

/// Classification of same-finger transfers between consecutive notes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FingerMoveType {
    /// Same finger, lower string
    TMove,
    /// Same finger and fret, higher string
    Layover,
    /// Same finger, higher string, different fret
    OMove,
    /// Same finger and string, different fret
    AMove,
    /// String change with a different finger
    StringChange,
}

/// Classify the move from fingering `from` to fingering `to`.
///
/// Returns `None` if the move involves neither a string change nor a same-finger transfer.
#[inline]
pub fn classify_finger_move(from: &Fingering, to: &Fingering) -> Option<FingerMoveType> {
    use FingerMoveType::*;

    let same_finger = to.finger == from.finger;
    if to.string != from.string {
        if !same_finger {
            Some(StringChange)
        } else if to.string < from.string {
            Some(TMove)
        } else if to.fret == from.fret {
            Some(Layover)
        } else {
            Some(OMove)
        }
    } else if same_finger && to.fret != from.fret {
        Some(AMove)
    } else {
        None
    }
}

/// The finger taking over a note under a Q-shift.
///
/// The cycle is deliberately not symmetric: the little finger hands over to the ring finger.
pub fn q_shift_substitute(finger: Finger) -> Finger {
    match finger {
        Finger::Index => Finger::Middle,
        Finger::Middle => Finger::Ring,
        Finger::Ring => Finger::Little,
        Finger::Little => Finger::Ring,
        other => other,
    }
}

#[derive(Clone, Debug)]
pub struct FingerMoves {
    string_change: i32,
    q_shift: i32,
    t_move: i32,
    layover: i32,
    o_move: i32,
    a_move: i32,
}

impl FingerMoves {
    pub fn new(params: &Parameters) -> Self {
        Self {
            string_change: params.string_change,
            q_shift: params.q_shift,
            t_move: params.t_move,
            layover: params.layover,
            o_move: params.o_move,
            a_move: params.a_move,
        }
    }
}

impl TransitionMetric for FingerMoves {
    fn name(&self) -> &str {
        "Finger Moves"
    }

    fn evaluate(
        &self,
        from: &Fingering,
        mut to: Fingering,
        position: HandPosition,
        hand: &HandModel,
    ) -> Transition {
        let mut cost = 0;
        let stretch = to.fret.map_or(false, |fret| hand.is_stretch(fret, position));

        if to.finger == from.finger && to.string < from.string && !stretch {
            to.add_annotation(Annotation::Q_SHIFT);
            to.finger = q_shift_substitute(to.finger);
            cost += self.q_shift;
        }

        cost += hand.cost(&to, position);
        if stretch {
            to.add_annotation(Annotation::STRETCH);
        }

        if let Some(move_type) = classify_finger_move(from, &to) {
            if to.string != from.string {
                cost += self.string_change;
            }
            match move_type {
                FingerMoveType::TMove => {
                    to.add_annotation(Annotation::T_MOVE);
                    cost += self.t_move;
                }
                FingerMoveType::Layover => {
                    to.add_annotation(Annotation::LAYOVER);
                    cost += self.layover;
                }
                FingerMoveType::OMove => {
                    to.add_annotation(Annotation::O_MOVE);
                    cost += self.o_move;
                }
                FingerMoveType::AMove => {
                    to.add_annotation(Annotation::A_MOVE);
                    cost += self.a_move;
                }
                FingerMoveType::StringChange => {}
            }
        }

        Transition { fingering: to, cost }
    }
}
