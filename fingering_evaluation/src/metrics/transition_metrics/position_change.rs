//! The transition metric [`PositionChange`] scores the way the hand gets into a new position,
//! i.e. the move from the last note of the previous chunk (the lead-in) to the first note of the
//! next one.
//!
//! A slide with the same finger along the same string is the nice way to change position.
//! Changing position by transferring a finger to another string is explicitly discouraged, and a
//! new finger has to move along with the fretboard direction (up the hand means up the neck)
//! without opening the hand too far.
use super::{Transition, TransitionMetric};

use fretboard::{
    fingering::{Annotation, Finger, Fingering},
    hand_model::HandModel,
    HandPosition,
};

use serde::Deserialize;

/// Value of an unset string or fret in the lead-in.
const UNDEFINED: i32 = -1;

#[derive(Clone, Deserialize, Debug)]
#[serde(default)]
pub struct Parameters {
    /// Penalty for an awkward position change.
    pub bad_change: i32,
    /// Additional penalty when the same finger changes string to change position.
    pub discouraged_change: i32,
    /// Maximum widening of the hand (fret distance minus finger distance) on a position change.
    pub max_widening: i32,
    /// Maximum widening when landing on the little finger.
    pub max_little_finger_widening: i32,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            bad_change: 10,
            discouraged_change: 20,
            max_widening: 3,
            max_little_finger_widening: 2,
        }
    }
}

/// Classification of position changes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionChangeType {
    /// Same finger slides along the same string
    Glissando,
    /// Same finger moves to a higher string
    Layover,
    /// Same finger moves to a lower string
    SameFingerBadChange,
    /// A new finger along the neck, but the hand opens too far
    BadStretch,
    /// A new finger on the same string against the neck direction; played as a slide of the
    /// lead-in finger instead
    FingerGlissando,
    /// A new finger on another string against the neck direction
    BadChange,
    /// A new finger along the neck direction
    Allowed,
}

#[derive(Clone, Debug)]
pub struct PositionChange {
    bad_change: i32,
    discouraged_change: i32,
    max_widening: i32,
    max_little_finger_widening: i32,
}

impl PositionChange {
    pub fn new(params: &Parameters) -> Self {
        Self {
            bad_change: params.bad_change,
            discouraged_change: params.discouraged_change,
            max_widening: params.max_widening,
            max_little_finger_widening: params.max_little_finger_widening,
        }
    }

    /// Classify the move from a lead-in fingering to the first fingering of a new chunk.
    ///
    /// Unset parts of the lead-in (a rest has neither string, fret nor finger) count as `-1`.
    /// Returns `None` if `to` has no fretboard position.
    pub fn classify(&self, from: &Fingering, to: &Fingering) -> Option<PositionChangeType> {
        use PositionChangeType::*;

        let to_pos = to.fret_pos()?;
        let to_string = i32::from(to_pos.string);
        let from_string = from.string.map_or(UNDEFINED, i32::from);
        let from_fret = from.fret.unwrap_or(UNDEFINED);

        let class = if to.finger == from.finger {
            if to_string == from_string {
                Glissando
            } else if to_string > from_string {
                Layover
            } else {
                SameFingerBadChange
            }
        } else if to.finger > from.finger {
            // Going up the hand, so we want to be going up the fretboard
            if to_pos.fret > from_fret {
                let widening = (to_pos.fret - from_fret)
                    - (to.finger.numeric_index() - from.finger.numeric_index());
                if widening > self.max_widening
                    || (widening > self.max_little_finger_widening && to.finger == Finger::Little)
                {
                    BadStretch
                } else {
                    Allowed
                }
            } else if to_string == from_string {
                FingerGlissando
            } else {
                BadChange
            }
        } else if to_pos.fret < from_fret {
            Allowed
        } else if to_string == from_string {
            FingerGlissando
        } else {
            BadChange
        };

        Some(class)
    }
}

impl TransitionMetric for PositionChange {
    fn name(&self) -> &str {
        "Position Change"
    }

    fn evaluate(
        &self,
        from: &Fingering,
        mut to: Fingering,
        _position: HandPosition,
        _hand: &HandModel,
    ) -> Transition {
        let mut cost = 0;

        match self.classify(from, &to) {
            Some(PositionChangeType::Glissando) => to.add_annotation(Annotation::GLISSANDO),
            Some(PositionChangeType::Layover) => {
                to.add_annotation(Annotation::LAYOVER);
                cost += self.bad_change + self.discouraged_change;
            }
            Some(PositionChangeType::SameFingerBadChange) => {
                to.add_annotation(Annotation::BAD_CHANGE);
                cost += self.bad_change + self.discouraged_change;
            }
            Some(PositionChangeType::BadStretch) => {
                to.add_annotation(Annotation::BAD_STRETCH);
                cost += self.bad_change;
            }
            Some(PositionChangeType::FingerGlissando) => {
                to.finger = from.finger;
                to.add_annotation(Annotation::GLISSANDO);
            }
            Some(PositionChangeType::BadChange) => {
                to.add_annotation(Annotation::BAD_CHANGE);
                cost += self.bad_change;
            }
            Some(PositionChangeType::Allowed) | None => {}
        }

        log::trace!(
            "{}: {:?} -> {:?}, cost {}",
            self.name(),
            from.fret_pos(),
            to.fret_pos(),
            cost
        );

        Transition { fingering: to, cost }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fretboard::fingering::FretPos;

    fn at(string: u8, fret: i32, finger: Finger) -> Fingering {
        Fingering::new(FretPos::new(string, fret), finger)
    }

    fn evaluate(from: Fingering, to: Fingering) -> Transition {
        PositionChange::new(&Parameters::default()).evaluate(&from, to, 1, &HandModel::default())
    }

    #[test]
    fn slide_on_same_finger_and_string_is_free() {
        let t = evaluate(at(2, 5, Finger::Ring), at(2, 9, Finger::Ring));
        assert_eq!(t.cost, 0);
        assert!(t.fingering.has_annotation(Annotation::GLISSANDO));
    }

    #[test]
    fn same_finger_string_change_is_discouraged() {
        let up = evaluate(at(2, 5, Finger::Index), at(3, 9, Finger::Index));
        assert_eq!(up.cost, 30);
        assert!(up.fingering.has_annotation(Annotation::LAYOVER));

        let down = evaluate(at(3, 5, Finger::Index), at(2, 9, Finger::Index));
        assert_eq!(down.cost, 30);
        assert!(down.fingering.has_annotation(Annotation::BAD_CHANGE));
    }

    #[test]
    fn new_finger_up_the_neck() {
        let ok = evaluate(at(1, 5, Finger::Index), at(2, 8, Finger::Little));
        assert_eq!(ok.cost, 0);
        assert!(ok.fingering.annotation.is_empty());

        // widening 6 - 1 = 5
        let wide = evaluate(at(1, 5, Finger::Index), at(2, 11, Finger::Middle));
        assert_eq!(wide.cost, 10);
        assert!(wide.fingering.has_annotation(Annotation::BAD_STRETCH));

        // widening 6 - 3 = 3 is fine for the ring finger but not for the little finger
        let little = evaluate(at(1, 5, Finger::Index), at(1, 11, Finger::Little));
        assert_eq!(little.cost, 10);
        let ring = evaluate(at(1, 5, Finger::Middle), at(1, 11, Finger::Little));
        assert_eq!(ring.cost, 0);
    }

    #[test]
    fn new_finger_against_the_neck() {
        let same_string = evaluate(at(1, 7, Finger::Index), at(1, 5, Finger::Ring));
        assert_eq!(same_string.cost, 0);
        assert_eq!(same_string.fingering.finger, Finger::Index);
        assert!(same_string.fingering.has_annotation(Annotation::GLISSANDO));

        let other_string = evaluate(at(1, 7, Finger::Index), at(2, 5, Finger::Ring));
        assert_eq!(other_string.cost, 10);
        assert!(other_string.fingering.has_annotation(Annotation::BAD_CHANGE));
    }

    #[test]
    fn finger_down_the_hand() {
        let down_the_neck = evaluate(at(1, 9, Finger::Little), at(2, 3, Finger::Index));
        assert_eq!(down_the_neck.cost, 0);

        let up_the_neck = evaluate(at(1, 3, Finger::Little), at(2, 9, Finger::Index));
        assert_eq!(up_the_neck.cost, 10);
    }

    #[test]
    fn rest_lead_in_counts_from_below_the_nut() {
        let low = evaluate(Fingering::default(), at(2, 3, Finger::Index));
        assert_eq!(low.cost, 0);
        assert!(low.fingering.annotation.is_empty());

        // widening (9 + 1) - (1 + 1) = 8
        let high = evaluate(Fingering::default(), at(2, 9, Finger::Index));
        assert_eq!(high.cost, 10);
        assert!(high.fingering.has_annotation(Annotation::BAD_STRETCH));

        let little = evaluate(Fingering::default(), at(4, 7, Finger::Little));
        assert_eq!(little.cost, 10);
        let little_low = evaluate(Fingering::default(), at(4, 6, Finger::Little));
        assert_eq!(little_low.cost, 0);
    }

    #[test]
    fn parameters_from_yaml() {
        let params: Parameters = serde_yaml::from_str("bad_change: 7").unwrap();
        assert_eq!(params.bad_change, 7);
        assert_eq!(params.discouraged_change, 20);
    }
}
