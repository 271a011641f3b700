//! Models of the capabilities of the fretting hand (note span, reachable positions and the
//! intrinsic effort of a fingering).
//!
//! All models share a natural span of four frets, one finger per fret. The extended models allow
//! the index finger to reach one fret below the position (ExtendedLow) and additionally the little
//! finger to reach one fret above the span (ExtendedBoth). Such reaches are stretches.

use crate::{
    fingering::{Finger, Fingering},
    FretNum, HandPosition,
};

use serde::{Deserialize, Serialize};

/// The available hand models.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HandModelKind {
    /// One finger per fret, no extensions.
    #[default]
    Standard,
    /// Allows index finger extensions below the position.
    ExtendedLow,
    /// Allows index finger extensions below and little finger extensions above the position.
    ExtendedBoth,
}

/// Penalties for the intrinsic effort of a fingering.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct HandPenalties {
    /// Taking a note on the little finger. Small, so that it only acts as a tiebreaker.
    pub little_finger: i32,
    /// Little finger extension, on top of `little_finger`.
    pub little_finger_stretch: i32,
    /// Any other finger used under a stretch.
    pub stretch: i32,
}

impl Default for HandPenalties {
    fn default() -> Self {
        Self {
            little_finger: 1,
            little_finger_stretch: 1,
            stretch: 1,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HandModel {
    kind: HandModelKind,
    penalties: HandPenalties,
}

impl HandModel {
    pub fn new(kind: HandModelKind, penalties: HandPenalties) -> Self {
        Self { kind, penalties }
    }

    pub fn kind(&self) -> HandModelKind {
        self.kind
    }

    /// Hand positions under whose reach the given fret falls, nearest first.
    pub fn candidates(&self, fret: FretNum) -> Vec<HandPosition> {
        let (first, count) = match self.kind {
            HandModelKind::Standard => (fret, 4),
            HandModelKind::ExtendedLow => (fret + 1, 5),
            HandModelKind::ExtendedBoth => (fret + 1, 6),
        };

        (0..count)
            .map(|i| first - i)
            .take_while(|&position| position > 0)
            .collect()
    }

    /// The finger covering `fret` in the given position.
    ///
    /// Each fret is covered by exactly one finger. Frets outside the reach of the hand yield
    /// [`Finger::Unset`].
    pub fn finger_for(&self, fret: FretNum, position: HandPosition) -> Finger {
        let offset = fret - position;
        match (self.kind, offset) {
            (_, 0) => Finger::Index,
            (_, 1) => Finger::Middle,
            (_, 2) => Finger::Ring,
            (_, 3) => Finger::Little,
            (HandModelKind::ExtendedLow, -1) | (HandModelKind::ExtendedBoth, -1) => Finger::Index,
            (HandModelKind::ExtendedBoth, 4) => Finger::Little,
            _ => {
                log::debug!(
                    "Position breakdown: fret {} in position {} (offset {})",
                    fret,
                    position,
                    offset
                );
                Finger::Unset
            }
        }
    }

    /// Does reaching `fret` from the given position involve a stretch?
    pub fn is_stretch(&self, fret: FretNum, position: HandPosition) -> bool {
        !(0..=3).contains(&(fret - position))
    }

    /// Intrinsic effort of a fingering in the given position.
    pub fn cost(&self, fingering: &Fingering, position: HandPosition) -> i32 {
        let stretch = fingering
            .fret
            .map_or(false, |fret| self.is_stretch(fret, position));

        let mut cost = 0;
        if fingering.finger == Finger::Little {
            cost += self.penalties.little_finger;
            if stretch {
                cost += self.penalties.little_finger_stretch;
            }
        } else if stretch {
            cost += self.penalties.stretch;
        }

        cost
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fingering::FretPos;

    fn model(kind: HandModelKind) -> HandModel {
        HandModel::new(kind, HandPenalties::default())
    }

    #[test]
    fn candidate_positions_per_model() {
        assert_eq!(model(HandModelKind::Standard).candidates(7), vec![7, 6, 5, 4]);
        assert_eq!(model(HandModelKind::ExtendedLow).candidates(7), vec![8, 7, 6, 5, 4]);
        assert_eq!(
            model(HandModelKind::ExtendedBoth).candidates(7),
            vec![8, 7, 6, 5, 4, 3]
        );
    }

    #[test]
    fn candidate_positions_stop_at_the_nut() {
        assert_eq!(model(HandModelKind::Standard).candidates(2), vec![2, 1]);
        assert_eq!(model(HandModelKind::ExtendedBoth).candidates(1), vec![2, 1]);
    }

    #[test]
    fn standard_fingers_one_per_fret() {
        let hand = model(HandModelKind::Standard);
        assert_eq!(hand.finger_for(5, 5), Finger::Index);
        assert_eq!(hand.finger_for(6, 5), Finger::Middle);
        assert_eq!(hand.finger_for(7, 5), Finger::Ring);
        assert_eq!(hand.finger_for(8, 5), Finger::Little);
        assert_eq!(hand.finger_for(4, 5), Finger::Unset);
        assert_eq!(hand.finger_for(9, 5), Finger::Unset);
    }

    #[test]
    fn extended_fingers() {
        let low = model(HandModelKind::ExtendedLow);
        assert_eq!(low.finger_for(4, 5), Finger::Index);
        assert_eq!(low.finger_for(9, 5), Finger::Unset);

        let both = model(HandModelKind::ExtendedBoth);
        assert_eq!(both.finger_for(4, 5), Finger::Index);
        assert_eq!(both.finger_for(9, 5), Finger::Little);
        assert_eq!(both.finger_for(10, 5), Finger::Unset);
    }

    #[test]
    fn every_candidate_position_yields_a_finger() {
        for kind in [
            HandModelKind::Standard,
            HandModelKind::ExtendedLow,
            HandModelKind::ExtendedBoth,
        ]
        .iter()
        {
            let hand = model(*kind);
            for fret in 1..20 {
                for position in hand.candidates(fret) {
                    assert!(hand.finger_for(fret, position).is_set(), "{:?}", kind);
                }
            }
        }
    }

    #[test]
    fn standard_stretch_is_exactly_outside_span() {
        let hand = model(HandModelKind::Standard);
        for offset in -3..8 {
            assert_eq!(hand.is_stretch(10 + offset, 10), !(0..=3).contains(&offset));
        }
    }

    #[test]
    fn extended_reaches_are_stretches() {
        let both = model(HandModelKind::ExtendedBoth);
        assert!(both.is_stretch(4, 5));
        assert!(both.is_stretch(9, 5));
        assert!(!both.is_stretch(8, 5));
    }

    #[test]
    fn intrinsic_cost() {
        let hand = model(HandModelKind::ExtendedBoth);
        let at = |fret, finger| Fingering::new(FretPos::new(1, fret), finger);

        assert_eq!(hand.cost(&at(5, Finger::Index), 5), 0);
        assert_eq!(hand.cost(&at(8, Finger::Little), 5), 1);
        assert_eq!(hand.cost(&at(9, Finger::Little), 5), 2);
        assert_eq!(hand.cost(&at(4, Finger::Index), 5), 1);
    }
}
