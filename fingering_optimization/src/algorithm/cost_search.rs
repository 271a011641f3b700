//! The default chunk generator: a greedy search over a hand-crafted cost model.
//!
//! The first note is placed as requested and charged for the way the hand gets there from the
//! lead-in note. Every following note is placed on the cheapest fingering reachable from the
//! same hand position. Each added note earns a bonus, so staying in position pays off until a
//! single note becomes too expensive.

use super::ChunkRequest;
use crate::chunk::Chunk;

use fingering_evaluation::metrics::transition_metrics::{
    finger_moves::{self, FingerMoves},
    position_change::{self, PositionChange},
    TransitionMetric,
};
use fretboard::{
    fingering::{Annotation, Finger, Fingering},
    hand_model::HandModel,
    instrument::Instrument,
    note::Note,
    HandPosition,
};

use serde::Deserialize;

#[derive(Clone, Deserialize, Debug)]
#[serde(default)]
pub struct Parameters {
    /// Added for every note after the first. Must outweigh the typical cost of a note.
    pub note_bonus: i32,
    /// A note costing more than this ends the chunk.
    pub break_threshold: i32,
    /// Cost of a chunk that cannot honour a forced first finger.
    pub unusable_cost: i32,
    pub position_change: position_change::Parameters,
    pub finger_moves: finger_moves::Parameters,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            note_bonus: -5,
            break_threshold: 15,
            unusable_cost: 100_000,
            position_change: position_change::Parameters::default(),
            finger_moves: finger_moves::Parameters::default(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct CostSearch {
    hand: HandModel,
    position_change: PositionChange,
    finger_moves: FingerMoves,
    note_bonus: i32,
    break_threshold: i32,
    unusable_cost: i32,
}

impl CostSearch {
    pub fn new(hand: HandModel, params: &Parameters) -> Self {
        Self {
            hand,
            position_change: PositionChange::new(&params.position_change),
            finger_moves: FingerMoves::new(&params.finger_moves),
            note_bonus: params.note_bonus,
            break_threshold: params.break_threshold,
            unusable_cost: params.unusable_cost,
        }
    }

    pub fn hand_model(&self) -> &HandModel {
        &self.hand
    }

    pub fn generate_chunk(&self, instrument: &Instrument, request: &ChunkRequest) -> Chunk {
        let position = request.hand_position;
        let mut chunk = Chunk::new(position);

        let first = &request.notes[request.start];
        let finger = self.hand.finger_for(request.fret_pos.fret, position);
        if !finger.is_set()
            || (request.forced_finger.is_set() && request.forced_finger != finger)
        {
            chunk.add_cost(self.unusable_cost);
            return chunk;
        }

        let mut note = Note::with_duration(first.pitch, first.duration);
        note.fingering = Fingering::new(request.fret_pos, finger);
        note.add_annotation(first.annotation());

        chunk.add_cost(self.hand.cost(&note.fingering, position));
        if self.hand.is_stretch(request.fret_pos.fret, position) {
            note.add_annotation(Annotation::STRETCH);
        }

        if let Some(lead_in) = request.lead_in {
            let transition =
                self.position_change
                    .evaluate(&lead_in.fingering, note.fingering, position, &self.hand);
            note.fingering = transition.fingering;
            chunk.add_cost(transition.cost);
        }

        let mut current = note.fingering;
        chunk.push(note);

        for (index, next) in request.notes.iter().enumerate().skip(request.start + 1) {
            if next.is_end_of_sequence() {
                break;
            }
            if next.is_rest() {
                chunk.push(Note::rest(next.duration));
                continue;
            }
            if next.has_break_hint() {
                log::debug!(
                    "Break hint at note {} after {} notes with cost {}",
                    index,
                    chunk.len(),
                    chunk.cost()
                );
                return chunk;
            }

            let mut forced = next.fingering;
            if next.has_glissando_hint() {
                forced.finger = current.finger;
                forced.string = current.string;
            }

            let best = self.cheapest_fingering(instrument, next, &forced, &current, position);
            match best {
                Some((fingering, cost)) if cost <= self.break_threshold => {
                    log::trace!("Note {} at {:?} costs {}", index, fingering, cost);
                    let mut note = Note::with_duration(next.pitch, next.duration);
                    note.fingering = fingering;
                    note.add_annotation(next.annotation());
                    chunk.push(note);
                    chunk.add_cost(cost + self.note_bonus);
                    current = fingering;
                }
                Some((_, cost)) => {
                    log::debug!(
                        "Note {} would cost {}, breaking position {} after {} notes",
                        index,
                        cost,
                        position,
                        chunk.len()
                    );
                    return chunk;
                }
                None => {
                    log::debug!(
                        "Note {} out of reach, breaking position {} after {} notes",
                        index,
                        position,
                        chunk.len()
                    );
                    return chunk;
                }
            }
        }

        chunk
    }

    /// The cheapest fingering of `note` in the given hand position, coming from `current`.
    fn cheapest_fingering(
        &self,
        instrument: &Instrument,
        note: &Note,
        forced: &Fingering,
        current: &Fingering,
        position: HandPosition,
    ) -> Option<(Fingering, i32)> {
        let mut best: Option<(Fingering, i32)> = None;

        for pos in instrument.candidates(note.pitch) {
            if forced.string.map_or(false, |s| s != pos.string) {
                continue;
            }
            if !self.hand.candidates(pos.fret).contains(&position) {
                continue;
            }

            // A repeated note keeps its finger, even a substituted one.
            let finger = if current.fret_pos() == Some(pos) {
                current.finger
            } else {
                self.hand.finger_for(pos.fret, position)
            };
            if forced.finger.is_set() && forced.finger != finger {
                continue;
            }
            if finger == Finger::Unset {
                continue;
            }

            let transition = self.finger_moves.evaluate(
                current,
                Fingering::new(pos, finger),
                position,
                &self.hand,
            );
            if best.map_or(true, |(_, cost)| transition.cost < cost) {
                best = Some((transition.fingering, transition.cost));
            }
        }

        best
    }
}
