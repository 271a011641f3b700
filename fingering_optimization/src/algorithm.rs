//! Chunk generation strategies.
//!
//! An algorithm takes a starting note, a hand position and a fretboard position and greedily
//! extends a [`Chunk`] as far as it sensibly can without leaving that hand position.

use crate::chunk::Chunk;

use fretboard::{
    fingering::{Finger, FretPos},
    hand_model::HandModel,
    instrument::Instrument,
    note::Note,
    HandPosition,
};

pub mod cost_search;

/// Everything a chunk generator needs to know about where a chunk starts.
#[derive(Clone, Copy, Debug)]
pub struct ChunkRequest<'a> {
    /// The note sequence (without end-of-sequence sentinel).
    pub notes: &'a [Note],
    /// Index of the first note of the chunk.
    pub start: usize,
    pub hand_position: HandPosition,
    pub fret_pos: FretPos,
    /// Finger the first note must be played with, if any.
    pub forced_finger: Finger,
    /// The note played right before the chunk, if the hand comes from one.
    pub lead_in: Option<&'a Note>,
}

/// The available chunk generators.
#[derive(Clone, Debug)]
pub enum Algorithm {
    CostSearch(cost_search::CostSearch),
}

impl Algorithm {
    pub fn name(&self) -> &str {
        match self {
            Algorithm::CostSearch(_) => "Cost Search",
        }
    }

    pub fn hand_model(&self) -> &HandModel {
        match self {
            Algorithm::CostSearch(search) => search.hand_model(),
        }
    }

    /// Hand positions from which a fretboard position can be reached.
    pub fn hand_positions(&self, pos: FretPos) -> Vec<HandPosition> {
        self.hand_model().candidates(pos.fret)
    }

    pub fn generate_chunk(&self, instrument: &Instrument, request: &ChunkRequest) -> Chunk {
        match self {
            Algorithm::CostSearch(search) => search.generate_chunk(instrument, request),
        }
    }
}

impl From<cost_search::CostSearch> for Algorithm {
    fn from(search: cost_search::CostSearch) -> Self {
        Algorithm::CostSearch(search)
    }
}
