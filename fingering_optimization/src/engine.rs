//! The multi-pass fingering engine.
//!
//! A pass walks the note sequence chunk by chunk: for every note starting a chunk it asks the
//! algorithm for the best chunk rooted at each reachable (fretboard position, hand position)
//! pair, adds a preference for the hand position and keeps the cheapest. If a resulting
//! position shift is too large, the pass decides on a corrective hint (see [`crate::auto_hint`])
//! and the engine runs another pass with that hint in place. This repeats until a pass needs no
//! further hint or the pass budget is used up.

use crate::{
    algorithm::{Algorithm, ChunkRequest},
    auto_hint::{self, AutoHints, HintPlacement, GIVE_UP_SIZE},
    chunk::Chunk,
    constraints::Constraints,
    error::EngineError,
};

use fingering_evaluation::metrics::position_choice::PositionChoice;
use fretboard::{
    fingering::{Finger, FretPos},
    instrument::Instrument,
    note::Note,
    HandPosition,
};

/// Largest position shift (in frets) accepted without trying to hint it away.
pub const DEFAULT_MAX_SHIFT: i32 = 3;

/// Where a chunk is to start and what the hand brings into it.
struct ChunkStart<'a> {
    notes: &'a [Note],
    index: usize,
    /// Fretboard positions the first note may be played at.
    starts: &'a [FretPos],
    forced_finger: Finger,
    lead_in: Option<&'a Note>,
    last_position: Option<HandPosition>,
}

/// Result of a single pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PassOutcome {
    pub notes: Vec<Note>,
    /// The hint decided during the pass, if a shift was excessive and a location was found.
    pub hint: Option<HintPlacement>,
}

#[derive(Clone, Debug)]
pub struct Engine {
    instrument: Option<Instrument>,
    algorithm: Option<Algorithm>,
    constraints: Option<Constraints>,
    position_choice: PositionChoice,
    max_shift: i32,
    output: Vec<Note>,
    passes: usize,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    pub fn new() -> Self {
        Self {
            instrument: None,
            algorithm: None,
            constraints: None,
            position_choice: PositionChoice::default(),
            max_shift: DEFAULT_MAX_SHIFT,
            output: Vec::new(),
            passes: 0,
        }
    }

    pub fn set_instrument(&mut self, instrument: Instrument) {
        self.instrument = Some(instrument);
    }

    pub fn set_algorithm(&mut self, algorithm: Algorithm) {
        self.algorithm = Some(algorithm);
    }

    pub fn set_constraints(&mut self, constraints: Constraints) {
        self.constraints = Some(constraints);
    }

    pub fn set_max_shift(&mut self, max_shift: i32) {
        self.max_shift = max_shift;
    }

    pub fn set_position_choice(&mut self, position_choice: PositionChoice) {
        self.position_choice = position_choice;
    }

    pub fn instrument(&self) -> Option<&Instrument> {
        self.instrument.as_ref()
    }

    /// The fingered notes of the last successful [`Engine::compute`].
    pub fn output(&self) -> &[Note] {
        &self.output
    }

    /// Number of passes run by the last successful [`Engine::compute`].
    pub fn passes(&self) -> usize {
        self.passes
    }

    /// Finger `source`, running at most `max_pass` passes (but always at least one).
    ///
    /// The sequence ends at its first end-of-sequence note, if any. The caller's notes are never
    /// modified; explicit strings, fingers and hints on them are honoured.
    pub fn compute(&mut self, source: &[Note], max_pass: usize) -> Result<&[Note], EngineError> {
        self.collaborators()?;

        let end = source
            .iter()
            .position(Note::is_end_of_sequence)
            .unwrap_or_else(|| source.len());
        let source = &source[..end];

        let mut hints = AutoHints::default();
        let mut passes = 0;
        let output = loop {
            passes += 1;
            let last_pass = passes >= max_pass;
            let notes = hints.apply(source);
            let outcome = self.pass(&notes, !last_pass, passes)?;

            match outcome.hint {
                Some(placement) if !last_pass => hints.insert(placement, source),
                _ => break outcome.notes,
            }
        };

        log::info!(
            "Fingered {} notes in {} passes ({} auto-hints)",
            output.len(),
            passes,
            hints.len()
        );

        self.output = output;
        self.passes = passes;
        Ok(&self.output)
    }

    /// Run a single pass over `notes` (without end-of-sequence note) as they are.
    pub fn run_pass(&self, notes: &[Note]) -> Result<PassOutcome, EngineError> {
        self.pass(notes, false, 1)
    }

    fn collaborators(&self) -> Result<(&Instrument, &Algorithm, &Constraints), EngineError> {
        let instrument = self
            .instrument
            .as_ref()
            .ok_or(EngineError::NotConfigured("instrument"))?;
        let algorithm = self
            .algorithm
            .as_ref()
            .ok_or(EngineError::NotConfigured("algorithm"))?;
        let constraints = self
            .constraints
            .as_ref()
            .ok_or(EngineError::NotConfigured("constraints"))?;

        Ok((instrument, algorithm, constraints))
    }

    /// One pass. With `stop_at_restart`, the pass ends at the first restart hint after a hint
    /// has been decided: the notes following it are redone by the next pass anyway.
    fn pass(
        &self,
        notes: &[Note],
        stop_at_restart: bool,
        pass_num: usize,
    ) -> Result<PassOutcome, EngineError> {
        let (instrument, algorithm, constraints) = self.collaborators()?;

        let mut output: Vec<Note> = Vec::with_capacity(notes.len());
        let mut progress = String::new();

        // Rests of a pick-up bar
        let mut index = 0;
        while index < notes.len() && notes[index].is_rest() {
            output.push(Note::rest(notes[index].duration));
            index += 1;
        }

        let mut cursor = index;
        let mut last_position: Option<HandPosition> = None;
        let mut hint: Option<HintPlacement> = None;

        while index < notes.len() {
            let note = &notes[index];
            if note.is_rest() {
                output.push(Note::rest(note.duration));
                index += 1;
                continue;
            }

            let candidates = instrument.candidates(note.pitch);
            if candidates.is_empty() {
                return Err(EngineError::NoCandidatePosition {
                    index,
                    pitch: note.pitch,
                });
            }

            let mut forced = note.fingering;
            let mut lead_in = if index > 0 { output.last().cloned() } else { None };
            if let Some(lead) = lead_in.as_ref() {
                if note.has_glissando_hint() {
                    forced.finger = lead.finger();
                    forced.string = lead.string();
                }
            }
            if note.has_restart_hint() {
                lead_in = None;
            }

            let starts: Vec<FretPos> = candidates
                .into_iter()
                .filter(|pos| forced.string.map_or(true, |s| s == pos.string))
                .collect();
            if starts.is_empty() {
                return Err(match forced.string {
                    Some(string) => EngineError::NoCandidateOnString {
                        index,
                        pitch: note.pitch,
                        string,
                    },
                    None => EngineError::NoCandidatePosition {
                        index,
                        pitch: note.pitch,
                    },
                });
            }

            let select = |forced_finger: Finger| {
                let start = ChunkStart {
                    notes,
                    index,
                    starts: &starts,
                    forced_finger,
                    lead_in: lead_in.as_ref(),
                    last_position,
                };
                self.best_chunk(instrument, algorithm, &start)
            };
            let mut chunk = select(forced.finger);
            if chunk.is_empty() {
                log::warn!(
                    "Note {} ({}) cannot be played with finger {}, ignoring the finger",
                    index,
                    note.pitch_name(),
                    forced.finger
                );
                chunk = select(Finger::Unset);
            }
            if chunk.is_empty() {
                return Err(EngineError::NoCandidatePosition {
                    index,
                    pitch: note.pitch,
                });
            }

            chunk.attach_fret_diagram(instrument.num_strings());

            let position = chunk.position();
            if note.has_restart_hint() {
                progress.push(' ');
            }
            progress.push_str(&format!("[{}]", position));

            if let (None, Some(last)) = (hint, last_position) {
                if last != position {
                    let diff = (last - position).abs();
                    let excessive = (diff > self.max_shift && !note.has_restart_hint())
                        || (!constraints.back_to_back_glissando
                            && chunk.len() == 1
                            && !note.has_glissando_hint());

                    if excessive {
                        progress.push_str(&format!("<{}>", diff));
                        hint = auto_hint::decide(notes, cursor, index, last, position);
                        match hint {
                            Some(placement) => {
                                progress.push_str(&format!(
                                    "{}@{}",
                                    placement.kind, placement.location
                                ));
                            }
                            None => progress.push('!'),
                        }
                    }
                }
            }

            match last_position {
                Some(last) if last != position => {
                    last_position = Some(position);
                    chunk.tag_position_shift();
                }
                Some(_) => {}
                None => last_position = Some(position),
            }

            if note.has_break_hint() || chunk.len() > GIVE_UP_SIZE {
                cursor = index;
            }

            index += chunk.len();
            output.extend(chunk.into_notes());

            if stop_at_restart
                && hint.is_some()
                && notes.get(index).map_or(false, Note::has_restart_hint)
            {
                break;
            }
        }

        log::info!("Pass {} ({}): {}", pass_num, algorithm.name(), progress);

        Ok(PassOutcome {
            notes: output,
            hint,
        })
    }

    /// The cheapest chunk starting at `start.index`, position preference included.
    ///
    /// Ties go to the longer chunk, then to the first one found. An empty chunk means no start
    /// could honour the forced finger.
    fn best_chunk(
        &self,
        instrument: &Instrument,
        algorithm: &Algorithm,
        start: &ChunkStart,
    ) -> Chunk {
        let note = &start.notes[start.index];
        let mut best: Option<Chunk> = None;

        for fret_pos in start.starts.iter() {
            for hand_position in algorithm.hand_positions(*fret_pos) {
                let request = ChunkRequest {
                    notes: start.notes,
                    start: start.index,
                    hand_position,
                    fret_pos: *fret_pos,
                    forced_finger: start.forced_finger,
                    lead_in: start.lead_in,
                };
                let mut chunk = algorithm.generate_chunk(instrument, &request);

                let position_cost = match (start.last_position, start.lead_in) {
                    (Some(last), Some(_)) => {
                        self.position_choice
                            .shift_cost(last, hand_position, note.annotation())
                    }
                    _ => self.position_choice.initial_cost(
                        hand_position,
                        note.annotation(),
                        chunk.len(),
                    ),
                };
                chunk.add_cost(position_cost);

                log::trace!(
                    "Chunk at {:?} in position {}: {} notes, cost {}",
                    fret_pos,
                    hand_position,
                    chunk.len(),
                    chunk.cost()
                );

                let better = best.as_ref().map_or(true, |b| {
                    chunk.cost() < b.cost() || (chunk.cost() == b.cost() && chunk.len() > b.len())
                });
                if better {
                    best = Some(chunk);
                }
            }
        }

        let best = best.unwrap_or_else(|| Chunk::new(0));
        log::debug!(
            "Note {}: best chunk in position {} with {} notes, cost {}",
            start.index,
            best.position(),
            best.len(),
            best.cost()
        );

        best
    }
}
