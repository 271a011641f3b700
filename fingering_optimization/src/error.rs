use fretboard::{NoteNum, StringNum};
use thiserror::Error;

/// Conditions that abort [`crate::engine::Engine::compute`] without output.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("the engine has no {0} set")]
    NotConfigured(&'static str),

    #[error("note {index} (pitch {pitch}) cannot be played on this instrument")]
    NoCandidatePosition { index: usize, pitch: NoteNum },

    #[error("note {index} (pitch {pitch}) cannot be played on the requested string {string}")]
    NoCandidateOnString {
        index: usize,
        pitch: NoteNum,
        string: StringNum,
    },
}
