//! The `fretboard` crate describes a fretted string instrument and the left hand playing it.
//!
//! It provides the note and fingering data types exchanged between the input adapters, the
//! optimization engine and the output renderers, the geometry of an instrument (which string and
//! fret produce a given pitch) and the capability models of the fretting hand.

pub mod fingering;
pub mod hand_model;
pub mod instrument;
pub mod note;

/// MIDI note number. `0` is a rest, [`note::END_OF_SEQUENCE`] terminates a note sequence.
pub type NoteNum = i32;

/// Fret number (`0` = open string).
pub type FretNum = i32;

/// String number, counting from `1` for the lowest-pitched string.
pub type StringNum = u8;

/// A left-hand position.
///
/// Traditionally this is the fret of the index finger. Hand models with a roaming index finger
/// define it as the fret just before the one covered by the middle finger.
pub type HandPosition = i32;
