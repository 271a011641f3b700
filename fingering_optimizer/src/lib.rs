//! Front-end of the fingering optimizer: configuration files, the note-file reader, the MIGT
//! exercise generator and the output renderers used by the `fing` binary.

pub mod config;
pub mod migt;
pub mod note_reader;
pub mod render;
