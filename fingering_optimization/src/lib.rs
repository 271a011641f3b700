//! The `fingering_optimization` crate assigns fingerings to note sequences.
//!
//! An [`engine::Engine`] is configured with an instrument, an [`algorithm::Algorithm`] (bound to
//! a hand model) and [`constraints::Constraints`], and then fingers whole note sequences in one
//! or more passes.

pub mod algorithm;
pub mod auto_hint;
pub mod chunk;
pub mod constraints;
pub mod engine;
pub mod error;

pub use engine::Engine;
pub use error::EngineError;
