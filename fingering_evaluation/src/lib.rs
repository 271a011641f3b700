//! The `fingering_evaluation` crate holds the cost model of the fingering search.
//!
//! Each metric is configured by a deserializable `Parameters` struct (with defaults matching the
//! shipped cost model) and answers one question: how awkward is it to move from one fingering to
//! the next, which hand position should a new chunk start in, or (informational only) what does
//! a finished fingering look like.

pub mod metrics;
