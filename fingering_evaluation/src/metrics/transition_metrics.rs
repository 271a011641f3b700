//! The `transition_metrics` module provides a trait for metrics that score the move from one
//! fingering to the next.
use fretboard::{fingering::Fingering, hand_model::HandModel, HandPosition};

use std::fmt;

pub mod finger_moves;
pub mod position_change;

/// The outcome of a transition: the (possibly adjusted and annotated) target fingering and the
/// cost of getting there.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transition {
    pub fingering: Fingering,
    pub cost: i32,
}

/// TransitionMetric is a trait for metrics that evaluate consecutive fingerings.
pub trait TransitionMetric: Send + Sync + fmt::Debug {
    /// Return the name of the metric.
    fn name(&self) -> &str;

    /// Evaluate moving from fingering `from` to fingering `to` while the hand is in `position`.
    ///
    /// The metric may substitute the finger of `to` and adds annotation marks describing the
    /// kind of move.
    fn evaluate(
        &self,
        from: &Fingering,
        to: Fingering,
        position: HandPosition,
        hand: &HandModel,
    ) -> Transition;
}
