//! The `metrics` module provides the transition metrics, the position choice metric and the
//! fingering statistics.

pub mod fingering_stats;
pub mod format_utils;
pub mod position_choice;
pub mod transition_metrics;

/// Helper function to convert a count to a percentage of a total
///
/// This is used by the statistics to report shares of the played notes.
#[inline]
pub(crate) fn to_percentage(count: usize, total: usize) -> f64 {
    if total > 0 {
        (count as f64 / total as f64) * 100.0
    } else {
        0.0
    }
}
