//! Fingering statistics that summarize a finished fingering.
//! This is informational only and not used for optimization.

use super::format_utils::format_share;

use ahash::AHashMap;
use colored::Colorize;
use fretboard::{
    fingering::{Annotation, Finger},
    note::Note,
    FretNum,
};
use itertools::Itertools;
use serde::Deserialize;

/// Engine markers reported by the statistics, in display order.
const MARKERS: [(Annotation, &str); 9] = [
    (Annotation::STRETCH, "Stretch"),
    (Annotation::GLISSANDO, "Glissando"),
    (Annotation::LAYOVER, "Layover"),
    (Annotation::BAD_CHANGE, "Bad change"),
    (Annotation::BAD_STRETCH, "Bad stretch"),
    (Annotation::Q_SHIFT, "Q-shift"),
    (Annotation::T_MOVE, "T-move"),
    (Annotation::O_MOVE, "O-move"),
    (Annotation::A_MOVE, "A-move"),
];

#[derive(Clone, Deserialize, Debug)]
#[serde(default)]
pub struct Parameters {
    pub show_fingers: bool,
    pub show_markers: bool,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            show_fingers: true,
            show_markers: true,
        }
    }
}

/// Counts collected over a fingered note sequence.
#[derive(Clone, Debug, Default)]
pub struct FingeringSummary {
    /// Number of fingered notes (rests excluded).
    pub notes: usize,
    pub finger_counts: AHashMap<Finger, usize>,
    pub marker_counts: Vec<(Annotation, usize)>,
    pub position_shifts: usize,
    pub auto_hints: usize,
    /// Lowest and highest fret used.
    pub fret_range: Option<(FretNum, FretNum)>,
}

impl FingeringSummary {
    pub fn finger_count(&self, finger: Finger) -> usize {
        self.finger_counts.get(&finger).copied().unwrap_or(0)
    }

    pub fn marker_count(&self, marker: Annotation) -> usize {
        self.marker_counts
            .iter()
            .find(|(m, _)| *m == marker)
            .map_or(0, |(_, c)| *c)
    }
}

#[derive(Clone, Debug)]
pub struct FingeringStats {
    show_fingers: bool,
    show_markers: bool,
}

impl FingeringStats {
    pub fn new(params: &Parameters) -> Self {
        Self {
            show_fingers: params.show_fingers,
            show_markers: params.show_markers,
        }
    }

    pub fn name(&self) -> &str {
        "Fingering Statistics"
    }

    pub fn summarize(&self, notes: &[Note]) -> FingeringSummary {
        let fingered: Vec<&Note> = notes
            .iter()
            .filter(|n| !n.is_rest() && !n.is_end_of_sequence() && n.finger().is_set())
            .collect();

        let mut finger_counts = AHashMap::default();
        for note in fingered.iter() {
            *finger_counts.entry(note.finger()).or_insert(0) += 1;
        }

        let marker_counts = MARKERS
            .iter()
            .map(|(marker, _)| {
                let count = fingered.iter().filter(|n| n.has_annotation(*marker)).count();
                (*marker, count)
            })
            .collect();

        let count_marked =
            |marker: Annotation| fingered.iter().filter(|n| n.has_annotation(marker)).count();

        FingeringSummary {
            notes: fingered.len(),
            finger_counts,
            marker_counts,
            position_shifts: count_marked(Annotation::POSITION_SHIFT),
            auto_hints: count_marked(Annotation::AUTO_HINT),
            fret_range: fingered
                .iter()
                .filter_map(|n| n.fret())
                .minmax()
                .into_option(),
        }
    }

    /// Render a summary as a single line with groups separated by semicolons.
    pub fn message(&self, summary: &FingeringSummary) -> String {
        let mut groups = Vec::new();

        groups.push(format!("{}: {}", "Notes".underline(), summary.notes));

        if self.show_fingers {
            let fingers = Finger::FRETTING
                .iter()
                .map(|finger| {
                    let count = summary.finger_count(*finger);
                    format!(
                        "{}: {}",
                        finger.to_string().underline(),
                        format_share(count, super::to_percentage(count, summary.notes))
                    )
                })
                .join(", ");
            groups.push(fingers);
        }

        if self.show_markers {
            let markers = MARKERS
                .iter()
                .map(|(marker, label)| (label, summary.marker_count(*marker)))
                .filter(|(_, count)| *count > 0)
                .map(|(label, count)| {
                    format!(
                        "{}: {}",
                        label.underline(),
                        format_share(count, super::to_percentage(count, summary.notes))
                    )
                })
                .join(", ");
            if !markers.is_empty() {
                groups.push(markers);
            }
        }

        let mut shifts = format!(
            "{}: {}",
            "Position shifts".underline(),
            summary.position_shifts
        );
        if summary.auto_hints > 0 {
            shifts.push_str(&format!(" ({} auto-hinted)", summary.auto_hints));
        }
        groups.push(shifts);

        if let Some((low, high)) = summary.fret_range {
            groups.push(format!("{}: {}-{}", "Frets".underline(), low, high));
        }

        groups.join("; ")
    }
}
