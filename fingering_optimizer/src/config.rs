//! Run configuration, read from a YAML file such as `config/fingering.yml`.

use fingering_evaluation::metrics::{fingering_stats, position_choice};
use fingering_optimization::{
    algorithm::cost_search::{self, CostSearch},
    constraints::Constraints,
    engine::DEFAULT_MAX_SHIFT,
    Engine,
};
use fretboard::{
    hand_model::{HandModel, HandModelKind, HandPenalties},
    instrument::Instrument,
    HandPosition,
};

use anyhow::{Context, Result};
use serde::Deserialize;
use std::{fs, path::Path};

#[derive(Clone, Deserialize, Debug)]
#[serde(default)]
pub struct Config {
    pub hand_model: HandModelKind,
    /// Upper bound on the number of passes (and so on the number of automatic hints).
    pub max_passes: usize,
    /// Largest hand position shift accepted without trying to place a hint.
    pub max_shift: HandPosition,
    pub constraints: Constraints,
    pub hand_penalties: HandPenalties,
    pub transitions: cost_search::Parameters,
    pub position_choice: position_choice::Parameters,
    pub statistics: fingering_stats::Parameters,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            hand_model: HandModelKind::Standard,
            max_passes: 50,
            max_shift: DEFAULT_MAX_SHIFT,
            constraints: Constraints {
                back_to_back_glissando: false,
            },
            hand_penalties: HandPenalties::default(),
            transitions: cost_search::Parameters::default(),
            position_choice: position_choice::Parameters::default(),
            statistics: fingering_stats::Parameters::default(),
        }
    }
}

impl Config {
    pub fn from_yaml_str(s: &str) -> Result<Self> {
        serde_yaml::from_str(s).context("Could not parse fingering configuration")
    }

    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let s = fs::read_to_string(path)
            .with_context(|| format!("Could not read config file {}", path.display()))?;
        Self::from_yaml_str(&s).with_context(|| format!("Invalid config file {}", path.display()))
    }

    pub fn hand_model(&self) -> HandModel {
        HandModel::new(self.hand_model, self.hand_penalties)
    }

    /// A fully configured engine for `instrument`.
    pub fn build_engine(&self, instrument: Instrument) -> Engine {
        let mut engine = Engine::new();
        engine.set_instrument(instrument);
        engine.set_algorithm(CostSearch::new(self.hand_model(), &self.transitions).into());
        engine.set_constraints(self.constraints);
        engine.set_max_shift(self.max_shift);
        engine.set_position_choice(position_choice::PositionChoice::new(&self.position_choice));

        engine
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config = Config::from_yaml_str("{}").unwrap();

        assert_eq!(config.hand_model, HandModelKind::Standard);
        assert_eq!(config.max_passes, 50);
        assert_eq!(config.max_shift, 3);
        assert!(!config.constraints.back_to_back_glissando);
        assert_eq!(config.transitions.note_bonus, -5);
    }

    #[test]
    fn nested_parameters_are_read() {
        let config = Config::from_yaml_str(
            r#"
            hand_model: extended_both
            max_shift: 5
            constraints:
              back_to_back_glissando: true
            hand_penalties:
              stretch: 2
            transitions:
              break_threshold: 20
              finger_moves:
                q_shift: 7
            position_choice:
              preferred_high: 9
            "#,
        )
        .unwrap();

        assert_eq!(config.hand_model, HandModelKind::ExtendedBoth);
        assert_eq!(config.max_shift, 5);
        assert!(config.constraints.back_to_back_glissando);
        assert_eq!(config.hand_penalties.stretch, 2);
        assert_eq!(config.hand_penalties.little_finger, 1);
        assert_eq!(config.transitions.break_threshold, 20);
        assert_eq!(config.transitions.finger_moves.q_shift, 7);
        assert_eq!(config.transitions.note_bonus, -5);
        assert_eq!(config.position_choice.preferred_high, 9);
        assert_eq!(config.hand_model().kind(), HandModelKind::ExtendedBoth);
    }

    #[test]
    fn unknown_hand_model_is_rejected() {
        assert!(Config::from_yaml_str("hand_model: six_fingers").is_err());
    }

    #[test]
    fn built_engine_is_configured() {
        let engine = Config::default().build_engine(Instrument::standard_guitar());
        assert!(engine.run_pass(&[]).is_ok());
        assert_eq!(engine.instrument().map(|i| i.num_strings()), Some(6));
    }
}
