//! Policy toggles beyond what the instrument and the hand model dictate.

use serde::Deserialize;

/// User-selectable constraints.
///
/// The default imposes no constraints, so every "is X allowed" toggle starts out `true`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Constraints {
    /// Allow a one-note chunk reached by a position shift to be followed directly by another
    /// shift (back-to-back glissando shifts).
    pub back_to_back_glissando: bool,
}

impl Default for Constraints {
    fn default() -> Self {
        Self {
            back_to_back_glissando: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_allows_everything() {
        assert!(Constraints::default().back_to_back_glissando);
    }

    #[test]
    fn constraints_from_yaml() {
        let c: Constraints = serde_yaml::from_str("back_to_back_glissando: false").unwrap();
        assert!(!c.back_to_back_glissando);
        let c: Constraints = serde_yaml::from_str("{}").unwrap();
        assert!(c.back_to_back_glissando);
    }
}
