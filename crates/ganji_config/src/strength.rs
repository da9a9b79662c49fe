//! Element-strength settings.

use ganji_base::{
    ALL_LAYERS, BlendTable, BranchScoring, CombinationBonus, HarmonyKind, Layer, StrengthPolicy,
};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::ConfigError;

const HARMONY_KINDS: [HarmonyKind; 4] = [
    HarmonyKind::ThreeHarmony,
    HarmonyKind::BirthPeak,
    HarmonyKind::PeakStorage,
    HarmonyKind::BirthStorage,
];

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrengthConfig {
    pub seasonal_bonus: f64,
    pub branch_scoring: BranchScoring,
    pub combination: CombinationBonus,
    /// Layer weights per tab.
    pub blend: BlendTable,
}

impl Default for StrengthConfig {
    fn default() -> Self {
        let policy = StrengthPolicy::default();
        Self {
            seasonal_bonus: policy.seasonal_bonus,
            branch_scoring: policy.branch_scoring,
            combination: policy.combination,
            blend: BlendTable::default(),
        }
    }
}

impl StrengthConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !non_negative(self.seasonal_bonus) {
            return Err(ConfigError::Invalid(
                "seasonal_bonus must be finite and non-negative",
            ));
        }
        if !HARMONY_KINDS
            .iter()
            .all(|&k| non_negative(self.combination.for_kind(k)))
        {
            return Err(ConfigError::Invalid(
                "combination bonuses must be finite and non-negative",
            ));
        }
        for tab in ALL_LAYERS {
            let weights = self.blend.weights(tab);
            if !ALL_LAYERS.iter().all(|&l| non_negative(weights.get(l))) {
                return Err(ConfigError::Invalid(
                    "blend weights must be finite and non-negative",
                ));
            }
            if weights.usable(Layer::Natal).is_none() {
                return Err(ConfigError::Invalid("every blend tab needs a natal weight"));
            }
            for deeper in ALL_LAYERS.iter().filter(|&&l| l > tab) {
                if weights.get(*deeper) > 0.0 {
                    warn!(%tab, layer = %deeper, "blend tab weights a layer below itself");
                }
            }
        }
        Ok(())
    }

    pub fn to_policy(&self) -> StrengthPolicy {
        StrengthPolicy {
            seasonal_bonus: self.seasonal_bonus,
            combination: self.combination,
            branch_scoring: self.branch_scoring,
        }
    }
}

fn non_negative(v: f64) -> bool {
    v.is_finite() && v >= 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_round_trip_through_policy() {
        let c = StrengthConfig::default();
        assert_eq!(c.to_policy(), StrengthPolicy::default());
        assert!(c.validate().is_ok());
    }

    #[test]
    fn partial_tables_keep_other_defaults() {
        let c = StrengthConfig::from_toml_str(
            r#"
            seasonal_bonus = 0.0
            branch_scoring = "hidden_stems"

            [combination]
            three_harmony = 30.0

            [blend.year]
            natal = 0.6
            decade = 0.2
            year = 0.2
            "#,
        )
        .unwrap();
        assert_eq!(c.seasonal_bonus, 0.0);
        assert_eq!(c.branch_scoring, BranchScoring::HiddenStems);
        assert_eq!(c.combination.three_harmony, 30.0);
        assert_eq!(c.combination.half_birth_peak, 12.0);
        assert_eq!(c.blend.weights(Layer::Year).natal, 0.6);
        assert_eq!(c.blend.weights(Layer::Day), BlendTable::default().weights(Layer::Day));
    }

    #[test]
    fn negative_weights_rejected() {
        let err = StrengthConfig::from_toml_str("[blend.month]\nnatal = 1.0\nday = -0.5\n")
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::Invalid("blend weights must be finite and non-negative")
        );
    }

    #[test]
    fn tab_without_natal_weight_rejected() {
        let err = StrengthConfig::from_toml_str("[blend.decade]\ndecade = 1.0\n").unwrap_err();
        assert_eq!(err, ConfigError::Invalid("every blend tab needs a natal weight"));
    }
}
