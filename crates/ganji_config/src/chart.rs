//! Chart and luck settings.

use ganji_base::DayBoundaryRule;
use ganji_search::{
    ChartOptions, DEFAULT_OBSERVER_LONGITUDE_DEG, DEFAULT_UTC_OFFSET_MINUTES, LuckMethod,
    LuckOptions,
};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Settings for pillar resolution and luck generation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub observer_longitude_deg: f64,
    pub utc_offset_minutes: i32,
    pub day_boundary: DayBoundaryRule,
    pub luck_method: LuckMethod,
    pub inclusive_forward_day: bool,
    pub until_years: u32,
    pub local_mean_time: bool,
}

impl Default for ChartConfig {
    fn default() -> Self {
        let luck = LuckOptions::default();
        Self {
            observer_longitude_deg: DEFAULT_OBSERVER_LONGITUDE_DEG,
            utc_offset_minutes: DEFAULT_UTC_OFFSET_MINUTES,
            day_boundary: DayBoundaryRule::default(),
            luck_method: luck.method,
            inclusive_forward_day: luck.inclusive_forward_day,
            until_years: luck.until_years,
            local_mean_time: false,
        }
    }
}

impl ChartConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.to_chart_options().validate()?;
        self.to_luck_options().validate()?;
        Ok(())
    }

    pub fn to_chart_options(&self) -> ChartOptions {
        ChartOptions {
            observer_longitude_deg: self.observer_longitude_deg,
            utc_offset_minutes: self.utc_offset_minutes,
            day_boundary: self.day_boundary,
            local_mean_time: self.local_mean_time,
        }
    }

    pub fn to_luck_options(&self) -> LuckOptions {
        LuckOptions {
            method: self.luck_method,
            inclusive_forward_day: self.inclusive_forward_day,
            until_years: self.until_years,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ganji_search::SearchError;

    #[test]
    fn defaults_match_resolver_defaults() {
        let c = ChartConfig::default();
        assert_eq!(c.to_chart_options(), ChartOptions::default());
        assert_eq!(c.to_luck_options(), LuckOptions::default());
        assert!(c.validate().is_ok());
    }

    #[test]
    fn korean_labels_are_accepted() {
        let c = ChartConfig::from_toml_str(
            r#"
            day_boundary = "인시"
            luck_method = "정밀"
            "#,
        )
        .unwrap();
        assert_eq!(c.day_boundary, DayBoundaryRule::Insi);
        assert_eq!(c.luck_method, LuckMethod::Precision);
        assert_eq!(c.utc_offset_minutes, 540);
    }

    #[test]
    fn out_of_range_longitude_rejected() {
        let err = ChartConfig::from_toml_str("observer_longitude_deg = 200.0").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Search(SearchError::InvalidConfig(_))
        ));
    }

    #[test]
    fn wrong_type_is_a_parse_error() {
        let err = ChartConfig::from_toml_str("until_years = \"many\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
