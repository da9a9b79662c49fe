//! Loading configuration files from disk and from the shipped example.

use ganji_base::{DayBoundaryRule, Layer};
use ganji_config::{ConfigError, GanjiConfig};
use ganji_search::LuckMethod;

const EXAMPLE: &str = include_str!("../../../config/ganji.example.toml");

#[test]
fn shipped_example_spells_out_the_defaults() {
    let config = GanjiConfig::from_toml_str(EXAMPLE).unwrap();
    assert_eq!(config, GanjiConfig::default());
}

#[test]
fn empty_file_is_all_defaults() {
    assert_eq!(GanjiConfig::from_toml_str("").unwrap(), GanjiConfig::default());
}

#[test]
fn load_reads_file_and_validates() {
    let dir = std::env::temp_dir().join(format!("ganji_config_test_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("ganji.toml");
    std::fs::write(
        &path,
        "[chart]\nday_boundary = \"조자시/야자시\"\nluck_method = \"precision\"\n\
         [strength.blend.day]\nnatal = 1.0\n",
    )
    .unwrap();

    let config = GanjiConfig::load(&path).unwrap();
    assert_eq!(config.chart.day_boundary, DayBoundaryRule::JojaYaja);
    assert_eq!(config.chart.luck_method, LuckMethod::Precision);
    assert_eq!(config.strength.blend.weights(Layer::Day).natal, 1.0);
    assert_eq!(config.strength.blend.weights(Layer::Day).day, 0.0);

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn missing_file_is_an_io_error() {
    let err = GanjiConfig::load("/nonexistent/ganji.toml").unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
}

#[test]
fn serialized_config_parses_back() {
    let mut config = GanjiConfig::default();
    config.chart.until_years = 80;
    config.strength.seasonal_bonus = 5.0;
    let text = config.to_toml_string().unwrap();
    assert_eq!(GanjiConfig::from_toml_str(&text).unwrap(), config);
}

#[test]
fn invalid_section_names_the_problem() {
    let err = GanjiConfig::from_toml_str("[chart]\nuntil_years = 0\n").unwrap_err();
    assert!(err.to_string().contains("until_years"));
}
