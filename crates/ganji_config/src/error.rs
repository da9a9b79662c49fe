//! Configuration errors.

use ganji_search::SearchError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// The file could not be read.
    #[error("cannot read {path}: {message}")]
    Io { path: String, message: String },
    /// The text is not valid TOML for this schema.
    #[error("config parse error: {0}")]
    Parse(String),
    /// The configuration could not be written as TOML.
    #[error("config serialize error: {0}")]
    Serialize(String),
    /// A value is out of range.
    #[error("invalid config: {0}")]
    Invalid(&'static str),
    /// Options rejected by the resolvers.
    #[error(transparent)]
    Search(#[from] SearchError),
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        Self::Parse(e.to_string())
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(e: toml::ser::Error) -> Self {
        Self::Serialize(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::ser::Error as _;

    #[test]
    fn toml_errors_keep_their_direction() {
        let de = toml::from_str::<toml::Table>("= 1").unwrap_err();
        assert!(matches!(ConfigError::from(de), ConfigError::Parse(_)));
        let ser = toml::ser::Error::custom("unsupported value");
        let err = ConfigError::from(ser);
        assert!(matches!(err, ConfigError::Serialize(_)));
        assert!(err.to_string().starts_with("config serialize error"));
    }
}
