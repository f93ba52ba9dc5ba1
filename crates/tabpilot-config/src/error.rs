//! Configuration errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid config format: {0}")]
    InvalidFormat(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    #[error("Unknown settings key: {0}")]
    UnknownKey(String),

    #[error("Environment variable not set: {0}")]
    EnvVarNotSet(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML encode error: {0}")]
    TomlEncode(#[from] toml::ser::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_key_display() {
        let err = ConfigError::UnknownKey("colour".to_string());
        assert!(err.to_string().contains("colour"));
    }

    #[test]
    fn test_invalid_value_display() {
        let err = ConfigError::InvalidValue {
            field: "min_delay".to_string(),
            message: "not a number".to_string(),
        };
        let display = err.to_string();
        assert!(display.contains("min_delay"));
        assert!(display.contains("not a number"));
    }

    #[test]
    fn test_io_error_from() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = ConfigError::from(io_err);
        assert!(err.to_string().contains("file not found"));
    }
}
