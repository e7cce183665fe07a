//! Error handling for the registry's ambient services.

use thiserror::Error;

/// Result type alias using the core error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while configuring the registry.
#[derive(Debug, Error)]
pub enum Error {
    /// A required setting is missing.
    #[error("configuration error: {0} is required")]
    MissingSetting(&'static str),

    /// A setting has a value that cannot be parsed.
    #[error("configuration error: invalid value '{value}' for {key}")]
    InvalidSetting {
        /// Environment variable name.
        key: &'static str,
        /// Offending value.
        value: String,
    },

    /// The tracing subscriber could not be installed.
    #[error("telemetry error: {0}")]
    Telemetry(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_setting_names_key_and_value() {
        let error = Error::InvalidSetting {
            key: "SP_DB_MAX_CONNECTIONS",
            value: "lots".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "configuration error: invalid value 'lots' for SP_DB_MAX_CONNECTIONS"
        );
    }

    #[test]
    fn missing_setting_message() {
        assert_eq!(
            Error::MissingSetting("DATABASE_URL").to_string(),
            "configuration error: DATABASE_URL is required"
        );
    }
}
