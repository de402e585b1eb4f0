use anyhow::{bail, Context, Result};

use crate::interview::evaluator::DEFAULT_HISTORY_WINDOW;
use crate::interview::registry::{DEFAULT_TTL_MINUTES, MAX_TTL_MINUTES};

/// Application configuration loaded from environment variables.
///
/// `ANTHROPIC_API_KEY` is optional at boot: without it the server still starts,
/// but starting an interview fails with a configuration error.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: Option<String>,
    pub port: u16,
    pub rust_log: String,
    pub session_ttl_minutes: i64,
    pub history_window: usize,
    pub cors_origin: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            anthropic_api_key: None,
            port: 8000,
            rust_log: "info".to_string(),
            session_ttl_minutes: DEFAULT_TTL_MINUTES,
            history_window: DEFAULT_HISTORY_WINDOW,
            cors_origin: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Config::default();

        let config = Config {
            anthropic_api_key: optional_env("ANTHROPIC_API_KEY"),
            port: parse_env("PORT", defaults.port)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or(defaults.rust_log),
            session_ttl_minutes: parse_env("SESSION_TTL_MINUTES", defaults.session_ttl_minutes)?,
            history_window: parse_env("HISTORY_WINDOW", defaults.history_window)?,
            cors_origin: optional_env("CORS_ORIGIN"),
        };
        config.validate()?;
        Ok(config)
    }

    /// Rejects values that would expire every session at once or overflow expiry timestamps.
    pub fn validate(&self) -> Result<()> {
        if !(1..=MAX_TTL_MINUTES).contains(&self.session_ttl_minutes) {
            bail!(
                "SESSION_TTL_MINUTES must be between 1 and {MAX_TTL_MINUTES}, got {}",
                self.session_ttl_minutes
            );
        }
        Ok(())
    }
}

/// Reads a variable, treating unset and blank the same.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional_env(key) {
        Some(raw) => raw
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has invalid value '{raw}'")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.port, 8000);
        assert_eq!(config.session_ttl_minutes, 120);
        assert_eq!(config.history_window, 10);
        assert!(config.anthropic_api_key.is_none());
    }

    #[test]
    fn test_validate_accepts_defaults_and_bounds() {
        assert!(Config::default().validate().is_ok());
        for minutes in [1, MAX_TTL_MINUTES] {
            let config = Config {
                session_ttl_minutes: minutes,
                ..Config::default()
            };
            assert!(config.validate().is_ok(), "{minutes} should be accepted");
        }
    }

    #[test]
    fn test_validate_rejects_out_of_range_ttl() {
        for minutes in [0, -5, MAX_TTL_MINUTES + 1, 1_000_000_000_000] {
            let config = Config {
                session_ttl_minutes: minutes,
                ..Config::default()
            };
            let message = config.validate().unwrap_err().to_string();
            assert!(message.contains("SESSION_TTL_MINUTES"), "{message}");
        }
    }

    #[test]
    fn test_parse_env_uses_default_when_unset() {
        let value: u16 = parse_env("INTERVIEW_API_TEST_UNSET_PORT", 1234).unwrap();
        assert_eq!(value, 1234);
    }

    #[test]
    fn test_parse_env_rejects_garbage() {
        std::env::set_var("INTERVIEW_API_TEST_BAD_WINDOW", "ten");
        let result: Result<usize> = parse_env("INTERVIEW_API_TEST_BAD_WINDOW", 10);
        let message = format!("{:#}", result.unwrap_err());
        assert!(message.contains("INTERVIEW_API_TEST_BAD_WINDOW"));
        std::env::remove_var("INTERVIEW_API_TEST_BAD_WINDOW");
    }

    #[test]
    fn test_optional_env_treats_blank_as_unset() {
        std::env::set_var("INTERVIEW_API_TEST_BLANK_KEY", "   ");
        assert_eq!(optional_env("INTERVIEW_API_TEST_BLANK_KEY"), None);
        std::env::remove_var("INTERVIEW_API_TEST_BLANK_KEY");
    }
}
