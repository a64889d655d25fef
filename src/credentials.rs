//! Credential resolution for completion providers
//!
//! Looks up an API key in the process environment first, then in a local
//! key=value settings file (dotenv format). The settings file is read with
//! dotenvy's iterator API so the process environment is never mutated;
//! concurrent runs with different keys stay independent.

use std::env;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default settings file searched when the environment lacks the key
pub const DEFAULT_SETTINGS_FILE: &str = ".env";

/// Credential lookup errors
#[derive(Debug, Error)]
pub enum CredentialError {
    /// The key is absent from both the environment and the settings file.
    ///
    /// Raised at startup, before any completion call is attempted.
    #[error("{} not found. Set it as an environment variable or add it to {}", .name, .settings.display())]
    Missing { name: String, settings: PathBuf },

    /// The settings file exists but could not be read or parsed
    #[error("failed to read settings file {}: {}", .settings.display(), .source)]
    Settings {
        settings: PathBuf,
        #[source]
        source: dotenvy::Error,
    },
}

/// Resolve `name` from the environment, falling back to `settings`.
///
/// A settings file that does not exist is treated as having no value; a
/// settings file that exists but cannot be parsed is an error. The value
/// from the settings file is returned unchanged.
pub fn resolve_api_key(name: &str, settings: &Path) -> Result<String, CredentialError> {
    if let Ok(value) = env::var(name) {
        if !value.is_empty() {
            tracing::debug!("resolved {} from environment", name);
            return Ok(value);
        }
    }

    if settings.exists() {
        for item in dotenvy::from_path_iter(settings).map_err(|source| {
            CredentialError::Settings {
                settings: settings.to_path_buf(),
                source,
            }
        })? {
            let (key, value) = item.map_err(|source| CredentialError::Settings {
                settings: settings.to_path_buf(),
                source,
            })?;
            if key == name && !value.is_empty() {
                tracing::debug!("resolved {} from {}", name, settings.display());
                return Ok(value);
            }
        }
    }

    Err(CredentialError::Missing {
        name: name.to_string(),
        settings: settings.to_path_buf(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_env_takes_precedence() {
        let tmp = tempfile::TempDir::new().unwrap();
        let settings = tmp.path().join(".env");
        std::fs::write(&settings, "BYLINE_TEST_PRECEDENCE=from-file\n").unwrap();

        env::set_var("BYLINE_TEST_PRECEDENCE", "from-env");
        let value = resolve_api_key("BYLINE_TEST_PRECEDENCE", &settings).unwrap();
        env::remove_var("BYLINE_TEST_PRECEDENCE");

        assert_eq!(value, "from-env");
    }

    #[test]
    fn test_settings_file_fallback_returns_value_unchanged() {
        let tmp = tempfile::TempDir::new().unwrap();
        let settings = tmp.path().join(".env");
        let mut file = std::fs::File::create(&settings).unwrap();
        writeln!(file, "# provider credentials").unwrap();
        writeln!(file, "BYLINE_TEST_FALLBACK=sk-abc123").unwrap();

        let value = resolve_api_key("BYLINE_TEST_FALLBACK", &settings).unwrap();
        assert_eq!(value, "sk-abc123");
    }

    #[test]
    fn test_settings_lookup_does_not_mutate_environment() {
        let tmp = tempfile::TempDir::new().unwrap();
        let settings = tmp.path().join(".env");
        std::fs::write(&settings, "BYLINE_TEST_NO_MUTATE=value\n").unwrap();

        resolve_api_key("BYLINE_TEST_NO_MUTATE", &settings).unwrap();
        assert!(env::var("BYLINE_TEST_NO_MUTATE").is_err());
    }

    #[test]
    fn test_missing_everywhere() {
        let tmp = tempfile::TempDir::new().unwrap();
        let settings = tmp.path().join(".env");

        let err = resolve_api_key("BYLINE_TEST_ABSENT", &settings).unwrap_err();
        match err {
            CredentialError::Missing { name, .. } => assert_eq!(name, "BYLINE_TEST_ABSENT"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_missing_message_names_the_settings_file() {
        let err = resolve_api_key("BYLINE_TEST_MESSAGE", Path::new("conf/.env")).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("BYLINE_TEST_MESSAGE"));
        assert!(message.contains("conf"));
    }

    #[test]
    fn test_empty_env_value_falls_through_to_settings() {
        let tmp = tempfile::TempDir::new().unwrap();
        let settings = tmp.path().join(".env");
        std::fs::write(&settings, "BYLINE_TEST_EMPTY=from-file\n").unwrap();

        env::set_var("BYLINE_TEST_EMPTY", "");
        let value = resolve_api_key("BYLINE_TEST_EMPTY", &settings).unwrap();
        env::remove_var("BYLINE_TEST_EMPTY");

        assert_eq!(value, "from-file");
    }
}
