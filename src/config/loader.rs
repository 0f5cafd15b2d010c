//! Configuration loading from disk.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::schema::AppConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Why a cookie configuration could not be loaded.
#[derive(Debug)]
pub enum ConfigError {
    /// The file could not be read.
    Read { path: PathBuf, source: std::io::Error },
    /// The TOML is malformed or does not match the schema.
    Parse { path: Option<PathBuf>, source: toml::de::Error },
    /// The configuration parsed but declares unusable routes or settings.
    Invalid(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Read { path, source } => {
                write!(f, "cannot read cookie config {}: {}", path.display(), source)
            }
            ConfigError::Parse { path: Some(path), source } => {
                write!(f, "malformed cookie config {}: {}", path.display(), source)
            }
            ConfigError::Parse { path: None, source } => write!(f, "malformed cookie config: {}", source),
            ConfigError::Invalid(errors) => {
                write!(f, "{} problem(s) in cookie config: ", errors.len())?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, "; ")?;
                    }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Read { source, .. } => Some(source),
            ConfigError::Parse { source, .. } => Some(source),
            ConfigError::Invalid(_) => None,
        }
    }
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<AppConfig, ConfigError> {
    let config: AppConfig =
        toml::from_str(content).map_err(|source| ConfigError::Parse { path: None, source })?;
    validate_config(&config).map_err(ConfigError::Invalid)?;
    Ok(config)
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&content).map_err(|err| match err {
        ConfigError::Parse { path: None, source } => ConfigError::Parse {
            path: Some(path.to_path_buf()),
            source,
        },
        other => other,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LogFormat;

    const SAMPLE: &str = r#"
        [listener]
        bind_address = "0.0.0.0:9000"

        [logging]
        level = "debug"
        format = "json"

        [[routes]]
        path = "/login"
        method = "POST"

        [routes.defaults]
        http_only = true
        same_site = "lax"

        [[routes.cookies]]
        name = "visited"
        value = "yes"

        [[routes]]
        path = "/logout"

        [[routes.cookies]]
        name = "session"
    "#;

    #[test]
    fn test_parse_sample() {
        let config = parse_config(SAMPLE).unwrap();

        assert_eq!(config.listener.bind_address, "0.0.0.0:9000");
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.routes.len(), 2);
        assert_eq!(config.routes[0].method.as_deref(), Some("POST"));
        assert_eq!(config.routes[0].cookies[0].value.as_deref(), Some("yes"));
        assert!(config.routes[1].cookies[0].is_clear());
        assert!(config.cookies.secret.is_none());
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config.listener.bind_address, "127.0.0.1:8080");
        assert_eq!(config.logging.level, "info");
        assert!(config.routes.is_empty());
    }

    #[test]
    fn test_parse_error() {
        let err = parse_config("routes = 5").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { path: None, .. }));
    }

    #[test]
    fn test_validation_error_lists_all() {
        let err = parse_config(
            r#"
            [[routes]]
            path = "no-slash"

            [[routes.cookies]]
            name = ""
            "#,
        )
        .unwrap_err();

        match err {
            ConfigError::Invalid(errors) => assert_eq!(errors.len(), 2),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_missing_file() {
        let path = Path::new("/nonexistent/route-cookies.toml");
        let err = load_config(path).unwrap_err();
        assert!(matches!(err, ConfigError::Read { path: ref p, .. } if p == path));
        assert!(err.to_string().contains("/nonexistent/route-cookies.toml"));
    }

    #[test]
    fn test_parse_error_names_file() {
        let path = std::env::temp_dir().join(format!("route-cookies-bad-{}.toml", std::process::id()));
        std::fs::write(&path, "routes = 5").unwrap();

        let err = load_config(&path).unwrap_err();
        let _ = std::fs::remove_file(&path);

        assert!(matches!(err, ConfigError::Parse { path: Some(ref p), .. } if *p == path));
        assert!(err.to_string().starts_with("malformed cookie config"));
    }
}
