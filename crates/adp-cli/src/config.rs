//! Configuration file handling.
//!
//! Configuration is loaded from `~/.config/adp/config.toml` unless a path is
//! given on the command line.
//!
//! ## Example Configuration
//!
//! ```toml
//! base_url = "https://api.adp.com"
//! certificate_path = "certs/client.crt"
//! key_path = "certs/client.key"
//! credential_env = "ADP_CREDENTIAL"
//! timeout_seconds = 30
//! page_size = 200
//! ```
//!
//! Relative certificate and key paths are resolved against the directory the
//! configuration file lives in.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use secrecy::SecretString;

use adp_common::Config;

/// Returns the default configuration file path.
///
/// # Errors
///
/// Returns an error if the config directory cannot be determined.
pub fn config_path() -> Result<PathBuf> {
    let config_dir = dirs::config_dir()
        .context("Failed to determine config directory")?
        .join("adp");

    Ok(config_dir.join("config.toml"))
}

/// Reads and parses a configuration file.
///
/// # Errors
///
/// Returns an error if the file is missing, unreadable or not valid TOML.
pub fn load(path: &Path) -> Result<Config> {
    if !path.exists() {
        bail!("Configuration file not found: {}", path.display());
    }

    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    let mut config: Config = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse config file {}", path.display()))?;

    if let Some(dir) = path.parent() {
        config.certificate_path = resolve_relative(dir, &config.certificate_path);
        config.key_path = resolve_relative(dir, &config.key_path);
    }

    Ok(config)
}

/// Loads the configuration for this run.
///
/// A `credential` from the command line or `ADP_CREDENTIAL` replaces whatever
/// the file specifies.
///
/// # Errors
///
/// Returns an error if loading fails or the result does not validate.
pub fn resolve(path: Option<&Path>, credential: Option<String>) -> Result<Config> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => config_path()?,
    };

    let mut config = load(&path)?;
    if let Some(credential) = credential {
        config.credential = Some(SecretString::new(credential.into()));
    }

    config
        .validate()
        .with_context(|| format!("Invalid configuration in {}", path.display()))?;
    Ok(config)
}

fn resolve_relative(base: &Path, path: &Path) -> PathBuf {
    if path.is_relative() {
        base.join(path)
    } else {
        path.to_path_buf()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::expect_used)]

    use super::*;
    use secrecy::ExposeSecret;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_resolves_relative_paths() {
        let file = write_config(
            r#"
certificate_path = "certs/client.crt"
key_path = "/etc/adp/client.key"
page_size = 25
            "#,
        );

        let config = load(file.path()).unwrap();
        let dir = file.path().parent().unwrap();

        assert_eq!(config.certificate_path, dir.join("certs/client.crt"));
        assert_eq!(config.key_path, PathBuf::from("/etc/adp/client.key"));
        assert_eq!(config.page_size, 25);
        assert_eq!(config.base_url, adp_common::DEFAULT_BASE_URL);
    }

    #[test]
    fn test_load_missing_file() {
        let err = load(Path::new("/nonexistent/adp/config.toml")).unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_load_invalid_toml() {
        let file = write_config("certificate_path = [");
        let err = load(file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse"));
    }

    #[test]
    fn test_resolve_credential_override() {
        let file = write_config(
            r#"
certificate_path = "client.crt"
key_path = "client.key"
credential = "from-file"
            "#,
        );

        let config = resolve(Some(file.path()), None).unwrap();
        assert_eq!(
            config.resolve_credential().unwrap().expose_secret(),
            "from-file"
        );

        let config = resolve(Some(file.path()), Some("from-flag".to_string())).unwrap();
        assert_eq!(
            config.resolve_credential().unwrap().expose_secret(),
            "from-flag"
        );
    }

    #[test]
    fn test_resolve_rejects_invalid_settings() {
        let file = write_config(
            r#"
certificate_path = "client.crt"
key_path = "client.key"
page_size = 0
            "#,
        );

        let err = resolve(Some(file.path()), None).unwrap_err();
        assert!(err.to_string().contains("Invalid configuration"));
    }

    #[test]
    fn test_config_path_location() {
        if let Ok(path) = config_path() {
            assert!(path.ends_with("adp/config.toml"));
        }
    }
}
