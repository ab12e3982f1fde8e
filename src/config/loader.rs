//! Configuration loader for glowplan-notify
//!
//! This module provides the `ConfigLoader` struct that handles loading
//! configuration from multiple sources with proper precedence.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File, FileFormat};

use crate::config::environment::Environment as AppEnvironment;
use crate::config::error::ConfigError;
use crate::config::settings::Settings;

/// Environment variable for configuration directory
const CONFIG_DIR_ENV: &str = "GLOWPLAN_CONFIG_DIR";

/// Environment variable for specific configuration file
const CONFIG_FILE_ENV: &str = "GLOWPLAN_CONFIG_FILE";

/// Default configuration directory
const DEFAULT_CONFIG_DIR: &str = "config";

/// Environment variable prefix for configuration overrides
const ENV_PREFIX: &str = "GLOWPLAN";

/// Separator for nested configuration keys in environment variables
const ENV_SEPARATOR: &str = "__";

/// Configuration loader that handles layered configuration loading
///
/// The loader supports the following configuration sources (in order of priority):
/// 1. `default.toml` - Base default configuration (required)
/// 2. `{environment}.toml` - Environment-specific configuration (optional)
/// 3. `local.toml` - Local development overrides (optional)
/// 4. `GLOWPLAN_*` environment variables (highest priority)
#[derive(Debug)]
pub struct ConfigLoader {
    /// Configuration directory path
    config_dir: PathBuf,
    /// Specific configuration file path (if set, skips layered loading)
    config_file: Option<PathBuf>,
    /// Current application environment
    environment: AppEnvironment,
}

impl ConfigLoader {
    /// Create a new configuration loader
    ///
    /// This reads environment variables to determine:
    /// - Configuration directory (`GLOWPLAN_CONFIG_DIR`)
    /// - Specific configuration file (`GLOWPLAN_CONFIG_FILE`)
    /// - Application environment (`GLOWPLAN_APP_ENV`)
    ///
    /// # Errors
    ///
    /// Returns an error if both `GLOWPLAN_CONFIG_DIR` and `GLOWPLAN_CONFIG_FILE`
    /// are set, as they are mutually exclusive.
    pub fn new() -> Result<Self, ConfigError> {
        let config_dir = std::env::var(CONFIG_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_DIR));

        let config_file = std::env::var(CONFIG_FILE_ENV).ok().map(PathBuf::from);

        // Check mutual exclusivity
        if config_file.is_some() && std::env::var(CONFIG_DIR_ENV).is_ok() {
            return Err(ConfigError::mutual_exclusivity(
                "GLOWPLAN_CONFIG_DIR and GLOWPLAN_CONFIG_FILE cannot both be set. \
                 Use GLOWPLAN_CONFIG_DIR for layered configuration or \
                 GLOWPLAN_CONFIG_FILE for a single configuration file.",
            ));
        }

        let environment = AppEnvironment::from_env();

        Ok(Self {
            config_dir,
            config_file,
            environment,
        })
    }

    /// Create a loader pinned to a single configuration file.
    ///
    /// Used for the CLI `--config` override; layered loading is skipped.
    pub fn with_config_file(config_file: PathBuf) -> Self {
        Self {
            config_dir: PathBuf::from(DEFAULT_CONFIG_DIR),
            config_file: Some(config_file),
            environment: AppEnvironment::from_env(),
        }
    }

    /// Get the current application environment
    pub fn environment(&self) -> AppEnvironment {
        self.environment
    }

    /// Load configuration from all sources
    ///
    /// If a specific configuration file is set, loads only that file.
    /// Otherwise, performs layered loading from the configuration directory.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `default.toml` is not found (when using layered loading)
    /// - Configuration parsing fails
    /// - Configuration validation fails
    pub fn load(&self) -> Result<Settings, ConfigError> {
        let config = self.build_config()?;
        let settings: Settings = config.try_deserialize().map_err(|e| {
            ConfigError::ParseError(format!("Failed to deserialize configuration: {}", e))
        })?;

        // Validate the loaded settings
        settings.validate()?;

        Ok(settings)
    }

    /// Build the config::Config instance from all sources
    fn build_config(&self) -> Result<Config, ConfigError> {
        let builder = Config::builder();

        let builder = if let Some(ref config_file) = self.config_file {
            // Single file mode
            self.add_file_source(builder, config_file, true)?
        } else {
            // Layered loading mode
            self.build_layered_config(builder)?
        };

        // Add environment variables (always highest priority)
        // GLOWPLAN_SERVER__PORT -> server.port
        let builder = Self::add_env_source(builder);

        builder.build().map_err(ConfigError::from)
    }

    /// Build layered configuration from multiple files
    fn build_layered_config(
        &self,
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        // 1. Add default.toml (required)
        let default_path = self.config_dir.join("default.toml");
        let builder = self.add_file_source(builder, &default_path, true)?;

        // 2. Add {environment}.toml (optional)
        let env_path = self
            .config_dir
            .join(format!("{}.toml", self.environment.as_str()));
        let builder = self.add_file_source(builder, &env_path, false)?;

        // 3. Add local.toml (optional)
        let local_path = self.config_dir.join("local.toml");
        self.add_file_source(builder, &local_path, false)
    }

    /// Add a file source to the configuration builder
    fn add_file_source(
        &self,
        builder: config::ConfigBuilder<config::builder::DefaultState>,
        path: &Path,
        required: bool,
    ) -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        if required && !path.exists() {
            return Err(ConfigError::file_not_found(path.display().to_string()));
        }

        Ok(builder.add_source(
            File::from(path.to_path_buf())
                .format(FileFormat::Toml)
                .required(required),
        ))
    }

    /// Add the environment variable source to the configuration builder
    fn add_env_source(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> config::ConfigBuilder<config::builder::DefaultState> {
        builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator(ENV_SEPARATOR)
                .try_parsing(true),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write(path: &Path, contents: &str) {
        fs::write(path, contents).unwrap();
    }

    #[test]
    fn loads_single_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("service.toml");
        write(
            &file,
            r#"
[server]
port = 8080

[database]
url = "postgres://localhost/glowplan"
"#,
        );

        let settings = ConfigLoader::with_config_file(file).load().unwrap();
        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.database.url, "postgres://localhost/glowplan");
        // Untouched sections keep their defaults
        assert_eq!(settings.server.host, "127.0.0.1");
    }

    #[test]
    fn missing_single_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = ConfigLoader::with_config_file(dir.path().join("absent.toml")).load();
        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn layered_loading_applies_local_overrides() {
        let dir = tempfile::tempdir().unwrap();
        write(
            &dir.path().join("default.toml"),
            r#"
[server]
port = 3000

[database]
url = "postgres://localhost/glowplan"

[mail]
api_key = ""
"#,
        );
        write(
            &dir.path().join("local.toml"),
            r#"
[server]
port = 4000

[mail]
api_key = "re_local_key"
"#,
        );

        let loader = ConfigLoader {
            config_dir: dir.path().to_path_buf(),
            config_file: None,
            environment: AppEnvironment::Development,
        };
        let settings = loader.load().unwrap();
        assert_eq!(settings.server.port, 4000);
        assert_eq!(settings.mail.api_key, "re_local_key");
    }

    #[test]
    fn layered_loading_requires_default_toml() {
        let dir = tempfile::tempdir().unwrap();
        let loader = ConfigLoader {
            config_dir: dir.path().to_path_buf(),
            config_file: None,
            environment: AppEnvironment::Development,
        };
        assert!(matches!(loader.load(), Err(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn invalid_settings_fail_validation_at_load() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("service.toml");
        // No database URL configured
        write(&file, "[server]\nport = 8080\n");

        let result = ConfigLoader::with_config_file(file).load();
        assert!(matches!(result, Err(ConfigError::ValidationError { .. })));
    }
}
