//! CLI module for glowplan-notify
//!
//! This module provides command-line interface functionality including:
//! - Argument parsing with clap
//! - Configuration loading with CLI overrides
//! - Command execution for serve and migrate operations

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use crate::config::{ConfigLoader, Settings};
use crate::db;
use crate::logger::init_logger;
use crate::server::Server;

/// Transactional notification service for GlowPlan bookings
#[derive(Parser, Debug)]
#[command(name = "glowplan-notify")]
#[command(about = "Transactional notification service for GlowPlan bookings")]
#[command(long_about = "
glowplan-notify reads appointment snapshots from the booking store and
dispatches localized transactional email for the booking lifecycle:
new bookings, confirmations, cancellations and modifications.

EXAMPLES:
    # Start the server with default configuration
    glowplan-notify serve

    # Start server on custom host and port
    glowplan-notify serve --host 0.0.0.0 --port 8080

    # Use a single configuration file
    glowplan-notify --config /etc/glowplan/notify.toml serve

    # Check configuration without starting the server
    glowplan-notify serve --dry-run

    # Apply pending database migrations
    glowplan-notify migrate
")]
#[command(version)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Configuration file path
    ///
    /// Specify a custom configuration file to use instead of the layered
    /// configuration directory. The file must be valid TOML.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    ///
    /// Increases log output to debug level. Cannot be used with --quiet.
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress non-error output
    ///
    /// Reduces log output to error level only. Cannot be used with --verbose.
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the web server (default)
    Serve {
        /// Host address to bind to
        ///
        /// Use 127.0.0.1 for localhost only, or 0.0.0.0 to accept
        /// connections from any interface.
        #[arg(long, value_name = "ADDRESS")]
        host: Option<String>,

        /// Port number to listen on
        #[arg(short, long, value_name = "PORT")]
        port: Option<u16>,

        /// Validate configuration and exit
        ///
        /// Returns exit code 0 if the configuration is valid, non-zero
        /// otherwise.
        #[arg(long)]
        dry_run: bool,
    },
    /// Apply pending database migrations
    Migrate,
}

/// Executes the parsed CLI command.
pub async fn execute(cli: Cli) -> anyhow::Result<()> {
    let mut settings = load_settings(cli.config.as_deref())?;

    // Global verbosity flags override the configured level
    if cli.verbose {
        settings.logger.level = "debug".to_string();
    } else if cli.quiet {
        settings.logger.level = "error".to_string();
    }

    let command = cli.command.unwrap_or(Commands::Serve {
        host: None,
        port: None,
        dry_run: false,
    });

    match command {
        Commands::Serve {
            host,
            port,
            dry_run,
        } => {
            if let Some(host) = host {
                settings.server.host = host;
            }
            if let Some(port) = port {
                settings.server.port = port;
            }
            settings.validate()?;

            if dry_run {
                println!("Configuration OK ({})", settings.server.address());
                return Ok(());
            }

            init_logger(&settings.logger)?;
            Server::new(settings).run().await
        }
        Commands::Migrate => {
            init_logger(&settings.logger)?;
            tracing::info!("Applying pending migrations...");
            db::run_migrations(&settings.database.url).await?;
            tracing::info!("Migrations complete");
            Ok(())
        }
    }
}

/// Loads settings, honoring the `--config` single-file override.
fn load_settings(config_file: Option<&Path>) -> anyhow::Result<Settings> {
    let loader = match config_file {
        Some(path) => ConfigLoader::with_config_file(path.to_path_buf()),
        None => ConfigLoader::new()?,
    };
    Ok(loader.load()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn serve_flags_parse() {
        let cli = Cli::parse_from([
            "glowplan-notify",
            "serve",
            "--host",
            "0.0.0.0",
            "--port",
            "8080",
        ]);
        match cli.command {
            Some(Commands::Serve { host, port, dry_run }) => {
                assert_eq!(host.as_deref(), Some("0.0.0.0"));
                assert_eq!(port, Some(8080));
                assert!(!dry_run);
            }
            other => panic!("Expected serve command, got {:?}", other),
        }
    }

    #[test]
    fn verbose_and_quiet_conflict() {
        let result = Cli::try_parse_from(["glowplan-notify", "--verbose", "--quiet", "serve"]);
        assert!(result.is_err());
    }
}
