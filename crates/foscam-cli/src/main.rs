//! Foscam CLI - Command-line tool for Foscam CGI cameras
//!
//! Builds a `FoscamActuator` from flags and an optional config file, runs
//! one command, and prints the normalized outcome.

mod commands;
mod config;
mod output;

use actuator_core::ActuatorOptions;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use foscam_actuator::{Command, CommandOptions, DeviceDescriptor, FoscamActuator};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::{ArgOverrides, Config, MergedConfig};
use crate::output::{OutputContext, OutputFormat};

#[derive(Parser)]
#[command(name = "foscam-cli")]
#[command(author, version, about = "Foscam camera CGI CLI")]
#[command(propagate_version = true)]
struct Cli {
    /// Camera address (host or host:port)
    #[arg(short, long, env = "FOSCAM_ADDRESS")]
    address: Option<String>,

    /// Camera model
    #[arg(short, long)]
    model: Option<String>,

    /// Talk HTTPS instead of HTTP
    #[arg(long)]
    https: bool,

    /// Camera user
    #[arg(short, long, env = "FOSCAM_USER")]
    user: Option<String>,

    /// Camera password
    #[arg(short, long, env = "FOSCAM_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// Configuration file path
    #[arg(short, long, env = "FOSCAM_CONFIG")]
    config: Option<PathBuf>,

    /// Deadline for the whole request, in seconds
    #[arg(short, long)]
    timeout: Option<u64>,

    /// Output format
    #[arg(short, long, value_enum)]
    output: Option<OutputFormat>,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Minimal output (for scripting)
    #[arg(short, long)]
    quiet: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Capture a JPEG snapshot
    Snap {
        /// File to write the image to
        #[arg(long, default_value = "snapshot.jpg")]
        out: PathBuf,
    },

    /// Move to the preset point named "default"
    Preset,

    /// Return pan/tilt to the home position
    Reset,

    /// Reboot the camera
    Reboot,

    /// Show the command table
    Commands,

    /// Show actuator id and properties
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("warn")
        }
    });

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();

    // Commands table needs no camera
    if let Commands::Commands = cli.command {
        let ctx = OutputContext::new(cli.output.unwrap_or_default(), cli.no_color, cli.quiet);
        return commands::commands(&ctx);
    }

    // Load config file
    let config = if let Some(config_path) = &cli.config {
        Config::load_from(config_path)?
    } else {
        Config::load().unwrap_or_default()
    };

    // Merge CLI args with config
    let merged = config.merge_with_args(&ArgOverrides {
        address: cli.address.clone(),
        model: cli.model.clone(),
        https: cli.https,
        user: cli.user.clone(),
        password: cli.password.clone(),
        output: cli.output,
        no_color: cli.no_color,
    })?;

    // Create output context
    let ctx = OutputContext::new(merged.output, merged.no_color, cli.quiet);

    debug!(
        address = %merged.address,
        model = %merged.model,
        protocol = ?merged.camera.protocol,
        command = ?cli.command,
        "Resolved camera settings"
    );

    let options = command_options(cli.timeout);
    let actuator = create_actuator(merged)?;

    // Execute command
    match &cli.command {
        Commands::Snap { out } => commands::snap(&actuator, out, &options, &ctx).await?,
        Commands::Preset => {
            commands::run(&actuator, Command::GotoPresetDefault, &options, &ctx).await?
        }
        Commands::Reset => commands::run(&actuator, Command::ResetPosition, &options, &ctx).await?,
        Commands::Reboot => commands::run(&actuator, Command::Reboot, &options, &ctx).await?,
        Commands::Info => commands::info(&actuator, &ctx)?,
        Commands::Commands => commands::commands(&ctx)?,
    }

    Ok(())
}

/// `--timeout` is the per-call deadline; without it the configured default applies
fn command_options(timeout_secs: Option<u64>) -> CommandOptions {
    match timeout_secs {
        Some(secs) => CommandOptions::with_timeout(Duration::from_secs(secs)),
        None => CommandOptions::default(),
    }
}

/// Create an actuator for the merged camera settings
fn create_actuator(merged: MergedConfig) -> Result<FoscamActuator> {
    FoscamActuator::new(
        DeviceDescriptor::new(merged.model, merged.address),
        ActuatorOptions::new(),
        Arc::new(merged.camera),
        Arc::new(merged.credentials),
    )
    .context("Failed to create camera actuator")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_flag_becomes_call_deadline() {
        assert_eq!(
            command_options(Some(3)).timeout,
            Some(Duration::from_secs(3))
        );
        assert_eq!(command_options(None).timeout, None);
    }

    #[test]
    fn test_timeout_flag_leaves_camera_default() {
        let cli = Cli::parse_from([
            "foscam-cli",
            "--address",
            "10.0.0.5",
            "--timeout",
            "3",
            "reboot",
        ]);
        let merged = Config::default()
            .merge_with_args(&ArgOverrides {
                address: cli.address.clone(),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(cli.timeout, Some(3));
        assert_eq!(merged.camera.timeout_secs, 30);
        assert!(matches!(cli.command, Commands::Reboot));
    }
}
