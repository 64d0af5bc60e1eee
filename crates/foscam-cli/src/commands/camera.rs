//! Camera commands - snapshot, preset, reset, reboot

use std::path::Path;

use anyhow::{Context, Result};
use foscam_actuator::{
    transport, Actuator, Command, CommandOptions, CommandResponse, FoscamActuator,
};

use crate::output::OutputContext;

/// Execute one command and return its completion pair.
///
/// Transport failures are not part of the pair and surface as errors, with
/// the request URL (and so the password) removed.
async fn execute(
    actuator: &FoscamActuator,
    command: Command,
    options: &CommandOptions,
) -> Result<CommandResponse> {
    let outcome = actuator.execute(command, options).await;
    CommandResponse::from_outcome(outcome)
        .map_err(transport::without_url)
        .with_context(|| format!("Failed to reach camera at {}", actuator.descriptor().address()))
}

/// Run a status command (preset, reset, reboot)
pub async fn run(
    actuator: &FoscamActuator,
    command: Command,
    options: &CommandOptions,
    ctx: &OutputContext,
) -> Result<()> {
    let response = execute(actuator, command, options).await?;

    if ctx.is_json() {
        ctx.print_response(&response);
        return Ok(());
    }

    match (&response.error, &response.result) {
        (Some(error), _) => ctx.error(&format!("{} failed: {}", command, error.message)),
        (None, Some(result)) => {
            let message = String::from_utf8_lossy(result.content.as_bytes());
            ctx.success(&format!("{}: {}", command, message));
        }
        (None, None) => ctx.error(&format!("{} returned no result", command)),
    }

    Ok(())
}

/// Capture a snapshot and write it to `out`
pub async fn snap(
    actuator: &FoscamActuator,
    out: &Path,
    options: &CommandOptions,
    ctx: &OutputContext,
) -> Result<()> {
    let response = execute(actuator, Command::SnapPicture, options).await?;

    if let Some(result) = &response.result {
        std::fs::write(out, result.content.as_bytes())
            .with_context(|| format!("Failed to write snapshot: {}", out.display()))?;
    }

    if ctx.is_json() {
        ctx.print_response(&response);
        return Ok(());
    }

    match (&response.error, &response.result) {
        (Some(error), _) => ctx.error(&format!("Snapshot failed: {}", error.message)),
        (None, Some(result)) => ctx.success(&format!(
            "Saved {} bytes of {} to {}",
            result.content.len(),
            result.content_type,
            out.display()
        )),
        (None, None) => ctx.error("Snapshot returned no image"),
    }

    Ok(())
}
