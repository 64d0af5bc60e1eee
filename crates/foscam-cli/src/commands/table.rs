//! Commands command - show the command table

use anyhow::Result;
use foscam_actuator::{Command, ResponseKind};

use crate::output::{CommandRow, OutputContext};

/// List the commands a Foscam camera accepts and how each maps onto the CGI
pub fn commands(ctx: &OutputContext) -> Result<()> {
    let rows: Vec<CommandRow> = Command::ALL
        .iter()
        .map(|command| CommandRow {
            command: command.name().to_string(),
            vendor_token: command.vendor_token().to_string(),
            response: match command.response_kind() {
                ResponseKind::Binary => "image/jpeg".to_string(),
                ResponseKind::Status => "CGI_Result".to_string(),
            },
            extra_query: command.extra_query().unwrap_or("-").to_string(),
        })
        .collect();

    ctx.print(&rows);
    Ok(())
}
