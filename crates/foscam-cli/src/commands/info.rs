//! Info command - show actuator identity and discovery metadata

use anyhow::Result;
use foscam_actuator::{Actuator, FoscamActuator};

use crate::output::OutputContext;

/// Show the actuator id and its published properties
pub fn info(actuator: &FoscamActuator, ctx: &OutputContext) -> Result<()> {
    let properties = actuator.properties();
    let protocol = actuator
        .config()
        .protocol
        .map(|p| p.to_string())
        .unwrap_or_else(|| "-".to_string());

    let pairs = vec![
        ("ID", actuator.id()),
        ("Model", actuator.model().to_string()),
        ("Address", actuator.descriptor().address().to_string()),
        ("Protocol", protocol),
        ("Networks", properties.supported_networks.join(", ")),
        ("Data types", properties.data_types.join(", ")),
        ("Category", properties.category.to_string()),
        ("Max instances", properties.max_instances.to_string()),
        ("Commands", properties.commands.join(", ")),
    ];

    ctx.print_kv(&pairs);
    Ok(())
}
