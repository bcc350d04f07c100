//! Instance list formatter

use comfy_table::{presets::NOTHING, Table};

use crate::instance::Instance;

/// Render running instances as a plain table
pub fn format_instances_table(instances: &[Instance]) -> String {
    let mut table = Table::new();
    table
        .load_preset(NOTHING)
        .set_header(vec!["Name", "Description", "Watchdog PID", "Created"]);

    for instance in instances {
        table.add_row(vec![
            instance.name().to_string(),
            instance.description(),
            instance.properties().watchdog_pid.to_string(),
            instance.created_at_display(),
        ]);
    }

    table.to_string()
}

/// Selection label for an instance in interactive prompts
pub fn instance_label(instance: &Instance) -> String {
    format!(
        "{}  {}  (created {})",
        instance.name(),
        instance.description(),
        instance.created_at_display()
    )
}
